pub mod check;
pub mod check_ltl;
pub mod doctor;
pub mod normalize;
pub mod runs;
pub mod schema;
pub mod vars;

use anyhow::{ anyhow, Result };

use crate::cli::ui;
use crate::cli::RunArgs;
use ptltl_bench::config::RunConfig;
use ptltl_bench::implementations::automata_oracle::AutomataOracle;
use ptltl_bench::implementations::config::ToolConfig;
use ptltl_bench::implementations::nuxmv::NuXmvDecider;
use ptltl_bench::implementations::oracle::ModelCheckingOracle;
use ptltl_bench::implementations::schema_registry::SchemaRegistry;
use ptltl_bench::models::common::{ Domain, OracleKind };
use ptltl_bench::traits::EquivalenceOracle;

/// Domain from the command line, or an interactive choice when absent
pub fn resolve_domain(registry: &SchemaRegistry, requested: Option<&str>) -> Result<Domain> {
    let domain = match requested {
        Some(name) => name.parse::<Domain>()?,
        None => ui::select_domain(&registry.domains())?,
    };
    // Fail early on unknown names rather than at the first comparison
    registry.schema_for(&domain)?;
    Ok(domain)
}

/// Oracle of the requested kind
pub fn build_oracle(
    kind: OracleKind,
    config: &ToolConfig,
    registry: &SchemaRegistry
) -> Box<dyn EquivalenceOracle> {
    match kind {
        OracleKind::ModelChecking =>
            Box::new(
                ModelCheckingOracle::new(
                    NuXmvDecider::from_config(&config.verifier),
                    registry.clone(),
                    &config.verifier
                )
            ),
        OracleKind::Automata => Box::new(AutomataOracle::new()),
    }
}

/// Assemble the run parameters shared by the LLM-driven commands
pub fn run_config(args: &RunArgs, registry: &SchemaRegistry, chunk_size: usize) -> Result<RunConfig> {
    let oracle = args.oracle.parse::<OracleKind>().map_err(|e| anyhow!(e))?;
    let domain = resolve_domain(registry, args.domain.as_deref())?;
    let config = RunConfig {
        model: args.model.clone(),
        temperature: args.temperature,
        iterations: args.iterations,
        chunk_size,
        domain,
        oracle,
        max_attempts: args.max_attempts,
        output: args.output.clone(),
    };
    config.validate()?;
    Ok(config)
}
