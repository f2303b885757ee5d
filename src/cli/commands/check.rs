use anyhow::Result;

use crate::cli::commands::resolve_domain;
use crate::cli::ui;
use ptltl_bench::implementations::config::ToolConfig;
use ptltl_bench::implementations::nuxmv::NuXmvDecider;
use ptltl_bench::implementations::oracle::ModelCheckingOracle;
use ptltl_bench::implementations::schema_registry::SchemaRegistry;
use ptltl_bench::models::formula::Formula;
use ptltl_bench::traits::EquivalenceOracle;

/// Equivalence check of two formulas through the model checker
pub async fn execute(
    config: &ToolConfig,
    registry: SchemaRegistry,
    reference: &str,
    generated: &str,
    domain: Option<&str>,
    show_model: bool
) -> Result<()> {
    ui::print_header("Equivalence Check");

    let domain = resolve_domain(&registry, domain)?;
    let oracle = ModelCheckingOracle::new(
        NuXmvDecider::from_config(&config.verifier),
        registry,
        &config.verifier
    );

    let reference = Formula::from(reference);
    let generated = Formula::from(generated);

    ui::print_result("Domain", &domain.to_string());
    ui::print_result("Reference", reference.as_str());
    ui::print_result("Generated", generated.as_str());

    if show_model {
        let model = oracle.model_for(&domain, &reference, &generated)?;
        println!();
        ui::print_text(model.as_str());
    }

    let spinner = ui::spinner_with_message(&oracle.describe());
    let verdict = oracle.decide(&domain, &reference, &generated).await;
    spinner.finish_and_clear();

    ui::print_verdict(&verdict?);
    Ok(())
}
