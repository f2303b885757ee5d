use anyhow::Result;

use crate::cli::ui;
use ptltl_bench::implementations::config::ToolConfig;
use ptltl_bench::implementations::nuxmv::NuXmvDecider;
use ptltl_bench::implementations::schema_registry::SchemaRegistry;
use ptltl_bench::traits::EquivalenceDecider;

/// Report which collaborators a run would be able to use
pub async fn execute(config: &ToolConfig, registry: &SchemaRegistry) -> Result<()> {
    ui::print_header("Environment Check");

    let decider = NuXmvDecider::from_config(&config.verifier);
    if decider.check_available().await? {
        ui::print_success(&format!("Verifier `{}` is available", decider.executable()));
    } else {
        ui::print_warning(
            &format!(
                "Verifier `{}` was not found; set verifier.executable in the config file",
                decider.executable()
            )
        );
    }
    ui::print_result("Verifier timeout", &format!("{}s", config.verifier.timeout_secs));

    match config.get_api_key() {
        Ok((provider, _)) => ui::print_success(&format!("API key found ({})", provider)),
        Err(e) => ui::print_warning(&e.to_string()),
    }
    ui::print_result("Endpoint", &config.llm_api.api_endpoint);
    ui::print_result("Default model", &config.llm_api.model);

    ui::print_result("Domains", &registry.domains().join(", "));
    Ok(())
}
