use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Result;

use crate::cli::ui;
use ptltl_bench::implementations::dataset::load_reference_formulas;
use ptltl_bench::implementations::schema_registry::SchemaRegistry;
use ptltl_bench::models::common::Domain;
use ptltl_bench::models::formula::extract_identifiers;

pub fn execute(registry: &SchemaRegistry, input: &Path, domain: Option<&str>) -> Result<()> {
    ui::print_header("Identifiers in Reference Formulas");

    let formulas = load_reference_formulas(input)?;
    let identifiers: BTreeSet<String> = formulas
        .iter()
        .flat_map(|f| extract_identifiers(f.as_str()))
        .collect();

    for identifier in &identifiers {
        println!("{}", identifier);
    }
    println!();
    ui::print_result("Total unique identifiers", &identifiers.len().to_string());

    if let Some(name) = domain {
        let domain = name.parse::<Domain>()?;
        let schema = registry.schema_for(&domain)?;
        let undeclared: BTreeSet<String> = formulas
            .iter()
            .flat_map(|f| schema.undeclared_identifiers(f.as_str()))
            .collect();

        if undeclared.is_empty() {
            ui::print_success(&format!("Every identifier is declared for {}", domain));
        } else {
            ui::print_warning(
                &format!("{} identifiers are not declared for {}:", undeclared.len(), domain)
            );
            for identifier in &undeclared {
                println!("  {}", identifier);
            }
        }
    }
    Ok(())
}
