use anyhow::Result;

use crate::cli::ui;
use ptltl_bench::implementations::schema_registry::SchemaRegistry;
use ptltl_bench::models::common::Domain;

pub fn execute(registry: &SchemaRegistry, domain: Option<&str>, table: bool) -> Result<()> {
    let Some(name) = domain else {
        ui::print_header("Registered Domains");
        for key in registry.domains() {
            let domain = key.parse::<Domain>()?;
            let schema = registry.schema_for(&domain)?;
            ui::print_result(&key, &format!("{} ({} variables)", domain, schema.len()));
        }
        return Ok(());
    };

    let schema = registry.schema_for(&name.parse::<Domain>()?)?;
    if table {
        print!("{}", schema.variable_table());
    } else {
        print!("{}", schema.smv_declarations());
    }
    Ok(())
}
