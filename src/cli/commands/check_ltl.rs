use anyhow::Result;

use crate::cli::ui;
use ptltl_bench::implementations::automata_oracle::AutomataOracle;
use ptltl_bench::models::formula::Formula;

pub fn execute(first: &str, second: &str) -> Result<()> {
    ui::print_header("LTL Equivalence Check");
    ui::print_result("First", first);
    ui::print_result("Second", second);

    let verdict = AutomataOracle::new().compare(&Formula::from(first), &Formula::from(second));
    ui::print_verdict(&verdict);
    Ok(())
}
