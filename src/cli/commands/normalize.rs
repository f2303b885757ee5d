use anyhow::Result;

use ptltl_bench::models::formula::normalize;

/// Print the ASCII form only, so the output can be piped
pub fn execute(formula: &str) -> Result<()> {
    println!("{}", normalize(formula));
    Ok(())
}
