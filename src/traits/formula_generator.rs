use async_trait::async_trait;

use crate::errors::BenchResult;
use crate::models::formula::Formula;

/// Language-model collaborator that proposes formulas and paraphrases
#[async_trait]
pub trait FormulaGenerator: Send + Sync {
    /// Translate a batch of requirements into one formula each, in order.
    ///
    /// Implementations may return fewer or more lines than requested; the
    /// batch driver reconciles the count.
    async fn translate_batch(
        &self,
        descriptions: &[String],
        variable_table: &str
    ) -> BenchResult<Vec<Formula>>;

    /// Paraphrase a formula as a natural-language requirement
    async fn describe(&self, formula: &Formula) -> BenchResult<String>;

    /// Translate a paraphrase back into a formula
    async fn regenerate(&self, description: &str, variable_table: &str) -> BenchResult<Formula>;

    /// Invent a fresh formula over the given variables
    async fn synthesize(&self, variable_table: &str) -> BenchResult<Formula>;
}
