use std::fmt;

use crate::models::formula::Formula;
use crate::models::schema::VariableSchema;

/// A complete SMV module asking whether two formulas are equivalent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmvModel {
    text: String,
}

impl SmvModel {
    /// Build `MODULE main`, the schema's `VAR` block and a single
    /// `LTLSPEC (f1) <-> (f2)` claim.
    ///
    /// The formulas are inserted verbatim; callers normalize them first.
    pub fn synthesize(schema: &VariableSchema, first: &Formula, second: &Formula) -> Self {
        let mut text = String::from("MODULE main\n");
        text.push_str(&schema.smv_declarations());
        text.push('\n');
        text.push_str(&format!("LTLSPEC ({}) <-> ({})\n", first, second));
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for SmvModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
