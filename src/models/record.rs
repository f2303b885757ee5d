use serde::{ Deserialize, Serialize };

use crate::models::formula::Formula;
use crate::models::verification::EquivalenceVerdict;

/// One requirement from a semicolon-delimited dataset
#[derive(Debug, Clone, Deserialize)]
pub struct RequirementRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "NL description", default)]
    pub description: String,
    #[serde(rename = "FRETish", default)]
    pub fretish: String,
    #[serde(rename = "LTL", default)]
    pub reference: String,
}

impl RequirementRow {
    pub fn reference_formula(&self) -> Option<Formula> {
        let formula = Formula::new(self.reference.trim());
        if formula.is_blank() { None } else { Some(formula) }
    }
}

/// One entry of the lifted future-time LTL corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LtlExample {
    /// Natural-language requirement
    pub nl: String,
    /// Reference formula, keywords not yet normalized
    pub ltl: String,
}

/// One row of the results table. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRecord {
    /// Running `successes/conclusive` ratio at the time of the record
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "ptLTL")]
    pub reference: Formula,
    #[serde(rename = "Generated ptLTL")]
    pub generated: Formula,
    #[serde(rename = "Equivalence Check")]
    pub verdict: EquivalenceVerdict,
}

/// Success counter whose ratio only counts conclusive verdicts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuccessTally {
    pub successes: u32,
    pub conclusive: u32,
    pub inconclusive: u32,
}

impl SuccessTally {
    pub fn record(&mut self, verdict: &EquivalenceVerdict) {
        match verdict.as_bool() {
            Some(equivalent) => {
                self.conclusive += 1;
                if equivalent {
                    self.successes += 1;
                }
            }
            None => {
                self.inconclusive += 1;
            }
        }
    }

    pub fn ratio(&self) -> String {
        format!("{}/{}", self.successes, self.conclusive)
    }

    pub fn accuracy(&self) -> Option<f64> {
        if self.conclusive == 0 {
            None
        } else {
            Some((self.successes as f64) / (self.conclusive as f64))
        }
    }
}
