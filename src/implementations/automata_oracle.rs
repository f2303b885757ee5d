use async_trait::async_trait;
use log::{ debug, warn };

use crate::errors::BenchResult;
use crate::implementations::ltl;
use crate::implementations::tableau;
use crate::models::common::Domain;
use crate::models::formula::Formula;
use crate::models::verification::{ EquivalenceVerdict, InconclusiveReason };
use crate::traits::EquivalenceOracle;

/// In-process oracle for future-time LTL over propositional atoms.
///
/// Needs no variable schema: atoms are whatever identifiers the formulas
/// use, so the domain argument is ignored.
#[derive(Debug, Clone, Default)]
pub struct AutomataOracle;

impl AutomataOracle {
    pub fn new() -> Self {
        Self
    }

    /// Decide equivalence without going through the async trait
    pub fn compare(&self, reference: &Formula, generated: &Formula) -> EquivalenceVerdict {
        let parsed = ltl::parse(reference.as_str()).and_then(|f| {
            ltl::parse(generated.as_str()).map(|g| (f, g))
        });

        match parsed {
            Ok((f, g)) => {
                debug!("Comparing {} against {}", f, g);
                if tableau::are_equivalent(&f, &g) {
                    EquivalenceVerdict::Equivalent
                } else {
                    EquivalenceVerdict::NotEquivalent
                }
            }
            Err(e) => {
                warn!("Automata oracle could not parse input: {}", e);
                EquivalenceVerdict::Inconclusive(InconclusiveReason::ParseFailure(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl EquivalenceOracle for AutomataOracle {
    async fn decide(
        &self,
        _domain: &Domain,
        reference: &Formula,
        generated: &Formula
    ) -> BenchResult<EquivalenceVerdict> {
        Ok(self.compare(reference, generated))
    }

    fn describe(&self) -> String {
        "LTL automata (in-process)".to_string()
    }
}

/// Boolean shortcut: true only when the formulas are provably equivalent.
/// Unparseable input yields false.
pub fn decide_via_automata(f1: &str, f2: &str) -> bool {
    AutomataOracle::new()
        .compare(&Formula::from(f1), &Formula::from(f2))
        .is_equivalent()
}
