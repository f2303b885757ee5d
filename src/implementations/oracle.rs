use async_trait::async_trait;
use log::{ debug, warn };

use crate::errors::BenchResult;
use crate::implementations::config::VerifierConfig;
use crate::implementations::schema_registry::SchemaRegistry;
use crate::models::common::Domain;
use crate::models::formula::Formula;
use crate::models::smv::SmvModel;
use crate::models::verification::{ EquivalenceVerdict, InconclusiveReason, RawOutput };
use crate::traits::{ EquivalenceDecider, EquivalenceOracle };

/// Map captured verifier output to a verdict.
///
/// A timeout wins over anything printed. Otherwise the true marker is
/// checked before the false marker, and output carrying neither is
/// inconclusive.
pub fn classify(raw: &RawOutput, true_marker: &str, false_marker: &str) -> EquivalenceVerdict {
    if raw.timed_out {
        return EquivalenceVerdict::Inconclusive(InconclusiveReason::Timeout(raw.elapsed));
    }
    if raw.stdout.contains(true_marker) {
        EquivalenceVerdict::Equivalent
    } else if raw.stdout.contains(false_marker) {
        EquivalenceVerdict::NotEquivalent
    } else {
        EquivalenceVerdict::Inconclusive(InconclusiveReason::UnrecognizedOutput)
    }
}

/// Equivalence by model checking `LTLSPEC (f1) <-> (f2)` over a domain's
/// variable schema. One oracle serves every domain.
pub struct ModelCheckingOracle<D: EquivalenceDecider> {
    decider: D,
    registry: SchemaRegistry,
    true_marker: String,
    false_marker: String,
}

impl<D: EquivalenceDecider> ModelCheckingOracle<D> {
    pub fn new(decider: D, registry: SchemaRegistry, config: &VerifierConfig) -> Self {
        Self {
            decider,
            registry,
            true_marker: config.true_marker.clone(),
            false_marker: config.false_marker.clone(),
        }
    }

    pub fn decider(&self) -> &D {
        &self.decider
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Build the model the decider would see
    pub fn model_for(
        &self,
        domain: &Domain,
        reference: &Formula,
        generated: &Formula
    ) -> BenchResult<SmvModel> {
        let schema = self.registry.schema_for(domain)?;
        let first = reference.normalized();
        let second = generated.normalized();

        for formula in [&first, &second] {
            let unknown = schema.undeclared_identifiers(formula.as_str());
            if !unknown.is_empty() {
                warn!(
                    "Formula `{}` uses identifiers not declared for {}: {:?}",
                    formula,
                    domain.key(),
                    unknown
                );
            }
        }

        Ok(SmvModel::synthesize(schema, &first, &second))
    }
}

#[async_trait]
impl<D: EquivalenceDecider> EquivalenceOracle for ModelCheckingOracle<D> {
    async fn decide(
        &self,
        domain: &Domain,
        reference: &Formula,
        generated: &Formula
    ) -> BenchResult<EquivalenceVerdict> {
        let model = self.model_for(domain, reference, generated)?;
        let raw = self.decider.decide(&model).await?;
        let verdict = classify(&raw, &self.true_marker, &self.false_marker);

        match &verdict {
            EquivalenceVerdict::Inconclusive(reason) => {
                warn!(
                    "Inconclusive check ({}) for `{}` vs `{}`\n--- stdout ---\n{}\n--- stderr ---\n{}",
                    reason,
                    reference,
                    generated,
                    raw.stdout,
                    raw.stderr
                );
            }
            conclusive => {
                debug!("{} reported {} in {:?}", self.decider.tool_name(), conclusive, raw.elapsed);
            }
        }

        Ok(verdict)
    }

    fn describe(&self) -> String {
        format!("model checking via {}", self.decider.tool_name())
    }
}
