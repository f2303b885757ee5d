use std::collections::HashMap;

use log::{ debug, info, warn };
use rand::seq::{ IndexedRandom, SliceRandom };

use crate::config::RunConfig;
use crate::errors::{ BenchError, BenchResult, RecoverableError };
use crate::implementations::ltl::normalize_keywords;
use crate::implementations::schema_registry::SchemaRegistry;
use crate::models::formula::Formula;
use crate::models::record::{ EvaluationRecord, LtlExample, RequirementRow, SuccessTally };
use crate::models::verification::{ EquivalenceVerdict, InconclusiveReason };
use crate::traits::{ EquivalenceOracle, FormulaGenerator, RecordSink };

/// Placeholder for translations the model did not return
pub const MISSING_FORMULA: &str = "ERROR";

/// Pad with [`MISSING_FORMULA`] or truncate so there is one formula per request
pub fn reconcile(mut generated: Vec<Formula>, expected: usize) -> Vec<Formula> {
    if generated.len() != expected {
        warn!("Expected {} formulas, got {}", expected, generated.len());
        generated.resize(expected, Formula::from(MISSING_FORMULA));
    }
    generated
}

/// One-line form of a paraphrase, used as the record identifier
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sequential evaluation loop. Exactly one verifier call is in flight at
/// any time.
pub struct BatchDriver {
    config: RunConfig,
    generator: Box<dyn FormulaGenerator>,
    oracle: Box<dyn EquivalenceOracle>,
    variable_table: String,
}

impl BatchDriver {
    pub fn new(
        config: RunConfig,
        registry: &SchemaRegistry,
        generator: Box<dyn FormulaGenerator>,
        oracle: Box<dyn EquivalenceOracle>
    ) -> BenchResult<Self> {
        config.validate()?;
        let variable_table = registry.schema_for(&config.domain)?.variable_table();
        Ok(Self {
            config,
            generator,
            oracle,
            variable_table,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Translate every row's FRETish description and compare against its
    /// reference formula, `iterations` times over. Each record reaches
    /// `sink` as soon as its verdict is known.
    pub async fn run_translation(
        &self,
        rows: &[RequirementRow],
        sink: &mut dyn RecordSink
    ) -> BenchResult<SuccessTally> {
        let mut total = SuccessTally::default();
        let mut per_id: HashMap<&str, SuccessTally> = HashMap::new();

        for iteration in 1..=self.config.iterations {
            info!("Iteration {}/{}", iteration, self.config.iterations);

            for (chunk_index, chunk) in rows.chunks(self.config.chunk_size).enumerate() {
                let base = chunk_index * self.config.chunk_size;
                info!("Processing rows {} to {}", base, base + chunk.len() - 1);

                let descriptions: Vec<String> = chunk
                    .iter()
                    .map(|row| row.fretish.clone())
                    .collect();
                let generated = match
                    self.generator.translate_batch(&descriptions, &self.variable_table).await
                {
                    Ok(formulas) => formulas,
                    Err(e) if e.is_recoverable() => {
                        warn!("Translation of rows starting at {} failed: {}", base, e);
                        Vec::new()
                    }
                    Err(e) => {
                        return Err(e);
                    }
                };

                for (row, generated) in chunk.iter().zip(reconcile(generated, chunk.len())) {
                    let Some(reference) = row.reference_formula() else {
                        debug!("Row {} has no reference formula, skipping", row.id);
                        continue;
                    };

                    let verdict = self.oracle.decide(&self.config.domain, &reference, &generated).await?;
                    debug!("ID {}: `{}` vs `{}`: {}", row.id, generated, reference, verdict);

                    let tally = per_id.entry(row.id.as_str()).or_default();
                    tally.record(&verdict);
                    total.record(&verdict);

                    let record = EvaluationRecord {
                        summary: tally.ratio(),
                        id: row.id.clone(),
                        reference,
                        generated,
                        verdict,
                    };
                    sink.write(&record)?;
                }
            }
        }

        Ok(total)
    }

    /// Paraphrase randomly chosen reference formulas and translate them back
    pub async fn run_round_trip(
        &self,
        formulas: &[Formula],
        sink: &mut dyn RecordSink
    ) -> BenchResult<SuccessTally> {
        if formulas.is_empty() {
            return Err(BenchError::DatasetError("no reference formulas to sample from".into()));
        }

        let mut tally = SuccessTally::default();
        for iteration in 1..=self.config.iterations {
            info!("Iteration {}/{}", iteration, self.config.iterations);
            let record = self.attempt_round_trip(&mut tally, || {
                formulas
                    .choose(&mut rand::rng())
                    .cloned()
                    .ok_or_else(|| BenchError::DatasetError("empty formula pool".into()))
            }).await?;
            if let Some(record) = record {
                sink.write(&record)?;
            }
        }
        Ok(tally)
    }

    /// Round trips over formulas the model invents itself
    pub async fn run_synthetic(&self, sink: &mut dyn RecordSink) -> BenchResult<SuccessTally> {
        let mut tally = SuccessTally::default();
        for iteration in 1..=self.config.iterations {
            info!("Iteration {}/{}", iteration, self.config.iterations);
            if let Some(record) = self.attempt_synthetic(&mut tally).await? {
                sink.write(&record)?;
            }
        }
        Ok(tally)
    }

    /// Translate lifted-corpus requirements into future-time LTL.
    ///
    /// The examples are shuffled once and visited in turn, wrapping around
    /// when `iterations` exceeds the corpus. Both formulas are recorded with
    /// their keywords normalized.
    pub async fn run_ltl(
        &self,
        examples: &[LtlExample],
        sink: &mut dyn RecordSink
    ) -> BenchResult<SuccessTally> {
        if examples.is_empty() {
            return Err(BenchError::DatasetError("no LTL examples to translate".into()));
        }

        let mut order: Vec<&LtlExample> = examples.iter().collect();
        order.shuffle(&mut rand::rng());

        let mut tally = SuccessTally::default();
        let visits = order.iter().cycle().take(self.config.iterations as usize);
        for (iteration, example) in visits.enumerate() {
            info!("Iteration {}/{}", iteration + 1, self.config.iterations);

            let reference = Formula::new(normalize_keywords(&example.ltl));
            let (generated, verdict) = match
                self.generator.regenerate(&example.nl, &self.variable_table).await
            {
                Ok(formula) => {
                    let generated = Formula::new(normalize_keywords(formula.as_str()));
                    let verdict = self.oracle.decide(&self.config.domain, &reference, &generated).await?;
                    (generated, verdict)
                }
                // `ERROR` would parse as an atom, so no comparison is attempted
                Err(e) if e.is_recoverable() => {
                    warn!("Translation of `{}` failed: {}", example.nl, e);
                    let reason = InconclusiveReason::ParseFailure(format!("no formula generated: {}", e));
                    (Formula::from(MISSING_FORMULA), EquivalenceVerdict::Inconclusive(reason))
                }
                Err(e) => {
                    return Err(e);
                }
            };
            debug!("`{}` vs `{}`: {}", generated, reference, verdict);
            tally.record(&verdict);

            let record = EvaluationRecord {
                summary: tally.ratio(),
                id: example.nl.clone(),
                reference,
                generated,
                verdict,
            };
            sink.write(&record)?;
        }
        Ok(tally)
    }

    async fn attempt_synthetic(&self, tally: &mut SuccessTally) -> BenchResult<Option<EvaluationRecord>> {
        let mut last = None;
        for attempt in 1..=self.config.max_attempts {
            let base = match self.generator.synthesize(&self.variable_table).await {
                Ok(formula) => formula,
                Err(e) if e.is_recoverable() => {
                    warn!("Attempt {}: synthesis failed: {}", attempt, e);
                    continue;
                }
                Err(e) => {
                    return Err(e);
                }
            };
            debug!("Synthesized `{}`", base);
            match self.cycle(attempt, base).await? {
                Some(record) if record.verdict.is_conclusive() => {
                    tally.record(&record.verdict);
                    return Ok(Some(self.summarized(record, tally)));
                }
                other => {
                    last = other.or(last);
                }
            }
        }
        Ok(self.exhausted(last, tally))
    }

    async fn attempt_round_trip<F>(
        &self,
        tally: &mut SuccessTally,
        mut pick: F
    ) -> BenchResult<Option<EvaluationRecord>>
        where F: FnMut() -> BenchResult<Formula> + Send
    {
        let mut last = None;
        for attempt in 1..=self.config.max_attempts {
            let base = pick()?;
            debug!("Selected reference `{}`", base);
            match self.cycle(attempt, base).await? {
                Some(record) if record.verdict.is_conclusive() => {
                    tally.record(&record.verdict);
                    return Ok(Some(self.summarized(record, tally)));
                }
                other => {
                    last = other.or(last);
                }
            }
        }
        Ok(self.exhausted(last, tally))
    }

    /// Describe, regenerate, decide. `None` means a recoverable generation
    /// failure.
    async fn cycle(&self, attempt: u32, base: Formula) -> BenchResult<Option<EvaluationRecord>> {
        let description = match self.generator.describe(&base).await {
            Ok(description) => description,
            Err(e) if e.is_recoverable() => {
                warn!("Attempt {}: paraphrase failed: {}", attempt, e);
                return Ok(None);
            }
            Err(e) => {
                return Err(e);
            }
        };

        let regenerated = match self.generator.regenerate(&description, &self.variable_table).await {
            Ok(formula) => formula,
            Err(e) if e.is_recoverable() => {
                warn!("Attempt {}: regeneration failed: {}", attempt, e);
                return Ok(None);
            }
            Err(e) => {
                return Err(e);
            }
        };

        let verdict = self.oracle.decide(&self.config.domain, &base, &regenerated).await?;
        if !verdict.is_conclusive() {
            warn!("Attempt {}: {}, retrying", attempt, verdict);
        }

        Ok(
            Some(EvaluationRecord {
                summary: String::new(),
                id: single_line(&description),
                reference: base,
                generated: regenerated,
                verdict,
            })
        )
    }

    fn summarized(&self, mut record: EvaluationRecord, tally: &SuccessTally) -> EvaluationRecord {
        record.summary = tally.ratio();
        record
    }

    /// Every attempt failed: keep the last inconclusive comparison, if any
    fn exhausted(
        &self,
        last: Option<EvaluationRecord>,
        tally: &mut SuccessTally
    ) -> Option<EvaluationRecord> {
        warn!("Giving up after {} attempts", self.config.max_attempts);
        let record = last?;
        tally.record(&record.verdict);
        Some(self.summarized(record, tally))
    }
}
