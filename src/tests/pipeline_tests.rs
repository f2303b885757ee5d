#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::fs;
    use std::sync::atomic::{ AtomicUsize, Ordering };
    use std::sync::{ Arc, Mutex };
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::test;

    use crate::config::RunConfig;
    use crate::errors::{ BenchError, BenchResult };
    use crate::implementations::automata_oracle::AutomataOracle;
    use crate::implementations::pipeline::{ reconcile, BatchDriver, MISSING_FORMULA };
    use crate::implementations::results::{ ResultSink, ResultTable };
    use crate::implementations::schema_registry::SchemaRegistry;
    use crate::models::common::{ Domain, OracleKind };
    use crate::models::formula::Formula;
    use crate::models::record::{ EvaluationRecord, LtlExample, RequirementRow };
    use crate::models::verification::{ EquivalenceVerdict, InconclusiveReason };
    use crate::traits::{ EquivalenceOracle, FormulaGenerator };

    /// Echoes the FRETish text back as the formula, or replays scripted answers
    #[derive(Default)]
    struct ScriptedGenerator {
        batches: Mutex<VecDeque<BenchResult<Vec<Formula>>>>,
        regenerated: Mutex<VecDeque<BenchResult<Formula>>>,
        synthesized: Mutex<VecDeque<Formula>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl FormulaGenerator for ScriptedGenerator {
        async fn translate_batch(
            &self,
            descriptions: &[String],
            variable_table: &str
        ) -> BenchResult<Vec<Formula>> {
            assert!(variable_table.starts_with("Variable Mapping Table:"));
            self.calls.lock().unwrap().push(format!("translate {}", descriptions.len()));
            match self.batches.lock().unwrap().pop_front() {
                Some(answer) => answer,
                None => Ok(descriptions.iter().map(|d| Formula::from(d.as_str())).collect()),
            }
        }

        async fn describe(&self, formula: &Formula) -> BenchResult<String> {
            self.calls.lock().unwrap().push(format!("describe {}", formula));
            Ok(format!("paraphrase of\n{}", formula))
        }

        async fn regenerate(&self, description: &str, _variable_table: &str) -> BenchResult<Formula> {
            self.calls.lock().unwrap().push("regenerate".to_string());
            match self.regenerated.lock().unwrap().pop_front() {
                Some(answer) => answer,
                None => Ok(Formula::from(description.lines().last().unwrap_or_default())),
            }
        }

        async fn synthesize(&self, _variable_table: &str) -> BenchResult<Formula> {
            self.calls.lock().unwrap().push("synthesize".to_string());
            Ok(self.synthesized.lock().unwrap().pop_front().unwrap_or_else(|| Formula::from("H variable_1")))
        }
    }

    /// Equivalent iff the texts match; `hang` anywhere is inconclusive
    struct TextOracle;

    #[async_trait]
    impl EquivalenceOracle for TextOracle {
        async fn decide(
            &self,
            _domain: &Domain,
            reference: &Formula,
            generated: &Formula
        ) -> BenchResult<EquivalenceVerdict> {
            if generated.as_str().contains("hang") {
                return Ok(EquivalenceVerdict::Inconclusive(InconclusiveReason::Timeout(Duration::from_secs(30))));
            }
            Ok(if reference == generated {
                EquivalenceVerdict::Equivalent
            } else {
                EquivalenceVerdict::NotEquivalent
            })
        }

        fn describe(&self) -> String {
            "text".to_string()
        }
    }

    /// Equivalent for the first `healthy` calls, then the verifier vanishes
    struct VanishingOracle {
        healthy: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EquivalenceOracle for VanishingOracle {
        async fn decide(
            &self,
            _domain: &Domain,
            _reference: &Formula,
            _generated: &Formula
        ) -> BenchResult<EquivalenceVerdict> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.healthy {
                Ok(EquivalenceVerdict::Equivalent)
            } else {
                Err(BenchError::VerifierNotFound("nuXmv".into()))
            }
        }

        fn describe(&self) -> String {
            "vanishing".to_string()
        }
    }

    fn row(id: &str, fretish: &str, reference: &str) -> RequirementRow {
        RequirementRow {
            id: id.to_string(),
            description: String::new(),
            fretish: fretish.to_string(),
            reference: reference.to_string(),
        }
    }

    fn driver(config: RunConfig, generator: ScriptedGenerator) -> BatchDriver {
        BatchDriver::new(
            config,
            &SchemaRegistry::builtin().unwrap(),
            Box::new(generator),
            Box::new(TextOracle)
        ).unwrap()
    }

    fn config(iterations: u32, chunk_size: usize) -> RunConfig {
        RunConfig {
            iterations,
            chunk_size,
            domain: Domain::Pipeline,
            ..RunConfig::default()
        }
    }

    #[test]
    async fn test_reconcile_pads_and_truncates() {
        let padded = reconcile(vec![Formula::from("H a")], 3);
        assert_eq!(padded.len(), 3);
        assert_eq!(padded[2].as_str(), MISSING_FORMULA);

        let truncated = reconcile(vec![Formula::from("a"), Formula::from("b"), Formula::from("c")], 2);
        assert_eq!(truncated, vec![Formula::from("a"), Formula::from("b")]);
    }

    #[test]
    async fn test_translation_chunks_and_counts() {
        let generator = ScriptedGenerator::default();
        let calls = generator.calls.clone();
        let rows = vec![
            row("R1", "H a", "H a"),
            row("R2", "H b", "H c"),
            row("R3", "H d", ""),
            row("R4", "O e", "O e"),
            row("R5", "Y f", "Y f")
        ];

        let mut records: Vec<EvaluationRecord> = Vec::new();
        let tally = driver(config(2, 2), generator).run_translation(&rows, &mut records).await.unwrap();

        // Three chunks per iteration
        assert_eq!(calls.lock().unwrap().len(), 6);
        // R3 has no reference and is never recorded
        assert_eq!(records.len(), 8);
        assert!(records.iter().all(|r| r.id != "R3"));
        assert_eq!(tally.successes, 6);
        assert_eq!(tally.conclusive, 8);

        let r1: Vec<&str> = records
            .iter()
            .filter(|r| r.id == "R1")
            .map(|r| r.summary.as_str())
            .collect();
        assert_eq!(r1, vec!["1/1", "2/2"]);
        let r2: Vec<&str> = records
            .iter()
            .filter(|r| r.id == "R2")
            .map(|r| r.summary.as_str())
            .collect();
        assert_eq!(r2, vec!["0/1", "0/2"]);
    }

    #[test]
    async fn test_translation_pads_short_batches() {
        let generator = ScriptedGenerator::default();
        generator.batches.lock().unwrap().push_back(Ok(vec![Formula::from("H a")]));
        let rows = vec![row("R1", "H a", "H a"), row("R2", "H b", "H b")];

        let mut records: Vec<EvaluationRecord> = Vec::new();
        let tally = driver(config(1, 5), generator).run_translation(&rows, &mut records).await.unwrap();
        assert_eq!(records[1].generated.as_str(), MISSING_FORMULA);
        assert_eq!(records[1].verdict, EquivalenceVerdict::NotEquivalent);
        assert_eq!(tally.ratio(), "1/2");
    }

    #[test]
    async fn test_translation_survives_recoverable_errors() {
        let generator = ScriptedGenerator::default();
        generator.batches
            .lock()
            .unwrap()
            .push_back(Err(BenchError::GenerationError("rate limited".into())));
        let rows = vec![row("R1", "H a", "H a")];

        let mut records: Vec<EvaluationRecord> = Vec::new();
        driver(config(2, 5), generator).run_translation(&rows, &mut records).await.unwrap();
        assert_eq!(records[0].generated.as_str(), MISSING_FORMULA);
        assert_eq!(records[1].verdict, EquivalenceVerdict::Equivalent);
    }

    #[test]
    async fn test_translation_stops_on_fatal_errors() {
        let generator = ScriptedGenerator::default();
        generator.batches
            .lock()
            .unwrap()
            .push_back(Err(BenchError::ConfigurationError("no key".into())));
        let rows = vec![row("R1", "H a", "H a")];

        let result = driver(config(1, 5), generator).run_translation(&rows, &mut Vec::<EvaluationRecord>::new()).await;
        assert!(matches!(result, Err(BenchError::ConfigurationError(_))));
    }

    #[test]
    async fn test_round_trip_records_paraphrase_as_id() {
        let generator = ScriptedGenerator::default();
        let mut records: Vec<EvaluationRecord> = Vec::new();
        driver(config(3, 5), generator)
            .run_round_trip(&[Formula::from("H variable_1")], &mut records).await
            .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "paraphrase of H variable_1");
        assert_eq!(records[2].summary, "3/3");
        assert!(records.iter().all(|r| r.verdict == EquivalenceVerdict::Equivalent));
    }

    #[test]
    async fn test_round_trip_retries_inconclusive() {
        let generator = ScriptedGenerator::default();
        let calls = generator.calls.clone();
        {
            let mut regenerated = generator.regenerated.lock().unwrap();
            regenerated.push_back(Ok(Formula::from("H hang")));
            regenerated.push_back(Err(BenchError::GenerationError("timeout".into())));
            regenerated.push_back(Ok(Formula::from("O variable_2")));
        }

        let mut records: Vec<EvaluationRecord> = Vec::new();
        let tally = driver(config(1, 5), generator)
            .run_round_trip(&[Formula::from("H variable_1")], &mut records).await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].verdict, EquivalenceVerdict::NotEquivalent);
        assert_eq!(records[0].summary, "0/1");
        assert_eq!(tally.inconclusive, 0);
        let regenerations = calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == "regenerate")
            .count();
        assert_eq!(regenerations, 3);
    }

    #[test]
    async fn test_round_trip_gives_up_after_max_attempts() {
        let generator = ScriptedGenerator::default();
        {
            let mut regenerated = generator.regenerated.lock().unwrap();
            for _ in 0..3 {
                regenerated.push_back(Ok(Formula::from("H hang")));
            }
        }
        let run = RunConfig { max_attempts: 3, ..config(1, 5) };

        let mut records: Vec<EvaluationRecord> = Vec::new();
        let tally = driver(run, generator)
            .run_round_trip(&[Formula::from("H variable_1")], &mut records).await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].verdict.is_conclusive());
        assert_eq!(tally.inconclusive, 1);
        assert_eq!(tally.ratio(), "0/0");
    }

    #[test]
    async fn test_round_trip_needs_formulas() {
        let result = driver(config(1, 5), ScriptedGenerator::default())
            .run_round_trip(&[], &mut Vec::<EvaluationRecord>::new()).await;
        assert!(matches!(result, Err(BenchError::DatasetError(_))));
    }

    #[test]
    async fn test_synthetic_round_trip() {
        let generator = ScriptedGenerator::default();
        generator.synthesized.lock().unwrap().push_back(Formula::from("O variable_3"));
        let calls = generator.calls.clone();

        let mut records: Vec<EvaluationRecord> = Vec::new();
        let tally = driver(config(2, 5), generator).run_synthetic(&mut records).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reference.as_str(), "O variable_3");
        assert_eq!(records[1].reference.as_str(), "H variable_1");
        assert_eq!(tally.ratio(), "2/2");
        assert_eq!(calls.lock().unwrap().iter().filter(|c| *c == "synthesize").count(), 2);
    }

    #[test]
    async fn test_fatal_error_keeps_written_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("partial.csv");
        let mut sink = ResultSink::create(&path, ResultTable::PtLtl).unwrap();

        let rows = vec![row("R1", "H a", "H a"), row("R2", "H b", "H b"), row("R3", "H c", "H c")];
        let driver = BatchDriver::new(
            config(1, 5),
            &SchemaRegistry::builtin().unwrap(),
            Box::new(ScriptedGenerator::default()),
            Box::new(VanishingOracle { healthy: 2, calls: AtomicUsize::new(0) })
        ).unwrap();

        let result = driver.run_translation(&rows, &mut sink).await;
        assert!(matches!(result, Err(BenchError::VerifierNotFound(_))));
        assert_eq!(sink.written(), 2);
        drop(sink);

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "1/1,R1,H a,H a,True");
        assert_eq!(lines[2], "1/1,R2,H b,H b,True");
    }

    fn ltl_driver(iterations: u32, generator: ScriptedGenerator) -> BatchDriver {
        let run = RunConfig {
            iterations,
            domain: Domain::Lifted,
            oracle: OracleKind::Automata,
            ..RunConfig::default()
        };
        BatchDriver::new(
            run,
            &SchemaRegistry::builtin().unwrap(),
            Box::new(generator),
            Box::new(AutomataOracle::new())
        ).unwrap()
    }

    #[test]
    async fn test_ltl_run_decides_in_process() {
        let generator = ScriptedGenerator::default();
        {
            let mut regenerated = generator.regenerated.lock().unwrap();
            regenerated.push_back(Ok(Formula::from("globally (prop_1 imply finally prop_2)")));
            regenerated.push_back(Ok(Formula::from("G(prop_1 -> X prop_2)")));
            regenerated.push_back(Err(BenchError::GenerationError("rate limited".into())));
        }
        let examples = vec![LtlExample {
            nl: "whenever prop_1 holds , prop_2 eventually holds".into(),
            ltl: "globally ( prop_1 imply finally prop_2 )".into(),
        }];

        let mut records: Vec<EvaluationRecord> = Vec::new();
        let tally = ltl_driver(3, generator).run_ltl(&examples, &mut records).await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].reference.as_str(), "G ( prop_1 -> F prop_2 )");
        assert_eq!(records[0].generated.as_str(), "G (prop_1 -> F prop_2)");
        assert_eq!(records[0].verdict, EquivalenceVerdict::Equivalent);
        assert_eq!(records[1].verdict, EquivalenceVerdict::NotEquivalent);
        assert_eq!(records[2].generated.as_str(), MISSING_FORMULA);
        assert!(!records[2].verdict.is_conclusive());
        assert_eq!(records[2].summary, "1/2");
        assert_eq!(tally.inconclusive, 1);
        assert!(records.iter().all(|r| r.id == examples[0].nl));
    }

    #[test]
    async fn test_ltl_run_cycles_through_the_corpus() {
        let examples: Vec<LtlExample> = (1..=3)
            .map(|i| LtlExample {
                nl: format!("prop_{} always holds", i),
                ltl: format!("globally prop_{}", i),
            })
            .collect();

        let mut records: Vec<EvaluationRecord> = Vec::new();
        ltl_driver(7, ScriptedGenerator::default()).run_ltl(&examples, &mut records).await.unwrap();

        assert_eq!(records.len(), 7);
        // Each pass over the shuffled corpus visits every example once
        let mut first_pass: Vec<&str> = records[..3].iter().map(|r| r.id.as_str()).collect();
        first_pass.sort();
        assert_eq!(first_pass, vec!["prop_1 always holds", "prop_2 always holds", "prop_3 always holds"]);
        assert_eq!(records[3].id, records[0].id);
        assert_eq!(records[6].id, records[0].id);
    }

    #[test]
    async fn test_ltl_run_needs_examples() {
        let result = ltl_driver(1, ScriptedGenerator::default())
            .run_ltl(&[], &mut Vec::<EvaluationRecord>::new()).await;
        assert!(matches!(result, Err(BenchError::DatasetError(_))));
    }

    #[test]
    async fn test_invalid_run_config() {
        let result = BatchDriver::new(
            RunConfig { iterations: 0, ..RunConfig::default() },
            &SchemaRegistry::builtin().unwrap(),
            Box::new(ScriptedGenerator::default()),
            Box::new(TextOracle)
        );
        assert!(matches!(result, Err(BenchError::InvalidInput(_))));

        let unknown = BatchDriver::new(
            RunConfig { domain: Domain::Custom("nope".into()), ..RunConfig::default() },
            &SchemaRegistry::builtin().unwrap(),
            Box::new(ScriptedGenerator::default()),
            Box::new(TextOracle)
        );
        assert!(matches!(unknown, Err(BenchError::UnknownDomain(_))));
    }
}
