#[cfg(test)]
mod tests {
    use std::env;
    use std::path::Path;

    use dotenv::dotenv;
    use log::{ debug, info, warn };
    use tokio::test;

    use crate::errors::{ BenchError, RecoverableError };
    use crate::implementations::config::{ ConfigError, ToolConfig };
    use crate::implementations::generator::{ completion_lines, GenerationError, OpenAiGenerator };
    use crate::implementations::schema_registry::SchemaRegistry;
    use crate::models::common::{ Domain, OracleKind };
    use crate::models::formula::Formula;
    use crate::traits::FormulaGenerator;

    fn setup() {
        if env_logger::try_init().is_ok() {
            info!("Logger initialized");
        }

        match dotenv() {
            Ok(_) => debug!("Loaded environment variables from .env file"),
            Err(e) => warn!("Could not load .env file: {}", e),
        }
    }

    fn should_skip_api_tests() -> bool {
        setup();
        let available = env::var("OPENAI_API_KEY").is_ok();
        if !available {
            warn!("OPENAI_API_KEY not set. Skipping tests that require API access.");
        }
        !available
    }

    fn config_with_key() -> ToolConfig {
        let mut config = ToolConfig::default();
        config.llm_api.api_key = Some("test-key".to_string());
        config
    }

    #[test]
    async fn test_completion_lines() {
        let content = "```\n1. H(a -> b)\n\n  O c  \n2. Y d\n```\n";
        assert_eq!(completion_lines(content), vec!["H(a -> b)", "O c", "Y d"]);
        assert!(completion_lines("   \n```text\n```").is_empty());
        // A dot in the formula itself is not numbering
        assert_eq!(completion_lines("H(x. y)"), vec!["H(x. y)"]);
    }

    #[test]
    async fn test_generator_uses_configured_key_and_model() {
        let generator = OpenAiGenerator::new(config_with_key(), None, 0.3).unwrap();
        assert_eq!(generator.model(), ToolConfig::default().llm_api.model);
        assert_eq!(generator.temperature(), 0.3);

        let custom = OpenAiGenerator::new(config_with_key(), Some("gpt-4o".into()), 1.0).unwrap();
        assert_eq!(custom.model(), "gpt-4o");
    }

    #[test]
    async fn test_generation_errors_are_recoverable() {
        let network: BenchError = GenerationError::NetworkError("reset".into()).into();
        assert!(network.is_recoverable());

        let http: BenchError = (GenerationError::HttpError {
            status: 429,
            message: "slow down".into(),
        }).into();
        assert!(http.is_recoverable());

        let config: BenchError = GenerationError::ConfigError(
            ConfigError::MissingApiKey("none".into())
        ).into();
        assert!(!config.is_recoverable());
    }

    #[test]
    async fn test_default_templates_have_placeholders() {
        let config = ToolConfig::default();
        let batch = config.get_template("translate_batch").unwrap();
        assert!(batch.contains("{{variable_table}}") && batch.contains("{{requirements}}"));
        assert!(config.get_template("describe").unwrap().contains("{{formula}}"));
        assert!(config.get_template("regenerate").unwrap().contains("{{description}}"));
        assert!(config.get_template("synthesize").unwrap().contains("{{variable_table}}"));
        assert!(config.get_template("system").is_some());
    }

    #[test]
    async fn test_config_file_keeps_default_templates() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bench.yaml");
        std::fs::write(
            &path,
            "verifier:\n  executable: /opt/nuxmv/bin/nuXmv\n  timeout_secs: 60\nprompt_templates:\n  describe: \"Explain {{formula}}\"\n"
        ).unwrap();

        let config = ToolConfig::from_file(&path).unwrap();
        assert_eq!(config.verifier.executable, "/opt/nuxmv/bin/nuXmv");
        assert_eq!(config.verifier.timeout_secs, 60);
        assert_eq!(config.verifier.true_marker, "is true");
        assert_eq!(config.get_template("describe").unwrap(), "Explain {{formula}}");
        assert!(config.get_template("translate_batch").is_some());
    }

    #[test]
    async fn test_config_rejects_zero_timeout() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bench.yaml");
        std::fs::write(&path, "verifier:\n  timeout_secs: 0\n").unwrap();
        assert!(matches!(ToolConfig::from_file(&path), Err(ConfigError::InvalidValue(_))));
        assert!(matches!(
            ToolConfig::load(Some(Path::new("/nonexistent/bench.yaml"))),
            Err(ConfigError::FileReadError(_))
        ));
    }

    #[test]
    async fn test_templates_follow_the_oracle() {
        let config = ToolConfig::default();

        let ptltl = config.template_for(OracleKind::ModelChecking, "regenerate").unwrap();
        assert!(ptltl.contains("past-time LTL"));
        let system = config.template_for(OracleKind::ModelChecking, "system").unwrap();
        assert!(system.contains("Avoid future-time operators"));

        for task in ["system", "translate_batch", "describe", "regenerate", "synthesize"] {
            let ltl = config.template_for(OracleKind::Automata, task).unwrap();
            assert!(!ltl.contains("past-time"), "{} prompt asks for ptLTL", task);
        }
        let regenerate = config.template_for(OracleKind::Automata, "regenerate").unwrap();
        assert!(regenerate.contains("G, F, X, U"));
        assert!(regenerate.contains("{{description}}"));

        // Built-in LTL prompts survive a config file that only overrides one task
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bench.yaml");
        std::fs::write(&path, "prompt_templates:\n  ltl_system: \"Answer with LTL.\"\n").unwrap();
        let loaded = ToolConfig::from_file(&path).unwrap();
        assert_eq!(loaded.template_for(OracleKind::Automata, "system").unwrap(), "Answer with LTL.");
        assert!(loaded.template_for(OracleKind::Automata, "synthesize").is_some());
    }

    #[test]
    #[ignore = "Requires API key"]
    async fn test_live_round_trip() {
        if should_skip_api_tests() {
            return;
        }

        let registry = SchemaRegistry::builtin().unwrap();
        let table = registry.schema_for(&Domain::Master).unwrap().variable_table();
        let generator = OpenAiGenerator::new(ToolConfig::default(), None, 0.0).unwrap();

        let description = generator
            .describe(&Formula::from("H((classifier = 1 & dgt_7) -> (OpState = 1))"))
            .await
            .unwrap();
        info!("Description: {}", description);
        assert!(!description.trim().is_empty());

        let regenerated = generator.regenerate(&description, &table).await.unwrap();
        info!("Regenerated: {}", regenerated);
        assert!(!regenerated.is_blank());
    }
}
