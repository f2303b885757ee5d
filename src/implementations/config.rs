use serde::{ Deserialize, Serialize };
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::errors::BenchError;
use crate::models::common::OracleKind;
use crate::models::schema::VariableDeclaration;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl From<ConfigError> for BenchError {
    fn from(err: ConfigError) -> Self {
        BenchError::ConfigurationError(err.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// API key for the chat-completions service
    pub api_key: Option<String>,

    /// Chat-completions endpoint (OpenAI-compatible)
    pub api_endpoint: String,

    /// Default model, overridable per run
    pub model: String,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            api_key: None,
            api_endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-5-chat-latest".to_string(),
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct VerifierConfig {
    /// Model-checker executable, resolved through PATH
    pub executable: String,

    /// Wall-clock bound for one verifier run
    pub timeout_secs: u64,

    /// Output fragment printed when the claim holds
    pub true_marker: String,

    /// Output fragment printed when the claim fails
    pub false_marker: String,
}

impl VerifierConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        VerifierConfig {
            executable: "nuXmv".to_string(),
            timeout_secs: 30,
            true_marker: "is true".to_string(),
            false_marker: "is false".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ToolConfig {
    /// Language-model endpoint settings
    pub llm_api: ApiConfig,

    /// External verifier settings
    pub verifier: VerifierConfig,

    /// Prompt templates keyed by task
    pub prompt_templates: HashMap<String, String>,

    /// Maximum tokens per completion
    pub max_tokens: usize,

    /// Additional domain schemas keyed by domain name
    pub schemas: HashMap<String, Vec<VariableDeclaration>>,
}

impl ToolConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let mut config: ToolConfig = serde_yaml::from_str(&contents)?;
        // Templates the file leaves out fall back to the built-in wording
        for (name, template) in ToolConfig::default().prompt_templates {
            config.prompt_templates.entry(name).or_insert(template);
        }
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.verifier.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("verifier.timeout_secs must be positive".into()));
        }
        if self.verifier.executable.trim().is_empty() {
            return Err(ConfigError::InvalidValue("verifier.executable is empty".into()));
        }
        if self.verifier.true_marker.is_empty() || self.verifier.false_marker.is_empty() {
            return Err(ConfigError::InvalidValue("verifier markers must not be empty".into()));
        }
        Ok(())
    }

    /// Get the API key, checking environment variables if not in config.
    /// OPENAI_API_KEY is preferred; other OpenAI-compatible providers follow.
    pub fn get_api_key(&self) -> Result<(String, String), ConfigError> {
        use log::{ debug, info };

        if let Some(api_key) = &self.llm_api.api_key {
            debug!("Using API key from config");
            return Ok(("config".to_string(), api_key.clone()));
        }

        let providers = [
            ("openai", "OPENAI_API_KEY"),
            ("azure", "AZURE_OPENAI_API_KEY"),
            ("mistral", "MISTRAL_API_KEY"),
            ("together", "TOGETHER_API_KEY"),
        ];

        for (provider, env_var) in providers {
            match std::env::var(env_var) {
                Ok(key) => {
                    info!("Using API key for provider: {}", provider);
                    return Ok((provider.to_string(), key));
                }
                Err(_) => {
                    debug!("Provider {} not available", provider);
                }
            }
        }

        Err(ConfigError::MissingApiKey("No API keys found for any provider".to_string()))
    }

    /// Get the template for a specific task
    pub fn get_template(&self, template_name: &str) -> Option<String> {
        self.prompt_templates.get(template_name).cloned()
    }

    /// Template for `task` in the logic the oracle decides. The automata
    /// oracle reads future-time LTL, so its prompts live under `ltl_<task>`.
    pub fn template_for(&self, oracle: OracleKind, task: &str) -> Option<String> {
        match oracle {
            OracleKind::ModelChecking => self.get_template(task),
            OracleKind::Automata => self.get_template(&format!("ltl_{}", task)),
        }
    }
}

/// Default configuration
impl Default for ToolConfig {
    fn default() -> Self {
        let mut prompt_templates = HashMap::new();
        prompt_templates.insert(
            "system".to_string(),
            r#"You are an expert in formal methods and temporal logic. Use only past-time LTL operators:
- H φ: Historically φ
- O φ: Once φ
- Y φ: Yesterday φ
- φ S ψ: φ Since ψ
Avoid future-time operators such as G, F, X or U."#.to_string()
        );
        prompt_templates.insert(
            "translate_batch".to_string(),
            r#"Translate each of the following natural-language requirements into its corresponding past-time LTL (ptLTL) formula.

Return only the formulas, one per line, in the same order.
Do not include any numbering, explanations, or LaTeX syntax.

Strictly use variables from the following variable mapping:
{{variable_table}}

{{requirements}}"#.to_string()
        );
        prompt_templates.insert(
            "describe".to_string(),
            r#"Convert the following ptLTL requirement into natural language.
Write a description that sounds like a real engineering requirement.
Do not mention temporal logic. Keep the variable names exactly.
Do not use markdown formatting.

Formula:
{{formula}}"#.to_string()
        );
        prompt_templates.insert(
            "regenerate".to_string(),
            r#"Translate the following natural-language requirement into a plain-text past-time LTL (ptLTL) formula.

The formula must use ONLY the variables:
{{variable_table}}

Produce exactly one syntactically valid formula and nothing else.

Requirement:
{{description}}"#.to_string()
        );
        prompt_templates.insert(
            "synthesize".to_string(),
            r#"Generate a single realistic past-time LTL (ptLTL) requirement for a safety-critical embedded system.
Use only these variables:
{{variable_table}}

Use one or two ptLTL operators and provide only the formula on a single line."#.to_string()
        );

        prompt_templates.insert(
            "ltl_system".to_string(),
            "You generate valid LTL formulas.".to_string()
        );
        prompt_templates.insert(
            "ltl_translate_batch".to_string(),
            r#"Convert each of the following requirements into a valid LTL formula using operators:
G, F, X, U, &, |, ->, <->, !.
Use only the signals listed below.
Return only the formulas, one per line, in the same order.

Signals:
{{variable_table}}

{{requirements}}"#.to_string()
        );
        prompt_templates.insert(
            "ltl_describe".to_string(),
            r#"Convert the following LTL formula into a natural-language requirement.
Keep the signal names exactly and do not mention temporal logic.

Formula:
{{formula}}"#.to_string()
        );
        prompt_templates.insert(
            "ltl_regenerate".to_string(),
            r#"Convert the requirement into a valid LTL formula using operators:
G, F, X, U, &, |, ->, <->, !.
Use only these signals:
{{variable_table}}
Output only the formula.

Requirement: {{description}}"#.to_string()
        );
        prompt_templates.insert(
            "ltl_synthesize".to_string(),
            r#"Generate a single realistic LTL requirement using operators G, F, X, U, &, |, ->, <->, !.
Use only these signals:
{{variable_table}}

Provide only the formula on a single line."#.to_string()
        );

        ToolConfig {
            llm_api: ApiConfig::default(),
            verifier: VerifierConfig::default(),
            prompt_templates,
            max_tokens: 4096,
            schemas: HashMap::new(),
        }
    }
}
