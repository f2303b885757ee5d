use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };
use thiserror::Error;

use crate::errors::{ BenchError, BenchResult };
use crate::implementations::config::{ ConfigError, ToolConfig };
use crate::models::common::OracleKind;
use crate::models::formula::Formula;
use crate::traits::FormulaGenerator;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API error: {0}")] ApiError(String),

    #[error("Configuration error: {0}")] ConfigError(#[from] ConfigError),

    #[error("Failed to parse API response: {0}")] ParseError(String),

    #[error("Template error: {0}")] TemplateError(String),

    #[error("Network error: {0}")] NetworkError(String),

    #[error("HTTP error: {status} - {message}")] HttpError {
        status: u16,
        message: String,
    },
}

impl From<GenerationError> for BenchError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::ConfigError(err) => BenchError::ConfigurationError(err.to_string()),
            GenerationError::TemplateError(msg) => BenchError::ConfigurationError(msg),
            other => BenchError::GenerationError(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct ChatResponseChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatResponseChoice>,
}

/// Drop blank lines, code fences and list numbering from a completion
pub fn completion_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .map(|line| {
            let unnumbered = line
                .split_once(". ")
                .filter(|(prefix, _)| !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()))
                .map(|(_, rest)| rest)
                .unwrap_or(line);
            unnumbered.trim().to_string()
        })
        .collect()
}

/// Chat-completions client for an OpenAI-compatible endpoint
pub struct OpenAiGenerator {
    config: ToolConfig,
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
    oracle: OracleKind,
}

impl OpenAiGenerator {
    /// Resolves the API key eagerly so a missing key fails before any work
    pub fn new(config: ToolConfig, model: Option<String>, temperature: f32) -> BenchResult<Self> {
        let (provider, api_key) = config.get_api_key()?;
        debug!("Generator uses credentials from {}", provider);

        let http_client = reqwest::Client
            ::builder()
            .timeout(Duration::from_secs(config.llm_api.request_timeout_secs))
            .build()
            .map_err(|e| BenchError::ConfigurationError(format!("HTTP client: {}", e)))?;

        let model = model.unwrap_or_else(|| config.llm_api.model.clone());
        Ok(Self {
            config,
            http_client,
            api_key,
            model,
            temperature,
            oracle: OracleKind::default(),
        })
    }

    /// Prompt for formulas in the logic `oracle` decides
    pub fn for_oracle(mut self, oracle: OracleKind) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    fn render_template(
        &self,
        template_name: &str,
        params: &HashMap<&str, &str>
    ) -> Result<String, GenerationError> {
        let template = self.config
            .template_for(self.oracle, template_name)
            .ok_or_else(||
                GenerationError::TemplateError(format!("Template not found: {}", template_name))
            )?;

        let mut result = template;
        for (key, value) in params {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        Ok(result)
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let system = self.config.template_for(self.oracle, "system").unwrap_or_default();
        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!("Model: {}, temperature: {}", self.model, self.temperature);
        debug!("Prompt length: {} characters", prompt.len());

        let response = self.http_client
            .post(&self.config.llm_api.api_endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send().await
            .map_err(|e| {
                let error_msg = format!("Network error when calling the chat API: {}", e);
                warn!("{}", error_msg);
                if e.is_timeout() {
                    warn!("Request timed out");
                }
                if e.is_connect() {
                    warn!("Connection error - check network connectivity");
                }
                GenerationError::NetworkError(error_msg)
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text().await
                .unwrap_or_else(|_| "Failed to get error message".to_string());

            warn!("API error: HTTP {} - {}", status, error_text);
            return Err(GenerationError::HttpError {
                status,
                message: error_text,
            });
        }

        let response_text = response.text().await.map_err(|e| {
            warn!("Failed to get text from response: {}", e);
            GenerationError::ParseError(e.to_string())
        })?;
        debug!("Response length: {} characters", response_text.len());

        let parsed: ChatResponse = serde_json
            ::from_str(&response_text)
            .map_err(|e| GenerationError::ParseError(format!("Invalid JSON response: {}", e)))?;

        let content = parsed.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::ApiError("No response from API".to_string()))?;

        info!("API call completed successfully");
        Ok(content.trim().to_string())
    }

    async fn single_formula(&self, prompt: &str) -> Result<Formula, GenerationError> {
        let content = self.complete(prompt).await?;
        completion_lines(&content)
            .into_iter()
            .next()
            .map(Formula::from)
            .ok_or_else(|| GenerationError::ParseError("completion contained no formula".to_string()))
    }
}

#[async_trait]
impl FormulaGenerator for OpenAiGenerator {
    async fn translate_batch(
        &self,
        descriptions: &[String],
        variable_table: &str
    ) -> BenchResult<Vec<Formula>> {
        let requirements = descriptions
            .iter()
            .map(|d| format!("- {}", d))
            .collect::<Vec<_>>()
            .join("\n");
        let params = HashMap::from([
            ("variable_table", variable_table),
            ("requirements", requirements.as_str()),
        ]);
        let prompt = self.render_template("translate_batch", &params)?;

        let content = self.complete(&prompt).await?;
        Ok(completion_lines(&content).into_iter().map(Formula::from).collect())
    }

    async fn describe(&self, formula: &Formula) -> BenchResult<String> {
        let params = HashMap::from([("formula", formula.as_str())]);
        let prompt = self.render_template("describe", &params)?;
        Ok(self.complete(&prompt).await?)
    }

    async fn regenerate(&self, description: &str, variable_table: &str) -> BenchResult<Formula> {
        let params = HashMap::from([
            ("variable_table", variable_table),
            ("description", description),
        ]);
        let prompt = self.render_template("regenerate", &params)?;
        Ok(self.single_formula(&prompt).await?)
    }

    async fn synthesize(&self, variable_table: &str) -> BenchResult<Formula> {
        let params = HashMap::from([("variable_table", variable_table)]);
        let prompt = self.render_template("synthesize", &params)?;
        Ok(self.single_formula(&prompt).await?)
    }
}
