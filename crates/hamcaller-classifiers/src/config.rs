//! Configuration for the classifier and its model runtime

use crate::llm::{LlmClassifier, DEFAULT_MIN_TRANSCRIPT_CHARS, DEFAULT_MODEL};
use crate::parser::{default_spam_keywords, OutputParser};
use crate::prompt::PromptStyle;
use crate::runtime::{CommandRuntime, ModelRuntime, OllamaHttpRuntime, DEFAULT_OLLAMA_URL};
use hamcaller_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Model name as known to the runtime
    #[serde(default = "default_model")]
    pub model: String,

    /// How the runtime is reached
    #[serde(default)]
    pub runtime: RuntimeSpec,

    /// Upper bound on a single runtime call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub prompt: PromptStyle,

    /// Extra case-insensitive keywords that mark the output as spam.
    /// "SPAM" always matches, whatever is listed here.
    #[serde(default = "default_spam_keywords")]
    pub spam_keywords: Vec<String>,

    #[serde(default = "default_min_transcript_chars")]
    pub min_transcript_chars: usize,
}

/// Which model runtime backend to use
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RuntimeSpec {
    /// `<program> run <model> <prompt>`
    Command {
        #[serde(default = "default_program")]
        program: String,
    },

    /// Ollama HTTP API
    Http {
        #[serde(default = "default_base_url")]
        base_url: String,

        #[serde(default)]
        temperature: Option<f32>,
    },
}

impl Default for RuntimeSpec {
    fn default() -> Self {
        Self::Command {
            program: default_program(),
        }
    }
}

impl RuntimeSpec {
    /// Instantiate the runtime
    pub fn build(&self) -> Arc<dyn ModelRuntime> {
        match self {
            Self::Command { program } => Arc::new(CommandRuntime::new(program)),
            Self::Http {
                base_url,
                temperature,
            } => {
                let runtime = OllamaHttpRuntime::new(base_url);
                match temperature {
                    Some(t) => Arc::new(runtime.with_temperature(*t)),
                    None => Arc::new(runtime),
                }
            }
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            runtime: RuntimeSpec::default(),
            timeout_secs: default_timeout_secs(),
            prompt: PromptStyle::default(),
            spam_keywords: default_spam_keywords(),
            min_transcript_chars: default_min_transcript_chars(),
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse classifier config: {}", e)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::config("model name must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Build the classifier described by this configuration
    pub fn build(&self) -> Result<LlmClassifier> {
        self.validate()?;

        let parser = OutputParser::new(&self.spam_keywords)?;
        let runtime = self.runtime.build();

        info!(
            model = %self.model,
            runtime = runtime.name(),
            prompt = %self.prompt,
            timeout_secs = self.timeout_secs,
            "Classifier configured"
        );

        Ok(LlmClassifier::new(runtime, parser)
            .with_model(&self.model)
            .with_prompt(self.prompt)
            .with_timeout(self.timeout())
            .with_min_transcript_chars(self.min_transcript_chars))
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_program() -> String {
    "ollama".to_string()
}

fn default_base_url() -> String {
    DEFAULT_OLLAMA_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_min_transcript_chars() -> usize {
    DEFAULT_MIN_TRANSCRIPT_CHARS
}
