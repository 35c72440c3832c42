//! Server configuration

use crate::cli::ClassifierArgs;
use anyhow::Context;
use hamcaller_classifiers::{ClassifierConfig, RuntimeSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "hamcaller.yaml";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Expose Prometheus metrics at `/metrics`
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl ServerConfig {
    /// Load configuration from file, or defaults when there is none.
    ///
    /// An explicitly named file must exist; the implicit `hamcaller.yaml` is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                anyhow::bail!("configuration file not found: {}", path.display());
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Apply listen address overrides
    pub fn with_listen(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Apply classifier overrides from the command line
    pub fn with_classifier_args(mut self, args: &ClassifierArgs) -> Self {
        apply_classifier_args(&mut self.classifier, args);
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            metrics_enabled: true,
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Overlay command-line flags on a classifier configuration
pub fn apply_classifier_args(config: &mut ClassifierConfig, args: &ClassifierArgs) {
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(program) = &args.runtime {
        config.runtime = RuntimeSpec::Command {
            program: program.clone(),
        };
    }
    if let Some(base_url) = &args.ollama_url {
        // Keep a configured temperature when only the URL changes
        let temperature = match &config.runtime {
            RuntimeSpec::Http { temperature, .. } => *temperature,
            RuntimeSpec::Command { .. } => None,
        };
        config.runtime = RuntimeSpec::Http {
            base_url: base_url.clone(),
            temperature,
        };
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(prompt) = args.prompt {
        config.prompt = prompt;
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_true() -> bool {
    true
}
