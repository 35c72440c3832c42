//! Classifier backed by a language model in an external runtime

use crate::classifier::Classifier;
use crate::parser::OutputParser;
use crate::prompt::PromptStyle;
use crate::runtime::ModelRuntime;
use async_trait::async_trait;
use hamcaller_core::types::CONFIDENCE_TOO_SHORT;
use hamcaller_core::{ClassificationResult, Error, Label, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_MODEL: &str = "hamcaller";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MIN_TRANSCRIPT_CHARS: usize = 5;

/// Sends each transcript to the model runtime exactly once.
///
/// Every call is bounded by the configured timeout; when it fires the runtime
/// future is dropped and [`Error::RuntimeTimeout`] is returned. Failures are
/// never retried.
pub struct LlmClassifier {
    runtime: Arc<dyn ModelRuntime>,
    model: String,
    prompt: PromptStyle,
    parser: OutputParser,
    timeout: Duration,
    min_transcript_chars: usize,
}

impl LlmClassifier {
    pub fn new(runtime: Arc<dyn ModelRuntime>, parser: OutputParser) -> Self {
        Self {
            runtime,
            model: DEFAULT_MODEL.to_string(),
            prompt: PromptStyle::default(),
            parser,
            timeout: DEFAULT_TIMEOUT,
            min_transcript_chars: DEFAULT_MIN_TRANSCRIPT_CHARS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_prompt(mut self, prompt: PromptStyle) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Transcripts shorter than this (after trimming) skip the model
    pub fn with_min_transcript_chars(mut self, chars: usize) -> Self {
        self.min_transcript_chars = chars;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn runtime_name(&self) -> &str {
        self.runtime.name()
    }

    fn too_short(&self, transcript: &str) -> Option<ClassificationResult> {
        if transcript.trim().chars().count() >= self.min_transcript_chars {
            return None;
        }
        Some(
            ClassificationResult::new(Label::Legitimate, CONFIDENCE_TOO_SHORT, "")
                .with_low_confidence(true)
                .with_reasoning("Too short to analyze")
                .with_model(&self.model),
        )
    }
}

#[async_trait]
impl Classifier for LlmClassifier {
    async fn classify(&self, transcript: &str) -> Result<ClassificationResult> {
        if let Some(result) = self.too_short(transcript) {
            debug!("Transcript too short, skipping model");
            return Ok(result);
        }

        let prompt = self.prompt.render(transcript);
        let start = Instant::now();

        let raw = match tokio::time::timeout(
            self.timeout,
            self.runtime.generate(&self.model, &prompt),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    model = %self.model,
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Model runtime timed out"
                );
                return Err(Error::RuntimeTimeout(self.timeout));
            }
        };

        let latency_ms = start.elapsed().as_millis() as u64;
        let result = self
            .parser
            .parse(&raw)
            .with_model(&self.model)
            .with_latency_ms(latency_ms);

        info!(
            label = %result.label,
            confidence = result.confidence,
            low_confidence = result.low_confidence,
            latency_ms,
            "Transcript classified"
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        &self.model
    }

    async fn probe(&self) -> Result<()> {
        self.runtime.probe().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Echoes a fixed answer and records the prompts it was given
    struct FixedRuntime {
        answer: String,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedRuntime {
        fn new(answer: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: answer.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ModelRuntime for FixedRuntime {
        async fn generate(&self, _model: &str, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.answer.clone())
        }

        async fn probe(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn classifier(runtime: Arc<FixedRuntime>) -> LlmClassifier {
        LlmClassifier::new(runtime, OutputParser::with_defaults().unwrap())
    }

    #[tokio::test]
    async fn test_short_transcript_skips_runtime() {
        let runtime = FixedRuntime::new("SPAM");
        let classifier = classifier(runtime.clone());

        let result = classifier.classify("  hi ").await.unwrap();
        assert_eq!(result.label, Label::Legitimate);
        assert_eq!(result.confidence, CONFIDENCE_TOO_SHORT);
        assert!(result.low_confidence);
        assert!(runtime.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prompt_style_is_applied() {
        let runtime = FixedRuntime::new("LEGITIMATE");
        let classifier = classifier(runtime.clone()).with_prompt(PromptStyle::Raw);

        classifier.classify("Hi mom, checking in").await.unwrap();
        assert_eq!(
            runtime.prompts.lock().unwrap().as_slice(),
            ["Hi mom, checking in".to_string()]
        );
    }

    #[tokio::test]
    async fn test_result_carries_model_name() {
        let classifier = classifier(FixedRuntime::new("SPAM")).with_model("gemma3:1b");

        let result = classifier
            .classify("Your warranty is expiring. Press 1.")
            .await
            .unwrap();
        assert!(result.is_spam);
        assert_eq!(result.model, "gemma3:1b");
        assert_eq!(classifier.name(), "gemma3:1b");
    }
}
