//! HamCaller Classifiers
//!
//! Spam call classification backed by a locally running language model.
//!
//! The model itself lives in an external runtime (Ollama). This crate wraps
//! the transcript in a prompt, hands it to the runtime under a bounded
//! timeout, and turns the generated text into a verdict:
//! - [`runtime`]: how the runtime is reached (CLI subprocess or local HTTP API)
//! - [`prompt`]: prompt templates
//! - [`parser`]: model output to verdict
//! - [`llm`]: the classifier tying the three together

pub mod classifier;
pub mod config;
pub mod llm;
pub mod parser;
pub mod prompt;
pub mod runtime;

pub use classifier::Classifier;
pub use config::{ClassifierConfig, RuntimeSpec};
pub use llm::LlmClassifier;
pub use parser::OutputParser;
pub use prompt::PromptStyle;
pub use runtime::{CommandRuntime, ModelRuntime, OllamaHttpRuntime};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::Classifier;
    pub use crate::llm::LlmClassifier;
    pub use crate::runtime::{CommandRuntime, ModelRuntime, OllamaHttpRuntime};
    pub use hamcaller_core::{ClassificationResult, Label};
}
