//! Classifier trait

use async_trait::async_trait;
use hamcaller_core::{ClassificationResult, Result};

/// Trait for all transcript classifiers
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given transcript
    async fn classify(&self, transcript: &str) -> Result<ClassificationResult>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Check that whatever backs the classifier is reachable.
    ///
    /// Classifiers without an external dependency are always ready.
    async fn probe(&self) -> Result<()> {
        Ok(())
    }
}
