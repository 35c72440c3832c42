//! Core types for HamCaller

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A transcript submitted for classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Text of the phone call
    pub transcript: String,
}

impl ClassificationRequest {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}

/// Binary verdict label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Spam,
    Legitimate,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "SPAM",
            Self::Legitimate => "LEGITIMATE",
        }
    }

    pub fn is_spam(&self) -> bool {
        matches!(self, Self::Spam)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPAM" | "MARKETING" | "SCAM" => Ok(Self::Spam),
            "LEGITIMATE" | "HAM" => Ok(Self::Legitimate),
            other => Err(format!("unknown label: {}", other)),
        }
    }
}

/// Confidence reported for a clear keyword verdict
pub const CONFIDENCE_CLEAR: f32 = 85.0;

/// Confidence reported when the model output was ambiguous
pub const CONFIDENCE_AMBIGUOUS: f32 = 70.0;

/// Confidence reported when the transcript was too short to analyse
pub const CONFIDENCE_TOO_SHORT: f32 = 50.0;

/// Verdict returned for a single transcript.
///
/// `is_spam` always mirrors `label`; construct through [`ClassificationResult::new`]
/// to keep them in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub is_spam: bool,

    pub label: Label,

    /// Model output exactly as the runtime returned it
    pub raw_output: String,

    /// Confidence in percent (0-100)
    pub confidence: f32,

    /// Set when the verdict is a default rather than a clear model answer
    pub low_confidence: bool,

    pub reasoning: String,

    #[serde(default)]
    pub key_indicators: Vec<String>,

    /// Runtime invocation latency in milliseconds
    #[serde(default)]
    pub latency_ms: u64,

    #[serde(default)]
    pub model: String,
}

impl ClassificationResult {
    /// Create a new classification result
    pub fn new(label: Label, confidence: f32, raw_output: impl Into<String>) -> Self {
        Self {
            is_spam: label.is_spam(),
            label,
            raw_output: raw_output.into(),
            confidence: clamp_confidence(confidence),
            low_confidence: false,
            reasoning: String::new(),
            key_indicators: Vec::new(),
            latency_ms: 0,
            model: String::new(),
        }
    }

    pub fn with_low_confidence(mut self, low: bool) -> Self {
        self.low_confidence = low;
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn with_key_indicators(mut self, indicators: Vec<String>) -> Self {
        self.key_indicators = indicators;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

/// Keep confidence inside 0..=100; NaN becomes 0
fn clamp_confidence(confidence: f32) -> f32 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 100.0)
    }
}
