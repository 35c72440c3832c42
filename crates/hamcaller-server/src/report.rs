//! Terminal and JSON rendering of verdicts for `hamcaller classify`

use chrono::{DateTime, Utc};
use hamcaller_core::ClassificationResult;
use serde::Serialize;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;
const PREVIEW_CHARS: usize = 150;
const REASONING_LINES: usize = 5;

/// A verdict with the context it was produced in
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub transcript_preview: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub result: &'a ClassificationResult,
}

impl<'a> Report<'a> {
    pub fn new(transcript: &str, result: &'a ClassificationResult) -> Self {
        Self {
            transcript_preview: preview(transcript),
            timestamp: Utc::now(),
            result,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Multi-line human-readable report
    pub fn render(&self) -> String {
        let result = self.result;
        let rule = "=".repeat(70);
        let mut out = String::new();

        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "SPAM CALL DETECTION RESULT");
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "\nTranscript: {}", self.transcript_preview);
        let _ = writeln!(out, "\nClassification: {}", result.label);
        let _ = writeln!(out, "Confidence: {:.0}%", result.confidence);
        let _ = writeln!(out, "   [{}]", confidence_bar(result.confidence));
        if result.low_confidence {
            let _ = writeln!(out, "   (no clear answer from the model)");
        }

        if !result.key_indicators.is_empty() {
            let _ = writeln!(out, "\nKey indicators:");
            for indicator in &result.key_indicators {
                let _ = writeln!(out, "   - {}", indicator);
            }
        }

        if !result.reasoning.trim().is_empty() {
            let _ = writeln!(out, "\nReasoning:");
            for line in result
                .reasoning
                .lines()
                .filter(|l| !l.trim().is_empty())
                .take(REASONING_LINES)
            {
                let _ = writeln!(out, "   {}", line.trim());
            }
        }

        if result.is_spam {
            let _ = writeln!(out, "\nWARNING: this looks like a SPAM call.");
            let _ = writeln!(out, "   Block the number or hang up.");
        } else {
            let _ = writeln!(out, "\nThis looks like a LEGITIMATE call.");
        }
        let _ = writeln!(out, "\n(model {}, {} ms)", result.model, result.latency_ms);
        let _ = write!(out, "{}", rule);

        out
    }
}

/// Whitespace-collapsed transcript, cut to a preview length
fn preview(transcript: &str) -> String {
    let collapsed = transcript.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &collapsed[..idx]),
        None => collapsed,
    }
}

fn confidence_bar(confidence: f32) -> String {
    let filled = ((confidence.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f32) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
