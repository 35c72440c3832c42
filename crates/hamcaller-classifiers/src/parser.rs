//! Turns generated text into a verdict
//!
//! The label is always decided by a case-insensitive substring search for the
//! spam keywords ("SPAM" plus any configured extras). A JSON object in the
//! output (structured prompt) may add confidence, reasoning and indicators,
//! but only when its own `classification` agrees with that label.
//!
//! Output with no keyword at all is answered LEGITIMATE and flagged as low
//! confidence rather than rejected.

use aho_corasick::AhoCorasick;
use hamcaller_core::types::{CONFIDENCE_AMBIGUOUS, CONFIDENCE_CLEAR};
use hamcaller_core::{ClassificationResult, Error, Label, Result};
use regex::Regex;
use serde_json::Value;
use tracing::debug;

/// Keyword verdicts quote at most this many characters of the output
const REASONING_PREVIEW_CHARS: usize = 100;

/// Default keywords that mark a call as spam
pub fn default_spam_keywords() -> Vec<String> {
    vec![Label::Spam.as_str().to_string()]
}

/// Parser from raw model output to [`ClassificationResult`]
pub struct OutputParser {
    spam_keywords: AhoCorasick,
    legitimate: AhoCorasick,
    json_object: Regex,
}

/// Fields read from a JSON answer
#[derive(Debug, Default)]
struct StructuredAnswer {
    label: Option<Label>,
    confidence: Option<f32>,
    reasoning: Option<String>,
    key_indicators: Vec<String>,
}

impl OutputParser {
    /// Create a parser matching "SPAM" and the given extra keywords
    pub fn new<S: AsRef<str>>(extra_keywords: &[S]) -> Result<Self> {
        let mut keywords = vec![Label::Spam.as_str()];
        for keyword in extra_keywords.iter().map(|k| k.as_ref().trim()) {
            if !keyword.is_empty() && !keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
                keywords.push(keyword);
            }
        }

        let spam_keywords = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keywords)
            .map_err(|e| Error::config(format!("Failed to build keyword matcher: {}", e)))?;

        let legitimate = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build([Label::Legitimate.as_str()])
            .map_err(|e| Error::config(format!("Failed to build keyword matcher: {}", e)))?;

        let json_object = Regex::new(r"(?s)\{.*\}")
            .map_err(|e| Error::config(format!("Invalid JSON extraction pattern: {}", e)))?;

        Ok(Self {
            spam_keywords,
            legitimate,
            json_object,
        })
    }

    /// Parser matching only the "SPAM" keyword
    pub fn with_defaults() -> Result<Self> {
        Self::new(&default_spam_keywords())
    }

    /// Derive a verdict from model output.
    ///
    /// `raw_output` of the result is `raw` untouched.
    pub fn parse(&self, raw: &str) -> ClassificationResult {
        let verdict = self.parse_keywords(raw);

        let Some(answer) = self.parse_structured(raw) else {
            return verdict;
        };

        match answer.label {
            Some(label) if label != verdict.label => {
                debug!(
                    structured = %label,
                    keyword = %verdict.label,
                    "Structured answer disagrees with keyword verdict"
                );
                ClassificationResult::new(verdict.label, CONFIDENCE_AMBIGUOUS, raw)
                    .with_low_confidence(true)
                    .with_reasoning(answer.reasoning.unwrap_or(verdict.reasoning))
                    .with_key_indicators(answer.key_indicators)
            }
            _ => {
                debug!(label = %verdict.label, "Parsed structured model answer");
                let confidence = match answer.confidence {
                    Some(confidence) if !verdict.low_confidence => confidence,
                    _ => verdict.confidence,
                };
                ClassificationResult::new(verdict.label, confidence, raw)
                    .with_low_confidence(verdict.low_confidence)
                    .with_reasoning(answer.reasoning.unwrap_or(verdict.reasoning))
                    .with_key_indicators(answer.key_indicators)
            }
        }
    }

    fn parse_structured(&self, raw: &str) -> Option<StructuredAnswer> {
        let candidate = self.json_object.find(raw)?.as_str();
        let value: Value = serde_json::from_str(candidate).ok()?;
        let object = value.as_object()?;

        let key_indicators = object
            .get("key_indicators")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(StructuredAnswer {
            label: object
                .get("classification")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok()),
            confidence: object.get("confidence").and_then(number_like),
            reasoning: object
                .get("reasoning")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            key_indicators,
        })
    }

    fn parse_keywords(&self, raw: &str) -> ClassificationResult {
        let normalized = raw.trim().to_uppercase();

        let has_spam = self.spam_keywords.is_match(&normalized);
        let has_legitimate = self.legitimate.is_match(&normalized);

        let (label, confidence, low_confidence) = match (has_spam, has_legitimate) {
            (true, false) => (Label::Spam, CONFIDENCE_CLEAR, false),
            // Both words present: spam wins, but the model hedged
            (true, true) => (Label::Spam, CONFIDENCE_AMBIGUOUS, true),
            (false, true) => (Label::Legitimate, CONFIDENCE_CLEAR, false),
            (false, false) => (Label::Legitimate, CONFIDENCE_AMBIGUOUS, true),
        };

        let reasoning = if normalized.is_empty() {
            "Model output was empty".to_string()
        } else {
            normalized.chars().take(REASONING_PREVIEW_CHARS).collect()
        };

        if low_confidence {
            debug!(%label, "Model output had no clear verdict");
        }

        ClassificationResult::new(label, confidence, raw)
            .with_low_confidence(low_confidence)
            .with_reasoning(reasoning)
    }
}

/// Accept `87`, `87.5` and `"87"` alike; NaN and infinities are dropped
fn number_like(value: &Value) -> Option<f32> {
    let number = match value {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s.trim().trim_end_matches('%').parse().ok(),
        _ => None,
    };
    number.filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> OutputParser {
        OutputParser::with_defaults().unwrap()
    }

    #[test]
    fn test_spam_keyword_is_case_insensitive() {
        for output in ["SPAM", "spam", "This call is Spam.", "  sPaM\n"] {
            let result = parser().parse(output);
            assert_eq!(result.label, Label::Spam, "output {:?}", output);
            assert!(result.is_spam);
            assert!(!result.low_confidence);
            assert_eq!(result.confidence, CONFIDENCE_CLEAR);
        }
    }

    #[test]
    fn test_legitimate_without_spam() {
        let result = parser().parse("LEGITIMATE");
        assert_eq!(result.label, Label::Legitimate);
        assert!(!result.is_spam);
        assert!(!result.low_confidence);
    }

    #[test]
    fn test_raw_output_is_preserved() {
        let result = parser().parse("  Spam\n");
        assert_eq!(result.raw_output, "  Spam\n");
        assert_eq!(result.reasoning, "SPAM");
    }

    #[test]
    fn test_ambiguous_output_defaults_to_legitimate() {
        let result = parser().parse("I am not sure about this one.");
        assert_eq!(result.label, Label::Legitimate);
        assert!(result.low_confidence);
        assert_eq!(result.confidence, CONFIDENCE_AMBIGUOUS);
    }

    #[test]
    fn test_empty_output_defaults_to_legitimate() {
        let result = parser().parse("   ");
        assert_eq!(result.label, Label::Legitimate);
        assert!(result.low_confidence);
        assert_eq!(result.reasoning, "Model output was empty");
    }

    #[test]
    fn test_both_words_flags_low_confidence() {
        let result = parser().parse("Could be SPAM or LEGITIMATE");
        assert_eq!(result.label, Label::Spam);
        assert!(result.low_confidence);
    }

    #[test]
    fn test_reasoning_is_truncated() {
        let long = "spam ".repeat(100);
        let result = parser().parse(&long);
        assert_eq!(result.reasoning.chars().count(), REASONING_PREVIEW_CHARS);
    }

    #[test]
    fn test_structured_answer() {
        let output = r#"Sure, here you go:
{
    "classification": "SPAM",
    "confidence": "92",
    "reasoning": "Unsolicited warranty offer with pressure to act.",
    "key_indicators": ["extended warranty", "press 1"]
}"#;
        let result = parser().parse(output);
        assert_eq!(result.label, Label::Spam);
        assert_eq!(result.confidence, 92.0);
        assert!(!result.low_confidence);
        assert_eq!(result.key_indicators, vec!["extended warranty", "press 1"]);
        assert!(result.reasoning.starts_with("Unsolicited"));
    }

    #[test]
    fn test_spam_in_structured_reasoning_wins() {
        let output = r#"{"classification": "LEGITIMATE", "confidence": 80, "reasoning": "Sounds like SPAM to me."}"#;
        let result = parser().parse(output);
        assert_eq!(result.label, Label::Spam);
        assert!(result.is_spam);
        assert!(result.low_confidence);
        assert_eq!(result.confidence, CONFIDENCE_AMBIGUOUS);
    }

    #[test]
    fn test_structured_label_without_spam_word_is_legitimate() {
        let output = r#"{"classification": "MARKETING", "confidence": 95, "key_indicators": ["limited time offer"]}"#;
        let result = parser().parse(output);
        assert_eq!(result.label, Label::Legitimate);
        assert!(!result.is_spam);
        assert!(result.low_confidence);
        assert_eq!(result.confidence, CONFIDENCE_AMBIGUOUS);
        assert_eq!(result.key_indicators, vec!["limited time offer"]);
    }

    #[test]
    fn test_unknown_structured_label_keeps_keyword_verdict() {
        let output = r#"{"classification": "UNSURE", "reasoning": "sounds like spam"}"#;
        let result = parser().parse(output);
        assert_eq!(result.label, Label::Spam);
        assert_eq!(result.reasoning, "sounds like spam");
        assert!(result.key_indicators.is_empty());
    }

    #[test]
    fn test_non_finite_confidence_is_ignored() {
        for confidence in [r#""NaN""#, r#""inf""#, r#""-infinity""#] {
            let output = format!(r#"{{"classification": "SPAM", "confidence": {}}}"#, confidence);
            let result = parser().parse(&output);
            assert!(result.confidence.is_finite(), "confidence {}", confidence);
            assert_eq!(result.confidence, CONFIDENCE_CLEAR);

            let json = serde_json::to_value(&result).unwrap();
            assert_eq!(json["confidence"], 85.0);
        }
    }

    #[test]
    fn test_number_like() {
        assert_eq!(number_like(&serde_json::json!(87)), Some(87.0));
        assert_eq!(number_like(&serde_json::json!("87.5%")), Some(87.5));
        assert_eq!(number_like(&serde_json::json!("NaN")), None);
        assert_eq!(number_like(&serde_json::json!(true)), None);
    }

    #[test]
    fn test_custom_keywords_extend_default() {
        let parser = OutputParser::new(&["scam", "telemarketer"]).unwrap();
        assert!(parser.parse("Classic telemarketer pitch").is_spam);
        assert!(parser.parse("SPAM").is_spam);
        assert!(parser.parse("spam").is_spam);
        assert!(!parser.parse("LEGITIMATE").is_spam);
    }

    #[test]
    fn test_empty_keyword_list_still_matches_spam() {
        let empty: [&str; 0] = [];
        assert!(OutputParser::new(&empty).unwrap().parse("Spam.").is_spam);
        assert!(OutputParser::new(&["  "]).unwrap().parse("SPAM").is_spam);
    }
}
