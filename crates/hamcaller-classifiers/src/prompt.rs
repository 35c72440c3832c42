//! Prompt templates handed to the model runtime

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a transcript is wrapped before it reaches the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStyle {
    /// Transcript only; the Modelfile carries the instructions
    Raw,
    /// One-word SPAM/LEGITIMATE answer with a handful of examples
    #[default]
    FewShot,
    /// JSON answer with confidence, reasoning and indicators
    Structured,
}

impl PromptStyle {
    /// Render the prompt for a transcript
    pub fn render(&self, transcript: &str) -> String {
        match self {
            Self::Raw => transcript.to_string(),
            Self::FewShot => few_shot(transcript),
            Self::Structured => structured(transcript),
        }
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Raw => "raw",
            Self::FewShot => "few_shot",
            Self::Structured => "structured",
        };
        f.write_str(name)
    }
}

impl FromStr for PromptStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "raw" => Ok(Self::Raw),
            "few_shot" => Ok(Self::FewShot),
            "structured" => Ok(Self::Structured),
            other => Err(format!(
                "Unknown prompt style: {}. Use 'raw', 'few_shot' or 'structured'",
                other
            )),
        }
    }
}

fn few_shot(transcript: &str) -> String {
    format!(
        r#"Classify this phone call as SPAM or LEGITIMATE.

SPAM = Unsolicited sales, scams, robocalls, threats, fake prizes, requests for money
LEGITIMATE = Personal calls, appointments, deliveries, known businesses, family/friends

Examples of SPAM:
- "Your warranty is expiring, press 1"
- "IRS calling about arrest warrant"
- "You won a prize, pay processing fee"

Examples of LEGITIMATE:
- "Hi mom, checking in"
- "Dr. Smith confirming appointment at 2 PM"
- "Delivery driver, can't find your apartment"

Call transcript: {transcript}

Answer with only one word - SPAM or LEGITIMATE:"#
    )
}

fn structured(transcript: &str) -> String {
    format!(
        r#"You analyze phone call transcripts and decide whether a call is SPAM (marketing, scam, robocall) or LEGITIMATE.

Signs of SPAM:
- Unsolicited sales pitches or offers nobody asked for
- Extended warranties, timeshares, vacation packages
- Debt relief or loan offers
- Prize or sweepstakes notifications
- Automated robocall messages
- Pressure to act immediately
- Early requests for personal or financial details

Signs of a LEGITIMATE call:
- Known contacts or organizations
- Appointment reminders
- Delivery notifications
- Customer service callbacks
- Security alerts that ask you to call back on an official number
- Personal or emergency calls

CALL TRANSCRIPT:
{transcript}

Respond ONLY with JSON in exactly this shape:
{{
    "classification": "SPAM" or "LEGITIMATE",
    "confidence": <0-100>,
    "reasoning": "<one or two sentences>",
    "key_indicators": ["<indicator>", ...]
}}"#
    )
}
