//! `hamcaller classify`: run the classifier without the web server

use crate::report::Report;
use crate::samples::SAMPLES;
use anyhow::Context;
use hamcaller_classifiers::Classifier;
use hamcaller_core::ClassificationResult;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

/// Where transcripts come from
#[derive(Debug)]
pub enum Input {
    Text(String),
    File(PathBuf),
    Interactive,
    Samples,
}

impl Input {
    pub fn from_args(transcript: Option<String>, file: Option<PathBuf>, interactive: bool) -> Self {
        match (transcript, file) {
            (Some(text), _) => Self::Text(text),
            (None, Some(path)) => Self::File(path),
            (None, None) if interactive => Self::Interactive,
            (None, None) => Self::Samples,
        }
    }
}

/// Classify the given input and print reports to stdout
pub async fn run(classifier: &dyn Classifier, input: Input, json: bool) -> anyhow::Result<()> {
    match input {
        Input::Text(text) => {
            let result = classifier.classify(&text).await?;
            print_report(&text, &result, json)?;
        }
        Input::File(path) => {
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read transcript file {}", path.display()))?;
            let result = classifier.classify(&text).await?;
            print_report(&text, &result, json)?;
        }
        Input::Interactive => run_interactive(classifier, json).await?,
        Input::Samples => {
            run_samples(classifier, json).await?;
        }
    }
    Ok(())
}

fn print_report(transcript: &str, result: &ClassificationResult, json: bool) -> anyhow::Result<()> {
    let report = Report::new(transcript, result);
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}

/// One transcript per stdin line until EOF or `quit`
async fn run_interactive(classifier: &dyn Classifier, json: bool) -> anyhow::Result<()> {
    if !json {
        println!("Enter a call transcript per line ('quit' to exit)");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let transcript = line.trim();
        if transcript.is_empty() {
            continue;
        }
        if transcript.eq_ignore_ascii_case("quit") || transcript.eq_ignore_ascii_case("exit") {
            break;
        }

        // A failed transcript should not end the session
        match classifier.classify(transcript).await {
            Ok(result) => print_report(transcript, &result, json)?,
            Err(err) => {
                warn!(kind = err.kind(), "Classification failed");
                eprintln!("Error: {}", err);
            }
        }
    }
    Ok(())
}

/// Outcome of a run over the built-in samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSummary {
    pub total: usize,
    pub matched: usize,
    pub failed: usize,
}

/// Classify every built-in sample; a failed sample is counted, not fatal
pub async fn run_samples(classifier: &dyn Classifier, json: bool) -> anyhow::Result<SampleSummary> {
    let total = SAMPLES.len();
    let mut matched = 0;
    let mut failed = 0;

    for (i, sample) in SAMPLES.iter().enumerate() {
        if !json {
            println!("\n[{}/{}] {} (expected {})", i + 1, total, sample.title, sample.expected);
        }

        match classifier.classify(sample.transcript).await {
            Ok(result) => {
                if result.label == sample.expected {
                    matched += 1;
                }
                print_report(sample.transcript, &result, json)?;
            }
            Err(err) => {
                failed += 1;
                eprintln!("Error processing sample {}: {}", i + 1, err);
            }
        }
    }

    if !json {
        println!(
            "\n{}/{} samples matched their expected label ({} failed)",
            matched, total, failed
        );
        println!("Use --transcript, --file or --interactive to analyze your own calls.");
    }
    Ok(SampleSummary {
        total,
        matched,
        failed,
    })
}
