use clap::{Args, Parser, Subcommand};
use hamcaller_classifiers::PromptStyle;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hamcaller")]
#[command(author, version, about = "Spam call detection backed by a local language model")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server and page
    Serve {
        /// Listen address
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Listen port (7860 in containers)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Configuration file (defaults to ./hamcaller.yaml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        classifier: ClassifierArgs,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Classify transcripts from the command line
    Classify {
        /// Transcript text to analyze
        #[arg(short, long, conflicts_with_all = ["file", "interactive"])]
        transcript: Option<String>,

        /// File containing a transcript
        #[arg(short, long, conflicts_with = "interactive")]
        file: Option<PathBuf>,

        /// Read one transcript per line from stdin
        #[arg(short, long)]
        interactive: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Configuration file (defaults to ./hamcaller.yaml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        classifier: ClassifierArgs,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Classifier overrides shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct ClassifierArgs {
    /// Model name as known to the runtime
    #[arg(short, long)]
    pub model: Option<String>,

    /// Runtime executable to spawn (`<program> run <model> <prompt>`)
    #[arg(long, conflicts_with = "ollama_url")]
    pub runtime: Option<String>,

    /// Use the Ollama HTTP API at this URL instead of the CLI
    #[arg(long)]
    pub ollama_url: Option<String>,

    /// Seconds to wait for the model before giving up
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Prompt template: raw, few_shot or structured
    #[arg(long, value_parser = parse_prompt)]
    pub prompt: Option<PromptStyle>,
}

fn parse_prompt(s: &str) -> Result<PromptStyle, String> {
    s.parse()
}
