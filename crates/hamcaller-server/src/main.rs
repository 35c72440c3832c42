//! HamCaller
//!
//! Spam call detection: a small web server and CLI that forward call
//! transcripts to a locally running language model.

use clap::Parser;
use hamcaller_server::classify::{self, Input};
use hamcaller_server::cli::{Cli, Commands};
use hamcaller_server::config::{apply_classifier_args, ServerConfig};
use hamcaller_server::server::run_server;
use hamcaller_server::telemetry::init_logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            config,
            classifier,
            verbose,
        } => {
            init_logging(verbose);

            let config = ServerConfig::load(config.as_deref())?
                .with_listen(host, port)
                .with_classifier_args(&classifier);

            println!();
            println!("  HamCaller - AI Spam Call Detection");
            println!();
            println!("  Model:   {}", config.classifier.model);
            println!("  Open http://{}:{} in your browser", config.host, config.port);
            println!("  Make sure Ollama is running: ollama serve");
            println!();

            run_server(config).await?;
        }

        Commands::Classify {
            transcript,
            file,
            interactive,
            json,
            config,
            classifier,
            verbose,
        } => {
            init_logging(verbose);

            let mut classifier_config = ServerConfig::load(config.as_deref())?.classifier;
            apply_classifier_args(&mut classifier_config, &classifier);
            let llm = classifier_config.build()?;
            info!(model = llm.model(), runtime = llm.runtime_name(), "Classifier ready");

            let input = Input::from_args(transcript, file, interactive);
            classify::run(&llm, input, json).await?;
        }
    }

    Ok(())
}
