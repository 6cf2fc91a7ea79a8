//! Rostrum CLI entry point.
//!
//! This binary is the composition root for the entire system:
//!
//! 1. **Parse configuration** — environment variables, with CLI flags taking
//!    precedence (see [`config`]).
//! 2. **Wire observability** — `tracing-subscriber` with an `EnvFilter`;
//!    spans and structured events from every crate in the workspace flow
//!    through this layer.
//! 3. **Construct infrastructure** — build the Gemini client and inject it
//!    into the debate runner.
//! 4. **Select run mode** — `serve` starts the HTTP listener; `debate` runs
//!    one debate in the terminal, streaming each stage as it completes.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use listener::{AppState, ServerConfig};
use llm::GeminiClient;
use nodes::{DebateRunner, PipelineVariant};
use pipeline::ModelClient;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "rostrum", about = "Multi-role LLM debate service", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API and static frontend server.
    Serve {
        /// Listen port (overrides ROSTRUM_PORT).
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one debate in the terminal, printing each stage as it completes.
    Debate {
        /// The debate question; read from stdin when omitted.
        question: Option<String>,
        /// Skip the judge stage (advocates-only topology).
        #[arg(long)]
        no_judge: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let client: Arc<dyn ModelClient> =
        Arc::new(GeminiClient::new(config.model.as_str(), config.api_key.as_str()).context("building model client")?);

    match cli.command {
        Command::Serve { port } => serve(config, client, port).await,
        Command::Debate { question, no_judge } => debate(config, client, question, no_judge).await,
    }
}

async fn serve(config: Config, client: Arc<dyn ModelClient>, port: Option<u16>) -> anyhow::Result<()> {
    let runner = DebateRunner::new(client, config.variant.spec());
    let state = AppState::new(Arc::new(runner));

    let server_config = ServerConfig {
        port: port.unwrap_or(config.port),
        static_dir: Some(config.static_dir),
    };

    let handle = listener::start(server_config, state)
        .await
        .context("binding HTTP listener")?;
    tracing::info!(port = handle.port, variant = %config.variant, "rostrum ready");

    tokio::signal::ctrl_c().await.context("waiting for ctrl+c")?;
    tracing::info!("shutting down");
    Ok(())
}

async fn debate(
    config: Config,
    client: Arc<dyn ModelClient>,
    question: Option<String>,
    no_judge: bool,
) -> anyhow::Result<()> {
    let question = match question {
        Some(q) => q,
        None => prompt_for_question()?,
    };

    let variant = if no_judge {
        PipelineVariant::AdvocatesOnly
    } else {
        config.variant
    };
    let runner = DebateRunner::new(client, variant.spec());

    println!("{}", "=".repeat(50));
    runner
        .run_with_observer(&question, |entry| {
            println!("{} Argument: {}", entry.role(), entry.text());
            println!("{}", "-".repeat(50));
        })
        .await?;

    Ok(())
}

fn prompt_for_question() -> anyhow::Result<String> {
    print!("Enter a debate question: ");
    std::io::stdout().flush().context("flushing prompt")?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("reading question from stdin")?;
    Ok(line.trim().to_string())
}
