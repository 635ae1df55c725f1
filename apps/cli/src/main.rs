use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_client_config, ConfigOverrides, DatasetInfoController, Deployment, InfoPanel,
    LoadStatus, OceanHttpClient, QueryController, QueryStatus,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Ask questions about the ocean dataset from the terminal")]
struct Args {
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[arg(long, global = true)]
    deployment: Option<Deployment>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send one question to the backend and print the answer.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Print the dataset metadata panels.
    Info,
    /// List the built-in sample questions.
    Samples,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    if let Command::Samples = args.command {
        for (index, sample) in QueryController::sample_queries().iter().enumerate() {
            println!("{}. {sample}", index + 1);
        }
        return Ok(());
    }

    let config = load_client_config(
        args.config.as_deref(),
        &ConfigOverrides {
            base_url: args.base_url,
            deployment: args.deployment,
        },
    )
    .context("failed to resolve backend configuration")?;
    let api = OceanHttpClient::new(config.clone());

    match args.command {
        Command::Ask { question } => {
            let mut query = QueryController::new(&config);
            query.set_question(question.join(" "));
            match query.submit_with(&api).await {
                QueryStatus::Answered => println!("{}", query.answer_text()),
                QueryStatus::Errored => bail!("{}", query.error_message()),
                QueryStatus::Idle | QueryStatus::Loading => bail!("question is empty"),
            }
        }
        Command::Info => {
            let mut dataset = DatasetInfoController::new(&config);
            match dataset.load_with(&api).await {
                LoadStatus::Loaded => {
                    for panel in dataset.panels().into_iter().flatten() {
                        print_panel(&panel);
                    }
                }
                LoadStatus::Errored | LoadStatus::Loading => bail!("{}", dataset.error_message()),
            }
        }
        Command::Samples => {}
    }

    Ok(())
}

fn print_panel(panel: &InfoPanel) {
    println!("{}", panel.title());
    for line in panel.lines() {
        println!("  {line}");
    }
    println!();
}
