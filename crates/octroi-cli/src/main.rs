use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod inspect;
mod score;

#[derive(Parser)]
#[command(name = "octroi", version, about = "Credit-default scoring and explanation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score one client record and print the boundary response.
    Score {
        /// Path to the model bundle.
        #[arg(long, env = "OCTROI_MODEL", default_value = "models/credit_scoring_model.json")]
        model: PathBuf,
        /// Client record JSON file; reads stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print bundle metadata and the serving-schema compatibility report.
    Inspect {
        /// Path to the model bundle.
        #[arg(long, env = "OCTROI_MODEL", default_value = "models/credit_scoring_model.json")]
        model: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("octroi v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Score { model, input } => score::run(&model, input.as_deref()),
        Command::Inspect { model } => inspect::run(&model),
    }
}
