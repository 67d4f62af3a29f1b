use clap::Parser;
use rag_gate::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Index => cli::index::run().await,
        Command::Ask { question } => cli::ask::run(&question).await,
    }
}
