//! CLI module for rag-gate
//!
//! - `serve`: build the index, then serve HTTP
//! - `index`: build the index once and print the report
//! - `ask`: answer one question from the command line

pub mod ask;
pub mod index;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::{AppConfig, LoggingConfig};
use crate::infrastructure::logging;

/// rag-gate - answers questions from a bounded corpus, or declines
#[derive(Parser)]
#[command(name = "rag-gate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the index and run the HTTP server
    Serve,

    /// Build the index once and print the build report as JSON
    Index,

    /// Run one question through the pipeline and print the reply
    Ask {
        /// The question to answer
        question: String,
    },
}

/// Load `.env`, the layered configuration, and reject invalid settings
fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    config.validate()?;

    Ok(config)
}

/// One-shot commands print results on stdout, so keep logs quiet by default
fn init_quiet_logging(config: &AppConfig) -> anyhow::Result<()> {
    logging::init_logging(&LoggingConfig {
        level: "warn".to_string(),
        format: config.logging.format.clone(),
    })
}
