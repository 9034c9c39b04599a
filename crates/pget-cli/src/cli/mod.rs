//! CLI for the pget parallel batch downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pget_core::config;
use std::path::PathBuf;

use commands::{run_batch, run_request};

/// Top-level CLI for the pget parallel batch downloader.
#[derive(Debug, Parser)]
#[command(name = "pget")]
#[command(about = "pget: parallel batch HTTP downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every `<url>\t<destination>` manifest line in parallel.
    Batch {
        /// Parallel download workers (default 4, max 64; larger values are clamped).
        #[arg(short, long, value_name = "N")]
        threads: Option<usize>,

        /// Manifest file to read; stdin when omitted.
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Perform one JSON-described HTTP request and print the response body.
    Request {
        /// Path to a JSON request file.
        #[arg(short, long, value_name = "FILE", conflicts_with = "json")]
        file: Option<PathBuf>,

        /// Inline JSON request string.
        #[arg(short = 's', long = "json", value_name = "JSON")]
        json: Option<String>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Batch { threads, input } => {
                run_batch(&cfg, threads, input.as_deref())?;
            }
            CliCommand::Request { file, json } => {
                run_request(file.as_deref(), json.as_deref())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
