// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mage: run prompt-driven agents against a generation service

mod app;
mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "mage", version, styles = color::styles())]
#[command(about = "Agent prompt workbench for the Infinite Affiliate Machine")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    /// Load agent definitions from a TOML file instead of the built-in set
    #[arg(long, value_name = "FILE", global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List agents and their status
    Agents,
    /// Show one agent's definition and state
    Show {
        /// Agent id (e.g. mage_crafter)
        agent: String,
    },
    /// Run agents in order and print their output
    Run(commands::run::RunArgs),
    /// Interactive session reading commands from stdin
    Shell(commands::shell::ShellArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let registry = app::load_registry(cli.registry.as_deref())?;
    match cli.command {
        Commands::Agents => commands::agents::list(registry, cli.output),
        Commands::Show { agent } => commands::agents::show(registry, &agent, cli.output),
        Commands::Run(args) => commands::run::handle(args, registry, cli.output).await,
        Commands::Shell(args) => commands::shell::handle(args, registry).await,
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli).await {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("error: {}", exit.message);
                }
                exit.code
            }
            None => {
                eprintln!("error: {:#}", e);
                1
            }
        };
        std::process::exit(code);
    }
}
