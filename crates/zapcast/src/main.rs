// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zapcast - operator console for bulk WhatsApp dispatch orchestration.
//!
//! This is the binary entry point for the Zapcast console.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod console;
mod dispatch;
mod pair;
mod params;
mod status;
mod templates;

use console::Console;
use dispatch::CampaignTarget;

/// Zapcast - operator console for bulk WhatsApp dispatch orchestration.
#[derive(Parser, Debug)]
#[command(name = "zapcast", version, about, long_about = None)]
struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Request a pairing code and wait for the device to link.
    Pair,
    /// Remove the device connection so a new device can be paired.
    Unpair,
    /// Show link status, active dispatch, and dispatch parameters.
    Status {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Start a dispatch for a campaign.
    Start {
        #[command(flatten)]
        target: CampaignTarget,
        /// Message template to send. Required on the first start.
        #[arg(long)]
        template: Option<String>,
    },
    /// Stop the open dispatch for a campaign.
    Stop {
        #[command(flatten)]
        target: CampaignTarget,
    },
    /// Restart a stopped or completed dispatch.
    Restart {
        #[command(flatten)]
        target: CampaignTarget,
        /// Message template; defaults to the previous order's template.
        #[arg(long)]
        template: Option<String>,
    },
    /// Show or update the account's dispatch parameters.
    Params {
        /// Maximum sends per run (set together with --delay-seconds).
        #[arg(long)]
        max_per_run: Option<u32>,
        /// Seconds between sends (set together with --max-per-run).
        #[arg(long)]
        delay_seconds: Option<u32>,
    },
    /// List message templates available for dispatch.
    Templates,
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zapcast={log_level},warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match zapcast_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            zapcast_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.console.log_level);

    let console = match Console::connect(&config) {
        Ok(console) => console,
        Err(e) => {
            eprintln!("zapcast: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Pair) => pair::run_pair(&console, cli.plain).await,
        Some(Commands::Unpair) => pair::run_unpair(&console).await,
        Some(Commands::Status { json }) => status::run_status(&console, json, cli.plain).await,
        Some(Commands::Start { target, template }) => {
            dispatch::run_start(&console, &target, template).await
        }
        Some(Commands::Stop { target }) => dispatch::run_stop(&console, &target).await,
        Some(Commands::Restart { target, template }) => {
            dispatch::run_restart(&console, &target, template).await
        }
        Some(Commands::Params {
            max_per_run,
            delay_seconds,
        }) => params::run_params(&console, max_per_run, delay_seconds).await,
        Some(Commands::Templates) => templates::run_templates(&console).await,
        None => {
            println!("zapcast: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("zapcast: {e}");
        std::process::exit(1);
    }
}
