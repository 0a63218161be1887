mod commands;
mod config;
mod fetch;
mod logging;
mod publish;
mod render;
mod utils;

#[cfg(test)]
mod testutil;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use commands::ResolveOptions;
use config::Config;

#[derive(Parser)]
#[command(name = "daycycle")]
#[command(about = "Scrape the school calendar for the rotating cycle day and publish the next three days")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ~/.config/daycycle/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the calendar, resolve the cycle days and publish them (default)
    Run {
        #[command(flatten)]
        resolve: ResolveArgs,

        /// Resolve and print, but do not publish
        #[arg(long)]
        dry_run: bool,
    },
    /// Fetch the calendar and print the resolved cycle days without publishing
    Preview {
        #[command(flatten)]
        resolve: ResolveArgs,

        /// Print the payload as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write a commented default config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args, Default)]
struct ResolveArgs {
    /// Resolve as if today were this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Calendar page URL (overrides calendar_url from config)
    #[arg(long, conflicts_with = "html")]
    url: Option<String>,

    /// Read the calendar page from a saved HTML file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Days in the rotation (overrides cycle.length from config)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=9))]
    cycle_length: Option<u8>,
}

impl ResolveArgs {
    /// Load config and fold the CLI overrides into it.
    fn load_config(&self, path: Option<&std::path::Path>, require_publish: bool) -> Result<Config> {
        let mut config = Config::load(path, require_publish)?;
        if let Some(length) = self.cycle_length {
            config.rules.length = length;
        }
        Ok(config)
    }

    fn options(self) -> ResolveOptions {
        ResolveOptions {
            date: self.date,
            url: self.url,
            html: self.html,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Run {
        resolve: ResolveArgs::default(),
        dry_run: false,
    }) {
        Commands::Run { resolve, dry_run } => {
            let config = resolve.load_config(config_path, !dry_run)?;
            commands::run::run(config, resolve.options(), dry_run).await
        }
        Commands::Preview { resolve, json } => {
            let config = resolve.load_config(config_path, false)?;
            commands::preview::run(config, resolve.options(), json).await
        }
        Commands::Config { init } => commands::config::run(config_path, init),
    }
}
