//! Config command - show and change connection settings

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use expense_core::config::{Config, BASE_URL_ENV};

use super::{get_app_dir, start_command};
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the active settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the API base URL
    SetUrl {
        /// Base URL, e.g. http://localhost:8000/
        url: String,
    },
    /// Set the request timeout in seconds (omit to use the default)
    SetTimeout {
        seconds: Option<u64>,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let _logger = start_command("config");
    let app_dir = get_app_dir();

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&app_dir)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&config.api)?);
                return Ok(());
            }

            println!("{}", "Settings".bold());
            println!("  Directory: {}", app_dir.display());
            println!("  Base URL:  {}", config.api.base_url);
            match config.api.timeout_secs {
                Some(secs) => println!("  Timeout:   {}s", secs),
                None => println!("  Timeout:   default"),
            }
            if std::env::var(BASE_URL_ENV).is_ok() {
                println!();
                output::warning(&format!("Base URL overridden by {}", BASE_URL_ENV));
            }
        }
        ConfigCommands::SetUrl { url } => {
            let mut config = Config::load_saved(&app_dir)?;
            config.set_base_url(&url)?;
            config
                .save(&app_dir)
                .with_context(|| format!("Failed to write settings in {}", app_dir.display()))?;
            output::success(&format!("Base URL set to {}", config.api.base_url));
        }
        ConfigCommands::SetTimeout { seconds } => {
            let mut config = Config::load_saved(&app_dir)?;
            config.api.timeout_secs = seconds;
            config
                .save(&app_dir)
                .with_context(|| format!("Failed to write settings in {}", app_dir.display()))?;
            match seconds {
                Some(secs) => output::success(&format!("Timeout set to {}s", secs)),
                None => output::success("Timeout reset to default"),
            }
        }
    }

    Ok(())
}
