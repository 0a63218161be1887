use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::{self, Config, API_KEY_ENV, UPDATE_API_ENV};

/// Print the effective configuration, or write a default config file.
pub fn run(path: Option<&Path>, init: bool) -> Result<()> {
    if init {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config::config_path()?,
        };
        config::create_default_config(&path)?;
        println!("Created {}", path.display().green());
        return Ok(());
    }

    let cfg = Config::load(path, false)?;
    let exists = cfg.path.exists();

    println!(
        "{} {}",
        cfg.path.display().bold(),
        if exists { "" } else { "(not found, using defaults)" }.dimmed()
    );
    println!("  calendar_url: {}", cfg.calendar_url);
    println!("  timezone:     {}", cfg.timezone);
    println!("  timeout:      {}", humantime::format_duration(cfg.timeout));
    println!("  cycle length: {}", cfg.rules.length);
    println!("  seed:         {:?}", cfg.rules.seed);

    match &cfg.publish {
        Some(publish) => {
            println!("  endpoint:     {}", publish.endpoint);
            println!("  api key:      {}", "set".green());
        }
        None => println!(
            "  publishing:   {}",
            format!("{} / {} not set", UPDATE_API_ENV, API_KEY_ENV).yellow()
        ),
    }

    Ok(())
}
