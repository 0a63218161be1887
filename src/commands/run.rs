use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::error;

use crate::config::Config;
use crate::publish::Publisher;
use crate::render::Render;

use super::ResolveOptions;

/// Fetch, resolve and publish.
///
/// A publish failure does not stop the results from being printed, but
/// still fails the run so the scheduler sees a non-zero exit.
pub async fn run(config: Config, options: ResolveOptions, dry_run: bool) -> Result<()> {
    let publisher = match (&config.publish, dry_run) {
        (Some(publish), false) => Some(Publisher::new(publish, config.timeout)?),
        (None, false) => anyhow::bail!("Publishing is not configured"),
        (_, true) => None,
    };

    let resolution = super::fetch_and_resolve(&config, &options).await?;
    println!("{}", resolution.render());

    let Some(publisher) = publisher else {
        println!("{}", "Dry run: results not published.".dimmed());
        return Ok(());
    };

    match publisher.publish(&resolution.payload()).await {
        Ok(()) => {
            println!("{}", "Day cycle updated successfully".green());
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Publishing failed");
            Err(e).context("Results were resolved but could not be published")
        }
    }
}
