pub mod config;
pub mod preview;
pub mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use daycycle_core::{Resolution, Resolver, TargetDates};
use tracing::info;

use crate::config::Config;
use crate::fetch::{Fetcher, Source};
use crate::utils::tui::create_spinner;

/// Per-invocation overrides shared by `run` and `preview`.
#[derive(Debug, Default, Clone)]
pub struct ResolveOptions {
    /// Resolve as if today were this date.
    pub date: Option<NaiveDate>,
    pub url: Option<String>,
    /// Read the calendar page from a file instead of fetching it.
    pub html: Option<PathBuf>,
}

impl ResolveOptions {
    fn source(&self, config: &Config) -> Source {
        match &self.html {
            Some(path) => Source::File(path.clone()),
            None => Source::Url(
                self.url
                    .clone()
                    .unwrap_or_else(|| config.calendar_url.clone()),
            ),
        }
    }
}

/// Fetch the calendar page and resolve the three target dates.
///
/// Rule validation happens before the fetch so a bad config never costs a
/// network call.
pub async fn fetch_and_resolve(config: &Config, options: &ResolveOptions) -> Result<Resolution> {
    let resolver = Resolver::new(config.rules.clone()).context("Invalid cycle rules")?;

    let today = options.date.unwrap_or_else(|| config.today());
    let targets = TargetDates::starting(today);
    let source = options.source(config);

    info!(
        date = %today,
        cycle_length = config.rules.length,
        "Resolving day cycle"
    );

    let fetcher = Fetcher::new(config.timeout)?;
    let spinner = create_spinner("Fetching calendar...".to_string());
    let document = fetcher.fetch(&source).await;
    spinner.finish_and_clear();

    let document = document?;
    Ok(resolver.resolve(&document, &targets))
}
