use anyhow::{Context, Result};

use crate::config::Config;
use crate::render::Render;

use super::ResolveOptions;

/// Fetch and resolve without publishing; never needs the publish secrets.
pub async fn run(config: Config, options: ResolveOptions, json: bool) -> Result<()> {
    let resolution = super::fetch_and_resolve(&config, &options).await?;

    if json {
        let payload = serde_json::to_string_pretty(&resolution.payload())
            .context("Failed to serialize payload")?;
        println!("{}", payload);
    } else {
        println!("{}", resolution.render());
    }

    Ok(())
}
