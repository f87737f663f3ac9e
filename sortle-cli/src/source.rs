use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use sortle_core::{Catalog, GameConfig};

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn fetch(url: &str) -> Result<String> {
    tracing::info!(url, "fetching catalog");
    let response = match ureq::get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, _)) => bail!("{url} returned HTTP {code}"),
        Err(err) => bail!("failed to fetch {url}: {err}"),
    };
    response
        .into_string()
        .with_context(|| format!("failed to read response body from {url}"))
}

/// Read a file path or download an http(s) URL.
pub fn read_source(location: &str) -> Result<String> {
    if is_url(location) {
        fetch(location)
    } else {
        fs::read_to_string(location).with_context(|| format!("failed to read {location}"))
    }
}

/// Load a catalog and keep only the configured contest series.
pub fn load_catalog(location: &str, config: &GameConfig) -> Result<Catalog> {
    let text = read_source(location)?;
    let catalog = Catalog::from_json(&text).with_context(|| format!("bad catalog at {location}"))?;
    let catalog = catalog.retain_prefix(&config.group_prefix);
    tracing::info!(problems = catalog.len(), "catalog loaded");
    Ok(catalog)
}

pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    GameConfig::from_json(&text).with_context(|| format!("bad config in {}", path.display()))
}
