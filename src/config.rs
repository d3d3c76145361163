use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::pipeline::contrast::DEFAULT_MIN_DISTANCE;
use crate::pipeline::extract::ExtractOptions;

/// Files probed, in order, when no explicit config path is given.
const DEFAULT_CONFIG_LOCATIONS: [&str; 2] = ["media-theme.toml", "config/media-theme.toml"];

/// Pipeline tuning. Every field is optional in the TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Per-source fetch timeout in seconds.
    pub fetch_timeout_secs: u64,
    /// Pixel sampling step passed to the palette extractor.
    pub quality: u32,
    /// Maximum number of colors the extractor clusters into.
    pub max_colors: usize,
    /// Minimum RGB distance kept between primary and secondary/accent.
    pub min_distance: u8,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 5,
            quality: 5,
            max_colors: 8,
            min_distance: DEFAULT_MIN_DISTANCE,
            user_agent: concat!("media-theme/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            quality: self.quality,
            max_colors: self.max_colors,
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("invalid config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from the first default location that exists.
    /// With neither, the defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::find_default() {
                Some(path) => path,
                None => {
                    debug!("no config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("failed to load config file: {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    fn find_default() -> Option<PathBuf> {
        DEFAULT_CONFIG_LOCATIONS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file())
    }

    pub fn validate(&self) -> Result<()> {
        if self.fetch_timeout_secs == 0 {
            bail!("fetch_timeout_secs must be greater than 0");
        }
        if self.quality == 0 {
            bail!("quality must be at least 1");
        }
        if self.max_colors == 0 || self.max_colors > 256 {
            bail!("max_colors must be between 1 and 256, got {}", self.max_colors);
        }
        Ok(())
    }
}
