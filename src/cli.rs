use std::path::PathBuf;

use clap::Parser;

use crate::backends::css::CssBackend;
use crate::backends::json::JsonBackend;
use crate::backends::ThemeBackend;
use crate::config::Config;
use crate::pipeline::source::MediaKind;

/// Derive a UI color theme from an image or a video's first frame.
#[derive(Parser, Debug)]
#[command(name = "media-theme", version, about)]
pub struct Args {
    /// Media URL (http/https), file:// URL or local path
    pub reference: String,

    /// Kind of media the reference points at
    #[arg(short = 't', long = "type", value_enum, default_value_t = MediaKind::Image)]
    pub kind: MediaKind,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write theme to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to ./media-theme.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pixel sampling step; higher is faster but coarser
    #[arg(short, long)]
    pub quality: Option<u32>,

    /// Maximum number of colors to cluster into
    #[arg(short = 'k', long = "colors")]
    pub colors: Option<usize>,

    /// Per-source fetch timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Minimum RGB distance between primary and the other colors
    #[arg(long)]
    pub min_distance: Option<u8>,

    /// Print a colored terminal preview of the theme to stderr
    #[arg(long)]
    pub preview: bool,
}

impl Args {
    /// Apply command-line overrides on top of file/default config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        if let Some(colors) = self.colors {
            config.max_colors = colors;
        }
        if let Some(secs) = self.timeout {
            config.fetch_timeout_secs = secs;
        }
        if let Some(min_distance) = self.min_distance {
            config.min_distance = min_distance;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Css,
}

impl OutputFormat {
    pub fn backend(self) -> Box<dyn ThemeBackend> {
        match self {
            OutputFormat::Json => Box::new(JsonBackend),
            OutputFormat::Css => Box::new(CssBackend),
        }
    }
}
