pub mod backends;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod preview;
pub mod theme;

pub use pipeline::source::MediaKind;
pub use pipeline::{extract_theme_color, ThemeExtractor};
pub use theme::{Theme, DEFAULT_THEME};
