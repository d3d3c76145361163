pub mod css;
pub mod json;

use std::path::Path;

use anyhow::{Context, Result};

use crate::theme::Theme;

/// An output format for a derived theme.
pub trait ThemeBackend {
    /// Human-readable name of the format.
    fn name(&self) -> &str;

    /// Render the theme in this backend's format.
    fn serialize(&self, theme: &Theme) -> Result<String>;

    /// Write the rendered theme to `path`.
    fn write_to(&self, theme: &Theme, path: &Path) -> Result<()> {
        let content = self.serialize(theme)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write theme to {}", path.display()))?;
        Ok(())
    }
}
