use anyhow::{Context, Result};

use crate::theme::Theme;

use super::ThemeBackend;

/// Pretty-printed JSON object with one key per theme field.
pub struct JsonBackend;

impl ThemeBackend for JsonBackend {
    fn name(&self) -> &str {
        "JSON"
    }

    fn serialize(&self, theme: &Theme) -> Result<String> {
        let mut out = serde_json::to_string_pretty(theme).context("failed to encode theme")?;
        out.push('\n');
        Ok(out)
    }
}
