use anyhow::Result;

use crate::theme::Theme;

use super::ThemeBackend;

/// CSS custom properties on `:root`, ready to drop into a stylesheet.
pub struct CssBackend;

impl ThemeBackend for CssBackend {
    fn name(&self) -> &str {
        "CSS"
    }

    fn serialize(&self, theme: &Theme) -> Result<String> {
        let mut out = String::new();
        out.push_str(":root {\n");
        out.push_str(&format!("    --theme-primary: {};\n", theme.primary));
        out.push_str(&format!("    --theme-secondary: {};\n", theme.secondary));
        out.push_str(&format!("    --theme-accent: {};\n", theme.accent));
        out.push_str(&format!("    --theme-text: {};\n", theme.text));
        out.push_str(&format!("    --theme-gradient: {};\n", theme.gradient));
        out.push_str("}\n");
        Ok(out)
    }
}
