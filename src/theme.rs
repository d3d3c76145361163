use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::color::{text_color_for, Color};

/// Theme returned whenever no colors can be derived from the media.
pub static DEFAULT_THEME: LazyLock<Theme> = LazyLock::new(|| Theme {
    primary: "#4A90E2".to_string(),
    secondary: "#7B68EE".to_string(),
    accent: "#50C878".to_string(),
    text: "#FFFFFF".to_string(),
    gradient: gradient("#4A90E2", "#7B68EE", "#50C878"),
});

/// A UI color theme derived from a piece of media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    /// Either `#000000` or `#FFFFFF`, readable on `primary`.
    pub text: String,
    /// CSS `linear-gradient(...)` over primary, secondary and accent.
    pub gradient: String,
}

impl Theme {
    /// Build a theme from the three selected colors. Text color follows the
    /// primary color only.
    pub fn from_colors(primary: Color, secondary: Color, accent: Color) -> Self {
        let primary_hex = primary.to_hex();
        let secondary_hex = secondary.to_hex();
        let accent_hex = accent.to_hex();
        let gradient = gradient(&primary_hex, &secondary_hex, &accent_hex);
        Self {
            primary: primary_hex,
            secondary: secondary_hex,
            accent: accent_hex,
            text: text_color_for(primary).as_hex().to_string(),
            gradient,
        }
    }

    pub fn default_theme() -> Self {
        DEFAULT_THEME.clone()
    }

    pub fn is_default(&self) -> bool {
        *self == *DEFAULT_THEME
    }
}

/// Format the 135-degree CSS gradient through the three stops in order.
pub fn gradient(primary: &str, secondary: &str, accent: &str) -> String {
    format!("linear-gradient(135deg, {primary}, {secondary}, {accent})")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_hex(s: &str) -> bool {
        s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    #[test]
    fn gradient_format_is_exact() {
        assert_eq!(
            gradient("#4a90e2", "#7b68ee", "#50c878"),
            "linear-gradient(135deg, #4a90e2, #7b68ee, #50c878)"
        );
    }

    #[test]
    fn default_theme_is_structurally_valid() {
        let theme = Theme::default_theme();
        for hex in [&theme.primary, &theme.secondary, &theme.accent, &theme.text] {
            assert!(is_hex(hex), "bad hex {hex}");
        }
        assert_eq!(theme.text, "#FFFFFF");
        assert_eq!(
            theme.gradient,
            "linear-gradient(135deg, #4A90E2, #7B68EE, #50C878)"
        );
        assert!(theme.is_default());
    }

    #[test]
    fn from_colors_uses_primary_for_text() {
        let theme = Theme::from_colors(
            Color::new(250, 250, 250),
            Color::new(10, 10, 10),
            Color::new(10, 10, 10),
        );
        assert_eq!(theme.text, "#000000");
        assert_eq!(theme.primary, "#fafafa");
        assert_eq!(
            theme.gradient,
            "linear-gradient(135deg, #fafafa, #0a0a0a, #0a0a0a)"
        );
        assert!(!theme.is_default());
    }

    #[test]
    fn serializes_to_json_object() {
        let json = serde_json::to_value(Theme::default_theme()).unwrap();
        assert_eq!(json["primary"], "#4A90E2");
        assert_eq!(json["text"], "#FFFFFF");
    }
}
