use crossterm::style::{Color as TermColor, Stylize};

use crate::color::{text_color_for, Color, TextColor};
use crate::theme::Theme;

const LABELS: [&str; 3] = ["primary", "secondary", "accent"];

fn to_term(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

fn text_term(text: TextColor) -> TermColor {
    match text {
        TextColor::Black => TermColor::Black,
        TextColor::White => TermColor::White,
    }
}

/// Render the theme colors as labelled truecolor swatches, one per line.
/// Fields that are not valid hex are listed without a swatch.
pub fn render(theme: &Theme) -> String {
    let mut out = String::new();
    for (label, hex) in LABELS.iter().zip([&theme.primary, &theme.secondary, &theme.accent]) {
        match Color::from_hex(hex) {
            Ok(color) => {
                let swatch = format!(" {:^8} ", "Aa")
                    .with(text_term(text_color_for(color)))
                    .on(to_term(color));
                out.push_str(&format!("  {swatch}  {label:<9} {hex}\n"));
            }
            Err(_) => out.push_str(&format!("  {:10}  {label:<9} {hex}\n", "")),
        }
    }
    out.push_str(&format!("  text      {}\n", theme.text));
    out
}
