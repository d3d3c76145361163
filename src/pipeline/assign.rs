use crate::error::ThemeError;
use crate::pipeline::contrast::ensure_distance;
use crate::pipeline::extract::Swatch;
use crate::theme::Theme;

/// Pick primary, secondary and accent from ranked swatches and build the
/// theme.
///
/// Secondary and accent are kept at least `min_distance` away from primary
/// (best effort). Missing ranks degrade: secondary falls back to primary,
/// accent falls back to secondary.
pub fn assign_theme(ranked: &[Swatch], min_distance: u8) -> Result<Theme, ThemeError> {
    let primary = ranked.first().ok_or(ThemeError::NoUsableColors)?.rgb;
    let secondary = ranked
        .get(1)
        .map_or(primary, |s| ensure_distance(primary, s.rgb, min_distance));
    let accent = ranked
        .get(2)
        .map_or(secondary, |s| ensure_distance(primary, s.rgb, min_distance));

    Ok(Theme::from_colors(primary, secondary, accent))
}
