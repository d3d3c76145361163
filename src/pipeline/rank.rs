use std::collections::HashSet;

use crate::color::Color;
use crate::pipeline::extract::Swatch;

/// Drop swatches whose rgb was already seen (first occurrence wins), then
/// order by population descending. Ties keep their aggregation order.
pub fn dedup_and_rank(swatches: &[Swatch]) -> Vec<Swatch> {
    let mut seen: HashSet<Color> = HashSet::with_capacity(swatches.len());
    let mut ranked: Vec<Swatch> = swatches
        .iter()
        .filter(|s| seen.insert(s.rgb))
        .copied()
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.population.cmp(&a.population));
    ranked
}
