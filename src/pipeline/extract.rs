use image::imageops::FilterType;
use kmeans_colors::get_kmeans_hamerly;
use palette::Lab;

use crate::color::Color;
use crate::error::SourceError;

/// A candidate color with the number of sampled pixels it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub rgb: Color,
    pub population: u32,
}

impl Swatch {
    pub const fn new(rgb: Color, population: u32) -> Self {
        Self { rgb, population }
    }
}

/// Named swatch slots produced by a palette extractor. Any slot may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwatchSlots {
    pub vibrant: Option<Swatch>,
    pub dark_vibrant: Option<Swatch>,
    pub light_vibrant: Option<Swatch>,
    pub muted: Option<Swatch>,
    pub dark_muted: Option<Swatch>,
    pub light_muted: Option<Swatch>,
}

impl SwatchSlots {
    /// Present swatches in slot order, empty slots dropped.
    pub fn into_swatches(self) -> Vec<Swatch> {
        [
            self.vibrant,
            self.dark_vibrant,
            self.light_vibrant,
            self.muted,
            self.dark_muted,
            self.light_muted,
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.clone().into_swatches().is_empty()
    }
}

/// Tuning knobs handed to the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Sample every `quality`-th pixel. Higher is faster and coarser.
    pub quality: u32,
    /// Maximum number of colors to cluster into.
    pub max_colors: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            quality: 5,
            max_colors: 8,
        }
    }
}

/// Turns encoded image bytes into named swatch slots.
pub trait PaletteExtractor: Send + Sync + 'static {
    fn extract(&self, bytes: &[u8], options: ExtractOptions) -> Result<SwatchSlots, SourceError>;
}

const MAX_DIM: u32 = 256;
const MAX_ITER: usize = 20;
const CONVERGE: f32 = 5.0;
const SEED: u64 = 42;
const MIN_ALPHA: u8 = 125;
const WHITE_CUTOFF: u8 = 250;

/// K-means palette extractor.
///
/// Decodes the image, downsizes it to fit within 256x256, samples pixels,
/// clusters them in CIELAB and scores the clusters into the six named slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct KmeansExtractor;

impl PaletteExtractor for KmeansExtractor {
    fn extract(&self, bytes: &[u8], options: ExtractOptions) -> Result<SwatchSlots, SourceError> {
        let pixels = sample_pixels(bytes, options.quality)?;
        let clusters = cluster(&pixels, options.max_colors);
        Ok(assign_slots(&clusters))
    }
}

/// Decode and sample pixels as CIELAB, skipping transparent and near-white
/// pixels.
fn sample_pixels(bytes: &[u8], quality: u32) -> Result<Vec<Lab>, SourceError> {
    let img = image::load_from_memory(bytes)?;
    let img = if img.width() > MAX_DIM || img.height() > MAX_DIM {
        img.resize(MAX_DIM, MAX_DIM, FilterType::Triangle)
    } else {
        img
    };

    let step = quality.max(1) as usize;
    let pixels: Vec<Lab> = img
        .to_rgba8()
        .pixels()
        .step_by(step)
        .filter(|p| {
            let [r, g, b, a] = p.0;
            a >= MIN_ALPHA && !(r > WHITE_CUTOFF && g > WHITE_CUTOFF && b > WHITE_CUTOFF)
        })
        .map(|p| Color::new(p[0], p[1], p[2]).to_lab())
        .collect();

    if pixels.is_empty() {
        return Err(SourceError::EmptyImage);
    }
    Ok(pixels)
}

/// Run K-means and return one swatch per non-empty cluster.
fn cluster(pixels: &[Lab], max_colors: usize) -> Vec<Swatch> {
    let k = max_colors.clamp(1, pixels.len());
    let result = get_kmeans_hamerly(k, MAX_ITER, CONVERGE, false, pixels, SEED);

    let mut counts = vec![0u32; result.centroids.len()];
    for &idx in &result.indices {
        counts[idx as usize] += 1;
    }

    result
        .centroids
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(lab, count)| Swatch::new(Color::from_lab(*lab), count))
        .collect()
}

/// Target saturation/lightness window for one named slot.
struct SlotTarget {
    luma: (f32, f32, f32),
    saturation: (f32, f32, f32),
}

const WEIGHT_SATURATION: f32 = 3.0;
const WEIGHT_LUMA: f32 = 6.5;
const WEIGHT_POPULATION: f32 = 0.5;

const VIBRANT: SlotTarget = SlotTarget {
    luma: (0.3, 0.5, 0.7),
    saturation: (0.35, 1.0, 1.0),
};
const LIGHT_VIBRANT: SlotTarget = SlotTarget {
    luma: (0.55, 0.74, 1.0),
    saturation: (0.35, 1.0, 1.0),
};
const DARK_VIBRANT: SlotTarget = SlotTarget {
    luma: (0.0, 0.26, 0.45),
    saturation: (0.35, 1.0, 1.0),
};
const MUTED: SlotTarget = SlotTarget {
    luma: (0.3, 0.5, 0.7),
    saturation: (0.0, 0.3, 0.4),
};
const LIGHT_MUTED: SlotTarget = SlotTarget {
    luma: (0.55, 0.74, 1.0),
    saturation: (0.0, 0.3, 0.4),
};
const DARK_MUTED: SlotTarget = SlotTarget {
    luma: (0.0, 0.26, 0.45),
    saturation: (0.0, 0.3, 0.4),
};

/// Fill each slot with the best-scoring unused cluster inside its window.
fn assign_slots(clusters: &[Swatch]) -> SwatchSlots {
    let max_population = clusters.iter().map(|s| s.population).max().unwrap_or(0);
    let mut used = vec![false; clusters.len()];
    let mut pick = |target: &SlotTarget| -> Option<Swatch> {
        let mut best: Option<(usize, f32)> = None;
        for (i, swatch) in clusters.iter().enumerate() {
            if used[i] {
                continue;
            }
            let hsl = swatch.rgb.to_hsl();
            let (sat, luma) = (hsl.saturation, hsl.lightness);
            if !within(sat, target.saturation) || !within(luma, target.luma) {
                continue;
            }
            let value = score(sat, luma, swatch.population, max_population, target);
            if best.map_or(true, |(_, s)| value > s) {
                best = Some((i, value));
            }
        }
        best.map(|(i, _)| {
            used[i] = true;
            clusters[i]
        })
    };

    // Vibrant slots get first pick.
    let vibrant = pick(&VIBRANT);
    let light_vibrant = pick(&LIGHT_VIBRANT);
    let dark_vibrant = pick(&DARK_VIBRANT);
    let muted = pick(&MUTED);
    let light_muted = pick(&LIGHT_MUTED);
    let dark_muted = pick(&DARK_MUTED);

    SwatchSlots {
        vibrant,
        dark_vibrant,
        light_vibrant,
        muted,
        dark_muted,
        light_muted,
    }
}

fn within(value: f32, (min, _, max): (f32, f32, f32)) -> bool {
    value >= min && value <= max
}

fn score(sat: f32, luma: f32, population: u32, max_population: u32, target: &SlotTarget) -> f32 {
    let closeness = |value: f32, t: f32| 1.0 - (value - t).abs();
    let population = if max_population == 0 {
        0.0
    } else {
        population as f32 / max_population as f32
    };
    (closeness(sat, target.saturation.1) * WEIGHT_SATURATION
        + closeness(luma, target.luma.1) * WEIGHT_LUMA
        + population * WEIGHT_POPULATION)
        / (WEIGHT_SATURATION + WEIGHT_LUMA + WEIGHT_POPULATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(img: &image::RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(width, height, |_, _| {
            image::Rgba([rgb[0], rgb[1], rgb[2], 255])
        });
        encode_png(&img)
    }

    #[test]
    fn slots_flatten_in_order_and_skip_empty() {
        let a = Swatch::new(Color::new(1, 2, 3), 10);
        let b = Swatch::new(Color::new(4, 5, 6), 5);
        let slots = SwatchSlots {
            vibrant: Some(a),
            muted: Some(b),
            ..Default::default()
        };
        assert_eq!(slots.into_swatches(), vec![a, b]);
        assert!(SwatchSlots::default().is_empty());
    }

    #[test]
    fn invalid_bytes_fail_to_decode() {
        let err = KmeansExtractor
            .extract(b"this is not an image", ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)), "got {err:?}");
    }

    #[test]
    fn all_white_image_has_no_usable_pixels() {
        let bytes = solid(8, 8, [255, 255, 255]);
        let err = KmeansExtractor
            .extract(&bytes, ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, SourceError::EmptyImage), "got {err:?}");
    }

    #[test]
    fn transparent_pixels_are_skipped() {
        let img = image::RgbaImage::from_fn(8, 8, |_, _| image::Rgba([200, 30, 30, 0]));
        let err = KmeansExtractor
            .extract(&encode_png(&img), ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, SourceError::EmptyImage));
    }

    #[test]
    fn saturated_red_lands_in_vibrant_slot() {
        let bytes = solid(16, 16, [220, 40, 40]);
        let slots = KmeansExtractor
            .extract(&bytes, ExtractOptions::default())
            .unwrap();
        let vibrant = slots.vibrant.expect("vibrant slot");
        assert!(vibrant.rgb.r > 200 && vibrant.rgb.g < 60, "got {vibrant:?}");
        assert!(vibrant.population > 0);
    }

    #[test]
    fn gray_lands_in_a_muted_slot() {
        let bytes = solid(16, 16, [120, 120, 120]);
        let slots = KmeansExtractor
            .extract(&bytes, ExtractOptions::default())
            .unwrap();
        assert!(slots.vibrant.is_none());
        assert!(slots.muted.is_some());
    }

    #[test]
    fn two_color_image_fills_two_slots() {
        let img = image::RgbaImage::from_fn(32, 32, |x, _| {
            if x < 16 {
                image::Rgba([230, 40, 40, 255])
            } else {
                image::Rgba([40, 40, 90, 255])
            }
        });
        let swatches = KmeansExtractor
            .extract(&encode_png(&img), ExtractOptions { quality: 1, max_colors: 4 })
            .unwrap()
            .into_swatches();
        assert!(swatches.len() >= 2, "got {swatches:?}");
        let total: u32 = swatches.iter().map(|s| s.population).sum();
        assert!(total <= 32 * 32);
    }

    #[test]
    fn extraction_is_deterministic() {
        let img = image::RgbaImage::from_fn(40, 40, |x, y| {
            image::Rgba([(x * 6) as u8, (y * 6) as u8, 128, 255])
        });
        let bytes = encode_png(&img);
        let first = KmeansExtractor.extract(&bytes, ExtractOptions::default()).unwrap();
        let second = KmeansExtractor.extract(&bytes, ExtractOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn score_prefers_closer_lightness() {
        let near = score(1.0, 0.5, 10, 10, &VIBRANT);
        let far = score(1.0, 0.65, 10, 10, &VIBRANT);
        assert!(near > far);
    }
}
