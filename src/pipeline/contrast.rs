use crate::color::Color;

/// Default minimum Euclidean RGB distance between primary and the other
/// theme colors.
pub const DEFAULT_MIN_DISTANCE: u8 = 50;

const MIDPOINT: u8 = 128;

/// Push `candidate` away from `primary` when the two are closer than
/// `min_distance`.
///
/// Each channel moves by `min_distance`: down when the primary's channel is
/// above 128, up otherwise, clamped to [0, 255]. This is a single nudge, so
/// the result is not guaranteed to reach `min_distance` once clamping kicks in.
pub fn ensure_distance(primary: Color, candidate: Color, min_distance: u8) -> Color {
    if primary.distance(candidate) >= f64::from(min_distance) {
        return candidate;
    }

    let step = i16::from(min_distance);
    let mut channels = candidate.channels();
    for (channel, reference) in channels.iter_mut().zip(primary.channels()) {
        let shifted = if reference > MIDPOINT {
            i16::from(*channel) - step
        } else {
            i16::from(*channel) + step
        };
        *channel = shifted.clamp(0, 255) as u8;
    }
    Color::from_channels(channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distant_candidate_is_unchanged() {
        let primary = Color::new(200, 200, 200);
        let candidate = Color::new(20, 40, 60);
        assert_eq!(
            ensure_distance(primary, candidate, DEFAULT_MIN_DISTANCE),
            candidate
        );
    }

    #[test]
    fn exactly_min_distance_is_unchanged() {
        let primary = Color::new(0, 0, 0);
        let candidate = Color::new(30, 40, 0); // distance 50
        assert_eq!(ensure_distance(primary, candidate, 50), candidate);
    }

    #[test]
    fn light_primary_pushes_candidate_down() {
        let primary = Color::new(200, 200, 200);
        let candidate = Color::new(210, 210, 210);
        let enforced = ensure_distance(primary, candidate, DEFAULT_MIN_DISTANCE);
        assert_eq!(enforced, Color::new(160, 160, 160));
        assert!(primary.distance(enforced) >= 50.0);
    }

    #[test]
    fn dark_primary_pushes_candidate_up() {
        let primary = Color::new(20, 30, 40);
        let candidate = Color::new(25, 35, 45);
        let enforced = ensure_distance(primary, candidate, DEFAULT_MIN_DISTANCE);
        assert_eq!(enforced, Color::new(75, 85, 95));
    }

    #[test]
    fn channels_move_independently() {
        let primary = Color::new(200, 100, 128);
        let candidate = Color::new(190, 110, 130);
        let enforced = ensure_distance(primary, candidate, DEFAULT_MIN_DISTANCE);
        // 200 > 128 subtracts, 100 and 128 (not strictly above) add.
        assert_eq!(enforced, Color::new(140, 160, 180));
    }

    #[test]
    fn clamps_at_upper_bound() {
        let primary = Color::new(100, 100, 100);
        let candidate = Color::new(150, 150, 150);
        assert_eq!(
            ensure_distance(primary, candidate, 200),
            Color::new(255, 255, 255)
        );
    }

    #[test]
    fn clamps_at_lower_bound() {
        let primary = Color::new(200, 200, 200);
        let candidate = Color::new(150, 150, 150);
        assert_eq!(ensure_distance(primary, candidate, 200), Color::new(0, 0, 0));
    }

    #[test]
    fn mixed_directions_per_channel() {
        let primary = Color::new(240, 30, 235);
        let candidate = Color::new(250, 20, 240);
        // red and blue sit above 128 and move down; green moves up.
        assert_eq!(
            ensure_distance(primary, candidate, DEFAULT_MIN_DISTANCE),
            Color::new(200, 70, 190)
        );
    }

    #[test]
    fn nudge_is_best_effort() {
        let primary = Color::new(120, 120, 120);
        let stuck = ensure_distance(primary, Color::new(250, 250, 250), 255);
        assert_eq!(stuck, Color::new(255, 255, 255));
        assert!(primary.distance(stuck) < 255.0);
    }
}
