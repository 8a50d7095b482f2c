//! Easing for viewport animations.

/// Cubic ease-out: covers most of the distance early, then settles softly
/// at the target. Progress outside [0, 1] is clamped.
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_pins_endpoints() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        // Out-of-range progress clamps instead of overshooting
        assert_eq!(ease_out(-0.5), 0.0);
        assert_eq!(ease_out(2.0), 1.0);
    }

    #[test]
    fn test_ease_out_front_loads_movement() {
        // Over half the distance is covered by the halfway point
        assert!(ease_out(0.5) > 0.5);

        let mut last = 0.0;
        for step in 1..=10 {
            let eased = ease_out(f64::from(step) / 10.0);
            assert!(eased >= last);
            last = eased;
        }
    }
}
