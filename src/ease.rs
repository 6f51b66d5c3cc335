/// Ease-out cubic, `1 − (1−t)³`: the settle curve for particle flight.
///
/// Leaves the source cell fast and decelerates into the target cell. Input
/// is clamped to the unit interval, so the raw delay-shifted progress ratio
/// can be fed straight in.
pub fn out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_stable() {
        assert_eq!(out_cubic(0.0), 0.0);
        assert_eq!(out_cubic(1.0), 1.0);
    }

    #[test]
    fn midpoint_settles_at_seven_eighths() {
        // 1 - (1 - 0.5)^3
        assert_eq!(out_cubic(0.5), 0.875);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(out_cubic(-1.0), 0.0);
        assert_eq!(out_cubic(2.0), 1.0);
    }

    #[test]
    fn curve_decelerates_toward_the_target() {
        // Early motion outpaces late motion.
        assert!(out_cubic(0.25) - out_cubic(0.0) > out_cubic(1.0) - out_cubic(0.75));
        assert!(out_cubic(0.25) < out_cubic(0.5));
        assert!(out_cubic(0.5) < out_cubic(0.75));
    }
}
