use std::time::Duration;

use crate::constants::{FALL_STEP_PER_LEVEL, MIN_FALL_INTERVAL, POINTS_PER_LEVEL};

/// Points awarded for the rows cleared by a single lock.
pub fn score_delta(rows_cleared: u32) -> u32 {
    match rows_cleared {
        1 => 100,
        2 => 300,
        3 => 500,
        4 => 800,
        _ => 0,
    }
}

pub fn level(total_score: u32) -> u32 {
    total_score / POINTS_PER_LEVEL
}

/// Each level shaves a fixed step off `base`, never going below the floor.
pub fn fall_interval(total_score: u32, base: Duration) -> Duration {
    let step = FALL_STEP_PER_LEVEL.saturating_mul(level(total_score) as u64);
    let millis = (base.as_millis() as u64).saturating_sub(step);
    Duration::from_millis(millis.max(MIN_FALL_INTERVAL))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Duration = Duration::from_millis(500);

    #[test]
    fn score_table() {
        assert_eq!(score_delta(0), 0);
        assert_eq!(score_delta(1), 100);
        assert_eq!(score_delta(2), 300);
        assert_eq!(score_delta(3), 500);
        assert_eq!(score_delta(4), 800);
    }

    #[test]
    fn interval_steps_down_per_thousand_points() {
        assert_eq!(fall_interval(0, BASE), Duration::from_millis(500));
        assert_eq!(fall_interval(999, BASE), Duration::from_millis(500));
        assert_eq!(fall_interval(1000, BASE), Duration::from_millis(460));
        assert_eq!(fall_interval(5300, BASE), Duration::from_millis(300));
    }

    #[test]
    fn interval_never_drops_below_floor() {
        assert_eq!(fall_interval(9000, BASE), Duration::from_millis(140));
        assert_eq!(fall_interval(10_000, BASE), Duration::from_millis(120));
        assert_eq!(fall_interval(u32::MAX, BASE), Duration::from_millis(120));
    }

    #[test]
    fn interval_is_non_increasing() {
        let mut previous = fall_interval(0, BASE);
        for score in (0..40_000).step_by(100) {
            let current = fall_interval(score, BASE);
            assert!(current <= previous);
            previous = current;
        }
    }
}
