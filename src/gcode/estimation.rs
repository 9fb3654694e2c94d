use std::time::Duration;

use crate::config::machine_profile::PredictorProfile;

/// Feed rates are in distance units per minute
const SECONDS_PER_MINUTE: f64 = 60.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EstimationResult {
    pub estimated_seconds: f64,
    pub line_count: usize,
    pub timed_moves: usize,
    pub unknown_codes: usize,
}

impl EstimationResult {
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.estimated_seconds.max(0.0))
    }

    /// `H:MM:SS`, rounded to the nearest second
    pub fn hms(&self) -> String {
        let total = self.estimated_seconds.max(0.0).round() as u64;
        format!("{}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
    }
}

/// Time for a straight XY move covering `dx` and `dy` at `feed`.
pub fn planar_seconds(dx: f64, dy: f64, feed: f64) -> f64 {
    SECONDS_PER_MINUTE * dx.hypot(dy) / feed
}

/// Effective Z speed for a nominal feed: the highest tier the feed reaches
/// caps it, feeds below every tier are used unchanged.
pub fn vertical_speed(feed: f64, profile: &PredictorProfile) -> f64 {
    profile
        .z_speed_tiers
        .iter()
        .filter(|t| feed >= t.min_feed)
        .max_by(|a, b| a.min_feed.total_cmp(&b.min_feed))
        .map_or(feed, |t| t.speed)
}

/// Time for a Z move of `dz` at nominal `feed`, after the vertical speed cap.
pub fn vertical_seconds(dz: f64, feed: f64, profile: &PredictorProfile) -> f64 {
    SECONDS_PER_MINUTE * dz / vertical_speed(feed, profile)
}

/// Time left in a job given the pre-flight total and the time covered so far
pub fn remaining_seconds(total: f64, elapsed: f64) -> f64 {
    (total - elapsed).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn planar_uses_euclidean_distance() {
        assert!(close(planar_seconds(30.0, 40.0, 600.0), 5.0));
        assert!(close(planar_seconds(100.0, 0.0, 1000.0), 6.0));
    }

    #[test]
    fn default_tiers_cap_vertical_speed() {
        let p = PredictorProfile::default();
        assert_eq!(vertical_speed(3000.0, &p), 585.0);
        assert_eq!(vertical_speed(2000.0, &p), 585.0);
        assert_eq!(vertical_speed(1999.0, &p), 450.0);
        assert_eq!(vertical_speed(500.0, &p), 450.0);
        assert_eq!(vertical_speed(450.0, &p), 450.0);
        assert_eq!(vertical_speed(100.0, &p), 100.0);
    }

    #[test]
    fn vertical_applies_speed_cap() {
        let p = PredictorProfile::default();
        assert!(close(vertical_seconds(10.0, 3000.0, &p), 60.0 * 10.0 / 585.0));
        assert!(close(vertical_seconds(10.0, 500.0, &p), 60.0 * 10.0 / 450.0));
        assert!(close(vertical_seconds(10.0, 100.0, &p), 6.0));
    }

    #[test]
    fn result_formats_and_converts() {
        let r = EstimationResult { estimated_seconds: 3725.4, ..Default::default() };
        assert_eq!(r.hms(), "1:02:05");
        assert_eq!(r.duration().as_secs(), 3725);
        assert_eq!(remaining_seconds(100.0, 30.0), 70.0);
        assert_eq!(remaining_seconds(100.0, 130.0), 0.0);
    }
}
