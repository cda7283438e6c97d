use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::SrsError;

/// Lower bound on the easiness factor.
pub const MIN_EASINESS: f64 = 1.3;
/// Easiness factor assigned to a never-reviewed word.
pub const DEFAULT_EASINESS: f64 = 2.5;
/// Highest recall grade.
pub const MAX_QUALITY: u8 = 5;
/// Recall grade at or above which a review counts as a success.
const SUCCESS_THRESHOLD: u8 = 3;

/// Review state of a single word, following the SM-2 field conventions.
///
/// A fresh entry has `repetitions = 0`, `interval = 0` and `next_review` set
/// to its creation instant, which makes the word immediately due. Invariants
/// after any number of reviews: `easiness >= 1.3` and `interval >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// Consecutive successful recalls since the last lapse.
    pub repetitions: u32,
    /// Days until the next review.
    pub interval: u32,
    pub easiness: f64,
    pub next_review: DateTime<Utc>,
}

impl ReviewState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            repetitions: 0,
            interval: 0,
            easiness: DEFAULT_EASINESS,
            next_review: now,
        }
    }

    /// Rebuilds a state from an untyped persisted value.
    ///
    /// Absent or malformed fields fall back to the fresh-entry defaults
    /// (with `next_review = now`) so one corrupt entry never fails the whole
    /// collection load.
    pub fn from_value(value: &serde_json::Value, now: DateTime<Utc>) -> Self {
        let repetitions = value
            .get("repetitions")
            .and_then(|v| v.as_u64())
            .map_or(0, |v| v.min(u64::from(u32::MAX)) as u32);
        let interval = value
            .get("interval")
            .and_then(|v| v.as_u64())
            .map_or(0, |v| v.min(u64::from(u32::MAX)) as u32);
        let easiness = value
            .get("easiness")
            .and_then(|v| v.as_f64())
            .filter(|e| e.is_finite())
            .unwrap_or(DEFAULT_EASINESS);
        let next_review = value
            .get("nextReview")
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map_or(now, |dt| dt.with_timezone(&Utc));

        Self {
            repetitions,
            interval,
            easiness,
            next_review,
        }
    }

    /// Applies one review outcome and returns the new due instant.
    ///
    /// `quality` grades the recall from 0 (total failure) to 5 (perfect).
    /// A grade below 3 is a lapse: the word drops back to a one-day interval
    /// with its repetition streak cleared. A success grows the interval
    /// through the fixed 1-day / 6-day steps and then multiplicatively by
    /// the easiness factor. The easiness adjustment applies on both paths
    /// and never drops below [`MIN_EASINESS`].
    ///
    /// Out-of-range grades are rejected rather than clamped; clamping would
    /// hide bugs in whatever reported the outcome.
    pub fn review(&mut self, quality: u8, now: DateTime<Utc>) -> Result<DateTime<Utc>, SrsError> {
        if quality > MAX_QUALITY {
            return Err(SrsError::InvalidQuality(quality));
        }

        if quality < SUCCESS_THRESHOLD {
            self.repetitions = 0;
            self.interval = 1;
        } else {
            // Interval growth uses the easiness held before this review.
            // The floor keeps the `interval >= 1 once reviewed` invariant
            // even when the prior interval was a defaulted zero.
            self.interval = match self.repetitions {
                0 => 1,
                1 => 6,
                _ => ((f64::from(self.interval) * self.easiness).round() as u32).max(1),
            };
            self.repetitions += 1;
        }

        let miss = f64::from(MAX_QUALITY - quality);
        self.easiness = (self.easiness + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASINESS);

        self.next_review = now + Duration::days(i64::from(self.interval));
        Ok(self.next_review)
    }

    pub fn is_new(&self) -> bool {
        self.repetitions == 0
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap()
    }

    #[test]
    fn fresh_state_is_immediately_due() {
        let state = ReviewState::new(t0());
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.interval, 0);
        assert_eq!(state.easiness, DEFAULT_EASINESS);
        assert!(state.is_due(t0()));
        assert!(state.is_new());
    }

    #[test]
    fn first_and_second_success_use_fixed_intervals() {
        let mut state = ReviewState::new(t0());

        state.review(5, t0()).unwrap();
        assert_eq!(state.repetitions, 1);
        assert_eq!(state.interval, 1);
        assert_eq!(state.next_review, t0() + Duration::days(1));

        state.review(5, t0()).unwrap();
        assert_eq!(state.repetitions, 2);
        assert_eq!(state.interval, 6);
        assert_eq!(state.next_review, t0() + Duration::days(6));
    }

    #[test]
    fn third_success_multiplies_by_prior_easiness() {
        // repetitions=2, interval=6, easiness=2.5, one day overdue
        let mut state = ReviewState {
            repetitions: 2,
            interval: 6,
            easiness: 2.5,
            next_review: t0() - Duration::days(1),
        };

        let next = state.review(4, t0()).unwrap();

        // Quality 4 leaves easiness unchanged (delta is exactly zero), and
        // the interval is computed from the value held before the update.
        assert_eq!(state.repetitions, 3);
        assert_eq!(state.interval, 15);
        assert!((state.easiness - 2.5).abs() < 1e-9);
        assert_eq!(next, t0() + Duration::days(15));
    }

    #[test]
    fn lapse_resets_regardless_of_prior_state() {
        for quality in 0..3u8 {
            let mut state = ReviewState {
                repetitions: 7,
                interval: 120,
                easiness: 2.1,
                next_review: t0(),
            };
            state.review(quality, t0()).unwrap();
            assert_eq!(state.repetitions, 0, "quality {quality}");
            assert_eq!(state.interval, 1, "quality {quality}");
            assert_eq!(state.next_review, t0() + Duration::days(1));
        }
    }

    #[test]
    fn easiness_never_drops_below_floor() {
        let mut state = ReviewState::new(t0());
        for _ in 0..50 {
            state.review(0, t0()).unwrap();
            assert!(state.easiness >= MIN_EASINESS);
        }
        assert_eq!(state.easiness, MIN_EASINESS);
    }

    #[test]
    fn easiness_updates_on_success_too() {
        let mut state = ReviewState::new(t0());
        state.review(5, t0()).unwrap();
        assert!((state.easiness - 2.6).abs() < 1e-9);

        state.review(3, t0()).unwrap();
        // Delta for quality 3: 0.1 - 2*(0.08 + 2*0.02) = -0.14
        assert!((state.easiness - 2.46).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_quality_is_rejected_without_mutation() {
        let mut state = ReviewState::new(t0());
        let before = state.clone();
        assert_eq!(state.review(6, t0()), Err(SrsError::InvalidQuality(6)));
        assert_eq!(state, before);
    }

    #[test]
    fn interval_is_monotonic_over_a_success_streak() {
        let mut state = ReviewState::new(t0());
        let mut prev_interval = 0;
        for (step, quality) in [5u8, 5, 3, 4, 5, 4, 3].into_iter().enumerate() {
            state.review(quality, t0()).unwrap();
            assert!(state.interval >= prev_interval, "step {step}");
            assert_eq!(state.repetitions as usize, step + 1);
            prev_interval = state.interval;
        }
    }

    #[test]
    fn from_value_defaults_absent_and_malformed_fields() {
        let now = t0();

        let complete = serde_json::json!({
            "repetitions": 2,
            "interval": 6,
            "easiness": 2.4,
            "nextReview": "2024-03-01T00:00:00Z",
        });
        let state = ReviewState::from_value(&complete, now);
        assert_eq!(state.repetitions, 2);
        assert_eq!(state.interval, 6);
        assert!((state.easiness - 2.4).abs() < 1e-9);
        assert_eq!(
            state.next_review,
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );

        let broken = serde_json::json!({
            "repetitions": "two",
            "easiness": null,
            "nextReview": "not-a-timestamp",
        });
        let state = ReviewState::from_value(&broken, now);
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.interval, 0);
        assert_eq!(state.easiness, DEFAULT_EASINESS);
        assert_eq!(state.next_review, now);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let state = ReviewState {
            repetitions: 1,
            interval: 1,
            easiness: 2.6,
            next_review: t0(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("nextReview").is_some());
        assert!(json.get("repetitions").is_some());
        assert!(json.get("next_review").is_none());
    }
}
