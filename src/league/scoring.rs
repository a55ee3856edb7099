use serde::{Deserialize, Serialize};

use crate::models::metrics::{HealthMetrics, ScoringConfig, ScoringWeights};

/// Per-read ceilings applied during sanitation. Device health reads are
/// occasionally corrupt by orders of magnitude; clamping keeps a single
/// bad read from dominating a season.
pub const MAX_STEPS: f64 = 200_000.0;
pub const MAX_SLEEP_HOURS: f64 = 24.0;
pub const MAX_CALORIES: f64 = 10_000.0;
pub const MAX_WORKOUT_MINUTES: f64 = 480.0;
pub const MAX_STAND_HOURS: f64 = 24.0;
pub const MAX_DISTANCE_MILES: f64 = 100.0;

fn clean(value: f64) -> f64 {
    if !value.is_finite() || value < 0.0 {
        0.0
    } else {
        value
    }
}

fn clean_clamped(value: f64, max: f64) -> f64 {
    clean(value).min(max)
}

/// Sanitize one externally-sourced metrics read: non-finite and negative
/// values become 0, then each metric is clamped to its per-read ceiling.
/// Idempotent. This is the single entry point for raw device data; every
/// metrics value scored or stored must pass through here first.
pub fn sanitize(metrics: &HealthMetrics) -> HealthMetrics {
    HealthMetrics {
        steps: clean_clamped(metrics.steps, MAX_STEPS),
        sleep_hours: clean_clamped(metrics.sleep_hours, MAX_SLEEP_HOURS),
        calories: clean_clamped(metrics.calories, MAX_CALORIES),
        workout_minutes: clean_clamped(metrics.workout_minutes, MAX_WORKOUT_MINUTES),
        stand_hours: clean_clamped(metrics.stand_hours, MAX_STAND_HOURS),
        distance_miles: clean_clamped(metrics.distance_miles, MAX_DISTANCE_MILES),
    }
}

/// Sum daily reads into one weekly metrics record. Each day is sanitized
/// before summing; an empty list yields all-zero metrics, not an error.
pub fn aggregate_weekly_metrics(daily_metrics: &[HealthMetrics]) -> HealthMetrics {
    daily_metrics.iter().map(sanitize).fold(
        HealthMetrics::zero(),
        |acc, day| HealthMetrics {
            steps: acc.steps + day.steps,
            sleep_hours: acc.sleep_hours + day.sleep_hours,
            calories: acc.calories + day.calories,
            workout_minutes: acc.workout_minutes + day.workout_minutes,
            stand_hours: acc.stand_hours + day.stand_hours,
            distance_miles: acc.distance_miles + day.distance_miles,
        },
    )
}

/// Convert metrics into a single point value under the resolved weights:
/// steps/1000 and calories/100 are weighted per block, the rest per unit.
///
/// Non-finite and negative inputs are coerced to 0 here as well, but the
/// per-read ceilings are not re-applied: weekly aggregates legitimately
/// exceed them (seven days of sleep is well over 24 hours).
pub fn calculate_points(metrics: &HealthMetrics, config: Option<&ScoringConfig>) -> f64 {
    let w = ScoringWeights::resolve(config);
    clean(metrics.steps) / 1000.0 * w.steps
        + clean(metrics.sleep_hours) * w.sleep_hours
        + clean(metrics.calories) / 100.0 * w.calories
        + clean(metrics.workout_minutes) * w.workout_minutes
        + clean(metrics.stand_hours) * w.stand_hours
        + clean(metrics.distance_miles) * w.distance_miles
}

/// Per-metric point contributions plus total, for score detail displays.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct PointsBreakdown {
    pub steps: f64,
    pub sleep_hours: f64,
    pub calories: f64,
    pub workout_minutes: f64,
    pub stand_hours: f64,
    pub distance_miles: f64,
    pub total: f64,
}

impl PointsBreakdown {
    pub fn component_sum(&self) -> f64 {
        self.steps
            + self.sleep_hours
            + self.calories
            + self.workout_minutes
            + self.stand_hours
            + self.distance_miles
    }
}

/// Break a score into its per-metric contributions. The components sum to
/// `calculate_points` for the same inputs within 1e-2; callers may rely on
/// that invariant, and `debug_assert!` enforces it.
pub fn points_breakdown(
    metrics: &HealthMetrics,
    config: Option<&ScoringConfig>,
) -> PointsBreakdown {
    let w = ScoringWeights::resolve(config);
    let breakdown = PointsBreakdown {
        steps: clean(metrics.steps) / 1000.0 * w.steps,
        sleep_hours: clean(metrics.sleep_hours) * w.sleep_hours,
        calories: clean(metrics.calories) / 100.0 * w.calories,
        workout_minutes: clean(metrics.workout_minutes) * w.workout_minutes,
        stand_hours: clean(metrics.stand_hours) * w.stand_hours,
        distance_miles: clean(metrics.distance_miles) * w.distance_miles,
        total: calculate_points(metrics, config),
    };
    debug_assert!((breakdown.component_sum() - breakdown.total).abs() < 1e-2);
    breakdown
}

/// Linearly extrapolate a full-week score from a partial week.
/// `days_elapsed` must be at least 1; the caller guards the zero case
/// (nothing meaningful can be projected from no elapsed days).
pub fn project_weekly_score(
    partial_metrics: &HealthMetrics,
    days_elapsed: u32,
    config: Option<&ScoringConfig>,
) -> f64 {
    debug_assert!(days_elapsed > 0, "caller must guard days_elapsed == 0");
    calculate_points(partial_metrics, config) / days_elapsed as f64 * 7.0
}
