use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw fitness metrics for one member over one day (or, after
/// aggregation, one week). Values arrive from device sync unvalidated;
/// `league::scoring::sanitize` is the single entry point that makes them
/// safe to score and store.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct HealthMetrics {
    pub steps: f64,
    pub sleep_hours: f64,
    pub calories: f64,
    pub workout_minutes: f64,
    pub stand_hours: f64,
    pub distance_miles: f64,
}

impl HealthMetrics {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// A member's sanitized metrics and derived points for one week.
/// Immutable once written except by a resync that fully replaces it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeeklyScore {
    pub member_id: Uuid,
    pub week_number: u32,
    pub metrics: HealthMetrics,
    pub total_points: f64,
}

/// Per-league partial override of the scoring weights, supplied at league
/// creation. Any weight left `None` falls back to the default.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct ScoringConfig {
    pub steps: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub calories: Option<f64>,
    pub workout_minutes: Option<f64>,
    pub stand_hours: Option<f64>,
    pub distance_miles: Option<f64>,
}

/// Fully resolved scoring weights. Steps are weighted per 1000 steps and
/// calories per 100 kcal; the other metrics per unit.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub steps: f64,
    pub sleep_hours: f64,
    pub calories: f64,
    pub workout_minutes: f64,
    pub stand_hours: f64,
    pub distance_miles: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            steps: 1.0,
            sleep_hours: 2.0,
            calories: 5.0,
            workout_minutes: 0.2,
            stand_hours: 5.0,
            distance_miles: 3.0,
        }
    }
}

impl ScoringWeights {
    /// Merge an optional partial override over the defaults, resolved once
    /// at read time rather than threaded ad hoc through the formula.
    pub fn resolve(config: Option<&ScoringConfig>) -> Self {
        let defaults = Self::default();
        match config {
            None => defaults,
            Some(c) => Self {
                steps: c.steps.unwrap_or(defaults.steps),
                sleep_hours: c.sleep_hours.unwrap_or(defaults.sleep_hours),
                calories: c.calories.unwrap_or(defaults.calories),
                workout_minutes: c.workout_minutes.unwrap_or(defaults.workout_minutes),
                stand_hours: c.stand_hours.unwrap_or(defaults.stand_hours),
                distance_miles: c.distance_miles.unwrap_or(defaults.distance_miles),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_without_config_uses_defaults() {
        assert_eq!(ScoringWeights::resolve(None), ScoringWeights::default());
    }

    #[test]
    fn resolve_merges_partial_override() {
        let config = ScoringConfig {
            sleep_hours: Some(4.0),
            distance_miles: Some(0.0),
            ..Default::default()
        };
        let weights = ScoringWeights::resolve(Some(&config));
        assert_eq!(weights.sleep_hours, 4.0);
        assert_eq!(weights.distance_miles, 0.0);
        assert_eq!(weights.steps, 1.0);
        assert_eq!(weights.calories, 5.0);
    }
}
