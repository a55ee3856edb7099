use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

/// Week-grid helpers for the Monday-start season calendar.
///
/// Weeks run Monday through Sunday, seven days each. Some product copy
/// describes Sunday as a separate "results day" outside the scoring week;
/// the engine preserves the observed Monday-start, 7-day behavior and
/// leaves that boundary question open.
pub struct TimingService;

impl Default for TimingService {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingService {
    pub fn new() -> Self {
        Self
    }

    /// The next Monday at 00:00 UTC strictly after (or on, if `from` is
    /// already a Monday midnight) the given instant. Used as the season
    /// start date when a roster fills.
    pub fn next_monday(&self, from: DateTime<Utc>) -> DateTime<Utc> {
        let days_ahead = match from.weekday() {
            Weekday::Mon => 7,
            w => 7 - w.num_days_from_monday() as i64,
        };
        let monday = from.date_naive() + Duration::days(days_ahead);
        let midnight = monday
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always a valid time");
        DateTime::from_naive_utc_and_offset(midnight, Utc)
    }

    /// 1-indexed season week containing `now`. Instants before the start
    /// date are reported as week 1.
    pub fn week_number_for(&self, start_date: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
        if now < start_date {
            return 1;
        }
        (now - start_date).num_weeks() as u32 + 1
    }

    /// Half-open bounds `[start, end)` of a 1-indexed season week.
    pub fn week_bounds(
        &self,
        start_date: DateTime<Utc>,
        week: u32,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = start_date + Duration::weeks(week as i64 - 1);
        (start, start + Duration::weeks(1))
    }

    /// Whole days elapsed in the current week, counting the in-progress
    /// day; 1..=7 within a running week. This is the `days_elapsed` feed
    /// for score projection, which requires a non-zero value.
    pub fn days_elapsed_in_week(&self, start_date: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
        let week = self.week_number_for(start_date, now);
        let (week_start, _) = self.week_bounds(start_date, week);
        if now < week_start {
            return 1;
        }
        ((now - week_start).num_days() as u32 + 1).min(7)
    }

    /// Whole days left in the current week, 0..=6.
    pub fn days_remaining_in_week(&self, start_date: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
        7 - self.days_elapsed_in_week(start_date, now)
    }
}
