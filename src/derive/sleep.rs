//! Sleep schedule arithmetic on a 24-hour clock.
//!
//! Times carry no date; a wake time earlier than the bedtime means
//! "next day" and callers track that themselves.

use chrono::{NaiveTime, TimeDelta, Timelike};

const CLOCK_FORMAT: &str = "%H:%M";

/// Parse an `HH:MM` clock string.
pub fn parse_clock(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), CLOCK_FORMAT).ok()
}

/// Format a time as `HH:MM`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Whole minutes folded onto one day. Non-finite input maps to zero.
fn hours_to_delta(hours: f64) -> TimeDelta {
    let minutes = if hours.is_finite() {
        (hours * 60.0).round() as i64
    } else {
        0
    };
    TimeDelta::minutes(minutes.rem_euclid(24 * 60))
}

/// `bedtime + hours`, wrapping past midnight.
pub fn wake_time(bedtime: NaiveTime, hours: f64) -> NaiveTime {
    let (wake, _) = bedtime.overflowing_add_signed(hours_to_delta(hours));
    wake
}

/// Whether sleeping from `bedtime` to `wake` spans midnight.
pub fn crosses_midnight(bedtime: NaiveTime, wake: NaiveTime) -> bool {
    wake <= bedtime
}

/// Hours slept between two clock times, assuming less than 24 hours.
pub fn sleep_duration_hours(bedtime: NaiveTime, wake: NaiveTime) -> f64 {
    let bed_min = i64::from(bedtime.num_seconds_from_midnight() / 60);
    let wake_min = i64::from(wake.num_seconds_from_midnight() / 60);
    let minutes = (wake_min - bed_min).rem_euclid(24 * 60);
    minutes as f64 / 60.0
}

/// `wake_time` over clock strings. `None` if `bedtime` is not `HH:MM`.
pub fn wake_time_str(bedtime: &str, hours: f64) -> Option<String> {
    parse_clock(bedtime).map(|bed| format_clock(wake_time(bed, hours)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_past_midnight() {
        assert_eq!(wake_time_str("23:00", 8.0).as_deref(), Some("07:00"));
    }

    #[test]
    fn same_day_wake() {
        assert_eq!(wake_time_str("01:30", 7.5).as_deref(), Some("09:00"));
    }

    #[test]
    fn fractional_hours_round_to_minutes() {
        assert_eq!(wake_time_str("22:15", 7.25).as_deref(), Some("05:30"));
    }

    #[test]
    fn bad_clock_is_rejected() {
        assert!(wake_time_str("25:00", 8.0).is_none());
        assert!(wake_time_str("late", 8.0).is_none());
    }

    #[test]
    fn out_of_range_hours_do_not_panic() {
        let bed = parse_clock("23:00").unwrap();
        assert_eq!(wake_time(bed, f64::NAN), bed);
        assert_eq!(wake_time(bed, f64::INFINITY), bed);
        assert_eq!(wake_time(bed, f64::NEG_INFINITY), bed);
        // Saturates to i64::MAX minutes, then folds onto the clock.
        let _ = wake_time(bed, 1e300);
        let _ = wake_time(bed, -1e300);
        assert_eq!(wake_time(bed, 32.0), wake_time(bed, 8.0));
        assert_eq!(wake_time_str("07:00", -8.0).as_deref(), Some("23:00"));
    }

    #[test]
    fn duration_across_midnight() {
        let bed = parse_clock("23:30").unwrap();
        let wake = parse_clock("07:00").unwrap();
        assert!(crosses_midnight(bed, wake));
        assert!((sleep_duration_hours(bed, wake) - 7.5).abs() < 1e-9);
    }
}
