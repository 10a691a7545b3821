//! "Time since" prose for computed variables

use super::sources::TimeSinceFormatter;
use chrono::{DateTime, Utc};

/// Formats elapsed time against the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeTimeFormatter;

impl TimeSinceFormatter for RelativeTimeFormatter {
    fn format_time_since(&self, timestamp: DateTime<Utc>) -> String {
        format_elapsed(timestamp, Utc::now())
    }
}

/// Describe the time between `from` and `now`, coarsely
///
/// Timestamps in the future are treated as "less than a day".
pub fn format_elapsed(from: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - from).num_days();

    match days {
        d if d < 1 => "less than a day".to_string(),
        1 => "a day".to_string(),
        d if d < 7 => format!("{} days", d),
        d if d < 14 => "a week".to_string(),
        d if d < 30 => format!("{} weeks", d / 7),
        d if d < 60 => "a month".to_string(),
        d if d < 365 => format!("{} months", d / 30),
        d if d < 730 => "over a year".to_string(),
        d => format!("over {} years", d / 365),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(days: i64) -> String {
        let now = Utc::now();
        format_elapsed(now - Duration::days(days), now)
    }

    #[test]
    fn test_short_spans() {
        assert_eq!(ago(0), "less than a day");
        assert_eq!(ago(1), "a day");
        assert_eq!(ago(5), "5 days");
        assert_eq!(ago(10), "a week");
        assert_eq!(ago(21), "3 weeks");
    }

    #[test]
    fn test_long_spans() {
        assert_eq!(ago(45), "a month");
        assert_eq!(ago(200), "6 months");
        assert_eq!(ago(400), "over a year");
        assert_eq!(ago(1100), "over 3 years");
    }

    #[test]
    fn test_future_timestamp() {
        let now = Utc::now();
        assert_eq!(format_elapsed(now + Duration::days(3), now), "less than a day");
    }
}
