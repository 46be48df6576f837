//! Human-readable pod uptime.

use chrono::{DateTime, Utc};

/// Format elapsed seconds using the two most significant units.
///
/// ```
/// use ztr_dashboard::cluster::format_uptime;
///
/// assert_eq!(format_uptime(45), "45s");
/// assert_eq!(format_uptime(90), "1m 30s");
/// assert_eq!(format_uptime(3661), "1h 1m");
/// assert_eq!(format_uptime(90_000), "1d 1h");
/// ```
///
/// Negative input (a start time in the future due to clock skew) clamps to
/// `"0s"`.
pub fn format_uptime(elapsed_secs: i64) -> String {
    let seconds = elapsed_secs.max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

/// Uptime of something started at `start`, observed at `now`.
pub fn uptime_since(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_uptime((now - start).num_seconds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    #[test]
    fn test_format_uptime_examples() {
        assert_eq!(format_uptime(0), "0s");
        assert_eq!(format_uptime(45), "45s");
        assert_eq!(format_uptime(60), "1m 0s");
        assert_eq!(format_uptime(90), "1m 30s");
        assert_eq!(format_uptime(3600), "1h 0m");
        assert_eq!(format_uptime(3661), "1h 1m");
        assert_eq!(format_uptime(86_399), "23h 59m");
        assert_eq!(format_uptime(86_400), "1d 0h");
        assert_eq!(format_uptime(90_000), "1d 1h");
    }

    #[test]
    fn test_format_uptime_clamps_negative() {
        assert_eq!(format_uptime(-5), "0s");
        assert_eq!(format_uptime(i64::MIN), "0s");
    }

    #[test]
    fn test_uptime_since() {
        let now = Utc::now();
        assert_eq!(uptime_since(now - Duration::seconds(3661), now), "1h 1m");
        assert_eq!(uptime_since(now + Duration::seconds(30), now), "0s");
    }

    proptest! {
        #[test]
        fn prop_format_uptime_has_valid_shape(secs in 0i64..10_000_000) {
            let text = format_uptime(secs);
            let parts: Vec<&str> = text.split(' ').collect();
            prop_assert!(parts.len() == 1 || parts.len() == 2);
            if secs < 60 {
                prop_assert_eq!(&text, &format!("{}s", secs));
            } else {
                prop_assert_eq!(parts.len(), 2);
            }
        }

        #[test]
        fn prop_format_uptime_remainders_in_range(secs in 60i64..10_000_000) {
            let text = format_uptime(secs);
            let second = text.split(' ').nth(1).unwrap();
            let (value, unit) = second.split_at(second.len() - 1);
            let value: i64 = value.parse().unwrap();
            let limit = match unit {
                "h" => 24,
                "m" | "s" => 60,
                other => panic!("unexpected unit {}", other),
            };
            prop_assert!(value < limit);
        }
    }
}
