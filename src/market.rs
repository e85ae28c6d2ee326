//! Market Hours
//!
//! NYSE regular trading session check. Holidays are not modelled.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::America::New_York;

/// Session open, minutes after midnight Eastern (09:30).
const SESSION_OPEN_MINUTES: u32 = 9 * 60 + 30;
/// Session close, minutes after midnight Eastern (16:00, exclusive).
const SESSION_CLOSE_MINUTES: u32 = 16 * 60;

/// Returns true when `now` falls inside Mon–Fri 09:30–16:00 America/New_York.
pub fn is_market_open_at(now: DateTime<Utc>) -> bool {
    let local = now.with_timezone(&New_York);

    if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }

    let minutes = local.hour() * 60 + local.minute();
    (SESSION_OPEN_MINUTES..SESSION_CLOSE_MINUTES).contains(&minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_open_mid_morning_wednesday_winter() {
        // 2024-01-10 is a Wednesday; 15:00 UTC is 10:00 EST.
        assert!(is_market_open_at(utc(2024, 1, 10, 15, 0)));
    }

    #[test]
    fn test_closed_in_the_evening() {
        // 20:00 EST on the same Wednesday.
        assert!(!is_market_open_at(utc(2024, 1, 11, 1, 0)));
    }

    #[test]
    fn test_session_boundaries() {
        assert!(!is_market_open_at(utc(2024, 1, 10, 14, 29)));
        assert!(is_market_open_at(utc(2024, 1, 10, 14, 30)));
        assert!(is_market_open_at(utc(2024, 1, 10, 20, 59)));
        assert!(!is_market_open_at(utc(2024, 1, 10, 21, 0)));
    }

    #[test]
    fn test_daylight_saving_offset() {
        // 2024-07-10 is a Wednesday under EDT (UTC-4).
        assert!(!is_market_open_at(utc(2024, 7, 10, 13, 0)));
        assert!(is_market_open_at(utc(2024, 7, 10, 14, 0)));
        assert!(!is_market_open_at(utc(2024, 7, 10, 20, 0)));
    }

    #[test]
    fn test_closed_on_weekends() {
        assert!(!is_market_open_at(utc(2024, 1, 13, 15, 0)));
        assert!(!is_market_open_at(utc(2024, 1, 14, 15, 0)));
    }
}
