//! Wall-clock readings in IANA time zones.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Local time in the zone, second precision, `Z`-suffixed.
    pub current_datetime: String,
    pub timezone: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown time zone: {0}")]
pub struct UnknownZone(pub String);

pub fn now_in(timezone: &str) -> Result<Reading, UnknownZone> {
    reading_at(Utc::now(), timezone)
}

pub fn reading_at(instant: DateTime<Utc>, timezone: &str) -> Result<Reading, UnknownZone> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| UnknownZone(timezone.to_string()))?;
    let local = instant.with_timezone(&tz);
    Ok(Reading {
        current_datetime: local.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        timezone: timezone.to_string(),
        timestamp: instant.timestamp_millis(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 30, 5).unwrap()
    }

    #[test]
    fn utc_reading() {
        let reading = reading_at(instant(), "UTC").unwrap();
        assert_eq!(reading.current_datetime, "2026-10-19T12:30:05Z");
        assert_eq!(reading.timezone, "UTC");
        assert_eq!(reading.timestamp, instant().timestamp_millis());
    }

    #[test]
    fn local_time_of_the_zone() {
        let reading = reading_at(instant(), "Europe/Moscow").unwrap();
        assert_eq!(reading.current_datetime, "2026-10-19T15:30:05Z");
        assert_eq!(reading.timestamp, instant().timestamp_millis());
    }

    #[test]
    fn unknown_zone_is_rejected() {
        assert_eq!(
            reading_at(instant(), "Mars/Olympus").unwrap_err(),
            UnknownZone("Mars/Olympus".into())
        );
    }
}
