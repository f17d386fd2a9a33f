//! Conversion between filesystem times and ZIP entry timestamps.
//!
//! ZIP stores MS-DOS date/time fields: local wall-clock time, two-second
//! resolution, years 1980 through 2107. Times outside that range fall back to
//! the format's minimum.

use std::time::SystemTime;

use chrono::Datelike;
use chrono::Local;
use chrono::NaiveDate;
use chrono::TimeZone;
use chrono::Timelike;

/// Converts a filesystem time to a ZIP timestamp.
///
/// Returns `None` when the time cannot be represented in the DOS range.
#[must_use]
pub fn to_zip_datetime(time: SystemTime) -> Option<zip::DateTime> {
    let local: chrono::DateTime<Local> = chrono::DateTime::from(time);
    zip::DateTime::from_date_and_time(
        u16::try_from(local.year()).ok()?,
        u8::try_from(local.month()).ok()?,
        u8::try_from(local.day()).ok()?,
        u8::try_from(local.hour()).ok()?,
        u8::try_from(local.minute()).ok()?,
        u8::try_from(local.second()).ok()?,
    )
    .ok()
}

/// Converts a ZIP timestamp to a filesystem time.
///
/// Returns `None` if the stored fields do not form a valid local time.
#[must_use]
pub fn from_zip_datetime(dt: zip::DateTime) -> Option<SystemTime> {
    let naive = NaiveDate::from_ymd_opt(
        i32::from(dt.year()),
        u32::from(dt.month()),
        u32::from(dt.day()),
    )?
    .and_hms_opt(
        u32::from(dt.hour()),
        u32::from(dt.minute()),
        u32::from(dt.second()),
    )?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(SystemTime::from(local))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_round_trip_even_seconds() {
        // 2021-03-04T05:06:08Z
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(1_614_834_368);
        let dt = to_zip_datetime(time).unwrap();
        assert_eq!(from_zip_datetime(dt).unwrap(), time);
    }

    #[test]
    fn test_odd_seconds_truncate_to_two_second_grid() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(1_614_834_369);
        let back = from_zip_datetime(to_zip_datetime(time).unwrap()).unwrap();
        let diff = time.duration_since(back).unwrap();
        assert!(diff <= Duration::from_secs(2));
    }

    #[test]
    fn test_sub_second_precision_dropped() {
        let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_614_834_368);
        let time = base + Duration::from_millis(750);
        let back = from_zip_datetime(to_zip_datetime(time).unwrap()).unwrap();
        assert_eq!(back, base);
    }

    #[test]
    fn test_before_dos_epoch_is_unrepresentable() {
        assert!(to_zip_datetime(SystemTime::UNIX_EPOCH).is_none());
    }
}
