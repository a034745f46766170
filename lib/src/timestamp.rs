//! Appliance timestamp handling.
//!
//! Timestamps from the appliance are `UTC` with a fixed length fractional seconds and zone
//! suffix (`2019-03-11T18:22:41.000Z`). They are shown in the cluster timezone.

use super::*;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The length of the `.000Z` suffix that is dropped.
const SUFFIX_LEN: usize = 5;

/// The format of a timestamp once the suffix has been dropped.
const API_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// How localized timestamps are shown.
const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an appliance timestamp.
///
/// # Arguments
///
/// * `timestamp` is the `UTC` timestamp from the appliance.
pub fn parse_utc(timestamp: &str) -> Result<DateTime<Utc>> {
    let end = timestamp.len().checked_sub(SUFFIX_LEN).filter(|end| timestamp.is_char_boundary(*end));
    match end {
        None => Err(Error::Failed(format!("timestamp: '{timestamp}' is too short"))),
        Some(end) => {
            let naive = NaiveDateTime::parse_from_str(&timestamp[..end], API_FORMAT)
                .map_err(|err| Error::Failed(format!("timestamp: '{timestamp}' {err}")))?;
            Ok(Utc.from_utc_datetime(&naive))
        }
    }
}

/// Convert an appliance timestamp to the wall clock time of a timezone.
///
/// The result does not include the timezone offset.
///
/// # Arguments
///
/// * `timestamp` is the `UTC` timestamp from the appliance.
/// * `tz` is the timezone the timestamp will be shown in.
pub fn to_local(timestamp: &str, tz: &Tz) -> Result<String> {
    let utc = parse_utc(timestamp)?;
    Ok(utc.with_timezone(tz).format(LOCAL_FORMAT).to_string())
}

/// Parse the cluster timezone name.
///
/// # Arguments
///
/// * `name` is the `IANA` timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>().map_err(|err| Error::Failed(format!("timezone: '{name}' {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn local() {
        // no daylight saving time in Phoenix
        let tz = parse_timezone("America/Phoenix").unwrap();
        assert_eq!(to_local("2019-03-11T18:22:41.000Z", &tz).unwrap(), "2019-03-11 11:22:41");
        assert_eq!(to_local("2019-01-01T03:00:00.000Z", &tz).unwrap(), "2018-12-31 20:00:00");
        let tz = parse_timezone("Etc/GMT-2").unwrap();
        assert_eq!(to_local("2019-12-31T23:30:00.123Z", &tz).unwrap(), "2020-01-01 01:30:00");
        let tz = parse_timezone("UTC").unwrap();
        assert_eq!(to_local("2020-06-01T12:00:00.000Z", &tz).unwrap(), "2020-06-01 12:00:00");
    }

    #[test]
    fn daylight_saving() {
        let tz = parse_timezone("America/Los_Angeles").unwrap();
        assert_eq!(to_local("2021-01-15T20:00:00.000Z", &tz).unwrap(), "2021-01-15 12:00:00");
        assert_eq!(to_local("2021-07-15T20:00:00.000Z", &tz).unwrap(), "2021-07-15 13:00:00");
    }

    #[test]
    fn malformed() {
        let tz = parse_timezone("UTC").unwrap();
        assert!(to_local("", &tz).is_err());
        assert!(to_local(".000Z", &tz).is_err());
        assert!(to_local("2019-03-11 18:22:41.000Z", &tz).is_err());
        assert!(to_local("2019-03-11T18:22:41", &tz).is_err());
        assert!(parse_utc("2019-03-11T18:22:4€.000").is_err());
    }

    #[test]
    fn timezone() {
        assert_eq!(parse_timezone("America/New_York").unwrap(), Tz::America__New_York);
        assert!(parse_timezone("Mars/Olympus_Mons").is_err());
    }
}
