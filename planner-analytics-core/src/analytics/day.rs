use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use super::DateKeyError;

/// `strftime` pattern of a day key, e.g. `29.01.2025`.
pub const DAY_FORMAT: &str = "%d.%m.%Y";

/// Format a calendar day as `DD.MM.YYYY`.
pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Parse a `DD.MM.YYYY` day key.
pub fn parse_day(key: &str) -> Result<NaiveDate, DateKeyError> {
    NaiveDate::parse_from_str(key.trim(), DAY_FORMAT)
        .map_err(|_| DateKeyError::Invalid(key.to_string()))
}

/// Midnight UTC at the start of `date`.
pub fn day_to_instant(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

pub(crate) mod serde_day {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_day(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        super::parse_day(&key).map_err(de::Error::custom)
    }
}
