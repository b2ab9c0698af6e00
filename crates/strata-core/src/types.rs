use derive_more::{Add, AddAssign, Display, FromStr, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    sync::OnceLock,
};
use time::{
    Date as TimeDate, Duration as TimeDuration, Month, OffsetDateTime,
    format_description::{self, FormatItem, well_known::Rfc3339},
};

static DATE_FORMAT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();

///
/// Float64
///
/// Finite f64 only; -0.0 canonically stored as 0.0
///

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, Display, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Float64(f64);

impl Float64 {
    #[must_use]
    /// Fallible constructor that rejects non-finite values and normalizes -0.0.
    pub fn try_new(v: f64) -> Option<Self> {
        if !v.is_finite() {
            return None;
        }

        // canonicalize -0.0 to 0.0 so Eq/Hash/Ord are consistent
        Some(Self(if v == 0.0 { 0.0 } else { v }))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Eq for Float64 {}

impl PartialEq for Float64 {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Ord for Float64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Float64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Float64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for Float64 {
    type Error = NonFiniteFloatError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Self::try_new(v).ok_or(NonFiniteFloatError)
    }
}

impl From<Float64> for f64 {
    fn from(x: Float64) -> Self {
        x.0
    }
}

///
/// NonFiniteFloatError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("non-finite f64")]
pub struct NonFiniteFloatError;

///
/// Timestamp
/// (in seconds)
///

#[derive(
    Add,
    AddAssign,
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    FromStr,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    Sub,
    SubAssign,
)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(u64::MIN);
    pub const MAX: Self = Self(u64::MAX);

    /// Construct from seconds.
    #[must_use]
    pub const fn from_seconds(secs: u64) -> Self {
        Self(secs)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[allow(clippy::cast_sign_loss)]
    pub fn parse_rfc3339(s: &str) -> Result<Self, TimeParseError> {
        let dt = OffsetDateTime::parse(s, &Rfc3339)
            .map_err(|e| TimeParseError::Format(e.to_string()))?;
        let ts = dt.unix_timestamp();
        if ts < 0 {
            return Err(TimeParseError::BeforeEpoch);
        }

        Ok(Self(ts as u64))
    }

    /// RFC 3339 rendering; `None` when the value does not fit a calendar date.
    #[must_use]
    pub fn to_rfc3339(self) -> Option<String> {
        let secs = i64::try_from(self.0).ok()?;
        let dt = OffsetDateTime::from_unix_timestamp(secs).ok()?;
        dt.format(&Rfc3339).ok()
    }
}

///
/// Date
/// days since the Unix epoch
///

#[derive(
    Add,
    AddAssign,
    Clone,
    Copy,
    Default,
    Eq,
    FromStr,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    Sub,
    SubAssign,
)]
#[repr(transparent)]
pub struct Date(i32);

impl Date {
    pub const EPOCH: Self = Self(0);

    const fn epoch_date() -> TimeDate {
        // Safe: constant valid date
        match TimeDate::from_calendar_date(1970, Month::January, 1) {
            Ok(d) => d,
            Err(_) => unreachable!(),
        }
    }

    /// Calendar constructor; out-of-range components collapse to the epoch.
    #[must_use]
    pub fn new(y: i32, m: u8, d: u8) -> Self {
        let Ok(month) = Month::try_from(m.clamp(1, 12)) else {
            return Self::EPOCH;
        };

        match TimeDate::from_calendar_date(y, month, d) {
            Ok(date) => Self::from_time_date(date),
            Err(_) => Self::EPOCH,
        }
    }

    #[must_use]
    pub const fn from_days(days: i32) -> Self {
        Self(days)
    }

    #[must_use]
    pub const fn days(self) -> i32 {
        self.0
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_time_date(date: TimeDate) -> Self {
        let days = (date - Self::epoch_date()).whole_days() as i32;
        Self(days)
    }

    fn to_time_date(self) -> TimeDate {
        Self::epoch_date()
            .checked_add(TimeDuration::days(i64::from(self.0)))
            .unwrap_or_else(Self::epoch_date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = DATE_FORMAT.get_or_init(|| {
            format_description::parse("[year]-[month]-[day]")
                .expect("date format description is valid")
        });

        match self.to_time_date().format(format) {
            Ok(s) => write!(f, "{s}"),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

impl Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({self})")
    }
}

///
/// TimeParseError
///

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TimeParseError {
    #[error("timestamp parse error: {0}")]
    Format(String),

    #[error("timestamp before epoch")]
    BeforeEpoch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float64_rejects_non_finite() {
        assert!(Float64::try_new(f64::NAN).is_none());
        assert!(Float64::try_new(f64::INFINITY).is_none());
        assert_eq!(Float64::try_new(-0.0), Float64::try_new(0.0));
    }

    #[test]
    fn timestamp_rfc3339_round_trip() {
        let ts = Timestamp::parse_rfc3339("2024-05-01T12:30:00Z").unwrap();
        assert_eq!(ts.to_rfc3339().unwrap(), "2024-05-01T12:30:00Z");
    }

    #[test]
    fn timestamp_rejects_pre_epoch() {
        let err = Timestamp::parse_rfc3339("1960-01-01T00:00:00Z").unwrap_err();
        assert_eq!(err, TimeParseError::BeforeEpoch);
    }

    #[test]
    fn date_calendar_round_trip() {
        let date = Date::new(2024, 1, 2);
        assert_eq!(date.to_string(), "2024-01-02");
        assert_eq!(Date::new(1970, 1, 1), Date::EPOCH);
    }

    #[test]
    fn date_rejects_invalid_calendar_day() {
        assert_eq!(Date::new(2024, 2, 31), Date::EPOCH);
    }
}
