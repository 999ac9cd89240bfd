use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, DateError};

/// Earliest year a `CalendarDate` can hold.
pub const MIN_YEAR: i32 = 1;
/// Latest year a `CalendarDate` can hold.
pub const MAX_YEAR: i32 = 9999;

pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// A year/month/day value with no time-of-day or time zone component.
///
/// Ordering is by (year, month, day). Serialized as an ISO `YYYY-MM-DD` string.
/// The year always lies in `MIN_YEAR..=MAX_YEAR`; every public constructor,
/// `FromStr` and `Deserialize` reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "NaiveDate", into = "NaiveDate")]
pub struct CalendarDate(NaiveDate);

pub(crate) fn supports_year(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

impl CalendarDate {
    /// Returns `None` when the day does not exist in that month (leap years
    /// included) or the year is outside `MIN_YEAR..=MAX_YEAR`.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(|naive| Self::try_from(naive).ok())
    }

    /// Skips the year check. Only for anchors, which are in range, and grid
    /// padding around the first and last supported months, which spills past
    /// the range and is never selectable.
    pub(crate) fn from_naive_unchecked(naive: NaiveDate) -> Self {
        Self(naive)
    }

    pub fn is_supported(&self) -> bool {
        supports_year(self.0.year())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().and_then(|next| Self::try_from(next).ok())
    }

    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().and_then(|prev| Self::try_from(prev).ok())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Consecutive days starting at (and including) this date, up to the
    /// last supported day.
    pub fn iter_days(&self) -> impl Iterator<Item = CalendarDate> {
        self.0
            .iter_days()
            .take_while(|day| supports_year(day.year()))
            .map(Self)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = DateError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        if supports_year(value.year()) {
            Ok(Self(value))
        } else {
            Err(DateError::YearOutOfRange(value.year()))
        }
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(value: CalendarDate) -> Self {
        value.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let naive = NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)?;
        Self::try_from(naive)
    }
}

/// A strftime pattern checked once at construction.
///
/// Display formats must round-trip: every date they format parses back to
/// the same date. Label formats only have to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
}

impl DateFormat {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let format = Self::for_labels(pattern).map_err(|_| ConfigError::DisplayFormat {
            pattern: pattern.to_string(),
            reason: "pattern cannot be rendered".to_string(),
        })?;
        for probe in probe_dates() {
            let rendered = format.try_format(probe).ok_or_else(|| ConfigError::DisplayFormat {
                pattern: pattern.to_string(),
                reason: "pattern cannot be rendered".to_string(),
            })?;
            if format.parse(&rendered) != Some(probe) {
                return Err(ConfigError::DisplayFormat {
                    pattern: pattern.to_string(),
                    reason: format!("\"{rendered}\" does not parse back to {probe}"),
                });
            }
        }
        Ok(format)
    }

    pub fn for_labels(pattern: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::LabelFormat(pattern.to_string());
        if pattern.trim().is_empty() || StrftimeItems::new(pattern).any(|item| item == Item::Error) {
            return Err(invalid());
        }
        let format = Self {
            pattern: pattern.to_string(),
        };
        for probe in probe_dates() {
            format.try_format(probe).ok_or_else(invalid)?;
        }
        Ok(format)
    }

    pub fn iso() -> Self {
        Self {
            pattern: ISO_FORMAT.to_string(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, date: CalendarDate) -> String {
        self.try_format(date).unwrap_or_else(|| date.to_string())
    }

    /// Parses trimmed text; `None` when it does not match the pattern, names
    /// a day that does not exist or falls outside the supported years.
    ///
    /// The text must be exactly what `format` would render (ASCII case aside),
    /// so a year still being typed ("03/15/20") is not read as year 20.
    pub fn parse(&self, text: &str) -> Option<CalendarDate> {
        let text = text.trim();
        let naive = NaiveDate::parse_from_str(text, &self.pattern).ok()?;
        let date = CalendarDate::try_from(naive).ok()?;
        let canonical = self.try_format(date)?;
        canonical.eq_ignore_ascii_case(text).then_some(date)
    }

    /// A rendered sample used in parse error messages.
    pub fn example(&self) -> String {
        match CalendarDate::from_ymd(2024, 12, 31) {
            Some(sample) => self.format(sample),
            None => self.pattern.clone(),
        }
    }

    fn try_format(&self, date: CalendarDate) -> Option<String> {
        let mut out = String::new();
        write!(
            out,
            "{}",
            date.0.format_with_items(StrftimeItems::new(&self.pattern))
        )
        .ok()?;
        Some(out)
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::iso()
    }
}

fn probe_dates() -> impl Iterator<Item = CalendarDate> {
    [(2024, 2, 29), (1999, 12, 31), (2031, 7, 4), (987, 1, 5)]
        .into_iter()
        .filter_map(|(y, m, d)| CalendarDate::from_ymd(y, m, d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn from_ymd_rejects_missing_days() {
        assert!(CalendarDate::from_ymd(2024, 2, 29).is_some());
        assert!(CalendarDate::from_ymd(2023, 2, 29).is_none());
        assert!(CalendarDate::from_ymd(2024, 4, 31).is_none());
        assert!(CalendarDate::from_ymd(2024, 13, 1).is_none());
    }

    #[test]
    fn year_is_limited_to_supported_range() {
        assert!(CalendarDate::from_ymd(0, 5, 5).is_none());
        assert!(CalendarDate::from_ymd(-44, 3, 15).is_none());
        assert!(CalendarDate::from_ymd(MAX_YEAR + 1, 1, 1).is_none());
        assert!(CalendarDate::from_ymd(MIN_YEAR, 1, 1).is_some());
        assert!(CalendarDate::from_ymd(MAX_YEAR, 12, 31).is_some());

        let naive = NaiveDate::from_ymd_opt(12345, 6, 7).unwrap();
        assert_eq!(
            CalendarDate::try_from(naive),
            Err(DateError::YearOutOfRange(12345))
        );
    }

    #[test]
    fn stepping_stops_at_the_edges_of_the_range() {
        assert_eq!(date(MAX_YEAR, 12, 31).succ(), None);
        assert_eq!(date(MIN_YEAR, 1, 1).pred(), None);
        assert_eq!(date(MAX_YEAR, 12, 30).iter_days().count(), 2);
    }

    #[test]
    fn ordering_is_by_year_month_day() {
        assert!(date(2023, 12, 31) < date(2024, 1, 1));
        assert!(date(2024, 1, 31) < date(2024, 2, 1));
        assert!(date(2024, 2, 1) < date(2024, 2, 2));
        assert_eq!(date(2024, 2, 2), date(2024, 2, 2));
    }

    #[test]
    fn display_and_from_str_use_iso() {
        let value = date(2024, 3, 5);
        assert_eq!(value.to_string(), "2024-03-05");
        assert_eq!(" 2024-03-05 ".parse::<CalendarDate>().unwrap(), value);
        assert!("2024-02-30".parse::<CalendarDate>().is_err());
        assert_eq!(
            "0000-05-05".parse::<CalendarDate>(),
            Err(DateError::YearOutOfRange(0))
        );
        assert!("+12345-06-07".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn serializes_as_iso_string() {
        let json = serde_json::to_string(&date(2024, 5, 10)).unwrap();
        assert_eq!(json, "\"2024-05-10\"");
        let back: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date(2024, 5, 10));
    }

    #[test]
    fn deserialize_rejects_unsupported_years() {
        assert!(serde_json::from_str::<CalendarDate>("\"0000-05-05\"").is_err());
        assert!(serde_json::from_str::<CalendarDate>("\"+12345-06-07\"").is_err());
        assert!(serde_json::from_str::<CalendarDate>("\"9999-12-31\"").is_ok());
    }

    #[test]
    fn display_format_accepts_round_trip_patterns() {
        assert!(DateFormat::new("%Y-%m-%d").is_ok());
        assert!(DateFormat::new("%m/%d/%Y").is_ok());
        assert!(DateFormat::new("%B %d, %Y").is_ok());
    }

    #[test]
    fn display_format_rejects_lossy_or_broken_patterns() {
        assert!(matches!(
            DateFormat::new("%B %Y"),
            Err(ConfigError::DisplayFormat { .. })
        ));
        assert!(DateFormat::new("%Q").is_err());
        assert!(DateFormat::new("%H:%M").is_err());
        assert!(DateFormat::new("").is_err());
    }

    #[test]
    fn label_format_only_needs_to_render() {
        let label = DateFormat::for_labels("%B %Y").unwrap();
        assert_eq!(label.format(date(2024, 3, 1)), "March 2024");
        assert!(DateFormat::for_labels("%H").is_err());
    }

    #[test]
    fn parse_trims_and_checks_pattern() {
        let format = DateFormat::new("%m/%d/%Y").unwrap();
        assert_eq!(format.parse(" 03/15/2024 "), Some(date(2024, 3, 15)));
        assert_eq!(format.parse("2024-03-15"), None);
        assert_eq!(format.parse("12/"), None);
        assert_eq!(format.parse("02/30/2024"), None);
    }

    #[test]
    fn parse_rejects_years_outside_the_range() {
        let iso = DateFormat::iso();
        assert_eq!(iso.parse("+12345-06-07"), None);
        assert_eq!(iso.parse("0000-05-05"), None);
        assert_eq!(iso.parse("9999-12-31"), Some(date(MAX_YEAR, 12, 31)));
    }

    #[test]
    fn parse_rejects_partial_and_unpadded_input() {
        let format = DateFormat::new("%m/%d/%Y").unwrap();
        assert_eq!(format.parse("03/15/2"), None);
        assert_eq!(format.parse("03/15/202"), None);
        assert_eq!(format.parse("3/15/2024"), None);

        let long = DateFormat::new("%B %d, %Y").unwrap();
        assert_eq!(long.parse("march 15, 2024"), Some(date(2024, 3, 15)));
    }

    #[test]
    fn example_renders_sample_date() {
        assert_eq!(DateFormat::iso().example(), "2024-12-31");
        assert_eq!(DateFormat::new("%d.%m.%Y").unwrap().example(), "31.12.2024");
    }
}
