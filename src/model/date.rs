// Due / occurrence dates attached to deadlines and events
use crate::error::{TaskError, TaskResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A `YYYY-MM-DD` date string.
///
/// Only the shape and the field ranges are checked (month 01-12, day 01-31);
/// `2024-02-30` is a valid value even though no such day exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateValue(String);

impl DateValue {
    pub fn parse(text: &str) -> TaskResult<Self> {
        let text = text.trim();
        if !has_date_shape(text) {
            return Err(TaskError::InvalidDateFormat(text.to_string()));
        }
        let month = field(text, 5..7);
        let day = field(text, 8..10);
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(TaskError::InvalidDateFormat(text.to_string()));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar day, when the value names one that exists.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, DATE_FORMAT).ok()
    }
}

fn has_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

// Only called on ASCII digits, so the fold cannot overflow.
fn field(text: &str, range: std::ops::Range<usize>) -> u32 {
    text.as_bytes()[range]
        .iter()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

impl TryFrom<String> for DateValue {
    type Error = TaskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateValue> for String {
    fn from(value: DateValue) -> Self {
        value.0
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_dates() {
        let d = DateValue::parse(" 2024-12-01 ").unwrap();
        assert_eq!(d.as_str(), "2024-12-01");
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2024, 12, 1));
    }

    #[test]
    fn checks_format_not_calendar() {
        let d = DateValue::parse("2024-02-30").unwrap();
        assert_eq!(d.as_str(), "2024-02-30");
        assert_eq!(d.date(), None);
        assert!(DateValue::parse("2023-02-29").is_ok());
        assert!(DateValue::parse("2024-04-31").is_ok());
    }

    #[test]
    fn rejects_other_formats() {
        for bad in [
            "Monday",
            "01/12/2024",
            "2024-1-5",
            "2024-13-01",
            "2024-00-10",
            "2024-01-32",
            "2024-01-00",
            "",
            "2024-12-01x",
        ] {
            assert!(
                matches!(DateValue::parse(bad), Err(TaskError::InvalidDateFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn deserialize_revalidates() {
        let ok: DateValue = serde_json::from_str("\"2025-03-04\"").unwrap();
        assert_eq!(ok.to_string(), "2025-03-04");
        assert!(serde_json::from_str::<DateValue>("\"tomorrow\"").is_err());
    }
}
