use super::{violation, Range, Violations};
use crate::details;
use chrono::NaiveDateTime;

pub const DATE_TOO_EARLY: &str = "DATE_TOO_EARLY";
pub const DATE_TOO_LATE: &str = "DATE_TOO_LATE";

pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 日期范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    min: Option<NaiveDateTime>,
    max: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(min: Option<NaiveDateTime>, max: Option<NaiveDateTime>) -> Self {
        Self { min, max }
    }
}

impl Range for DateRange {
    type Value = NaiveDateTime;

    fn below_min_border(&self, value: &NaiveDateTime) -> bool {
        self.min.is_some_and(|min| *value < min)
    }

    fn above_max_border(&self, value: &NaiveDateTime) -> bool {
        self.max.is_some_and(|max| *value > max)
    }

    fn min_border_violation(&self) -> Violations {
        match self.min {
            Some(min) => violation(
                DATE_TOO_EARLY,
                details! { "earliestDate" => min.format(DATE_TIME_FORMAT).to_string() },
            ),
            None => Violations::new(),
        }
    }

    fn max_border_violation(&self) -> Violations {
        match self.max {
            Some(max) => violation(
                DATE_TOO_LATE,
                details! { "latestDate" => max.format(DATE_TIME_FORMAT).to_string() },
            ),
            None => Violations::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param_error::Detail;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_contains() {
        let range = DateRange::new(Some(at(2024, 1, 1, 0)), Some(at(2024, 12, 31, 0)));
        assert!(!range.contains(Some(&at(2023, 12, 31, 23))));
        assert!(range.contains(Some(&at(2024, 1, 1, 0))));
        assert!(range.contains(Some(&at(2024, 12, 31, 0))));
        assert!(!range.contains(Some(&at(2024, 12, 31, 1))));
    }

    #[test]
    fn test_violation_details_are_formatted_dates() {
        let range = DateRange::new(Some(at(2024, 1, 1, 0)), Some(at(2024, 12, 31, 0)));
        let early = range.errors_of(Some(&at(2023, 6, 1, 0)));
        assert_eq!(
            early[DATE_TOO_EARLY].get("earliestDate"),
            Some(&Detail::from("2024-01-01 00:00:00"))
        );
        let late = range.errors_of(Some(&at(2025, 6, 1, 0)));
        assert_eq!(
            late[DATE_TOO_LATE].get("latestDate"),
            Some(&Detail::from("2024-12-31 00:00:00"))
        );
    }

    #[test]
    fn test_open_range() {
        let range = DateRange::default();
        assert!(range.contains(Some(&at(1900, 1, 1, 0))));
        assert!(range.errors_of(Some(&at(2100, 1, 1, 0))).is_empty());
    }
}
