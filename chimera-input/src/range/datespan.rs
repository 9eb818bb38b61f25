use super::date::{DATE_TIME_FORMAT, DATE_TOO_EARLY, DATE_TOO_LATE};
use super::{violation, Range, Violations};
use crate::datespan::Datespan;
use crate::details;
use chrono::NaiveDateTime;

/// 日期区间范围
///
/// 下界与区间开始当天的零点比较，上界与区间结束当天的最后一秒比较，
/// 因此边界所在的整天都算在范围内。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatespanRange {
    min: Option<NaiveDateTime>,
    max: Option<NaiveDateTime>,
}

impl DatespanRange {
    pub fn new(min: Option<NaiveDateTime>, max: Option<NaiveDateTime>) -> Self {
        Self { min, max }
    }
}

impl Range for DatespanRange {
    type Value = Datespan;

    fn below_min_border(&self, value: &Datespan) -> bool {
        self.min.is_some_and(|min| value.start() < min.date())
    }

    fn above_max_border(&self, value: &Datespan) -> bool {
        self.max.is_some_and(|max| value.end() > max.date())
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
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_whole_border_days_are_inside() {
        let range = DatespanRange::new(Some(noon(2024, 1, 10)), Some(noon(2024, 1, 20)));
        assert!(range.contains(Some(&Datespan::day(date(2024, 1, 10)))));
        assert!(range.contains(Some(&Datespan::day(date(2024, 1, 20)))));
        assert!(range.contains(Some(&Datespan::custom(date(2024, 1, 10), date(2024, 1, 20)).unwrap())));
    }

    #[test]
    fn test_span_start_before_min() {
        let range = DatespanRange::new(Some(noon(2024, 1, 10)), None);
        let span = Datespan::custom(date(2024, 1, 9), date(2024, 1, 12)).unwrap();
        assert!(!range.contains(Some(&span)));
        assert!(range.errors_of(Some(&span)).contains_key(DATE_TOO_EARLY));
    }

    #[test]
    fn test_span_end_after_max() {
        let range = DatespanRange::new(None, Some(noon(2024, 1, 31)));
        let span = Datespan::month(2024, 2).unwrap();
        assert!(range.errors_of(Some(&span)).contains_key(DATE_TOO_LATE));
    }

    #[test]
    fn test_min_checked_first() {
        let range = DatespanRange::new(Some(noon(2024, 1, 10)), Some(noon(2024, 1, 20)));
        let span = Datespan::custom(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let errors = range.errors_of(Some(&span));
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(DATE_TOO_EARLY));
    }
}
