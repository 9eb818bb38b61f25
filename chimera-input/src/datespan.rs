//! 日期区间值类型

use crate::error::{InputError, InputResult};
use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 闭区间 `[start, end]`，以天为粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Datespan {
    start: NaiveDate,
    end: NaiveDate,
}

impl Datespan {
    /// 单日
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// 从 `start` 开始的 7 天
    pub fn week(start: NaiveDate) -> InputResult<Self> {
        let end = start
            .checked_add_days(Days::new(6))
            .ok_or_else(|| InputError::invalid_argument(format!("week starting {} is out of range", start)))?;
        Ok(Self { start, end })
    }

    /// 整月
    pub fn month(year: i32, month: u32) -> InputResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| InputError::invalid_argument(format!("invalid month {}-{}", year, month)))?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| InputError::invalid_argument(format!("invalid month {}-{}", year, month)))?;
        Ok(Self { start, end })
    }

    /// 自定义区间，`start` 不能晚于 `end`
    pub fn custom(start: NaiveDate, end: NaiveDate) -> InputResult<Self> {
        if start > end {
            return Err(InputError::invalid_argument(format!(
                "datespan start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// 区间包含的天数
    pub fn amount_of_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// 是否正好是一个自然月
    pub fn is_month(&self) -> bool {
        self.start.day() == 1
            && self.start.year() == self.end.year()
            && self.start.month() == self.end.month()
            && self.end.succ_opt().map_or(true, |next| next.day() == 1)
    }
}

impl fmt::Display for Datespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start.format(DATE_FORMAT))
        } else {
            write!(
                f,
                "{},{}",
                self.start.format(DATE_FORMAT),
                self.end.format(DATE_FORMAT)
            )
        }
    }
}

/// 解析 `YYYY-MM-DD`（单日）或 `YYYY-MM-DD,YYYY-MM-DD`
impl FromStr for Datespan {
    type Err = InputError;

    fn from_str(s: &str) -> InputResult<Self> {
        let parse = |part: &str| {
            NaiveDate::parse_from_str(part.trim(), DATE_FORMAT)
                .map_err(|e| InputError::invalid_argument(format!("invalid date '{}': {}", part.trim(), e)))
        };

        match s.split_once(',') {
            Some((start, end)) => Self::custom(parse(start)?, parse(end)?),
            None => Ok(Self::day(parse(s)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day() {
        let span = Datespan::day(date(2024, 3, 1));
        assert_eq!(span.amount_of_days(), 1);
        assert_eq!(span.to_string(), "2024-03-01");
    }

    #[test]
    fn test_week() {
        let span = Datespan::week(date(2024, 12, 30)).unwrap();
        assert_eq!(span.end(), date(2025, 1, 5));
        assert_eq!(span.amount_of_days(), 7);
    }

    #[test]
    fn test_month_handles_leap_year_and_december() {
        assert_eq!(Datespan::month(2024, 2).unwrap().end(), date(2024, 2, 29));
        assert_eq!(Datespan::month(2023, 12).unwrap().end(), date(2023, 12, 31));
        assert!(Datespan::month(2024, 2).unwrap().is_month());
        assert!(Datespan::month(2024, 13).is_err());
    }

    #[test]
    fn test_custom_rejects_reversed_span() {
        let err = Datespan::custom(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_parse() {
        let span: Datespan = "2024-01-01, 2024-01-10".parse().unwrap();
        assert_eq!(span.start(), date(2024, 1, 1));
        assert_eq!(span.end(), date(2024, 1, 10));
        assert!(span.contains(date(2024, 1, 5)));
        assert_eq!(span.to_string(), "2024-01-01,2024-01-10");
        assert!("yesterday".parse::<Datespan>().is_err());
    }
}
