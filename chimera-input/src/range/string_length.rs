use super::{violation, Range, Violations};
use crate::details;
use crate::error::{InputError, InputResult};

pub const STRING_TOO_SHORT: &str = "STRING_TOO_SHORT";
pub const STRING_TOO_LONG: &str = "STRING_TOO_LONG";

/// 字符串长度范围（按 Unicode 字符计数，而不是字节）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringLength {
    min: Option<usize>,
    max: Option<usize>,
    truncate: bool,
}

impl StringLength {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            min,
            max,
            truncate: false,
        }
    }

    /// 超长时截断而不是报错的长度范围，`max` 必须大于 0
    pub fn truncate(min: Option<usize>, max: usize) -> InputResult<Self> {
        if max == 0 {
            return Err(InputError::invalid_argument(
                "max length for truncation must be greater than 0",
            ));
        }

        Ok(Self {
            min,
            max: Some(max),
            truncate: true,
        })
    }

    pub fn min_length(&self) -> Option<usize> {
        self.min
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max
    }
}

impl Range for StringLength {
    type Value = str;

    fn below_min_border(&self, value: &str) -> bool {
        self.min.is_some_and(|min| value.chars().count() < min)
    }

    fn above_max_border(&self, value: &str) -> bool {
        self.max.is_some_and(|max| value.chars().count() > max)
    }

    fn min_border_violation(&self) -> Violations {
        match self.min {
            Some(min) => violation(STRING_TOO_SHORT, details! { "minLength" => min }),
            None => Violations::new(),
        }
    }

    fn max_border_violation(&self) -> Violations {
        match self.max {
            Some(max) => violation(STRING_TOO_LONG, details! { "maxLength" => max }),
            None => Violations::new(),
        }
    }

    fn allows_truncate(&self, value: &str) -> bool {
        self.truncate && self.above_max_border(value)
    }

    fn truncate_to_max_border(&self, value: &str) -> InputResult<String> {
        if !self.truncate {
            return Err(InputError::unsupported(
                "string length range was not created for truncation",
            ));
        }

        match self.max {
            Some(max) if self.above_max_border(value) => Ok(value.chars().take(max).collect()),
            _ => Err(InputError::invalid_argument(
                "value is not longer than the max length, nothing to truncate",
            )),
        }
    }
}
