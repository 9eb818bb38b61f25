use super::{violation, Range, Violations};
use crate::details;

pub const VALUE_TOO_SMALL: &str = "VALUE_TOO_SMALL";
pub const VALUE_TOO_GREAT: &str = "VALUE_TOO_GREAT";

/// 整数范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumberRange {
    min: Option<i64>,
    max: Option<i64>,
}

impl NumberRange {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    pub fn min(min: i64) -> Self {
        Self::new(Some(min), None)
    }

    pub fn max(max: i64) -> Self {
        Self::new(None, Some(max))
    }

    pub fn between(min: i64, max: i64) -> Self {
        Self::new(Some(min), Some(max))
    }
}

impl Range for NumberRange {
    type Value = i64;

    fn below_min_border(&self, value: &i64) -> bool {
        self.min.is_some_and(|min| *value < min)
    }

    fn above_max_border(&self, value: &i64) -> bool {
        self.max.is_some_and(|max| *value > max)
    }

    fn min_border_violation(&self) -> Violations {
        match self.min {
            Some(min) => violation(VALUE_TOO_SMALL, details! { "minNumber" => min }),
            None => Violations::new(),
        }
    }

    fn max_border_violation(&self) -> Violations {
        match self.max {
            Some(max) => violation(VALUE_TOO_GREAT, details! { "maxNumber" => max }),
            None => Violations::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param_error::Detail;

    #[test]
    fn test_contains_borders() {
        let range = NumberRange::between(5, 10);
        assert!(!range.contains(Some(&4)));
        assert!(range.contains(Some(&5)));
        assert!(range.contains(Some(&10)));
        assert!(!range.contains(Some(&11)));
        assert!(!range.contains(None));
    }

    #[test]
    fn test_errors_of_below_min() {
        let errors = NumberRange::between(5, 10).errors_of(Some(&4));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[VALUE_TOO_SMALL].get("minNumber"),
            Some(&Detail::from(5i64))
        );
    }

    #[test]
    fn test_errors_of_above_max() {
        let errors = NumberRange::between(5, 10).errors_of(Some(&11));
        assert_eq!(
            errors[VALUE_TOO_GREAT].get("maxNumber"),
            Some(&Detail::from(10i64))
        );
    }

    #[test]
    fn test_errors_of_in_range_is_empty() {
        assert!(NumberRange::between(5, 10).errors_of(Some(&7)).is_empty());
    }

    #[test]
    fn test_unbounded_sides_never_violate() {
        let range = NumberRange::default();
        assert!(range.contains(Some(&i64::MIN)));
        assert!(range.contains(Some(&i64::MAX)));
        assert!(range.min_border_violation().is_empty());
        assert!(range.max_border_violation().is_empty());
    }

    #[test]
    fn test_truncation_unsupported() {
        let range = NumberRange::max(3);
        assert!(!range.allows_truncate(&4));
        let err = range.truncate_to_max_border(&4).unwrap_err();
        assert!(err.is_contract_violation());
    }
}
