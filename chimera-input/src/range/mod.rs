//! 取值范围策略
//!
//! 过滤器用 `Range` 判断值是否越界，并得到越界时的结构化详情。
//! 下界和上界都是可选的；缺少的一侧永远不会报告越界。

mod date;
mod datespan;
mod number;
mod secret;
mod string_length;

pub use date::{DateRange, DATE_TOO_EARLY, DATE_TOO_LATE};
pub use datespan::DatespanRange;
pub use number::{NumberRange, VALUE_TOO_GREAT, VALUE_TOO_SMALL};
pub use secret::SecretMinLength;
pub use string_length::{StringLength, STRING_TOO_LONG, STRING_TOO_SHORT};

use crate::error::{InputError, InputResult};
use crate::param_error::Details;
use std::collections::BTreeMap;

/// 越界详情：错误 id -> 详情，单次检查最多一项
pub type Violations = BTreeMap<&'static str, Details>;

/// 取值范围
pub trait Range {
    /// 被检查的值类型
    type Value: ?Sized + ToOwned;

    /// 值是否低于下界
    fn below_min_border(&self, value: &Self::Value) -> bool;

    /// 值是否高于上界
    fn above_max_border(&self, value: &Self::Value) -> bool;

    /// 低于下界时的详情，没有下界时为空
    fn min_border_violation(&self) -> Violations;

    /// 高于上界时的详情，没有上界时为空
    fn max_border_violation(&self) -> Violations;

    /// 值是否在范围内，缺失的值不在任何范围内
    fn contains(&self, value: Option<&Self::Value>) -> bool {
        let Some(value) = value else {
            return false;
        };

        if self.below_min_border(value) {
            return false;
        }

        !self.above_max_border(value)
    }

    /// 越界详情，先检查下界
    fn errors_of(&self, value: Option<&Self::Value>) -> Violations {
        let Some(value) = value else {
            return Violations::new();
        };

        if self.below_min_border(value) {
            return self.min_border_violation();
        }

        if self.above_max_border(value) {
            return self.max_border_violation();
        }

        Violations::new()
    }

    /// 值超过上界且可以截断
    fn allows_truncate(&self, _value: &Self::Value) -> bool {
        false
    }

    /// 截断到上界
    fn truncate_to_max_border(
        &self,
        _value: &Self::Value,
    ) -> InputResult<<Self::Value as ToOwned>::Owned> {
        Err(InputError::unsupported(format!(
            "{} does not support truncation",
            std::any::type_name::<Self>()
        )))
    }
}

/// 只有一项的越界详情
pub(crate) fn violation(id: &'static str, details: Details) -> Violations {
    let mut violations = Violations::new();
    violations.insert(id, details);
    violations
}
