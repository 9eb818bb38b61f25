//! 值来源与读取
//!
//! 原始值从哪里来（查询参数、请求头、Cookie、命令行、环境变量）不在这里关心，
//! `ValueSource` 只是"字段名 -> 原始值"的函数。`Params` 把一个值来源和它的
//! `ParamErrors` 绑定在一起，`ValueReader` 读取单个字段并执行过滤，
//! 失败时把错误追加到所属的 `ParamErrors`。
//!
//! ```
//! use chimera_input::{NumberRange, Params};
//! use std::collections::HashMap;
//!
//! let raw: HashMap<String, String> = [("age".to_string(), "4".to_string())].into();
//! let mut params = Params::new(raw);
//! let age = params.read("age").required().as_int(Some(&NumberRange::between(5, 10)));
//!
//! assert_eq!(age, None);
//! assert!(params.errors().exist_for_with_id("age", "VALUE_TOO_SMALL"));
//! ```

use crate::datespan::Datespan;
use crate::param_error::Details;
use crate::param_errors::ParamErrors;
use crate::range::{DateRange, DatespanRange, NumberRange, Range, SecretMinLength, StringLength};
use crate::secret::Secret;
use chrono::{NaiveDate, NaiveDateTime};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

pub const FIELD_EMPTY: &str = "FIELD_EMPTY";
pub const FIELD_WRONG_VALUE: &str = "FIELD_WRONG_VALUE";
pub const DATE_INVALID: &str = "DATE_INVALID";
pub const DATESPAN_INVALID: &str = "DATESPAN_INVALID";

/// 原始值来源
pub trait ValueSource {
    fn value(&self, name: &str) -> Option<&str>;
}

impl ValueSource for HashMap<String, String> {
    fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ValueSource for BTreeMap<String, String> {
    fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ValueSource for Vec<(String, String)> {
    fn value(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// 一个值来源及其错误集合
#[derive(Debug, Clone)]
pub struct Params<S> {
    source: S,
    errors: ParamErrors,
}

impl<S: ValueSource> Params<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            errors: ParamErrors::new(),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.source.value(name).is_some()
    }

    /// 读取一个字段
    pub fn read<'a>(&'a mut self, name: &'a str) -> ValueReader<'a> {
        ValueReader {
            name,
            value: self.source.value(name),
            errors: &mut self.errors,
            required: None,
            default: None,
        }
    }

    pub fn errors(&self) -> &ParamErrors {
        &self.errors
    }

    pub fn into_errors(self) -> ParamErrors {
        self.errors
    }
}

/// 单个字段的读取器
#[derive(Debug)]
pub struct ValueReader<'a> {
    name: &'a str,
    value: Option<&'a str>,
    errors: &'a mut ParamErrors,
    required: Option<String>,
    default: Option<String>,
}

impl<'a> ValueReader<'a> {
    /// 缺失或为空时记录 `FIELD_EMPTY`
    pub fn required(self) -> Self {
        self.required_with(FIELD_EMPTY)
    }

    /// 缺失或为空时记录指定的错误
    pub fn required_with(mut self, error_id: impl Into<String>) -> Self {
        self.required = Some(error_id.into());
        self
    }

    /// 缺失或为空时使用的值，仍会经过过滤
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// 原始字符串，不做任何检查
    pub fn unsecure(mut self) -> Option<String> {
        self.raw().map(Cow::into_owned)
    }

    pub fn as_string(mut self, range: Option<&StringLength>) -> Option<String> {
        let value = self.raw()?;

        if let Some(range) = range {
            if range.allows_truncate(&value) {
                tracing::debug!(field = self.name, "Truncating value to max length");
                return range.truncate_to_max_border(&value).ok();
            }
        }

        let text: &str = &value;
        self.check(range, text).then(|| value.into_owned())
    }

    pub fn as_int(mut self, range: Option<&NumberRange>) -> Option<i64> {
        let raw = self.raw()?;
        let Ok(value) = raw.trim().parse::<i64>() else {
            self.fail(FIELD_WRONG_VALUE);
            return None;
        };

        self.check(range, &value).then_some(value)
    }

    /// 接受 `YYYY-MM-DD` 或 `YYYY-MM-DD HH:MM:SS`
    pub fn as_date(mut self, range: Option<&DateRange>) -> Option<NaiveDateTime> {
        let raw = self.raw()?;
        let Some(value) = parse_date_time(raw.trim()) else {
            self.fail(DATE_INVALID);
            return None;
        };

        self.check(range, &value).then_some(value)
    }

    /// 接受 `YYYY-MM-DD` 或 `YYYY-MM-DD,YYYY-MM-DD`
    pub fn as_datespan(mut self, range: Option<&DatespanRange>) -> Option<Datespan> {
        let raw = self.raw()?;
        let value = match raw.parse::<Datespan>() {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(field = self.name, error = %e, "Invalid datespan");
                self.fail(DATESPAN_INVALID);
                return None;
            }
        };

        self.check(range, &value).then_some(value)
    }

    pub fn as_secret(mut self, range: Option<&SecretMinLength>) -> Option<Secret> {
        let value = Secret::new(self.raw()?);
        self.check(range, &value).then_some(value)
    }

    /// 缺失和空字符串都视为没有值
    fn raw(&mut self) -> Option<Cow<'a, str>> {
        if let Some(value) = self.value.filter(|v| !v.is_empty()) {
            return Some(Cow::Borrowed(value));
        }

        if let Some(default) = self.default.take() {
            return Some(Cow::Owned(default));
        }

        if let Some(error_id) = self.required.take() {
            self.fail(&error_id);
        }

        None
    }

    fn check<R: Range>(&mut self, range: Option<&R>, value: &R::Value) -> bool {
        let Some(range) = range else {
            return true;
        };

        let violations = range.errors_of(Some(value));
        let valid = violations.is_empty();
        for (error_id, details) in violations {
            tracing::debug!(field = self.name, error_id, "Value out of range");
            self.errors.append(self.name, error_id, details);
        }
        valid
    }

    fn fail(&mut self, error_id: &str) {
        tracing::debug!(field = self.name, error_id, "Value rejected");
        self.errors.append(self.name, error_id, Details::new());
    }
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
