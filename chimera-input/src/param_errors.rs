//! 参数错误集合
//!
//! 每个值来源（请求参数、请求头、Cookie、环境变量、请求体）各持有一个
//! `ParamErrors`，按字段名收集 `ParamError`。字段和同一字段下的错误 id
//! 都保持插入顺序；同一字段重复追加相同 id 的错误会原位替换。

use crate::param_error::{Details, ErrorSource, ParamError};
use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct FieldErrors {
    field: String,
    errors: Vec<Arc<ParamError>>,
}

impl FieldErrors {
    fn position(&self, error_id: &str) -> Option<usize> {
        self.errors.iter().position(|e| e.id() == error_id)
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldErrors", 2)?;
        state.serialize_field("field", &self.field)?;
        let errors: Vec<&ParamError> = self.errors.iter().map(Arc::as_ref).collect();
        state.serialize_field("errors", &errors)?;
        state.end()
    }
}

/// 按字段收集的参数错误
#[derive(Debug, Clone, Default)]
pub struct ParamErrors {
    fields: Vec<FieldErrors>,
}

impl ParamErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为字段追加一个错误并返回实际保存的错误
    ///
    /// `error` 可以是错误 id 或已有的错误实例，解析方式同 `ParamError::from_data`。
    pub fn append(
        &mut self,
        field: impl Into<String>,
        error: impl Into<ErrorSource>,
        details: Details,
    ) -> Arc<ParamError> {
        let field = field.into();
        let error = ParamError::from_data(error, details);
        tracing::trace!(field = %field, error_id = error.id(), "Appending param error");

        match self.fields.iter_mut().find(|f| f.field == field) {
            Some(entry) => match entry.position(error.id()) {
                Some(index) => entry.errors[index] = Arc::clone(&error),
                None => entry.errors.push(Arc::clone(&error)),
            },
            None => self.fields.push(FieldErrors {
                field,
                errors: vec![Arc::clone(&error)],
            }),
        }

        error
    }

    /// 有错误的字段数量（不是错误总数）
    pub fn count(&self) -> usize {
        self.fields.len()
    }

    pub fn exist(&self) -> bool {
        self.count() > 0
    }

    pub fn exist_for(&self, field: &str) -> bool {
        self.find(field).is_some()
    }

    pub fn exist_for_with_id(&self, field: &str, error_id: &str) -> bool {
        self.get_for_with_id(field, error_id).is_some()
    }

    /// 字段的全部错误，按错误 id 的插入顺序；没有错误时为空
    pub fn get_for(&self, field: &str) -> &[Arc<ParamError>] {
        self.find(field).map(|f| f.errors.as_slice()).unwrap_or(&[])
    }

    pub fn get_for_with_id(&self, field: &str, error_id: &str) -> Option<&Arc<ParamError>> {
        self.find(field)
            .and_then(|f| f.errors.iter().find(|e| e.id() == error_id))
    }

    /// 按字段插入顺序遍历 `(字段名, 错误列表)`
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.fields.iter(),
        }
    }

    fn find(&self, field: &str) -> Option<&FieldErrors> {
        self.fields.iter().find(|f| f.field == field)
    }
}

pub struct Iter<'a> {
    inner: std::slice::Iter<'a, FieldErrors>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [Arc<ParamError>]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|f| (f.field.as_str(), f.errors.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a ParamErrors {
    type Item = (&'a str, &'a [Arc<ParamError>]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

struct ErrorsByField<'a>(&'a [FieldErrors]);

impl Serialize for ErrorsByField<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.field, entry)?;
        }
        map.end()
    }
}

/// 序列化为 `{"errors": {"字段": {"field": "字段", "errors": [...]}}}`
impl Serialize for ParamErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ParamErrors", 1)?;
        state.serialize_field("errors", &ErrorsByField(&self.fields))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details;

    #[test]
    fn test_empty() {
        let errors = ParamErrors::new();
        assert_eq!(errors.count(), 0);
        assert!(!errors.exist());
        assert!(!errors.exist_for("foo"));
        assert!(errors.get_for("foo").is_empty());
        assert!(errors.get_for_with_id("foo", "id").is_none());
        assert_eq!(errors.iter().count(), 0);
    }

    #[test]
    fn test_append_returns_stored_error() {
        let mut errors = ParamErrors::new();
        let error = errors.append("foo", "FIELD_EMPTY", Details::new());
        assert_eq!(error.id(), "FIELD_EMPTY");
        assert!(errors.exist());
        assert!(errors.exist_for("foo"));
        assert!(errors.exist_for_with_id("foo", "FIELD_EMPTY"));
        assert!(!errors.exist_for_with_id("foo", "OTHER"));
        assert!(Arc::ptr_eq(
            &error,
            errors.get_for_with_id("foo", "FIELD_EMPTY").unwrap()
        ));
    }

    #[test]
    fn test_count_is_number_of_fields() {
        let mut errors = ParamErrors::new();
        errors.append("foo", "A", Details::new());
        errors.append("foo", "B", Details::new());
        errors.append("bar", "A", Details::new());
        assert_eq!(errors.count(), 2);
        assert_eq!(errors.get_for("foo").len(), 2);
    }

    #[test]
    fn test_same_id_replaces_in_place() {
        let mut errors = ParamErrors::new();
        errors.append("foo", "A", details! { "n" => 1 });
        errors.append("foo", "B", Details::new());
        errors.append("foo", "A", details! { "n" => 2 });

        let ids: Vec<_> = errors.get_for("foo").iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        let replaced = errors.get_for_with_id("foo", "A").unwrap();
        assert_eq!(replaced.fill_message("{n}", "default").message(), "2");
    }

    #[test]
    fn test_append_existing_instance() {
        let mut errors = ParamErrors::new();
        let error = Arc::new(ParamError::new("FIELD_EMPTY"));
        let stored = errors.append("foo", &error, Details::new());
        assert!(Arc::ptr_eq(&error, &stored));
    }

    #[test]
    fn test_iteration_order_is_restartable() {
        let mut errors = ParamErrors::new();
        errors.append("b", "X", Details::new());
        errors.append("a", "X", Details::new());
        errors.append("b", "Y", Details::new());

        let first: Vec<_> = errors.iter().map(|(field, e)| (field, e.len())).collect();
        let second: Vec<_> = (&errors).into_iter().map(|(field, e)| (field, e.len())).collect();
        assert_eq!(first, vec![("b", 2), ("a", 1)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialization() {
        let mut errors = ParamErrors::new();
        errors.append("foo", "VALUE_TOO_SMALL", details! { "minNumber" => 5 });
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "errors": {
                    "foo": {
                        "field": "foo",
                        "errors": [{"id": "VALUE_TOO_SMALL", "details": {"minNumber": 5}}]
                    }
                }
            })
        );
    }
}
