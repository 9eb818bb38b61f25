//! 单个参数错误
//!
//! `ParamError` 是值对象：一个错误 id 加上一组结构化的详情数据，
//! 详情在渲染消息时替换模板中的 `{key}` 占位符。

use crate::error::{InputError, InputResult};
use crate::messages::LocalizedMessage;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// 标量详情值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Null => Ok(()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<usize> for Scalar {
    fn from(value: usize) -> Self {
        i64::try_from(value)
            .map(Scalar::Int)
            .unwrap_or_else(|_| Scalar::Str(value.to_string()))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Scalar::Null)
    }
}

/// 不透明对象引用
///
/// 只保留类型名以及（如果有的话）对象的字符串形式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueRef {
    type_name: String,
    display: Option<String>,
}

impl OpaqueRef {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }
}

/// 错误详情值
#[derive(Debug, Clone, PartialEq)]
pub enum Detail {
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
    Opaque(OpaqueRef),
}

impl Detail {
    /// 没有字符串形式的对象，渲染时使用其类型名
    pub fn opaque<T: ?Sized>(_value: &T) -> Self {
        Detail::Opaque(OpaqueRef {
            type_name: std::any::type_name::<T>().to_string(),
            display: None,
        })
    }

    /// 可以转换为字符串的对象
    pub fn displayable<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Detail::Opaque(OpaqueRef {
            type_name: std::any::type_name::<T>().to_string(),
            display: Some(value.to_string()),
        })
    }

    /// 展平为可以嵌入消息模板的字符串
    ///
    /// - 序列：元素以 `", "` 连接
    /// - 无字符串形式的对象：类型名
    /// - 其他：自然的字符串形式
    pub fn flatten(&self) -> String {
        match self {
            Detail::Scalar(scalar) => scalar.to_string(),
            Detail::Sequence(items) => items
                .iter()
                .map(Scalar::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            Detail::Opaque(opaque) => opaque
                .display
                .clone()
                .unwrap_or_else(|| opaque.type_name.clone()),
        }
    }
}

impl Serialize for Detail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Detail::Scalar(scalar) => scalar.serialize(serializer),
            Detail::Sequence(items) => items.serialize(serializer),
            Detail::Opaque(_) => serializer.serialize_str(&self.flatten()),
        }
    }
}

impl From<Scalar> for Detail {
    fn from(value: Scalar) -> Self {
        Detail::Scalar(value)
    }
}

macro_rules! impl_detail_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Detail {
                fn from(value: $ty) -> Self {
                    Detail::Scalar(value.into())
                }
            }
        )*
    };
}

impl_detail_from_scalar!(&str, String, i64, i32, u32, usize, f64, bool);

impl<T: Into<Scalar>> From<Option<T>> for Detail {
    fn from(value: Option<T>) -> Self {
        Detail::Scalar(value.into())
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for Detail {
    fn from(values: Vec<T>) -> Self {
        Detail::Sequence(values.into_iter().map(Into::into).collect())
    }
}

/// 按插入顺序保存的详情映射
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Details {
    entries: Vec<(String, Detail)>,
}

impl Details {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式添加一个详情
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Detail>) -> Self {
        self.insert(key, value);
        self
    }

    /// 插入详情，已存在的 key 原位替换
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Detail>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Detail> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Detail)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Detail>> FromIterator<(K, V)> for Details {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut details = Details::new();
        for (key, value) in iter {
            details.insert(key, value);
        }
        details
    }
}

impl Serialize for Details {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// 构造 `Details`
///
/// ```
/// use chimera_input::details;
///
/// let details = details! { "minNumber" => 5, "unit" => "kg" };
/// assert_eq!(details.len(), 2);
/// ```
#[macro_export]
macro_rules! details {
    () => {
        $crate::Details::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Details::new()$(.with($key, $value))+
    };
}

/// 参数校验错误
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamError {
    id: String,
    details: Details,
}

impl ParamError {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_details(id, Details::new())
    }

    pub fn with_details(id: impl Into<String>, details: Details) -> Self {
        Self {
            id: id.into(),
            details,
        }
    }

    /// 从错误 id 或已有错误实例得到共享的错误
    ///
    /// 已有实例原样返回（同一个 `Arc`），此时 `details` 被忽略。
    pub fn from_data(source: impl Into<ErrorSource>, details: Details) -> Arc<ParamError> {
        match source.into() {
            ErrorSource::Error(error) => error,
            ErrorSource::Id(id) => Arc::new(Self::with_details(id, details)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn details(&self) -> &Details {
        &self.details
    }

    /// 用详情替换模板中的 `{key}` 占位符
    ///
    /// 没有对应详情的占位符原样保留。
    pub fn fill_message(&self, template: &str, locale: &str) -> LocalizedMessage {
        let mut message = template.to_string();
        for (key, detail) in self.details.iter() {
            let placeholder = format!("{{{}}}", key);
            if message.contains(&placeholder) {
                message = message.replace(&placeholder, &detail.flatten());
            }
        }
        LocalizedMessage::new(locale, message)
    }

    /// 对每个 (locale, 模板) 调用 `fill_message`，保持输入顺序
    pub fn fill_messages<I, L, T>(&self, templates: I) -> Vec<LocalizedMessage>
    where
        I: IntoIterator<Item = (L, T)>,
        L: AsRef<str>,
        T: AsRef<str>,
    {
        templates
            .into_iter()
            .map(|(locale, template)| self.fill_message(template.as_ref(), locale.as_ref()))
            .collect()
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// `ParamError::from_data` 接受的输入
#[derive(Debug, Clone)]
pub enum ErrorSource {
    Id(String),
    Error(Arc<ParamError>),
}

impl From<&str> for ErrorSource {
    fn from(id: &str) -> Self {
        ErrorSource::Id(id.to_string())
    }
}

impl From<String> for ErrorSource {
    fn from(id: String) -> Self {
        ErrorSource::Id(id)
    }
}

impl From<Arc<ParamError>> for ErrorSource {
    fn from(error: Arc<ParamError>) -> Self {
        ErrorSource::Error(error)
    }
}

impl From<&Arc<ParamError>> for ErrorSource {
    fn from(error: &Arc<ParamError>) -> Self {
        ErrorSource::Error(Arc::clone(error))
    }
}

impl From<ParamError> for ErrorSource {
    fn from(error: ParamError) -> Self {
        ErrorSource::Error(Arc::new(error))
    }
}

/// 非类型化输入（例如来自 JSON 的数据）只接受字符串 id
impl TryFrom<&serde_json::Value> for ErrorSource {
    type Error = InputError;

    fn try_from(value: &serde_json::Value) -> InputResult<Self> {
        match value {
            serde_json::Value::String(id) => Ok(ErrorSource::Id(id.clone())),
            other => Err(InputError::invalid_argument(format!(
                "expected an error id string or a ParamError instance, got {}",
                json_kind(other)
            ))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
