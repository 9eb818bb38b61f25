//! 错误消息本地化
//!
//! 把 `ParamError` 翻译为一条或多条 `LocalizedMessage`。

mod localized;
mod properties;
mod resource;
mod store;

pub use localized::LocalizedMessage;
pub use properties::{PropertyBasedParamErrorMessages, DEFAULT_LOCALE};
pub use resource::{
    MemoryResourceLoader, PathResourceLoader, ResourceLoader, BUNDLED_SCHEME, MESSAGE_RESOURCE,
};
pub use store::{MessageStore, Section};

use crate::param_error::ParamError;
use crate::param_errors::ParamErrors;

/// 参数错误消息
pub trait ParamErrorMessages: Send + Sync {
    /// 是否有该错误的消息模板
    fn exist_for(&self, error: &ParamError) -> bool;

    /// 该错误可用的全部 locale
    fn locales_for(&self, error: &ParamError) -> Vec<String>;

    /// 该错误在所有 locale 下的消息
    fn messages_for(&self, error: &ParamError) -> Vec<LocalizedMessage>;

    /// 该错误在指定 locale 下的消息，找不到时按回退规则选择
    fn message_for(&self, error: &ParamError, locale: Option<&str>) -> LocalizedMessage;

    /// 按字段渲染整个错误集合，保持字段和错误的顺序
    fn messages_for_fields(
        &self,
        errors: &ParamErrors,
        locale: Option<&str>,
    ) -> Vec<(String, Vec<LocalizedMessage>)> {
        errors
            .iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|error| self.message_for(error, locale))
                    .collect();
                (field.to_string(), messages)
            })
            .collect()
    }
}
