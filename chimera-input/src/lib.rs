//! Chimera Input - 输入校验错误收集与本地化消息
//!
//! 校验失败不是异常：过滤器把 `ParamError` 追加到值来源自己的 `ParamErrors` 中，
//! 之后再由 `ParamErrorMessages` 按 locale 渲染成 `LocalizedMessage`。
//!
//! ```
//! use chimera_input::prelude::*;
//!
//! let mut errors = ParamErrors::new();
//! let range = NumberRange::between(5, 10);
//! for (id, details) in range.errors_of(Some(&4)) {
//!     errors.append("amount", id, details);
//! }
//!
//! let messages = PropertyBasedParamErrorMessages::new(MemoryResourceLoader::bundled());
//! let error = errors.get_for_with_id("amount", "VALUE_TOO_SMALL").unwrap();
//! let message = messages.message_for(error, Some("de_DE"));
//! assert_eq!(message.locale(), "de_*");
//! assert_eq!(message.message(), "Der Wert darf nicht kleiner als 5 sein.");
//! ```

pub mod config;
pub mod datespan;
pub mod error;
pub mod logging;
pub mod messages;
pub mod param_error;
pub mod param_errors;
pub mod range;
pub mod secret;
pub mod source;

pub use config::{InputConfig, LoggingSettings, MessagesConfig};
pub use datespan::Datespan;
pub use error::{InputError, InputResult};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use messages::{
    LocalizedMessage, MemoryResourceLoader, MessageStore, ParamErrorMessages, PathResourceLoader,
    PropertyBasedParamErrorMessages, ResourceLoader,
};
pub use param_error::{Detail, Details, ErrorSource, OpaqueRef, ParamError, Scalar};
pub use param_errors::ParamErrors;
pub use range::{
    DateRange, DatespanRange, NumberRange, Range, SecretMinLength, StringLength, Violations,
};
pub use secret::Secret;
pub use source::{Params, ValueReader, ValueSource};

/// Prelude 模块，包含常用的 traits 和类型
pub mod prelude {
    pub use crate::details;
    pub use crate::error::{InputError, InputResult};
    pub use crate::messages::{
        LocalizedMessage, MemoryResourceLoader, ParamErrorMessages, PathResourceLoader,
        PropertyBasedParamErrorMessages, ResourceLoader,
    };
    pub use crate::param_error::{Detail, Details, ParamError};
    pub use crate::param_errors::ParamErrors;
    pub use crate::range::{
        DateRange, DatespanRange, NumberRange, Range, SecretMinLength, StringLength,
    };
    pub use crate::source::{Params, ValueSource};
}
