use serde::{Deserialize, Serialize};
use std::fmt;

/// 已渲染的本地化消息
///
/// 创建后不可变，两个字段都相等时两条消息相等。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalizedMessage {
    locale: String,
    message: String,
}

impl LocalizedMessage {
    pub fn new(locale: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            message: message.into(),
        }
    }

    /// 消息所属的 locale
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// 消息文本
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for LocalizedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
