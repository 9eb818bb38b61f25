use thiserror::Error;

/// 输入层的契约错误
///
/// 校验失败不会走这里，它们以 `ParamError` 的形式累积在 `ParamErrors` 中。
/// 这里只有调用方误用 API 或资源文件损坏时才会出现的错误。
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Failed to read resource {uri}: {source}")]
    ResourceRead {
        uri: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse resource {uri} at line {line}: {message}")]
    ResourceParse {
        uri: String,
        line: usize,
        message: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),
}

impl InputError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation(message.into())
    }

    /// 是否属于调用方误用（而不是资源问题）
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::UnsupportedOperation(_)
        )
    }
}

pub type InputResult<T> = Result<T, InputError>;
