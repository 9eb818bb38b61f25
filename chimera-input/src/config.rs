//! 配置
//!
//! 从 TOML 文件读取，再用带 `CHIMERA_INPUT_` 前缀的环境变量覆盖：
//!
//! ```toml
//! [messages]
//! default_locale = "default"
//! resource_name = "input/error/message.ini"
//! resource_dirs = ["config"]
//! bundled_defaults = true
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! ```

use crate::error::{InputError, InputResult};
use crate::logging::LoggingConfig;
use crate::messages::{DEFAULT_LOCALE, MESSAGE_RESOURCE};
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "CHIMERA_INPUT_";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub messages: MessagesConfig,
    pub logging: LoggingSettings,
}

/// 错误消息配置
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MessagesConfig {
    /// 找不到请求的 locale 时使用的 locale
    pub default_locale: String,

    /// 消息资源的逻辑名称
    pub resource_name: String,

    /// 查找消息资源的根目录，按顺序合并
    pub resource_dirs: Vec<PathBuf>,

    /// 是否先加载内置消息
    pub bundled_defaults: bool,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            resource_name: MESSAGE_RESOURCE.to_string(),
            resource_dirs: Vec::new(),
            bundled_defaults: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
    pub filter: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
            filter: None,
        }
    }
}

impl InputConfig {
    /// 读取配置文件并应用环境变量覆盖
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config file {:?}", path))?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// 只解析 TOML，不读取环境变量
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// 默认配置加上环境变量覆盖
    pub fn from_env() -> InputResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// 用环境变量覆盖配置项
    ///
    /// 配置键 `messages.default_locale` 对应 `CHIMERA_INPUT_MESSAGES_DEFAULT_LOCALE`。
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            let value = lookup(&key_to_env(key));
            if value.is_some() {
                tracing::debug!("Config '{}' overridden from environment", key);
            }
            value
        };

        if let Some(v) = get("messages.default_locale") {
            self.messages.default_locale = v;
        }
        if let Some(v) = get("messages.resource_name") {
            self.messages.resource_name = v;
        }
        if let Some(v) = get("messages.resource_dirs") {
            self.messages.resource_dirs = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
        }
        if let Some(v) = get("messages.bundled_defaults") {
            match v.to_lowercase().as_str() {
                "true" | "yes" | "1" => self.messages.bundled_defaults = true,
                "false" | "no" | "0" => self.messages.bundled_defaults = false,
                other => tracing::warn!("Ignoring invalid boolean '{}' for bundled_defaults", other),
            }
        }
        if let Some(v) = get("logging.level") {
            self.logging.level = v;
        }
        if let Some(v) = get("logging.format") {
            self.logging.format = v;
        }
        if let Some(v) = get("logging.filter") {
            self.logging.filter = Some(v);
        }
    }

    pub fn validate(&self) -> InputResult<()> {
        if self.messages.default_locale.trim().is_empty() {
            return Err(InputError::Config("messages.default_locale must not be empty".into()));
        }
        if self.messages.resource_name.trim().is_empty() {
            return Err(InputError::Config("messages.resource_name must not be empty".into()));
        }
        self.logging_config().map(|_| ())
    }

    /// 转换为日志配置
    pub fn logging_config(&self) -> InputResult<LoggingConfig> {
        let level = self.logging.level.parse().map_err(InputError::Config)?;
        let format = self.logging.format.parse().map_err(InputError::Config)?;
        let mut config = LoggingConfig::new().level(level).format(format);
        if let Some(filter) = &self.logging.filter {
            config = config.filter(filter.clone());
        }
        Ok(config)
    }
}

/// `messages.default_locale` -> `CHIMERA_INPUT_MESSAGES_DEFAULT_LOCALE`
fn key_to_env(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.replace('.', "_").to_uppercase())
}
