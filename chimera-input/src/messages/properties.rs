use super::resource::{PathResourceLoader, ResourceLoader, MESSAGE_RESOURCE};
use super::store::{MessageStore, Section};
use super::{LocalizedMessage, ParamErrorMessages};
use crate::config::MessagesConfig;
use crate::param_error::ParamError;
use std::sync::OnceLock;

/// 默认 locale
pub const DEFAULT_LOCALE: &str = "default";

/// 基于属性文件的错误消息
///
/// 第一次使用时通过 `ResourceLoader` 找到所有名为 `input/error/message.ini`
/// 的资源，按顺序合并后缓存，此后不会再次加载。
///
/// locale 的选择顺序：
/// 1. 请求的 locale
/// 2. 请求 locale 的基础形式（第一个 `_` 之前的部分加上 `_*`，例如 `en_UK` -> `en_*`）
/// 3. 配置的默认 locale
/// 4. 默认 locale 的基础形式
/// 5. `default`
pub struct PropertyBasedParamErrorMessages<L = PathResourceLoader> {
    loader: L,
    resource_name: String,
    default_locale: String,
    store: OnceLock<MessageStore>,
}

impl<L> std::fmt::Debug for PropertyBasedParamErrorMessages<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyBasedParamErrorMessages")
            .field("resource_name", &self.resource_name)
            .field("default_locale", &self.default_locale)
            .field("loaded", &self.store.get().is_some())
            .finish()
    }
}

impl PropertyBasedParamErrorMessages<PathResourceLoader> {
    /// 从配置创建
    pub fn from_config(config: &MessagesConfig) -> Self {
        let loader = PathResourceLoader::new()
            .with_roots(config.resource_dirs.iter().cloned())
            .with_bundled_defaults(config.bundled_defaults);

        Self::new(loader)
            .with_default_locale(config.default_locale.clone())
            .with_resource_name(config.resource_name.clone())
    }
}

impl<L: ResourceLoader> PropertyBasedParamErrorMessages<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            resource_name: MESSAGE_RESOURCE.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            store: OnceLock::new(),
        }
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = name.into();
        self
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// 立即加载并返回合并后的存储
    pub fn preload(&self) -> &MessageStore {
        self.store()
    }

    fn store(&self) -> &MessageStore {
        self.store.get_or_init(|| self.load_store())
    }

    fn load_store(&self) -> MessageStore {
        let mut merged = MessageStore::new();

        for uri in self.loader.available_resource_uris(&self.resource_name) {
            match self.loader.load(&uri) {
                Ok(store) => {
                    tracing::debug!("Loaded {} message sections from {}", store.len(), uri);
                    merged.merge(store);
                }
                Err(e) => {
                    tracing::warn!(uri = %uri, error = %e, "Skipping unreadable message resource");
                }
            }
        }

        tracing::debug!(
            "Message store for '{}' ready with {} sections",
            self.resource_name,
            merged.len()
        );
        merged
    }

    fn select_locale(&self, section: &Section, requested: Option<&str>) -> String {
        if let Some(locale) = requested {
            if section.contains(locale) {
                return locale.to_string();
            }

            let base = base_locale(locale);
            if section.contains(&base) {
                return base;
            }
        }

        if section.contains(&self.default_locale) {
            return self.default_locale.clone();
        }

        let base = base_locale(&self.default_locale);
        if section.contains(&base) {
            return base;
        }

        DEFAULT_LOCALE.to_string()
    }
}

impl<L: ResourceLoader> ParamErrorMessages for PropertyBasedParamErrorMessages<L> {
    fn exist_for(&self, error: &ParamError) -> bool {
        self.store().has_section(error.id())
    }

    fn locales_for(&self, error: &ParamError) -> Vec<String> {
        self.store()
            .section(error.id())
            .map(|section| section.locales().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn messages_for(&self, error: &ParamError) -> Vec<LocalizedMessage> {
        match self.store().section(error.id()) {
            Some(section) => error.fill_messages(section.iter()),
            None => Vec::new(),
        }
    }

    fn message_for(&self, error: &ParamError, locale: Option<&str>) -> LocalizedMessage {
        let Some(section) = self.store().section(error.id()) else {
            tracing::debug!(error_id = error.id(), "No message templates for error");
            return error.fill_message("", DEFAULT_LOCALE);
        };

        let used = self.select_locale(section, locale);
        tracing::trace!(
            error_id = error.id(),
            requested = ?locale,
            used = %used,
            "Resolved message locale"
        );
        error.fill_message(section.get(&used).unwrap_or(""), &used)
    }
}

/// `en_UK` -> `en_*`，没有 `_` 时整体作为语言部分
fn base_locale(locale: &str) -> String {
    let language = locale.split_once('_').map_or(locale, |(language, _)| language);
    format!("{}_*", language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details;
    use crate::messages::MemoryResourceLoader;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const STORE: &str = "[id]\ndefault = T0 {foo}\nen_* = T1 {foo}\nde_DE = T2 {foo}\n";

    fn messages(content: &str) -> PropertyBasedParamErrorMessages<MemoryResourceLoader> {
        PropertyBasedParamErrorMessages::new(
            MemoryResourceLoader::new().with_resource(MESSAGE_RESOURCE, "mem:1", content),
        )
    }

    fn error() -> ParamError {
        ParamError::with_details("id", details! { "foo" => "bar" })
    }

    #[test]
    fn test_base_locale() {
        assert_eq!(base_locale("en_UK"), "en_*");
        assert_eq!(base_locale("de_DE_x"), "de_*");
        assert_eq!(base_locale("en"), "en_*");
    }

    #[test]
    fn test_exact_locale() {
        let message = messages(STORE).message_for(&error(), Some("de_DE"));
        assert_eq!(message, LocalizedMessage::new("de_DE", "T2 bar"));
    }

    #[test]
    fn test_base_locale_match() {
        let message = messages(STORE).message_for(&error(), Some("en_UK"));
        assert_eq!(message, LocalizedMessage::new("en_*", "T1 bar"));
    }

    #[test]
    fn test_falls_back_to_default() {
        let message = messages(STORE).message_for(&error(), Some("fr_FR"));
        assert_eq!(message, LocalizedMessage::new("default", "T0 bar"));
        let message = messages(STORE).message_for(&error(), None);
        assert_eq!(message, LocalizedMessage::new("default", "T0 bar"));
    }

    #[test]
    fn test_configured_default_locale_and_its_base() {
        let exact = messages(STORE).with_default_locale("de_DE");
        assert_eq!(exact.message_for(&error(), Some("fr_FR")).message(), "T2 bar");

        let base = messages(STORE).with_default_locale("en_US");
        assert_eq!(
            base.message_for(&error(), Some("fr_FR")),
            LocalizedMessage::new("en_*", "T1 bar")
        );
    }

    #[test]
    fn test_missing_default_yields_empty_message() {
        let message = messages("[id]\nde_DE = T2\n").message_for(&error(), Some("fr_FR"));
        assert_eq!(message, LocalizedMessage::new("default", ""));
    }

    #[test]
    fn test_unknown_error_id() {
        let messages = messages(STORE);
        let unknown = ParamError::new("UNKNOWN");
        assert!(!messages.exist_for(&unknown));
        assert!(messages.locales_for(&unknown).is_empty());
        assert!(messages.messages_for(&unknown).is_empty());
        assert_eq!(
            messages.message_for(&unknown, Some("en_UK")),
            LocalizedMessage::new("default", "")
        );
    }

    #[test]
    fn test_locales_and_messages_for() {
        let messages = messages(STORE);
        assert!(messages.exist_for(&error()));
        assert_eq!(messages.locales_for(&error()), vec!["default", "en_*", "de_DE"]);
        assert_eq!(
            messages.messages_for(&error()),
            vec![
                LocalizedMessage::new("default", "T0 bar"),
                LocalizedMessage::new("en_*", "T1 bar"),
                LocalizedMessage::new("de_DE", "T2 bar"),
            ]
        );
    }

    #[test]
    fn test_merges_resources_in_order() {
        let loader = MemoryResourceLoader::new()
            .with_resource(MESSAGE_RESOURCE, "mem:1", "[id]\ndefault = first\nen_* = english\n")
            .with_resource(MESSAGE_RESOURCE, "mem:2", "[id]\ndefault = second\nde_* = deutsch\n");
        let messages = PropertyBasedParamErrorMessages::new(loader);

        assert_eq!(messages.locales_for(&error()), vec!["default", "en_*", "de_*"]);
        assert_eq!(messages.message_for(&error(), None).message(), "second");
        assert_eq!(messages.message_for(&error(), Some("en_US")).message(), "english");
        assert_eq!(messages.message_for(&error(), Some("de_AT")).message(), "deutsch");
    }

    struct CountingLoader {
        inner: MemoryResourceLoader,
        lookups: AtomicUsize,
    }

    impl ResourceLoader for CountingLoader {
        fn available_resource_uris(&self, name: &str) -> Vec<String> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.available_resource_uris(name)
        }

        fn read_to_string(&self, uri: &str) -> crate::error::InputResult<String> {
            self.inner.read_to_string(uri)
        }
    }

    #[test]
    fn test_store_loads_once() {
        let messages = PropertyBasedParamErrorMessages::new(CountingLoader {
            inner: MemoryResourceLoader::bundled(),
            lookups: AtomicUsize::new(0),
        });
        let error = ParamError::with_details("VALUE_TOO_SMALL", details! { "minNumber" => 5 });

        assert_eq!(messages.loader.lookups.load(Ordering::SeqCst), 0);
        assert!(messages.exist_for(&error));
        assert!(!messages.messages_for(&error).is_empty());
        assert_eq!(messages.message_for(&error, Some("de_DE")).locale(), "de_*");
        assert!(!messages.locales_for(&error).is_empty());
        messages.preload();
        assert_eq!(messages.loader.lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_broken_resource_is_skipped() {
        let loader = MemoryResourceLoader::new()
            .with_resource(MESSAGE_RESOURCE, "mem:broken", "not an ini line")
            .with_resource(MESSAGE_RESOURCE, "mem:ok", STORE);
        let messages = PropertyBasedParamErrorMessages::new(loader);
        assert!(messages.exist_for(&error()));
        assert_eq!(messages.preload().len(), 1);
    }
}
