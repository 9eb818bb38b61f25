//! 消息资源加载
//!
//! 消息组件只需要两项能力：按逻辑名称列出所有可用资源，以及把单个资源解析为
//! `MessageStore`。

use crate::error::{InputError, InputResult};
use crate::messages::store::MessageStore;
use std::path::PathBuf;

/// 消息资源的逻辑名称
pub const MESSAGE_RESOURCE: &str = "input/error/message.ini";

/// 内置消息资源的 URI 前缀
pub const BUNDLED_SCHEME: &str = "bundled:";

const BUNDLED_MESSAGES: &str = include_str!("../../resources/input/error/message.ini");

/// 资源加载器
pub trait ResourceLoader: Send + Sync {
    /// 匹配逻辑名称的全部资源 URI，按合并顺序排列
    fn available_resource_uris(&self, name: &str) -> Vec<String>;

    /// 读取资源内容
    fn read_to_string(&self, uri: &str) -> InputResult<String>;

    /// 读取并解析资源
    fn load(&self, uri: &str) -> InputResult<MessageStore> {
        let content = self.read_to_string(uri)?;
        MessageStore::parse(&content, uri)
    }
}

/// 从若干根目录中查找资源
///
/// 启用内置消息时，内置资源排在最前面，磁盘上的文件按根目录顺序覆盖它。
#[derive(Debug, Clone, Default)]
pub struct PathResourceLoader {
    roots: Vec<PathBuf>,
    bundled: bool,
}

impl PathResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn with_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.roots.extend(roots.into_iter().map(Into::into));
        self
    }

    pub fn with_bundled_defaults(mut self, bundled: bool) -> Self {
        self.bundled = bundled;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl ResourceLoader for PathResourceLoader {
    fn available_resource_uris(&self, name: &str) -> Vec<String> {
        let mut uris = Vec::new();

        if self.bundled && name == MESSAGE_RESOURCE {
            uris.push(format!("{}{}", BUNDLED_SCHEME, MESSAGE_RESOURCE));
        }

        for root in &self.roots {
            let path = root.join(name);
            if path.is_file() {
                uris.push(path.to_string_lossy().into_owned());
            } else {
                tracing::debug!("No resource '{}' under {:?}", name, root);
            }
        }

        uris
    }

    fn read_to_string(&self, uri: &str) -> InputResult<String> {
        if let Some(name) = uri.strip_prefix(BUNDLED_SCHEME) {
            return bundled_resource(name).map(str::to_string).ok_or_else(|| {
                InputError::ResourceRead {
                    uri: uri.to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "no such bundled resource",
                    ),
                }
            });
        }

        std::fs::read_to_string(uri).map_err(|source| InputError::ResourceRead {
            uri: uri.to_string(),
            source,
        })
    }
}

/// 内存中的资源，适合嵌入到二进制或测试中使用
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceLoader {
    resources: Vec<MemoryResource>,
}

#[derive(Debug, Clone)]
struct MemoryResource {
    name: String,
    uri: String,
    content: String,
}

impl MemoryResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只包含内置消息的加载器
    pub fn bundled() -> Self {
        Self::new().with_resource(
            MESSAGE_RESOURCE,
            format!("{}{}", BUNDLED_SCHEME, MESSAGE_RESOURCE),
            BUNDLED_MESSAGES,
        )
    }

    pub fn with_resource(
        mut self,
        name: impl Into<String>,
        uri: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.resources.push(MemoryResource {
            name: name.into(),
            uri: uri.into(),
            content: content.into(),
        });
        self
    }
}

impl ResourceLoader for MemoryResourceLoader {
    fn available_resource_uris(&self, name: &str) -> Vec<String> {
        self.resources
            .iter()
            .filter(|r| r.name == name)
            .map(|r| r.uri.clone())
            .collect()
    }

    fn read_to_string(&self, uri: &str) -> InputResult<String> {
        self.resources
            .iter()
            .find(|r| r.uri == uri)
            .map(|r| r.content.clone())
            .ok_or_else(|| InputError::ResourceRead {
                uri: uri.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such resource"),
            })
    }
}

fn bundled_resource(name: &str) -> Option<&'static str> {
    (name == MESSAGE_RESOURCE).then_some(BUNDLED_MESSAGES)
}
