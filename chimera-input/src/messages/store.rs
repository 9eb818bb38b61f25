//! 消息模板存储
//!
//! 结构为 `section(错误 id) -> locale -> 模板`，由 INI 格式的资源文件解析得到。

use crate::error::{InputError, InputResult};

/// 一个错误 id 下的全部模板，按出现顺序保存
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// locale 对应的模板
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == locale)
            .map(|(_, template)| template.as_str())
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.get(locale).is_some()
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// `(locale, 模板)` 对
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, t)| (l.as_str(), t.as_str()))
    }

    /// 已存在的 locale 原位覆盖，新的追加到末尾
    fn set(&mut self, locale: String, template: String) {
        match self.entries.iter_mut().find(|(l, _)| *l == locale) {
            Some(entry) => entry.1 = template,
            None => self.entries.push((locale, template)),
        }
    }
}

/// 合并后的消息模板存储
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageStore {
    sections: Vec<Section>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析 INI 内容
    ///
    /// 支持 `[SECTION]`、`key = value`、以 `;` 或 `#` 开头的注释行。
    /// 值两侧成对的引号会被去掉；未加引号的值中，前面有空白的 `;` 或 `#`
    /// 开始行尾注释。开头的 UTF-8 BOM 会被忽略。`uri` 只用于错误信息。
    pub fn parse(content: &str, uri: &str) -> InputResult<Self> {
        let mut store = Self::new();
        let mut current: Option<usize> = None;
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            let line_no = index + 1;

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest.strip_suffix(']').map(str::trim).ok_or_else(|| {
                    parse_error(uri, line_no, format!("unterminated section header '{}'", line))
                })?;
                if name.is_empty() {
                    return Err(parse_error(uri, line_no, "empty section name"));
                }
                current = Some(store.section_index_or_insert(name));
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| {
                parse_error(uri, line_no, format!("expected 'locale = template', got '{}'", line))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(parse_error(uri, line_no, "empty locale key"));
            }

            let section = current.ok_or_else(|| {
                parse_error(uri, line_no, format!("key '{}' is outside of any section", key))
            })?;
            store.sections[section].set(key.to_string(), parse_value(value).to_string());
        }

        Ok(store)
    }

    /// 合并另一份存储：section 累加，同一 section 中相同 locale 以后者为准
    pub fn merge(&mut self, other: MessageStore) {
        for section in other.sections {
            let index = self.section_index_or_insert(&section.name);
            for (locale, template) in section.entries {
                self.sections[index].set(locale, template);
            }
        }
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn section_index_or_insert(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }
}

fn parse_value(raw: &str) -> &str {
    let value = raw.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    strip_inline_comment(value)
}

/// `hello ; note` -> `hello`
fn strip_inline_comment(value: &str) -> &str {
    let mut prev_is_space = false;
    for (index, c) in value.char_indices() {
        if (c == ';' || c == '#') && prev_is_space {
            return value[..index].trim_end();
        }
        prev_is_space = c.is_whitespace();
    }
    value
}

fn parse_error(uri: &str, line: usize, message: impl Into<String>) -> InputError {
    InputError::ResourceParse {
        uri: uri.to_string(),
        line,
        message: message.into(),
    }
}
