pub mod frontmatter;
pub mod markdown;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// 内容条目的来源类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// `.md`，正文已渲染为 HTML
    Markdown,
    /// `.html`，正文是待渲染的模板源码
    Template,
}

impl ContentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "md" | "markdown" => Some(Self::Markdown),
            "html" => Some(Self::Template),
            _ => None,
        }
    }
}

/// 一个内容条目（文章、页面等），加载后不再修改
#[derive(Debug, Clone, Serialize)]
pub struct ContentItem {
    /// 相对于 input 目录的路径
    pub input_path: PathBuf,
    pub kind: ContentKind,
    pub url: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub layout: Option<String>,
    pub body: String,
    /// front matter 中的其余字段
    pub data: HashMap<String, serde_json::Value>,
}

impl ContentItem {
    /// 以最少字段构造条目，其余字段取空值
    pub fn new(input_path: impl Into<PathBuf>, date: DateTime<Utc>) -> Self {
        let input_path = input_path.into();
        let kind = ContentKind::from_path(&input_path).unwrap_or(ContentKind::Markdown);
        Self {
            input_path,
            kind,
            url: String::new(),
            title: String::new(),
            date,
            tags: Vec::new(),
            category: None,
            layout: None,
            body: String::new(),
            data: HashMap::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// 是否位于指定目录（相对 input）之下
    pub fn is_under(&self, dir: &Path) -> bool {
        self.input_path.starts_with(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn kind_from_extension() {
        assert_eq!(ContentKind::from_path(Path::new("a/b.md")), Some(ContentKind::Markdown));
        assert_eq!(ContentKind::from_path(Path::new("index.html")), Some(ContentKind::Template));
        assert_eq!(ContentKind::from_path(Path::new("style.css")), None);
        assert_eq!(ContentKind::from_path(Path::new("README")), None);
    }

    #[test]
    fn is_under_matches_path_components() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let item = ContentItem::new("posts/hello.md", date);
        assert!(item.is_under(Path::new("posts")));
        assert!(!ContentItem::new("postscript.md", date).is_under(Path::new("posts")));
    }

    #[test]
    fn serializes_date_as_rfc3339() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        let item = ContentItem::new("posts/a.md", date).with_tags(["rust"]);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["date"], "2024-01-05T08:00:00Z");
        assert_eq!(json["tags"][0], "rust");
        assert_eq!(json["kind"], "markdown");
    }
}
