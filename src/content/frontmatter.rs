use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// `tags` 字段既可以是单个值，也可以是列表
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TagsField {
    One(TagValue),
    Many(Vec<TagValue>),
}

impl TagsField {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            TagsField::One(tag) => vec![tag.into_string()],
            TagsField::Many(tags) => tags.into_iter().map(TagValue::into_string).collect(),
        }
    }
}

/// 单个标签：YAML 里的 `2024`、`true` 等标量按文本处理
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl TagValue {
    fn into_string(self) -> String {
        match self {
            TagValue::Text(s) => s,
            TagValue::Number(n) => n.to_string(),
            TagValue::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawFrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub tags: Option<TagsField>,
    pub category: Option<String>,
    pub layout: Option<String>,
    pub permalink: Option<String>,
    pub draft: Option<bool>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

pub struct ParsedContent {
    pub front_matter: RawFrontMatter,
    pub body: String,
}

/// 解析文件，分离 Front Matter 和正文
pub fn parse_file(path: &Path) -> Result<ParsedContent> {
    let content = std::fs::read_to_string(path)?;
    parse_content(&content)
}

/// 解析内容字符串，分离 Front Matter 和正文
///
/// 存在 Front Matter 但字段类型不符时返回错误。
pub fn parse_content(content: &str) -> Result<ParsedContent> {
    let matter = gray_matter::Matter::<gray_matter::engine::YAML>::new();
    let parsed = matter.parse(content);

    let front_matter = match parsed.data {
        None | Some(gray_matter::Pod::Null) => RawFrontMatter::default(),
        Some(pod) => pod
            .deserialize::<RawFrontMatter>()
            .context("Front Matter 字段无效")?,
    };

    Ok(ParsedContent {
        front_matter,
        body: parsed.content,
    })
}

/// 解析日期字符串为 UTC 时间
pub fn parse_date(date_str: &str) -> Result<DateTime<Utc>> {
    let s = date_str.trim();

    // RFC 3339: 2024-01-15T10:30:00+08:00
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.to_utc());
    }
    // 不带时区的日期时间按 UTC 处理
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.and_utc());
        }
    }
    // 纯日期：2024-01-15 / 2024/01/15
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
    }
    anyhow::bail!("无法解析日期：{}", s)
}
