use crate::config::SiteConfig;
use crate::content::{ContentItem, ContentKind};
use crate::filters::slugify;
use icu_collator::{Collator, CollatorOptions, Strength};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// 判断内容条目是否属于博客文章集合
#[derive(Debug, Clone)]
pub struct PostMatcher {
    posts_dir: PathBuf,
}

impl PostMatcher {
    pub fn new(posts_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
        }
    }

    /// posts 目录下的 Markdown 文件才算文章
    pub fn matches(&self, item: &ContentItem) -> bool {
        item.kind == ContentKind::Markdown && item.is_under(&self.posts_dir)
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }
}

/// 供模板使用的集合
#[derive(Debug, Serialize)]
pub struct Collections<'a> {
    pub all: Vec<&'a ContentItem>,
    pub posts: Vec<&'a ContentItem>,
    #[serde(rename = "tagList")]
    pub tag_list: Vec<String>,
    #[serde(rename = "categoryList")]
    pub category_list: Vec<String>,
}

/// 从全部内容构建文章、标签和分类集合
pub fn build_collections<'a>(items: &'a [ContentItem], config: &SiteConfig) -> Collections<'a> {
    let matcher = PostMatcher::new(&config.collections.posts_dir);
    let posts = build_posts(items, &matcher);
    let tag_list = build_tag_list(posts.iter().copied(), &config.collections.ignored_tags);
    let category_list = build_category_list(posts.iter().copied());

    tracing::debug!(
        "集合：{} 篇文章，{} 个标签，{} 个分类",
        posts.len(),
        tag_list.len(),
        category_list.len()
    );

    Collections {
        all: items.iter().collect(),
        posts,
        tag_list,
        category_list,
    }
}

/// 筛选文章并按日期降序排列，日期相同时保持发现顺序
pub fn build_posts<'a>(items: &'a [ContentItem], matcher: &PostMatcher) -> Vec<&'a ContentItem> {
    let mut posts: Vec<&ContentItem> = items.iter().filter(|i| matcher.matches(i)).collect();
    // sort_by 是稳定排序
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    posts
}

/// 汇总所有文章的标签：按 slug 去重，保留首次出现的原文，排除保留标签和 slug 为空的标签
pub fn build_tag_list<'a, I>(posts: I, ignored: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a ContentItem>,
{
    let ignored: HashSet<&str> = ignored.iter().map(String::as_str).collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut tags = Vec::new();

    for post in posts {
        for tag in &post.tags {
            if ignored.contains(tag.as_str()) {
                continue;
            }
            let slug = slugify(tag);
            if slug.is_empty() {
                continue;
            }
            if seen.insert(slug) {
                tags.push(tag.clone());
            }
        }
    }

    locale_sort(&mut tags);
    tags
}

/// 汇总所有文章的分类（精确匹配去重，忽略空分类）
pub fn build_category_list<'a, I>(posts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ContentItem>,
{
    let unique: BTreeSet<&str> = posts
        .into_iter()
        .filter_map(|p| p.category.as_deref())
        .filter(|c| !c.is_empty())
        .collect();

    let mut categories: Vec<String> = unique.into_iter().map(str::to_string).collect();
    locale_sort(&mut categories);
    categories
}

/// 按 Unicode 根排序规则（tertiary 强度）排序：重音与大小写只在基础字母相同时区分
pub fn locale_sort(values: &mut [String]) {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);

    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => values.sort_by(|a, b| collator.compare(a, b)),
        Err(e) => {
            tracing::warn!("排序规则加载失败，按小写字母排序：{}", e);
            values.sort_by(|a, b| lowercase_cmp(a, b));
        }
    }
}

fn lowercase_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
