use crate::config::SiteConfig;
use crate::content::frontmatter::{self, TagsField};
use crate::content::markdown;
use crate::content::{ContentItem, ContentKind};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// 加载 input 目录下的所有内容条目，顺序与发现顺序（按文件名排序）一致
///
/// 单个文件加载失败只记录错误，不中断构建。
pub fn load_items(project_root: &Path, config: &SiteConfig) -> Result<Vec<ContentItem>> {
    let input_dir = config.input_dir(project_root);
    if !input_dir.exists() {
        tracing::warn!("内容目录不存在：{}", input_dir.display());
        return Ok(Vec::new());
    }

    let paths = discover(&input_dir, config, project_root)?;
    tracing::debug!("发现 {} 个内容文件", paths.len());

    let results: Vec<(PathBuf, Result<Option<ContentItem>>)> = if config.build.parallel {
        paths
            .into_par_iter()
            .map(|p| {
                let item = load_item(&input_dir, &p);
                (p, item)
            })
            .collect()
    } else {
        paths
            .into_iter()
            .map(|p| {
                let item = load_item(&input_dir, &p);
                (p, item)
            })
            .collect()
    };

    let mut items = Vec::with_capacity(results.len());
    for (path, result) in results {
        match result {
            Ok(Some(item)) => items.push(item),
            Ok(None) => tracing::debug!("跳过草稿：{}", path.display()),
            Err(e) => tracing::error!("加载内容失败 {}: {:#}", path.display(), e),
        }
    }
    Ok(items)
}

/// 遍历 input 目录，跳过 includes / data / 静态资源 / 输出目录和隐藏文件
fn discover(input_dir: &Path, config: &SiteConfig, project_root: &Path) -> Result<Vec<PathBuf>> {
    let skipped = [
        config.includes_dir(project_root),
        config.data_dir(project_root),
        config.passthrough_source(project_root),
        config.output_dir(project_root),
    ];
    let is_skipped = |entry: &DirEntry| {
        entry.depth() > 0 && (is_hidden(entry) || skipped.iter().any(|s| entry.path() == s))
    };

    let mut paths = Vec::new();
    for entry in WalkDir::new(input_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped(e))
    {
        let entry = entry?;
        if entry.file_type().is_file() && ContentKind::from_path(entry.path()).is_some() {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// 加载单个文件；草稿返回 `None`
fn load_item(input_dir: &Path, path: &Path) -> Result<Option<ContentItem>> {
    let parsed = frontmatter::parse_file(path)
        .with_context(|| format!("读取文件失败：{}", path.display()))?;
    let fm = parsed.front_matter;

    if fm.draft.unwrap_or(false) {
        return Ok(None);
    }

    let input_path = path.strip_prefix(input_dir)?.to_path_buf();
    let kind = ContentKind::from_path(path)
        .with_context(|| format!("不支持的文件类型：{}", path.display()))?;

    let date = match fm.date.as_deref() {
        Some(s) => frontmatter::parse_date(s)?,
        None => file_date(path)?,
    };

    let title = fm.title.unwrap_or_else(|| {
        input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    });
    let url = fm.permalink.unwrap_or_else(|| url_for(&input_path));

    let body = match kind {
        ContentKind::Markdown => markdown::render_markdown(&parsed.body),
        ContentKind::Template => parsed.body,
    };

    Ok(Some(ContentItem {
        input_path,
        kind,
        url,
        title,
        date,
        tags: fm.tags.map(TagsField::into_vec).unwrap_or_default(),
        category: fm.category,
        layout: fm.layout,
        body,
        data: fm.extra,
    }))
}

/// 未声明日期时取文件创建时间，平台不支持时退回修改时间
fn file_date(path: &Path) -> Result<DateTime<Utc>> {
    let meta = std::fs::metadata(path)?;
    let time = meta.created().or_else(|_| meta.modified())?;
    Ok(DateTime::<Utc>::from(time))
}

/// 由相对路径推导 URL：`posts/hello.md` → `/posts/hello/`，`index.*` 映射到所在目录
pub fn url_for(input_path: &Path) -> String {
    let mut segments: Vec<String> = input_path
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    if let Some(stem) = input_path.file_stem().map(|s| s.to_string_lossy())
        && stem != "index"
    {
        segments.push(stem.to_string());
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}

/// URL 对应的输出文件路径，以 `/` 结尾的 URL 写入 `index.html`
pub fn output_path(output_dir: &Path, url: &str) -> PathBuf {
    let rel = url.trim_start_matches('/');
    if url.ends_with('/') {
        output_dir.join(rel).join("index.html")
    } else {
        output_dir.join(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn urls_from_paths() {
        assert_eq!(url_for(Path::new("index.html")), "/");
        assert_eq!(url_for(Path::new("about.md")), "/about/");
        assert_eq!(url_for(Path::new("posts/hello.md")), "/posts/hello/");
        assert_eq!(url_for(Path::new("posts/index.md")), "/posts/");
        assert_eq!(url_for(Path::new("posts/2024/trip.md")), "/posts/2024/trip/");
    }

    #[test]
    fn output_paths_from_urls() {
        let out = Path::new("/site");
        assert_eq!(output_path(out, "/"), Path::new("/site/index.html"));
        assert_eq!(output_path(out, "/posts/a/"), Path::new("/site/posts/a/index.html"));
        assert_eq!(output_path(out, "/feed.xml"), Path::new("/site/feed.xml"));
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn load(parallel: bool) -> Vec<ContentItem> {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "src/posts/b.md", "---\ntitle: B\ndate: 2024-02-01\ntags: [posts, Rust]\ncategory: dev\n---\n# Hi\n");
        write(root, "src/posts/a.md", "---\ntitle: A\ndate: 2024-01-01\ntags: posts\n---\ntext");
        write(root, "src/posts/draft.md", "---\ndraft: true\ndate: 2024-01-01\n---\nwip");
        write(root, "src/posts/broken.md", "---\ndate: someday\n---\nbad");
        write(root, "src/index.html", "---\ntitle: Home\nlayout: base.html\n---\n{{ site.title }}");
        write(root, "src/_includes/base.html", "{{ content }}");
        write(root, "src/_data/site.json", "{}");
        write(root, "src/assets/readme.md", "not content");
        write(root, "src/.hidden/secret.md", "hidden");
        write(root, "src/notes.txt", "ignored");

        let mut config = SiteConfig::default();
        config.build.parallel = parallel;
        load_items(root, &config).unwrap()
    }

    #[test]
    fn loads_content_and_skips_reserved_dirs() {
        let items = load(false);
        let paths: Vec<_> = items.iter().map(|i| i.input_path.to_string_lossy().to_string()).collect();
        assert_eq!(paths, ["index.html", "posts/a.md", "posts/b.md"]);

        let b = &items[2];
        assert_eq!(b.title, "B");
        assert_eq!(b.url, "/posts/b/");
        assert_eq!(b.tags, ["posts", "Rust"]);
        assert_eq!(b.category.as_deref(), Some("dev"));
        assert!(b.body.contains("<h1>Hi</h1>"));

        let index = &items[0];
        assert_eq!(index.kind, ContentKind::Template);
        assert_eq!(index.layout.as_deref(), Some("base.html"));
        assert!(index.body.contains("{{ site.title }}"));
        assert_eq!(index.url, "/");
    }

    #[test]
    fn parallel_load_keeps_discovery_order() {
        let sequential: Vec<_> = load(false).into_iter().map(|i| i.input_path).collect();
        let parallel: Vec<_> = load(true).into_iter().map(|i| i.input_path).collect();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn missing_date_falls_back_to_file_time() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/page.md", "no front matter");
        let items = load_items(dir.path(), &SiteConfig::default()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "page");
        assert!(items[0].date <= Utc::now());
    }

    #[test]
    fn draft_with_numeric_tags_stays_unpublished() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "src/posts/secret.md",
            "---\ntitle: Secret\ndraft: true\ndate: 2024-01-01\ntags: [posts, 2024]\n---\nhidden",
        );
        let items = load_items(dir.path(), &SiteConfig::default()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn numeric_tags_load_as_text() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "src/posts/year.md",
            "---\ntitle: Year\ndate: 2024-01-01\ntags: [posts, 2024]\n---\nx",
        );
        let items = load_items(dir.path(), &SiteConfig::default()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Year");
        assert_eq!(items[0].tags, ["posts", "2024"]);
    }

    #[test]
    fn mistyped_front_matter_is_skipped_not_published() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "src/posts/bad-draft.md",
            "---\ntitle: Secret\ndraft: maybe\ndate: 2024-01-01\n---\nhidden",
        );
        write(
            dir.path(),
            "src/posts/bad-title.md",
            "---\ntitle: [a, b]\ndate: 2024-01-01\n---\nx",
        );
        write(dir.path(), "src/posts/good.md", "---\ntitle: Good\ndate: 2024-01-02\n---\nok");

        let items = load_items(dir.path(), &SiteConfig::default()).unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Good"]);
    }

    #[test]
    fn permalink_overrides_url() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/feed.html", "---\npermalink: /feed.xml\ndate: 2024-01-01\n---\n<feed/>");
        let items = load_items(dir.path(), &SiteConfig::default()).unwrap();
        assert_eq!(items[0].url, "/feed.xml");
    }
}
