use crate::build::load::output_path;
use crate::collections::Collections;
use crate::config::SiteConfig;
use crate::content::{ContentItem, ContentKind};
use crate::data::GlobalData;
use crate::filters::{self, color::TagColorTable};
use anyhow::{Context, Result};
use minijinja::{Environment, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// 构建渲染环境：模板从 includes 目录加载，注册过滤器和全局变量
pub fn build_environment(
    project_root: &Path,
    config: &SiteConfig,
    collections: &Collections<'_>,
    data: &GlobalData,
    tag_colors: Arc<TagColorTable>,
) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_loader(minijinja::path_loader(config.includes_dir(project_root)));
    filters::register_filters(&mut env, tag_colors);

    for (name, value) in &data.values {
        env.add_global(name.clone(), Value::from_serialize(value));
    }

    env.add_global(
        "site",
        Value::from_serialize(serde_json::json!({
            "title": config.site.title,
            "url": config.site.url,
            "description": config.site.description,
            "language": config.site.language,
        })),
    );
    env.add_global("collections", Value::from_serialize(collections));
    env
}

/// 渲染所有内容条目到输出目录，返回写入的页面数
pub fn render_pages(
    project_root: &Path,
    config: &SiteConfig,
    items: &[ContentItem],
    collections: &Collections<'_>,
    data: &GlobalData,
    tag_colors: Arc<TagColorTable>,
) -> Result<usize> {
    let output_dir = config.output_dir(project_root);
    let env = build_environment(project_root, config, collections, data, tag_colors);

    let mut written = 0;
    for item in items {
        let html = match render_item(&env, item) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("渲染页面 {} 失败：{:#}", item.url, e);
                continue;
            }
        };

        let file_path = output_path(&output_dir, &item.url);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&file_path, html)
            .with_context(|| format!("写入失败：{}", file_path.display()))?;
        tracing::debug!("已写入：{}", file_path.display());
        written += 1;
    }

    tracing::info!("渲染完成，共 {} 个页面", written);
    Ok(written)
}

/// 渲染单个条目：模板条目先渲染自身，再套用 layout（若有）
pub fn render_item(env: &Environment<'_>, item: &ContentItem) -> Result<String> {
    let mut ctx = page_context(item);

    let content = match item.kind {
        ContentKind::Markdown => item.body.clone(),
        ContentKind::Template => env
            .render_str(&item.body, &ctx)
            .with_context(|| format!("模板渲染失败：{}", item.input_path.display()))?,
    };

    let Some(layout) = item.layout.as_deref() else {
        return Ok(content);
    };

    let tmpl = env
        .get_template(layout)
        .with_context(|| format!("layout {} 不存在", layout))?;
    ctx.insert("content".into(), Value::from_safe_string(content));
    let html = tmpl
        .render(&ctx)
        .with_context(|| format!("layout {} 渲染失败", layout))?;
    Ok(html)
}

/// 模板上下文：front matter 额外字段 + 标准字段 + `page`
fn page_context(item: &ContentItem) -> BTreeMap<String, Value> {
    let mut ctx: BTreeMap<String, Value> = item
        .data
        .iter()
        .map(|(k, v)| (k.clone(), Value::from_serialize(v)))
        .collect();

    ctx.insert("title".into(), Value::from(item.title.as_str()));
    ctx.insert("date".into(), Value::from_serialize(item.date));
    ctx.insert("tags".into(), Value::from_serialize(&item.tags));
    ctx.insert("category".into(), Value::from_serialize(&item.category));
    ctx.insert(
        "page".into(),
        Value::from_serialize(serde_json::json!({
            "url": item.url,
            "inputPath": item.input_path,
            "date": item.date,
        })),
    );
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::build_collections;
    use chrono::{TimeZone, Utc};
    use std::fs;

    fn item(path: &str, body: &str) -> ContentItem {
        let date = Utc.with_ymd_and_hms(2024, 5, 4, 0, 0, 0).unwrap();
        let mut item = ContentItem::new(path, date).with_tags(["posts", "Rust"]);
        item.title = "Hello <World>".into();
        item.url = "/posts/hello/".into();
        item.body = body.into();
        item
    }

    fn with_env<F: FnOnce(&Environment<'_>)>(items: &[ContentItem], f: F) {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::default();
        let includes = config.includes_dir(dir.path());
        fs::create_dir_all(&includes).unwrap();
        fs::write(
            includes.join("post.html"),
            "<h1>{{ title }}</h1><time datetime=\"{{ date | htmlDateString }}\">{{ date | readableDate }}</time>{{ content }}",
        )
        .unwrap();

        let collections = build_collections(items, &config);
        let env = build_environment(
            dir.path(),
            &config,
            &collections,
            &GlobalData::default(),
            Arc::new(TagColorTable::default()),
        );
        f(&env);
    }

    #[test]
    fn markdown_item_is_wrapped_in_layout() {
        let mut post = item("posts/hello.md", "<p>Body</p>");
        post.layout = Some("post.html".into());
        let items = vec![post];
        with_env(&items, |env| {
            let html = render_item(env, &items[0]).unwrap();
            assert_eq!(
                html,
                "<h1>Hello &lt;World&gt;</h1><time datetime=\"2024-05-04\">May 4, 2024</time><p>Body</p>"
            );
        });
    }

    #[test]
    fn template_item_sees_collections() {
        let posts = vec![
            item("posts/hello.md", ""),
            item("index.html", "{% for t in collections.tagList %}[{{ t }}]{% endfor %} {{ collections.posts | length }} {{ page.url }}"),
        ];
        with_env(&posts, |env| {
            let html = render_item(env, &posts[1]).unwrap();
            assert_eq!(html, "[Rust] 1 /posts/hello/");
        });
    }

    #[test]
    fn missing_layout_is_an_error() {
        let mut post = item("posts/hello.md", "x");
        post.layout = Some("nope.html".into());
        let items = vec![post];
        with_env(&items, |env| {
            assert!(render_item(env, &items[0]).is_err());
        });
    }
}
