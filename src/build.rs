pub mod assets;
pub mod load;
pub mod render;

use crate::collections::build_collections;
use crate::config::SiteConfig;
use crate::data::{load_global_data, load_tag_colors};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 构建运行参数
#[derive(Debug, Default)]
pub struct BuildParams {
    /// 构建前清空输出目录
    pub clean: bool,
}

#[derive(Debug, Default)]
pub struct BuildStats {
    pub items: usize,
    pub posts: usize,
    pub tags: usize,
    pub categories: usize,
    pub pages_written: usize,
    pub assets_copied: usize,
    pub elapsed: Duration,
}

pub fn run(project_root: &Path, config: &SiteConfig, params: BuildParams) -> Result<BuildStats> {
    tracing::info!("开始构建...");
    let start = Instant::now();
    let output_dir = config.output_dir(project_root);

    if params.clean && output_dir.exists() {
        std::fs::remove_dir_all(&output_dir)?;
        tracing::info!("已清除输出目录：{}", output_dir.display());
    }
    std::fs::create_dir_all(&output_dir)?;

    let data = load_global_data(&config.data_dir(project_root))?;
    let tag_colors = Arc::new(load_tag_colors(project_root, config)?);

    let items = load::load_items(project_root, config)?;
    let collections = build_collections(&items, config);

    let pages_written =
        render::render_pages(project_root, config, &items, &collections, &data, tag_colors)?;
    let assets_copied = assets::copy_passthrough(project_root, config)?;

    let stats = BuildStats {
        items: items.len(),
        posts: collections.posts.len(),
        tags: collections.tag_list.len(),
        categories: collections.category_list.len(),
        pages_written,
        assets_copied,
        elapsed: start.elapsed(),
    };

    tracing::info!(
        "构建完成：{} 个页面（{} 篇文章，{} 个标签，{} 个分类），复制 {} 个静态文件，耗时 {:?}",
        stats.pages_written,
        stats.posts,
        stats.tags,
        stats.categories,
        stats.assets_copied,
        stats.elapsed
    );
    Ok(stats)
}
