use crate::config::SiteConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// 将静态资源目录原样复制到输出目录，返回复制的文件数
pub fn copy_passthrough(project_root: &Path, config: &SiteConfig) -> Result<usize> {
    let src = config.passthrough_source(project_root);
    if !src.exists() {
        tracing::debug!("静态资源目录不存在，跳过：{}", src.display());
        return Ok(0);
    }
    let dest = config.passthrough_target(project_root);
    let copied = copy_dir_recursive(&src, &dest)
        .with_context(|| format!("复制静态资源失败：{}", src.display()))?;
    tracing::info!("已复制 {} 个静态文件 → {}", copied, dest.display());
    Ok(copied)
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<usize> {
    std::fs::create_dir_all(dest)?;
    let mut copied = 0;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if src_path.is_dir() {
            copied += copy_dir_recursive(&src_path, &dest_path)?;
        } else {
            std::fs::copy(&src_path, &dest_path)?;
            tracing::debug!("已复制资源: {}", src_path.display());
            copied += 1;
        }
    }
    Ok(copied)
}
