use crate::config::{CONFIG_FILE, SiteConfig};
use crate::data::{load_global_data, load_tag_colors};
use anyhow::Result;
use std::path::Path;

pub struct CheckResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// 执行项目完整性检查，依次验证配置、目录和数据文件
pub fn run(project_root: &Path) -> Result<CheckResult> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let config = match check_config(project_root, &mut errors) {
        Some(config) => config,
        None => return Ok(CheckResult { errors, warnings }),
    };

    check_dirs(project_root, &config, &mut errors, &mut warnings);
    check_data(project_root, &config, &mut errors);

    Ok(CheckResult { errors, warnings })
}

fn check_config(root: &Path, errors: &mut Vec<String>) -> Option<SiteConfig> {
    if !root.join(CONFIG_FILE).exists() {
        errors.push(format!("缺少 {CONFIG_FILE} 配置文件"));
        return None;
    }
    match SiteConfig::load(root) {
        Ok(config) => Some(config),
        Err(e) => {
            errors.push(format!("{e}"));
            None
        }
    }
}

fn check_dirs(
    root: &Path,
    config: &SiteConfig,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let input = config.input_dir(root);
    if !input.exists() {
        errors.push(format!("内容目录 {}/ 不存在", config.dirs.input));
        return;
    }

    if !config.includes_dir(root).exists() {
        warnings.push(format!(
            "模板目录 {}/{}/ 不存在，layout 将无法加载",
            config.dirs.input, config.dirs.includes
        ));
    }

    if !input.join(&config.collections.posts_dir).exists() {
        warnings.push(format!(
            "文章目录 {}/{}/ 不存在",
            config.dirs.input, config.collections.posts_dir
        ));
    }

    if config.site.url.is_empty() {
        warnings.push("site.url 为空，htmlToAbsoluteUrls 将原样输出".to_string());
    }
}

fn check_data(root: &Path, config: &SiteConfig, errors: &mut Vec<String>) {
    if let Err(e) = load_global_data(&config.data_dir(root)) {
        errors.push(e.to_string());
    }
    if let Err(e) = load_tag_colors(root, config) {
        errors.push(e.to_string());
    }
}
