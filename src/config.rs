use crate::filters::color::DEFAULT_TAG_COLOR;
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "quillpost.toml";

#[derive(Debug, Default, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteInfo,
    #[serde(default)]
    pub dirs: DirConfig,
    #[serde(default)]
    pub collections: CollectionConfig,
    #[serde(default)]
    pub tag_colors: TagColorConfig,
    #[serde(default)]
    pub passthrough: PassthroughConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Deserialize)]
pub struct SiteInfo {
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_language")]
    pub language: String,
}

/// 目录布局，includes / data 相对 input，output 相对项目根目录
#[derive(Debug, Deserialize)]
pub struct DirConfig {
    #[serde(default = "default_input_dir")]
    pub input: String,
    #[serde(default = "default_includes_dir")]
    pub includes: String,
    #[serde(default = "default_data_dir")]
    pub data: String,
    #[serde(default = "default_output_dir")]
    pub output: String,
}

#[derive(Debug, Deserialize)]
pub struct CollectionConfig {
    #[serde(default = "default_posts_dir")]
    pub posts_dir: String,
    /// 仅用于集合归属、不参与展示的标签
    #[serde(default = "default_ignored_tags")]
    pub ignored_tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TagColorConfig {
    #[serde(default = "default_tag_color_file")]
    pub file: String,
    #[serde(default = "default_tag_color")]
    pub default_color: String,
}

#[derive(Debug, Deserialize)]
pub struct PassthroughConfig {
    #[serde(default = "default_passthrough_source")]
    pub source: String,
    #[serde(default = "default_passthrough_target")]
    pub target: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl SiteConfig {
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("读取 {} 失败：{}", CONFIG_FILE, e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("解析 {} 失败：{}", CONFIG_FILE, e))?;
        Ok(config)
    }

    pub fn input_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.dirs.input)
    }

    pub fn includes_dir(&self, root: &Path) -> PathBuf {
        self.input_dir(root).join(&self.dirs.includes)
    }

    pub fn data_dir(&self, root: &Path) -> PathBuf {
        self.input_dir(root).join(&self.dirs.data)
    }

    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.dirs.output)
    }

    pub fn passthrough_source(&self, root: &Path) -> PathBuf {
        self.input_dir(root).join(&self.passthrough.source)
    }

    pub fn passthrough_target(&self, root: &Path) -> PathBuf {
        self.output_dir(root).join(&self.passthrough.target)
    }
}

// 默认值函数
fn default_site_title() -> String { "My Blog".into() }
fn default_language() -> String { "en".into() }
fn default_input_dir() -> String { "src".into() }
fn default_includes_dir() -> String { "_includes".into() }
fn default_data_dir() -> String { "_data".into() }
fn default_output_dir() -> String { "_site".into() }
fn default_posts_dir() -> String { "posts".into() }
fn default_ignored_tags() -> Vec<String> { vec!["all".into(), "posts".into()] }
fn default_tag_color_file() -> String { "tagColors.json".into() }
fn default_tag_color() -> String { DEFAULT_TAG_COLOR.into() }
fn default_passthrough_source() -> String { "assets".into() }
fn default_passthrough_target() -> String { "assets".into() }
fn default_log_level() -> String { "info".into() }
fn default_true() -> bool { true }

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            url: String::new(),
            description: String::new(),
            language: default_language(),
        }
    }
}

impl Default for DirConfig {
    fn default() -> Self {
        Self {
            input: default_input_dir(),
            includes: default_includes_dir(),
            data: default_data_dir(),
            output: default_output_dir(),
        }
    }
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            posts_dir: default_posts_dir(),
            ignored_tags: default_ignored_tags(),
        }
    }
}

impl Default for TagColorConfig {
    fn default() -> Self {
        Self {
            file: default_tag_color_file(),
            default_color: default_tag_color(),
        }
    }
}

impl Default for PassthroughConfig {
    fn default() -> Self {
        Self {
            source: default_passthrough_source(),
            target: default_passthrough_target(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = SiteConfig::parse("").unwrap();
        assert_eq!(config.site.title, "My Blog");
        assert_eq!(config.dirs.input, "src");
        assert_eq!(config.dirs.output, "_site");
        assert_eq!(config.collections.ignored_tags, ["all", "posts"]);
        assert_eq!(config.tag_colors.default_color, DEFAULT_TAG_COLOR);
        assert!(config.build.parallel);
    }

    #[test]
    fn overrides_and_paths() {
        let config = SiteConfig::parse(
            r#"
[site]
title = "Notes"
url = "https://notes.example.com"

[dirs]
input = "content"
output = "public"

[collections]
posts_dir = "blog"
ignored_tags = ["blog"]

[build]
parallel = false
log_level = "debug"
"#,
        )
        .unwrap();
        let root = Path::new("/project");
        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.collections.posts_dir, "blog");
        assert_eq!(config.includes_dir(root), Path::new("/project/content/_includes"));
        assert_eq!(config.data_dir(root), Path::new("/project/content/_data"));
        assert_eq!(config.output_dir(root), Path::new("/project/public"));
        assert_eq!(config.passthrough_target(root), Path::new("/project/public/assets"));
        assert_eq!(config.build.log_level, "debug");
        assert!(!config.build.parallel);
    }

    #[test]
    fn site_title_is_required_when_section_present() {
        assert!(SiteConfig::parse("[site]\nurl = \"https://x\"").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE));
    }
}
