use crate::config::SiteConfig;
use crate::filters::color::TagColorTable;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("读取数据文件失败：{}：{source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解析数据文件失败：{}：{source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// `_data` 目录下的全局数据，键为文件名（不含扩展名）
#[derive(Debug, Default)]
pub struct GlobalData {
    pub values: BTreeMap<String, serde_json::Value>,
}

/// 加载数据目录下所有 `.json` 文件；目录不存在时返回空数据
pub fn load_global_data(data_dir: &Path) -> Result<GlobalData, DataError> {
    let mut data = GlobalData::default();
    if !data_dir.exists() {
        tracing::debug!("数据目录不存在：{}", data_dir.display());
        return Ok(data);
    }

    let entries = std::fs::read_dir(data_dir).map_err(|source| DataError::Read {
        path: data_dir.to_owned(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    for path in paths {
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
            continue;
        };
        let value = read_json::<serde_json::Value>(&path)?;
        tracing::debug!("已加载数据文件：{}", path.display());
        data.values.insert(stem, value);
    }

    Ok(data)
}

/// 加载标签颜色表；文件不存在时返回只含默认颜色的空表
pub fn load_tag_colors(root: &Path, config: &SiteConfig) -> Result<TagColorTable, DataError> {
    let path = config.data_dir(root).join(&config.tag_colors.file);
    let default_color = config.tag_colors.default_color.as_str();

    if !path.exists() {
        tracing::debug!("未找到标签颜色表 {}，使用默认颜色", path.display());
        return Ok(TagColorTable::empty(default_color));
    }

    let colors: HashMap<String, String> = read_json(&path)?;
    let table = TagColorTable::new(colors, default_color);
    tracing::debug!("已加载 {} 个标签颜色", table.len());
    Ok(table)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let content = std::fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DataError::Parse {
        path: path.to_owned(),
        source,
    })
}
