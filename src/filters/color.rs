use std::collections::HashMap;

/// 默认标签颜色（灰色）
pub const DEFAULT_TAG_COLOR: &str = "#6b7280";

/// 标签 → 颜色映射表，键统一为小写，构建期间只读
#[derive(Debug, Clone)]
pub struct TagColorTable {
    colors: HashMap<String, String>,
    default_color: String,
}

impl TagColorTable {
    pub fn new(colors: HashMap<String, String>, default_color: impl Into<String>) -> Self {
        let colors = colors
            .into_iter()
            .map(|(tag, color)| (tag.to_lowercase(), color))
            .collect();
        Self {
            colors,
            default_color: default_color.into(),
        }
    }

    /// 空表，所有标签都解析为默认颜色
    pub fn empty(default_color: impl Into<String>) -> Self {
        Self::new(HashMap::new(), default_color)
    }

    /// 查找标签颜色（大小写不敏感），缺失或未登记时返回默认颜色
    pub fn resolve(&self, tag: Option<&str>) -> &str {
        match tag {
            Some(t) if !t.is_empty() => self
                .colors
                .get(&t.to_lowercase())
                .map(String::as_str)
                .unwrap_or(&self.default_color),
            _ => &self.default_color,
        }
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for TagColorTable {
    fn default() -> Self {
        Self::empty(DEFAULT_TAG_COLOR)
    }
}
