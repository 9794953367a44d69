use serde::{Deserialize, Serialize};
use std::fmt;

/// 研究空白的类别
///
/// 后端返回的未知类别原样保留，显示时使用 `other` 的样式。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GapCategory {
    /// 方法
    Methodology,
    /// 理论
    Theory,
    /// 应用
    Application,
    /// 数据
    Data,
    /// 其他
    Other,
    /// 无法识别的类别
    Unrecognized(String),
}

/// 类别的显示样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub icon: &'static str,
    pub color: &'static str,
    /// 终端前景色
    pub ansi: &'static str,
}

static OTHER_STYLE: CategoryStyle = CategoryStyle {
    icon: "🔍",
    color: "gray",
    ansi: "\x1b[90m",
};

static CATEGORY_STYLES: phf::Map<&'static str, CategoryStyle> = phf::phf_map! {
    "methodology" => CategoryStyle { icon: "⚙️", color: "blue", ansi: "\x1b[34m" },
    "theory" => CategoryStyle { icon: "📚", color: "purple", ansi: "\x1b[35m" },
    "application" => CategoryStyle { icon: "📱", color: "green", ansi: "\x1b[32m" },
    "data" => CategoryStyle { icon: "📊", color: "yellow", ansi: "\x1b[33m" },
    "other" => CategoryStyle { icon: "🔍", color: "gray", ansi: "\x1b[90m" },
};

impl GapCategory {
    /// 从标签解析类别（大小写不敏感）
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "methodology" => GapCategory::Methodology,
            "theory" => GapCategory::Theory,
            "application" => GapCategory::Application,
            "data" => GapCategory::Data,
            "other" => GapCategory::Other,
            _ => GapCategory::Unrecognized(label.to_string()),
        }
    }

    /// 原始标签
    pub fn label(&self) -> &str {
        match self {
            GapCategory::Methodology => "methodology",
            GapCategory::Theory => "theory",
            GapCategory::Application => "application",
            GapCategory::Data => "data",
            GapCategory::Other => "other",
            GapCategory::Unrecognized(label) => label,
        }
    }

    /// 首字母大写的显示名称
    pub fn display_name(&self) -> String {
        let mut chars = self.label().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// 显示样式，未知类别回退到 `other`
    pub fn style(&self) -> &'static CategoryStyle {
        match self {
            GapCategory::Unrecognized(_) => &OTHER_STYLE,
            known => CATEGORY_STYLES.get(known.label()).unwrap_or(&OTHER_STYLE),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, GapCategory::Unrecognized(_))
    }
}

impl From<String> for GapCategory {
    fn from(label: String) -> Self {
        GapCategory::from_label(&label)
    }
}

impl From<GapCategory> for String {
    fn from(category: GapCategory) -> Self {
        category.label().to_string()
    }
}

impl fmt::Display for GapCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_styles() {
        assert_eq!(GapCategory::Theory.style().icon, "📚");
        assert_eq!(GapCategory::Methodology.style().color, "blue");
        assert_eq!(GapCategory::Data.style().color, "yellow");
    }

    #[test]
    fn test_unrecognized_falls_back_to_other() {
        let category = GapCategory::from_label("ethics");
        assert!(!category.is_recognized());
        assert_eq!(category.style(), GapCategory::Other.style());
        // 显示名称保留原始标签
        assert_eq!(category.display_name(), "Ethics");
    }

    #[test]
    fn test_serde_keeps_label() {
        let parsed: GapCategory = serde_json::from_str("\"Application\"").unwrap();
        assert_eq!(parsed, GapCategory::Application);

        let unknown: GapCategory = serde_json::from_str("\"policy\"").unwrap();
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"policy\"");
    }
}
