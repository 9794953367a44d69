use crate::error::{AppError, AppResult, PDF_MIME};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 分析服务地址（不含路径）
    pub api_base_url: String,
    /// 一次最多可选择的文件数量
    pub max_files: usize,
    /// 允许上传的 MIME 类型
    pub accepted_types: Vec<String>,
    /// 分析请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 结果存储目录
    pub store_dir: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            max_files: 3,
            accepted_types: vec![PDF_MIME.to_string()],
            request_timeout_secs: 120,
            store_dir: PathBuf::from(".research_gaps"),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// 从 TOML 文件加载配置，缺失的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("无法读取配置文件 {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// 从 TOML 文本解析配置
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| AppError::Config(format!("TOML解析失败: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 加载配置：可选的配置文件打底，环境变量覆盖
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config = match path {
            Some(p) => Self::from_toml_file(p)?.apply_env(),
            None => Self::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    fn apply_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// 用给定的变量查找函数覆盖配置项
    ///
    /// 无法解析的值会被忽略，保留原值。
    pub fn with_overrides<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_base_url: lookup("RESEARCH_GAP_API_BASE_URL").unwrap_or(self.api_base_url),
            max_files: lookup("RESEARCH_GAP_MAX_FILES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.max_files),
            accepted_types: lookup("RESEARCH_GAP_ACCEPTED_TYPES")
                .map(|v| parse_type_list(&v))
                .filter(|types| !types.is_empty())
                .unwrap_or(self.accepted_types),
            request_timeout_secs: lookup("RESEARCH_GAP_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.request_timeout_secs),
            store_dir: lookup("RESEARCH_GAP_STORE_DIR")
                .map(PathBuf::from)
                .unwrap_or(self.store_dir),
            verbose_logging: lookup("RESEARCH_GAP_VERBOSE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(self.verbose_logging),
        }
    }

    /// 校验配置是否可用
    pub fn validate(&self) -> AppResult<()> {
        if self.max_files == 0 {
            return Err(AppError::Config("max_files 必须大于 0".to_string()));
        }
        if self.accepted_types.is_empty() {
            return Err(AppError::Config("accepted_types 不能为空".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::Config("request_timeout_secs 必须大于 0".to_string()));
        }
        Ok(())
    }

    /// 请求超时时间
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_type_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
