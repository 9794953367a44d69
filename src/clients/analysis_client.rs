//! 分析服务客户端
//!
//! 封装所有与研究空白分析服务相关的 HTTP 调用

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{AnalysisResponse, FileSet, ResultSet};
use crate::utils::logging::truncate_text;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

/// multipart 中文件字段的名称
const FILES_FIELD: &str = "files";

/// 分析能力
///
/// 提交流程只依赖这个能力，不关心具体的传输方式
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// 提交文件并返回研究空白列表
    async fn analyze(&self, files: &FileSet) -> AppResult<ResultSet>;

    /// 检查服务是否可用
    async fn health(&self) -> AppResult<HealthStatus>;
}

/// 健康检查结果
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}

/// 分析服务客户端
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// 创建新的分析服务客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::Config(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 分析接口地址
    pub fn analyze_url(&self) -> String {
        format!("{}/analyze", self.base_url)
    }

    /// 构建 multipart 表单，每个文件一个 `files` 字段
    fn build_form(files: &FileSet) -> AppResult<Form> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.content().to_vec())
                .file_name(file.name.clone())
                .mime_str(&file.mime_type)
                .map_err(|e| {
                    AppError::analysis_failed(format!("无效的 MIME 类型 {}: {}", file.mime_type, e))
                })?;
            form = form.part(FILES_FIELD, part);
        }
        Ok(form)
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisClient {
    async fn analyze(&self, files: &FileSet) -> AppResult<ResultSet> {
        let url = self.analyze_url();
        debug!("正在调用分析接口: {} (文件: {:?})", url, files.names());

        let form = Self::build_form(files)?;

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!("分析请求超时: {}", e);
                    AppError::analysis_failed(format!("请求超时: {}", e))
                } else {
                    warn!("分析请求失败: {}", e);
                    AppError::analysis_failed(format!("请求失败: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::analysis_failed(format!("读取响应失败: {}", e)))?;

        debug!("分析接口返回 HTTP {} ({} 字节)", status, body.len());

        parse_analysis_body(status, &body)
    }

    /// 健康检查
    ///
    /// # 返回
    /// 返回服务的状态信息
    async fn health(&self) -> AppResult<HealthStatus> {
        let url = format!("{}/", self.base_url);
        debug!("健康检查: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::analysis_failed(format!("健康检查请求失败: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::analysis_failed(format!(
                "健康检查返回 HTTP {}",
                status
            )));
        }

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| AppError::analysis_failed(format!("健康检查响应无法解析: {}", e)))
    }
}

/// 解析分析接口的响应
///
/// 非 2xx 状态、缺少 `research_gaps` 字段或结构不符都视为失败
pub(crate) fn parse_analysis_body(status: StatusCode, body: &str) -> AppResult<ResultSet> {
    if !status.is_success() {
        return Err(AppError::analysis_failed(format!(
            "HTTP {}: {}",
            status,
            truncate_text(body, 200)
        )));
    }

    let response: AnalysisResponse = serde_json::from_str(body)
        .map_err(|e| AppError::analysis_failed(format!("响应格式错误: {}", e)))?;

    Ok(response.research_gaps)
}
