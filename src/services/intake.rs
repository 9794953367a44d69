//! 文件选择校验服务 - 业务能力层
//!
//! 只负责"接收一批文件并校验"能力，不关心文件从哪里来

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{FileSet, UploadedFile};
use tracing::{debug, info, warn};

/// 校验策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakePolicy {
    /// 允许的 MIME 类型（小写）
    accepted_types: Vec<String>,
    /// 文件数量上限
    max_files: usize,
}

impl IntakePolicy {
    pub fn new(accepted_types: Vec<String>, max_files: usize) -> Self {
        Self {
            accepted_types: accepted_types
                .into_iter()
                .map(|t| t.to_ascii_lowercase())
                .collect(),
            max_files,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.accepted_types.clone(), config.max_files)
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn accepts(&self, mime_type: &str) -> bool {
        let mime_type = mime_type.to_ascii_lowercase();
        self.accepted_types.iter().any(|t| *t == mime_type)
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// 校验一批新文件并返回追加后的新列表
///
/// 整批处理：只要有一个文件类型不被接受，整批都被拒绝，原列表不变。
/// 类型检查先于数量检查。数量上限只由策略决定。
pub fn validate_batch(
    policy: &IntakePolicy,
    current: &FileSet,
    batch: Vec<UploadedFile>,
) -> AppResult<FileSet> {
    let (accepted, rejected): (Vec<UploadedFile>, Vec<UploadedFile>) =
        batch.into_iter().partition(|f| policy.accepts(&f.mime_type));

    if !rejected.is_empty() {
        return Err(AppError::InvalidFileType {
            rejected: rejected.into_iter().map(|f| f.name).collect(),
            accepted: policy.accepted_types.clone(),
        });
    }

    if current.len() + accepted.len() > policy.max_files {
        return Err(AppError::TooManyFiles {
            current: current.len(),
            offered: accepted.len(),
            max: policy.max_files,
        });
    }

    Ok(current.appended(accepted))
}

/// 删除指定位置的文件并返回新列表
pub fn remove_at(current: &FileSet, index: usize) -> AppResult<FileSet> {
    if index >= current.len() {
        return Err(AppError::IndexOutOfRange {
            index,
            len: current.len(),
        });
    }
    Ok(current.without(index))
}

/// 文件选择会话
///
/// 不可变值：每个操作都返回新的会话。
/// 失败时保留原列表并记录错误，成功时清除之前的错误。
#[derive(Debug, Clone)]
pub struct IntakeSession {
    policy: IntakePolicy,
    files: FileSet,
    last_error: Option<String>,
}

impl IntakeSession {
    /// 创建空会话
    pub fn new(policy: IntakePolicy) -> Self {
        Self {
            policy,
            files: FileSet::empty(),
            last_error: None,
        }
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    /// 最近一次操作失败时展示给用户的信息
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// 接收一批文件
    ///
    /// # 返回
    /// 返回新会话以及本次操作的结果
    pub fn offer(&self, batch: Vec<UploadedFile>) -> (Self, AppResult<()>) {
        // 空批次直接忽略
        if batch.is_empty() {
            debug!("收到空的文件批次，忽略");
            return (self.clone(), Ok(()));
        }

        let offered = batch.len();
        match validate_batch(&self.policy, &self.files, batch) {
            Ok(files) => {
                info!(
                    "✓ 已接受 {} 个文件，当前 {}/{}",
                    offered,
                    files.len(),
                    self.policy.max_files
                );
                (self.with_files(files), Ok(()))
            }
            Err(e) => {
                warn!("⚠️ 文件批次被拒绝: {}", e);
                (self.with_error(&e), Err(e))
            }
        }
    }

    /// 删除指定位置的文件
    pub fn remove(&self, index: usize) -> (Self, AppResult<()>) {
        match remove_at(&self.files, index) {
            Ok(files) => {
                debug!("已删除第 {} 个文件", index + 1);
                (self.with_files(files), Ok(()))
            }
            Err(e) => {
                warn!("⚠️ 删除失败: {}", e);
                (self.with_error(&e), Err(e))
            }
        }
    }

    /// 重置会话：丢弃已选文件和错误提示
    pub fn reset(&self) -> Self {
        Self::new(self.policy.clone())
    }

    /// 列表标题，如 "Uploaded Files (2/3)"
    pub fn summary(&self) -> String {
        format!(
            "Uploaded Files ({}/{})",
            self.files.len(),
            self.policy.max_files
        )
    }

    fn with_files(&self, files: FileSet) -> Self {
        Self {
            policy: self.policy.clone(),
            files,
            last_error: None,
        }
    }

    fn with_error(&self, error: &AppError) -> Self {
        Self {
            policy: self.policy.clone(),
            files: self.files.clone(),
            last_error: Some(error.user_message()),
        }
    }
}
