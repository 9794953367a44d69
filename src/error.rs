use thiserror::Error;

/// 默认唯一接受的 MIME 类型
pub const PDF_MIME: &str = "application/pdf";

/// 应用程序错误类型
///
/// 所有错误都在界面边界处恢复：设置可见的提示信息，系统保持在之前的有效状态。
#[derive(Debug, Error)]
pub enum AppError {
    /// 批次中存在不被接受的文件类型（整批拒绝）
    #[error("文件类型不被接受: {rejected:?} (允许的类型: {accepted:?})")]
    InvalidFileType {
        rejected: Vec<String>,
        accepted: Vec<String>,
    },

    /// 文件数量超过上限
    #[error("文件数量超出上限: 已有 {current} 个, 新增 {offered} 个, 上限 {max}")]
    TooManyFiles {
        current: usize,
        offered: usize,
        max: usize,
    },

    /// 删除时索引越界
    #[error("索引 {index} 超出范围 (共 {len} 个文件)")]
    IndexOutOfRange { index: usize, len: usize },

    /// 提交时文件列表为空
    #[error("提交的文件列表为空")]
    EmptySubmission,

    /// 已有提交正在进行
    #[error("已有分析请求正在进行")]
    SubmissionInFlight,

    /// 分析失败（网络 / HTTP / 解析错误统一归类）
    #[error("分析失败: {reason}")]
    AnalysisFailed { reason: String },

    /// 存储中没有结果
    #[error("未找到已保存的分析结果")]
    NoResultsFound,

    /// 存储中的结果无法解析
    #[error("已保存的分析结果已损坏: {source}")]
    ResultsCorrupted {
        #[source]
        source: serde_json::Error,
    },

    /// 读取待上传文件失败
    #[error("读取文件失败 ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 结果存储读写失败
    #[error("存储操作失败 ({key}): {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl AppError {
    /// 创建分析失败错误
    pub fn analysis_failed(reason: impl std::fmt::Display) -> Self {
        AppError::AnalysisFailed {
            reason: reason.to_string(),
        }
    }

    /// 创建存储错误
    pub fn storage(key: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Storage {
            key: key.into(),
            source,
        }
    }

    /// 展示给用户的提示信息
    ///
    /// 网络、HTTP 与解析失败统一为同一条提示，详细原因只写入日志。
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidFileType { accepted, .. } => match accepted.as_slice() {
                [only] if only == PDF_MIME => "Only PDF files are allowed".to_string(),
                _ => format!("Only files of type {} are allowed", accepted.join(", ")),
            },
            AppError::TooManyFiles { max, .. } => {
                format!("Maximum {} files allowed. Please remove some files.", max)
            }
            AppError::IndexOutOfRange { index, .. } => {
                format!("No uploaded file at position {}", index + 1)
            }
            AppError::EmptySubmission => "Please upload at least one PDF file".to_string(),
            AppError::SubmissionInFlight => {
                "An analysis is already running. Please wait for it to finish.".to_string()
            }
            AppError::AnalysisFailed { .. } => {
                "Failed to analyze papers. Please try again.".to_string()
            }
            AppError::NoResultsFound => {
                "No research gaps data found. Please upload papers first.".to_string()
            }
            AppError::ResultsCorrupted { .. } => "Failed to load research gaps data.".to_string(),
            AppError::FileRead { path, .. } => format!("Could not read file: {}", path),
            AppError::Storage { .. } => "Could not access saved results.".to_string(),
            AppError::Config(msg) => format!("Invalid configuration: {}", msg),
        }
    }

}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_match_ui_texts() {
        let err = AppError::TooManyFiles {
            current: 3,
            offered: 1,
            max: 3,
        };
        assert_eq!(
            err.user_message(),
            "Maximum 3 files allowed. Please remove some files."
        );

        let err = AppError::analysis_failed("HTTP 500");
        assert_eq!(
            err.user_message(),
            "Failed to analyze papers. Please try again."
        );
        // 详细原因保留在 Display 中
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn test_invalid_type_message_follows_accepted_types() {
        let pdf_only = AppError::InvalidFileType {
            rejected: vec!["notes.txt".to_string()],
            accepted: vec![PDF_MIME.to_string()],
        };
        assert_eq!(pdf_only.user_message(), "Only PDF files are allowed");

        let widened = AppError::InvalidFileType {
            rejected: vec!["notes.txt".to_string()],
            accepted: vec![PDF_MIME.to_string(), "application/epub+zip".to_string()],
        };
        assert_eq!(
            widened.user_message(),
            "Only files of type application/pdf, application/epub+zip are allowed"
        );
    }
}
