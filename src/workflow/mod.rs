pub mod upload_flow;

pub use upload_flow::{SubmissionOutcome, UploadCoordinator, UploadStatus};

/// 页面跳转信号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// 回到文件选择
    Upload,
    /// 进入结果展示
    Results,
}
