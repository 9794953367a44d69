//! # Research Gap Client
//!
//! 研究空白分析服务的客户端：选择最多 3 篇 PDF 论文，提交给分析服务，
//! 保存并展示识别出的研究空白
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有结果存储，只暴露读、写、删除能力
//!
//! ### ② 客户端（Clients）
//! - `AnalysisClient` - 分析服务的 HTTP 客户端（`POST /analyze`、`GET /`）
//!
//! ### ③ 业务能力层（Services）
//! - `FileSource` - "提供了一批文件"能力，与输入方式无关
//! - `IntakeSession` - 文件类型、数量校验
//! - `ResultPresenter` - 读取并渲染已保存的结果
//!
//! ### ④ 流程层（Workflow）
//! - `UploadCoordinator` - 提交流程（Idle → Submitting → Idle），单飞
//!
//! ### ⑤ 编排层
//! - `App` - 命令分派
//!
//! ## 模块结构

pub mod app;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{AnalysisBackend, AnalysisClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{FileStore, MemoryStore, ResultStore, RESULTS_KEY};
pub use models::{FileSet, GapCategory, ResearchGap, ResultSet, UploadedFile};
pub use services::{IntakePolicy, IntakeSession, ResultPresenter, ResultsView};
pub use workflow::{Navigation, UploadCoordinator, UploadStatus};
