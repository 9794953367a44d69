use crate::cli::Command;
use crate::clients::{AnalysisBackend, AnalysisClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{FileStore, ResultStore};
use crate::services::{FileSource, IntakePolicy, IntakeSession, PathFileSource, ResultPresenter};
use crate::utils::logging;
use crate::workflow::UploadCoordinator;
use std::sync::Arc;
use tracing::{info, warn};

/// 应用主结构
///
/// 持有分析服务和结果存储，把命令分派给各个流程
pub struct App {
    config: Config,
    backend: Arc<dyn AnalysisBackend>,
    coordinator: UploadCoordinator,
    presenter: ResultPresenter,
}

impl App {
    /// 使用配置中的 HTTP 客户端和文件存储初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        let backend = Arc::new(AnalysisClient::new(&config)?);
        let store = Arc::new(FileStore::new(config.store_dir.clone()));
        Ok(Self::with_parts(config, backend, store))
    }

    /// 使用指定的分析服务和存储组装应用
    pub fn with_parts(
        config: Config,
        backend: Arc<dyn AnalysisBackend>,
        store: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            coordinator: UploadCoordinator::new(backend.clone(), store.clone()),
            presenter: ResultPresenter::new(store),
            backend,
            config,
        }
    }

    /// 终端输出是否带颜色
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.presenter = self.presenter.with_color(use_color);
        self
    }

    /// 执行命令并返回要输出给用户的文本
    pub async fn run(&self, command: Command) -> AppResult<String> {
        match command {
            Command::Analyze { files } => self.analyze_source(&PathFileSource::new(files)).await,
            Command::Results => self.results(),
            Command::Reset => self.reset(),
            Command::Health => self.health().await,
        }
    }

    /// 选择文件 → 提交 → 展示结果
    pub async fn analyze_source(&self, source: &dyn FileSource) -> AppResult<String> {
        logging::log_startup(&self.config);

        let batch = source.offered()?;
        let policy = IntakePolicy::from_config(&self.config);
        let max_files = policy.max_files();
        let (session, result) = IntakeSession::new(policy).offer(batch);
        result?;

        logging::log_selected_files(session.files(), max_files);

        let outcome = self.coordinator.submit(session.files()).await?;
        logging::log_analysis_complete(
            outcome.gap_count,
            &self.config.store_dir.display().to_string(),
        );

        self.results()
    }

    fn results(&self) -> AppResult<String> {
        let view = self.presenter.activate()?;
        Ok(self.presenter.render(&view))
    }

    fn reset(&self) -> AppResult<String> {
        self.presenter.start_over()?;
        Ok("Results cleared. Upload new papers to start a new analysis.\n".to_string())
    }

    async fn health(&self) -> AppResult<String> {
        match self.backend.health().await {
            Ok(status) => {
                info!("✓ 分析服务可用");
                Ok(format!("{}\n", status.message))
            }
            Err(e) => {
                warn!("⚠️ 分析服务不可用: {}", e);
                Err(e)
            }
        }
    }
}
