//! 提交流程 - 流程层
//!
//! 核心职责：把当前的文件列表提交给分析服务，并维护 Idle / Submitting 状态
//!
//! 流程顺序：
//! 1. 检查文件列表非空
//! 2. 获取单飞锁（同一时间只允许一个提交）
//! 3. 调用分析服务
//! 4. 成功后写入结果存储

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::clients::AnalysisBackend;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{ResultStore, RESULTS_KEY};
use crate::models::FileSet;
use crate::workflow::Navigation;

/// 提交状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Submitting,
}

/// 一次成功提交的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// 识别出的研究空白数量
    pub gap_count: usize,
    /// 下一步应进入的页面
    pub navigation: Navigation,
}

/// 提交流程
///
/// - 每次调用最多一次网络请求
/// - 成功时恰好一次存储写入，失败时不写
/// - 任何退出路径都会回到 Idle
pub struct UploadCoordinator {
    backend: Arc<dyn AnalysisBackend>,
    store: Arc<dyn ResultStore>,
    submitting: AtomicBool,
}

/// 离开作用域时释放单飞锁
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl UploadCoordinator {
    /// 创建新的提交流程
    pub fn new(backend: Arc<dyn AnalysisBackend>, store: Arc<dyn ResultStore>) -> Self {
        Self {
            backend,
            store,
            submitting: AtomicBool::new(false),
        }
    }

    /// 当前状态
    pub fn status(&self) -> UploadStatus {
        if self.submitting.load(Ordering::Acquire) {
            UploadStatus::Submitting
        } else {
            UploadStatus::Idle
        }
    }

    /// 提交文件列表
    ///
    /// # 返回
    /// - 空列表: `EmptySubmission`，不发请求
    /// - 已有提交在进行: `SubmissionInFlight`，不发请求
    /// - 网络 / HTTP / 解析失败: `AnalysisFailed`，不写存储
    pub async fn submit(&self, files: &FileSet) -> AppResult<SubmissionOutcome> {
        if files.is_empty() {
            warn!("⚠️ 没有可提交的文件");
            return Err(AppError::EmptySubmission);
        }

        let _guard = InFlightGuard::acquire(&self.submitting).ok_or_else(|| {
            warn!("⚠️ 已有分析请求正在进行，忽略本次提交");
            AppError::SubmissionInFlight
        })?;

        info!("📤 正在提交 {} 篇论文进行分析...", files.len());
        let started = Instant::now();

        let gaps = match self.backend.analyze(files).await {
            Ok(gaps) => gaps,
            Err(e) => {
                error!("❌ 分析失败 (耗时 {:.1?}): {}", started.elapsed(), e);
                return Err(match e {
                    AppError::AnalysisFailed { .. } => e,
                    other => AppError::analysis_failed(other),
                });
            }
        };

        let serialized = serde_json::to_string(&gaps).map_err(AppError::analysis_failed)?;
        self.store.set(RESULTS_KEY, &serialized)?;

        info!(
            "✓ 分析完成 (耗时 {:.1?})，识别出 {} 个研究空白",
            started.elapsed(),
            gaps.len()
        );

        Ok(SubmissionOutcome {
            gap_count: gaps.len(),
            navigation: Navigation::Results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;
    use crate::models::{ResultSet, UploadedFile};
    use crate::clients::HealthStatus;
    use crate::services::{FileSource, IntakePolicy, IntakeSession, StaticFileSource};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// 按预设结果返回的分析服务
    struct FakeBackend {
        response: fn() -> AppResult<ResultSet>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AnalysisBackend for FakeBackend {
        async fn analyze(&self, _files: &FileSet) -> AppResult<ResultSet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.response)()
        }

        async fn health(&self) -> AppResult<HealthStatus> {
            Ok(HealthStatus {
                message: "ok".to_string(),
            })
        }
    }

    /// 等待放行才返回的分析服务
    struct BlockingBackend {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl AnalysisBackend for BlockingBackend {
        async fn analyze(&self, _files: &FileSet) -> AppResult<ResultSet> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(Vec::new())
        }

        async fn health(&self) -> AppResult<HealthStatus> {
            Ok(HealthStatus {
                message: "ok".to_string(),
            })
        }
    }

    fn two_pdfs() -> FileSet {
        let source = StaticFileSource::new(vec![
            UploadedFile::new("a.pdf", "application/pdf", b"%PDF-a".to_vec()),
            UploadedFile::new("b.pdf", "application/pdf", b"%PDF-b".to_vec()),
        ]);
        let session = IntakeSession::new(IntakePolicy::default());
        let (session, result) = session.offer(source.offered().unwrap());
        result.unwrap();
        session.files().clone()
    }

    fn one_gap() -> AppResult<ResultSet> {
        Ok(serde_json::from_str(
            r#"[{"gap_id":"1","title":"X","description":"Y","category":"theory","papers_referenced":[]}]"#,
        )
        .unwrap())
    }

    fn server_error() -> AppResult<ResultSet> {
        Err(AppError::analysis_failed("HTTP 500 Internal Server Error"))
    }

    #[tokio::test]
    async fn test_empty_submission_makes_no_call() {
        let backend = Arc::new(FakeBackend {
            response: one_gap,
            calls: AtomicUsize::new(0),
        });
        let store = Arc::new(MemoryStore::new());
        let coordinator = UploadCoordinator::new(backend.clone(), store.clone());

        let result = coordinator.submit(&FileSet::empty()).await;

        assert!(matches!(result, Err(AppError::EmptySubmission)));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.get(RESULTS_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_success_persists_results() {
        let backend = Arc::new(FakeBackend {
            response: one_gap,
            calls: AtomicUsize::new(0),
        });
        let store = Arc::new(MemoryStore::new());
        let coordinator = UploadCoordinator::new(backend.clone(), store.clone());

        let outcome = coordinator.submit(&two_pdfs()).await.unwrap();

        assert_eq!(outcome.gap_count, 1);
        assert_eq!(outcome.navigation, Navigation::Results);
        assert_eq!(coordinator.status(), UploadStatus::Idle);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);

        let stored: ResultSet =
            serde_json::from_str(&store.get(RESULTS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_leaves_previous_results() {
        let backend = Arc::new(FakeBackend {
            response: server_error,
            calls: AtomicUsize::new(0),
        });
        let store = Arc::new(MemoryStore::new());
        store.set(RESULTS_KEY, "[]").unwrap();
        let coordinator = UploadCoordinator::new(backend, store.clone());

        let err = coordinator.submit(&two_pdfs()).await.unwrap_err();

        assert!(matches!(err, AppError::AnalysisFailed { .. }));
        assert_eq!(coordinator.status(), UploadStatus::Idle);
        assert_eq!(store.get(RESULTS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_overlapping_submission_is_rejected() {
        let backend = Arc::new(BlockingBackend {
            started: Notify::new(),
            release: Notify::new(),
        });
        let store = Arc::new(MemoryStore::new());
        let coordinator = Arc::new(UploadCoordinator::new(backend.clone(), store));
        let files = two_pdfs();

        let first = {
            let coordinator = coordinator.clone();
            let files = files.clone();
            tokio::spawn(async move { coordinator.submit(&files).await })
        };

        backend.started.notified().await;
        assert_eq!(coordinator.status(), UploadStatus::Submitting);

        let second = coordinator.submit(&files).await;
        assert!(matches!(second, Err(AppError::SubmissionInFlight)));

        backend.release.notify_one();
        let outcome = first.await.unwrap().unwrap();
        assert_eq!(outcome.gap_count, 0);
        assert_eq!(coordinator.status(), UploadStatus::Idle);
    }
}
