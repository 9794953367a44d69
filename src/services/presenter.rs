//! 结果展示服务 - 业务能力层
//!
//! 只负责读取已保存的分析结果并渲染，不关心结果是怎么来的

use crate::error::{AppError, AppResult};
use crate::infrastructure::{ResultStore, RESULTS_KEY};
use crate::models::{ResearchGap, ResultSet};
use crate::workflow::Navigation;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info};

const ANSI_RESET: &str = "\x1b[0m";

/// 结果页面的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsView {
    /// 结果存在但为空（不是错误）
    Empty,
    /// 有研究空白
    Gaps { gaps: ResultSet, summary: String },
}

impl ResultsView {
    pub fn count(&self) -> usize {
        match self {
            ResultsView::Empty => 0,
            ResultsView::Gaps { gaps, .. } => gaps.len(),
        }
    }
}

/// 结果展示服务
pub struct ResultPresenter {
    store: Arc<dyn ResultStore>,
    use_color: bool,
}

impl ResultPresenter {
    pub fn new(store: Arc<dyn ResultStore>) -> Self {
        Self {
            store,
            use_color: false,
        }
    }

    /// 渲染时是否输出终端颜色
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// 读取已保存的结果
    ///
    /// # 返回
    /// - 不存在: `NoResultsFound`
    /// - 无法解析: `ResultsCorrupted`
    /// - 空列表: `ResultsView::Empty`
    pub fn activate(&self) -> AppResult<ResultsView> {
        let raw = self
            .store
            .get(RESULTS_KEY)?
            .ok_or(AppError::NoResultsFound)?;

        let gaps: ResultSet = serde_json::from_str(&raw)
            .map_err(|e| AppError::ResultsCorrupted { source: e })?;

        debug!("已读取 {} 条研究空白", gaps.len());

        if gaps.is_empty() {
            return Ok(ResultsView::Empty);
        }

        let summary = format!("{} Research Gaps", gaps.len());
        Ok(ResultsView::Gaps { gaps, summary })
    }

    /// 重新开始：清除已保存的结果，回到文件选择
    ///
    /// 重复调用不报错
    pub fn start_over(&self) -> AppResult<Navigation> {
        self.store.remove(RESULTS_KEY)?;
        info!("🧹 已清除分析结果");
        Ok(Navigation::Upload)
    }

    /// 渲染整个结果页面
    pub fn render(&self, view: &ResultsView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Research Gaps Analysis");
        let _ = writeln!(out, "{}", "=".repeat(60));

        match view {
            ResultsView::Empty => {
                let _ = writeln!(out, "🔍 No Research Gaps Found");
                let _ = writeln!(
                    out,
                    "Our analysis didn't identify any significant research gaps in the uploaded papers."
                );
                let _ = writeln!(
                    out,
                    "This could indicate that the papers cover complementary areas or that the analysis needs different papers."
                );
            }
            ResultsView::Gaps { gaps, summary } => {
                let _ = writeln!(
                    out,
                    "Analysis complete! We've identified {} key research gaps across your papers.",
                    gaps.len()
                );
                let _ = writeln!(out, "[{}] [AI-Powered Analysis]", summary);
                for gap in gaps {
                    let _ = writeln!(out);
                    out.push_str(&self.render_card(gap));
                }
            }
        }
        out
    }

    /// 渲染单条研究空白
    pub fn render_card(&self, gap: &ResearchGap) -> String {
        let style = gap.category.style();
        let badge = format!("{} {}", style.icon, gap.category.display_name());
        let badge = if self.use_color {
            format!("{}{}{}", style.ansi, badge, ANSI_RESET)
        } else {
            badge
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}", "─".repeat(60));
        let _ = writeln!(out, "{}  [{}]", gap.title, badge);
        let _ = writeln!(out, "{}", gap.description);
        if gap.has_references() {
            let _ = writeln!(out, "Referenced Papers: {}", gap.papers_referenced.join(", "));
        }
        out
    }
}
