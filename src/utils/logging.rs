//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use crate::config::Config;
use crate::models::FileSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，未设置时详细模式为 debug，否则为 info。
/// 重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 当前配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 Research Gap Analyzer");
    info!("🌐 分析服务: {}", config.api_base_url);
    info!(
        "📄 最多 {} 个文件, 允许类型: {}",
        config.max_files,
        config.accepted_types.join(", ")
    );
    info!("{}", "=".repeat(60));
}

/// 记录已选择的文件
///
/// # 参数
/// - `files`: 已接受的文件列表
/// - `max_files`: 校验策略中的数量上限
pub fn log_selected_files(files: &FileSet, max_files: usize) {
    info!("📋 已选择论文 ({}/{})", files.len(), max_files);
    for (i, file) in files.iter().enumerate() {
        info!("  {}. {} ({})", i + 1, file.name, file.size_label());
    }
}

/// 记录分析完成信息
///
/// # 参数
/// - `gap_count`: 研究空白数量
/// - `store_path`: 结果存储位置
pub fn log_analysis_complete(gap_count: usize, store_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 分析完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 研究空白: {}", gap_count);
    info!("{}", "=".repeat(60));
    info!("结果已保存至: {}", store_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("研究空白分析", 2), "研究...");
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
    }
}
