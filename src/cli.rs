//! 命令行参数

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Research Gap Analyzer 命令行客户端
#[derive(Debug, Parser)]
#[command(name = "research-gap", version, about = "Upload research papers and view AI-identified research gaps")]
pub struct Cli {
    /// TOML 配置文件
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 不输出终端颜色
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// 是否输出终端颜色：未指定 `--no-color` 且标准输出是终端
    pub fn use_color(&self, stdout_is_terminal: bool) -> bool {
        !self.no_color && stdout_is_terminal
    }
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// 上传论文并分析研究空白
    Analyze {
        /// PDF 文件（一次最多 3 个）
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// 显示上一次的分析结果
    Results,
    /// 清除已保存的结果，重新开始
    Reset,
    /// 检查分析服务是否可用
    Health,
}
