use anyhow::Result;
use clap::Parser;
use research_gap_client::cli::Cli;
use research_gap_client::utils::logging;
use research_gap_client::{App, Config};
use std::io::IsTerminal;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref())?;

    // 初始化日志
    logging::init(cli.verbose || config.verbose_logging);

    // 初始化并运行应用
    let use_color = cli.use_color(std::io::stdout().is_terminal());
    let app = App::initialize(config)?.with_color(use_color);

    match app.run(cli.command).await {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}
