//! AI Voice - 文本转语音命令行工具

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

use ai_voice::application::ApplicationError;
use ai_voice::config::{load_settings_from_path, print_settings};
use ai_voice::infrastructure::cli::{init_tracing, run, Cli};
use ai_voice::infrastructure::ProviderFactory;

async fn try_main(cli: Cli) -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let settings =
        load_settings_from_path(cli.config.as_deref()).context("Failed to load config")?;

    init_tracing(cli.verbose, cli.json || settings.log_json, &settings.log_level);
    print_settings(&settings);

    let factory = Arc::new(ProviderFactory::new(Arc::new(settings)));
    let mut stdout = std::io::stdout();
    run(cli.command, factory, &mut stdout).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    // .env 不覆盖已存在的环境变量
    dotenvy::dotenv().ok();

    // 参数错误统一以 1 退出，--help / --version 仍以 0 退出
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(e) = try_main(cli).await {
        eprintln!("Error: {:#}", e);
        if let Some(ApplicationError::VoiceNotFound(_)) = e.downcast_ref::<ApplicationError>() {
            eprintln!("Use 'ai-voice voices azure-speech' to see available voices.");
        }
        std::process::exit(1);
    }
}
