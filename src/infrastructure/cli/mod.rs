//! CLI - 命令行入口
//!
//! 解析参数、分发到命令/查询处理器并输出结果

mod args;
mod logging;
pub mod output;

pub use args::{Cli, Commands, SynthesizeArgs};
pub use logging::{init_tracing, log_filter};

use std::io::Write;
use std::sync::Arc;

use crate::application::commands::handlers::SynthesizeHandler;
use crate::application::error::ApplicationError;
use crate::application::ports::ProviderFactoryPort;
use crate::application::queries::handlers::ProviderQueries;
use crate::application::queries::{GetVoiceInfo, ListDeployments, ListProviders, ListVoices};

/// 执行子命令，状态信息写入 `out`
pub async fn run<W: Write + Send>(
    command: Commands,
    factory: Arc<dyn ProviderFactoryPort>,
    out: &mut W,
) -> Result<(), ApplicationError> {
    match command {
        Commands::Synthesize(args) => {
            let handler = SynthesizeHandler::new(factory);
            let response = handler
                .handle(args.into(), |event| {
                    if let Err(e) = output::write_event(out, &event) {
                        tracing::warn!(error = %e, "Failed to write progress");
                    }
                })
                .await?;
            output::write_saved(out, &response.path)?;
        }
        Commands::Providers => {
            let providers = ProviderQueries::new(factory).list_providers(ListProviders);
            output::write_providers(out, &providers)?;
        }
        Commands::Deployments => {
            let deployments = ProviderQueries::new(factory).list_deployments(ListDeployments);
            output::write_deployments(out, &deployments)?;
        }
        Commands::Voices {
            provider,
            deployment,
        } => {
            let response = ProviderQueries::new(factory)
                .list_voices(ListVoices {
                    provider,
                    deployment,
                })
                .await?;
            output::write_voices(out, &response)?;
        }
        Commands::VoiceInfo { voice, provider } => {
            let info = ProviderQueries::new(factory)
                .voice_info(GetVoiceInfo { voice, provider })
                .await?;
            output::write_voice_info(out, &info)?;
        }
    }

    Ok(())
}
