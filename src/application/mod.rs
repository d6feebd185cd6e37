//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsProvider、AudioStorage、ProviderFactory）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use commands::{
    handlers::{preview, read_input_text, SynthesizeHandler},
    SynthesisEvent, Synthesize, SynthesizeResponse,
};

pub use error::ApplicationError;

pub use ports::{
    AudioStorageError, AudioStoragePort, ProviderFactoryPort, SynthesisOptions, SynthesisRequest,
    TtsError, TtsProviderPort, AZURE_OPENAI, AZURE_SPEECH,
};

pub use queries::{
    handlers::{DeploymentSummary, ProviderQueries, ProviderSummary, VoicesResponse},
    GetVoiceInfo, ListDeployments, ListProviders, ListVoices,
};
