//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_storage;
mod provider_factory;
mod tts_provider;

pub use audio_storage::{AudioStorageError, AudioStoragePort};
pub use provider_factory::{ProviderFactoryPort, AZURE_OPENAI, AZURE_SPEECH};
pub use tts_provider::{SynthesisOptions, SynthesisRequest, TtsError, TtsProviderPort};
