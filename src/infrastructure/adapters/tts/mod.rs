//! TTS Adapter - 云端 TTS 客户端实现

mod azure_openai;
mod azure_speech;

pub use azure_openai::{AzureOpenAiClient, AzureOpenAiConfig, AZURE_OPENAI_VOICES};
pub use azure_speech::{AzureSpeechClient, AzureSpeechConfig, POPULAR_VOICES};

/// 输出文件名中的本地时间戳
pub(crate) fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}
