//! TTS Provider Port - 云端语音合成抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::voice::{AudioFormat, VoiceInfo};

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Service error (HTTP {status}): {message}")]
    ServiceError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Not supported by {provider}: {feature}")]
    Unsupported { provider: String, feature: String },

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl TtsError {
    /// 将 reqwest 发送阶段的错误转换为 TtsError
    pub fn from_send_error(err: reqwest::Error, service: &str) -> Self {
        if err.is_timeout() {
            TtsError::Timeout
        } else if err.is_connect() {
            TtsError::NetworkError(format!("Cannot connect to {}: {}", service, err))
        } else {
            TtsError::NetworkError(err.to_string())
        }
    }

    /// 根据 HTTP 状态码转换服务端错误
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => TtsError::AuthenticationFailed(message),
            400 => TtsError::InvalidRequest(message),
            _ => TtsError::ServiceError { status, message },
        }
    }
}

/// 合成参数
///
/// 不同 Provider 只使用与自己相关的字段，其余字段被忽略
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesisOptions {
    /// 音色，未指定时使用 Provider 默认音色
    pub voice: Option<String>,
    /// 语速倍率（Azure OpenAI，0.25 - 4.0）
    pub speed: Option<f32>,
    /// 说话风格（Azure Speech）
    pub style: Option<String>,
    /// 语速（Azure Speech，例如 "1.2"、"+10%"）
    pub rate: Option<String>,
    /// 音高（Azure Speech，例如 "+5%"）
    pub pitch: Option<String>,
    /// 覆盖配置中的输出格式
    pub response_format: Option<AudioFormat>,
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本（Azure Speech 也接受完整 SSML）
    pub text: String,
    /// 输出路径，相对路径会放到输出目录下
    pub output_path: Option<PathBuf>,
    pub options: SynthesisOptions,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            output_path: None,
            options: SynthesisOptions::default(),
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_options(mut self, options: SynthesisOptions) -> Self {
        self.options = options;
        self
    }
}

/// TTS Provider Port
///
/// 云端 TTS 服务的抽象接口
#[async_trait]
pub trait TtsProviderPort: Send + Sync {
    /// 合成语音并写入文件，返回音频文件路径
    async fn synthesize(&self, request: SynthesisRequest) -> Result<PathBuf, TtsError>;

    /// 可用音色列表
    async fn available_voices(&self) -> Result<Vec<String>, TtsError>;

    /// 查询音色详情，音色不存在时返回 `Ok(None)`
    async fn voice_info(&self, _voice_name: &str) -> Result<Option<VoiceInfo>, TtsError> {
        Err(TtsError::Unsupported {
            provider: self.provider_name(),
            feature: "voice info".to_string(),
        })
    }

    /// Provider 显示名称
    fn provider_name(&self) -> String;
}
