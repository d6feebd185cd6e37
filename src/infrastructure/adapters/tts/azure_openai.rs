//! Azure OpenAI TTS Client - 调用 Azure OpenAI 语音合成接口
//!
//! 实现 TtsProviderPort trait
//!
//! Azure OpenAI API:
//! POST {endpoint}/openai/deployments/{deployment}/audio/speech?api-version={version}
//! Request: {"model": "{deployment}", "input": "...", "voice": "alloy", "speed": 1.0, "response_format": "mp3"}
//! Response: 音频二进制

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{AudioStoragePort, SynthesisRequest, TtsError, TtsProviderPort};
use crate::domain::voice::AudioFormat;

use super::timestamp;

/// Azure OpenAI 支持的音色
pub const AZURE_OPENAI_VOICES: &[&str] = &["alloy", "echo", "fable", "onyx", "nova", "shimmer"];

/// 语速下限
pub const MIN_SPEED: f32 = 0.25;

/// 语速上限
pub const MAX_SPEED: f32 = 4.0;

const DEFAULT_SPEED: f32 = 1.0;

/// 请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f32,
    response_format: &'a str,
}

/// Azure OpenAI 客户端配置
#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    pub api_key: Option<SecretString>,
    /// 资源地址，例如 https://my-resource.openai.azure.com
    pub endpoint: String,
    pub api_version: String,
    /// 部署名（同时作为请求体中的 model）
    pub deployment: String,
    /// 默认音色
    pub voice: String,
    pub output_format: AudioFormat,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

/// Azure OpenAI TTS 客户端
pub struct AzureOpenAiClient {
    client: Client,
    config: AzureOpenAiConfig,
    storage: Arc<dyn AudioStoragePort>,
}

impl AzureOpenAiClient {
    /// 创建新的客户端
    pub fn new(
        config: AzureOpenAiConfig,
        storage: Arc<dyn AudioStoragePort>,
    ) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            storage,
        })
    }

    /// 获取合成 URL
    fn speech_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/audio/speech",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment
        )
    }

    /// 自动生成的文件名：{deployment}_{voice}_{timestamp}.{ext}
    fn generated_file_name(&self, voice: &str, format: AudioFormat) -> String {
        format!(
            "{}_{}_{}.{}",
            self.config.deployment,
            voice,
            timestamp(),
            format.extension()
        )
    }

    fn api_key(&self) -> Result<&SecretString, TtsError> {
        self.config
            .api_key
            .as_ref()
            .ok_or_else(|| TtsError::Configuration("AZURE_OPENAI_API_KEY is not set".to_string()))
    }

    fn validate_speed(speed: f32) -> Result<f32, TtsError> {
        if speed.is_finite() && (MIN_SPEED..=MAX_SPEED).contains(&speed) {
            Ok(speed)
        } else {
            Err(TtsError::InvalidRequest(format!(
                "speed must be between {} and {}, got {}",
                MIN_SPEED, MAX_SPEED, speed
            )))
        }
    }
}

#[async_trait]
impl TtsProviderPort for AzureOpenAiClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<PathBuf, TtsError> {
        let api_key = self.api_key()?;
        if self.config.endpoint.trim().is_empty() {
            return Err(TtsError::Configuration(
                "AZURE_OPENAI_ENDPOINT is not set".to_string(),
            ));
        }

        let options = &request.options;
        let voice = options.voice.as_deref().unwrap_or(self.config.voice.as_str());
        let speed = Self::validate_speed(options.speed.unwrap_or(DEFAULT_SPEED))?;
        let format = options.response_format.unwrap_or(self.config.output_format);

        let output_path = self.storage.resolve_path(
            request.output_path.as_deref(),
            &self.generated_file_name(voice, format),
        );

        let body = SpeechHttpRequest {
            model: &self.config.deployment,
            input: &request.text,
            voice,
            speed,
            response_format: format.as_str(),
        };

        tracing::debug!(
            url = %self.speech_url(),
            deployment = %self.config.deployment,
            voice = %voice,
            speed = speed,
            text_len = request.text.len(),
            "Sending Azure OpenAI speech request"
        );

        let response = self
            .client
            .post(self.speech_url())
            .query(&[("api-version", self.config.api_version.as_str())])
            .header("api-key", api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| TtsError::from_send_error(e, "Azure OpenAI"))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::debug!(status = %status, body = %error_text, "Azure OpenAI speech API error");
            return Err(TtsError::from_status(status.as_u16(), error_text));
        }

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?;

        let saved = self
            .storage
            .save_audio(&output_path, &audio_data)
            .await
            .map_err(|e| TtsError::StorageError(e.to_string()))?;

        tracing::info!(
            deployment = %self.config.deployment,
            voice = %voice,
            audio_size = audio_data.len(),
            path = %saved.display(),
            "Azure OpenAI synthesis completed"
        );

        Ok(saved)
    }

    async fn available_voices(&self) -> Result<Vec<String>, TtsError> {
        Ok(AZURE_OPENAI_VOICES.iter().map(|v| v.to_string()).collect())
    }

    fn provider_name(&self) -> String {
        format!("Azure OpenAI ({})", self.config.deployment)
    }
}
