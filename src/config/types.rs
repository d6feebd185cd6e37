//! Configuration Types
//!
//! 扁平的应用配置（与 `.env` / 环境变量一一对应）以及部署列表解析

use indexmap::IndexMap;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::voice::AudioFormat;

/// 未配置音色时 Azure OpenAI 部署使用的默认音色
pub const DEFAULT_DEPLOYMENT_VOICE: &str = "alloy";

/// 部署查找错误
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Deployment '{name}' not found. Available deployments: {}", .available.join(", "))]
pub struct DeploymentNotFound {
    pub name: String,
    pub available: Vec<String>,
}

/// 应用配置
///
/// 进程启动时加载一次，之后只读
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 默认 TTS Provider（azure-openai 或 azure-speech）
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Azure OpenAI API Key
    #[serde(default)]
    pub azure_openai_api_key: Option<SecretString>,

    /// Azure OpenAI 资源地址，例如 https://my-resource.openai.azure.com
    #[serde(default)]
    pub azure_openai_endpoint: String,

    #[serde(default = "default_api_version")]
    pub azure_openai_api_version: String,

    /// 默认部署名
    #[serde(default = "default_deployment")]
    pub default_deployment: String,

    /// 部署列表（逗号分隔：deployment_name:model_name:voice）
    ///
    /// 例如 "tts-1:tts:alloy,tts-hd:tts-hd:nova"
    #[serde(default)]
    pub azure_deployments: String,

    /// Azure AI Speech API Key
    #[serde(default)]
    pub azure_speech_api_key: Option<SecretString>,

    /// Azure AI Speech 区域，例如 westeurope
    #[serde(default)]
    pub azure_speech_region: String,

    /// 自定义 Azure Speech 服务地址（未设置时由 region 推导）
    #[serde(default)]
    pub azure_speech_endpoint: Option<String>,

    #[serde(default = "default_speech_voice")]
    pub azure_speech_voice: String,

    #[serde(default = "default_speech_language")]
    pub azure_speech_language: String,

    /// 音频输出目录
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// 音频输出格式
    #[serde(default)]
    pub output_format: AudioFormat,

    /// HTTP 请求超时时间（秒）
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// 日志级别（RUST_LOG 和 -v 优先）
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// 是否输出 JSON 格式日志
    #[serde(default)]
    pub log_json: bool,
}

fn default_provider() -> String {
    "azure-openai".to_string()
}

fn default_api_version() -> String {
    "2024-02-15-preview".to_string()
}

fn default_deployment() -> String {
    "tts-1".to_string()
}

fn default_speech_voice() -> String {
    "en-US-JennyNeural".to_string()
}

fn default_speech_language() -> String {
    "en-US".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_http_timeout() -> u64 {
    120
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            azure_openai_api_key: None,
            azure_openai_endpoint: String::new(),
            azure_openai_api_version: default_api_version(),
            default_deployment: default_deployment(),
            azure_deployments: String::new(),
            azure_speech_api_key: None,
            azure_speech_region: String::new(),
            azure_speech_endpoint: None,
            azure_speech_voice: default_speech_voice(),
            azure_speech_language: default_speech_language(),
            output_dir: default_output_dir(),
            output_format: AudioFormat::default(),
            http_timeout_secs: default_http_timeout(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Azure OpenAI 部署条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// 模型标识
    pub model: String,
    /// 默认音色
    pub voice: String,
}

impl Settings {
    /// 解析部署列表
    ///
    /// 未配置时只返回默认部署（model 与部署同名，音色为 alloy）
    pub fn deployments(&self) -> IndexMap<String, Deployment> {
        let mut deployments = IndexMap::new();

        if self.azure_deployments.trim().is_empty() {
            deployments.insert(
                self.default_deployment.clone(),
                Deployment {
                    model: self.default_deployment.clone(),
                    voice: DEFAULT_DEPLOYMENT_VOICE.to_string(),
                },
            );
            return deployments;
        }

        for entry in self.azure_deployments.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let mut parts = entry.split(':');
            let name = parts.next().unwrap_or_default().to_string();
            if name.is_empty() {
                continue;
            }

            let model = parts
                .next()
                .filter(|m| !m.is_empty())
                .unwrap_or(name.as_str())
                .to_string();
            let voice = parts
                .next()
                .filter(|v| !v.is_empty())
                .unwrap_or(DEFAULT_DEPLOYMENT_VOICE)
                .to_string();

            deployments.insert(name, Deployment { model, voice });
        }

        deployments
    }

    /// 获取指定部署的配置，`None` 表示默认部署
    pub fn deployment(&self, name: Option<&str>) -> Result<(String, Deployment), DeploymentNotFound> {
        let name = name.unwrap_or(&self.default_deployment);
        let mut deployments = self.deployments();

        match deployments.shift_remove(name) {
            Some(deployment) => Ok((name.to_string(), deployment)),
            None => Err(DeploymentNotFound {
                name: name.to_string(),
                available: deployments.into_keys().collect(),
            }),
        }
    }

    /// Azure OpenAI Key（空字符串视为未配置）
    pub fn openai_api_key(&self) -> Option<SecretString> {
        non_empty_secret(self.azure_openai_api_key.as_ref())
    }

    /// Azure Speech Key（空字符串视为未配置）
    pub fn speech_api_key(&self) -> Option<SecretString> {
        non_empty_secret(self.azure_speech_api_key.as_ref())
    }
}

fn non_empty_secret(secret: Option<&SecretString>) -> Option<SecretString> {
    secret
        .map(|s| s.expose_secret().trim())
        .filter(|s| !s.is_empty())
        .map(|s| SecretString::from(s.to_string()))
}
