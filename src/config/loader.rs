//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（含 `.env` 中加载的变量）
//! 2. 配置文件（ai-voice.toml 等）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use secrecy::SecretString;
use std::path::Path;
use thiserror::Error;

use super::types::Settings;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径（不含扩展名）
const CONFIG_FILE_NAMES: &[&str] = &["ai-voice", "ai-voice.local"];

/// 加载应用配置
///
/// 环境变量不带前缀、大小写不敏感，例如：
/// - `AZURE_OPENAI_API_KEY=...`
/// - `AZURE_DEPLOYMENTS=tts-1:tts:alloy,tts-hd:tts-hd:nova`
/// - `OUTPUT_FORMAT=wav`
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_settings_from_path(config_path: Option<&Path>) -> Result<Settings, ConfigError> {
    build_settings(config_path, Environment::default())
}

fn build_settings(
    config_path: Option<&Path>,
    environment: Environment,
) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("default_provider", "azure-openai")?
        .set_default("azure_openai_endpoint", "")?
        .set_default("azure_openai_api_version", "2024-02-15-preview")?
        .set_default("default_deployment", "tts-1")?
        .set_default("azure_deployments", "")?
        .set_default("azure_speech_region", "")?
        .set_default("azure_speech_voice", "en-US-JennyNeural")?
        .set_default("azure_speech_language", "en-US")?
        .set_default("output_dir", "output")?
        .set_default("output_format", "mp3")?
        .set_default("http_timeout_secs", 120)?
        .set_default("log_level", "warn")?
        .set_default("log_json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），键名会被转换为小写
    builder = builder.add_source(environment);

    let config = builder.build()?;

    let settings: Settings = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize settings: {}", e))
    })?;

    validate_settings(&settings)?;

    Ok(settings)
}

/// 验证配置有效性
fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    if settings.default_provider.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "DEFAULT_PROVIDER cannot be empty".to_string(),
        ));
    }

    if settings.default_deployment.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "DEFAULT_DEPLOYMENT cannot be empty".to_string(),
        ));
    }

    if settings.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "OUTPUT_DIR cannot be empty".to_string(),
        ));
    }

    if settings.http_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "HTTP_TIMEOUT_SECS cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（debug 级别，密钥脱敏）
pub fn print_settings(settings: &Settings) {
    tracing::debug!("=== Application Settings ===");
    tracing::debug!("Default Provider: {}", settings.default_provider);
    tracing::debug!("Azure OpenAI Endpoint: {}", settings.azure_openai_endpoint);
    tracing::debug!("Azure OpenAI API Version: {}", settings.azure_openai_api_version);
    tracing::debug!(
        "Azure OpenAI API Key: {}",
        mask(settings.openai_api_key().as_ref())
    );
    tracing::debug!("Default Deployment: {}", settings.default_deployment);
    tracing::debug!("Deployments: {}", settings.deployments().len());
    tracing::debug!("Azure Speech Region: {}", settings.azure_speech_region);
    if let Some(endpoint) = &settings.azure_speech_endpoint {
        tracing::debug!("Azure Speech Endpoint: {}", endpoint);
    }
    tracing::debug!(
        "Azure Speech API Key: {}",
        mask(settings.speech_api_key().as_ref())
    );
    tracing::debug!("Azure Speech Voice: {}", settings.azure_speech_voice);
    tracing::debug!("Output Directory: {:?}", settings.output_dir);
    tracing::debug!("Output Format: {}", settings.output_format);
    tracing::debug!("HTTP Timeout: {}s", settings.http_timeout_secs);
    tracing::debug!("============================");
}

fn mask(secret: Option<&SecretString>) -> &'static str {
    if secret.is_some() {
        "<set>"
    } else {
        "<not set>"
    }
}
