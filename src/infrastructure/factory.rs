//! Provider Factory - Provider 注册表
//!
//! 把 Provider 名称映射到构造函数，并把 Settings 合并为各 Provider 的配置

use indexmap::IndexMap;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioStoragePort, ProviderFactoryPort, TtsError, TtsProviderPort, AZURE_OPENAI, AZURE_SPEECH,
};
use crate::config::{Deployment, Settings};
use crate::infrastructure::adapters::{
    AzureOpenAiClient, AzureOpenAiConfig, AzureSpeechClient, AzureSpeechConfig, FileAudioStorage,
};

/// 单个 Provider 的合并后配置
///
/// 每次调用时组装，传入构造函数后不再修改
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    AzureOpenAi(AzureOpenAiConfig),
    AzureSpeech(AzureSpeechConfig),
}

type ConfigBuilder = fn(&Settings, Option<&str>) -> Result<ProviderConfig, ApplicationError>;

type Constructor =
    fn(ProviderConfig, Arc<dyn AudioStoragePort>) -> Result<Arc<dyn TtsProviderPort>, TtsError>;

/// 注册表条目
struct ProviderEntry {
    name: &'static str,
    config: ConfigBuilder,
    construct: Constructor,
}

/// 已注册的 Provider（按展示顺序）
const REGISTRY: &[ProviderEntry] = &[
    ProviderEntry {
        name: AZURE_OPENAI,
        config: azure_openai_config,
        construct: construct_provider,
    },
    ProviderEntry {
        name: AZURE_SPEECH,
        config: azure_speech_config,
        construct: construct_provider,
    },
];

fn azure_openai_config(
    settings: &Settings,
    deployment: Option<&str>,
) -> Result<ProviderConfig, ApplicationError> {
    let (deployment, Deployment { voice, .. }) = settings.deployment(deployment)?;

    Ok(ProviderConfig::AzureOpenAi(AzureOpenAiConfig {
        api_key: settings.openai_api_key(),
        endpoint: settings.azure_openai_endpoint.clone(),
        api_version: settings.azure_openai_api_version.clone(),
        deployment,
        voice,
        output_format: settings.output_format,
        timeout_secs: settings.http_timeout_secs,
    }))
}

fn azure_speech_config(
    settings: &Settings,
    _deployment: Option<&str>,
) -> Result<ProviderConfig, ApplicationError> {
    Ok(ProviderConfig::AzureSpeech(AzureSpeechConfig {
        api_key: settings.speech_api_key(),
        region: settings.azure_speech_region.clone(),
        endpoint: settings.azure_speech_endpoint.clone(),
        voice: settings.azure_speech_voice.clone(),
        language: settings.azure_speech_language.clone(),
        output_format: settings.output_format,
        timeout_secs: settings.http_timeout_secs,
    }))
}

fn construct_provider(
    config: ProviderConfig,
    storage: Arc<dyn AudioStoragePort>,
) -> Result<Arc<dyn TtsProviderPort>, TtsError> {
    let provider: Arc<dyn TtsProviderPort> = match config {
        ProviderConfig::AzureOpenAi(config) => Arc::new(AzureOpenAiClient::new(config, storage)?),
        ProviderConfig::AzureSpeech(config) => Arc::new(AzureSpeechClient::new(config, storage)?),
    };
    Ok(provider)
}

fn registered_names() -> Vec<&'static str> {
    REGISTRY.iter().map(|entry| entry.name).collect()
}

/// Provider Factory
pub struct ProviderFactory {
    settings: Arc<Settings>,
    storage: Arc<dyn AudioStoragePort>,
}

impl ProviderFactory {
    /// 使用文件系统存储（输出目录来自 Settings）
    pub fn new(settings: Arc<Settings>) -> Self {
        let storage = Arc::new(FileAudioStorage::new(&settings.output_dir));
        Self::with_storage(settings, storage)
    }

    pub fn with_storage(settings: Arc<Settings>, storage: Arc<dyn AudioStoragePort>) -> Self {
        Self { settings, storage }
    }

    fn entry(&self, provider: Option<&str>) -> Result<&'static ProviderEntry, ApplicationError> {
        let name = provider
            .unwrap_or(self.settings.default_provider.as_str())
            .trim()
            .to_lowercase();

        REGISTRY
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| ApplicationError::unknown_provider(name, &registered_names()))
    }

    /// 组装 Provider 配置
    pub fn provider_config(
        &self,
        provider: Option<&str>,
        deployment: Option<&str>,
    ) -> Result<ProviderConfig, ApplicationError> {
        let entry = self.entry(provider)?;
        (entry.config)(&self.settings, deployment)
    }

    /// 已配置的部署名称
    pub fn available_deployments(&self) -> Vec<String> {
        self.settings.deployments().into_keys().collect()
    }
}

impl ProviderFactoryPort for ProviderFactory {
    fn create(
        &self,
        provider: Option<&str>,
        deployment: Option<&str>,
    ) -> Result<Arc<dyn TtsProviderPort>, ApplicationError> {
        let entry = self.entry(provider)?;
        let config = (entry.config)(&self.settings, deployment)?;
        let instance = (entry.construct)(config, self.storage.clone())?;

        tracing::debug!(
            provider = entry.name,
            name = %instance.provider_name(),
            "Provider created"
        );

        Ok(instance)
    }

    fn available_providers(&self) -> Vec<String> {
        registered_names().into_iter().map(String::from).collect()
    }

    fn default_provider(&self) -> String {
        self.settings.default_provider.trim().to_lowercase()
    }

    fn deployment_info(&self) -> IndexMap<String, Deployment> {
        self.settings.deployments()
    }

    fn default_deployment(&self) -> String {
        self.settings.default_deployment.clone()
    }

    fn resolve_provider(&self, provider: Option<&str>) -> Result<String, ApplicationError> {
        self.entry(provider).map(|entry| entry.name.to_string())
    }
}
