//! 测试用的 Provider 和 Factory 替身

use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::application::error::ApplicationError;
use crate::application::ports::{
    ProviderFactoryPort, SynthesisRequest, TtsError, TtsProviderPort, AZURE_OPENAI, AZURE_SPEECH,
};
use crate::config::Deployment;
use crate::domain::voice::VoiceInfo;

/// 记录请求的 Provider
pub struct RecordingProvider {
    pub name: String,
    pub voices: Vec<VoiceInfo>,
    pub requests: Mutex<Vec<SynthesisRequest>>,
}

impl RecordingProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            voices: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_voices(mut self, voices: Vec<VoiceInfo>) -> Self {
        self.voices = voices;
        self
    }

    pub fn last_request(&self) -> Option<SynthesisRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TtsProviderPort for RecordingProvider {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<PathBuf, TtsError> {
        let path = request
            .output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("output/generated.mp3"));
        self.requests.lock().unwrap().push(request);
        Ok(path)
    }

    async fn available_voices(&self) -> Result<Vec<String>, TtsError> {
        Ok(self.voices.iter().map(|v| v.short_name.clone()).collect())
    }

    async fn voice_info(&self, voice_name: &str) -> Result<Option<VoiceInfo>, TtsError> {
        Ok(self
            .voices
            .iter()
            .find(|v| v.short_name.eq_ignore_ascii_case(voice_name))
            .cloned())
    }

    fn provider_name(&self) -> String {
        self.name.clone()
    }
}

/// 按名称返回 RecordingProvider 的 Factory
pub struct StubFactory {
    pub default_provider: String,
    pub providers: IndexMap<String, Arc<RecordingProvider>>,
    pub deployments: IndexMap<String, Deployment>,
    pub created: Mutex<Vec<(String, Option<String>)>>,
}

impl StubFactory {
    pub fn new(default_provider: &str) -> Self {
        let mut providers = IndexMap::new();
        providers.insert(
            AZURE_OPENAI.to_string(),
            Arc::new(RecordingProvider::new("Azure OpenAI (tts-1)")),
        );
        providers.insert(
            AZURE_SPEECH.to_string(),
            Arc::new(RecordingProvider::new("Azure AI Speech")),
        );

        let mut deployments = IndexMap::new();
        deployments.insert(
            "tts-1".to_string(),
            Deployment {
                model: "tts".to_string(),
                voice: "alloy".to_string(),
            },
        );
        deployments.insert(
            "tts-hd".to_string(),
            Deployment {
                model: "tts-hd".to_string(),
                voice: "nova".to_string(),
            },
        );

        Self {
            default_provider: default_provider.to_string(),
            providers,
            deployments,
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn with_provider(mut self, key: &str, provider: RecordingProvider) -> Self {
        self.providers.insert(key.to_string(), Arc::new(provider));
        self
    }

    pub fn provider(&self, key: &str) -> Arc<RecordingProvider> {
        self.providers[key].clone()
    }
}

impl ProviderFactoryPort for StubFactory {
    fn create(
        &self,
        provider: Option<&str>,
        deployment: Option<&str>,
    ) -> Result<Arc<dyn TtsProviderPort>, ApplicationError> {
        let name = self.resolve_provider(provider)?;
        self.created
            .lock()
            .unwrap()
            .push((name.clone(), deployment.map(String::from)));
        let provider: Arc<dyn TtsProviderPort> = self.providers[&name].clone();
        Ok(provider)
    }

    fn available_providers(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    fn default_provider(&self) -> String {
        self.default_provider.clone()
    }

    fn deployment_info(&self) -> IndexMap<String, Deployment> {
        self.deployments.clone()
    }

    fn default_deployment(&self) -> String {
        "tts-1".to_string()
    }

    fn resolve_provider(&self, provider: Option<&str>) -> Result<String, ApplicationError> {
        let name = provider
            .unwrap_or(self.default_provider.as_str())
            .to_lowercase();
        if self.providers.contains_key(&name) {
            Ok(name)
        } else {
            let available: Vec<&str> = self.providers.keys().map(String::as_str).collect();
            Err(ApplicationError::unknown_provider(name, &available))
        }
    }
}

/// 构造 VoiceInfo
pub fn voice(short_name: &str, styles: &[&str]) -> VoiceInfo {
    VoiceInfo {
        name: format!("Microsoft Server Speech Text to Speech Voice ({short_name})"),
        short_name: short_name.to_string(),
        local_name: short_name.to_string(),
        locale: "en-US".to_string(),
        gender: "Female".to_string(),
        voice_type: "Neural".to_string(),
        styles: styles.iter().map(|s| s.to_string()).collect(),
        roles: Vec::new(),
        secondary_locales: Vec::new(),
    }
}
