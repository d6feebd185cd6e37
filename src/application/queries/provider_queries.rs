//! Provider Queries

/// 列出已注册的 Provider
#[derive(Debug, Clone, Default)]
pub struct ListProviders;

/// 列出 Azure OpenAI 部署
#[derive(Debug, Clone, Default)]
pub struct ListDeployments;

/// 列出某个 Provider 的音色
#[derive(Debug, Clone, Default)]
pub struct ListVoices {
    /// None 时使用默认 Provider
    pub provider: Option<String>,
    /// 只对 azure-openai 生效
    pub deployment: Option<String>,
}

/// 查询音色详情
#[derive(Debug, Clone)]
pub struct GetVoiceInfo {
    pub voice: String,
    /// None 时使用 azure-speech
    pub provider: Option<String>,
}

impl GetVoiceInfo {
    pub fn new(voice: impl Into<String>) -> Self {
        Self {
            voice: voice.into(),
            provider: None,
        }
    }
}
