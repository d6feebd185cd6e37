//! Provider Factory Port - 按名称创建 TTS Provider

use indexmap::IndexMap;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::config::Deployment;

use super::TtsProviderPort;

/// Azure OpenAI Provider 名称
pub const AZURE_OPENAI: &str = "azure-openai";

/// Azure AI Speech Provider 名称
pub const AZURE_SPEECH: &str = "azure-speech";

/// Provider Factory Port
///
/// 根据名称查找 Provider 并合并配置后创建实例
pub trait ProviderFactoryPort: Send + Sync {
    /// 创建 Provider
    ///
    /// - `provider` 为 None 时使用默认 Provider
    /// - `deployment` 只对 azure-openai 生效，为 None 时使用默认部署
    fn create(
        &self,
        provider: Option<&str>,
        deployment: Option<&str>,
    ) -> Result<Arc<dyn TtsProviderPort>, ApplicationError>;

    /// 已注册的 Provider 名称
    fn available_providers(&self) -> Vec<String>;

    /// 默认 Provider 名称
    fn default_provider(&self) -> String;

    /// Azure OpenAI 部署列表
    fn deployment_info(&self) -> IndexMap<String, Deployment>;

    /// 默认部署名称
    fn default_deployment(&self) -> String;

    /// 规范化后的 Provider 名称（小写），未注册时报错
    fn resolve_provider(&self, provider: Option<&str>) -> Result<String, ApplicationError>;
}
