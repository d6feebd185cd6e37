//! Provider Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ProviderFactoryPort, AZURE_SPEECH};
use crate::application::queries::{GetVoiceInfo, ListDeployments, ListProviders, ListVoices};
use crate::domain::voice::VoiceInfo;

// ============================================================================
// Response DTOs
// ============================================================================

/// Provider 列表项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSummary {
    pub name: String,
    pub is_default: bool,
}

/// 部署列表项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSummary {
    pub name: String,
    pub model: String,
    pub voice: String,
    pub is_default: bool,
}

/// 音色列表响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicesResponse {
    /// Provider 显示名称
    pub provider: String,
    pub voices: Vec<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Provider 相关查询
pub struct ProviderQueries {
    factory: Arc<dyn ProviderFactoryPort>,
}

impl ProviderQueries {
    pub fn new(factory: Arc<dyn ProviderFactoryPort>) -> Self {
        Self { factory }
    }

    pub fn list_providers(&self, _query: ListProviders) -> Vec<ProviderSummary> {
        let default = self.factory.default_provider();
        self.factory
            .available_providers()
            .into_iter()
            .map(|name| ProviderSummary {
                is_default: name == default,
                name,
            })
            .collect()
    }

    pub fn list_deployments(&self, _query: ListDeployments) -> Vec<DeploymentSummary> {
        let default = self.factory.default_deployment();
        self.factory
            .deployment_info()
            .into_iter()
            .map(|(name, deployment)| DeploymentSummary {
                is_default: name == default,
                name,
                model: deployment.model,
                voice: deployment.voice,
            })
            .collect()
    }

    pub async fn list_voices(&self, query: ListVoices) -> Result<VoicesResponse, ApplicationError> {
        let provider = self
            .factory
            .create(query.provider.as_deref(), query.deployment.as_deref())?;
        let voices = provider.available_voices().await?;

        tracing::debug!(
            provider = %provider.provider_name(),
            count = voices.len(),
            "Listed voices"
        );

        Ok(VoicesResponse {
            provider: provider.provider_name(),
            voices,
        })
    }

    /// 查询音色详情，音色不存在时返回 `VoiceNotFound`
    pub async fn voice_info(&self, query: GetVoiceInfo) -> Result<VoiceInfo, ApplicationError> {
        let provider_name = query.provider.as_deref().unwrap_or(AZURE_SPEECH);
        let provider = self.factory.create(Some(provider_name), None)?;

        let info = provider.voice_info(&query.voice).await?;
        info.ok_or(ApplicationError::VoiceNotFound(query.voice))
    }
}
