//! AI Voice - 文本转语音命令行工具
//!
//! 架构设计: CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - 音频格式、音色信息、SSML 构建
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsProvider, AudioStorage, ProviderFactory）
//! - Commands: 合成命令处理器
//! - Queries: Provider / 部署 / 音色查询
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Azure OpenAI、Azure AI Speech 客户端，文件存储
//! - Factory: Provider 注册表
//! - CLI: 参数解析与输出

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_settings, Settings};
