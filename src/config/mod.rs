//! Configuration Module
//!
//! 提供应用配置管理功能，支持多层级配置来源：
//! - 环境变量（最高优先级，`.env` 由 CLI 预先加载）
//! - 配置文件（TOML 等格式）
//! - 默认值（最低优先级）

mod loader;
mod types;

pub use loader::{load_settings, load_settings_from_path, print_settings, ConfigError};
pub use types::{Deployment, DeploymentNotFound, Settings, DEFAULT_DEPLOYMENT_VOICE};
