//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use std::path::PathBuf;
use thiserror::Error;

use crate::application::ports::TtsError;
use crate::config::DeploymentNotFound;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 输入文件不存在
    #[error("Input file not found: {}\nPlease create the file with text to synthesize.", .0.display())]
    InputNotFound(PathBuf),

    /// 输入文件为空
    #[error("Input file is empty: {}", .0.display())]
    EmptyInput(PathBuf),

    /// 未注册的 Provider
    #[error("Unknown provider '{name}'. Available providers: {}", .available.join(", "))]
    UnknownProvider {
        name: String,
        available: Vec<String>,
    },

    /// 部署不存在
    #[error(transparent)]
    DeploymentNotFound(#[from] DeploymentNotFound),

    /// 音色不存在
    #[error("Voice '{0}' not found.")]
    VoiceNotFound(String),

    /// 外部 TTS 服务错误
    #[error(transparent)]
    Tts(#[from] TtsError),

    /// 文件读写错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ApplicationError {
    /// 创建 UnknownProvider 错误
    pub fn unknown_provider(name: impl Into<String>, available: &[&str]) -> Self {
        Self::UnknownProvider {
            name: name.into(),
            available: available.iter().map(|s| s.to_string()).collect(),
        }
    }
}
