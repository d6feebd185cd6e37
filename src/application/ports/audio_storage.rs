//! Audio Storage Port - 出站端口
//!
//! 定义合成结果的落盘抽象

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 音频存储错误
#[derive(Debug, Error)]
pub enum AudioStorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Empty audio data for {0}")]
    EmptyAudio(String),
}

/// Audio Storage Port - 出站端口
#[async_trait]
pub trait AudioStoragePort: Send + Sync {
    /// 存储根目录
    fn output_dir(&self) -> &Path;

    /// 解析输出路径
    ///
    /// - 绝对路径原样使用
    /// - 相对路径放到输出目录下
    /// - 未指定时使用 `generated_name` 放到输出目录下
    fn resolve_path(&self, requested: Option<&Path>, generated_name: &str) -> PathBuf {
        match requested {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.output_dir().join(path),
            None => self.output_dir().join(generated_name),
        }
    }

    /// 保存音频数据，必要时创建父目录
    async fn save_audio(&self, path: &Path, data: &[u8]) -> Result<PathBuf, AudioStorageError>;
}
