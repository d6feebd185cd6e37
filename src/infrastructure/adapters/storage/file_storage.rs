//! File Storage - 文件系统音频存储实现
//!
//! 实现 AudioStoragePort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{AudioStorageError, AudioStoragePort};

/// 文件系统音频存储
pub struct FileAudioStorage {
    /// 输出根目录
    base_dir: PathBuf,
}

impl FileAudioStorage {
    /// 创建新的文件存储，目录在首次写入时创建
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl AudioStoragePort for FileAudioStorage {
    fn output_dir(&self) -> &Path {
        &self.base_dir
    }

    async fn save_audio(&self, path: &Path, data: &[u8]) -> Result<PathBuf, AudioStorageError> {
        if data.is_empty() {
            return Err(AudioStorageError::EmptyAudio(path.display().to_string()));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AudioStorageError::IoError(format!("{}: {}", parent.display(), e)))?;
        }

        fs::write(path, data)
            .await
            .map_err(|e| AudioStorageError::IoError(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(
            path = %path.display(),
            size = data.len(),
            "Saved audio"
        );

        Ok(path.to_path_buf())
    }
}
