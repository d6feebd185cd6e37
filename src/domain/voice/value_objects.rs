//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 音频输出格式
///
/// 同时用作 Azure OpenAI 的 `response_format` 和输出文件扩展名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    Opus,
    Flac,
    Aac,
    Pcm,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 6] = [
        Self::Mp3,
        Self::Wav,
        Self::Opus,
        Self::Flac,
        Self::Aac,
        Self::Pcm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Opus => "opus",
            Self::Flac => "flac",
            Self::Aac => "aac",
            Self::Pcm => "pcm",
        }
    }

    /// 文件扩展名
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Azure Speech `X-Microsoft-OutputFormat` 取值
    ///
    /// Azure Speech 不支持 flac/aac 输出，返回 `None`
    pub fn azure_speech_output_format(&self) -> Option<&'static str> {
        match self {
            Self::Mp3 => Some("audio-16khz-32kbitrate-mono-mp3"),
            Self::Wav => Some("riff-24khz-16bit-mono-pcm"),
            Self::Opus => Some("ogg-24khz-16bit-mono-opus"),
            Self::Pcm => Some("raw-24khz-16bit-mono-pcm"),
            Self::Flac | Self::Aac => None,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == lower)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|f| f.as_str()).collect();
                format!("Unknown audio format '{}'. Expected one of: {}", s, known.join(", "))
            })
    }
}

impl TryFrom<String> for AudioFormat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 音色详情（只读）
///
/// 由远端服务的音色列表查询得到，不做本地持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceInfo {
    /// 完整名称，例如 `Microsoft Server Speech Text to Speech Voice (en-US, JennyNeural)`
    pub name: String,
    /// 短名称，例如 `en-US-JennyNeural`
    pub short_name: String,
    /// 本地化显示名
    pub local_name: String,
    pub locale: String,
    pub gender: String,
    /// 例如 `Neural`
    pub voice_type: String,
    /// 说话风格（cheerful, sad, ...）
    pub styles: Vec<String>,
    /// 角色扮演列表
    pub roles: Vec<String>,
    /// 多语言音色支持的其他 locale
    pub secondary_locales: Vec<String>,
}

impl VoiceInfo {
    /// 去掉空白项后的风格列表
    pub fn usable_styles(&self) -> Vec<&str> {
        self.styles
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn is_multilingual(&self) -> bool {
        !self.secondary_locales.is_empty()
    }
}
