//! Synthesize Commands

use std::path::PathBuf;

use crate::domain::voice::AudioFormat;

/// 默认输入文件
pub const DEFAULT_INPUT_PATH: &str = "input/text.txt";

/// 默认语速
pub const DEFAULT_SPEED: f32 = 1.0;

/// 合成命令
///
/// 所有可选字段为 None 时使用 Provider 的配置默认值
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesize {
    /// 输入文本文件（None 时读取 input/text.txt）
    pub input: Option<PathBuf>,
    /// Provider 名称（None 时使用默认 Provider）
    pub provider: Option<String>,
    /// Azure OpenAI 部署名
    pub deployment: Option<String>,
    pub voice: Option<String>,
    /// 输出文件（相对路径位于输出目录下）
    pub output: Option<PathBuf>,
    /// 语速，只转发给 azure-openai
    pub speed: f32,
    /// 说话风格（azure-speech）
    pub style: Option<String>,
    /// 语速，例如 "1.2" 或 "+10%"（azure-speech）
    pub rate: Option<String>,
    /// 音调，例如 "+5%"（azure-speech）
    pub pitch: Option<String>,
    pub format: Option<AudioFormat>,
}

impl Default for Synthesize {
    fn default() -> Self {
        Self {
            input: None,
            provider: None,
            deployment: None,
            voice: None,
            output: None,
            speed: DEFAULT_SPEED,
            style: None,
            rate: None,
            pitch: None,
            format: None,
        }
    }
}

/// 合成过程中的进度事件
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisEvent {
    /// 已读取输入（字符数）
    InputRead { chars: usize },
    /// Provider 已创建
    ProviderReady { name: String },
    /// 开始合成（文本预览）
    Synthesizing { preview: String },
}

/// 合成结果
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizeResponse {
    pub provider: String,
    pub path: PathBuf,
}
