//! Synthesize Command Handler

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::commands::{
    SynthesisEvent, Synthesize, SynthesizeResponse, DEFAULT_INPUT_PATH,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ProviderFactoryPort, SynthesisOptions, SynthesisRequest, AZURE_OPENAI,
};

/// 预览长度（字符）
pub const PREVIEW_CHARS: usize = 50;

/// 读取输入文本
///
/// 去掉首尾空白；文件不存在或内容为空时返回错误
pub async fn read_input_text(path: Option<&Path>) -> Result<String, ApplicationError> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH));

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApplicationError::InputNotFound(path));
        }
        Err(e) => return Err(e.into()),
    };

    let text = content.trim();
    if text.is_empty() {
        return Err(ApplicationError::EmptyInput(path));
    }

    Ok(text.to_string())
}

/// 文本预览：前 `max_chars` 个字符，被截断时追加 "..."
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Synthesize Handler
pub struct SynthesizeHandler {
    factory: Arc<dyn ProviderFactoryPort>,
}

impl SynthesizeHandler {
    pub fn new(factory: Arc<dyn ProviderFactoryPort>) -> Self {
        Self { factory }
    }

    /// 执行合成，通过 `on_event` 报告进度
    pub async fn handle<F>(
        &self,
        command: Synthesize,
        mut on_event: F,
    ) -> Result<SynthesizeResponse, ApplicationError>
    where
        F: FnMut(SynthesisEvent) + Send,
    {
        let text = read_input_text(command.input.as_deref()).await?;
        on_event(SynthesisEvent::InputRead {
            chars: text.chars().count(),
        });

        let provider_key = self.factory.resolve_provider(command.provider.as_deref())?;
        let provider = self
            .factory
            .create(Some(provider_key.as_str()), command.deployment.as_deref())?;
        let provider_name = provider.provider_name();
        on_event(SynthesisEvent::ProviderReady {
            name: provider_name.clone(),
        });

        // speed 只对 azure-openai 有意义
        let speed = (provider_key == AZURE_OPENAI).then_some(command.speed);

        let options = SynthesisOptions {
            voice: command.voice,
            speed,
            style: command.style,
            rate: command.rate,
            pitch: command.pitch,
            response_format: command.format,
        };

        on_event(SynthesisEvent::Synthesizing {
            preview: preview(&text, PREVIEW_CHARS),
        });

        let mut request = SynthesisRequest::new(text).with_options(options);
        if let Some(output) = command.output {
            request = request.with_output_path(output);
        }

        let path = provider.synthesize(request).await?;

        tracing::info!(
            provider = %provider_name,
            path = %path.display(),
            "Synthesis finished"
        );

        Ok(SynthesizeResponse {
            provider: provider_name,
            path,
        })
    }
}
