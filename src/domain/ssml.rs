//! SSML - Speech Synthesis Markup Language 组装
//!
//! Azure Speech 的 REST 接口只接收 SSML，这里负责把纯文本包装成
//! `speak` → `voice` → 可选 `mstts:express-as` → `prosody` 的结构

/// 默认语速（不触发 prosody）
pub const DEFAULT_RATE: &str = "1.0";

/// 默认音高（不触发 prosody）
pub const DEFAULT_PITCH: &str = "0%";

const SSML_NAMESPACE: &str = "http://www.w3.org/2001/10/synthesis";
const MSTTS_NAMESPACE: &str = "https://www.w3.org/2001/mstts";

/// 韵律与风格参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prosody {
    /// 语速，例如 "1.0"、"1.5"、"+10%"
    pub rate: String,
    /// 音高，例如 "0%"、"+5%"
    pub pitch: String,
    /// 说话风格，例如 "cheerful"
    pub style: Option<String>,
}

impl Default for Prosody {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE.to_string(),
            pitch: DEFAULT_PITCH.to_string(),
            style: None,
        }
    }
}

impl Prosody {
    pub fn new(rate: Option<&str>, pitch: Option<&str>, style: Option<&str>) -> Self {
        Self {
            rate: rate.unwrap_or(DEFAULT_RATE).to_string(),
            pitch: pitch.unwrap_or(DEFAULT_PITCH).to_string(),
            style: style
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// 是否需要完整的 prosody/style 标记
    pub fn is_customized(&self) -> bool {
        self.style.is_some() || self.rate != DEFAULT_RATE || self.pitch != DEFAULT_PITCH
    }
}

/// 判断输入是否已经是 SSML 文档
pub fn is_ssml(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with("<?xml") || trimmed.starts_with("<speak")
}

/// XML 转义
pub fn escape_xml(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            _ => result.push(c),
        }
    }
    result
}

/// 构建只包含 voice 的最小 SSML
pub fn build_plain_ssml(text: &str, voice: &str, language: &str) -> String {
    format!(
        r#"<speak version="1.0" xmlns="{SSML_NAMESPACE}" xml:lang="{lang}"><voice name="{voice}">{text}</voice></speak>"#,
        lang = escape_xml(language),
        voice = escape_xml(voice),
        text = escape_xml(text),
    )
}

/// 构建带 prosody 与可选 express-as 风格的 SSML
pub fn build_ssml(text: &str, voice: &str, language: &str, prosody: &Prosody) -> String {
    let mut ssml = format!(
        r#"<speak version="1.0" xmlns="{SSML_NAMESPACE}" xmlns:mstts="{MSTTS_NAMESPACE}" xml:lang="{}">"#,
        escape_xml(language)
    );
    ssml.push_str(&format!(r#"<voice name="{}">"#, escape_xml(voice)));

    if let Some(style) = &prosody.style {
        ssml.push_str(&format!(r#"<mstts:express-as style="{}">"#, escape_xml(style)));
    }

    ssml.push_str(&format!(
        r#"<prosody rate="{}" pitch="{}">"#,
        escape_xml(&prosody.rate),
        escape_xml(&prosody.pitch)
    ));
    ssml.push_str(&escape_xml(text));
    ssml.push_str("</prosody>");

    if prosody.style.is_some() {
        ssml.push_str("</mstts:express-as>");
    }

    ssml.push_str("</voice></speak>");
    ssml
}
