//! 终端输出格式

use std::io::{self, Write};
use std::path::Path;

use crate::application::commands::SynthesisEvent;
use crate::application::queries::handlers::{DeploymentSummary, ProviderSummary, VoicesResponse};
use crate::domain::voice::VoiceInfo;

const RULE_WIDTH: usize = 70;

fn default_marker(is_default: bool) -> &'static str {
    if is_default {
        " (default)"
    } else {
        ""
    }
}

fn write_list<W, S>(out: &mut W, items: impl IntoIterator<Item = S>) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    for item in items {
        writeln!(out, "  - {}", item.as_ref())?;
    }
    Ok(())
}

/// 合成进度
pub fn write_event<W: Write>(out: &mut W, event: &SynthesisEvent) -> io::Result<()> {
    match event {
        SynthesisEvent::InputRead { chars } => {
            writeln!(out, "Read {} characters from input file", chars)
        }
        SynthesisEvent::ProviderReady { name } => writeln!(out, "Using provider: {}", name),
        SynthesisEvent::Synthesizing { preview } => {
            writeln!(out, "Synthesizing text: {}", preview)
        }
    }
}

pub fn write_saved<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(out, "✓ Audio saved to: {}", path.display())
}

pub fn write_providers<W: Write>(out: &mut W, providers: &[ProviderSummary]) -> io::Result<()> {
    writeln!(out, "Available TTS providers:")?;
    for provider in providers {
        writeln!(out, "  - {}{}", provider.name, default_marker(provider.is_default))?;
    }
    Ok(())
}

pub fn write_deployments<W: Write>(
    out: &mut W,
    deployments: &[DeploymentSummary],
) -> io::Result<()> {
    writeln!(out, "Available Azure OpenAI deployments:")?;
    for deployment in deployments {
        writeln!(
            out,
            "  - {}{}",
            deployment.name,
            default_marker(deployment.is_default)
        )?;
        writeln!(out, "    Model: {}", deployment.model)?;
        writeln!(out, "    Voice: {}", deployment.voice)?;
    }
    Ok(())
}

pub fn write_voices<W: Write>(out: &mut W, response: &VoicesResponse) -> io::Result<()> {
    writeln!(out, "Available voices for {}:", response.provider)?;
    write_list(out, &response.voices)
}

/// 音色详情及用法示例
pub fn write_voice_info<W: Write>(out: &mut W, info: &VoiceInfo) -> io::Result<()> {
    let short_name = &info.short_name;

    writeln!(out, "\nVoice Information: {}", short_name)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Full Name:      {}", info.name)?;
    writeln!(out, "Local Name:     {}", info.local_name)?;
    writeln!(out, "Locale:         {}", info.locale)?;
    writeln!(out, "Gender:         {}", info.gender)?;
    writeln!(out, "Voice Type:     {}", info.voice_type)?;

    if info.is_multilingual() {
        writeln!(
            out,
            "\nMultilingual Support ({} additional locales):",
            info.secondary_locales.len()
        )?;
        write_list(out, &info.secondary_locales)?;
    }

    let styles = info.usable_styles();
    if styles.is_empty() {
        writeln!(out, "\nAvailable Styles: None (use default style)")?;
    } else {
        writeln!(out, "\nAvailable Styles ({}):", styles.len())?;
        write_list(out, &styles)?;
    }

    if info.roles.is_empty() {
        writeln!(out, "\nAvailable Roles: None (use default role)")?;
    } else {
        writeln!(out, "\nAvailable Roles ({}):", info.roles.len())?;
        write_list(out, &info.roles)?;
    }

    let base = format!("ai-voice synthesize --provider azure-speech --voice {}", short_name);

    writeln!(out, "\nUsage Examples:")?;
    writeln!(out, "  # Basic synthesis:")?;
    writeln!(out, "  {}", base)?;

    if let Some(style) = styles.first() {
        writeln!(out, "\n  # With style:")?;
        writeln!(out, "  {} --style {}", base, style)?;
    }

    if !info.roles.is_empty() {
        writeln!(out, "\n  # With role (requires SSML):")?;
        writeln!(out, "  # Note: Role-play requires custom SSML input")?;
    }

    writeln!(out, "\n  # Adjust rate and pitch:")?;
    writeln!(out, "  {} --rate 1.2 --pitch +5%", base)?;

    if info.is_multilingual() {
        writeln!(out, "\n  # Multilingual synthesis:")?;
        writeln!(
            out,
            "  # This voice can speak in {} languages!",
            info.secondary_locales.len() + 1
        )?;
    }

    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn jenny() -> VoiceInfo {
        VoiceInfo {
            name: "Microsoft Server Speech Text to Speech Voice (en-US, JennyNeural)".into(),
            short_name: "en-US-JennyNeural".into(),
            local_name: "Jenny".into(),
            locale: "en-US".into(),
            gender: "Female".into(),
            voice_type: "Neural".into(),
            styles: vec!["cheerful".into(), " ".into(), "sad".into()],
            roles: vec![],
            secondary_locales: vec![],
        }
    }

    #[test]
    fn test_progress_lines() {
        let text = render(|out| {
            write_event(out, &SynthesisEvent::InputRead { chars: 12 })?;
            write_event(
                out,
                &SynthesisEvent::ProviderReady {
                    name: "Azure AI Speech".into(),
                },
            )?;
            write_saved(out, Path::new("output/a.mp3"))
        });

        assert_eq!(
            text,
            "Read 12 characters from input file\nUsing provider: Azure AI Speech\n✓ Audio saved to: output/a.mp3\n"
        );
    }

    #[test]
    fn test_providers_marks_default() {
        let text = render(|out| {
            write_providers(
                out,
                &[
                    ProviderSummary {
                        name: "azure-openai".into(),
                        is_default: true,
                    },
                    ProviderSummary {
                        name: "azure-speech".into(),
                        is_default: false,
                    },
                ],
            )
        });

        assert_eq!(
            text,
            "Available TTS providers:\n  - azure-openai (default)\n  - azure-speech\n"
        );
    }

    #[test]
    fn test_deployments_block() {
        let text = render(|out| {
            write_deployments(
                out,
                &[DeploymentSummary {
                    name: "tts-hd".into(),
                    model: "tts-hd".into(),
                    voice: "nova".into(),
                    is_default: false,
                }],
            )
        });

        assert_eq!(
            text,
            "Available Azure OpenAI deployments:\n  - tts-hd\n    Model: tts-hd\n    Voice: nova\n"
        );
    }

    #[test]
    fn test_voice_info_with_styles() {
        let text = render(|out| write_voice_info(out, &jenny()));

        assert!(text.contains("Voice Information: en-US-JennyNeural"));
        assert!(text.contains("Local Name:     Jenny"));
        assert!(text.contains("Available Styles (2):\n  - cheerful\n  - sad\n"));
        assert!(text.contains("Available Roles: None (use default role)"));
        assert!(text.contains("--voice en-US-JennyNeural --style cheerful"));
        assert!(!text.contains("Multilingual"));
    }

    #[test]
    fn test_voice_info_multilingual_without_styles() {
        let mut info = jenny();
        info.styles.clear();
        info.roles = vec!["Girl".into()];
        info.secondary_locales = vec!["de-DE".into(), "fr-FR".into()];

        let text = render(|out| write_voice_info(out, &info));

        assert!(text.contains("Available Styles: None (use default style)"));
        assert!(text.contains("Multilingual Support (2 additional locales):\n  - de-DE\n  - fr-FR\n"));
        assert!(text.contains("Available Roles (1):\n  - Girl\n"));
        assert!(text.contains("This voice can speak in 3 languages!"));
        assert!(!text.contains("# With style:"));
    }
}
