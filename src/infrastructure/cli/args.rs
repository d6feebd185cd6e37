//! 命令行参数定义

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::commands::{Synthesize, DEFAULT_SPEED};
use crate::domain::voice::AudioFormat;

const AFTER_HELP: &str = "\
Examples:
  # Basic usage (uses input/text.txt and the default provider)
  ai-voice synthesize

  # Pick an Azure OpenAI deployment and voice
  ai-voice synthesize --provider azure-openai --deployment tts-hd --voice nova --speed 1.2

  # Azure Speech with style and prosody
  ai-voice synthesize --provider azure-speech --voice en-US-JennyNeural --style cheerful --rate 1.2

  # Custom input and output
  ai-voice synthesize --input my-script.txt --output speech.mp3

  # List providers, deployments and voices
  ai-voice providers
  ai-voice deployments
  ai-voice voices azure-speech

  # Inspect voice capabilities
  ai-voice voice-info en-US-JennyNeural";

#[derive(Debug, Parser)]
#[command(name = "ai-voice", version)]
#[command(about = "AI Voice - Text-to-Speech Converter", long_about = None)]
#[command(arg_required_else_help = true, after_help = AFTER_HELP)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read settings from this file instead of ai-voice.* in the working directory
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert text from the input file to speech
    Synthesize(SynthesizeArgs),

    /// List available TTS providers
    Providers,

    /// List configured Azure OpenAI deployments
    Deployments,

    /// List available voices for a provider
    Voices {
        /// Provider name (default: DEFAULT_PROVIDER)
        #[arg(value_name = "PROVIDER")]
        provider: Option<String>,

        /// Azure OpenAI deployment name
        #[arg(value_name = "DEPLOYMENT")]
        deployment: Option<String>,
    },

    /// Show detailed information about a voice
    VoiceInfo {
        /// Voice short name, e.g. en-US-JennyNeural
        #[arg(value_name = "VOICE")]
        voice: String,

        /// Provider name (default: azure-speech)
        #[arg(long, value_name = "NAME")]
        provider: Option<String>,
    },
}

#[derive(Debug, clap::Args)]
pub struct SynthesizeArgs {
    /// Input text file
    #[arg(long, value_name = "PATH", default_value = "input/text.txt")]
    pub input: PathBuf,

    /// TTS provider (azure-openai, azure-speech)
    #[arg(long, value_name = "NAME")]
    pub provider: Option<String>,

    /// Azure OpenAI deployment
    #[arg(long, value_name = "NAME")]
    pub deployment: Option<String>,

    /// Voice to use (default: from configuration)
    #[arg(long, value_name = "NAME")]
    pub voice: Option<String>,

    /// Output file path (default: auto-generated)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Speech speed, 0.25-4.0 (azure-openai only)
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    pub speed: f32,

    /// Speaking style (azure-speech only, e.g. cheerful, sad)
    #[arg(long, value_name = "NAME")]
    pub style: Option<String>,

    /// Speech rate (azure-speech only, e.g. 1.0, 1.5, +10%)
    #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
    pub rate: Option<String>,

    /// Pitch adjustment (azure-speech only, e.g. 0%, +10%)
    #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
    pub pitch: Option<String>,

    /// Audio format (mp3, wav, opus, flac, aac, pcm)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<AudioFormat>,
}

impl From<SynthesizeArgs> for Synthesize {
    fn from(args: SynthesizeArgs) -> Self {
        Self {
            input: Some(args.input),
            provider: args.provider,
            deployment: args.deployment,
            voice: args.voice,
            output: args.output,
            speed: args.speed,
            style: args.style,
            rate: args.rate,
            pitch: args.pitch,
            format: args.format,
        }
    }
}
