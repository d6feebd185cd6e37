//! Azure Speech TTS Client - 调用 Azure AI Speech REST 接口
//!
//! 实现 TtsProviderPort trait
//!
//! Azure Speech API:
//! - 合成: POST {base}/cognitiveservices/v1
//!   - `Ocp-Apim-Subscription-Key`: 订阅密钥
//!   - `Content-Type`: `application/ssml+xml`
//!   - `X-Microsoft-OutputFormat`: 输出格式
//! - 音色列表: GET {base}/cognitiveservices/voices/list
//!
//! base 默认为 `https://{region}.tts.speech.microsoft.com`

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{AudioStoragePort, SynthesisRequest, TtsError, TtsProviderPort};
use crate::domain::ssml::{build_plain_ssml, build_ssml, is_ssml, Prosody};
use crate::domain::voice::{AudioFormat, VoiceInfo};

use super::timestamp;

pub const PROVIDER_NAME: &str = "Azure AI Speech";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";
const USER_AGENT: &str = concat!("ai-voice/", env!("CARGO_PKG_VERSION"));

/// 无法获取音色列表时使用的常用音色
pub const POPULAR_VOICES: &[&str] = &[
    "en-US-JennyNeural",
    "en-US-GuyNeural",
    "en-US-AriaNeural",
    "en-US-DavisNeural",
    "en-US-AmberNeural",
    "en-US-AnaNeural",
    "en-GB-SoniaNeural",
    "en-GB-RyanNeural",
    "en-AU-NatashaNeural",
    "en-AU-WilliamNeural",
    "fr-FR-DeniseNeural",
    "fr-FR-HenriNeural",
    "de-DE-KatjaNeural",
    "de-DE-ConradNeural",
    "es-ES-ElviraNeural",
    "es-ES-AlvaroNeural",
    "it-IT-ElsaNeural",
    "it-IT-DiegoNeural",
    "ja-JP-NanamiNeural",
    "ja-JP-KeitaNeural",
    "zh-CN-XiaoxiaoNeural",
    "zh-CN-YunxiNeural",
];

/// voices/list 返回的条目
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VoiceListEntry {
    name: String,
    short_name: String,
    #[serde(default)]
    local_name: String,
    #[serde(default)]
    locale: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    voice_type: String,
    #[serde(default)]
    style_list: Vec<String>,
    #[serde(default)]
    role_play_list: Vec<String>,
    #[serde(default)]
    secondary_locale_list: Vec<String>,
}

impl From<VoiceListEntry> for VoiceInfo {
    fn from(entry: VoiceListEntry) -> Self {
        VoiceInfo {
            name: entry.name,
            short_name: entry.short_name,
            local_name: entry.local_name,
            locale: entry.locale,
            gender: entry.gender,
            voice_type: entry.voice_type,
            styles: entry.style_list,
            roles: entry.role_play_list,
            secondary_locales: entry.secondary_locale_list,
        }
    }
}

/// Azure Speech 客户端配置
#[derive(Debug, Clone)]
pub struct AzureSpeechConfig {
    pub api_key: Option<SecretString>,
    /// 区域，例如 westeurope
    pub region: String,
    /// 自定义服务地址，优先于 region
    pub endpoint: Option<String>,
    /// 默认音色
    pub voice: String,
    /// SSML xml:lang
    pub language: String,
    pub output_format: AudioFormat,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl AzureSpeechConfig {
    /// 服务基础地址
    pub fn base_url(&self) -> Result<String, TtsError> {
        if let Some(endpoint) = self.endpoint.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            return Ok(endpoint.trim_end_matches('/').to_string());
        }

        let region = self.region.trim();
        if region.is_empty() {
            return Err(TtsError::Configuration(
                "AZURE_SPEECH_REGION is not set".to_string(),
            ));
        }

        Ok(format!("https://{}.tts.speech.microsoft.com", region))
    }
}

/// Azure Speech TTS 客户端
pub struct AzureSpeechClient {
    client: Client,
    config: AzureSpeechConfig,
    storage: Arc<dyn AudioStoragePort>,
}

impl AzureSpeechClient {
    /// 创建新的客户端
    pub fn new(
        config: AzureSpeechConfig,
        storage: Arc<dyn AudioStoragePort>,
    ) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            config,
            storage,
        })
    }

    fn api_key(&self) -> Result<&SecretString, TtsError> {
        self.config
            .api_key
            .as_ref()
            .ok_or_else(|| TtsError::Configuration("AZURE_SPEECH_API_KEY is not set".to_string()))
    }

    /// 自动生成的文件名：azure-speech_{short}_{timestamp}.{ext}
    fn generated_file_name(voice: &str, format: AudioFormat) -> String {
        let short = voice.rsplit('-').next().unwrap_or(voice).replace("Neural", "");
        format!("azure-speech_{}_{}.{}", short, timestamp(), format.extension())
    }

    /// 生成请求体
    ///
    /// 已经是 SSML 的输入原样发送；有风格/语速/音高时构建完整标记；否则只包一层 voice
    fn request_body(&self, request: &SynthesisRequest, voice: &str) -> String {
        if is_ssml(&request.text) {
            return request.text.clone();
        }

        let options = &request.options;
        let prosody = Prosody::new(
            options.rate.as_deref(),
            options.pitch.as_deref(),
            options.style.as_deref(),
        );

        if prosody.is_customized() {
            build_ssml(&request.text, voice, &self.config.language, &prosody)
        } else {
            build_plain_ssml(&request.text, voice, &self.config.language)
        }
    }

    /// 从服务端获取完整音色列表
    async fn fetch_voices(&self) -> Result<Vec<VoiceInfo>, TtsError> {
        let api_key = self.api_key()?;
        let url = format!("{}/cognitiveservices/voices/list", self.config.base_url()?);

        tracing::debug!(url = %url, "Fetching Azure Speech voices list");

        let response = self
            .client
            .get(&url)
            .header(SUBSCRIPTION_KEY_HEADER, api_key.expose_secret())
            .send()
            .await
            .map_err(|e| TtsError::from_send_error(e, "Azure Speech"))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TtsError::from_status(status.as_u16(), error_text));
        }

        let entries: Vec<VoiceListEntry> = response
            .json()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to parse voices list: {}", e)))?;

        tracing::debug!(count = entries.len(), "Azure Speech voices list retrieved");

        Ok(entries.into_iter().map(VoiceInfo::from).collect())
    }
}

#[async_trait]
impl TtsProviderPort for AzureSpeechClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<PathBuf, TtsError> {
        let api_key = self.api_key()?;
        let url = format!("{}/cognitiveservices/v1", self.config.base_url()?);

        let voice = request
            .options
            .voice
            .as_deref()
            .unwrap_or(self.config.voice.as_str());
        let format = request
            .options
            .response_format
            .unwrap_or(self.config.output_format);
        let output_format = format.azure_speech_output_format().ok_or_else(|| {
            TtsError::Unsupported {
                provider: PROVIDER_NAME.to_string(),
                feature: format!("{} output", format),
            }
        })?;

        let output_path = self.storage.resolve_path(
            request.output_path.as_deref(),
            &Self::generated_file_name(voice, format),
        );

        let body = self.request_body(&request, voice);

        tracing::debug!(
            url = %url,
            voice = %voice,
            output_format = output_format,
            body_len = body.len(),
            "Sending Azure Speech synthesis request"
        );

        let response = self
            .client
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, api_key.expose_secret())
            .header(reqwest::header::CONTENT_TYPE, "application/ssml+xml")
            .header(OUTPUT_FORMAT_HEADER, output_format)
            .body(body)
            .send()
            .await
            .map_err(|e| TtsError::from_send_error(e, "Azure Speech"))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::debug!(status = %status, body = %error_text, "Azure Speech synthesis error");
            return Err(TtsError::from_status(status.as_u16(), error_text));
        }

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?;

        let saved = self
            .storage
            .save_audio(&output_path, &audio_data)
            .await
            .map_err(|e| TtsError::StorageError(e.to_string()))?;

        tracing::info!(
            voice = %voice,
            audio_size = audio_data.len(),
            path = %saved.display(),
            "Azure Speech synthesis completed"
        );

        Ok(saved)
    }

    async fn available_voices(&self) -> Result<Vec<String>, TtsError> {
        match self.fetch_voices().await {
            Ok(voices) => {
                let mut names: Vec<String> = voices.into_iter().map(|v| v.short_name).collect();
                names.sort();
                Ok(names)
            }
            Err(e) => {
                tracing::warn!("Could not retrieve voices list, using popular voices: {}", e);
                Ok(POPULAR_VOICES.iter().map(|v| v.to_string()).collect())
            }
        }
    }

    async fn voice_info(&self, voice_name: &str) -> Result<Option<VoiceInfo>, TtsError> {
        let voices = self.fetch_voices().await?;
        Ok(voices
            .into_iter()
            .find(|v| v.short_name.eq_ignore_ascii_case(voice_name)))
    }

    fn provider_name(&self) -> String {
        PROVIDER_NAME.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SynthesisOptions;
    use crate::infrastructure::adapters::storage::FileAudioStorage;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{body_string, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(endpoint: &str) -> AzureSpeechConfig {
        AzureSpeechConfig {
            api_key: Some(SecretString::from("speech-key".to_string())),
            region: "westeurope".to_string(),
            endpoint: Some(endpoint.to_string()),
            voice: "en-US-JennyNeural".to_string(),
            language: "en-US".to_string(),
            output_format: AudioFormat::Mp3,
            timeout_secs: 5,
        }
    }

    fn client_for(config: AzureSpeechConfig, dir: &TempDir) -> AzureSpeechClient {
        let storage = Arc::new(FileAudioStorage::new(dir.path()));
        AzureSpeechClient::new(config, storage).unwrap()
    }

    fn voices_body() -> serde_json::Value {
        json!([
            {
                "Name": "Microsoft Server Speech Text to Speech Voice (zh-CN, YunxiNeural)",
                "DisplayName": "Yunxi",
                "LocalName": "云希",
                "ShortName": "zh-CN-YunxiNeural",
                "Gender": "Male",
                "Locale": "zh-CN",
                "StyleList": ["narration-relaxed", "cheerful", ""],
                "RolePlayList": ["Narrator", "Boy"],
                "VoiceType": "Neural",
                "Status": "GA"
            },
            {
                "Name": "Microsoft Server Speech Text to Speech Voice (en-US, JennyNeural)",
                "DisplayName": "Jenny",
                "LocalName": "Jenny",
                "ShortName": "en-US-JennyNeural",
                "Gender": "Female",
                "Locale": "en-US",
                "SecondaryLocaleList": ["de-DE", "fr-FR"],
                "VoiceType": "Neural",
                "Status": "GA"
            }
        ])
    }

    #[test]
    fn test_base_url_from_region() {
        let config = AzureSpeechConfig {
            endpoint: None,
            ..test_config("")
        };
        assert_eq!(
            config.base_url().unwrap(),
            "https://westeurope.tts.speech.microsoft.com"
        );

        let missing = AzureSpeechConfig {
            region: String::new(),
            ..config
        };
        assert!(matches!(missing.base_url(), Err(TtsError::Configuration(_))));
    }

    #[test]
    fn test_generated_file_name_uses_short_voice() {
        let name = AzureSpeechClient::generated_file_name("en-US-JennyNeural", AudioFormat::Wav);
        assert!(name.starts_with("azure-speech_Jenny_"));
        assert!(name.ends_with(".wav"));
    }

    #[tokio::test]
    async fn test_plain_text_is_wrapped_in_minimal_ssml() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cognitiveservices/v1"))
            .and(header("Ocp-Apim-Subscription-Key", "speech-key"))
            .and(header("Content-Type", "application/ssml+xml"))
            .and(header("X-Microsoft-OutputFormat", "audio-16khz-32kbitrate-mono-mp3"))
            .and(body_string(
                "<speak version=\"1.0\" xmlns=\"http://www.w3.org/2001/10/synthesis\" xml:lang=\"en-US\"><voice name=\"en-US-JennyNeural\">Hello &amp; welcome</voice></speak>",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3audio".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = client_for(test_config(&server.uri()), &dir);

        let path = client
            .synthesize(SynthesisRequest::new("Hello & welcome"))
            .await
            .unwrap();

        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.starts_with("azure-speech_Jenny_"));
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3audio");
    }

    #[tokio::test]
    async fn test_style_and_rate_build_prosody_markup() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cognitiveservices/v1"))
            .and(header("X-Microsoft-OutputFormat", "riff-24khz-16bit-mono-pcm"))
            .and(body_string_contains(
                "<voice name=\"zh-CN-YunxiNeural\"><mstts:express-as style=\"cheerful\"><prosody rate=\"1.2\" pitch=\"0%\">你好</prosody></mstts:express-as></voice>",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"RIFF".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = AzureSpeechConfig {
            output_format: AudioFormat::Wav,
            ..test_config(&server.uri())
        };
        let client = client_for(config, &dir);

        let request = SynthesisRequest::new("你好")
            .with_output_path("greeting.wav")
            .with_options(SynthesisOptions {
                voice: Some("zh-CN-YunxiNeural".into()),
                style: Some("cheerful".into()),
                rate: Some("1.2".into()),
                speed: Some(2.0),
                ..Default::default()
            });

        let path = client.synthesize(request).await.unwrap();
        assert_eq!(path, dir.path().join("greeting.wav"));
    }

    #[tokio::test]
    async fn test_ssml_input_is_sent_verbatim() {
        let ssml = "<speak version=\"1.0\"><voice name=\"en-US-GuyNeural\">Hi</voice></speak>";
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string(ssml))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = client_for(test_config(&server.uri()), &dir);

        let request = SynthesisRequest::new(ssml).with_options(SynthesisOptions {
            style: Some("sad".into()),
            ..Default::default()
        });
        assert!(client.synthesize(request).await.is_ok());
    }

    #[tokio::test]
    async fn test_flac_output_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_for(test_config("http://localhost:1"), &dir);

        let request = SynthesisRequest::new("Hi").with_options(SynthesisOptions {
            response_format: Some(AudioFormat::Flac),
            ..Default::default()
        });
        let err = client.synthesize(request).await.unwrap_err();
        assert!(matches!(err, TtsError::Unsupported { .. }));
    }

    #[tokio::test]
    async fn test_service_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("too many requests"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = client_for(test_config(&server.uri()), &dir);

        let err = client
            .synthesize(SynthesisRequest::new("Hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, TtsError::ServiceError { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_available_voices_sorted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cognitiveservices/voices/list"))
            .and(header("Ocp-Apim-Subscription-Key", "speech-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(voices_body()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = client_for(test_config(&server.uri()), &dir);

        let voices = client.available_voices().await.unwrap();
        assert_eq!(voices, vec!["en-US-JennyNeural", "zh-CN-YunxiNeural"]);
    }

    #[tokio::test]
    async fn test_available_voices_falls_back_to_popular_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = client_for(test_config(&server.uri()), &dir);

        let voices = client.available_voices().await.unwrap();
        assert_eq!(voices.len(), POPULAR_VOICES.len());
        assert_eq!(voices[0], "en-US-JennyNeural");
    }

    #[tokio::test]
    async fn test_voice_info_is_case_insensitive() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cognitiveservices/voices/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(voices_body()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = client_for(test_config(&server.uri()), &dir);

        let info = client.voice_info("ZH-cn-yunxineural").await.unwrap().unwrap();
        assert_eq!(info.short_name, "zh-CN-YunxiNeural");
        assert_eq!(info.local_name, "云希");
        assert_eq!(info.roles, vec!["Narrator", "Boy"]);
        assert_eq!(info.usable_styles(), vec!["narration-relaxed", "cheerful"]);
        assert!(info.secondary_locales.is_empty());

        let jenny = client.voice_info("en-US-JennyNeural").await.unwrap().unwrap();
        assert_eq!(jenny.secondary_locales, vec!["de-DE", "fr-FR"]);

        assert!(client.voice_info("xx-XX-NobodyNeural").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_voice_info_propagates_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cognitiveservices/voices/list"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let client = client_for(test_config(&server.uri()), &dir);

        let err = client.voice_info("en-US-JennyNeural").await.unwrap_err();
        assert!(matches!(
            err,
            TtsError::ServiceError { status: 503, ref message } if message == "busy"
        ));
    }
}
