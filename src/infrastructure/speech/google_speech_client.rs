use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{
    RecognitionAlternative, RecognitionResponse, RecognitionResult, RecognizerError,
    SpeechRecognizer, WordInfo,
};
use crate::domain::EncodingCandidate;

#[derive(Debug, Clone)]
pub struct GoogleSpeechConfig {
    pub api_key: String,
    /// Base URL of the speech API; overridable for tests and gateways.
    pub base_url: String,
    pub poll_interval: Duration,
}

impl GoogleSpeechConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://speech.googleapis.com".to_string(),
            poll_interval: Duration::from_secs(2),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Adapter for the Google Cloud Speech-to-Text v1 REST API.
///
/// Holds a single shared `reqwest::Client`; safe to share across concurrent
/// requests since nothing here is mutated after construction.
pub struct GoogleSpeechClient {
    client: reqwest::Client,
    config: GoogleSpeechConfig,
}

impl GoogleSpeechClient {
    pub fn new(config: GoogleSpeechConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn ensure_configured(&self) -> Result<(), RecognizerError> {
        if self.config.api_key.trim().is_empty() {
            return Err(RecognizerError::NotConfigured(
                "SPEECH_API_KEY is not set".to_string(),
            ));
        }
        Ok(())
    }

    fn request_body(
        audio: &[u8],
        candidate: EncodingCandidate,
        language_code: &str,
    ) -> serde_json::Value {
        json!({
            "config": {
                "encoding": candidate.encoding.as_str(),
                "sampleRateHertz": candidate.sample_rate_hertz,
                "languageCode": language_code,
                "enableAutomaticPunctuation": true,
                "enableWordTimeOffsets": true,
                "enableWordConfidence": true,
                "useEnhanced": true,
            },
            "audio": {
                "content": BASE64.encode(audio),
            },
        })
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, RecognizerError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| RecognizerError::Transport(format!("request: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RecognizerError::Transport(format!("read body: {}", e)))?;

        if !status.is_success() {
            return Err(classify_api_error(status.as_u16(), &text));
        }

        serde_json::from_str(&text)
            .map_err(|e| RecognizerError::Transport(format!("parse response: {}", e)))
    }
}

/// Translate a remote rejection into the closed [`RecognizerError`] set so
/// the candidate loop never inspects raw API messages.
fn classify_api_error(status: u16, body: &str) -> RecognizerError {
    if status == 403 || body.contains("PERMISSION_DENIED") || body.contains("API has not been used")
    {
        return RecognizerError::PermissionDenied(format!("status {}: {}", status, body));
    }
    if status == 400 {
        return RecognizerError::InvalidConfiguration(format!("status {}: {}", status, body));
    }
    RecognizerError::RemoteFailure(format!("status {}: {}", status, body))
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechClient {
    async fn recognize(
        &self,
        audio: &[u8],
        candidate: EncodingCandidate,
        language_code: &str,
    ) -> Result<RecognitionResponse, RecognizerError> {
        self.ensure_configured()?;

        let url = format!(
            "{}/v1/speech:recognize?key={}",
            self.config.base_url, self.config.api_key
        );
        let body = Self::request_body(audio, candidate, language_code);

        tracing::debug!(
            encoding = %candidate.encoding,
            sample_rate = candidate.sample_rate_hertz,
            "Sending synchronous recognition request"
        );

        let value = self.post_json(&url, &body).await?;
        let wire: WireRecognitionResponse = serde_json::from_value(value)
            .map_err(|e| RecognizerError::Transport(format!("parse results: {}", e)))?;

        Ok(wire.into())
    }

    async fn long_running_recognize(
        &self,
        audio: &[u8],
        candidate: EncodingCandidate,
        language_code: &str,
    ) -> Result<RecognitionResponse, RecognizerError> {
        self.ensure_configured()?;

        let url = format!(
            "{}/v1/speech:longrunningrecognize?key={}",
            self.config.base_url, self.config.api_key
        );
        let body = Self::request_body(audio, candidate, language_code);

        tracing::debug!(
            encoding = %candidate.encoding,
            sample_rate = candidate.sample_rate_hertz,
            "Starting long-running recognition operation"
        );

        let started = self.post_json(&url, &body).await?;
        let operation: WireOperation = serde_json::from_value(started)
            .map_err(|e| RecognizerError::Transport(format!("parse operation: {}", e)))?;

        let name = operation.name.ok_or_else(|| {
            RecognizerError::RemoteFailure("operation started without a name".to_string())
        })?;

        // No local deadline; the remote operation lifecycle bounds the wait.
        loop {
            tokio::time::sleep(self.config.poll_interval).await;

            let poll_url = format!(
                "{}/v1/operations/{}?key={}",
                self.config.base_url, name, self.config.api_key
            );
            let response = self
                .client
                .get(&poll_url)
                .send()
                .await
                .map_err(|e| RecognizerError::Transport(format!("poll: {}", e)))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| RecognizerError::Transport(format!("poll body: {}", e)))?;

            if !status.is_success() {
                return Err(classify_api_error(status.as_u16(), &text));
            }

            let operation: WireOperation = serde_json::from_str(&text)
                .map_err(|e| RecognizerError::Transport(format!("parse poll: {}", e)))?;

            if !operation.done {
                tracing::debug!(operation = %name, "Recognition operation still running");
                continue;
            }

            if let Some(error) = operation.error {
                return Err(RecognizerError::RemoteFailure(format!(
                    "operation failed: code {} {}",
                    error.code,
                    error.message.unwrap_or_default()
                )));
            }

            return Ok(operation.response.unwrap_or_default().into());
        }
    }
}

// Wire shapes for the v1 REST API. Word offsets arrive as duration strings
// ("3.200s") and are converted to seconds at this boundary.

#[derive(Debug, Default, Deserialize)]
struct WireRecognitionResponse {
    #[serde(default)]
    results: Vec<WireResult>,
}

#[derive(Debug, Deserialize)]
struct WireResult {
    #[serde(default)]
    alternatives: Vec<WireAlternative>,
}

#[derive(Debug, Deserialize)]
struct WireAlternative {
    transcript: Option<String>,
    confidence: Option<f64>,
    #[serde(default)]
    words: Vec<WireWordInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireWordInfo {
    word: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireOperation {
    name: Option<String>,
    #[serde(default)]
    done: bool,
    error: Option<WireStatus>,
    response: Option<WireRecognitionResponse>,
}

#[derive(Debug, Deserialize)]
struct WireStatus {
    #[serde(default)]
    code: i32,
    message: Option<String>,
}

fn parse_duration_seconds(value: &str) -> Option<f64> {
    value.trim_end_matches('s').parse::<f64>().ok()
}

impl From<WireRecognitionResponse> for RecognitionResponse {
    fn from(wire: WireRecognitionResponse) -> Self {
        RecognitionResponse {
            results: wire
                .results
                .into_iter()
                .map(|r| RecognitionResult {
                    alternatives: r
                        .alternatives
                        .into_iter()
                        .map(|a| RecognitionAlternative {
                            transcript: a.transcript,
                            confidence: a.confidence,
                            words: a
                                .words
                                .into_iter()
                                .map(|w| WordInfo {
                                    word: w.word,
                                    start_seconds: w
                                        .start_time
                                        .as_deref()
                                        .and_then(parse_duration_seconds),
                                    end_seconds: w
                                        .end_time
                                        .as_deref()
                                        .and_then(parse_duration_seconds),
                                    confidence: w.confidence,
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
