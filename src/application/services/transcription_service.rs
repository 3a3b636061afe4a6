use std::sync::Arc;

use crate::application::ports::{RecognitionResponse, RecognizerError, SpeechRecognizer};
use crate::domain::{
    analyze_speech, encoding_candidates, AudioEncoding, AudioFormat, EncodingCandidate,
    SpeechMetrics, Transcript,
};

use super::result_normalizer::normalize_response;

/// Above this size the synchronous recognition mode is likely to exceed the
/// remote API's ~1 minute limit, so the long-running mode is used instead.
/// A byte heuristic, not a duration measurement.
const LONG_AUDIO_THRESHOLD_BYTES: usize = 3 * 1024 * 1024 / 10;

/// Inline (non-storage-backed) submission cap for the long-running mode.
const MAX_AUDIO_BYTES: usize = 10 * 1024 * 1024;

pub struct TranscriptionRequest {
    pub audio: Vec<u8>,
    pub language_code: String,
    /// Caller-declared encoding hint; unreliable, used only to seed the
    /// candidate search order.
    pub encoding_hint: AudioEncoding,
}

#[derive(Debug, Clone)]
pub struct TranscriptionOutcome {
    pub transcript: Transcript,
    pub metrics: SpeechMetrics,
    pub detected_format: AudioFormat,
    /// The configuration that ultimately produced the transcript.
    pub accepted_candidate: EncodingCandidate,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("speech service not configured: {0}")]
    NotConfigured(String),
    #[error("audio exceeds the {limit_bytes} byte submission cap ({actual_bytes} bytes)")]
    Oversize {
        limit_bytes: usize,
        actual_bytes: usize,
    },
    #[error("speech service rejected the request: {0}. Check credentials and API enablement")]
    Permission(String),
    #[error("all {attempts} encoding configurations were rejected; last error: {last_error}")]
    AllCandidatesFailed { attempts: usize, last_error: String },
    #[error("no speech content found in audio")]
    NoTranscript,
}

/// Orchestrates a transcription request: sniffs the container format,
/// routes between the synchronous and long-running recognition modes by
/// buffer size, walks the encoding-candidate list until the remote API
/// accepts one, then normalizes the response and derives delivery metrics.
pub struct TranscriptionService<R>
where
    R: SpeechRecognizer,
{
    recognizer: Arc<R>,
}

impl<R> TranscriptionService<R>
where
    R: SpeechRecognizer,
{
    pub fn new(recognizer: Arc<R>) -> Self {
        Self { recognizer }
    }

    pub async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionOutcome, TranscriptionError> {
        let size = request.audio.len();
        if size > MAX_AUDIO_BYTES {
            return Err(TranscriptionError::Oversize {
                limit_bytes: MAX_AUDIO_BYTES,
                actual_bytes: size,
            });
        }

        let detected_format = AudioFormat::sniff(&request.audio);
        let candidates = encoding_candidates(request.encoding_hint);

        tracing::debug!(
            bytes = size,
            format = %detected_format,
            encoding_hint = %request.encoding_hint,
            candidates = candidates.len(),
            "Transcription request prepared"
        );

        let (response, accepted_candidate) = if size > LONG_AUDIO_THRESHOLD_BYTES {
            tracing::info!(bytes = size, "Audio likely over a minute, using long-running recognition");
            self.transcribe_long_running(&request, &candidates).await?
        } else {
            tracing::info!(bytes = size, "Using synchronous recognition");
            self.transcribe_with_fallback(&request, &candidates).await?
        };

        let transcript = normalize_response(&response, &request.language_code)
            .ok_or(TranscriptionError::NoTranscript)?;
        let metrics = analyze_speech(&transcript);

        tracing::info!(
            words = metrics.word_count,
            wpm = metrics.speaking_rate_wpm,
            quality = metrics.quality_score,
            encoding = %accepted_candidate.encoding,
            sample_rate = accepted_candidate.sample_rate_hertz,
            "Transcription completed"
        );

        Ok(TranscriptionOutcome {
            transcript,
            metrics,
            detected_format,
            accepted_candidate,
        })
    }

    /// Try each candidate in order against the synchronous API. The first
    /// returned response wins regardless of content; fatal errors abort the
    /// search, anything else advances to the next candidate.
    async fn transcribe_with_fallback(
        &self,
        request: &TranscriptionRequest,
        candidates: &[EncodingCandidate],
    ) -> Result<(RecognitionResponse, EncodingCandidate), TranscriptionError> {
        let mut last_error: Option<RecognizerError> = None;

        for (attempt, candidate) in candidates.iter().enumerate() {
            tracing::debug!(
                attempt = attempt + 1,
                encoding = %candidate.encoding,
                sample_rate = candidate.sample_rate_hertz,
                "Trying recognition candidate"
            );

            match self
                .recognizer
                .recognize(&request.audio, *candidate, &request.language_code)
                .await
            {
                Ok(response) => return Ok((response, *candidate)),
                Err(e) if e.is_fatal() => return Err(Self::map_fatal(e)),
                Err(e) => {
                    tracing::debug!(
                        attempt = attempt + 1,
                        error = %e,
                        "Candidate rejected, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(TranscriptionError::AllCandidatesFailed {
            attempts: candidates.len(),
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no candidates attempted".to_string()),
        })
    }

    /// The long-running mode submits only the first (preferred) candidate.
    /// Each long-running attempt is an operation the remote service has to
    /// run to completion, so the configuration search is not repeated here.
    async fn transcribe_long_running(
        &self,
        request: &TranscriptionRequest,
        candidates: &[EncodingCandidate],
    ) -> Result<(RecognitionResponse, EncodingCandidate), TranscriptionError> {
        let candidate = candidates[0];

        match self
            .recognizer
            .long_running_recognize(&request.audio, candidate, &request.language_code)
            .await
        {
            Ok(response) => Ok((response, candidate)),
            Err(e) if e.is_fatal() => Err(Self::map_fatal(e)),
            Err(e) => Err(TranscriptionError::AllCandidatesFailed {
                attempts: 1,
                last_error: e.to_string(),
            }),
        }
    }

    fn map_fatal(error: RecognizerError) -> TranscriptionError {
        match error {
            RecognizerError::NotConfigured(msg) => TranscriptionError::NotConfigured(msg),
            RecognizerError::PermissionDenied(msg) => TranscriptionError::Permission(msg),
            other => TranscriptionError::AllCandidatesFailed {
                attempts: 1,
                last_error: other.to_string(),
            },
        }
    }
}
