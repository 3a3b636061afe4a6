use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::SpeechRecognizer;
use crate::application::services::{TranscriptionError, TranscriptionRequest};
use crate::domain::{AudioEncoding, SpeechMetrics, Transcript};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub transcript: Transcript,
    pub metrics: SpeechMetrics,
    pub detected_format: String,
    pub encoding: String,
    pub sample_rate_hertz: u32,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: String) -> axum::response::Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<R>(
    State(state): State<AppState<R>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    R: SpeechRecognizer + 'static,
{
    let mut audio: Option<Vec<u8>> = None;
    let mut filename = String::from("unknown");
    let mut language_code = String::from("en-US");
    let mut encoding_hint: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                );
            }
        };

        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "audio" | "file" => {
                filename = field.file_name().unwrap_or("unknown").to_string();
                match field.bytes().await {
                    Ok(data) => audio = Some(data.to_vec()),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read audio bytes");
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("Failed to read audio file: {}", e),
                        );
                    }
                }
            }
            "language" => {
                if let Ok(value) = field.text().await {
                    if !value.trim().is_empty() {
                        language_code = value.trim().to_string();
                    }
                }
            }
            "encoding" => {
                if let Ok(value) = field.text().await {
                    encoding_hint = Some(value);
                }
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unexpected multipart field");
            }
        }
    }

    let audio = match audio {
        Some(a) => a,
        None => {
            tracing::warn!("Transcription request with no audio file");
            return error_response(StatusCode::BAD_REQUEST, "No audio file uploaded".to_string());
        }
    };

    if audio.is_empty() {
        tracing::warn!(filename = %filename, "Transcription request with empty audio file");
        return error_response(StatusCode::BAD_REQUEST, "Audio file is empty".to_string());
    }

    let max_bytes = state.settings.upload.max_file_size_mb * 1024 * 1024;
    if audio.len() > max_bytes {
        tracing::warn!(bytes = audio.len(), "Audio file over upload cap");
        return error_response(
            StatusCode::BAD_REQUEST,
            format!(
                "Audio file is too large ({} bytes, limit {} MB)",
                audio.len(),
                state.settings.upload.max_file_size_mb
            ),
        );
    }

    let encoding = encoding_hint
        .as_deref()
        .map(AudioEncoding::from_hint)
        .unwrap_or(AudioEncoding::Unspecified);

    tracing::debug!(
        filename = %filename,
        bytes = audio.len(),
        language = %language_code,
        encoding_hint = %encoding,
        "Processing transcription upload"
    );

    let request = TranscriptionRequest {
        audio,
        language_code,
        encoding_hint: encoding,
    };

    match state.transcription_service.transcribe(request).await {
        Ok(outcome) => {
            tracing::info!(
                filename = %filename,
                words = outcome.metrics.word_count,
                "Transcription successful"
            );
            (
                StatusCode::OK,
                Json(TranscribeResponse {
                    detected_format: outcome.detected_format.to_string(),
                    encoding: outcome.accepted_candidate.encoding.to_string(),
                    sample_rate_hertz: outcome.accepted_candidate.sample_rate_hertz,
                    transcript: outcome.transcript,
                    metrics: outcome.metrics,
                }),
            )
                .into_response()
        }
        Err(e) => {
            let status = match &e {
                TranscriptionError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
                TranscriptionError::Oversize { .. } | TranscriptionError::NoTranscript => {
                    StatusCode::BAD_REQUEST
                }
                TranscriptionError::Permission(_)
                | TranscriptionError::AllCandidatesFailed { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            tracing::error!(error = %e, status = %status, "Transcription failed");
            error_response(status, e.to_string())
        }
    }
}
