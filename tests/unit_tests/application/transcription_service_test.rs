use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use parlance::application::ports::{
    RecognitionAlternative, RecognitionResponse, RecognitionResult, RecognizerError,
    SpeechRecognizer, WordInfo,
};
use parlance::application::services::{
    TranscriptionError, TranscriptionRequest, TranscriptionService,
};
use parlance::domain::{AudioEncoding, EncodingCandidate};

/// Scripted recognizer: fails the first `failures` synchronous calls with
/// the given error, then returns the canned response. Records every
/// candidate it was asked to try.
struct ScriptedRecognizer {
    failures: usize,
    error: RecognizerError,
    response: RecognitionResponse,
    sync_calls: AtomicUsize,
    long_calls: AtomicUsize,
    seen_candidates: Mutex<Vec<EncodingCandidate>>,
}

impl ScriptedRecognizer {
    fn new(failures: usize, error: RecognizerError, response: RecognitionResponse) -> Self {
        Self {
            failures,
            error,
            response,
            sync_calls: AtomicUsize::new(0),
            long_calls: AtomicUsize::new(0),
            seen_candidates: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn recognize(
        &self,
        _audio: &[u8],
        candidate: EncodingCandidate,
        _language_code: &str,
    ) -> Result<RecognitionResponse, RecognizerError> {
        let call = self.sync_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_candidates.lock().unwrap().push(candidate);
        if call < self.failures {
            Err(self.error.clone())
        } else {
            Ok(self.response.clone())
        }
    }

    async fn long_running_recognize(
        &self,
        _audio: &[u8],
        candidate: EncodingCandidate,
        _language_code: &str,
    ) -> Result<RecognitionResponse, RecognizerError> {
        self.long_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_candidates.lock().unwrap().push(candidate);
        Ok(self.response.clone())
    }
}

fn response_with_transcript(text: &str) -> RecognitionResponse {
    RecognitionResponse {
        results: vec![RecognitionResult {
            alternatives: vec![RecognitionAlternative {
                transcript: Some(text.to_string()),
                confidence: Some(0.92),
                words: vec![WordInfo {
                    word: Some(text.to_string()),
                    start_seconds: Some(0.0),
                    end_seconds: Some(1.0),
                    confidence: Some(0.92),
                }],
            }],
        }],
    }
}

fn request(bytes: usize) -> TranscriptionRequest {
    TranscriptionRequest {
        audio: vec![0u8; bytes],
        language_code: "en-US".to_string(),
        encoding_hint: AudioEncoding::Linear16,
    }
}

#[tokio::test]
async fn given_three_retryable_failures_when_transcribing_then_fourth_candidate_wins() {
    let recognizer = Arc::new(ScriptedRecognizer::new(
        3,
        RecognizerError::InvalidConfiguration("sample rate mismatch".to_string()),
        response_with_transcript("eventually"),
    ));
    let service = TranscriptionService::new(Arc::clone(&recognizer));

    let outcome = service.transcribe(request(1024)).await.unwrap();

    assert_eq!(recognizer.sync_calls.load(Ordering::SeqCst), 4);
    assert_eq!(outcome.transcript.transcript, "eventually");
    // Fourth candidate is the first fixed fallback: MP3 at 16 kHz.
    assert_eq!(
        outcome.accepted_candidate,
        EncodingCandidate::new(AudioEncoding::Mp3, 16_000)
    );
}

#[tokio::test]
async fn given_permission_denied_when_transcribing_then_aborts_after_one_call() {
    let recognizer = Arc::new(ScriptedRecognizer::new(
        10,
        RecognizerError::PermissionDenied("PERMISSION_DENIED".to_string()),
        response_with_transcript("unreachable"),
    ));
    let service = TranscriptionService::new(Arc::clone(&recognizer));

    let result = service.transcribe(request(1024)).await;

    assert_eq!(recognizer.sync_calls.load(Ordering::SeqCst), 1);
    assert!(matches!(result, Err(TranscriptionError::Permission(_))));
}

#[tokio::test]
async fn given_every_candidate_rejected_when_transcribing_then_reports_last_error() {
    let recognizer = Arc::new(ScriptedRecognizer::new(
        usize::MAX,
        RecognizerError::InvalidConfiguration("bad encoding".to_string()),
        response_with_transcript("unreachable"),
    ));
    let service = TranscriptionService::new(Arc::clone(&recognizer));

    let result = service.transcribe(request(1024)).await;

    assert_eq!(recognizer.sync_calls.load(Ordering::SeqCst), 10);
    match result {
        Err(TranscriptionError::AllCandidatesFailed {
            attempts,
            last_error,
        }) => {
            assert_eq!(attempts, 10);
            assert!(last_error.contains("bad encoding"));
        }
        other => panic!("expected AllCandidatesFailed, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn given_small_buffer_when_transcribing_then_synchronous_path_is_used() {
    let recognizer = Arc::new(ScriptedRecognizer::new(
        0,
        RecognizerError::RemoteFailure("unused".to_string()),
        response_with_transcript("short"),
    ));
    let service = TranscriptionService::new(Arc::clone(&recognizer));

    service.transcribe(request(256 * 1024)).await.unwrap();

    assert_eq!(recognizer.sync_calls.load(Ordering::SeqCst), 1);
    assert_eq!(recognizer.long_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_large_buffer_when_transcribing_then_long_running_path_is_used() {
    let recognizer = Arc::new(ScriptedRecognizer::new(
        0,
        RecognizerError::RemoteFailure("unused".to_string()),
        response_with_transcript("long"),
    ));
    let service = TranscriptionService::new(Arc::clone(&recognizer));

    service.transcribe(request(512 * 1024)).await.unwrap();

    assert_eq!(recognizer.sync_calls.load(Ordering::SeqCst), 0);
    assert_eq!(recognizer.long_calls.load(Ordering::SeqCst), 1);

    // The long-running path submits only the preferred candidate.
    let seen = recognizer.seen_candidates.lock().unwrap();
    assert_eq!(
        *seen,
        vec![EncodingCandidate::new(AudioEncoding::Linear16, 16_000)]
    );
}

#[tokio::test]
async fn given_buffer_over_cap_when_transcribing_then_fails_before_any_remote_call() {
    let recognizer = Arc::new(ScriptedRecognizer::new(
        0,
        RecognizerError::RemoteFailure("unused".to_string()),
        response_with_transcript("unreachable"),
    ));
    let service = TranscriptionService::new(Arc::clone(&recognizer));

    let result = service.transcribe(request(11 * 1024 * 1024)).await;

    assert!(matches!(result, Err(TranscriptionError::Oversize { .. })));
    assert_eq!(recognizer.sync_calls.load(Ordering::SeqCst), 0);
    assert_eq!(recognizer.long_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_structurally_empty_response_when_transcribing_then_no_transcript_error() {
    let recognizer = Arc::new(ScriptedRecognizer::new(
        0,
        RecognizerError::RemoteFailure("unused".to_string()),
        RecognitionResponse { results: vec![] },
    ));
    let service = TranscriptionService::new(recognizer);

    let result = service.transcribe(request(1024)).await;

    assert!(matches!(result, Err(TranscriptionError::NoTranscript)));
}

#[tokio::test]
async fn given_not_configured_recognizer_when_transcribing_then_surfaces_503_class_error() {
    let recognizer = Arc::new(ScriptedRecognizer::new(
        usize::MAX,
        RecognizerError::NotConfigured("SPEECH_API_KEY is not set".to_string()),
        response_with_transcript("unreachable"),
    ));
    let service = TranscriptionService::new(Arc::clone(&recognizer));

    let result = service.transcribe(request(1024)).await;

    assert_eq!(recognizer.sync_calls.load(Ordering::SeqCst), 1);
    assert!(matches!(result, Err(TranscriptionError::NotConfigured(_))));
}
