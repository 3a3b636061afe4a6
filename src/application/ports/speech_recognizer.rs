use async_trait::async_trait;

use crate::domain::EncodingCandidate;

use super::RecognitionResponse;

/// Port to the remote speech-to-text service.
///
/// `recognize` is the blocking short-audio mode (hard-limited to roughly one
/// minute by the remote API); `long_running_recognize` starts an operation
/// and awaits its completion. Both resolve to the same response shape.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(
        &self,
        audio: &[u8],
        candidate: EncodingCandidate,
        language_code: &str,
    ) -> Result<RecognitionResponse, RecognizerError>;

    async fn long_running_recognize(
        &self,
        audio: &[u8],
        candidate: EncodingCandidate,
        language_code: &str,
    ) -> Result<RecognitionResponse, RecognizerError>;
}

/// Closed set of recognizer failures. The adapter translates remote error
/// codes into these variants so the candidate-fallback loop never has to
/// string-match raw API messages.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecognizerError {
    /// Credentials missing; surfaced before any network call is made.
    #[error("speech service not configured: {0}")]
    NotConfigured(String),
    /// Unauthorized or API not enabled for the project. Not worth retrying
    /// with a different encoding.
    #[error("permission denied by speech service: {0}")]
    PermissionDenied(String),
    /// The API rejected this encoding/sample-rate configuration.
    #[error("configuration rejected: {0}")]
    InvalidConfiguration(String),
    /// Transport-level failure (connect, timeout, malformed body).
    #[error("transport: {0}")]
    Transport(String),
    /// Any other remote-side failure.
    #[error("remote failure: {0}")]
    RemoteFailure(String),
}

impl RecognizerError {
    /// Fatal errors abort the candidate loop; everything else advances to
    /// the next (encoding, sample rate) guess.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RecognizerError::NotConfigured(_) | RecognizerError::PermissionDenied(_)
        )
    }
}
