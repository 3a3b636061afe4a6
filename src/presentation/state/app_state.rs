use std::sync::Arc;

use crate::application::ports::SpeechRecognizer;
use crate::application::services::TranscriptionService;
use crate::presentation::config::Settings;

/// Shared request state. The recognizer handle is constructed once at
/// startup and injected here; handlers never build their own clients.
pub struct AppState<R>
where
    R: SpeechRecognizer,
{
    pub transcription_service: Arc<TranscriptionService<R>>,
    pub settings: Settings,
}

impl<R> Clone for AppState<R>
where
    R: SpeechRecognizer,
{
    fn clone(&self) -> Self {
        Self {
            transcription_service: Arc::clone(&self.transcription_service),
            settings: self.settings.clone(),
        }
    }
}
