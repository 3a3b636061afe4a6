mod result_normalizer;
mod transcription_service;

pub use result_normalizer::normalize_response;
pub use transcription_service::{
    TranscriptionError, TranscriptionOutcome, TranscriptionRequest, TranscriptionService,
};
