mod audio_format;
mod encoding;
mod speech_metrics;
mod transcription;

pub use audio_format::AudioFormat;
pub use encoding::{encoding_candidates, AudioEncoding, EncodingCandidate};
pub use speech_metrics::{analyze_speech, SpeechMetrics};
pub use transcription::{Transcript, WordTiming};
