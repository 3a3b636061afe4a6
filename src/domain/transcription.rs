use serde::Serialize;

/// A normalized transcription, flattened from the remote API's nested
/// result/alternative structure by the result normalizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    /// Non-empty on success; the normalizer refuses to produce an empty one.
    pub transcript: String,
    /// Overall confidence in [0.0, 1.0].
    pub confidence: f64,
    pub words: Vec<WordTiming>,
    pub language_code: String,
    /// End time of the last word, 0.0 when no word timings were returned.
    pub total_seconds: f64,
}

/// Word-level timing and confidence as reported by the recognition API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordTiming {
    pub word: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub confidence: f64,
}
