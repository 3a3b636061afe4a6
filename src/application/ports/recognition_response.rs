use serde::Deserialize;

/// Raw recognition payload as returned by the remote speech API.
///
/// Every level may be absent, empty, or partially populated; only the
/// result normalizer is allowed to reach into this structure, so the
/// null-tolerance stays in one place.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognitionResponse {
    #[serde(default)]
    pub results: Vec<RecognitionResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognitionResult {
    #[serde(default)]
    pub alternatives: Vec<RecognitionAlternative>,
}

/// One transcription hypothesis within a recognition result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognitionAlternative {
    pub transcript: Option<String>,
    pub confidence: Option<f64>,
    #[serde(default)]
    pub words: Vec<WordInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WordInfo {
    pub word: Option<String>,
    /// Seconds from the start of the audio; absent when the API omits timing.
    pub start_seconds: Option<f64>,
    pub end_seconds: Option<f64>,
    pub confidence: Option<f64>,
}
