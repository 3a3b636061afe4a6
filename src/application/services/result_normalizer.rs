use crate::application::ports::RecognitionResponse;
use crate::domain::{Transcript, WordTiming};

/// Flatten a raw recognition response into a [`Transcript`].
///
/// Scans results in ascending index order, then alternatives in ascending
/// index order, and picks the first alternative whose transcript is
/// non-empty after trimming. Returns `None` when nothing usable exists
/// anywhere in the response, which signals silence, an unsupported format,
/// or audio too short to yield speech.
pub fn normalize_response(response: &RecognitionResponse, language_code: &str) -> Option<Transcript> {
    let alternative = response
        .results
        .iter()
        .flat_map(|result| result.alternatives.iter())
        .find(|alt| {
            alt.transcript
                .as_deref()
                .is_some_and(|t| !t.trim().is_empty())
        })?;

    let words: Vec<WordTiming> = alternative
        .words
        .iter()
        .map(|w| WordTiming {
            word: w.word.clone().unwrap_or_default(),
            start_seconds: w.start_seconds.unwrap_or(0.0),
            end_seconds: w.end_seconds.unwrap_or(0.0),
            confidence: w.confidence.unwrap_or(0.0),
        })
        .collect();

    let total_seconds = words.last().map(|w| w.end_seconds).unwrap_or(0.0);

    Some(Transcript {
        transcript: alternative
            .transcript
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string(),
        confidence: alternative.confidence.unwrap_or(0.0),
        words,
        language_code: language_code.to_string(),
        total_seconds,
    })
}
