use serde::Serialize;

use super::transcription::Transcript;

/// A pause shorter than this is treated as natural articulation, not a gap.
const PAUSE_THRESHOLD_SECONDS: f64 = 0.1;

/// Delivery metrics derived from a normalized transcript. Recomputed on
/// every call, never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechMetrics {
    pub word_count: usize,
    pub speaking_rate_wpm: f64,
    pub pause_count: usize,
    pub average_pause_seconds: f64,
    pub longest_pause_seconds: f64,
    pub confidence_percent: f64,
    /// Composite 0-100 score from confidence, speaking-rate band, and pauses.
    pub quality_score: f64,
}

/// Derive delivery metrics from a transcript. Pure; degenerate inputs
/// (no words, zero duration) yield zeroed but valid metrics.
pub fn analyze_speech(transcript: &Transcript) -> SpeechMetrics {
    let word_count = transcript.words.len();

    let speaking_rate_wpm = if transcript.total_seconds > 0.0 {
        (word_count as f64 / transcript.total_seconds) * 60.0
    } else {
        0.0
    };

    let mut pauses = Vec::new();
    for pair in transcript.words.windows(2) {
        let gap = pair[1].start_seconds - pair[0].end_seconds;
        if gap > PAUSE_THRESHOLD_SECONDS {
            pauses.push(gap);
        }
    }

    let pause_count = pauses.len();
    let average_pause_seconds = if pauses.is_empty() {
        0.0
    } else {
        pauses.iter().sum::<f64>() / pauses.len() as f64
    };
    let longest_pause_seconds = pauses.iter().cloned().fold(0.0, f64::max);

    let confidence_percent = transcript.confidence * 100.0;

    let mut quality_score = confidence_percent;
    if (150.0..=200.0).contains(&speaking_rate_wpm) {
        quality_score += 10.0;
    } else if (120.0..=250.0).contains(&speaking_rate_wpm) {
        quality_score += 5.0;
    }
    if average_pause_seconds > 1.0 {
        quality_score -= 10.0;
    }
    let quality_score = quality_score.clamp(0.0, 100.0);

    SpeechMetrics {
        word_count,
        speaking_rate_wpm,
        pause_count,
        average_pause_seconds,
        longest_pause_seconds,
        confidence_percent,
        quality_score,
    }
}
