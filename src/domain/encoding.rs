use serde::{Deserialize, Serialize};

/// Audio encodings understood by the remote recognition API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioEncoding {
    #[serde(rename = "LINEAR16")]
    Linear16,
    #[serde(rename = "FLAC")]
    Flac,
    #[serde(rename = "MP3")]
    Mp3,
    #[serde(rename = "OGG_OPUS")]
    OggOpus,
    #[serde(rename = "WEBM_OPUS")]
    WebmOpus,
    #[serde(rename = "ENCODING_UNSPECIFIED")]
    Unspecified,
}

impl AudioEncoding {
    /// Parse a caller-supplied encoding hint. Unrecognized hints fall back
    /// to `Unspecified`, which lets the remote API attempt detection.
    pub fn from_hint(hint: &str) -> Self {
        match hint.trim().to_uppercase().as_str() {
            "LINEAR16" | "WAV" | "PCM" => Self::Linear16,
            "FLAC" => Self::Flac,
            "MP3" | "MPEG" => Self::Mp3,
            "OGG_OPUS" | "OGG" | "OPUS" => Self::OggOpus,
            "WEBM_OPUS" | "WEBM" => Self::WebmOpus,
            _ => Self::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear16 => "LINEAR16",
            Self::Flac => "FLAC",
            Self::Mp3 => "MP3",
            Self::OggOpus => "OGG_OPUS",
            Self::WebmOpus => "WEBM_OPUS",
            Self::Unspecified => "ENCODING_UNSPECIFIED",
        }
    }
}

impl std::fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One (encoding, sample rate) configuration to attempt against the
/// recognition API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodingCandidate {
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
}

impl EncodingCandidate {
    pub fn new(encoding: AudioEncoding, sample_rate_hertz: u32) -> Self {
        Self {
            encoding,
            sample_rate_hertz,
        }
    }
}

/// Ordered configurations to try against the recognition API: the caller's
/// declared encoding at the three common sample rates first, then broadly
/// compatible fallbacks. The remote API rejects on encoding or sample-rate
/// mismatch instead of auto-detecting, and the client-declared encoding is
/// frequently wrong, so the search order matters more than any single guess.
pub fn encoding_candidates(user_encoding: AudioEncoding) -> Vec<EncodingCandidate> {
    let mut candidates = vec![
        EncodingCandidate::new(user_encoding, 16_000),
        EncodingCandidate::new(user_encoding, 44_100),
        EncodingCandidate::new(user_encoding, 48_000),
    ];
    candidates.extend([
        EncodingCandidate::new(AudioEncoding::Mp3, 16_000),
        EncodingCandidate::new(AudioEncoding::Mp3, 44_100),
        EncodingCandidate::new(AudioEncoding::Mp3, 48_000),
        EncodingCandidate::new(AudioEncoding::Linear16, 16_000),
        EncodingCandidate::new(AudioEncoding::Linear16, 44_100),
        EncodingCandidate::new(AudioEncoding::Flac, 16_000),
        EncodingCandidate::new(AudioEncoding::Flac, 44_100),
    ]);
    candidates
}
