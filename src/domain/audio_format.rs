/// Audio container format guessed from the first bytes of an upload.
///
/// Client-reported MIME types are unreliable, so the service sniffs the
/// magic bytes itself. `Unknown` is a valid outcome and never an error;
/// the caller falls back to a default encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Mp3,
    M4a,
    Ogg,
    Unknown,
}

/// (format, matching uppercase-hex prefixes of the first 4 bytes).
/// Table order is match order: the first entry whose prefix matches wins.
const SIGNATURES: &[(AudioFormat, &[&str])] = &[
    (AudioFormat::Wav, &["52494646"]), // RIFF
    (AudioFormat::M4a, &["66747970"]), // ftyp
    (AudioFormat::Ogg, &["4F676753"]), // OggS
    (
        AudioFormat::Mp3,
        &["49443300", "49443304", "49443303", "FFFB", "FFFA", "FFFE"],
    ),
];

impl AudioFormat {
    /// Classify a buffer by its leading byte signature.
    pub fn sniff(data: &[u8]) -> Self {
        let header: String = data
            .iter()
            .take(4)
            .map(|b| format!("{:02X}", b))
            .collect();

        for (format, prefixes) in SIGNATURES {
            if prefixes.iter().any(|p| header.starts_with(p)) {
                return *format;
            }
        }

        AudioFormat::Unknown
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
