mod recognition_response;
mod speech_recognizer;

pub use recognition_response::{
    RecognitionAlternative, RecognitionResponse, RecognitionResult, WordInfo,
};
pub use speech_recognizer::{RecognizerError, SpeechRecognizer};
