//! Speech services: dictation (speech-to-text) and playback (text-to-speech)
//!
//! The actual audio work lives behind two narrow traits; the editor only
//! sees recognized text going in and playback completing.

mod bridge;
mod recognizer;
mod synthesizer;

use std::time::Duration;

use thiserror::Error;

pub use bridge::SpeechBridge;
pub use recognizer::CommandRecognizer;
pub use synthesizer::CommandSynthesizer;

/// One-shot bounded-duration speech capture.
pub trait SpeechToText {
    /// Capture audio for at most `timeout` and return the recognized text.
    fn recognize(&self, timeout: Duration) -> Result<String, RecognizeError>;
}

/// One-shot blocking playback.
pub trait TextToSpeech {
    /// Speak `text`, returning once playback has finished.
    fn speak(&self, text: &str) -> anyhow::Result<()>;
}

/// Failure reasons a speech-to-text backend can report.
#[derive(Debug, Error)]
pub enum RecognizeError {
    /// Audio was captured but no words could be made out.
    #[error("could not understand the audio")]
    Unrecognized,

    /// The backend could not be reached or refused the request.
    #[error("{0}")]
    Unavailable(String),

    /// Anything else, carrying the underlying message.
    #[error("{0}")]
    Failed(String),
}
