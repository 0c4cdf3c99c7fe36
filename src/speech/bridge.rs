//! Bridge between the editor and the speech services
//!
//! Two independent one-shot operations, each blocking the dispatch loop
//! until the external service finishes. There is no retry: a failed
//! attempt ends there and the next dispatch starts fresh.

use std::time::Duration;

use crate::core::buffer::TextBuffer;
use crate::core::config::SpeechConfig;
use crate::core::error::EditorError;
use crate::speech::{
    CommandRecognizer, CommandSynthesizer, RecognizeError, SpeechToText, TextToSpeech,
};

/// Handle to the speech-to-text and text-to-speech services.
pub struct SpeechBridge {
    recognizer: Box<dyn SpeechToText>,
    synthesizer: Box<dyn TextToSpeech>,
    capture_timeout: Duration,
}

impl SpeechBridge {
    pub fn new(
        recognizer: Box<dyn SpeechToText>,
        synthesizer: Box<dyn TextToSpeech>,
        capture_timeout: Duration,
    ) -> Self {
        Self {
            recognizer,
            synthesizer,
            capture_timeout,
        }
    }

    /// Build the bridge with the configured command backends.
    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(
            Box::new(CommandRecognizer::new(
                config.recognizer_command.clone(),
                config.recognizer_args.clone(),
            )),
            Box::new(CommandSynthesizer::new(
                config.synthesizer_command.clone(),
                config.synthesizer_args.clone(),
            )),
            Duration::from_secs(config.capture_timeout_secs),
        )
    }

    /// Capture one utterance and append it to the buffer.
    ///
    /// Recognized text gets a single trailing space so consecutive
    /// dictations stay word-separated.
    pub fn dictate(&self, buffer: &mut TextBuffer) -> Result<(), EditorError> {
        tracing::info!(
            "Dictation capture started ({}s limit)",
            self.capture_timeout.as_secs()
        );
        let text = self
            .recognizer
            .recognize(self.capture_timeout)
            .map_err(|e| match e {
                RecognizeError::Unrecognized => EditorError::UnrecognizedSpeech,
                RecognizeError::Unavailable(msg) => EditorError::ServiceUnavailable(msg),
                RecognizeError::Failed(msg) => EditorError::Speech(msg),
            })?;
        tracing::info!("Dictation recognized {} characters", text.chars().count());
        buffer.append(&format!("{text} "));
        Ok(())
    }

    /// Speak `content`, blocking until playback completes.
    pub fn speak(&self, content: &str) -> Result<(), EditorError> {
        if content.trim().is_empty() {
            return Err(EditorError::EmptyDocument);
        }
        self.synthesizer
            .speak(content)
            .map_err(|e| EditorError::Speech(e.to_string()))
    }
}
