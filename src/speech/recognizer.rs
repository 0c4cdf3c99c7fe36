//! Process-based speech-to-text backend
//!
//! Runs a configured transcription command and reads the transcript from
//! its stdout. The command owns microphone access and model choice; this
//! side only enforces the capture time limit.

use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::speech::{RecognizeError, SpeechToText};

/// How often to check whether the transcriber has finished.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Speech recognizer backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl SpeechToText for CommandRecognizer {
    fn recognize(&self, timeout: Duration) -> Result<String, RecognizeError> {
        if self.program.is_empty() {
            return Err(RecognizeError::Unavailable(
                "no speech recognizer configured".to_string(),
            ));
        }

        tracing::debug!("Running transcriber: {} {:?}", self.program, self.args);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RecognizeError::Unavailable(format!("{}: {e}", self.program)))?;

        let deadline = Instant::now() + timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(RecognizeError::Failed(
                            "speech capture timed out".to_string(),
                        ));
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(e) => return Err(RecognizeError::Failed(e.to_string())),
            }
        };

        if !status.success() {
            let mut detail = String::new();
            if let Some(mut stderr) = child.stderr.take() {
                let _ = stderr.read_to_string(&mut detail);
            }
            let detail = detail.trim();
            return Err(RecognizeError::Unavailable(if detail.is_empty() {
                format!("{} exited with {status}", self.program)
            } else {
                detail.to_string()
            }));
        }

        let mut output = String::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout
                .read_to_string(&mut output)
                .map_err(|e| RecognizeError::Failed(e.to_string()))?;
        }

        let text = output.trim();
        if text.is_empty() {
            Err(RecognizeError::Unrecognized)
        } else {
            Ok(text.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandRecognizer {
        CommandRecognizer::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn reads_transcript_from_stdout() {
        let text = sh("echo hello world").recognize(Duration::from_secs(5)).unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn blank_output_is_unrecognized() {
        let err = sh(":").recognize(Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, RecognizeError::Unrecognized));
    }

    #[test]
    fn missing_program_is_unavailable() {
        let recognizer = CommandRecognizer::new("voxpad-no-such-transcriber", Vec::new());
        let err = recognizer.recognize(Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, RecognizeError::Unavailable(_)));
    }

    #[test]
    fn unconfigured_is_unavailable() {
        let recognizer = CommandRecognizer::new("", Vec::new());
        let err = recognizer.recognize(Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, RecognizeError::Unavailable(_)));
    }

    #[test]
    fn failure_carries_backend_message() {
        let err = sh("echo backend down >&2; exit 1")
            .recognize(Duration::from_secs(5))
            .unwrap_err();
        match err {
            RecognizeError::Unavailable(msg) => assert!(msg.contains("backend down")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn capture_times_out() {
        let err = sh("sleep 10").recognize(Duration::from_millis(200)).unwrap_err();
        match err {
            RecognizeError::Failed(msg) => assert!(msg.contains("timed out")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
