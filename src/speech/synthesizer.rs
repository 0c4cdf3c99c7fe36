//! Process-based text-to-speech backend
//!
//! Pipes the document text to an espeak-style command's stdin and blocks
//! until the process exits, which is when playback has finished.

use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{ensure, Context, Result};

use crate::speech::TextToSpeech;

/// Speech synthesizer backed by an external command.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl TextToSpeech for CommandSynthesizer {
    fn speak(&self, text: &str) -> Result<()> {
        ensure!(!self.program.is_empty(), "no speech synthesizer configured");

        tracing::debug!("Running synthesizer: {} {:?}", self.program, self.args);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to start {}", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .with_context(|| format!("failed to send text to {}", self.program))?;
        }

        let status = child.wait().context("synthesizer did not finish")?;
        ensure!(status.success(), "{} exited with {status}", self.program);
        Ok(())
    }
}
