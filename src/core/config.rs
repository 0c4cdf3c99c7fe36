//! Application configuration management

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Editor settings
    pub editor: EditorConfig,
    /// Speech backend settings
    pub speech: SpeechConfig,
}

/// Editor-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font size in pixels
    pub font_size: f32,
    /// Word wrap
    pub word_wrap: bool,
}

/// Speech backend settings
///
/// Both services run as external commands: the recognizer prints the
/// transcript on stdout, the synthesizer reads the text on stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Transcription command; empty means no recognizer is configured.
    pub recognizer_command: String,
    pub recognizer_args: Vec<String>,
    /// Playback command.
    pub synthesizer_command: String,
    pub synthesizer_args: Vec<String>,
    /// Dictation capture limit in seconds.
    pub capture_timeout_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            word_wrap: true,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            recognizer_command: String::new(),
            recognizer_args: Vec::new(),
            synthesizer_command: "espeak-ng".to_string(),
            synthesizer_args: vec!["--stdin".to_string()],
            capture_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "voxpad", "Voxpad")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}
