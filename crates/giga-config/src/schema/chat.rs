use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Conversation behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Initial sampling temperature, 0.0-2.0.
    pub temperature: f64,
    /// History length that triggers compression.
    pub max_messages: usize,
    /// Directory `/file` and the system prompt are read from.
    pub resources_dir: PathBuf,
    /// System prompt file, relative to `resources_dir`.
    pub system_prompt_file: PathBuf,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            temperature: 0.87,
            max_messages: 10,
            resources_dir: PathBuf::from("resources"),
            system_prompt_file: PathBuf::from("system_prompt.txt"),
        }
    }
}

impl ChatConfig {
    pub fn system_prompt_path(&self) -> PathBuf {
        self.resources_dir.join(&self.system_prompt_file)
    }
}
