use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub templates: TemplateConfig,
    #[serde(default)]
    pub refine: RefineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub data_dir: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_file_watch")]
    pub file_watch: bool,
    #[serde(default = "default_file_watch_debounce_ms")]
    pub file_watch_debounce_ms: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_file_watch() -> bool {
    true
}

fn default_file_watch_debounce_ms() -> u64 {
    300
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: default_log_level(),
            file_watch: default_file_watch(),
            file_watch_debounce_ms: default_file_watch_debounce_ms(),
        }
    }
}

/// Templates used to place exported articles on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default = "default_save_dir")]
    pub save_dir: String,
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_file_name() -> String {
    "{{date}}-{{slug}}".to_string()
}

fn default_save_dir() -> String {
    "articles/{{year}}/{{month}}".to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            save_dir: default_save_dir(),
            extension: default_extension(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineConfig {
    #[serde(default)]
    pub allow_empty_output: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_voice_max_bytes")]
    pub voice_max_bytes: usize,
}

fn default_timeout_secs() -> Option<u64> {
    Some(300)
}

fn default_voice_max_bytes() -> usize {
    64 * 1024
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            allow_empty_output: false,
            timeout_secs: default_timeout_secs(),
            voice_max_bytes: default_voice_max_bytes(),
        }
    }
}

impl RefineConfig {
    /// `timeout_secs = 0` disables the deadline.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
