use crate::codec::Format;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const CONFIG_KEYS: [&str; 2] = ["lean", "compact"];

/// Export settings, stored in `.flowlink/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkerConfig {
    /// Omit control arrays that have no entries
    #[serde(default = "default_lean")]
    pub lean: bool,

    /// Write exports on a single line
    #[serde(default)]
    pub compact: bool,
}

fn default_lean() -> bool {
    true
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            lean: default_lean(),
            compact: false,
        }
    }
}

impl LinkerConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: LinkerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn format(&self) -> Format {
        Format {
            lean: self.lean,
            compact: self.compact,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "lean" => Some(self.lean.to_string()),
            "compact" => Some(self.compact.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let slot = match key {
            "lean" => &mut self.lean,
            "compact" => &mut self.compact,
            _ => return Err(format!("Unknown config key: {}", key)),
        };
        *slot = parse_flag(value)
            .ok_or_else(|| format!("Invalid value for {}: {} (expected true or false)", key, value))?;
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
