use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::name_dictionary::NameDictionary;
use crate::subtitle_processor::Dialect;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Dialect used when none is given on the command line
    #[serde(default)]
    pub dialect: Dialect,

    /// Reassign indices sequentially after loading
    #[serde(default)]
    pub renumber: bool,

    /// Normalize spacing inside text lines
    #[serde(default = "default_true")]
    pub reformat: bool,

    /// Inline name translations
    #[serde(default)]
    pub names: NameDictionary,

    /// Additional name dictionary file in `source=target` line format
    #[serde(default)]
    pub name_dictionary_file: Option<PathBuf>,

    /// Extension of written files, without the leading dot
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Inserted between file stem and extension of written files
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_output_extension() -> String {
    "srt".to_string()
}

fn default_output_suffix() -> String {
    "clean".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.output_extension.is_empty() {
            return Err(anyhow!("Output extension must not be empty"));
        }
        if self.output_extension.starts_with('.') {
            return Err(anyhow!(
                "Output extension must not start with a dot: {}",
                self.output_extension
            ));
        }

        if let Some(path) = &self.name_dictionary_file {
            if !path.is_file() {
                return Err(anyhow!("Name dictionary file does not exist: {:?}", path));
            }
        }

        Ok(())
    }

    /// Load the configuration at `path`, writing a default one if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Inline names merged with the dictionary file, file entries winning
    pub fn resolve_names(&self) -> Result<NameDictionary> {
        let mut names = self.names.clone();

        if let Some(path) = &self.name_dictionary_file {
            let text = crate::file_utils::FileManager::read_to_string(path)?;
            let from_file = NameDictionary::parse(&text)
                .with_context(|| format!("Failed to parse name dictionary: {}", path.display()))?;
            names.extend(&from_file);
        }

        Ok(names)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            dialect: Dialect::default(),
            renumber: false,
            reformat: true,
            names: NameDictionary::default(),
            name_dictionary_file: None,
            output_extension: default_output_extension(),
            output_suffix: default_output_suffix(),
            log_level: LogLevel::default(),
        }
    }
}
