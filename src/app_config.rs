use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Strip a single run of leading full-width spaces from each line;
    /// indentation is expressed by styling in the output, not literal chars
    #[serde(default = "default_true")]
    pub strip_leading_indent: bool,

    /// Annotation handling
    #[serde(default)]
    pub annotation: AnnotationConfig,

    /// Output document settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration for furigana annotation handling
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnnotationConfig {
    /// Fail loudly when a reading queue runs dry instead of inserting a
    /// placeholder. Only meaningful when the prior output is asserted to
    /// fully cover the source.
    #[serde(default)]
    pub strict: bool,

    /// Re-insert media-reference paragraphs found at the head of the prior
    /// output ahead of the freshly converted body. Compatibility shim for
    /// corpora that need bit-exact continuity with earlier conversions.
    #[serde(default)]
    pub preserve_prior_media: bool,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            strict: false,
            preserve_prior_media: false,
        }
    }
}

/// Configuration for the generated document
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Output file extension
    #[serde(default = "default_output_extension")]
    pub extension: String,

    /// Emit a YAML frontmatter block with scraped title/author fields
    #[serde(default = "default_true")]
    pub emit_frontmatter: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            extension: default_output_extension(),
            emit_frontmatter: true,
        }
    }
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

fn default_true() -> bool {
    true
}

fn default_output_extension() -> String {
    "mdx".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.output.extension.is_empty() {
            return Err(anyhow!("Output extension must not be empty"));
        }
        if self.output.extension.starts_with('.') {
            return Err(anyhow!(
                "Output extension must not start with a dot: {}",
                self.output.extension
            ));
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            strip_leading_indent: true,
            annotation: AnnotationConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
