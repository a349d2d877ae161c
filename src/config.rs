use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration file for doc-check.
///
/// Only the `[example]` table is recognized today. A missing table falls
/// back to the defaults of [`ExampleConfig`].
///
/// # Example
///
/// ```toml
/// [example]
/// fence_markers = ["c++", "cpp"]
/// directive_marker = "#"
/// indent = "    "
/// includes = ["calicodb/db.h", "calicodb/cursor.h"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DocCheckConfig {
    pub example: ExampleConfig,
}

/// Settings that drive example extraction and program assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExampleConfig {
    /// Fence tags that select a code block, compared case-insensitively
    pub fence_markers: Vec<String>,

    /// Lines starting with this marker are rendered outside `main()`
    pub directive_marker: String,

    /// Prefix added to every statement line
    pub indent: String,

    /// Extra headers rendered as `#include "<header>"` after `<cstdio>`
    pub includes: Vec<String>,
}

impl Default for ExampleConfig {
    fn default() -> Self {
        Self {
            fence_markers: vec!["c++".to_string()],
            directive_marker: "#".to_string(),
            indent: "    ".to_string(),
            includes: Vec::new(),
        }
    }
}

impl ExampleConfig {
    /// Validate the configuration for correctness
    pub fn validate(&self) -> Result<()> {
        if self.fence_markers.is_empty() {
            anyhow::bail!("Example configuration must have at least one fence marker");
        }

        for marker in &self.fence_markers {
            if marker.is_empty() || marker.chars().any(|c| c.is_whitespace() || c == '`') {
                anyhow::bail!("Invalid fence marker: {:?}", marker);
            }
        }

        if self.directive_marker.is_empty() {
            anyhow::bail!("Directive marker cannot be empty");
        }

        for header in &self.includes {
            if header.is_empty() || header.contains(['"', '\n', '\r']) {
                anyhow::bail!("Invalid include header: {:?}", header);
            }
        }

        Ok(())
    }

    /// Returns true if `tag` names one of the configured fence markers.
    pub fn matches_fence(&self, tag: &str) -> bool {
        self.fence_markers
            .iter()
            .any(|marker| marker.eq_ignore_ascii_case(tag))
    }
}

impl DocCheckConfig {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: DocCheckConfig = toml::from_str(text).context("Failed to parse configuration")?;
        config
            .example
            .validate()
            .context("Invalid configuration for section 'example'")?;
        Ok(config)
    }

    /// Load configuration from a file, or return the defaults when `path` is `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Invalid configuration file {}", path.display()))?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
