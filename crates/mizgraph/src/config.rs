//! Configuration management for mizgraph.
//!
//! Configuration is optional. When present it is a YAML file that may
//! override any subset of the node palette:
//!
//! ```yaml
//! palette:
//!   theorem: "#ffc107"
//!   lemma: "coral"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::NodeKind;

/// Default name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "mizgraph.yaml";

/// Node colors per kind.
///
/// Placeholder nodes (cited labels with no entry of their own) reuse the
/// theorem color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Palette {
    /// Explicitly labeled theorems
    pub theorem: String,
    /// Auto-numbered theorems
    pub auto_theorem: String,
    /// Definitions
    pub definition: String,
    /// Lemmas
    pub lemma: String,
    /// Imported articles
    pub external: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            theorem: "#ffc107".to_string(),
            auto_theorem: "#b39ddb".to_string(),
            definition: "#17a2b8".to_string(),
            lemma: "#ff7f50".to_string(),
            external: "#9e9e9e".to_string(),
        }
    }
}

impl Palette {
    /// Color for a node of the given kind.
    #[must_use]
    pub fn color_for(&self, kind: NodeKind) -> &str {
        match kind {
            NodeKind::Theorem | NodeKind::Placeholder => &self.theorem,
            NodeKind::AutoTheorem => &self.auto_theorem,
            NodeKind::Definition => &self.definition,
            NodeKind::Lemma => &self.lemma,
            NodeKind::External => &self.external,
        }
    }

    /// Check that every color is a `#rrggbb` hex value or a plain color name.
    ///
    /// Colors end up verbatim in DOT attributes, so quotes and whitespace are
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        for (field, color) in [
            ("theorem", &self.theorem),
            ("auto_theorem", &self.auto_theorem),
            ("definition", &self.definition),
            ("lemma", &self.lemma),
            ("external", &self.external),
        ] {
            if !is_valid_color(color) {
                return Err(Error::Config(format!(
                    "invalid color for {field}: {color:?}"
                )));
            }
        }
        Ok(())
    }
}

fn is_valid_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => !color.is_empty() && color.bytes().all(|b| b.is_ascii_alphanumeric()),
    }
}

/// Configuration file structure for mizgraph.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Node colors
    pub palette: Palette,
}

impl Config {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, `Error::Config` if it
    /// is not valid palette YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` on malformed YAML or an invalid color.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.palette.validate()?;
        Ok(config)
    }
}
