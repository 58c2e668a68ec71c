//! Parser configuration.
//!
//! A [`ParserConfig`] is supplied once per parser instance (by the host
//! application's options UI, CLI flags, or a TOML file) and is immutable for
//! the instance's lifetime. Whether the `key` field is interpreted as a JSON
//! pointer or a per-object field name is derived exactly once, when the
//! parser compiles the config into a key policy.

use crate::error::{PlotWireError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Marker character that makes `key` an absolute pointer expression instead
/// of a field name.
pub const POINTER_MARKER: char = '/';

/// Per-instance parser settings, reused across all messages on a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Use a root-level numeric `"timestamp"` member instead of the
    /// caller-supplied timestamp, when present.
    pub use_message_timestamp: bool,

    /// Disambiguation key: empty (plain numeric array indexing), a bare
    /// field name, or a `/`-prefixed JSON pointer.
    pub key: String,

    /// Also emit the resolved key member as its own series when it is
    /// numeric (in addition to using it for path naming).
    pub emit_key_series: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            use_message_timestamp: false,
            key: String::new(),
            emit_key_series: true,
        }
    }
}

impl ParserConfig {
    /// Whether `key` names an absolute document location rather than a field
    /// searched per object level.
    pub fn interpret_as_pointer(&self) -> bool {
        self.key.starts_with(POINTER_MARKER)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlotWireError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            PlotWireError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load a config, returning defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load parser config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the config as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PlotWireError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
