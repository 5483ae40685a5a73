// In: src/config.rs

//! The single source of truth for all huffpack coder configuration.
//!
//! `CoderConfig` is created once at the application boundary (e.g., from a
//! JSON document or one of the convenience constructors) and then passed by
//! reference into the encoder. The decoder needs no configuration: every
//! container carries its own alphabet and code table.

use serde::{Deserialize, Serialize};

use crate::error::HuffmanError;
use crate::types::Alphabet;

/// The unified configuration for an encode call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CoderConfig {
    /// The symbol alphabet. Every input symbol must be strictly below its size.
    #[serde(default)]
    pub alphabet: Alphabet,

    /// Number of shards used for frequency counting. `1` counts on the
    /// calling thread; larger values split the input across scoped threads
    /// and merge the partial tables. Tree construction and bit packing are
    /// always single-threaded.
    #[serde(default = "default_frequency_shards")]
    pub frequency_shards: usize,

    /// If true, each encode emits a one-line `log::info!` summary
    /// (symbols, distinct symbols, payload bits, bits per symbol).
    #[serde(default)]
    pub enable_stats_logging: bool,
}

impl Default for CoderConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::default(),
            frequency_shards: default_frequency_shards(),
            enable_stats_logging: false,
        }
    }
}

impl CoderConfig {
    /// Configuration for byte-valued text symbols.
    pub fn bytes() -> Self {
        Self::with_alphabet(Alphabet::Bytes)
    }

    /// Configuration for packed 24-bit RGB colour symbols.
    pub fn rgb24() -> Self {
        Self::with_alphabet(Alphabet::Rgb24)
    }

    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            ..Self::default()
        }
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, HuffmanError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, HuffmanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects configurations the encoder cannot honour.
    pub fn validate(&self) -> Result<(), HuffmanError> {
        if self.alphabet.size() == 0 {
            return Err(HuffmanError::InvalidConfig(
                "Alphabet size must be at least 1".to_string(),
            ));
        }
        if self.frequency_shards == 0 {
            return Err(HuffmanError::InvalidConfig(
                "frequency_shards must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Provides a sensible default for `frequency_shards` for serde.
fn default_frequency_shards() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = CoderConfig::from_json("{}").unwrap();
        assert_eq!(config, CoderConfig::default());
        assert_eq!(config.alphabet, Alphabet::Bytes);
        assert_eq!(config.frequency_shards, 1);
        assert!(!config.enable_stats_logging);
    }

    #[test]
    fn test_full_document_parses() {
        let json = r#"{
            "alphabet": {"kind": "custom", "size": 4096},
            "frequency_shards": 4,
            "enable_stats_logging": true
        }"#;
        let config = CoderConfig::from_json(json).unwrap();
        assert_eq!(config.alphabet, Alphabet::Custom(4096));
        assert_eq!(config.frequency_shards, 4);
        assert!(config.enable_stats_logging);

        let reparsed = CoderConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_invalid_documents_are_rejected() {
        assert!(matches!(
            CoderConfig::from_json(r#"{"frequency_shards": 0}"#),
            Err(HuffmanError::InvalidConfig(_))
        ));
        assert!(matches!(
            CoderConfig::from_json(r#"{"alphabet": {"kind": "custom", "size": 0}}"#),
            Err(HuffmanError::InvalidConfig(_))
        ));
        assert!(matches!(
            CoderConfig::from_json("not json"),
            Err(HuffmanError::SerdeJson(_))
        ));
    }
}
