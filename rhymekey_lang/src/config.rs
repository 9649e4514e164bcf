// Data-driven passphrase defaults.
//
// `PhraseConfig` holds the tunables a front end would otherwise hard-code:
// the default part layout and rhyme grouping, the entropy floor, and how
// many times to retry a composition that failed. Loaded from JSON; every
// field has a default, so a config file only needs the fields it changes.

use crate::composer::{DEFAULT_MINIMUM_ENTROPY_BITS, PhraseRequest};
use crate::error::LoadError;
use crate::types::{PartSpec, Role};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseConfig {
    /// Passphrases at or below this many bits are rejected.
    pub minimum_entropy_bits: f64,
    /// Part layout used when the caller does not give one.
    pub default_parts: Vec<PartSpec>,
    /// Rhyme grouping for `default_parts`. `None` means no rhymes.
    pub default_groups: Option<Vec<u32>>,
    /// Attempts per passphrase before giving up on NoAssignment or
    /// BelowThreshold. Each attempt draws fresh randomness.
    pub max_attempts: u32,
}

impl Default for PhraseConfig {
    fn default() -> Self {
        PhraseConfig {
            minimum_entropy_bits: DEFAULT_MINIMUM_ENTROPY_BITS,
            default_parts: vec![
                PartSpec::Plain(Role::Adjective),
                PartSpec::Plain(Role::Noun),
                PartSpec::PAST_TENSE_VERB,
                PartSpec::Plain(Role::Noun),
            ],
            default_groups: Some(vec![1, 2, 3, 2]),
            max_attempts: 10,
        }
    }
}

impl PhraseConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| LoadError::Json {
            name: path.display().to_string(),
            source,
        })
    }

    /// The request described by the defaults in this config.
    pub fn request(&self) -> PhraseRequest {
        let request = PhraseRequest::new(self.default_parts.iter().copied())
            .with_minimum_entropy(self.minimum_entropy_bits);
        match &self.default_groups {
            Some(groups) => request.with_groups(groups.iter().copied()),
            None => request,
        }
    }
}
