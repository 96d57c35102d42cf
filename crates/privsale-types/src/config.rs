//! Configuration for counter-order construction.

use serde::{Deserialize, Serialize};

use crate::{PrivateListingError, Result, constants};

/// Tunables for the counter-order builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Random bytes per counter-order salt (1..=32). The rest of the 32-byte
    /// word is zero-padded on the left.
    pub salt_entropy_bytes: usize,
    /// How many salts to draw before failing when every draw equals the
    /// seller order's salt.
    pub max_salt_draws: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            salt_entropy_bytes: constants::DEFAULT_SALT_ENTROPY_BYTES,
            max_salt_draws: constants::DEFAULT_MAX_SALT_DRAWS,
        }
    }
}

impl ListingConfig {
    /// Check every field is within range.
    pub fn validate(&self) -> Result<()> {
        if self.salt_entropy_bytes == 0 || self.salt_entropy_bytes > constants::SALT_WORD_BYTES {
            return Err(PrivateListingError::Configuration(format!(
                "salt_entropy_bytes must be in 1..={}, got {}",
                constants::SALT_WORD_BYTES,
                self.salt_entropy_bytes
            )));
        }
        if self.max_salt_draws == 0 {
            return Err(PrivateListingError::Configuration(
                "max_salt_draws must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a JSON config document, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ListingConfig::default();
        assert_eq!(cfg.salt_entropy_bytes, 8);
        assert_eq!(cfg.max_salt_draws, 4);
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg = ListingConfig::from_json(r#"{"max_salt_draws": 10}"#).unwrap();
        assert_eq!(cfg.max_salt_draws, 10);
        assert_eq!(cfg.salt_entropy_bytes, constants::DEFAULT_SALT_ENTROPY_BYTES);
    }

    #[test]
    fn out_of_range_entropy_rejected() {
        for bad in [0, 33] {
            let cfg = ListingConfig {
                salt_entropy_bytes: bad,
                ..ListingConfig::default()
            };
            let err = cfg.validate().unwrap_err();
            assert!(matches!(err, PrivateListingError::Configuration(_)));
        }
    }

    #[test]
    fn zero_draws_rejected() {
        let err = ListingConfig::from_json(r#"{"max_salt_draws": 0}"#).unwrap_err();
        assert!(matches!(err, PrivateListingError::Configuration(_)));
    }
}
