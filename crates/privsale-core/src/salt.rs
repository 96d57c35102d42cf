//! Salt sources for counter orders.
//!
//! A counter order is identified by its parameters, so two counter orders
//! for the same listing differ only by salt. Sources are shared across
//! threads; [`RandomSalt`] draws from the OS RNG on every call.

#[cfg(any(test, feature = "test-helpers"))]
use std::collections::VecDeque;
#[cfg(any(test, feature = "test-helpers"))]
use std::sync::Mutex;

use privsale_types::constants::SALT_WORD_BYTES;
use privsale_types::{ListingConfig, Result, Word};
use rand::RngCore;
use rand::rngs::OsRng;

/// Produces fresh salts for counter orders.
pub trait SaltSource: Send + Sync {
    fn next_salt(&self) -> Word;
}

/// OS-random salts with `entropy_bytes` random low-order bytes.
#[derive(Debug, Clone, Copy)]
pub struct RandomSalt {
    entropy_bytes: usize,
}

impl RandomSalt {
    /// Build from a validated config.
    pub fn from_config(config: &ListingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entropy_bytes: config.salt_entropy_bytes,
        })
    }
}

impl Default for RandomSalt {
    fn default() -> Self {
        Self {
            entropy_bytes: privsale_types::constants::DEFAULT_SALT_ENTROPY_BYTES,
        }
    }
}

impl SaltSource for RandomSalt {
    fn next_salt(&self) -> Word {
        let mut bytes = [0u8; SALT_WORD_BYTES];
        OsRng.fill_bytes(&mut bytes[SALT_WORD_BYTES - self.entropy_bytes..]);
        Word::from_bytes(bytes)
    }
}

/// Always returns the same salt.
#[derive(Debug, Clone, Copy)]
pub struct FixedSalt(pub Word);

impl SaltSource for FixedSalt {
    fn next_salt(&self) -> Word {
        self.0
    }
}

/// Replays a fixed list of salts, repeating the last one once exhausted.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug)]
pub struct SequenceSalt {
    remaining: Mutex<VecDeque<Word>>,
    last: Word,
}

#[cfg(any(test, feature = "test-helpers"))]
impl SequenceSalt {
    #[must_use]
    pub fn new(salts: Vec<Word>) -> Self {
        let last = salts.last().copied().unwrap_or(Word::ZERO);
        Self {
            remaining: Mutex::new(salts.into()),
            last,
        }
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl SaltSource for SequenceSalt {
    fn next_salt(&self) -> Word {
        // A poisoned lock only means another test thread panicked mid-draw.
        let mut remaining = self
            .remaining
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        remaining.pop_front().unwrap_or(self.last)
    }
}
