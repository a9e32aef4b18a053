// Key Generation Configuration
// Prime size, Miller-Rabin rounds and the optional search bound

use crate::error::{Result, RsaError};

/// Configuration for prime and key generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyGenConfig {
    /// Bit length of each prime; a positive multiple of 8
    pub prime_bits: u32,
    /// Miller-Rabin witness rounds per candidate
    pub rounds: u32,
    /// Upper bound on prime and exponent draws. `None` searches forever.
    pub max_attempts: Option<u64>,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            prime_bits: 1024,
            rounds: 10,
            max_attempts: None,
        }
    }
}

impl KeyGenConfig {
    pub fn with_prime_bits(mut self, bits: u32) -> Self {
        self.prime_bits = bits;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Check that the prime size is byte-aligned and at least one round runs
    pub fn validate(&self) -> Result<()> {
        if self.prime_bits == 0 || self.prime_bits % 8 != 0 {
            return Err(RsaError::InvalidBitLength(self.prime_bits));
        }
        if self.rounds == 0 {
            return Err(RsaError::InvalidRounds(self.rounds));
        }
        Ok(())
    }
}
