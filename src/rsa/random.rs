// Secure Randomness
// Injected entropy source plus the draw and retry helpers built on it

use log::warn;
use rand::{CryptoRng, RngCore};

use super::bigint::{from_bytes, RsaBigInt};
use crate::error::{Result, RsaError};

/// A source of cryptographically secure random bytes.
///
/// Every draw in the crate (prime candidates, Miller-Rabin witnesses and the
/// public exponent) goes through this trait, so callers decide where entropy
/// comes from. Any `RngCore + CryptoRng` qualifies: use `rand::rngs::OsRng`
/// in production and a seeded `StdRng` when a test needs repeatable keys.
pub trait SecureRandom {
    /// Fill `buf` completely with random bytes.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;
}

impl<R: RngCore + CryptoRng> SecureRandom for R {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.try_fill_bytes(buf)?;
        Ok(())
    }
}

/// Draw `len` fresh random bytes and read them as an unsigned big-endian integer
pub fn random_biguint<R: SecureRandom + ?Sized>(rng: &mut R, len: usize) -> Result<RsaBigInt> {
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)?;
    Ok(from_bytes(&bytes))
}

/// Run `attempt` until it yields a value.
///
/// `max_attempts` of `None` retries forever. Errors from `attempt` propagate
/// at once and are never retried.
pub fn retry_until<T, F>(max_attempts: Option<u64>, what: &'static str, mut attempt: F) -> Result<T>
where
    F: FnMut(u64) -> Result<Option<T>>,
{
    let mut attempts = 0u64;
    loop {
        if let Some(max) = max_attempts {
            if attempts >= max {
                warn!("{} search gave up after {} attempts", what, attempts);
                return Err(RsaError::GenerationFailed { what, attempts });
            }
        }
        attempts += 1;
        if let Some(value) = attempt(attempts)? {
            return Ok(value);
        }
    }
}
