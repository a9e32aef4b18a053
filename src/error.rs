// RSA Error Types
// Every fallible operation in the crate reports through RsaError

use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors raised by key generation and the block codec
#[derive(Debug, Error)]
pub enum RsaError {
    /// The secure random source could not fill a buffer.
    #[error("secure random source failed: {0}")]
    Entropy(#[from] rand::Error),

    /// Prime sizes must be positive multiples of 8.
    #[error("invalid prime bit length {0}: must be a positive multiple of 8")]
    InvalidBitLength(u32),

    #[error("invalid Miller-Rabin round count {0}: must be at least 1")]
    InvalidRounds(u32),

    /// A bounded search ran out of attempts.
    #[error("{what} generation failed after {attempts} attempts")]
    GenerationFailed { what: &'static str, attempts: u64 },

    #[error("p and q must be distinct primes")]
    IdenticalPrimes,

    #[error("totient is too small to admit a public exponent")]
    TotientTooSmall,

    /// The exponent is outside (1, phi) or shares a factor with phi.
    #[error("public exponent is not a unit in (1, phi)")]
    InvalidExponent,

    /// The modulus must be at least two bytes wide to hold one plaintext byte.
    #[error("modulus is too small to encrypt a block")]
    ModulusTooSmall,

    #[error("ciphertext holds {actual} blocks but its length requires {expected}")]
    BlockCountMismatch { expected: usize, actual: usize },

    /// A decrypted block does not fit in its chunk width (wrong key or tampered block).
    #[error("decrypted block {index} does not fit in {width} bytes")]
    BlockOverflow { index: usize, width: usize },

    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

/// Result type for RSA operations
pub type Result<T> = std::result::Result<T, RsaError>;
