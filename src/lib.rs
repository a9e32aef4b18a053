//! Textbook RSA built from first principles.
//!
//! Random primes come from Miller-Rabin filtering over a caller-supplied
//! secure random source, keys pick a random public exponent coprime to the
//! totient, and messages are split into fixed-width blocks that are each
//! raised to the key exponent modulo `n`. No padding scheme is applied, so
//! this is for study and reproduction, not for protecting real data.

pub mod error;
pub mod rsa;
pub mod util;

pub use error::{Result, RsaError};
pub use rsa::{
    decrypt, decrypt_blocks, derive_keys, encrypt, encrypt_blocks, generate_key_material,
    generate_keypair, generate_prime, is_probable_prime, Ciphertext, KeyMaterial, RsaBigInt,
    RsaKeyPair, RsaPrivateKey, RsaPublicKey, SecureRandom,
};
pub use util::config::KeyGenConfig;
