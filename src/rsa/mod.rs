// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod prime;
pub mod random;

pub use bigint::RsaBigInt;
pub use decrypt::{decrypt_blocks, decrypt_blocks as decrypt, decrypt_to_string};
pub use encrypt::{block_size, encrypt_blocks, encrypt_blocks as encrypt, encrypt_string, Ciphertext};
pub use keygen::{
    choose_public_exponent, derive_keys, generate_key_material, generate_keypair, KeyMaterial,
    RsaKeyPair, RsaPrivateKey, RsaPublicKey,
};
pub use prime::{generate_prime, generate_prime_with, is_probable_prime};
pub use random::SecureRandom;
