// RSA Encryption Implementation
// Splits a message into blocks narrower than the modulus and raises each to e mod n

use std::fmt;

use log::debug;

use super::bigint::{byte_len, from_bytes, mod_pow, RsaBigInt};
use super::keygen::RsaPublicKey;
use crate::error::{Result, RsaError};

/// An encrypted message: one cipher block per plaintext chunk, in chunk order.
///
/// Every chunk but the last is exactly [`block_size`] bytes wide. The
/// plaintext length is kept alongside the blocks so decryption knows the
/// width of the last chunk and restores any leading zero bytes exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    blocks: Vec<RsaBigInt>,
    plaintext_len: usize,
}

impl Ciphertext {
    pub fn new(blocks: Vec<RsaBigInt>, plaintext_len: usize) -> Self {
        Self { blocks, plaintext_len }
    }

    pub fn blocks(&self) -> &[RsaBigInt] {
        &self.blocks
    }

    pub fn plaintext_len(&self) -> usize {
        self.plaintext_len
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn into_blocks(self) -> Vec<RsaBigInt> {
        self.blocks
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", block)?;
        }
        write!(f, "]")
    }
}

/// Largest chunk, in bytes, whose integer value is always below `n`
pub fn block_size(n: &RsaBigInt) -> Result<usize> {
    match byte_len(n) {
        0 | 1 => Err(RsaError::ModulusTooSmall),
        len => Ok(len - 1),
    }
}

/// Encrypt `message` chunk by chunk: each chunk is read as an unsigned
/// big-endian integer m and replaced by m^e mod n.
pub fn encrypt_blocks(message: &[u8], e: &RsaBigInt, n: &RsaBigInt) -> Result<Ciphertext> {
    let size = block_size(n)?;

    let blocks: Vec<RsaBigInt> = message
        .chunks(size)
        .map(|chunk| mod_pow(&from_bytes(chunk), e, n))
        .collect();

    debug!(
        "encrypted {} bytes into {} blocks of up to {} bytes",
        message.len(),
        blocks.len(),
        size
    );
    Ok(Ciphertext::new(blocks, message.len()))
}

/// Encrypt a string's UTF-8 bytes using RSA public key
pub fn encrypt_string(plaintext: &str, public_key: &RsaPublicKey) -> Result<Ciphertext> {
    encrypt_blocks(plaintext.as_bytes(), &public_key.e, &public_key.n)
}
