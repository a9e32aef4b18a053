// RSA Decryption Implementation
// Raises each cipher block to d mod n and restores the original chunk widths

use log::debug;

use super::bigint::{mod_pow, to_bytes_padded, RsaBigInt};
use super::encrypt::{block_size, Ciphertext};
use super::keygen::RsaPrivateKey;
use crate::error::{Result, RsaError};

/// Decrypt every block in order and concatenate the recovered chunks.
///
/// Each chunk is written back at its original width: the block size for
/// every block but the last, and whatever remains of the plaintext length
/// for the last one.
pub fn decrypt_blocks(ciphertext: &Ciphertext, d: &RsaBigInt, n: &RsaBigInt) -> Result<Vec<u8>> {
    let size = block_size(n)?;
    let total = ciphertext.plaintext_len();

    let expected = total.div_ceil(size);
    if ciphertext.len() != expected {
        return Err(RsaError::BlockCountMismatch {
            expected,
            actual: ciphertext.len(),
        });
    }

    let mut plaintext = Vec::with_capacity(total);
    for (index, block) in ciphertext.blocks().iter().enumerate() {
        let width = size.min(total - index * size);
        let m = mod_pow(block, d, n);
        let chunk = to_bytes_padded(&m, width).ok_or(RsaError::BlockOverflow { index, width })?;
        plaintext.extend_from_slice(&chunk);
    }

    debug!("decrypted {} blocks into {} bytes", ciphertext.len(), plaintext.len());
    Ok(plaintext)
}

/// Decrypt ciphertext to a string
pub fn decrypt_to_string(ciphertext: &Ciphertext, private_key: &RsaPrivateKey) -> Result<String> {
    let plaintext = decrypt_blocks(ciphertext, &private_key.d, &private_key.n)?;
    Ok(String::from_utf8(plaintext)?)
}
