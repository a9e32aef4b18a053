// RSA Key Generation
// Derives n, phi(n), e and d from two primes and generates fresh key pairs

use log::{debug, info};
use num_traits::{One, Zero};

use super::bigint::{byte_len, from_u64, gcd, mod_inverse, RsaBigInt};
use super::decrypt::{decrypt_blocks, decrypt_to_string};
use super::encrypt::{encrypt_blocks, encrypt_string, Ciphertext};
use super::prime::generate_prime_with;
use super::random::{random_biguint, retry_until, SecureRandom};
use crate::error::{Result, RsaError};
use crate::util::config::KeyGenConfig;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt, // Modulus (same as public)
    pub d: RsaBigInt, // Private exponent
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
}

/// Everything derived from the two primes.
///
/// Invariants: `n = p*q`, `phi = (p-1)(q-1)`, `1 < e < phi`,
/// `gcd(e, phi) = 1`, `d*e = 1 (mod phi)` and `d < phi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub p: RsaBigInt,
    pub q: RsaBigInt,
    pub n: RsaBigInt,
    pub phi: RsaBigInt,
    pub e: RsaBigInt,
    pub d: RsaBigInt,
}

impl RsaPublicKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt a message block by block using this public key
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Ciphertext> {
        encrypt_blocks(plaintext, &self.e, &self.n)
    }

    pub fn encrypt_string(&self, plaintext: &str) -> Result<Ciphertext> {
        encrypt_string(plaintext, self)
    }
}

impl RsaPrivateKey {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Decrypt a ciphertext back to the original bytes
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<u8>> {
        decrypt_blocks(ciphertext, &self.d, &self.n)
    }

    pub fn decrypt_to_string(&self, ciphertext: &Ciphertext) -> Result<String> {
        decrypt_to_string(ciphertext, self)
    }
}

impl RsaKeyPair {
    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.public_key.bit_length()
    }
}

impl KeyMaterial {
    /// Derive n, phi and d for a caller-chosen public exponent `e`.
    pub fn with_exponent(p: RsaBigInt, q: RsaBigInt, e: RsaBigInt) -> Result<Self> {
        let (n, phi) = modulus_and_totient(&p, &q)?;

        if e <= RsaBigInt::one() || e >= phi || !gcd(&e, &phi).is_one() {
            return Err(RsaError::InvalidExponent);
        }

        let d = mod_inverse(&e, &phi);
        Ok(Self { p, q, n, phi, e, d })
    }

    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            n: self.n.clone(),
            e: self.e.clone(),
        }
    }

    pub fn private_key(&self) -> RsaPrivateKey {
        RsaPrivateKey {
            n: self.n.clone(),
            d: self.d.clone(),
        }
    }

    pub fn keypair(&self) -> RsaKeyPair {
        RsaKeyPair {
            public_key: self.public_key(),
            private_key: self.private_key(),
        }
    }
}

/// n = p*q and phi = (p-1)(q-1), rejecting pairs that leave no room for e
fn modulus_and_totient(p: &RsaBigInt, q: &RsaBigInt) -> Result<(RsaBigInt, RsaBigInt)> {
    if p == q {
        return Err(RsaError::IdenticalPrimes);
    }
    if p.is_zero() || q.is_zero() {
        return Err(RsaError::TotientTooSmall);
    }

    let n = p * q;
    let phi = (p - 1u8) * (q - 1u8);
    if phi < from_u64(3) {
        return Err(RsaError::TotientTooSmall);
    }

    Ok((n, phi))
}

/// Pick a random public exponent e with 1 < e < phi and gcd(e, phi) = 1.
///
/// Unlike the usual fixed e = 65537, every call draws a fresh random unit,
/// so e is generally as wide as phi.
pub fn choose_public_exponent<R: SecureRandom + ?Sized>(
    phi: &RsaBigInt,
    max_attempts: Option<u64>,
    rng: &mut R,
) -> Result<RsaBigInt> {
    if phi < &from_u64(3) {
        return Err(RsaError::TotientTooSmall);
    }

    let width = byte_len(phi);
    let range = phi - 1u8;

    retry_until(max_attempts, "public exponent", |attempt| {
        let e = random_biguint(rng, width)? % &range + 1u8;
        if e > RsaBigInt::one() && gcd(&e, phi).is_one() {
            debug!("picked a public exponent after {} draws", attempt);
            Ok(Some(e))
        } else {
            Ok(None)
        }
    })
}

/// Derive the full key material from two distinct primes with a random exponent
pub fn derive_keys<R: SecureRandom + ?Sized>(
    p: RsaBigInt,
    q: RsaBigInt,
    rng: &mut R,
) -> Result<KeyMaterial> {
    derive_keys_with(p, q, None, rng)
}

pub fn derive_keys_with<R: SecureRandom + ?Sized>(
    p: RsaBigInt,
    q: RsaBigInt,
    max_attempts: Option<u64>,
    rng: &mut R,
) -> Result<KeyMaterial> {
    let (_, phi) = modulus_and_totient(&p, &q)?;
    let e = choose_public_exponent(&phi, max_attempts, rng)?;
    KeyMaterial::with_exponent(p, q, e)
}

/// Generate two distinct primes and derive keys from them as `config` describes
pub fn generate_key_material<R: SecureRandom + ?Sized>(
    config: &KeyGenConfig,
    rng: &mut R,
) -> Result<KeyMaterial> {
    config.validate()?;

    let p = generate_prime_with(config, rng)?;
    let q = retry_until(config.max_attempts, "distinct prime", |_| {
        let q = generate_prime_with(config, rng)?;
        Ok((q != p).then_some(q))
    })?;

    let keys = derive_keys_with(p, q, config.max_attempts, rng)?;
    info!(
        "generated RSA key material with a {}-bit modulus from {}-bit primes",
        keys.n.bits(),
        config.prime_bits
    );
    Ok(keys)
}

/// Generate an RSA key pair whose primes are each drawn from `bit_length` bits
pub fn generate_keypair<R: SecureRandom + ?Sized>(bit_length: u32, rng: &mut R) -> Result<RsaKeyPair> {
    let config = KeyGenConfig::default().with_prime_bits(bit_length);
    Ok(generate_key_material(&config, rng)?.keypair())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::prime::is_probable_prime;
    use crate::rsa::random::tests::BrokenSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    fn assert_key_invariants(keys: &KeyMaterial) {
        let one = RsaBigInt::one();
        assert_eq!(keys.n, &keys.p * &keys.q);
        assert_eq!(keys.phi, (&keys.p - 1u8) * (&keys.q - 1u8));
        assert!(keys.e > one && keys.e < keys.phi);
        assert!(gcd(&keys.e, &keys.phi).is_one());
        assert_eq!((&keys.e * &keys.d) % &keys.phi, one);
        assert!(keys.d < keys.phi);
    }

    #[test]
    fn test_textbook_key() {
        let keys = KeyMaterial::with_exponent(from_u64(61), from_u64(53), from_u64(17)).unwrap();
        assert_eq!(keys.n, from_u64(3233));
        assert_eq!(keys.phi, from_u64(3120));
        assert_eq!(keys.d, from_u64(2753));
        assert_key_invariants(&keys);
    }

    #[rstest]
    #[case(1)]
    #[case(3120)]
    #[case(4000)]
    #[case(26)] // shares 2 and 13 with 3120
    fn test_with_exponent_rejects_bad_e(#[case] e: u64) {
        let result = KeyMaterial::with_exponent(from_u64(61), from_u64(53), from_u64(e));
        assert!(matches!(result, Err(RsaError::InvalidExponent)));
    }

    #[test]
    fn test_derive_keys_random_exponent() {
        let mut rng = rng();
        for _ in 0..20 {
            let keys = derive_keys(from_u64(61), from_u64(53), &mut rng).unwrap();
            assert_key_invariants(&keys);
        }
    }

    #[test]
    fn test_derive_keys_rejects_degenerate_primes() {
        let mut rng = rng();
        assert!(matches!(
            derive_keys(from_u64(7), from_u64(7), &mut rng),
            Err(RsaError::IdenticalPrimes)
        ));
        assert!(matches!(
            derive_keys(from_u64(2), from_u64(3), &mut rng),
            Err(RsaError::TotientTooSmall)
        ));
        assert!(matches!(
            derive_keys(from_u64(0), from_u64(5), &mut rng),
            Err(RsaError::TotientTooSmall)
        ));
    }

    #[test]
    fn test_choose_public_exponent_smallest_totient() {
        // phi = 4 leaves only e = 3
        let e = choose_public_exponent(&from_u64(4), None, &mut rng()).unwrap();
        assert_eq!(e, from_u64(3));
    }

    #[test]
    fn test_choose_public_exponent_bounded() {
        let result = choose_public_exponent(&from_u64(3120), Some(0), &mut rng());
        assert!(matches!(
            result,
            Err(RsaError::GenerationFailed { what: "public exponent", .. })
        ));
    }

    #[test]
    fn test_key_generation() {
        let mut rng = rng();
        let config = KeyGenConfig::default().with_prime_bits(128);
        let keys = generate_key_material(&config, &mut rng).unwrap();

        assert_key_invariants(&keys);
        assert_ne!(keys.p, keys.q);
        assert!(is_probable_prime(&keys.p, 20, &mut rng).unwrap());
        assert!(is_probable_prime(&keys.q, 20, &mut rng).unwrap());
        assert!(keys.n.bits() <= 256);
    }

    #[test]
    fn test_generate_keypair() {
        let keypair = generate_keypair(64, &mut rng()).unwrap();
        assert_eq!(keypair.public_key.n, keypair.private_key.n);
        assert!(keypair.bit_length() <= 128);
    }

    #[test]
    fn test_key_encrypt_decrypt() {
        let keypair = generate_keypair(128, &mut rng()).unwrap();
        let message = b"Hello, RSA!";

        let ciphertext = keypair.public_key.encrypt(message).unwrap();
        let decrypted = keypair.private_key.decrypt(&ciphertext).unwrap();

        assert_eq!(message.as_slice(), decrypted.as_slice());
    }

    #[test]
    fn test_generation_needs_entropy() {
        let config = KeyGenConfig::default().with_prime_bits(64);
        assert!(matches!(
            generate_key_material(&config, &mut BrokenSource),
            Err(RsaError::Entropy(_))
        ));
    }
}
