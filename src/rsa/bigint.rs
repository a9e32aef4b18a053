// RSA Big Integer Operations
// Wrapper around num-bigint for RSA-specific operations

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (unsigned, big-endian)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to exactly `width` bytes, left-padded with zeros.
/// Returns None if the value needs more than `width` bytes.
pub fn to_bytes_padded(n: &RsaBigInt, width: usize) -> Option<Vec<u8>> {
    if n.is_zero() {
        return Some(vec![0u8; width]);
    }
    let bytes = n.to_bytes_be();
    if bytes.len() > width {
        return None;
    }
    let mut result = vec![0u8; width];
    result[width - bytes.len()..].copy_from_slice(&bytes);
    Some(result)
}

/// Number of bytes in the minimal representation (0 has length 0)
pub fn byte_len(n: &RsaBigInt) -> usize {
    ((n.bits() + 7) / 8) as usize
}

/// Modular exponentiation: base^exp mod modulus
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }
    base.modpow(exp, modulus)
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}

/// Compute the modular inverse a^(-1) mod m with the iterative extended
/// Euclidean algorithm. The result lies in [0, m), and is 0 when m is 1.
///
/// `a` and `m` must be coprime. Otherwise the returned value is meaningless;
/// no error is raised.
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> RsaBigInt {
    if m.is_one() {
        return RsaBigInt::zero();
    }

    let modulus = BigInt::from(m.clone());
    let mut a = BigInt::from(a.clone());
    let mut m = modulus.clone();
    let mut x0 = BigInt::zero();
    let mut x1 = BigInt::one();

    while a > BigInt::one() && !m.is_zero() {
        let (q, r) = a.div_rem(&m);
        a = std::mem::replace(&mut m, r);
        let next = &x1 - &q * &x0;
        x1 = std::mem::replace(&mut x0, next);
    }

    // mod_floor folds negative coefficients back into [0, m)
    x1.mod_floor(&modulus)
        .to_biguint()
        .unwrap_or_else(RsaBigInt::zero)
}
