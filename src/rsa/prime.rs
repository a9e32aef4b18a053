// Prime Generation
// Miller-Rabin probable-prime test and random prime search

use log::debug;
use num_integer::Integer;
use num_traits::One;

use super::bigint::{byte_len, from_u64, mod_pow, RsaBigInt};
use super::random::{random_biguint, retry_until, SecureRandom};
use crate::error::{Result, RsaError};
use crate::util::config::KeyGenConfig;

/// Miller-Rabin primality test.
///
/// Returns `Ok(true)` if `candidate` is probably prime after `rounds`
/// independent random witnesses. A composite slips through with probability
/// at most 4^(-rounds); a prime is never rejected. `rounds` must be at
/// least 1.
pub fn is_probable_prime<R: SecureRandom + ?Sized>(
    candidate: &RsaBigInt,
    rounds: u32,
    rng: &mut R,
) -> Result<bool> {
    if rounds == 0 {
        return Err(RsaError::InvalidRounds(rounds));
    }

    let two = from_u64(2);
    let three = from_u64(3);

    if candidate == &two || candidate == &three {
        return Ok(true);
    }
    if candidate < &two || candidate.is_even() {
        return Ok(false);
    }

    // Write candidate-1 as d * 2^s with d odd
    let n_minus_one = candidate - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    let n_minus_two = candidate - 2u8;
    let width = byte_len(candidate);

    for _ in 0..rounds {
        // Witness a with 2 <= a < candidate-2
        let a = retry_until(None, "witness", |_| {
            let a = random_biguint(rng, width)?;
            Ok((a >= two && a < n_minus_two).then_some(a))
        })?;

        let mut x = mod_pow(&a, &d, candidate);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = mod_pow(&x, &two, candidate);
            if x.is_one() {
                return Ok(false);
            }
            if x == n_minus_one {
                break;
            }
        }

        if x != n_minus_one {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Generate a random probable prime from `bit_length / 8` random bytes,
/// using 10 Miller-Rabin rounds and no attempt limit.
pub fn generate_prime<R: SecureRandom + ?Sized>(bit_length: u32, rng: &mut R) -> Result<RsaBigInt> {
    let config = KeyGenConfig::default().with_prime_bits(bit_length);
    generate_prime_with(&config, rng)
}

/// Generate a random probable prime as described by `config`.
///
/// Each attempt draws `prime_bits / 8` fresh bytes and forces the low bit on,
/// so the prime may come out a few bits shorter than `prime_bits` when the
/// leading bytes are small.
pub fn generate_prime_with<R: SecureRandom + ?Sized>(
    config: &KeyGenConfig,
    rng: &mut R,
) -> Result<RsaBigInt> {
    config.validate()?;
    let width = (config.prime_bits / 8) as usize;

    retry_until(config.max_attempts, "prime", |attempt| {
        let candidate = random_biguint(rng, width)? | RsaBigInt::one();
        if is_probable_prime(&candidate, config.rounds, rng)? {
            debug!("found a {}-bit probable prime after {} draws", candidate.bits(), attempt);
            Ok(Some(candidate))
        } else {
            Ok(None)
        }
    })
}
