//! Probable-prime testing and field modulus selection.
//!
//! The modulus for a field of element bit length `l` is the smallest prime
//! strictly greater than `2^l`. Every `l`-bit value is then a field element, and
//! the prime itself occupies `l + 1` bits.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Small primes used both for trial division and as Miller-Rabin witnesses.
const SMALL_PRIMES: [u32; 40] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
    73, 79, 83, 89, 97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173,
];

/// Returns `true` if `n` is prime with overwhelming probability.
///
/// Trial division by `SMALL_PRIMES` first, then Miller-Rabin with every small
/// prime as a witness. Deterministic below 3.3 * 10^24; above that the error
/// probability for non-adversarial inputs is far below 2^-80.
pub fn is_probable_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if n < &two {
        return false;
    }
    for &sp in SMALL_PRIMES.iter() {
        let sp = BigUint::from(sp);
        if n == &sp {
            return true;
        }
        if n.is_multiple_of(&sp) {
            return false;
        }
    }

    // n - 1 = d * 2^r with d odd
    let n_minus_one = n - 1u32;
    let r = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> r;

    'witness: for &a in SMALL_PRIMES.iter() {
        let a = BigUint::from(a);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue 'witness;
        }
        for _ in 1..r {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Returns the smallest probable prime strictly greater than `n`.
pub fn next_prime(n: &BigUint) -> BigUint {
    let two = BigUint::from(2u32);
    if n < &two {
        return two;
    }
    let mut candidate = n + 1u32;
    if candidate.is_even() {
        candidate += 1u32;
    }
    while !is_probable_prime(&candidate) {
        candidate += 2u32;
    }
    candidate
}

/// Returns the field modulus for element bit length `l`: the smallest prime above `2^l`.
pub fn field_prime(l: usize) -> BigUint {
    let bound = BigUint::one() << l;
    next_prime(&bound)
}

/// Byte length of the fixed-width encoding of elements modulo `p`.
pub fn byte_length(p: &BigUint) -> usize {
    if p.is_zero() {
        return 0;
    }
    (p.bits() as usize + 7) / 8
}
