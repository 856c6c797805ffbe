//! Arithmetic in the prime field Z_p.
//!
//! Elements are plain `BigUint` values kept in `[0, p)`. The field only holds
//! the modulus and its derived lengths, so a `FiniteField` is immutable and can
//! be shared freely between threads.
//!
//! # Security
//! - **Randomness**: `random_element` draws from a caller-supplied CSPRNG. The
//!   raw bytes live in a `Zeroizing` buffer and are wiped after reduction.
//! - **Inversion**: Fermat inversion runs a fixed-length exponentiation.

extern crate alloc;
use alloc::vec;
use core::fmt;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::core::prime::{byte_length, field_prime, is_probable_prime};
use crate::polynomial::ZpPolyError;

/// Extra random bytes drawn beyond the element width so that reduction mod p
/// is statistically uniform (bias below 2^-128).
const WIDE_REDUCTION_BYTES: usize = 16;

/// The prime field Z_p.
#[derive(Clone, PartialEq, Eq)]
pub struct FiniteField {
    p: BigUint,
    /// Bit length of valid inputs (points and values).
    l: usize,
    /// Width of one encoded element, `ceil(bits(p) / 8)`.
    byte_len: usize,
}

impl fmt::Debug for FiniteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FiniteField")
            .field("l", &self.l)
            .field("p", &hex::encode(self.p.to_bytes_be()))
            .field("byte_len", &self.byte_len)
            .finish()
    }
}

impl FiniteField {
    /// Creates the field whose inputs are `l`-bit integers.
    ///
    /// The modulus is the smallest prime above `2^l`.
    ///
    /// # Returns
    /// * `Err(ZpPolyError::InvalidFieldBitLength)` if `l == 0` or `l % 8 != 0`.
    pub fn new(l: usize) -> Result<Self, ZpPolyError> {
        if l == 0 || l % 8 != 0 {
            return Err(ZpPolyError::InvalidFieldBitLength);
        }
        let p = field_prime(l);
        let byte_len = byte_length(&p);
        Ok(Self { p, l, byte_len })
    }

    /// Creates a field over an explicit modulus.
    ///
    /// Inputs may have up to `bits(p) - 1` bits. Even or tiny moduli are always
    /// rejected; composite moduli are rejected in debug builds only, since the
    /// surrounding protocol is expected to hand over a verified prime.
    pub fn from_prime(p: BigUint) -> Result<Self, ZpPolyError> {
        if p < BigUint::from(3u32) || p.is_even() {
            return Err(ZpPolyError::InvalidModulus);
        }
        if cfg!(debug_assertions) && !is_probable_prime(&p) {
            return Err(ZpPolyError::InvalidModulus);
        }
        let l = p.bits() as usize - 1;
        let byte_len = byte_length(&p);
        Ok(Self { p, l, byte_len })
    }

    /// The modulus p.
    pub fn prime(&self) -> &BigUint {
        &self.p
    }

    /// Bit length of valid inputs.
    pub fn l(&self) -> usize {
        self.l
    }

    /// Width in bytes of one encoded element.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    #[inline]
    pub fn zero(&self) -> BigUint {
        BigUint::zero()
    }

    #[inline]
    pub fn one(&self) -> BigUint {
        BigUint::one()
    }

    /// Reduces an arbitrary integer into `[0, p)`.
    #[inline]
    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.p
    }

    #[inline]
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let c = a + b;
        if c >= self.p {
            c - &self.p
        } else {
            c
        }
    }

    #[inline]
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        if a >= b {
            a - b
        } else {
            &self.p - (b - a)
        }
    }

    #[inline]
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    #[inline]
    pub fn neg(&self, a: &BigUint) -> BigUint {
        if a.is_zero() {
            BigUint::zero()
        } else {
            &self.p - a
        }
    }

    /// Multiplicative inverse via Fermat's little theorem, `a^(p-2)`.
    ///
    /// # Returns
    /// * `Err(ZpPolyError::DivisionByZero)` if `a == 0`.
    pub fn inv(&self, a: &BigUint) -> Result<BigUint, ZpPolyError> {
        if a.is_zero() {
            return Err(ZpPolyError::DivisionByZero);
        }
        let exponent = &self.p - 2u32;
        Ok(a.modpow(&exponent, &self.p))
    }

    /// Computes `a / b`.
    pub fn div(&self, a: &BigUint, b: &BigUint) -> Result<BigUint, ZpPolyError> {
        Ok(self.mul(a, &self.inv(b)?))
    }

    #[inline]
    pub fn is_zero(&self, a: &BigUint) -> bool {
        a.is_zero()
    }

    #[inline]
    pub fn is_one(&self, a: &BigUint) -> bool {
        a.is_one()
    }

    /// Returns `true` if `a` is a reduced field element.
    #[inline]
    pub fn is_element(&self, a: &BigUint) -> bool {
        a < &self.p
    }

    /// Returns `true` if `a` fits the input bit length `l`.
    #[inline]
    pub fn is_valid_point(&self, a: &BigUint) -> bool {
        a.bits() as usize <= self.l
    }

    /// Draws a uniformly random element of `[0, p)`.
    pub fn random_element(&self, rng: &mut dyn CryptoRngCore) -> BigUint {
        let mut buf = Zeroizing::new(vec![0u8; self.byte_len + WIDE_REDUCTION_BYTES]);
        rng.fill_bytes(&mut buf);
        BigUint::from_bytes_be(&buf) % &self.p
    }
}
