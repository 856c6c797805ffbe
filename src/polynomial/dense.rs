//! Dense univariate polynomials over Z_p.
//!
//! Coefficients are stored in ascending order (index = power of x) and are
//! always trimmed, so the last stored coefficient is non-zero. The zero
//! polynomial has no coefficients and no degree (`degree() == None`).
//!
//! Operations return new polynomials; the only in-place step is the trimming
//! of a freshly computed remainder.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::core::zp::FiniteField;
use crate::polynomial::ZpPolyError;

/// Dense polynomial with coefficients in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial {
    coefficients: Vec<BigUint>,
}

impl Polynomial {
    /// Builds a polynomial from reduced coefficients, dropping trailing zeros.
    pub fn from_coefficients(coefficients: Vec<BigUint>) -> Self {
        let mut poly = Self { coefficients };
        poly.trim();
        poly
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coefficients: Vec::new() }
    }

    /// The constant polynomial 1.
    pub fn one() -> Self {
        Self { coefficients: vec![BigUint::one()] }
    }

    /// The constant polynomial `c`.
    pub fn constant(c: BigUint) -> Self {
        Self::from_coefficients(vec![c])
    }

    /// The monic linear polynomial `x - root`.
    pub fn linear(field: &FiniteField, root: &BigUint) -> Self {
        Self { coefficients: vec![field.neg(root), BigUint::one()] }
    }

    pub fn coefficients(&self) -> &[BigUint] {
        &self.coefficients
    }

    /// Coefficient of `x^i`, zero beyond the degree.
    pub fn coefficient(&self, i: usize) -> BigUint {
        self.coefficients.get(i).cloned().unwrap_or_default()
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn leading_coefficient(&self) -> Option<&BigUint> {
        self.coefficients.last()
    }

    /// Returns `true` if the leading coefficient is 1.
    pub fn is_monic(&self) -> bool {
        self.leading_coefficient().map_or(false, |c| c.is_one())
    }

    fn trim(&mut self) {
        while self.coefficients.last().map_or(false, |c| c.is_zero()) {
            self.coefficients.pop();
        }
    }

    /// Coefficient vector zero-extended to exactly `len` entries.
    ///
    /// # Panics
    /// If the polynomial has more than `len` coefficients. Callers size `len`
    /// from a degree bound they already enforce.
    pub fn to_padded_coefficients(&self, len: usize) -> Vec<BigUint> {
        assert!(
            self.coefficients.len() <= len,
            "polynomial with {} coefficients does not fit in {}",
            self.coefficients.len(),
            len
        );
        let mut out = self.coefficients.clone();
        out.resize(len, BigUint::zero());
        out
    }

    pub fn add(&self, field: &FiniteField, other: &Self) -> Self {
        let len = self.coefficients.len().max(other.coefficients.len());
        let coefficients = (0..len)
            .map(|i| match (self.coefficients.get(i), other.coefficients.get(i)) {
                (Some(a), Some(b)) => field.add(a, b),
                (Some(a), None) => a.clone(),
                (None, Some(b)) => b.clone(),
                (None, None) => BigUint::zero(),
            })
            .collect();
        Self::from_coefficients(coefficients)
    }

    pub fn sub(&self, field: &FiniteField, other: &Self) -> Self {
        let len = self.coefficients.len().max(other.coefficients.len());
        let zero = BigUint::zero();
        let coefficients = (0..len)
            .map(|i| {
                let a = self.coefficients.get(i).unwrap_or(&zero);
                let b = other.coefficients.get(i).unwrap_or(&zero);
                field.sub(a, b)
            })
            .collect();
        Self::from_coefficients(coefficients)
    }

    /// Schoolbook product. Partial sums are accumulated unreduced and each
    /// output coefficient is reduced once.
    pub fn mul(&self, field: &FiniteField, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let mut acc = vec![BigUint::zero(); self.coefficients.len() + other.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coefficients.iter().enumerate() {
                acc[i + j] += a * b;
            }
        }
        Self::from_coefficients(acc.iter().map(|c| field.reduce(c)).collect())
    }

    /// Multiplies every coefficient by the scalar `c`.
    pub fn scale(&self, field: &FiniteField, c: &BigUint) -> Self {
        Self::from_coefficients(self.coefficients.iter().map(|a| field.mul(a, c)).collect())
    }

    /// Formal derivative. Constants and the zero polynomial map to zero.
    pub fn derivative(&self, field: &FiniteField) -> Self {
        if self.coefficients.len() <= 1 {
            return Self::zero();
        }
        let coefficients = self.coefficients[1..]
            .iter()
            .enumerate()
            .map(|(i, c)| field.mul(c, &field.reduce(&BigUint::from(i + 1))))
            .collect();
        Self::from_coefficients(coefficients)
    }

    /// Quotient and remainder of division by a monic polynomial.
    ///
    /// # Returns
    /// * `Ok((q, r))` with `self = q * divisor + r` and `deg(r) < deg(divisor)`.
    /// * `Err(ZpPolyError::DivisionByNonMonic)` if `divisor` is not monic.
    pub fn div_rem(&self, field: &FiniteField, divisor: &Self) -> Result<(Self, Self), ZpPolyError> {
        if !divisor.is_monic() {
            return Err(ZpPolyError::DivisionByNonMonic);
        }
        Ok(self.div_rem_monic(field, divisor))
    }

    /// Remainder of division by a divisor that is monic by construction.
    ///
    /// # Panics
    /// If `divisor` is not monic. Subproduct-tree nodes are products of
    /// `(x - x_i)` and `1`, so this indicates a broken tree.
    pub(crate) fn rem_monic(&self, field: &FiniteField, divisor: &Self) -> Self {
        assert!(divisor.is_monic(), "subproduct tree node is not monic");
        self.div_rem_monic(field, divisor).1
    }

    fn div_rem_monic(&self, field: &FiniteField, divisor: &Self) -> (Self, Self) {
        let m = divisor.coefficients.len() - 1;
        let n = match self.degree() {
            Some(n) if n >= m => n,
            _ => return (Self::zero(), self.clone()),
        };
        let mut rem = self.coefficients.clone();
        let mut quotient = vec![BigUint::zero(); n - m + 1];
        for i in (0..=n - m).rev() {
            let lead = core::mem::take(&mut rem[i + m]);
            if lead.is_zero() {
                continue;
            }
            for (j, d) in divisor.coefficients[..m].iter().enumerate() {
                rem[i + j] = field.sub(&rem[i + j], &field.mul(&lead, d));
            }
            quotient[i] = lead;
        }
        rem.truncate(m);
        let mut remainder = Self { coefficients: rem };
        remainder.trim();
        (Self::from_coefficients(quotient), remainder)
    }

    /// Horner evaluation.
    pub fn evaluate(&self, field: &FiniteField, x: &BigUint) -> BigUint {
        self.coefficients
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, c| field.add(&field.mul(&acc, x), c))
    }
}
