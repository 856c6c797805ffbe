//! Naive Lagrange interpolation.
//!
//! `P(x) = sum_j y_j * N_j(x) / N_j(x_j)` with `N_j = M / (x - x_j)` and
//! `M = prod (x - x_i)`. Each `N_j` comes from one synthetic division of `M`,
//! so the whole fit costs O(m^2) field operations and never builds a tree.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::core::zp::FiniteField;
use crate::polynomial::dense::Polynomial;
use crate::polynomial::{Interpolator, ZpPolyError, ZpPolyType};

/// Direct Lagrange-formula strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveLagrange;

/// Divides the monic `m` by `(x - root)`, discarding the remainder.
fn divide_by_linear(field: &FiniteField, m: &[BigUint], root: &BigUint) -> Vec<BigUint> {
    let degree = m.len() - 1;
    let mut quotient = Vec::with_capacity(degree);
    let mut carry = BigUint::zero();
    for c in m[1..].iter().rev() {
        carry = field.add(c, &field.mul(&carry, root));
        quotient.push(carry.clone());
    }
    quotient.reverse();
    quotient
}

impl Interpolator for NaiveLagrange {
    fn poly_type(&self) -> ZpPolyType {
        ZpPolyType::NaiveLagrange
    }

    fn interpolate(
        &self,
        field: &FiniteField,
        xs: &[BigUint],
        ys: &[BigUint],
    ) -> Result<Polynomial, ZpPolyError> {
        if xs.len() != ys.len() {
            return Err(ZpPolyError::LengthMismatch);
        }
        if xs.is_empty() {
            return Ok(Polynomial::zero());
        }

        // M(x) = (x - x_0) ... (x - x_{m-1}), built one factor at a time
        let mut m = Polynomial::one();
        for x in xs {
            m = m.mul(field, &Polynomial::linear(field, x));
        }

        let mut acc = vec![BigUint::zero(); xs.len()];
        for (xj, yj) in xs.iter().zip(ys) {
            let basis = divide_by_linear(field, m.coefficients(), xj);
            let denominator = basis
                .iter()
                .rev()
                .fold(BigUint::zero(), |a, c| field.add(&field.mul(&a, xj), c));
            let scale = match field.inv(&denominator) {
                Ok(inv) => field.mul(yj, &inv),
                Err(_) => {
                    log::warn!("Lagrange interpolation hit a zero denominator (repeated point)");
                    return Err(ZpPolyError::RepeatedPoint);
                }
            };
            for (a, b) in acc.iter_mut().zip(&basis) {
                *a = field.add(a, &field.mul(&scale, b));
            }
        }
        Ok(Polynomial::from_coefficients(acc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> FiniteField {
        FiniteField::from_prime(BigUint::from(257u32)).unwrap()
    }

    fn nums(values: &[u32]) -> Vec<BigUint> {
        values.iter().map(|&v| BigUint::from(v)).collect()
    }

    #[test]
    fn test_divide_by_linear() {
        let f = field();
        // (x - 1)(x - 2) / (x - 2) = x - 1
        let m = Polynomial::linear(&f, &BigUint::from(1u32)).mul(&f, &Polynomial::linear(&f, &BigUint::from(2u32)));
        let q = divide_by_linear(&f, m.coefficients(), &BigUint::from(2u32));
        assert_eq!(q, nums(&[256, 1]));
    }

    #[test]
    fn test_interpolate_line() {
        let f = field();
        let p = NaiveLagrange.interpolate(&f, &nums(&[1, 2, 3]), &nums(&[5, 7, 9])).unwrap();
        assert_eq!(p.coefficients(), &nums(&[3, 2])[..]);
    }

    #[test]
    fn test_interpolate_single_and_empty() {
        let f = field();
        let p = NaiveLagrange.interpolate(&f, &nums(&[42]), &nums(&[9])).unwrap();
        assert_eq!(p, Polynomial::constant(BigUint::from(9u32)));
        assert!(NaiveLagrange.interpolate(&f, &[], &[]).unwrap().is_zero());
    }

    #[test]
    fn test_interpolate_quadratic() {
        let f = field();
        // y = x^2 + 1
        let xs = nums(&[0, 1, 2, 3]);
        let ys = nums(&[1, 2, 5, 10]);
        let p = NaiveLagrange.interpolate(&f, &xs, &ys).unwrap();
        assert_eq!(p.coefficients(), &nums(&[1, 0, 1])[..]);
        assert_eq!(p.evaluate(&f, &BigUint::from(16u32)), BigUint::from(0u32));
    }

    #[test]
    fn test_repeated_point() {
        let f = field();
        assert_eq!(
            NaiveLagrange.interpolate(&f, &nums(&[3, 3]), &nums(&[1, 2])),
            Err(ZpPolyError::RepeatedPoint)
        );
    }
}
