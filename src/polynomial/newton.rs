//! Newton interpolation.
//!
//! Divided differences give `P(x) = c_0 + c_1 (x - x_0) + ... + c_{m-1} (x - x_0)...(x - x_{m-2})`.
//! The nested form is then expanded into monomial coefficients with a
//! Horner-style pass. Both steps are O(m^2).

extern crate alloc;
use alloc::vec::Vec;

use num_bigint::BigUint;

use crate::core::zp::FiniteField;
use crate::polynomial::dense::Polynomial;
use crate::polynomial::{Interpolator, ZpPolyError, ZpPolyType};

/// Divided-difference strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Newton;

/// In-place divided differences: on return `table[k] = f[x_0, ..., x_k]`.
fn divided_differences(field: &FiniteField, xs: &[BigUint], table: &mut [BigUint]) -> Result<(), ZpPolyError> {
    let m = xs.len();
    for level in 1..m {
        for i in (level..m).rev() {
            let numerator = field.sub(&table[i], &table[i - 1]);
            let denominator = field.sub(&xs[i], &xs[i - level]);
            table[i] = match field.div(&numerator, &denominator) {
                Ok(q) => q,
                Err(_) => {
                    log::warn!("Newton interpolation hit a zero divided-difference denominator (repeated point)");
                    return Err(ZpPolyError::RepeatedPoint);
                }
            };
        }
    }
    Ok(())
}

impl Interpolator for Newton {
    fn poly_type(&self) -> ZpPolyType {
        ZpPolyType::Newton
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
        let mut table: Vec<BigUint> = ys.to_vec();
        divided_differences(field, xs, &mut table)?;

        // P = c_{m-1}; P = P * (x - x_k) + c_k for k = m-2 .. 0
        let mut result = Polynomial::zero();
        for (k, c) in table.iter().enumerate().rev() {
            result = result
                .mul(field, &Polynomial::linear(field, &xs[k]))
                .add(field, &Polynomial::constant(c.clone()));
        }
        Ok(result)
    }
}
