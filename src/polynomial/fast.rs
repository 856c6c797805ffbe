//! Subproduct-tree strategy.
//!
//! Interpolation goes through `tree::interpolate_tree`. Batched evaluation
//! splits the points into chunks whose size is the largest power of two not
//! exceeding the polynomial degree; a short trailing chunk is filled with dummy
//! zero points whose values are dropped.

extern crate alloc;
use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::core::zp::FiniteField;
use crate::polynomial::dense::Polynomial;
use crate::polynomial::tree::{interpolate_tree, SubproductTree};
use crate::polynomial::{Interpolator, ZpPolyError, ZpPolyType};

/// Fast O(m log^2 m) strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeFast;

/// Batch size for tree evaluation of a polynomial of `degree >= 1`: the
/// largest power of two `<= degree`.
pub(crate) fn batch_size(degree: usize) -> usize {
    debug_assert!(degree >= 1);
    1 << (usize::BITS - 1 - degree.leading_zeros())
}

impl Interpolator for TreeFast {
    fn poly_type(&self) -> ZpPolyType {
        ZpPolyType::TreeFast
    }

    fn interpolate(
        &self,
        field: &FiniteField,
        xs: &[BigUint],
        ys: &[BigUint],
    ) -> Result<Polynomial, ZpPolyError> {
        interpolate_tree(field, xs, ys)
    }

    fn evaluate_many(
        &self,
        field: &FiniteField,
        poly: &Polynomial,
        xs: &[BigUint],
    ) -> Result<Vec<BigUint>, ZpPolyError> {
        let degree = match poly.degree() {
            Some(d) if d >= 1 && xs.len() > 1 => d,
            // constants and single points need no tree
            _ => return Ok(xs.iter().map(|x| poly.evaluate(field, x)).collect()),
        };
        let chunk = batch_size(degree);
        log::trace!("Tree evaluation of degree {} at {} points in chunks of {}", degree, xs.len(), chunk);

        let mut values = Vec::with_capacity(xs.len());
        for points in xs.chunks(chunk) {
            if points.len() == chunk {
                values.extend(SubproductTree::build(field, points).evaluate(field, poly));
            } else {
                let mut padded = points.to_vec();
                padded.resize(chunk, BigUint::zero());
                let chunk_values = SubproductTree::build(field, &padded).evaluate(field, poly);
                values.extend(chunk_values.into_iter().take(points.len()));
            }
        }
        Ok(values)
    }
}
