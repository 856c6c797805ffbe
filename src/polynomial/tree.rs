//! Subproduct tree over a point set.
//!
//! The tree is a complete binary tree stored in an array: node `i` has
//! children `2i + 1` and `2i + 2`, and the `leaf_num = next_pow2(max(1, m))`
//! leaves occupy indices `leaf_num - 1 .. 2 * leaf_num - 1`. Leaf `j` holds
//! `x - x_j` for a real point and the constant `1` for padding, and every
//! internal node holds the product of its children. Every node is therefore
//! monic, and a node equals `1` exactly when no real point lies below it.
//!
//! The tree supports remainder-tree multipoint evaluation and interpolation
//! through the derivative of the root polynomial. With the `parallel` feature
//! each level is built in parallel and sibling subtrees are walked with
//! `rayon::join`.
//!
//! Reference: Pinkas, Rosulek, Trieu, Yanai. SpOT-light: Lightweight private set
//! intersection from sparse OT extension. CRYPTO 2019, Appendix C.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use num_bigint::BigUint;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::zp::FiniteField;
use crate::polynomial::dense::Polynomial;
use crate::polynomial::ZpPolyError;

#[inline]
fn left_child(index: usize) -> usize {
    (index << 1) + 1
}

#[inline]
fn right_child(index: usize) -> usize {
    (index << 1) + 2
}

/// Runs both closures, on the rayon pool when `parallel` is enabled.
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "parallel")]
    {
        rayon::join(a, b)
    }
    #[cfg(not(feature = "parallel"))]
    {
        (a(), b())
    }
}

/// Array-backed subproduct tree.
#[derive(Debug, Clone)]
pub struct SubproductTree {
    nodes: Vec<Polynomial>,
    leaf_num: usize,
    point_num: usize,
}

impl SubproductTree {
    /// Builds the tree over `points` bottom-up.
    pub fn build(field: &FiniteField, points: &[BigUint]) -> Self {
        let leaf_num = points.len().max(1).next_power_of_two();
        let mut nodes = vec![Polynomial::one(); 2 * leaf_num - 1];
        for (j, point) in points.iter().enumerate() {
            nodes[leaf_num - 1 + j] = Polynomial::linear(field, point);
        }

        // Level k holds nodes 2^k - 1 .. 2^(k+1) - 1; the leaves are level log2(leaf_num).
        let mut level_len = leaf_num >> 1;
        while level_len > 0 {
            let start = level_len - 1;
            let (upper, lower) = nodes.split_at_mut(2 * level_len - 1);
            let lower = &*lower;
            let lower_start = 2 * level_len - 1;
            let level = &mut upper[start..];
            let build = |(offset, slot): (usize, &mut Polynomial)| {
                let index = start + offset;
                let left = &lower[left_child(index) - lower_start];
                let right = &lower[right_child(index) - lower_start];
                *slot = left.mul(field, right);
            };
            #[cfg(feature = "parallel")]
            level.par_iter_mut().enumerate().for_each(build);
            #[cfg(not(feature = "parallel"))]
            level.iter_mut().enumerate().for_each(build);
            level_len >>= 1;
        }

        Self { nodes, leaf_num, point_num: points.len() }
    }

    /// The root polynomial `prod (x - x_i)`.
    pub fn root(&self) -> &Polynomial {
        &self.nodes[0]
    }

    pub fn node(&self, index: usize) -> &Polynomial {
        &self.nodes[index]
    }

    /// Total node count, `2 * leaf_num - 1`.
    pub fn node_num(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_num(&self) -> usize {
        self.leaf_num
    }

    pub fn point_num(&self) -> usize {
        self.point_num
    }

    #[inline]
    fn is_leaf(&self, index: usize) -> bool {
        index >= self.leaf_num - 1
    }

    /// Point index held by a leaf, `None` for padding leaves.
    #[inline]
    fn leaf_point(&self, index: usize) -> Option<usize> {
        let j = index + 1 - self.leaf_num;
        (j < self.point_num).then_some(j)
    }

    /// Evaluates `poly` at every point of the tree, in point order.
    ///
    /// Walks the remainder tree top-down. A node only divides when the incoming
    /// remainder is not already smaller than the node polynomial, so a
    /// low-degree input simply flows down to the leaves.
    pub fn evaluate(&self, field: &FiniteField, poly: &Polynomial) -> Vec<BigUint> {
        self.descend(field, poly, 0)
    }

    fn descend(&self, field: &FiniteField, poly: &Polynomial, index: usize) -> Vec<BigUint> {
        let divisor = &self.nodes[index];
        // constant 1: no real point below
        if divisor.degree() == Some(0) {
            return Vec::new();
        }
        let remainder = if poly.degree() >= divisor.degree() {
            poly.rem_monic(field, divisor)
        } else {
            poly.clone()
        };
        if self.is_leaf(index) {
            return match self.leaf_point(index) {
                Some(_) => vec![remainder.coefficient(0)],
                None => Vec::new(),
            };
        }
        let (mut left, right) = join(
            || self.descend(field, &remainder, left_child(index)),
            || self.descend(field, &remainder, right_child(index)),
        );
        left.extend(right);
        left
    }

    /// Interpolates the polynomial of degree `< m` taking `values[i]` at point `i`.
    ///
    /// Computes the barycentric weights `values[i] / M'(x_i)` with `M` the root,
    /// then combines bottom-up: a node returns
    /// `left * tree[right] + right * tree[left]`. Padding leaves contribute zero.
    ///
    /// # Returns
    /// * `Err(ZpPolyError::LengthMismatch)` if `values` does not match the point count.
    /// * `Err(ZpPolyError::RepeatedPoint)` if some `M'(x_i) = 0`, i.e. a repeated point.
    pub fn interpolate(&self, field: &FiniteField, values: &[BigUint]) -> Result<Polynomial, ZpPolyError> {
        if values.len() != self.point_num {
            return Err(ZpPolyError::LengthMismatch);
        }
        let derivative = self.root().derivative(field);
        let denominators = self.evaluate(field, &derivative);
        let weights = denominators
            .iter()
            .zip(values)
            .map(|(d, y)| match field.inv(d) {
                Ok(inv) => Ok(field.mul(y, &inv)),
                Err(_) => {
                    log::warn!("Subproduct tree interpolation hit a zero derivative (repeated point)");
                    Err(ZpPolyError::RepeatedPoint)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.combine(field, &weights, 0))
    }

    fn combine(&self, field: &FiniteField, weights: &[BigUint], index: usize) -> Polynomial {
        if self.nodes[index].degree() == Some(0) {
            return Polynomial::zero();
        }
        if self.is_leaf(index) {
            return match self.leaf_point(index) {
                Some(j) => Polynomial::constant(weights[j].clone()),
                None => Polynomial::zero(),
            };
        }
        let l = left_child(index);
        let r = right_child(index);
        let (left, right) = join(
            || self.combine(field, weights, l),
            || self.combine(field, weights, r),
        );
        left.mul(field, &self.nodes[r]).add(field, &right.mul(field, &self.nodes[l]))
    }
}

/// Evaluates `poly` at `points` through a freshly built subproduct tree.
pub fn evaluate_many(field: &FiniteField, poly: &Polynomial, points: &[BigUint]) -> Vec<BigUint> {
    SubproductTree::build(field, points).evaluate(field, poly)
}

/// Fast interpolation through `(xs[i], ys[i])`.
pub fn interpolate_tree(field: &FiniteField, xs: &[BigUint], ys: &[BigUint]) -> Result<Polynomial, ZpPolyError> {
    SubproductTree::build(field, xs).interpolate(field, ys)
}

/// The vanishing polynomial `prod (x - x_i)`; `1` for an empty set.
pub fn vanishing_polynomial(field: &FiniteField, xs: &[BigUint]) -> Polynomial {
    SubproductTree::build(field, xs).nodes.swap_remove(0)
}
