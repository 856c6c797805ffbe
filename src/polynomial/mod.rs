//! Polynomial interpolation and evaluation over Z_p.
//!
//! This module implements the interpolation engine used by the PSI, PIR and
//! OKVS layers of the MPC suite.
//!
//! # Components
//! - `dense`: dense coefficient-vector polynomials.
//! - `tree`: the subproduct tree (fast multipoint evaluation and interpolation).
//! - `padding`: degree padding that hides the real number of points.
//! - `lagrange`, `newton`, `fast`, `native`: interchangeable interpolation strategies.
//! - `engine`: the `ZpPolyEngine` facade that validates inputs, dispatches to a
//!   strategy and applies padding.
//!
//! # Security
//! - **Padding**: Outputs of `interpolate` and `root_interpolate` always have a
//!   fixed length, and the padding coefficients are uniformly random. Callers
//!   must supply a cryptographically secure RNG; the `CryptoRngCore` bound
//!   enforces the marker but not the quality of the source.
//! - **Logging**: Point and coefficient values are never logged.

pub mod dense;
pub mod engine;
pub mod fast;
pub mod lagrange;
pub mod native;
pub mod newton;
pub mod padding;
pub mod tree;

extern crate alloc;
use alloc::vec::Vec;
use core::fmt;

use num_bigint::BigUint;

use crate::core::zp::FiniteField;
use dense::Polynomial;

/// Errors for polynomial operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZpPolyError {
    /// Field bit length is zero or not a multiple of 8.
    InvalidFieldBitLength,
    /// Modulus is not an odd prime.
    InvalidModulus,
    /// A point or value exceeds the field bit length `l`.
    PointOutOfRange,
    /// More points than the padding bound `num`.
    PointCountExceedsBound,
    /// Padding bound `num` must be greater than 1.
    InvalidBound,
    /// x and y arrays have different lengths.
    LengthMismatch,
    /// Two interpolation points share the same x.
    RepeatedPoint,
    /// Inversion of zero.
    DivisionByZero,
    /// Polynomial division by a divisor whose leading coefficient is not 1.
    DivisionByNonMonic,
    /// An evaluation coefficient is not a reduced field element.
    CoefficientOutOfRange,
    /// Evaluation needs at least one coefficient.
    EmptyCoefficients,
    /// `ZpPolyType::Native` requested without an injected backend.
    MissingBackend,
    /// The native backend failed or returned malformed output.
    BackendFailure,
    /// A byte string is not exactly the fixed element width.
    InvalidEncoding,
}

impl fmt::Display for ZpPolyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZpPolyError::InvalidFieldBitLength => write!(f, "Field bit length must be a positive multiple of 8"),
            ZpPolyError::InvalidModulus => write!(f, "Modulus is not an odd prime"),
            ZpPolyError::PointOutOfRange => write!(f, "Point exceeds the field bit length"),
            ZpPolyError::PointCountExceedsBound => write!(f, "Number of points exceeds the padding bound"),
            ZpPolyError::InvalidBound => write!(f, "Padding bound must be greater than 1"),
            ZpPolyError::LengthMismatch => write!(f, "x and y arrays differ in length"),
            ZpPolyError::RepeatedPoint => write!(f, "Repeated interpolation point"),
            ZpPolyError::DivisionByZero => write!(f, "Division by zero"),
            ZpPolyError::DivisionByNonMonic => write!(f, "Divisor is not monic"),
            ZpPolyError::CoefficientOutOfRange => write!(f, "Coefficient is not a field element"),
            ZpPolyError::EmptyCoefficients => write!(f, "No coefficients to evaluate"),
            ZpPolyError::MissingBackend => write!(f, "Native strategy requires a backend"),
            ZpPolyError::BackendFailure => write!(f, "Native backend failure"),
            ZpPolyError::InvalidEncoding => write!(f, "Encoded element is not the fixed width"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ZpPolyError {}

/// Interpolation strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZpPolyType {
    /// Direct Lagrange formula, O(m^2).
    NaiveLagrange,
    /// Newton divided differences, O(m^2).
    Newton,
    /// Subproduct tree, O(m log^2 m) multiplication work.
    TreeFast,
    /// External backend reached through the fixed-width byte encoding.
    Native,
}

impl ZpPolyType {
    pub fn name(&self) -> &'static str {
        match self {
            ZpPolyType::NaiveLagrange => "NAIVE_LAGRANGE",
            ZpPolyType::Newton => "NEWTON",
            ZpPolyType::TreeFast => "TREE_FAST",
            ZpPolyType::Native => "NATIVE",
        }
    }
}

impl fmt::Display for ZpPolyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An interpolation strategy.
///
/// Strategies only solve the unpadded problem: fit the polynomial of degree
/// `< m` through `m` points, and evaluate a polynomial at many points. Input
/// validation and degree padding live in the engine so that every strategy
/// shares them.
pub trait Interpolator: Send + Sync {
    /// Strategy identifier.
    fn poly_type(&self) -> ZpPolyType;

    /// Fits the unique polynomial of degree `< xs.len()` through `(xs[i], ys[i])`.
    ///
    /// Inputs are already validated and reduced. An empty point set yields the
    /// zero polynomial.
    ///
    /// # Returns
    /// * `Err(ZpPolyError::RepeatedPoint)` if two `xs` coincide.
    fn interpolate(
        &self,
        field: &FiniteField,
        xs: &[BigUint],
        ys: &[BigUint],
    ) -> Result<Polynomial, ZpPolyError>;

    /// Evaluates `poly` at every point of `xs`, in order.
    fn evaluate_many(
        &self,
        field: &FiniteField,
        poly: &Polynomial,
        xs: &[BigUint],
    ) -> Result<Vec<BigUint>, ZpPolyError> {
        Ok(xs.iter().map(|x| poly.evaluate(field, x)).collect())
    }
}
