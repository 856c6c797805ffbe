//! Native backend adapter.
//!
//! A `Backend` is an external interpolation engine (for example a C library
//! behind FFI) that speaks only fixed-width byte strings. `NativeBackend`
//! translates between field elements and that byte contract, and checks every
//! reply before it reaches the engine.
//!
//! # Byte contract
//! - Every element, including the prime, is big-endian and zero-left-padded to
//!   `ceil(bits(p) / 8)` bytes.
//! - `interpolate` returns the `m` coefficients of the unpadded fit, lowest
//!   degree first.
//! - `evaluate` returns one value per point, in point order.

extern crate alloc;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use num_bigint::BigUint;

use crate::core::codec::{decode_element, encode_element, encode_elements};
use crate::core::zp::FiniteField;
use crate::polynomial::dense::Polynomial;
use crate::polynomial::{Interpolator, ZpPolyError, ZpPolyType};

/// Failures reported by a native backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendError {
    /// Two interpolation points coincide.
    RepeatedPoint,
    /// The backend rejected its input.
    InvalidInput,
    /// Any other failure inside the backend.
    Internal,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::RepeatedPoint => write!(f, "Backend detected a repeated point"),
            BackendError::InvalidInput => write!(f, "Backend rejected its input"),
            BackendError::Internal => write!(f, "Backend internal error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BackendError {}

impl From<BackendError> for ZpPolyError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::RepeatedPoint => ZpPolyError::RepeatedPoint,
            BackendError::InvalidInput | BackendError::Internal => ZpPolyError::BackendFailure,
        }
    }
}

/// External interpolation engine over fixed-width byte strings.
pub trait Backend: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Fits the polynomial of degree `< xs.len()` through `(xs[i], ys[i])`.
    fn interpolate(&self, prime: &[u8], xs: &[Vec<u8>], ys: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, BackendError>;

    /// Evaluates the polynomial with the given coefficients at every point.
    fn evaluate(&self, prime: &[u8], coefficients: &[Vec<u8>], xs: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, BackendError>;
}

/// Strategy that delegates to an injected `Backend`.
pub struct NativeBackend {
    backend: Box<dyn Backend>,
}

impl fmt::Debug for NativeBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBackend").field("backend", &self.backend.name()).finish()
    }
}

impl NativeBackend {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Checks a backend reply: `expected` entries, each exactly `byte_len`
    /// bytes wide and a reduced element.
    fn decode_reply(
        &self,
        field: &FiniteField,
        reply: Vec<Vec<u8>>,
        expected: usize,
    ) -> Result<Vec<BigUint>, ZpPolyError> {
        if reply.len() != expected {
            log::warn!(
                "Native backend {} returned {} elements, expected {}",
                self.backend.name(),
                reply.len(),
                expected
            );
            return Err(ZpPolyError::BackendFailure);
        }
        let mut values = Vec::with_capacity(expected);
        for bytes in &reply {
            if bytes.len() != field.byte_len() {
                log::warn!("Native backend {} returned an element of the wrong width", self.backend.name());
                return Err(ZpPolyError::BackendFailure);
            }
            let value = decode_element(bytes);
            if !field.is_element(&value) {
                log::warn!("Native backend {} returned an unreduced element", self.backend.name());
                return Err(ZpPolyError::BackendFailure);
            }
            values.push(value);
        }
        Ok(values)
    }
}

impl Interpolator for NativeBackend {
    fn poly_type(&self) -> ZpPolyType {
        ZpPolyType::Native
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
        let width = field.byte_len();
        let prime = encode_element(field.prime(), width)?;
        let x_bytes = encode_elements(xs, width)?;
        let y_bytes = encode_elements(ys, width)?;
        let reply = self.backend.interpolate(&prime, &x_bytes, &y_bytes).map_err(|e| {
            log::warn!("Native backend {} interpolation failed: {}", self.backend.name(), e);
            ZpPolyError::from(e)
        })?;
        let coefficients = self.decode_reply(field, reply, xs.len())?;
        Ok(Polynomial::from_coefficients(coefficients))
    }

    fn evaluate_many(
        &self,
        field: &FiniteField,
        poly: &Polynomial,
        xs: &[BigUint],
    ) -> Result<Vec<BigUint>, ZpPolyError> {
        if xs.is_empty() {
            return Ok(Vec::new());
        }
        let width = field.byte_len();
        let prime = encode_element(field.prime(), width)?;
        // the zero polynomial still crosses the boundary as one coefficient
        let coefficients = poly.to_padded_coefficients(poly.coefficients().len().max(1));
        let c_bytes = encode_elements(&coefficients, width)?;
        let x_bytes = encode_elements(xs, width)?;
        let reply = self.backend.evaluate(&prime, &c_bytes, &x_bytes).map_err(|e| {
            log::warn!("Native backend {} evaluation failed: {}", self.backend.name(), e);
            ZpPolyError::from(e)
        })?;
        self.decode_reply(field, reply, xs.len())
    }
}
