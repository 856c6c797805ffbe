//! The `ZpPolyEngine` facade.
//!
//! The engine owns an immutable `FiniteField` and one interpolation strategy.
//! Every public operation validates its inputs eagerly, delegates the
//! unpadded work to the strategy and then applies degree padding, so all
//! strategies share the same output contract:
//!
//! - `interpolate(num, ..)` returns exactly `num` coefficients.
//! - `root_interpolate(num, ..)` returns exactly `num + 1` coefficients, monic.
//!
//! The engine holds no mutable state; one instance can serve many threads.

extern crate alloc;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use num_bigint::BigUint;
use rand_core::CryptoRngCore;

use crate::config::EngineConfig;
use crate::core::codec::{decode_elements, encode_elements};
use crate::core::zp::FiniteField;
use crate::polynomial::dense::Polynomial;
use crate::polynomial::fast::TreeFast;
use crate::polynomial::lagrange::NaiveLagrange;
use crate::polynomial::native::{Backend, NativeBackend};
use crate::polynomial::newton::Newton;
use crate::polynomial::padding::{pad_interpolation, pad_root_interpolation};
use crate::polynomial::{Interpolator, ZpPolyError, ZpPolyType};

/// Builds the in-process strategy for `poly_type`.
fn strategy_for(poly_type: ZpPolyType) -> Result<Box<dyn Interpolator>, ZpPolyError> {
    match poly_type {
        ZpPolyType::NaiveLagrange => Ok(Box::new(NaiveLagrange)),
        ZpPolyType::Newton => Ok(Box::new(Newton)),
        ZpPolyType::TreeFast => Ok(Box::new(TreeFast)),
        ZpPolyType::Native => Err(ZpPolyError::MissingBackend),
    }
}

/// Creates an engine for `poly_type` over the field of `l`-bit inputs.
pub fn new_engine(poly_type: ZpPolyType, l: usize) -> Result<ZpPolyEngine, ZpPolyError> {
    ZpPolyEngine::new(poly_type, l)
}

/// Interpolation and evaluation over Z_p with degree padding.
pub struct ZpPolyEngine {
    field: FiniteField,
    strategy: Box<dyn Interpolator>,
}

impl fmt::Debug for ZpPolyEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZpPolyEngine")
            .field("poly_type", &self.strategy.poly_type())
            .field("field", &self.field)
            .finish()
    }
}

impl ZpPolyEngine {
    /// Creates an engine whose modulus is the smallest prime above `2^l`.
    ///
    /// # Arguments
    /// * `poly_type` - Strategy. `Native` needs a backend, see `with_backend`.
    /// * `l` - Input bit length, a positive multiple of 8.
    ///
    /// # Returns
    /// * `Err(ZpPolyError::InvalidFieldBitLength)` for a bad `l`.
    /// * `Err(ZpPolyError::MissingBackend)` for `ZpPolyType::Native`.
    pub fn new(poly_type: ZpPolyType, l: usize) -> Result<Self, ZpPolyError> {
        let strategy = strategy_for(poly_type)?;
        let field = FiniteField::new(l)?;
        Ok(Self::with_strategy(field, strategy))
    }

    /// Creates an engine over an existing field, e.g. one built with
    /// `FiniteField::from_prime`.
    pub fn with_field(poly_type: ZpPolyType, field: FiniteField) -> Result<Self, ZpPolyError> {
        Ok(Self::with_strategy(field, strategy_for(poly_type)?))
    }

    /// Creates a `Native` engine around an injected backend.
    pub fn with_backend(backend: Box<dyn Backend>, l: usize) -> Result<Self, ZpPolyError> {
        let field = FiniteField::new(l)?;
        Ok(Self::with_strategy(field, Box::new(NativeBackend::new(backend))))
    }

    /// Creates an engine around any strategy.
    pub fn with_strategy(field: FiniteField, strategy: Box<dyn Interpolator>) -> Self {
        log::debug!(
            "ZpPolyEngine created: strategy {}, l = {}, prime of {} bits",
            strategy.poly_type(),
            field.l(),
            field.prime().bits()
        );
        Self { field, strategy }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ZpPolyError> {
        Self::new(config.poly_type, config.l)
    }

    pub fn poly_type(&self) -> ZpPolyType {
        self.strategy.poly_type()
    }

    /// Input bit length.
    pub fn l(&self) -> usize {
        self.field.l()
    }

    pub fn prime(&self) -> &BigUint {
        self.field.prime()
    }

    pub fn field(&self) -> &FiniteField {
        &self.field
    }

    /// Number of coefficients returned by `interpolate(num, ..)`.
    pub fn coefficient_num(&self, num: usize) -> Result<usize, ZpPolyError> {
        check_bound(num)?;
        Ok(num)
    }

    /// Number of coefficients returned by `root_interpolate(num, ..)`.
    pub fn root_coefficient_num(&self, num: usize) -> Result<usize, ZpPolyError> {
        check_bound(num)?;
        Ok(num + 1)
    }

    fn check_points(&self, values: &[BigUint]) -> Result<(), ZpPolyError> {
        if values.iter().all(|v| self.field.is_valid_point(v)) {
            Ok(())
        } else {
            Err(ZpPolyError::PointOutOfRange)
        }
    }

    fn check_coefficients(&self, coefficients: &[BigUint]) -> Result<(), ZpPolyError> {
        if coefficients.is_empty() {
            return Err(ZpPolyError::EmptyCoefficients);
        }
        if coefficients.iter().all(|c| self.field.is_element(c)) {
            Ok(())
        } else {
            Err(ZpPolyError::CoefficientOutOfRange)
        }
    }

    /// Fits a polynomial through `(xs[i], ys[i])` and pads it to `num` coefficients.
    ///
    /// With `m = xs.len() < num` the result is `P0 + M * Pr`, where `M`
    /// vanishes on `xs` and `Pr` has `num - m` random coefficients.
    ///
    /// # Arguments
    /// * `num` - Padding bound, `> 1` and `>= xs.len()`.
    /// * `xs`, `ys` - Points and values, each at most `l` bits.
    /// * `rng` - CSPRNG for the padding coefficients.
    ///
    /// # Returns
    /// * `Ok(coefficients)` - exactly `num` coefficients, lowest degree first.
    /// * `Err(ZpPolyError::RepeatedPoint)` if two `xs` coincide.
    pub fn interpolate(
        &self,
        num: usize,
        xs: &[BigUint],
        ys: &[BigUint],
        rng: &mut dyn CryptoRngCore,
    ) -> Result<Vec<BigUint>, ZpPolyError> {
        check_bound(num)?;
        if xs.len() != ys.len() {
            return Err(ZpPolyError::LengthMismatch);
        }
        if xs.len() > num {
            return Err(ZpPolyError::PointCountExceedsBound);
        }
        self.check_points(xs)?;
        self.check_points(ys)?;
        log::trace!("{} interpolate: {} points, bound {}", self.poly_type(), xs.len(), num);

        let base = self.strategy.interpolate(&self.field, xs, ys)?;
        if base.coefficients().len() > xs.len() {
            log::warn!("{} strategy returned a fit of degree >= {}", self.poly_type(), xs.len());
            return Err(ZpPolyError::BackendFailure);
        }
        Ok(pad_interpolation(&self.field, num, xs, base, rng))
    }

    /// Builds a monic polynomial of degree `num` equal to `y` on every point of `xs`.
    ///
    /// With no points the result is a uniformly random monic polynomial.
    ///
    /// # Returns
    /// * `Ok(coefficients)` - exactly `num + 1` coefficients, the last one `1`.
    pub fn root_interpolate(
        &self,
        num: usize,
        xs: &[BigUint],
        y: &BigUint,
        rng: &mut dyn CryptoRngCore,
    ) -> Result<Vec<BigUint>, ZpPolyError> {
        check_bound(num)?;
        if xs.len() > num {
            return Err(ZpPolyError::PointCountExceedsBound);
        }
        self.check_points(xs)?;
        if !self.field.is_valid_point(y) {
            return Err(ZpPolyError::PointOutOfRange);
        }
        log::trace!("{} root interpolate: {} points, bound {}", self.poly_type(), xs.len(), num);

        check_distinct(&self.field, self.strategy.as_ref(), xs)?;
        Ok(pad_root_interpolation(&self.field, num, xs, y, rng))
    }

    /// Evaluates the polynomial with `coefficients` (lowest degree first) at `x`.
    ///
    /// Goes through the strategy like a batch of one, so a `Native` engine
    /// still reaches its backend.
    pub fn evaluate(&self, coefficients: &[BigUint], x: &BigUint) -> Result<BigUint, ZpPolyError> {
        self.check_coefficients(coefficients)?;
        if !self.field.is_valid_point(x) {
            return Err(ZpPolyError::PointOutOfRange);
        }
        let poly = Polynomial::from_coefficients(coefficients.to_vec());
        let mut values = self.evaluate_checked(&poly, core::slice::from_ref(x))?;
        Ok(values.swap_remove(0))
    }

    /// Evaluates the polynomial at every point of `xs`, in order.
    pub fn evaluate_batch(&self, coefficients: &[BigUint], xs: &[BigUint]) -> Result<Vec<BigUint>, ZpPolyError> {
        self.check_coefficients(coefficients)?;
        self.check_points(xs)?;
        log::trace!("{} evaluate: {} coefficients at {} points", self.poly_type(), coefficients.len(), xs.len());
        let poly = Polynomial::from_coefficients(coefficients.to_vec());
        self.evaluate_checked(&poly, xs)
    }

    /// Runs the strategy's batch evaluation and checks it answered every point.
    fn evaluate_checked(&self, poly: &Polynomial, xs: &[BigUint]) -> Result<Vec<BigUint>, ZpPolyError> {
        let values = self.strategy.evaluate_many(&self.field, poly, xs)?;
        if values.len() != xs.len() {
            log::warn!("{} strategy returned {} values for {} points", self.poly_type(), values.len(), xs.len());
            return Err(ZpPolyError::BackendFailure);
        }
        Ok(values)
    }

    /// `interpolate` over fixed-width big-endian encodings.
    pub fn interpolate_bytes(
        &self,
        num: usize,
        xs: &[Vec<u8>],
        ys: &[Vec<u8>],
        rng: &mut dyn CryptoRngCore,
    ) -> Result<Vec<Vec<u8>>, ZpPolyError> {
        let width = self.field.byte_len();
        let xs = decode_elements(xs, width)?;
        let ys = decode_elements(ys, width)?;
        let coefficients = self.interpolate(num, &xs, &ys, rng)?;
        encode_elements(&coefficients, width)
    }

    /// `root_interpolate` over fixed-width big-endian encodings.
    pub fn root_interpolate_bytes(
        &self,
        num: usize,
        xs: &[Vec<u8>],
        y: &[u8],
        rng: &mut dyn CryptoRngCore,
    ) -> Result<Vec<Vec<u8>>, ZpPolyError> {
        let width = self.field.byte_len();
        let xs = decode_elements(xs, width)?;
        let y = decode_elements(&[y.to_vec()], width)?.swap_remove(0);
        let coefficients = self.root_interpolate(num, &xs, &y, rng)?;
        encode_elements(&coefficients, width)
    }

    /// `evaluate_batch` over fixed-width big-endian encodings.
    pub fn evaluate_bytes(&self, coefficients: &[Vec<u8>], xs: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, ZpPolyError> {
        let width = self.field.byte_len();
        let coefficients = decode_elements(coefficients, width)?;
        let xs = decode_elements(xs, width)?;
        let values = self.evaluate_batch(&coefficients, &xs)?;
        encode_elements(&values, width)
    }
}

fn check_bound(num: usize) -> Result<(), ZpPolyError> {
    if num <= 1 {
        Err(ZpPolyError::InvalidBound)
    } else {
        Ok(())
    }
}

/// Rejects repeated roots before building the root polynomial.
///
/// Interpolating the all-zero function through `xs` trips the strategy's own
/// zero-denominator check, so every strategy reports `RepeatedPoint` the
/// same way it does for `interpolate`.
fn check_distinct(field: &FiniteField, strategy: &dyn Interpolator, xs: &[BigUint]) -> Result<(), ZpPolyError> {
    if xs.len() < 2 {
        return Ok(());
    }
    let zeros = alloc::vec![field.zero(); xs.len()];
    strategy.interpolate(field, xs, &zeros).map(|_| ())
}
