//! Degree padding.
//!
//! Interpolation outputs are padded to a caller-chosen bound `num` so that the
//! coefficient vector does not reveal how many real points `m <= num` it encodes.
//!
//! - Interpolation: `P0 + P1 * Pr`, where `P0` fits the real points, `P1` vanishes
//!   on them and `Pr` has `num - m` uniformly random coefficients. The result
//!   has `num` coefficients and still passes through every real point.
//! - Root interpolation: `M * Pad + y`, where `M` vanishes on the real points
//!   and `Pad` is a random monic polynomial of degree `num - m`. The result is
//!   monic of degree `num` and takes the value `y` on every real point.
//!
//! # Security
//! - **Indistinguishability**: padding coefficients are uniform only if the
//!   RNG is a CSPRNG. That is a caller obligation.

extern crate alloc;
use alloc::vec::Vec;

use num_bigint::BigUint;
use num_traits::One;
use rand_core::CryptoRngCore;

use crate::core::zp::FiniteField;
use crate::polynomial::dense::Polynomial;
use crate::polynomial::tree::vanishing_polynomial;

/// Polynomial with `len` uniformly random coefficients (degree `< len`).
pub fn random_polynomial(field: &FiniteField, len: usize, rng: &mut dyn CryptoRngCore) -> Polynomial {
    Polynomial::from_coefficients((0..len).map(|_| field.random_element(rng)).collect())
}

/// Monic polynomial of exactly `degree` with uniformly random lower coefficients.
pub fn random_monic(field: &FiniteField, degree: usize, rng: &mut dyn CryptoRngCore) -> Polynomial {
    let mut coefficients: Vec<BigUint> = (0..degree).map(|_| field.random_element(rng)).collect();
    coefficients.push(BigUint::one());
    Polynomial::from_coefficients(coefficients)
}

/// Pads an interpolated polynomial `base` (degree `< xs.len()`) to exactly `num` coefficients.
///
/// # Arguments
/// * `num` - Padding bound; `xs.len() <= num` is checked by the caller.
/// * `xs` - The real points `base` was fitted through.
/// * `base` - The unpadded interpolation polynomial.
pub fn pad_interpolation(
    field: &FiniteField,
    num: usize,
    xs: &[BigUint],
    base: Polynomial,
    rng: &mut dyn CryptoRngCore,
) -> Vec<BigUint> {
    let m = xs.len();
    if m == num {
        return base.to_padded_coefficients(num);
    }
    log::trace!("Padding interpolation with {} dummy coefficients", num - m);
    let vanishing = vanishing_polynomial(field, xs);
    let pr = random_polynomial(field, num - m, rng);
    base.add(field, &vanishing.mul(field, &pr)).to_padded_coefficients(num)
}

/// Builds the padded root polynomial: exactly `num + 1` coefficients, monic of
/// degree `num`, equal to `y` on every point of `xs`.
///
/// With no points the result is a uniformly random monic polynomial.
pub fn pad_root_interpolation(
    field: &FiniteField,
    num: usize,
    xs: &[BigUint],
    y: &BigUint,
    rng: &mut dyn CryptoRngCore,
) -> Vec<BigUint> {
    if xs.is_empty() {
        return random_monic(field, num, rng).to_padded_coefficients(num + 1);
    }
    let mut polynomial = vanishing_polynomial(field, xs);
    if xs.len() < num {
        log::trace!("Padding root polynomial with a monic factor of degree {}", num - xs.len());
        polynomial = polynomial.mul(field, &random_monic(field, num - xs.len(), rng));
    }
    polynomial
        .add(field, &Polynomial::constant(field.reduce(y)))
        .to_padded_coefficients(num + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::tree::interpolate_tree;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field() -> FiniteField {
        FiniteField::from_prime(BigUint::from(257u32)).unwrap()
    }

    fn nums(values: &[u32]) -> Vec<BigUint> {
        values.iter().map(|&v| BigUint::from(v)).collect()
    }

    #[test]
    fn test_random_monic() {
        let f = field();
        let mut rng = StdRng::seed_from_u64(1);
        let p = random_monic(&f, 5, &mut rng);
        assert_eq!(p.degree(), Some(5));
        assert!(p.is_monic());
        assert_eq!(random_monic(&f, 0, &mut rng), Polynomial::one());
    }

    #[test]
    fn test_pad_interpolation_keeps_points() {
        let f = field();
        let mut rng = StdRng::seed_from_u64(2);
        let xs = nums(&[1, 2]);
        let ys = nums(&[3, 5]);
        let base = interpolate_tree(&f, &xs, &ys).unwrap();
        let coeffs = pad_interpolation(&f, 4, &xs, base, &mut rng);
        assert_eq!(coeffs.len(), 4);
        let p = Polynomial::from_coefficients(coeffs);
        assert_eq!(p.evaluate(&f, &xs[0]), ys[0]);
        assert_eq!(p.evaluate(&f, &xs[1]), ys[1]);
    }

    #[test]
    fn test_pad_interpolation_full() {
        let f = field();
        let mut rng = StdRng::seed_from_u64(3);
        let xs = nums(&[1, 2, 3]);
        let base = interpolate_tree(&f, &xs, &nums(&[5, 7, 9])).unwrap();
        // no padding: 3 + 2x zero-extended
        assert_eq!(pad_interpolation(&f, 3, &xs, base, &mut rng), nums(&[3, 2, 0]));
    }

    #[test]
    fn test_pad_interpolation_no_points() {
        let f = field();
        let mut rng = StdRng::seed_from_u64(4);
        let coeffs = pad_interpolation(&f, 6, &[], Polynomial::zero(), &mut rng);
        assert_eq!(coeffs.len(), 6);
    }

    #[test]
    fn test_pad_root_interpolation() {
        let f = field();
        let mut rng = StdRng::seed_from_u64(5);
        let xs = nums(&[10, 20, 30]);
        let y = BigUint::from(77u32);
        for num in [3usize, 4, 8] {
            let coeffs = pad_root_interpolation(&f, num, &xs, &y, &mut rng);
            assert_eq!(coeffs.len(), num + 1);
            assert!(coeffs[num] == BigUint::one());
            let p = Polynomial::from_coefficients(coeffs);
            for x in &xs {
                assert_eq!(p.evaluate(&f, x), y);
            }
        }
    }

    #[test]
    fn test_pad_root_interpolation_empty() {
        let f = field();
        let mut rng = StdRng::seed_from_u64(6);
        let coeffs = pad_root_interpolation(&f, 5, &[], &BigUint::from(1u32), &mut rng);
        assert_eq!(coeffs.len(), 6);
        assert_eq!(coeffs[5], BigUint::one());
    }
}
