//! End-to-end tests across every interpolation strategy.

use std::collections::BTreeSet;

use mpc_zp_poly::core::codec::{decode_element, decode_elements, encode_elements};
use mpc_zp_poly::polynomial::dense::Polynomial;
use mpc_zp_poly::polynomial::tree::interpolate_tree;
use mpc_zp_poly::{Backend, BackendError, FiniteField, ZpPolyEngine, ZpPolyError, ZpPolyType};
use num_bigint::BigUint;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_core::OsRng;

const DEFAULT_NUM: usize = 20;
const BIT_LENGTHS: [usize; 5] = [40, 48, 128, 120, 136];
const IN_PROCESS: [ZpPolyType; 3] = [ZpPolyType::NaiveLagrange, ZpPolyType::Newton, ZpPolyType::TreeFast];

fn nums(values: &[u32]) -> Vec<BigUint> {
    values.iter().map(|&v| BigUint::from(v)).collect()
}

/// `count` distinct random `l`-bit integers.
fn random_points(rng: &mut StdRng, l: usize, count: usize) -> Vec<BigUint> {
    let mut seen = BTreeSet::new();
    let mut points = Vec::with_capacity(count);
    while points.len() < count {
        let mut bytes = vec![0u8; l / 8];
        rng.fill(&mut bytes[..]);
        let point = BigUint::from_bytes_be(&bytes);
        if seen.insert(point.clone()) {
            points.push(point);
        }
    }
    points
}

/// Backend that serves the byte contract with the in-crate subproduct tree.
struct TreeBackend;

impl TreeBackend {
    fn field(prime: &[u8]) -> Result<FiniteField, BackendError> {
        FiniteField::from_prime(decode_element(prime)).map_err(|_| BackendError::InvalidInput)
    }
}

impl Backend for TreeBackend {
    fn name(&self) -> &'static str {
        "tree"
    }

    fn interpolate(&self, prime: &[u8], xs: &[Vec<u8>], ys: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, BackendError> {
        let field = Self::field(prime)?;
        let xs = decode_elements(xs, prime.len()).map_err(|_| BackendError::InvalidInput)?;
        let ys = decode_elements(ys, prime.len()).map_err(|_| BackendError::InvalidInput)?;
        let poly = interpolate_tree(&field, &xs, &ys).map_err(|e| match e {
            ZpPolyError::RepeatedPoint => BackendError::RepeatedPoint,
            _ => BackendError::Internal,
        })?;
        encode_elements(&poly.to_padded_coefficients(xs.len()), prime.len()).map_err(|_| BackendError::Internal)
    }

    fn evaluate(&self, prime: &[u8], coefficients: &[Vec<u8>], xs: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, BackendError> {
        let field = Self::field(prime)?;
        let poly = Polynomial::from_coefficients(
            decode_elements(coefficients, prime.len()).map_err(|_| BackendError::InvalidInput)?,
        );
        let xs = decode_elements(xs, prime.len()).map_err(|_| BackendError::InvalidInput)?;
        let values: Vec<BigUint> = xs.iter().map(|x| poly.evaluate(&field, x)).collect();
        encode_elements(&values, prime.len()).map_err(|_| BackendError::Internal)
    }
}

fn all_engines(l: usize) -> Vec<ZpPolyEngine> {
    let mut engines: Vec<ZpPolyEngine> = IN_PROCESS.iter().map(|&t| ZpPolyEngine::new(t, l).unwrap()).collect();
    engines.push(ZpPolyEngine::with_backend(Box::new(TreeBackend), l).unwrap());
    engines
}

fn check_interpolate(engine: &ZpPolyEngine, rng: &mut StdRng, num: usize, m: usize) {
    let l = engine.l();
    let xs = random_points(rng, l, m);
    let ys = random_points(rng, l, m);
    let coeffs = engine.interpolate(num, &xs, &ys, rng).unwrap();
    assert_eq!(coeffs.len(), num, "{} l = {} m = {}", engine.poly_type(), l, m);
    assert_eq!(engine.evaluate_batch(&coeffs, &xs).unwrap(), ys, "{} l = {} m = {}", engine.poly_type(), l, m);
    for (x, y) in xs.iter().zip(&ys) {
        assert_eq!(&engine.evaluate(&coeffs, x).unwrap(), y);
    }
}

fn check_root_interpolate(engine: &ZpPolyEngine, rng: &mut StdRng, num: usize, m: usize) {
    let l = engine.l();
    let xs = random_points(rng, l, m);
    let y = random_points(rng, l, 1).remove(0);
    let coeffs = engine.root_interpolate(num, &xs, &y, rng).unwrap();
    assert_eq!(coeffs.len(), num + 1);
    assert_eq!(coeffs[num], BigUint::from(1u32), "{} l = {} m = {}", engine.poly_type(), l, m);
    assert_eq!(engine.evaluate_batch(&coeffs, &xs).unwrap(), vec![y; m]);
}

#[test]
fn test_interpolate_all_strategies() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for l in BIT_LENGTHS {
        for engine in all_engines(l) {
            for m in [0, 1, DEFAULT_NUM / 2, DEFAULT_NUM] {
                check_interpolate(&engine, &mut rng, DEFAULT_NUM, m);
            }
        }
    }
}

#[test]
fn test_root_interpolate_all_strategies() {
    let mut rng = StdRng::seed_from_u64(0xf00d);
    for l in BIT_LENGTHS {
        for engine in all_engines(l) {
            for m in [0, 1, DEFAULT_NUM / 2, DEFAULT_NUM] {
                check_root_interpolate(&engine, &mut rng, DEFAULT_NUM, m);
            }
        }
    }
}

#[test]
fn test_cross_strategy_agreement() {
    let field = FiniteField::from_prime(BigUint::from(257u32)).unwrap();
    let mut outputs = Vec::new();
    for poly_type in IN_PROCESS {
        let engine = ZpPolyEngine::with_field(poly_type, field.clone()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        outputs.push(engine.interpolate(3, &nums(&[1, 2, 3]), &nums(&[5, 7, 9]), &mut rng).unwrap());
    }
    assert_eq!(outputs[0], nums(&[3, 2, 0]));
    assert!(outputs.iter().all(|o| o == &outputs[0]));
}

#[test]
fn test_padded_outputs_agree_under_same_randomness() {
    let mut results = Vec::new();
    for engine in all_engines(48) {
        let mut rng = StdRng::seed_from_u64(77);
        let xs = random_points(&mut rng, 48, 7);
        let ys = random_points(&mut rng, 48, 7);
        results.push(engine.interpolate(DEFAULT_NUM, &xs, &ys, &mut rng).unwrap());
    }
    assert!(results.iter().all(|r| r == &results[0]));
}

#[test]
fn test_toy_field_padding_is_fresh() {
    let field = FiniteField::from_prime(BigUint::from(257u32)).unwrap();
    let engine = ZpPolyEngine::with_field(ZpPolyType::TreeFast, field).unwrap();
    let xs = nums(&[1, 2]);
    let ys = nums(&[3, 5]);
    let mut padding = BTreeSet::new();
    for _ in 0..8 {
        let coeffs = engine.interpolate(4, &xs, &ys, &mut OsRng).unwrap();
        assert_eq!(coeffs.len(), 4);
        assert_eq!(engine.evaluate(&coeffs, &xs[0]).unwrap(), ys[0]);
        assert_eq!(engine.evaluate(&coeffs, &xs[1]).unwrap(), ys[1]);
        padding.insert((coeffs[2].clone(), coeffs[3].clone()));
    }
    assert!(padding.len() > 1);
}

#[test]
fn test_repeated_points_rejected() {
    let mut rng = StdRng::seed_from_u64(3);
    for engine in all_engines(40) {
        let xs = nums(&[10, 20, 10]);
        assert_eq!(
            engine.interpolate(DEFAULT_NUM, &xs, &nums(&[1, 2, 3]), &mut rng),
            Err(ZpPolyError::RepeatedPoint),
            "{}",
            engine.poly_type()
        );
        assert_eq!(
            engine.root_interpolate(DEFAULT_NUM, &xs, &BigUint::from(5u32), &mut rng),
            Err(ZpPolyError::RepeatedPoint),
            "{}",
            engine.poly_type()
        );
    }
}

#[test]
fn test_invalid_inputs() {
    let mut rng = StdRng::seed_from_u64(4);
    for l in [0usize, 7, 33] {
        assert_eq!(ZpPolyEngine::new(ZpPolyType::TreeFast, l).unwrap_err(), ZpPolyError::InvalidFieldBitLength);
    }
    let engine = ZpPolyEngine::new(ZpPolyType::TreeFast, 40).unwrap();
    let too_wide = BigUint::from(1u64 << 40);
    assert_eq!(
        engine.interpolate(4, &[too_wide.clone()], &nums(&[1]), &mut rng),
        Err(ZpPolyError::PointOutOfRange)
    );
    assert_eq!(
        engine.root_interpolate(4, &nums(&[1]), &too_wide, &mut rng),
        Err(ZpPolyError::PointOutOfRange)
    );
    assert_eq!(
        engine.root_interpolate(2, &nums(&[1, 2, 3]), &BigUint::from(0u32), &mut rng),
        Err(ZpPolyError::PointCountExceedsBound)
    );
    assert_eq!(engine.evaluate_batch(&[], &nums(&[1])), Err(ZpPolyError::EmptyCoefficients));
    assert_eq!(
        engine.evaluate(&[engine.prime().clone()], &BigUint::from(1u32)),
        Err(ZpPolyError::CoefficientOutOfRange)
    );
}

#[test]
fn test_concurrent_calls_share_engine() {
    let engine = ZpPolyEngine::new(ZpPolyType::TreeFast, 64).unwrap();
    std::thread::scope(|scope| {
        for seed in 0..4u64 {
            let engine = &engine;
            scope.spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                check_interpolate(engine, &mut rng, DEFAULT_NUM, DEFAULT_NUM / 2);
                check_root_interpolate(engine, &mut rng, DEFAULT_NUM, DEFAULT_NUM / 2);
            });
        }
    });
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_batch_matches_pointwise(
        coefficients in prop::collection::vec(any::<u32>(), 1..40),
        points in prop::collection::vec(any::<u32>(), 0..70),
    ) {
        let engine = ZpPolyEngine::new(ZpPolyType::TreeFast, 40).unwrap();
        let coefficients: Vec<BigUint> = coefficients.into_iter().map(BigUint::from).collect();
        let points: Vec<BigUint> = points.into_iter().map(BigUint::from).collect();
        let batch = engine.evaluate_batch(&coefficients, &points).unwrap();
        let pointwise: Vec<BigUint> = points.iter().map(|x| engine.evaluate(&coefficients, x).unwrap()).collect();
        prop_assert_eq!(batch, pointwise);
    }
}
