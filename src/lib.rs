//! Z_p polynomial interpolation and multipoint evaluation for MPC protocols.
//!
//! The crate fits polynomials through point sets over a prime field, builds
//! polynomials that take a fixed value on a root set, and evaluates them at one
//! or many points. Interpolation outputs can be padded to a caller-chosen
//! degree so that the real number of points stays hidden.
//!
//! # Layout
//! - `core`: prime selection, `FiniteField` arithmetic and the fixed-width element codec.
//! - `polynomial`: dense polynomials, the subproduct tree, degree padding,
//!   interpolation strategies and the `ZpPolyEngine` facade.
//! - `config`: engine configuration.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod core;
pub mod polynomial;
pub mod config;

pub use crate::config::EngineConfig;
pub use crate::core::zp::FiniteField;
pub use crate::polynomial::engine::{new_engine, ZpPolyEngine};
pub use crate::polynomial::native::{Backend, BackendError};
pub use crate::polynomial::{ZpPolyError, ZpPolyType};
