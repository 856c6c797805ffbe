//! Field-level building blocks.
//!
//! - `prime`: probable-prime testing and modulus selection.
//! - `zp`: arithmetic in Z_p.
//! - `codec`: fixed-width big-endian element encoding shared with native backends.

pub mod codec;
pub mod prime;
pub mod zp;
