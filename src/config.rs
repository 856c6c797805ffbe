//! Engine configuration.
//!
//! Populated by the host protocol and handed to `ZpPolyEngine::from_config`.

use crate::polynomial::ZpPolyType;

/// Statistical security parameter used as the default input bit length.
pub const DEFAULT_BIT_LENGTH: usize = 40;

/// Settings for building a `ZpPolyEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Interpolation strategy.
    pub poly_type: ZpPolyType,

    /// Bit length of points and values; a positive multiple of 8.
    pub l: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poly_type: ZpPolyType::TreeFast,
            l: DEFAULT_BIT_LENGTH,
        }
    }
}

impl EngineConfig {
    pub fn new(poly_type: ZpPolyType, l: usize) -> Self {
        Self { poly_type, l }
    }
}
