//! Configuration validation errors
//!
//! Fatal errors only: anything here aborts generation before geometry is
//! emitted. Degenerate-geometry conditions (thin shells, empty offsets)
//! are recovered locally by their components and never surface as errors.

use crate::float_types::Real;
use std::fmt::Display;

/// All the possible configuration issues we might encounter
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// (NonPositive) A parameter that must be strictly positive is zero or negative
    NonPositive { name: &'static str, value: Real },
    /// (FractionOutOfRange) A normalized fraction parameter is outside [0, 1]
    FractionOutOfRange { name: &'static str, value: Real },
    /// (PercentOutOfRange) A percentage parameter is outside [0, 100]
    PercentOutOfRange { name: &'static str, value: Real },
    /// (SectionCountTooSmall) Fewer than two span-wise sections were requested
    SectionCountTooSmall(usize),
    /// (BlendWindowTooWide) The airfoil-transition blend window exceeds the section count
    BlendWindowTooWide { window: usize, sections: usize },
    /// (SparInvalid) A spar entry failed validation; the index refers to the spar table
    SparInvalid { index: usize, reason: String },
    /// (DegenerateAirfoil) An airfoil outline has too few points or zero chord extent
    DegenerateAirfoil(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositive { name, value } => {
                write!(f, "(NonPositive) `{}` must be > 0, got: {}", name, value)
            },
            ConfigError::FractionOutOfRange { name, value } => {
                write!(f, "(FractionOutOfRange) `{}` must lie in [0, 1], got: {}", name, value)
            },
            ConfigError::PercentOutOfRange { name, value } => {
                write!(f, "(PercentOutOfRange) `{}` must lie in [0, 100], got: {}", name, value)
            },
            ConfigError::SectionCountTooSmall(count) => {
                write!(f, "(SectionCountTooSmall) at least 2 sections are required to loft, got: {}", count)
            },
            ConfigError::BlendWindowTooWide { window, sections } => {
                write!(
                    f,
                    "(BlendWindowTooWide) blend window of {} slices exceeds the {} configured sections",
                    window, sections
                )
            },
            ConfigError::SparInvalid { index, reason } => {
                write!(f, "(SparInvalid) spar #{}: {}", index, reason)
            },
            ConfigError::DegenerateAirfoil(reason) => {
                write!(f, "(DegenerateAirfoil) {}", reason)
            },
        }
    }
}
