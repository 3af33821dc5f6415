//! Wing configuration and the ordered profile-stack generator.

use crate::airfoil::{AirfoilPath, AirfoilTable};
use crate::errors::ConfigError;
use crate::float_types::Real;
use crate::profile::Profile;
use crate::traits::SolidKernel;
use std::sync::Arc;

pub mod chord;
pub mod slice;

pub use chord::ChordProfile;
pub use slice::SliceBuilder;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Progressive nose-down twist toward the tip. `degrees = 0` disables.
#[derive(Clone, Debug, PartialEq)]
pub struct WashoutConfig {
    /// Total twist at the tip, in degrees; applied nose-down.
    pub degrees: Real,
    /// Normalized span position where the twist begins.
    pub start_fraction: Real,
    /// Chord fraction of the rotation pivot.
    pub pivot_fraction: Real,
}

impl WashoutConfig {
    pub const fn none() -> Self {
        WashoutConfig { degrees: 0.0, start_fraction: 0.0, pivot_fraction: 0.0 }
    }
}

/// Downward droop of the tip relative to the root. `degrees = 0` disables.
#[derive(Clone, Debug, PartialEq)]
pub struct AnhedralConfig {
    /// Final droop angle at the tip, in degrees.
    pub degrees: Real,
    /// Normalized span position where the droop begins.
    pub start_fraction: Real,
}

impl AnhedralConfig {
    pub const fn none() -> Self {
        AnhedralConfig { degrees: 0.0, start_fraction: 0.0 }
    }
}

/// Which airfoil governs which stretch of the span, plus the blend window.
#[derive(Clone, Debug)]
pub struct AirfoilTransitionConfig {
    /// Span fraction where the mid section takes over from the root section.
    pub center_change_fraction: Real,
    /// Span fraction where the tip section takes over from the mid section.
    pub tip_change_fraction: Real,
    pub root: Arc<AirfoilPath>,
    pub mid: Arc<AirfoilPath>,
    pub tip: Arc<AirfoilPath>,
    /// Width of the hull-blend window around each transition boundary,
    /// measured in slices. 0 gives hard transitions.
    pub blend_slices: usize,
}

impl AirfoilTransitionConfig {
    /// A single airfoil over the whole span.
    pub fn uniform(airfoil: Arc<AirfoilPath>) -> Self {
        AirfoilTransitionConfig {
            center_change_fraction: 1.0,
            tip_change_fraction: 1.0,
            root: airfoil.clone(),
            mid: airfoil.clone(),
            tip: airfoil,
            blend_slices: 0,
        }
    }

    /// The ordered selection table. Tip has precedence over mid over root.
    pub fn table(&self) -> AirfoilTable {
        AirfoilTable::new(vec![
            (0.0, self.root.clone()),
            (self.center_change_fraction, self.mid.clone()),
            (self.tip_change_fraction, self.tip.clone()),
        ])
    }
}

/// Immutable description of one wing. Constructed once, consumed read-only by
/// every downstream component; profile stacks are regenerated from scratch
/// whenever the config changes.
#[derive(Clone, Debug)]
pub struct WingConfig {
    /// Number of span-wise cross-sections to loft through (≥ 2).
    pub section_count: usize,
    /// Root-to-tip distance, in mm.
    pub span_mm: Real,
    /// Chord fraction that sits on the span's rotation axis (x = 0).
    pub center_line_fraction: Real,
    pub chord: ChordProfile,
    pub washout: WashoutConfig,
    pub anhedral: AnhedralConfig,
    pub transitions: AirfoilTransitionConfig,
}

fn check_fraction(name: &'static str, value: Real) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::FractionOutOfRange { name, value });
    }
    Ok(())
}

impl WingConfig {
    /// Fatal-error gate: nothing downstream emits geometry until this passes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.section_count < 2 {
            return Err(ConfigError::SectionCountTooSmall(self.section_count));
        }
        if self.span_mm <= 0.0 {
            return Err(ConfigError::NonPositive { name: "span_mm", value: self.span_mm });
        }
        self.chord.validate()?;
        check_fraction("center_line_fraction", self.center_line_fraction)?;
        check_fraction("washout.start_fraction", self.washout.start_fraction)?;
        check_fraction("washout.pivot_fraction", self.washout.pivot_fraction)?;
        check_fraction("anhedral.start_fraction", self.anhedral.start_fraction)?;
        check_fraction(
            "transitions.center_change_fraction",
            self.transitions.center_change_fraction,
        )?;
        check_fraction("transitions.tip_change_fraction", self.transitions.tip_change_fraction)?;
        if self.transitions.blend_slices > self.section_count {
            return Err(ConfigError::BlendWindowTooWide {
                window: self.transitions.blend_slices,
                sections: self.section_count,
            });
        }
        Ok(())
    }

    /// Normalized span position of slice `i` of `section_count`.
    pub fn station(&self, i: usize) -> Real {
        i as Real / (self.section_count - 1) as Real
    }
}

/// The ordered outer-skin profile stack, ascending in span position.
#[cfg(not(feature = "parallel"))]
pub fn wing_profiles(cfg: &WingConfig) -> Result<Vec<Profile>, ConfigError> {
    cfg.validate()?;
    let builder = SliceBuilder::new(cfg);
    Ok((0..cfg.section_count)
        .map(|i| builder.build_profile(cfg.station(i)))
        .collect())
}

/// The ordered outer-skin profile stack, ascending in span position.
///
/// Slices are evaluated in parallel; each depends only on its own station and
/// the shared read-only config, and the indexed collect restores ascending
/// span order before the stack reaches the loft.
#[cfg(feature = "parallel")]
pub fn wing_profiles(cfg: &WingConfig) -> Result<Vec<Profile>, ConfigError> {
    cfg.validate()?;
    let builder = SliceBuilder::new(cfg);
    Ok((0..cfg.section_count)
        .into_par_iter()
        .map(|i| builder.build_profile(cfg.station(i)))
        .collect())
}

/// Loft the wing's outer hull.
pub fn build_wing_solid<K: SolidKernel>(cfg: &WingConfig) -> Result<K, ConfigError> {
    let profiles = wing_profiles(cfg)?;
    Ok(K::loft(&profiles))
}
