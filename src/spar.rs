//! Reinforcement-spar placement: channel holes through the wing and optional
//! concentric mounting tubes.
//!
//! Spar positions are resolved against the root chord; anchored offsets sample
//! the root airfoil's top/bottom/mean-camber lists. Placement is a heuristic
//! (the camber line approximates the thick part of the section), not a
//! structural solve.

use crate::airfoil::Surface;
use crate::errors::ConfigError;
use crate::float_types::{REFERENCE_CHORD, Real};
use crate::profile::Profile;
use crate::traits::SolidKernel;
use crate::wing::WingConfig;

/// Circle discretization for spar holes and tubes.
const SPAR_SEGMENTS: usize = 32;
/// Lofted steps in the circle → grid-bar taper.
const TAPER_STEPS: usize = 5;

/// Where along the chord a spar sits: exactly one of a fixed millimeter
/// offset or a percentage of the root chord.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SparPosition {
    FixedMm(Real),
    PercentChord(Real),
}

/// Which airfoil surface the spar's y position tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceAnchor {
    Top,
    Bottom,
    Camber,
    None,
}

/// Whether a spar hole spans the full two-half assembly or only the built half.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SparRole {
    Structural,
    Secondary,
}

/// Optional additive tube around a spar hole, tapering to the rectangular
/// grid-bar cross-section at its outer end.
#[derive(Clone, Debug, PartialEq)]
pub struct SparTube {
    pub wall_mm: Real,
    pub bar_width_mm: Real,
    pub bar_height_mm: Real,
    /// Length of the circle → bar taper at the outer end.
    pub taper_length_mm: Real,
}

/// One spar hole, minus its chord-wise position.
#[derive(Clone, Debug, PartialEq)]
pub struct SparHole {
    /// Rod diameter; the printed hole adds `clearance_mm`.
    pub diameter_mm: Real,
    pub length_mm: Real,
    /// Manual y adjustment added after any anchored offset.
    pub offset_mm: Real,
    pub anchor: SurfaceAnchor,
    /// Calibrated print tolerance added to the hole diameter.
    pub clearance_mm: Real,
    pub tube: Option<SparTube>,
}

/// A positioned single spar.
#[derive(Clone, Debug, PartialEq)]
pub struct SparSpec {
    pub position: SparPosition,
    pub hole: SparHole,
}

/// Single spar, or a top/bottom pair straddling the airfoil's thick section.
/// A pair shares one chord-wise position but each member keeps its own
/// y offset, diameter, length, and anchor.
#[derive(Clone, Debug, PartialEq)]
pub enum SparShape {
    Single(SparSpec),
    Paired { position: SparPosition, top: SparHole, bottom: SparHole },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SparConfig {
    pub role: SparRole,
    pub shape: SparShape,
}

/// A spar hole resolved to wing coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSpar {
    pub x_mm: Real,
    pub y_mm: Real,
    pub hole_diameter_mm: Real,
    pub z_range: (Real, Real),
    pub tube: Option<SparTube>,
}

fn resolve_x(
    position: SparPosition,
    root_chord_mm: Real,
    index: usize,
) -> Result<Real, ConfigError> {
    match position {
        SparPosition::FixedMm(x) => Ok(x),
        SparPosition::PercentChord(percent) => {
            if !(0.0..=100.0).contains(&percent) {
                return Err(ConfigError::SparInvalid {
                    index,
                    reason: format!("percent position {} outside [0, 100]", percent),
                });
            }
            Ok(percent / 100.0 * root_chord_mm)
        },
    }
}

fn resolve_hole(
    hole: &SparHole,
    position: SparPosition,
    cfg: &WingConfig,
    index: usize,
    role: SparRole,
) -> Result<ResolvedSpar, ConfigError> {
    if hole.diameter_mm <= 0.0 {
        return Err(ConfigError::SparInvalid {
            index,
            reason: format!("diameter must be > 0, got {}", hole.diameter_mm),
        });
    }
    if hole.length_mm <= 0.0 {
        return Err(ConfigError::SparInvalid {
            index,
            reason: format!("length must be > 0, got {}", hole.length_mm),
        });
    }

    let root_chord = cfg.chord.root_chord_mm();
    let x_mm = resolve_x(position, root_chord, index)?;

    // Anchored offsets sample the root airfoil in reference-chord units and
    // scale back to wing millimeters.
    let anchored = match hole.anchor {
        SurfaceAnchor::None => 0.0,
        SurfaceAnchor::Top => sample(cfg, Surface::Top, x_mm, root_chord),
        SurfaceAnchor::Bottom => sample(cfg, Surface::Bottom, x_mm, root_chord),
        SurfaceAnchor::Camber => sample(cfg, Surface::Camber, x_mm, root_chord),
    };

    let z_range = match role {
        SparRole::Structural => (-hole.length_mm / 2.0, hole.length_mm / 2.0),
        SparRole::Secondary => (0.0, hole.length_mm),
    };

    Ok(ResolvedSpar {
        x_mm,
        y_mm: anchored + hole.offset_mm,
        hole_diameter_mm: hole.diameter_mm + hole.clearance_mm,
        z_range,
        tube: hole.tube.clone(),
    })
}

fn sample(cfg: &WingConfig, surface: Surface, x_mm: Real, root_chord_mm: Real) -> Real {
    let x_ref = x_mm / root_chord_mm * REFERENCE_CHORD;
    cfg.transitions.root.surface_y_at(surface, x_ref) * root_chord_mm / REFERENCE_CHORD
}

/// Expand and position every spar of a spar table against one wing.
pub fn resolve_spars(
    spars: &[SparConfig],
    cfg: &WingConfig,
) -> Result<Vec<ResolvedSpar>, ConfigError> {
    let mut resolved = Vec::new();
    for (index, spar) in spars.iter().enumerate() {
        match &spar.shape {
            SparShape::Single(spec) => {
                resolved.push(resolve_hole(&spec.hole, spec.position, cfg, index, spar.role)?);
            },
            SparShape::Paired { position, top, bottom } => {
                resolved.push(resolve_hole(top, *position, cfg, index, spar.role)?);
                resolved.push(resolve_hole(bottom, *position, cfg, index, spar.role)?);
            },
        }
    }
    Ok(resolved)
}

/// Cylinder between two z planes, centered on (x, y).
fn cylinder<K: SolidKernel>(radius: Real, x: Real, y: Real, z0: Real, z1: Real) -> K {
    let bottom = Profile::circle(radius, SPAR_SEGMENTS, z0).translate(x, y, 0.0);
    let top = Profile::circle(radius, SPAR_SEGMENTS, z1).translate(x, y, 0.0);
    K::loft(&[bottom, top])
}

/// The profile stack for one tube: a straight barrel over most of the length,
/// morphing through a short lofted run into the rectangular grid-bar
/// cross-section at the outer end.
///
/// The resampled bar ring is re-origined toward the +x axis so it pairs
/// point-by-point with the circle; without the alignment the lerp pinches the
/// intermediate rings.
fn taper_profiles(spar: &ResolvedSpar, tube: &SparTube) -> Vec<Profile> {
    let outer_radius = spar.hole_diameter_mm / 2.0 + tube.wall_mm;
    let (z0, z1) = spar.z_range;
    let taper_start = (z1 - tube.taper_length_mm).max(z0);

    let mut profiles = Vec::with_capacity(TAPER_STEPS + 1);
    profiles.push(Profile::circle(outer_radius, SPAR_SEGMENTS, z0));
    for step in 0..TAPER_STEPS {
        let t = step as Real / (TAPER_STEPS - 1) as Real;
        let z = taper_start + (z1 - taper_start) * t;
        let circle = Profile::circle(outer_radius, SPAR_SEGMENTS, z);
        let bar = Profile::rectangle(tube.bar_width_mm, tube.bar_height_mm, z)
            .resampled(SPAR_SEGMENTS)
            .with_start_toward_positive_x();
        profiles.push(Profile::lerp(&circle, &bar, t));
    }
    profiles
}

/// The additive tube solid for one resolved spar.
fn tube_solid<K: SolidKernel>(spar: &ResolvedSpar, tube: &SparTube) -> K {
    K::loft(&taper_profiles(spar, tube)).translate(spar.x_mm, spar.y_mm, 0.0)
}

/// Build `(additive, subtractive)` spar solids for one wing: additive tubes to
/// union into a hollow shell, subtractive channel holes to subtract from the
/// finished solid.
pub fn build_spar_features<K: SolidKernel>(
    spars: &[SparConfig],
    cfg: &WingConfig,
) -> Result<(Vec<K>, Vec<K>), ConfigError> {
    cfg.validate()?;
    let resolved = resolve_spars(spars, cfg)?;

    let mut additive = Vec::new();
    let mut subtractive = Vec::new();
    for spar in &resolved {
        let (z0, z1) = spar.z_range;
        subtractive.push(cylinder::<K>(
            spar.hole_diameter_mm / 2.0,
            spar.x_mm,
            spar.y_mm,
            z0,
            z1,
        ));
        if let Some(tube) = &spar.tube {
            additive.push(tube_solid::<K>(spar, tube));
        }
    }
    Ok((additive, subtractive))
}
