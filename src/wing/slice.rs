//! The per-slice transform pipeline: airfoil selection, chord scaling,
//! washout, and anhedral.
//!
//! The pipeline order is load-bearing: translating to the rotation axis
//! *before* the washout rotation keeps the twist pivot chord-relative, and
//! lifting to 3D *before* the anhedral step keeps the droop span-relative.

use crate::airfoil::{AirfoilPath, AirfoilTable};
use crate::float_types::{EPSILON, Real};
use crate::profile::Profile;
use crate::wing::{AnhedralConfig, WashoutConfig, WingConfig};
use geo::{AffineOps, AffineTransform, Coord, LineString};
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};
use std::sync::Arc;
use tracing::warn;

/// Normalized progress past a start fraction, clamped to [0, 1].
///
/// Clamping (rather than guarding the denominator) also covers
/// `start_fraction = 1`, where the transform simply never engages.
pub fn progress(start_fraction: Real, nz: Real) -> Real {
    let run = 1.0 - start_fraction;
    if run <= EPSILON {
        return 0.0;
    }
    ((nz - start_fraction) / run).clamp(0.0, 1.0)
}

/// Hermite smoothstep `3t² - 2t³`.
fn smoothstep(t: Real) -> Real {
    t * t * (3.0 - 2.0 * t)
}

/// Signed washout rotation at `nz`, in degrees. Zero at or before the start
/// fraction, then linear in progress; negative values twist nose-down.
pub fn washout_degrees(washout: &WashoutConfig, nz: Real) -> Real {
    if washout.degrees == 0.0 {
        return 0.0;
    }
    -progress(washout.start_fraction, nz) * washout.degrees
}

/// Anhedral state at `nz`: `(section tilt degrees, y drop mm)`.
///
/// The instantaneous tilt eases in quadratically (`t²·degrees`) so curvature
/// is continuous where the droop starts, and the drop follows a smoothstep
/// scaled by `span_remaining·tan(degrees)` so the surface tangent matches the
/// tilt at every span position — the drooped skin has no slope discontinuity.
pub fn anhedral_state(anhedral: &AnhedralConfig, span_mm: Real, nz: Real) -> (Real, Real) {
    if anhedral.degrees == 0.0 {
        return (0.0, 0.0);
    }
    let t = progress(anhedral.start_fraction, nz);
    if t <= 0.0 {
        return (0.0, 0.0);
    }
    let tilt = t * t * anhedral.degrees;
    let span_remaining = (1.0 - anhedral.start_fraction) * span_mm;
    let drop = -smoothstep(t) * span_remaining * anhedral.degrees.to_radians().tan();
    (tilt, drop)
}

/// Builds positioned wing-slice profiles for one [`WingConfig`].
///
/// Construction precomputes the hull-blended sections at each airfoil
/// transition boundary so per-slice evaluation stays pure and cheap.
pub struct SliceBuilder<'a> {
    cfg: &'a WingConfig,
    table: AirfoilTable,
    blends: Vec<(Real, Arc<AirfoilPath>)>,
    blend_halfwidth: Real,
}

impl<'a> SliceBuilder<'a> {
    pub fn new(cfg: &'a WingConfig) -> Self {
        let table = cfg.transitions.table();
        let sections = cfg.section_count.max(2);
        let blend_halfwidth = if cfg.transitions.blend_slices == 0 {
            0.0
        } else {
            cfg.transitions.blend_slices as Real / (2.0 * (sections - 1) as Real)
        };

        let mut blends = Vec::new();
        if blend_halfwidth > 0.0 {
            for (boundary, inboard, outboard) in table.boundaries() {
                if Arc::ptr_eq(&inboard, &outboard) {
                    continue;
                }
                match AirfoilPath::hull_blend(&inboard, &outboard) {
                    Ok(blend) => blends.push((boundary, Arc::new(blend))),
                    Err(err) => {
                        // fail soft: hard transition instead of a morph
                        warn!(boundary, %err, "airfoil blend degenerate, using hard transition");
                    },
                }
            }
        }

        SliceBuilder { cfg, table, blends, blend_halfwidth }
    }

    /// The cross-section governing `nz`: a precomputed hull blend inside the
    /// transition window, otherwise the table selection. The table built from
    /// the transition config is never empty; the root section backstops the
    /// `None` arm anyway.
    pub fn airfoil_at(&self, nz: Real) -> Arc<AirfoilPath> {
        for (boundary, blend) in &self.blends {
            if (nz - boundary).abs() <= self.blend_halfwidth {
                return blend.clone();
            }
        }
        self.table
            .select(nz)
            .cloned()
            .unwrap_or_else(|| self.cfg.transitions.root.clone())
    }

    /// Pipeline step 1: the outline of the selected airfoil scaled from the
    /// reference chord to the local chord.
    pub fn scaled_outline(&self, nz: Real) -> LineString<Real> {
        let airfoil = self.airfoil_at(nz);
        let scale = self.cfg.chord.chord(nz) / crate::float_types::REFERENCE_CHORD;
        airfoil
            .outline
            .exterior()
            .affine_transform(&AffineTransform::scale(scale, scale, Coord::zero()))
    }

    /// Pipeline steps 2–5 on an already-scaled 2D path: translate the
    /// center-line point onto the rotation axis, rotate by the washout about
    /// the chord pivot, lift to 3D at `z = nz·span`, then tilt and drop the
    /// section by the anhedral.
    pub fn finish_profile(&self, path: &LineString<Real>, nz: Real) -> Profile {
        let cfg = self.cfg;
        let chord = cfg.chord.chord(nz);

        // 2. center-line point onto the rotation axis
        let mut path = path.affine_transform(&AffineTransform::translate(
            -cfg.center_line_fraction * chord,
            0.0,
        ));

        // 3. washout: rotate about the chord-line pivot, expressed in the
        //    translated frame
        let twist = washout_degrees(&cfg.washout, nz);
        if twist != 0.0 {
            let pivot = Coord {
                x: (cfg.washout.pivot_fraction - cfg.center_line_fraction) * chord,
                y: 0.0,
            };
            path = path.affine_transform(&AffineTransform::rotate(twist, pivot));
        }

        // 4. lift to 3D
        let z = nz * cfg.span_mm;
        let mut profile = Profile::from_path2(&path, z);

        // 5. anhedral: tilt the section about its local x axis so it stays
        //    normal to the droop curve, then apply the y drop
        let (tilt, drop) = anhedral_state(&cfg.anhedral, cfg.span_mm, nz);
        if tilt != 0.0 || drop != 0.0 {
            let tilt_about_section = Translation3::new(0.0, 0.0, z).to_homogeneous()
                * Rotation3::from_axis_angle(&Vector3::x_axis(), tilt.to_radians())
                    .to_homogeneous()
                * Translation3::new(0.0, 0.0, -z).to_homogeneous();
            let matrix: Matrix4<Real> =
                Translation3::new(0.0, drop, 0.0).to_homogeneous() * tilt_about_section;
            profile = profile.transform(&matrix);
        }

        profile
    }

    /// The full pipeline for the wing's outer skin at `nz`.
    pub fn build_profile(&self, nz: Real) -> Profile {
        let outline = self.scaled_outline(nz);
        self.finish_profile(&outline, nz)
    }
}
