//! Build-volume splitting: partition a finished wing into printable segments
//! with self-aligning connector stubs at the cut boundaries.
//!
//! All partition bookkeeping travels in an explicit [`SplitContext`] handed
//! down the call chain; there is no process-wide split state.

use crate::errors::ConfigError;
use crate::float_types::Real;
use crate::profile::Profile;
use crate::traits::SolidKernel;
use crate::wing::{SliceBuilder, WingConfig};
use nalgebra::Vector3;

/// Lofted steps in a connector taper.
const CONNECTOR_STEPS: usize = 5;
/// XY margin added to intersection slabs so boundary faces are captured cleanly.
const SLAB_MARGIN_MM: Real = 1.0;

/// Printer build volume and connector parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct PrintSplitConfig {
    /// Usable build volume (x, y, z) in mm; segments are cut along z.
    pub build_volume: Vector3<Real>,
    /// How far the male stub protrudes past the cut.
    pub connector_length_mm: Real,
    /// Connector footprint as a fraction of the boundary cross-section.
    pub connector_scale: Real,
    /// End-of-stub scale relative to the footprint (tapered for easy mating).
    pub connector_taper: Real,
    /// Male shrink factor relative to the female cavity (print clearance).
    pub connector_shrink: Real,
    /// Part-to-part layout gap as a fraction of the build area width.
    pub part_gap_fraction: Real,
}

impl PrintSplitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("build_volume.x", self.build_volume.x),
            ("build_volume.y", self.build_volume.y),
            ("build_volume.z", self.build_volume.z),
            ("connector_length_mm", self.connector_length_mm),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("connector_scale", self.connector_scale),
            ("connector_taper", self.connector_taper),
            ("connector_shrink", self.connector_shrink),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::FractionOutOfRange { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.part_gap_fraction) {
            return Err(ConfigError::FractionOutOfRange {
                name: "part_gap_fraction",
                value: self.part_gap_fraction,
            });
        }
        Ok(())
    }
}

/// The span partition: how many segments, how long each one is.
///
/// Segments tile `[0, span_mm]` exactly; segment `i` owns
/// `[i·segment_length, (i+1)·segment_length]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitContext {
    pub span_mm: Real,
    pub split_count: usize,
    pub segment_length_mm: Real,
}

impl SplitContext {
    pub fn new(span_mm: Real, build_height_mm: Real) -> Self {
        let split_count = (span_mm / build_height_mm).ceil().max(1.0) as usize;
        SplitContext {
            span_mm,
            split_count,
            segment_length_mm: span_mm / split_count as Real,
        }
    }

    /// z range owned by segment `i`.
    pub fn segment_range(&self, i: usize) -> (Real, Real) {
        (
            i as Real * self.segment_length_mm,
            (i + 1) as Real * self.segment_length_mm,
        )
    }

    /// Internal cut boundaries (excludes the root and tip faces).
    pub fn internal_boundaries(&self) -> Vec<Real> {
        (1..self.split_count)
            .map(|i| i as Real * self.segment_length_mm)
            .collect()
    }
}

/// Connector profile run at a cut boundary: ≈5 scaled copies of the
/// boundary's own cross-section, so the joint's footprint matches the wing
/// exactly at that cut. `shrink` < 1 produces the male stub; 1.0 the female
/// cavity.
fn connector_profiles(
    builder: &SliceBuilder<'_>,
    ctx: &SplitContext,
    split: &PrintSplitConfig,
    boundary_z: Real,
    shrink: Real,
) -> Vec<Profile> {
    let nz = boundary_z / ctx.span_mm;
    let base = builder.build_profile(nz);

    (0..CONNECTOR_STEPS)
        .map(|step| {
            let t = step as Real / (CONNECTOR_STEPS - 1) as Real;
            let scale = split.connector_scale * (1.0 + (split.connector_taper - 1.0) * t) * shrink;
            base.scaled_about_centroid(scale)
                .translate(0.0, 0.0, t * split.connector_length_mm)
        })
        .collect()
}

/// One printable segment: the solid clipped to its z slab, with a male stub
/// on the outboard face and a female cavity in the inboard face at internal
/// boundaries.
fn segment_solid<K: SolidKernel>(
    solid: &K,
    builder: &SliceBuilder<'_>,
    ctx: &SplitContext,
    split: &PrintSplitConfig,
    i: usize,
) -> K {
    let (z0, z1) = ctx.segment_range(i);
    let aabb = solid.bounding_box();

    let slab = K::loft(&[
        Profile::from_aabb_xy(&aabb, SLAB_MARGIN_MM, z0),
        Profile::from_aabb_xy(&aabb, SLAB_MARGIN_MM, z1),
    ]);
    let mut part = solid.intersection(&slab);

    // male stub protruding tip-ward past the outboard cut
    if i + 1 < ctx.split_count {
        let male = connector_profiles(builder, ctx, split, z1, split.connector_shrink);
        part = part.union(&K::loft(&male));
    }

    // female cavity carved tip-ward into the inboard face
    if i > 0 {
        let female = connector_profiles(builder, ctx, split, z0, 1.0);
        part = part.difference(&K::loft(&female));
    }

    part
}

/// Partition a finished wing solid into build-volume-sized segments.
///
/// Returns each segment together with its suggested layout offset: parts are
/// kept in wing coordinates and spread side-by-side (and dropped to z = 0) by
/// applying the offset. Spacing derives from the solid's planar bounding box
/// plus a fraction of the build area width.
pub fn split_for_printing<K: SolidKernel>(
    solid: &K,
    split: &PrintSplitConfig,
    cfg: &WingConfig,
) -> Result<Vec<(K, Vector3<Real>)>, ConfigError> {
    cfg.validate()?;
    split.validate()?;

    let ctx = SplitContext::new(cfg.span_mm, split.build_volume.z);
    let builder = SliceBuilder::new(cfg);

    let aabb = solid.bounding_box();
    let spacing =
        (aabb.maxs.x - aabb.mins.x) + split.part_gap_fraction * split.build_volume.x;

    Ok((0..ctx.split_count)
        .map(|i| {
            let part = segment_solid(solid, &builder, &ctx, split, i);
            let (z0, _) = ctx.segment_range(i);
            (part, Vector3::new(i as Real * spacing, 0.0, -z0))
        })
        .collect())
}
