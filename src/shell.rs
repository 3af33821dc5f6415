//! Hollow-shell construction: an inward-offset cavity stack subtracted from
//! the outer hull.
//!
//! Every decision here is fail-soft. A slice too thin to hold the wall, an
//! offset that collapses to nothing — the slice is skipped and stays solid,
//! and generation carries on with the remaining cavity profiles.

use crate::errors::ConfigError;
use crate::float_types::Real;
use crate::profile::Profile;
use crate::traits::SolidKernel;
use crate::wing::{SliceBuilder, WingConfig, wing_profiles};
use geo::{Area, LineString, Polygon as GeoPolygon};
use geo_buf::buffer_polygon;
use tracing::warn;

/// Wall parameters for hollow construction.
#[derive(Clone, Debug, PartialEq)]
pub struct ShellConfig {
    pub wall_thickness_mm: Real,
}

impl ShellConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wall_thickness_mm <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "wall_thickness_mm",
                value: self.wall_thickness_mm,
            });
        }
        Ok(())
    }
}

/// Inward-offset a scaled slice outline, keeping the largest resulting ring.
/// Returns `None` when the offset vanishes or self-destructs.
fn offset_inward(outline: &LineString<Real>, wall_mm: Real) -> Option<LineString<Real>> {
    let polygon = GeoPolygon::new(outline.clone(), vec![]);
    let shrunk = buffer_polygon(&polygon, -wall_mm);
    shrunk
        .0
        .into_iter()
        .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
        .filter(|p| p.unsigned_area() > 0.0)
        .map(|p| p.exterior().clone())
}

/// The ordered cavity profile stack for a hollow wing.
///
/// The stack stops `wall_thickness` short of the tip so the tip stays capped,
/// and any slice whose section is too thin for the wall
/// (`3·wall > chord·max_thickness_ratio`) is skipped as solid.
pub fn cavity_profiles(
    cfg: &WingConfig,
    shell: &ShellConfig,
) -> Result<Vec<Profile>, ConfigError> {
    cfg.validate()?;
    shell.validate()?;

    let wall = shell.wall_thickness_mm;
    let builder = SliceBuilder::new(cfg);
    // solid tip cap: the cavity never reaches the last wall_thickness of span
    let nz_limit = (cfg.span_mm - wall) / cfg.span_mm;

    // regular stations short of the cap, plus one closing profile at the cap
    let mut stations: Vec<Real> = (0..cfg.section_count)
        .map(|i| cfg.station(i))
        .filter(|nz| *nz < nz_limit)
        .collect();
    stations.push(nz_limit);

    let mut profiles = Vec::with_capacity(stations.len());
    for nz in stations {
        let chord = cfg.chord.chord(nz);
        let airfoil = builder.airfoil_at(nz);
        let max_thickness_mm = chord * airfoil.max_thickness_ratio;
        if 3.0 * wall > max_thickness_mm {
            // inward offset would self-intersect or vanish; leave slice solid
            warn!(nz, max_thickness_mm, wall, "slice too thin for hollow wall, kept solid");
            continue;
        }

        let outline = builder.scaled_outline(nz);
        match offset_inward(&outline, wall) {
            Some(cavity) => profiles.push(builder.finish_profile(&cavity, nz)),
            None => {
                warn!(nz, "inward offset produced no polygon, slice kept solid");
            },
        }
    }
    Ok(profiles)
}

/// Loft the outer hull and subtract the inward-offset cavity.
///
/// With fewer than two usable cavity profiles there is nothing to loft; the
/// wing is returned solid rather than failing.
pub fn build_hollow_wing_solid<K: SolidKernel>(
    cfg: &WingConfig,
    shell: &ShellConfig,
) -> Result<K, ConfigError> {
    let outer = K::loft(&wing_profiles(cfg)?);
    let cavity = cavity_profiles(cfg, shell)?;
    if cavity.len() < 2 {
        warn!(
            usable = cavity.len(),
            "not enough cavity profiles to loft, building solid wing"
        );
        return Ok(outer);
    }
    Ok(outer.difference(&K::loft(&cavity)))
}
