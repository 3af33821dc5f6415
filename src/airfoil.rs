//! Airfoil cross-sections and span-wise airfoil selection.
//!
//! An [`AirfoilPath`] is a closed 2D outline authored at the 100-unit
//! [`REFERENCE_CHORD`], together with derived top/bottom/mean-camber sample
//! lists (sorted by x) and the section's maximum thickness ratio. Outlines are
//! immutable and shared by reference across all wing slices; only the per-slice
//! scale differs.
//!
//! [`AirfoilTable`] maps normalized span positions to airfoils via an ordered
//! threshold scan, with an optional convex-hull morph near the transition
//! boundaries.

use crate::errors::ConfigError;
use crate::float_types::{EPSILON, REFERENCE_CHORD, Real, tolerance};
use geo::{
    ConvexHull, Coord, LineString, MultiPoint, Orient, Polygon as GeoPolygon, orient::Direction,
};
use std::sync::Arc;

/// Number of x stations used to derive the camber line and thickness ratio.
const CAMBER_STATIONS: usize = 64;

/// Which derived sample list of an airfoil to interrogate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    Top,
    Bottom,
    Camber,
}

/// A closed airfoil outline plus its derived surface data.
///
/// All coordinates are in reference-chord units: the leading edge sits near
/// x = 0 and the trailing edge near x = [`REFERENCE_CHORD`].
#[derive(Clone, Debug)]
pub struct AirfoilPath {
    /// Closed outline, counter-clockwise.
    pub outline: GeoPolygon<Real>,
    /// Upper-surface samples, sorted by ascending x.
    pub top: Vec<Coord<Real>>,
    /// Lower-surface samples, sorted by ascending x.
    pub bottom: Vec<Coord<Real>>,
    /// Mean-camber samples, sorted by ascending x.
    pub camber: Vec<Coord<Real>>,
    /// Maximum (top - bottom) extent divided by the chord extent.
    pub max_thickness_ratio: Real,
}

/// Linear interpolation into a list sorted by ascending x, clamped at the ends.
fn interp_sorted(samples: &[Coord<Real>], x: Real) -> Real {
    match samples {
        [] => 0.0,
        [only] => only.y,
        _ => {
            if x <= samples[0].x {
                return samples[0].y;
            }
            for pair in samples.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if x <= b.x {
                    let run = b.x - a.x;
                    if run <= EPSILON {
                        return b.y;
                    }
                    let t = (x - a.x) / run;
                    return a.y + t * (b.y - a.y);
                }
            }
            samples[samples.len() - 1].y
        },
    }
}

impl AirfoilPath {
    /// Analyze a closed outline into surfaces, camber line, and thickness ratio.
    ///
    /// The trailing-edge center is the average of *all* points sharing the
    /// maximum x (blunt trailing edges have two); the chord line runs from the
    /// leading-edge point to that center, and outline points are assigned to
    /// the top or bottom surface by which side of the chord line they fall on.
    pub fn from_outline(coords: Vec<Coord<Real>>) -> Result<Self, ConfigError> {
        let mut ring = coords;
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(ConfigError::DegenerateAirfoil(format!(
                "outline needs at least 3 distinct points, got {}",
                ring.len()
            )));
        }

        let tol = tolerance();

        // Leading edge: minimum x. Trailing edge: all points tied (within
        // tolerance) for maximum x, averaged to a single center point.
        let min_x = ring.iter().fold(Real::MAX, |m, c| m.min(c.x));
        let max_x = ring.iter().fold(-Real::MAX, |m, c| m.max(c.x));
        let chord_extent = max_x - min_x;
        if chord_extent <= EPSILON {
            return Err(ConfigError::DegenerateAirfoil(
                "outline has zero chord extent".into(),
            ));
        }

        let leading = *ring
            .iter()
            .find(|c| (c.x - min_x).abs() <= tol)
            .unwrap_or(&ring[0]);
        let trailing_ties: Vec<Coord<Real>> = ring
            .iter()
            .copied()
            .filter(|c| (c.x - max_x).abs() <= tol)
            .collect();
        let te_center = Coord {
            x: max_x,
            y: trailing_ties.iter().map(|c| c.y).sum::<Real>() / trailing_ties.len() as Real,
        };

        // Chord-line y at a given x, for top/bottom classification
        let chord_y = |x: Real| -> Real {
            leading.y + (te_center.y - leading.y) * (x - leading.x) / chord_extent
        };

        let mut top: Vec<Coord<Real>> = Vec::with_capacity(ring.len() / 2 + 2);
        let mut bottom: Vec<Coord<Real>> = Vec::with_capacity(ring.len() / 2 + 2);
        for c in &ring {
            if c.y >= chord_y(c.x) {
                top.push(*c);
            } else {
                bottom.push(*c);
            }
        }
        // The extreme points bound both surfaces
        for list in [&mut top, &mut bottom] {
            list.push(leading);
            list.push(te_center);
            list.sort_by(|a, b| a.x.total_cmp(&b.x));
            list.dedup_by(|a, b| (a.x - b.x).abs() <= EPSILON && (a.y - b.y).abs() <= EPSILON);
        }
        if top.len() < 2 || bottom.len() < 2 {
            return Err(ConfigError::DegenerateAirfoil(
                "outline does not enclose a chord line".into(),
            ));
        }

        // Mean camber line and maximum thickness, sampled on fixed x stations
        let mut camber = Vec::with_capacity(CAMBER_STATIONS + 1);
        let mut max_thickness = 0.0;
        for i in 0..=CAMBER_STATIONS {
            let x = min_x + chord_extent * (i as Real) / (CAMBER_STATIONS as Real);
            let yt = interp_sorted(&top, x);
            let yb = interp_sorted(&bottom, x);
            camber.push(Coord {
                x,
                y: (yt + yb) * 0.5,
            });
            max_thickness = (yt - yb).max(max_thickness);
        }

        let mut closed = ring;
        closed.push(closed[0]);
        let outline = GeoPolygon::new(LineString::new(closed), vec![]).orient(Direction::Default);

        Ok(AirfoilPath {
            outline,
            top,
            bottom,
            camber,
            max_thickness_ratio: max_thickness / chord_extent,
        })
    }

    /// **NACA 4-digit analytic airfoil**, authored at the 100-unit reference chord.
    ///
    /// - `max_camber`: first digit, max camber as % of chord (`2` in 2412)
    /// - `camber_position`: second digit, position of max camber in tenths (`4` in 2412)
    /// - `thickness`: last two digits, max thickness as % of chord (`12` in 2412)
    /// - `samples`: points per surface
    ///
    /// Upper/lower surfaces are offset perpendicular to the mean camber line:
    /// ```text
    /// x_u = x - y_t·sin(θ)   y_u = y_c + y_t·cos(θ)
    /// x_l = x + y_t·sin(θ)   y_l = y_c - y_t·cos(θ)
    /// ```
    /// where θ is the camber-line slope angle.
    pub fn naca4(
        max_camber: Real,
        camber_position: Real,
        thickness: Real,
        samples: usize,
    ) -> Result<Self, ConfigError> {
        let max_camber_fraction = max_camber / 100.0;
        let camber_pos = camber_position / 10.0;

        // thickness half-profile
        let half_profile = |x: Real| -> Real {
            5.0 * thickness / 100.0
                * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x * x + 0.2843 * x * x * x
                    - 0.1015 * x * x * x * x)
        };

        // mean-camber line & slope
        let camber = |x: Real| -> (Real, Real) {
            if max_camber_fraction <= EPSILON || camber_pos <= EPSILON {
                (0.0, 0.0)
            } else if x < camber_pos {
                let yc = max_camber_fraction / (camber_pos * camber_pos)
                    * (2.0 * camber_pos * x - x * x);
                let dy =
                    2.0 * max_camber_fraction / (camber_pos * camber_pos) * (camber_pos - x);
                (yc, dy)
            } else {
                let yc = max_camber_fraction / ((1.0 - camber_pos).powi(2))
                    * ((1.0 - 2.0 * camber_pos) + 2.0 * camber_pos * x - x * x);
                let dy = 2.0 * max_camber_fraction / ((1.0 - camber_pos).powi(2))
                    * (camber_pos - x);
                (yc, dy)
            }
        };

        let chord = REFERENCE_CHORD;
        let n = samples as Real;
        let mut coords: Vec<Coord<Real>> = Vec::with_capacity(2 * samples + 1);

        // leading-edge → trailing-edge (upper)
        for i in 0..=samples {
            let xc = i as Real / n; // 0–1
            let t = half_profile(xc);
            let (yc_val, dy) = camber(xc);
            let theta = dy.atan();

            coords.push(Coord {
                x: chord * (xc - t * theta.sin()),
                y: chord * (yc_val + t * theta.cos()),
            });
        }

        // trailing-edge → leading-edge (lower)
        for i in (1..samples).rev() {
            let xc = i as Real / n;
            let t = half_profile(xc);
            let (yc_val, dy) = camber(xc);
            let theta = dy.atan();

            coords.push(Coord {
                x: chord * (xc + t * theta.sin()),
                y: chord * (yc_val - t * theta.cos()),
            });
        }

        Self::from_outline(coords)
    }

    /// Outline ring without the closing duplicate point.
    pub fn ring(&self) -> &[Coord<Real>] {
        let coords = &self.outline.exterior().0;
        &coords[..coords.len().saturating_sub(1)]
    }

    pub fn surface_samples(&self, surface: Surface) -> &[Coord<Real>] {
        match surface {
            Surface::Top => &self.top,
            Surface::Bottom => &self.bottom,
            Surface::Camber => &self.camber,
        }
    }

    /// Nearest-point-at-or-after-x lookup on a surface sample list.
    ///
    /// The lists are small (well under 1000 points), so a linear scan is fine.
    /// Queries past the last sample return the last sample's y.
    pub fn surface_y_at(&self, surface: Surface, x: Real) -> Real {
        let samples = self.surface_samples(surface);
        samples
            .iter()
            .find(|c| c.x + EPSILON >= x)
            .or_else(|| samples.last())
            .map(|c| c.y)
            .unwrap_or(0.0)
    }

    /// Morph two airfoils into one intermediate section via the convex hull of
    /// both outlines. This is a deliberate approximation, not a true shape
    /// interpolation: it smooths the hand-off across a transition boundary at
    /// the cost of filling any concavity of either section.
    pub fn hull_blend(a: &AirfoilPath, b: &AirfoilPath) -> Result<AirfoilPath, ConfigError> {
        let mut coords: Vec<Coord<Real>> = Vec::with_capacity(a.ring().len() + b.ring().len());
        coords.extend_from_slice(a.ring());
        coords.extend_from_slice(b.ring());
        let hull = MultiPoint::from(coords).convex_hull();
        Self::from_outline(hull.exterior().0.clone())
    }
}

/// Ordered span-position → airfoil selection table.
///
/// Entries are `(threshold, airfoil)` pairs kept sorted by descending
/// threshold; selection is a linear scan returning the first entry whose
/// threshold the query position meets. With root/mid/tip entries this gives
/// the tip > mid > root precedence, and adding further sections is just
/// another row.
#[derive(Clone, Debug)]
pub struct AirfoilTable {
    entries: Vec<(Real, Arc<AirfoilPath>)>,
}

impl AirfoilTable {
    pub fn new(mut entries: Vec<(Real, Arc<AirfoilPath>)>) -> Self {
        entries.sort_by(|a, b| b.0.total_cmp(&a.0));
        AirfoilTable { entries }
    }

    /// The airfoil governing normalized span position `nz`.
    ///
    /// Positions below every threshold fall back to the lowest entry.
    /// `None` only for an empty table.
    pub fn select(&self, nz: Real) -> Option<&Arc<AirfoilPath>> {
        self.entries
            .iter()
            .find(|(threshold, _)| nz >= *threshold)
            .map(|(_, airfoil)| airfoil)
            .or_else(|| self.entries.last().map(|(_, airfoil)| airfoil))
    }

    /// Internal transition boundaries: `(boundary nz, inboard airfoil,
    /// outboard airfoil)`, skipping the root entry's own threshold.
    pub fn boundaries(&self) -> Vec<(Real, Arc<AirfoilPath>, Arc<AirfoilPath>)> {
        let mut out = Vec::new();
        for pair in self.entries.windows(2) {
            let (threshold, outboard) = (&pair[0].0, &pair[0].1);
            let inboard = &pair[1].1;
            if *threshold > 0.0 {
                out.push((*threshold, inboard.clone(), outboard.clone()));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naca0015() -> AirfoilPath {
        AirfoilPath::naca4(0.0, 0.0, 15.0, 100).unwrap()
    }

    #[test]
    fn symmetric_foil_surfaces_mirror() {
        let foil = naca0015();
        for i in 0..=10 {
            let x = REFERENCE_CHORD * (i as Real) / 10.0;
            let yt = interp_sorted(&foil.top, x);
            let yb = interp_sorted(&foil.bottom, x);
            assert!(
                (yt + yb).abs() < 0.05,
                "top/bottom not reflections at x={}: {} vs {}",
                x,
                yt,
                yb
            );
        }
    }

    #[test]
    fn symmetric_foil_camber_is_flat() {
        let foil = naca0015();
        for c in &foil.camber {
            assert!(c.y.abs() < 0.05, "camber not flat at x={}: y={}", c.x, c.y);
        }
    }

    #[test]
    fn thickness_ratio_matches_digits() {
        let foil = naca0015();
        assert!(
            (foil.max_thickness_ratio - 0.15).abs() < 0.01,
            "NACA 0015 thickness ratio was {}",
            foil.max_thickness_ratio
        );
    }

    #[test]
    fn blunt_trailing_edge_ties_are_averaged() {
        // A wedge with a vertical blunt trailing edge: two points share max x.
        let coords = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 100.0, y: 4.0 },
            Coord { x: 100.0, y: -2.0 },
        ];
        let foil = AirfoilPath::from_outline(coords).unwrap();
        let te_top = foil.top.last().unwrap();
        assert!((te_top.x - 100.0).abs() < 1e-9);
        // trailing-edge center averages the tied points: y = (4 - 2) / 2 = 1
        assert!((te_top.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn selection_prefers_tip_over_mid_over_root() {
        let root = Arc::new(naca0015());
        let mid = Arc::new(AirfoilPath::naca4(2.0, 4.0, 12.0, 100).unwrap());
        let tip = Arc::new(AirfoilPath::naca4(4.0, 4.0, 10.0, 100).unwrap());
        let table = AirfoilTable::new(vec![
            (0.0, root.clone()),
            (0.8, tip.clone()),
            (0.4, mid.clone()),
        ]);
        assert!(Arc::ptr_eq(table.select(0.2).unwrap(), &root));
        assert!(Arc::ptr_eq(table.select(0.4).unwrap(), &mid));
        assert!(Arc::ptr_eq(table.select(0.79).unwrap(), &mid));
        assert!(Arc::ptr_eq(table.select(0.9).unwrap(), &tip));
        assert_eq!(table.boundaries().len(), 2);
    }

    #[test]
    fn empty_table_selects_nothing() {
        let table = AirfoilTable::new(vec![]);
        assert!(table.select(0.0).is_none());
        assert!(table.select(0.5).is_none());
        assert!(table.boundaries().is_empty());
    }

    #[test]
    fn hull_blend_spans_both_outlines() {
        use geo::BoundingRect;
        let thin = AirfoilPath::naca4(0.0, 0.0, 9.0, 80).unwrap();
        let thick = naca0015();
        let blend = AirfoilPath::hull_blend(&thin, &thick).unwrap();
        let rect = blend.outline.bounding_rect().unwrap();
        // hull must be at least as thick as the thicker input
        let thick_rect = thick.outline.bounding_rect().unwrap();
        assert!(rect.max().y >= thick_rect.max().y - 1e-9);
        assert!(rect.min().y <= thick_rect.min().y + 1e-9);
    }
}
