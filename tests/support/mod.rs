//! Shared test fixtures: a point-cloud stand-in for the solid kernel and a
//! reference wing configuration.
#![allow(dead_code)]

use foilgen::airfoil::AirfoilPath;
use foilgen::float_types::Real;
use foilgen::float_types::parry3d::bounding_volume::Aabb;
use foilgen::profile::Profile;
use foilgen::traits::SolidKernel;
use foilgen::wing::{
    AirfoilTransitionConfig, AnhedralConfig, ChordProfile, WashoutConfig, WingConfig,
};
use nalgebra::{Matrix4, Point3};
use std::sync::Arc;

pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// A deliberately dumb kernel: a solid is the point cloud of everything
/// lofted into it. Booleans operate on bounding boxes, which is enough to
/// assert where geometry ended up without a real CSG backend.
#[derive(Clone, Debug)]
pub struct StubSolid {
    pub points: Vec<Point3<Real>>,
}

fn inside(aabb: &Aabb, p: &Point3<Real>) -> bool {
    let eps = 1e-9;
    p.x >= aabb.mins.x - eps
        && p.x <= aabb.maxs.x + eps
        && p.y >= aabb.mins.y - eps
        && p.y <= aabb.maxs.y + eps
        && p.z >= aabb.mins.z - eps
        && p.z <= aabb.maxs.z + eps
}

impl SolidKernel for StubSolid {
    fn loft(profiles: &[Profile]) -> Self {
        StubSolid {
            points: profiles.iter().flat_map(|p| p.points.clone()).collect(),
        }
    }

    fn union(&self, other: &Self) -> Self {
        let mut points = self.points.clone();
        points.extend_from_slice(&other.points);
        StubSolid { points }
    }

    fn difference(&self, other: &Self) -> Self {
        let bb = other.bounding_box();
        StubSolid {
            points: self
                .points
                .iter()
                .copied()
                .filter(|p| !inside(&bb, p))
                .collect(),
        }
    }

    fn intersection(&self, other: &Self) -> Self {
        let bb = other.bounding_box();
        StubSolid {
            points: self
                .points
                .iter()
                .copied()
                .filter(|p| inside(&bb, p))
                .collect(),
        }
    }

    fn transform(&self, matrix: &Matrix4<Real>) -> Self {
        StubSolid {
            points: self.points.iter().map(|p| matrix.transform_point(p)).collect(),
        }
    }

    fn bounding_box(&self) -> Aabb {
        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
        for p in &self.points {
            mins = Point3::new(mins.x.min(p.x), mins.y.min(p.y), mins.z.min(p.z));
            maxs = Point3::new(maxs.x.max(p.x), maxs.y.max(p.y), maxs.z.max(p.z));
        }
        if mins.x > maxs.x {
            return Aabb::new(Point3::origin(), Point3::origin());
        }
        Aabb::new(mins, maxs)
    }
}

pub fn naca0015() -> Arc<AirfoilPath> {
    Arc::new(AirfoilPath::naca4(0.0, 0.0, 15.0, 100).unwrap())
}

/// The reference wing used across the suite: 575 mm span, trapezoidal
/// 149 → 50 mm chord, quarter-chord rotation axis.
pub fn test_wing() -> WingConfig {
    WingConfig {
        section_count: 24,
        span_mm: 575.0,
        center_line_fraction: 0.25,
        chord: ChordProfile::Trapezoidal { root_chord_mm: 149.0, tip_chord_mm: 50.0 },
        washout: WashoutConfig::none(),
        anhedral: AnhedralConfig::none(),
        transitions: AirfoilTransitionConfig::uniform(naca0015()),
    }
}
