//! Closed 3D cross-section profiles, the currency handed to [`SolidKernel::loft`].
//!
//! A [`Profile`] is an ordered ring of 3D points without a repeated closing
//! point. Wing slices, hollow-cavity outlines, spar cross-sections, and print
//! connectors are all expressed as profiles before the kernel skins them.
//!
//! [`SolidKernel::loft`]: crate::traits::SolidKernel::loft

use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::float_types::{EPSILON, Real, TAU};
use geo::LineString;
use nalgebra::{Matrix4, Point3, Translation3, Vector3};

/// An ordered, closed ring of 3D points (first point is not repeated at the end).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub points: Vec<Point3<Real>>,
}

impl Profile {
    pub const fn new() -> Self {
        Profile { points: Vec::new() }
    }

    /// Lift a 2D ring into 3D on the plane `z = z`.
    ///
    /// A trailing coordinate equal to the first (geo's closed-ring convention)
    /// is dropped so the ring stays implicit-closed.
    pub fn from_path2(path: &LineString<Real>, z: Real) -> Self {
        let coords = &path.0;
        let mut n = coords.len();
        if n > 1 && coords[0] == coords[n - 1] {
            n -= 1;
        }
        let points = coords[..n]
            .iter()
            .map(|c| Point3::new(c.x, c.y, z))
            .collect();
        Profile { points }
    }

    /// A circle of `radius` in the plane `z = z`, discretized into `segments` points.
    pub fn circle(radius: Real, segments: usize, z: Real) -> Self {
        let points = (0..segments)
            .map(|i| {
                let theta = TAU * (i as Real) / (segments as Real);
                Point3::new(radius * theta.cos(), radius * theta.sin(), z)
            })
            .collect();
        Profile { points }
    }

    /// An axis-aligned rectangle centered on the origin in the plane `z = z`.
    pub fn rectangle(width: Real, length: Real, z: Real) -> Self {
        let hw = width * 0.5;
        let hl = length * 0.5;
        Profile {
            points: vec![
                Point3::new(-hw, -hl, z),
                Point3::new(hw, -hl, z),
                Point3::new(hw, hl, z),
                Point3::new(-hw, hl, z),
            ],
        }
    }

    /// Rectangle covering the XY footprint of `aabb` grown by `margin`, at `z = z`.
    /// Used to build the intersection slabs for print splitting.
    pub fn from_aabb_xy(aabb: &Aabb, margin: Real, z: Real) -> Self {
        let min_x = aabb.mins.x - margin;
        let min_y = aabb.mins.y - margin;
        let max_x = aabb.maxs.x + margin;
        let max_y = aabb.maxs.y + margin;
        Profile {
            points: vec![
                Point3::new(min_x, min_y, z),
                Point3::new(max_x, min_y, z),
                Point3::new(max_x, max_y, z),
                Point3::new(min_x, max_y, z),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Apply an arbitrary 4×4 homogeneous transform to every point.
    pub fn transform(&self, matrix: &Matrix4<Real>) -> Self {
        Profile {
            points: self.points.iter().map(|p| matrix.transform_point(p)).collect(),
        }
    }

    /// Returns a new Profile translated by x, y, and z.
    pub fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.transform(&Translation3::new(x, y, z).to_homogeneous())
    }

    /// Arithmetic-mean center of the ring.
    pub fn centroid(&self) -> Point3<Real> {
        let n = self.points.len().max(1) as Real;
        let sum = self
            .points
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / n)
    }

    /// Scale the ring in its own XY plane about its centroid; z is untouched.
    pub fn scaled_about_centroid(&self, factor: Real) -> Self {
        let c = self.centroid();
        let points = self
            .points
            .iter()
            .map(|p| {
                Point3::new(
                    c.x + (p.x - c.x) * factor,
                    c.y + (p.y - c.y) * factor,
                    p.z,
                )
            })
            .collect();
        Profile { points }
    }

    /// Resample the closed ring to exactly `count` points, uniformly spaced by
    /// arc length. Point counts must match before two profiles can be lerped
    /// or lofted against each other.
    pub fn resampled(&self, count: usize) -> Self {
        let n = self.points.len();
        if n == 0 || count == 0 {
            return Profile::new();
        }

        // Cumulative arc length around the closed ring
        let mut cumulative = Vec::with_capacity(n + 1);
        cumulative.push(0.0);
        for i in 0..n {
            let a = &self.points[i];
            let b = &self.points[(i + 1) % n];
            cumulative.push(cumulative[i] + (b - a).norm());
        }
        let total = cumulative[n];
        if total <= EPSILON {
            return Profile {
                points: vec![self.points[0]; count],
            };
        }

        let mut points = Vec::with_capacity(count);
        let mut seg = 0;
        for k in 0..count {
            let target = total * (k as Real) / (count as Real);
            while seg + 1 < n && cumulative[seg + 1] < target {
                seg += 1;
            }
            let seg_len = cumulative[seg + 1] - cumulative[seg];
            let t = if seg_len <= EPSILON {
                0.0
            } else {
                (target - cumulative[seg]) / seg_len
            };
            let a = &self.points[seg];
            let b = &self.points[(seg + 1) % n];
            points.push(a + (b - a) * t);
        }
        Profile { points }
    }

    /// Rotate the ring's index origin to the point angularly nearest the +x
    /// axis through the centroid. Two rings lerped or lofted point-by-point
    /// must share an index origin; rings that start at different angular
    /// positions pair opposite points and pinch the intermediate sections.
    pub fn with_start_toward_positive_x(&self) -> Self {
        if self.points.is_empty() {
            return self.clone();
        }
        let c = self.centroid();
        let start = self
            .points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let angle_a = (a.y - c.y).atan2(a.x - c.x).abs();
                let angle_b = (b.y - c.y).atan2(b.x - c.x).abs();
                angle_a.total_cmp(&angle_b)
            })
            .map(|(i, _)| i)
            .unwrap_or(0);

        let mut points = Vec::with_capacity(self.points.len());
        points.extend_from_slice(&self.points[start..]);
        points.extend_from_slice(&self.points[..start]);
        Profile { points }
    }

    /// Point-wise linear interpolation between two equal-count rings.
    pub fn lerp(a: &Profile, b: &Profile, t: Real) -> Self {
        debug_assert_eq!(a.len(), b.len(), "lerp requires equal point counts");
        let points = a
            .points
            .iter()
            .zip(&b.points)
            .map(|(pa, pb)| pa + (pb - pa) * t)
            .collect();
        Profile { points }
    }

    /// Axis-aligned bounds of the ring, as a single linear fold over the points.
    pub fn bounding_box(&self) -> Aabb {
        let mut min_x = Real::MAX;
        let mut min_y = Real::MAX;
        let mut min_z = Real::MAX;
        let mut max_x = -Real::MAX;
        let mut max_y = -Real::MAX;
        let mut max_z = -Real::MAX;

        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            min_z = min_z.min(p.z);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
            max_z = max_z.max(p.z);
        }

        if min_x > max_x {
            return Aabb::new(Point3::origin(), Point3::origin());
        }

        Aabb::new(
            Point3::new(min_x, min_y, min_z),
            Point3::new(max_x, max_y, max_z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path2_drops_closing_point() {
        let ring = LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let profile = Profile::from_path2(&ring, 2.0);
        assert_eq!(profile.len(), 3);
        assert!(profile.points.iter().all(|p| p.z == 2.0));
    }

    #[test]
    fn resample_preserves_square_perimeter() {
        let square = Profile::rectangle(2.0, 2.0, 0.0);
        let fine = square.resampled(40);
        assert_eq!(fine.len(), 40);
        // every resampled point still lies on the unit-square boundary
        for p in &fine.points {
            let on_edge = (p.x.abs() - 1.0).abs() < 1e-9 || (p.y.abs() - 1.0).abs() < 1e-9;
            assert!(on_edge, "point {:?} left the square boundary", p);
        }
    }

    #[test]
    fn lerp_midpoint_is_average() {
        let a = Profile::circle(1.0, 16, 0.0);
        let b = Profile::circle(3.0, 16, 4.0);
        let mid = Profile::lerp(&a, &b, 0.5);
        for p in &mid.points {
            assert!((p.z - 2.0).abs() < 1e-12);
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!((r - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn start_alignment_pairs_rings_for_lerp() {
        let circle = Profile::circle(4.7, 32, 0.0);
        let bar = Profile::rectangle(14.0, 9.0, 0.0)
            .resampled(32)
            .with_start_toward_positive_x();

        // both rings now start near the +x axis
        let first = &bar.points[0];
        assert!(first.x > 0.0);
        assert!(first.y.abs() < first.x, "bar ring start drifted off the +x axis");

        let area = |p: &Profile| {
            let pts = &p.points;
            let n = pts.len();
            let sum: Real = (0..n)
                .map(|i| {
                    let a = &pts[i];
                    let b = &pts[(i + 1) % n];
                    a.x * b.y - b.x * a.y
                })
                .sum();
            sum.abs() * 0.5
        };
        let lo = area(&circle).min(area(&bar));
        let hi = area(&circle).max(area(&bar));
        for t in [0.25, 0.5, 0.75] {
            let mid = area(&Profile::lerp(&circle, &bar, t));
            assert!(
                mid >= lo - 1e-9 && mid <= hi + 1e-9,
                "lerp at t={} pinched: area {} outside [{}, {}]",
                t,
                mid,
                lo,
                hi
            );
        }
    }

    #[test]
    fn scaled_about_centroid_keeps_center() {
        let square = Profile::rectangle(2.0, 4.0, 1.0).translate(5.0, 0.0, 0.0);
        let scaled = square.scaled_about_centroid(0.5);
        let c0 = square.centroid();
        let c1 = scaled.centroid();
        assert!((c0 - c1).norm() < 1e-12);
        let bb = scaled.bounding_box();
        assert!((bb.maxs.x - bb.mins.x - 1.0).abs() < 1e-9);
        assert!((bb.maxs.y - bb.mins.y - 2.0).abs() < 1e-9);
    }
}
