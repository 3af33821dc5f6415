//! The boundary to the external solid-modeling backend.
//!
//! Everything this crate computes is handed off through [`SolidKernel`]: an
//! ordered stack of closed [`Profile`]s to loft, plus Boolean combinations and
//! affine transforms of the resulting solids. The kernel's representation
//! (BSP polygons, indexed meshes, ...) is opaque here.

use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::profile::Profile;
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};

/// Loft + Boolean operations + transformations on an opaque solid type.
pub trait SolidKernel: Sized + Clone {
    /// Skin a watertight solid through an ordered stack of closed profiles.
    ///
    /// Profiles must be given in ascending span order and there must be at
    /// least two of them; callers in this crate enforce both before handing off.
    fn loft(profiles: &[Profile]) -> Self;

    fn union(&self, other: &Self) -> Self;
    fn difference(&self, other: &Self) -> Self;
    fn intersection(&self, other: &Self) -> Self;
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Returns a new Self translated so that its bounding-box center is at the origin (0,0,0).
    fn center(&self) -> Self {
        let aabb = self.bounding_box();

        // Compute the AABB center
        let center_x = (aabb.mins.x + aabb.maxs.x) * 0.5;
        let center_y = (aabb.mins.y + aabb.maxs.y) * 0.5;
        let center_z = (aabb.mins.z + aabb.maxs.z) * 0.5;

        // Translate so that the bounding-box center goes to the origin
        self.translate(-center_x, -center_y, -center_z)
    }

    /// Translates the solid so that its bottommost point(s) sit exactly at z=0.
    fn float(&self) -> Self {
        let aabb = self.bounding_box();
        let min_z = aabb.mins.z;
        self.translate(0.0, 0.0, -min_z)
    }

    /// Rotates the solid by x_degrees, y_degrees, z_degrees
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());

        // Compose them in the desired order
        let rot = rz * ry * rx;
        self.transform(&rot.to_homogeneous())
    }

    /// Scales the solid by scale_x, scale_y, scale_z
    fn scale(&self, sx: Real, sy: Real, sz: Real) -> Self {
        let mat4 = Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz));
        self.transform(&mat4)
    }
}
