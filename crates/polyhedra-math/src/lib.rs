#![warn(missing_docs)]

//! Math types for the polyhedra kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types for
//! convex-polyhedron geometry: points, vectors, rigid transforms, poses,
//! and the shared tolerance used by every geometric comparison.

use nalgebra::{Matrix3, Matrix4, Unit, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Geometric tolerance shared by the whole kernel.
///
/// Coordinates are kept at unit edge length, so a single absolute
/// tolerance covers both lengths and angles.
pub const PRECISION: f64 = 1e-3;

/// Check if a scalar is effectively zero at kernel precision.
pub fn is_zero(d: f64) -> bool {
    d.abs() < PRECISION
}

/// Check if two points are coincident at kernel precision.
pub fn points_equal(a: &Point3, b: &Point3) -> bool {
    (a - b).norm() < PRECISION
}

/// Unsigned angle between two vectors, in `[0, pi]`.
pub fn angle_between(a: &Vec3, b: &Vec3) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}

/// Check if two vectors point in the same direction at kernel precision.
pub fn is_codirectional(a: &Vec3, b: &Vec3) -> bool {
    angle_between(a, b) < PRECISION
}

/// Check if two vectors point in exactly opposite directions.
pub fn is_inverse(a: &Vec3, b: &Vec3) -> bool {
    angle_between(&-a, b) < PRECISION
}

/// Centroid of a set of points.
///
/// Panics on an empty slice; callers always pass at least a triangle.
pub fn centroid(points: &[Point3]) -> Point3 {
    let sum = points
        .iter()
        .fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

/// Unit normal of a planar counterclockwise vertex loop.
///
/// Uses the cross product of the first two boundary edges, so the loop
/// need only be planar at kernel precision.
pub fn loop_normal(points: &[Point3]) -> Vec3 {
    let a = points[0] - points[1];
    let b = points[1] - points[2];
    a.cross(&b).normalize()
}

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `v`.
    pub fn translation(v: &Vec3) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = v.x;
        m[(1, 3)] = v.y;
        m[(2, 3)] = v.z;
        Self { matrix: m }
    }

    /// Uniform scale about the origin.
    pub fn uniform_scale(s: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = s;
        m[(1, 1)] = s;
        m[(2, 2)] = s;
        Self { matrix: m }
    }

    /// Reflection through the plane `x = 0`.
    pub fn reflection_x() -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = -1.0;
        Self { matrix: m }
    }

    /// Rotation about an arbitrary axis through the origin by `angle` radians.
    ///
    /// Uses Rodrigues' rotation formula.
    pub fn rotation_about_axis(axis: &Dir3, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.as_ref().x, axis.as_ref().y, axis.as_ref().z);
        let mut m = Matrix4::identity();
        m[(0, 0)] = t * x * x + c;
        m[(0, 1)] = t * x * y - s * z;
        m[(0, 2)] = t * x * z + s * y;
        m[(1, 0)] = t * x * y + s * z;
        m[(1, 1)] = t * y * y + c;
        m[(1, 2)] = t * y * z - s * x;
        m[(2, 0)] = t * x * z - s * y;
        m[(2, 1)] = t * y * z + s * x;
        m[(2, 2)] = t * z * z + c;
        Self { matrix: m }
    }

    /// The rotation carrying the right-handed frame spanned by `(u1, u2)`
    /// onto the frame spanned by `(v1, v2)`.
    ///
    /// Each pair is completed to an orthonormal basis by Gram-Schmidt and
    /// a cross product; the result maps the first basis onto the second.
    pub fn orthonormal_basis_map(u1: &Vec3, u2: &Vec3, v1: &Vec3, v2: &Vec3) -> Self {
        let m_u = orthonormal_basis(u1, u2);
        let m_v = orthonormal_basis(v1, v2);
        let r = m_v * m_u.transpose();
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
        Self { matrix: m }
    }

    /// Conjugate this transform so it acts about `origin` instead of the
    /// coordinate origin.
    pub fn about_origin(&self, origin: &Point3) -> Self {
        Transform::translation(&origin.coords)
            .then_apply(self)
            .compose(&Transform::translation(&-origin.coords))
    }

    /// Compose so that `self` is applied first, then `other`.
    pub fn then_apply(&self, other: &Transform) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Compose so that `other` is applied first, then `self`.
    pub fn compose(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

fn orthonormal_basis(v1: &Vec3, v2: &Vec3) -> Matrix3<f64> {
    let e1 = v1.normalize();
    let e2 = (v2 - v2.dot(&e1) * e1).normalize();
    let e3 = e1.cross(&e2);
    Matrix3::from_columns(&[e1, e2, e3])
}

/// A reference frame attached to a solid: where it sits, how big it is,
/// and which way it faces.
///
/// Two solids with matching poses can be carried onto each other by
/// [`Pose::map_onto`]. The orientation pair need not be orthogonal; it is
/// orthonormalized when the frame is built.
#[derive(Debug, Clone)]
pub struct Pose {
    /// Frame origin in world space.
    pub origin: Point3,
    /// Characteristic length (edge length, inradius, ...). Must be positive.
    pub scale: f64,
    /// Primary and secondary orientation vectors.
    pub orientation: (Vec3, Vec3),
}

impl Pose {
    /// The similarity transform carrying this pose onto `target`:
    /// rotate the orientation frame, rescale by the ratio of scales,
    /// and move the origin.
    pub fn map_onto(&self, target: &Pose) -> Transform {
        let rotate = Transform::orthonormal_basis_map(
            &self.orientation.0,
            &self.orientation.1,
            &target.orientation.0,
            &target.orientation.1,
        )
        .about_origin(&self.origin);
        let scale = Transform::uniform_scale(target.scale / self.scale).about_origin(&self.origin);
        let translate = Transform::translation(&(target.origin - self.origin));
        rotate.then_apply(&scale).then_apply(&translate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_rotation_about_axis() {
        let axis = Dir3::new_normalize(Vec3::z());
        let t = Transform::rotation_about_axis(&axis, PI / 2.0);
        let p = t.apply_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_about_origin() {
        // A half turn about z through (1, 0, 0) fixes that point.
        let axis = Dir3::new_normalize(Vec3::z());
        let origin = Point3::new(1.0, 0.0, 0.0);
        let t = Transform::rotation_about_axis(&axis, PI).about_origin(&origin);
        let fixed = t.apply_point(&origin);
        assert_relative_eq!((fixed - origin).norm(), 0.0, epsilon = 1e-12);
        let moved = t.apply_point(&Point3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(moved.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_orthonormal_basis_map() {
        // Carry the (x, y) frame onto the (y, z) frame.
        let t = Transform::orthonormal_basis_map(&Vec3::x(), &Vec3::y(), &Vec3::y(), &Vec3::z());
        let r = t.apply_vec(&Vec3::x());
        assert_relative_eq!((r - Vec3::y()).norm(), 0.0, epsilon = 1e-12);
        let r = t.apply_vec(&Vec3::y());
        assert_relative_eq!((r - Vec3::z()).norm(), 0.0, epsilon = 1e-12);
        // Handedness is preserved.
        let r = t.apply_vec(&Vec3::z());
        assert_relative_eq!((r - Vec3::x()).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_basis_map_orthogonalizes_secondary() {
        // Secondary vectors need not be perpendicular to the primary.
        let skew = Vec3::new(1.0, 1.0, 0.0);
        let t = Transform::orthonormal_basis_map(&Vec3::x(), &skew, &Vec3::x(), &Vec3::y());
        let r = t.apply_vec(&Vec3::x());
        assert_relative_eq!((r - Vec3::x()).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pose_map_onto() {
        let a = Pose {
            origin: Point3::origin(),
            scale: 1.0,
            orientation: (Vec3::z(), Vec3::x()),
        };
        let b = Pose {
            origin: Point3::new(0.0, 0.0, 5.0),
            scale: 2.0,
            orientation: (Vec3::x(), Vec3::z()),
        };
        let t = a.map_onto(&b);
        // a's origin lands on b's origin.
        let o = t.apply_point(&a.origin);
        assert_relative_eq!((o - b.origin).norm(), 0.0, epsilon = 1e-12);
        // A point one unit along a's primary axis lands two units along b's.
        let p = t.apply_point(&Point3::new(0.0, 0.0, 1.0));
        let expected = Point3::new(2.0, 0.0, 5.0);
        assert_relative_eq!((p - expected).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_between() {
        assert_relative_eq!(angle_between(&Vec3::x(), &Vec3::y()), PI / 2.0);
        assert!(is_codirectional(&Vec3::x(), &(Vec3::x() * 3.0)));
        assert!(is_inverse(&Vec3::x(), &-Vec3::x()));
    }

    #[test]
    fn test_centroid_and_loop_normal() {
        let square = [
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let c = centroid(&square);
        assert_relative_eq!((c - Point3::new(0.5, 0.5, 1.0)).norm(), 0.0, epsilon = 1e-12);
        let n = loop_normal(&square);
        assert_relative_eq!((n - Vec3::z()).norm(), 0.0, epsilon = 1e-12);
    }
}
