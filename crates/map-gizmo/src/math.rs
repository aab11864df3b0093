pub use emath::{Pos2, Rect, Vec2};
pub use glam::{DMat4, DQuat, DVec3, DVec4, Vec4Swizzles};

use crate::mesh::MeshData;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Transform {
    pub scale: mint::Vector3<f64>,
    pub rotation: mint::Quaternion<f64>,
    pub translation: mint::Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: DVec3::ONE.into(),
            rotation: DQuat::IDENTITY.into(),
            translation: DVec3::ZERO.into(),
        }
    }
}

impl Transform {
    pub fn from_scale_rotation_translation(
        scale: impl Into<mint::Vector3<f64>>,
        rotation: impl Into<mint::Quaternion<f64>>,
        translation: impl Into<mint::Vector3<f64>>,
    ) -> Self {
        Self {
            scale: scale.into(),
            rotation: rotation.into(),
            translation: translation.into(),
        }
    }

    /// Local-to-world matrix of this transform.
    pub fn matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(
            self.scale.into(),
            self.rotation.into(),
            self.translation.into(),
        )
    }
}

/// A world space ray with a normalized direction.
#[derive(Debug, Copy, Clone)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn point_at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// An infinite plane given by a point on it and its normal.
#[derive(Debug, Copy, Clone)]
pub struct Plane {
    pub origin: DVec3,
    pub normal: DVec3,
}

impl Plane {
    pub fn new(origin: DVec3, normal: DVec3) -> Self {
        Self { origin, normal }
    }

    /// Finds the intersection point of a ray and this plane.
    ///
    /// Returns [`None`] when the ray is parallel to the plane or the plane
    /// lies behind the ray origin.
    pub fn intersect(&self, ray: &Ray) -> Option<DVec3> {
        let denom = self.normal.dot(ray.direction);

        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.origin - ray.origin).dot(self.normal) / denom;
        (t >= 0.0).then(|| ray.point_at(t))
    }
}

/// Finds the intersection of a ray and a triangle.
///
/// Möller–Trumbore, double-sided: gizmo handles are thin sheets and must be
/// hittable from either side.
pub(crate) fn ray_triangle(ray: &Ray, a: DVec3, b: DVec3, c: DVec3) -> Option<f64> {
    let ab = b - a;
    let ac = c - a;

    let p = ray.direction.cross(ac);
    let det = ab.dot(p);
    if det.abs() < 1e-12 {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(ab);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = ac.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

/// Finds the nearest intersection of a ray and a transformed mesh.
///
/// Returns the ray parameter and the world space intersection point.
pub(crate) fn ray_mesh_intersection(
    mesh: &MeshData,
    local_to_world: &DMat4,
    ray: &Ray,
) -> Option<(f64, DVec3)> {
    let mut nearest: Option<f64> = None;

    for triangle in mesh.triangles() {
        let [a, b, c] = triangle.map(|v| local_to_world.transform_point3(v));

        if let Some(t) = ray_triangle(ray, a, b, c) {
            if nearest.is_none_or(|n| t < n) {
                nearest = Some(t);
            }
        }
    }

    nearest.map(|t| (t, ray.point_at(t)))
}

/// Calculates 3d world coordinates from 2d screen coordinates
pub(crate) fn screen_to_world(viewport: Rect, mat: DMat4, pos: Pos2, z: f64) -> DVec3 {
    let x = (((pos.x - viewport.min.x) / viewport.width()) * 2.0 - 1.0) as f64;
    let y = (((pos.y - viewport.min.y) / viewport.height()) * 2.0 - 1.0) as f64;

    let mut world_pos = mat * DVec4::new(x, -y, z, 1.0);

    // w is zero when far plane is set to infinity
    if world_pos.w.abs() < 1e-7 {
        world_pos.w = 1e-7;
    }

    world_pos /= world_pos.w;

    world_pos.xyz()
}
