use ecolor::Rgba;
use std::f64::consts::FRAC_PI_2;
use thiserror::Error;

use crate::config::GizmoConfig;
use crate::math::{ray_mesh_intersection, DMat4, DQuat, DVec3, Ray, Transform};
use crate::mesh::AssetError;
use crate::provider::{
    GizmoAssets, GizmoMaterial, GizmoMesh, RenderState, RenderTarget, ARROW_MESH_ASSET,
    DRAG_PLANE_MESH_ASSET, GIZMO_MATERIAL_ASSET,
};

/// A required gizmo asset failed to load. The gizmo is not constructed.
#[derive(Debug, Error)]
#[error("failed to load gizmo asset `{name}`")]
pub struct GizmoError {
    pub name: &'static str,
    #[source]
    pub source: AssetError,
}

/// Which handle of the gizmo a ray intersected.
///
/// Single-axis variants are the arrow handles, two-axis variants the planar
/// drag handles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HitType {
    None,
    TranslateX,
    TranslateY,
    TranslateZ,
    TranslateXY,
    TranslateXZ,
    TranslateZY,
}

/// The translation gizmo: three arrow handles and three planar drag handles,
/// built from two meshes at six fixed orientations.
///
/// The arrow mesh points along its local +X axis; the drag plane mesh lies
/// in its local XY plane, offset into the positive quadrant.
pub struct Gizmo {
    position: DVec3,
    arrow: GizmoMesh,
    drag_plane: GizmoMesh,
    material: GizmoMaterial,
    owns_meshes: bool,
}

/// Orientation of the arrow handle for the given world axis.
fn arrow_rotation(hit: HitType) -> DQuat {
    match hit {
        HitType::TranslateY => DQuat::from_rotation_z(FRAC_PI_2),
        HitType::TranslateZ => DQuat::from_rotation_y(-FRAC_PI_2),
        _ => DQuat::IDENTITY,
    }
}

/// Orientation of the planar handle for the given translation plane. The
/// mesh's positive quadrant stays in the positive quadrant of the target
/// plane.
fn plane_rotation(hit: HitType) -> DQuat {
    match hit {
        // Local XY -> world ZY
        HitType::TranslateZY => DQuat::from_rotation_y(-FRAC_PI_2),
        // Local XY -> world XZ
        HitType::TranslateXZ => DQuat::from_rotation_x(FRAC_PI_2),
        // Local XY is the world XY
        _ => DQuat::IDENTITY,
    }
}

/// Handle scale compensating for camera distance, so handles stay usable
/// both far away and up close.
fn handle_scale(distance: f64) -> f64 {
    (distance.clamp(0.5, 500.0) / 15.0).sqrt()
}

impl Gizmo {
    /// Loads the gizmo's meshes and material from their named assets and
    /// takes ownership of them.
    ///
    /// Any load failure is fatal: nothing already loaded is kept.
    pub fn load(assets: &mut impl GizmoAssets) -> Result<Self, GizmoError> {
        let arrow = assets
            .load_mesh(ARROW_MESH_ASSET)
            .map_err(|source| GizmoError {
                name: ARROW_MESH_ASSET,
                source,
            })?;

        let drag_plane = match assets.load_mesh(DRAG_PLANE_MESH_ASSET) {
            Ok(mesh) => mesh,
            Err(source) => {
                assets.dispose_mesh(&arrow);
                return Err(GizmoError {
                    name: DRAG_PLANE_MESH_ASSET,
                    source,
                });
            }
        };

        let material = match assets.load_material(GIZMO_MATERIAL_ASSET) {
            Ok(material) => material,
            Err(source) => {
                assets.dispose_mesh(&arrow);
                assets.dispose_mesh(&drag_plane);
                return Err(GizmoError {
                    name: GIZMO_MATERIAL_ASSET,
                    source,
                });
            }
        };

        Ok(Self {
            position: DVec3::ZERO,
            arrow,
            drag_plane,
            material,
            owns_meshes: true,
        })
    }

    /// Creates a gizmo from externally supplied meshes and material. The
    /// caller keeps ownership; [`Gizmo::dispose`] never releases them.
    pub fn from_parts(arrow: GizmoMesh, drag_plane: GizmoMesh, material: GizmoMaterial) -> Self {
        Self {
            position: DVec3::ZERO,
            arrow,
            drag_plane,
            material,
            owns_meshes: false,
        }
    }

    /// Releases the meshes if this gizmo owns them. Safe to call more than
    /// once; only the first call releases anything.
    pub fn dispose(&mut self, assets: &mut impl GizmoAssets) {
        if self.owns_meshes {
            assets.dispose_mesh(&self.arrow);
            assets.dispose_mesh(&self.drag_plane);
            self.owns_meshes = false;
        }
    }

    /// World placement of the gizmo.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    /// Tests the ray against every handle and returns the first hit together
    /// with the world intersection point.
    ///
    /// Planar handles are tested before arrows: they are the larger targets
    /// and would otherwise be shadowed by the arrows along their edges.
    /// Handles are tested at the same distance-compensated scale they are
    /// rendered with; the ray origin stands in for the camera position.
    pub fn hit_test(&self, ray: &Ray) -> (HitType, DVec3) {
        let scale = handle_scale(self.position.distance(ray.origin));

        let handles = [
            (HitType::TranslateZY, &self.drag_plane, plane_rotation(HitType::TranslateZY)),
            (HitType::TranslateXZ, &self.drag_plane, plane_rotation(HitType::TranslateXZ)),
            (HitType::TranslateXY, &self.drag_plane, plane_rotation(HitType::TranslateXY)),
            (HitType::TranslateX, &self.arrow, arrow_rotation(HitType::TranslateX)),
            (HitType::TranslateY, &self.arrow, arrow_rotation(HitType::TranslateY)),
            (HitType::TranslateZ, &self.arrow, arrow_rotation(HitType::TranslateZ)),
        ];

        for (hit, mesh, rotation) in handles {
            let local_to_world = DMat4::from_scale_rotation_translation(
                DVec3::splat(scale),
                rotation,
                self.position,
            );

            if let Some((_, point)) = ray_mesh_intersection(&mesh.data, &local_to_world, ray) {
                return (hit, point);
            }
        }

        (HitType::None, DVec3::ZERO)
    }

    /// Draws all six handles in two passes: an opaque depth-tested pass,
    /// then an alpha-blended overlay pass that ignores the depth test so the
    /// handles stay visible through occluding geometry.
    pub fn render(&self, config: &GizmoConfig, target: &mut impl RenderTarget) {
        self.render_pass(config, target, false);
        self.render_pass(config, target, true);
    }

    fn render_pass(&self, config: &GizmoConfig, target: &mut impl RenderTarget, transparent: bool) {
        let distance = (self.position - config.camera_position()).length();
        let scale = DVec3::splat(handle_scale(distance));

        let visuals = &config.visuals;
        let axes = [
            (visuals.x_color, HitType::TranslateX, HitType::TranslateZY),
            (visuals.y_color, HitType::TranslateY, HitType::TranslateXZ),
            (visuals.z_color, HitType::TranslateZ, HitType::TranslateXY),
        ];

        for (color, arrow, plane) in axes {
            let alpha = if transparent {
                visuals.transparent_alpha
            } else {
                1.0
            };
            let color = Rgba::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha);
            let state = if transparent {
                RenderState::overlay(color)
            } else {
                RenderState::opaque(color)
            };

            let transform =
                Transform::from_scale_rotation_translation(scale, arrow_rotation(arrow), self.position);
            target.draw(self.arrow.handle, self.material.handle, 0, &transform, &state);

            let transform =
                Transform::from_scale_rotation_translation(scale, plane_rotation(plane), self.position);
            target.draw(
                self.drag_plane.handle,
                self.material.handle,
                0,
                &transform,
                &state,
            );
        }
    }
}
