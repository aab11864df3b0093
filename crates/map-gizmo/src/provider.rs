//! Boundary contracts with the host editor.
//!
//! The gizmo core does not own a renderer, an asset pipeline or a physics
//! scene. The host supplies all three through these traits.

use ecolor::Rgba;
use glam::DVec3;

use crate::math::{Ray, Transform};
use crate::mesh::{AssetError, MaterialDesc, MeshData};

/// Geometry asset for the axis arrow handles.
pub const ARROW_MESH_ASSET: &str = "meshes/arrow.obj";
/// Geometry asset for the planar drag handles.
pub const DRAG_PLANE_MESH_ASSET: &str = "meshes/drag_plane.obj";
/// Material configuration resource for all gizmo handles.
pub const GIZMO_MATERIAL_ASSET: &str = "materials/gizmo.json";

/// Opaque renderer-side mesh identifier issued by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Opaque renderer-side material identifier issued by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub u64);

/// A loaded mesh: the renderer handle used for draw calls paired with the
/// CPU geometry used for hit-testing.
#[derive(Debug, Clone)]
pub struct GizmoMesh {
    pub handle: MeshHandle,
    pub data: MeshData,
}

#[derive(Debug, Clone)]
pub struct GizmoMaterial {
    pub handle: MaterialHandle,
    pub desc: MaterialDesc,
}

/// Loads and releases the gizmo's named assets.
///
/// Disposal goes through the provider because the handles refer to renderer
/// resources the provider owns.
pub trait GizmoAssets {
    fn load_mesh(&mut self, name: &str) -> Result<GizmoMesh, AssetError>;
    fn load_material(&mut self, name: &str) -> Result<GizmoMaterial, AssetError>;
    fn dispose_mesh(&mut self, mesh: &GizmoMesh);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DepthCompare {
    LessEqual,
    Always,
}

/// Render state for a single draw call.
///
/// Passed explicitly with every call so no blend or depth flags survive from
/// one draw to the next.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderState {
    pub blending: bool,
    pub depth_compare: DepthCompare,
    pub z_write: bool,
    pub color: Rgba,
}

impl RenderState {
    /// State for the opaque pass: depth-tested, depth-written, no blending.
    pub fn opaque(color: Rgba) -> Self {
        Self {
            blending: false,
            depth_compare: DepthCompare::LessEqual,
            z_write: true,
            color,
        }
    }

    /// State for the transparent overlay pass: alpha-blended, drawn on top
    /// of occluding geometry, depth buffer untouched.
    pub fn overlay(color: Rgba) -> Self {
        Self {
            blending: true,
            depth_compare: DepthCompare::Always,
            z_write: false,
            color,
        }
    }
}

/// Sink for gizmo draw calls.
pub trait RenderTarget {
    fn draw(
        &mut self,
        mesh: MeshHandle,
        material: MaterialHandle,
        submesh: u32,
        transform: &Transform,
        state: &RenderState,
    );
}

/// A single intersection against collidable scene geometry.
#[derive(Debug, Copy, Clone)]
pub struct RaycastHit {
    pub position: mint::Vector3<f64>,
}

/// All-hits raycast query against the scene, used by drop-to-ground.
pub trait SceneRaycast {
    /// Collects every intersection of `ray` with collidable geometry into
    /// `hits`. `reference` is the position the query is made for and lets
    /// the implementation limit its search.
    fn raycast_all(&self, ray: &Ray, reference: DVec3, hits: &mut Vec<RaycastHit>);
}
