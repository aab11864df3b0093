pub use crate::config::{GizmoConfig, GizmoVisuals};
pub use crate::dragger::{DragHost, DragKey, Dragger, DraggerInput};
pub use crate::gizmo::{Gizmo, GizmoError, HitType};
pub use crate::math::{Plane, Ray, Transform};
pub use crate::mesh::{AssetError, MaterialDesc, MeshData};
pub use crate::provider::{
    DepthCompare, GizmoAssets, GizmoMaterial, GizmoMesh, MaterialHandle, MeshHandle, RaycastHit,
    RenderState, RenderTarget, SceneRaycast,
};

pub use enumset::{enum_set, EnumSet};

pub use mint;

pub use ecolor::Rgba;
pub use emath::{Pos2, Rect};
