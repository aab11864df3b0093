pub use ecolor::Rgba;

use emath::{Pos2, Rect};

use crate::math::{screen_to_world, DMat4, DVec3, Ray, Vec4Swizzles};

/// Configuration of the gizmo: the active viewpoint and the visual style.
///
/// The camera is described by its view and projection matrices; pointer rays
/// and handle scaling are derived from them.
#[derive(Debug, Copy, Clone)]
pub struct GizmoConfig {
    /// View matrix for the gizmo, aligning it with the camera's viewpoint.
    pub view_matrix: mint::RowMatrix4<f64>,
    /// Projection matrix for the gizmo, determining how it is projected onto the screen.
    pub projection_matrix: mint::RowMatrix4<f64>,
    /// Screen area where the gizmo is displayed.
    pub viewport: Rect,
    /// Visual settings for the gizmo handles.
    pub visuals: GizmoVisuals,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            view_matrix: DMat4::IDENTITY.into(),
            projection_matrix: DMat4::IDENTITY.into(),
            viewport: Rect::NOTHING,
            visuals: GizmoVisuals::default(),
        }
    }
}

impl GizmoConfig {
    /// World space position of the camera.
    pub fn camera_position(&self) -> DVec3 {
        DMat4::from(self.view_matrix).inverse().w_axis.xyz()
    }

    /// Calculates a world space ray from given screen space position.
    ///
    /// Returns [`None`] when the viewport is not finite.
    pub fn pointer_ray(&self, screen_pos: Pos2) -> Option<Ray> {
        if !self.viewport.is_finite() {
            return None;
        }

        let mat = self.view_projection().inverse();
        let origin = screen_to_world(self.viewport, mat, screen_pos, -1.0);
        let target = screen_to_world(self.viewport, mat, screen_pos, 1.0);

        Some(Ray::new(origin, target - origin))
    }

    pub(crate) fn view_projection(&self) -> DMat4 {
        DMat4::from(self.projection_matrix) * DMat4::from(self.view_matrix)
    }
}

/// Controls the visual style of the gizmo.
#[derive(Debug, Copy, Clone)]
pub struct GizmoVisuals {
    /// Color of the x axis handles
    pub x_color: Rgba,
    /// Color of the y axis handles
    pub y_color: Rgba,
    /// Color of the z axis handles
    pub z_color: Rgba,
    /// Alpha used for the transparent overlay pass
    pub transparent_alpha: f32,
}

impl Default for GizmoVisuals {
    fn default() -> Self {
        // Axis color convention of the map format this editor targets.
        Self {
            x_color: Rgba::from_rgb(0.0, 0.0, 1.0),
            y_color: Rgba::from_rgb(0.0, 1.0, 0.0),
            z_color: Rgba::from_rgb(1.0, 0.0, 0.0),
            transparent_alpha: 0.5,
        }
    }
}
