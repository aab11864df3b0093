use emath::Pos2;
use enumset::{EnumSet, EnumSetType};
use tracing::debug;

use crate::config::GizmoConfig;
use crate::gizmo::{Gizmo, GizmoError, HitType};
use crate::math::{DVec3, Plane, Ray};
use crate::provider::{GizmoAssets, RaycastHit, RenderTarget, SceneRaycast};

/// Height the drop-to-ground ray is cast from.
const DROP_RAY_HEIGHT: f64 = 4000.0;

/// Interaction state of the dragger. Exactly one holds at any time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum DragMode {
    NoDragging,
    MouseDrag,
    KeyboardDrag,
}

/// Editor actions the dragger reacts to. The host maps its key bindings to
/// these before filling in a [`DraggerInput`].
#[derive(EnumSetType, Debug)]
pub enum DragKey {
    /// Toggles a free planar drag of the selection (classic `G`).
    FreeDrag,
    /// Constrains an active keyboard drag to the X axis.
    AxisX,
    /// Constrains an active keyboard drag to the Y axis.
    AxisY,
    /// Constrains an active keyboard drag to the Z axis.
    AxisZ,
    /// Held together with an axis key, selects the complementary plane
    /// instead of the single axis.
    PlaneModifier,
    /// Sends the dragged items to the nearest ground surface and commits.
    DropToGround,
    /// Aborts the drag, restoring every item's starting position.
    Cancel,
}

/// Input state for one frame of interaction.
#[derive(Default, Clone, Copy, Debug)]
pub struct DraggerInput {
    /// Current cursor position in window coordinates.
    pub cursor_pos: Pos2,
    /// Whether the primary pointer button is being held.
    pub pointer_down: bool,
    /// Whether the primary pointer button was pressed this frame.
    pub pointer_pressed: bool,
    /// Keys pressed this frame (edge-triggered).
    pub pressed: EnumSet<DragKey>,
    /// Keys currently held.
    pub held: EnumSet<DragKey>,
}

/// Capabilities the host editor provides for its draggable items.
pub trait DragHost {
    type Item;

    /// Current world position of the item.
    fn position(&self, item: &Self::Item) -> mint::Vector3<f64>;

    /// Applies a new world position to the item. Called at most once per
    /// item per update.
    fn set_position(&mut self, item: &Self::Item, position: mint::Vector3<f64>);

    /// The drag-eligible selection. Queried exactly once when a drag
    /// starts; [`None`] or an empty list starts a drag that moves nothing.
    fn drag_selection(&self) -> Option<Vec<Self::Item>>;
}

struct DragEntry<T> {
    item: T,
    start_position: DVec3,
    offset: DVec3,
}

/// The interaction state machine on top of a [`Gizmo`].
///
/// Call [`Dragger::update`] once per frame before [`Dragger::render`]. The
/// dragger reads the pointer and key snapshot, hit-tests the gizmo, moves
/// dragged items through the host and keeps the gizmo placed above the
/// host-supplied anchor.
pub struct Dragger<H: DragHost> {
    gizmo: Gizmo,
    mode: DragMode,
    plane: Plane,
    axis: Option<DVec3>,
    draggable: Vec<DragEntry<H::Item>>,
    original_touch: DVec3,
    raycast_hits: Vec<RaycastHit>,
    enabled: bool,
    anchor: DVec3,
}

impl<H: DragHost> Dragger<H> {
    /// Creates a dragger with a gizmo loaded from its named assets.
    pub fn new(assets: &mut impl GizmoAssets) -> Result<Self, GizmoError> {
        Ok(Self::with_gizmo(Gizmo::load(assets)?))
    }

    /// Creates a dragger around an existing gizmo.
    pub fn with_gizmo(gizmo: Gizmo) -> Self {
        Self {
            gizmo,
            mode: DragMode::NoDragging,
            plane: Plane::new(DVec3::ZERO, DVec3::Z),
            axis: None,
            draggable: Vec::new(),
            original_touch: DVec3::ZERO,
            raycast_hits: Vec::new(),
            enabled: false,
            anchor: DVec3::ZERO,
        }
    }

    /// Releases the gizmo's owned resources. Idempotent.
    pub fn dispose(&mut self, assets: &mut impl GizmoAssets) {
        self.gizmo.dispose(assets);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// World position the gizmo is anchored to, typically the selection's
    /// ground point.
    pub fn anchor(&self) -> mint::Vector3<f64> {
        self.anchor.into()
    }

    pub fn set_anchor(&mut self, anchor: impl Into<mint::Vector3<f64>>) {
        self.anchor = anchor.into().into();
    }

    pub fn is_dragging(&self) -> bool {
        self.mode != DragMode::NoDragging
    }

    /// Advances the interaction by one frame.
    ///
    /// Returns whether a drag is active, including the final tick of a drag
    /// that was committed this frame.
    pub fn update(
        &mut self,
        host: &mut H,
        config: &GizmoConfig,
        input: &DraggerInput,
        scene: &impl SceneRaycast,
        _delta_time: f32,
    ) -> bool {
        // The gizmo sits one unit above the anchor, which is at ground
        // level. Constraint planes are derived from this placement.
        self.gizmo.set_position(self.anchor + DVec3::Z);

        let Some(ray) = config.pointer_ray(input.cursor_pos) else {
            return self.is_dragging();
        };

        // Stop is processed before movement so the last frame's positions
        // are committed, not recomputed.
        let stop_drag = (self.mode == DragMode::MouseDrag && !input.pointer_down)
            || (self.mode == DragMode::KeyboardDrag && input.pressed.contains(DragKey::FreeDrag));
        if stop_drag {
            self.mode = DragMode::NoDragging;

            if !self.draggable.is_empty() {
                self.finish_drag();
                return true;
            }
        }

        if self.mode != DragMode::NoDragging && input.pressed.contains(DragKey::Cancel) {
            for entry in &self.draggable {
                host.set_position(&entry.item, entry.start_position.into());
            }
            debug!(items = self.draggable.len(), "drag cancelled");
            self.draggable.clear();
            self.mode = DragMode::NoDragging;
        }

        // The drop supersedes this frame's tracking movement; each item is
        // repositioned exactly once, by the drop itself.
        if self.mode == DragMode::KeyboardDrag && input.pressed.contains(DragKey::DropToGround) {
            self.mode = DragMode::NoDragging;
            self.drop_to_ground(host, scene);
            self.finish_drag();
            return false;
        }

        if self.enabled && self.mode != DragMode::NoDragging {
            if let Some(touch) = self.plane.intersect(&ray) {
                for entry in &self.draggable {
                    let target = match self.axis {
                        Some(axis) => {
                            entry.start_position + axis * (touch - self.original_touch).dot(axis)
                        }
                        None => touch + entry.offset,
                    };
                    host.set_position(&entry.item, target.into());
                }
            }
        }

        if self.mode == DragMode::NoDragging && !stop_drag && input.pressed.contains(DragKey::FreeDrag)
        {
            self.start_dragging(host, config, HitType::TranslateXY, &ray, DragMode::KeyboardDrag);
        }

        if self.mode == DragMode::KeyboardDrag {
            let complement = input.held.contains(DragKey::PlaneModifier);

            let hit = if input.pressed.contains(DragKey::AxisX) {
                if complement {
                    HitType::TranslateZY
                } else {
                    HitType::TranslateX
                }
            } else if input.pressed.contains(DragKey::AxisY) {
                if complement {
                    HitType::TranslateXZ
                } else {
                    HitType::TranslateY
                }
            } else if input.pressed.contains(DragKey::AxisZ) {
                if complement {
                    HitType::TranslateXY
                } else {
                    HitType::TranslateZ
                }
            } else {
                HitType::None
            };

            if hit != HitType::None {
                // Re-bind the constraint without leaving the keyboard drag.
                self.start_dragging(host, config, hit, &ray, DragMode::KeyboardDrag);
            }
        }

        if input.pointer_pressed && !stop_drag && self.enabled && self.mode == DragMode::NoDragging
        {
            let (hit, _) = self.gizmo.hit_test(&ray);
            if hit != HitType::None {
                self.start_dragging(host, config, hit, &ray, DragMode::MouseDrag);
            }
        }

        self.is_dragging()
    }

    /// Draws the gizmo above the anchor. No-op while disabled.
    pub fn render(&mut self, config: &GizmoConfig, target: &mut impl RenderTarget) {
        if !self.enabled {
            return;
        }

        self.gizmo.set_position(self.anchor + DVec3::Z);
        self.gizmo.render(config, target);
    }

    /// Commits the drag: dragged items keep their last computed positions.
    fn finish_drag(&mut self) {
        debug!(items = self.draggable.len(), "drag committed");
        self.draggable.clear();
    }

    /// Casts a ray from high above each dragged item straight down and
    /// moves the item to the surface whose height is nearest its current
    /// height. Equally distant surfaces resolve to the first hit reported.
    fn drop_to_ground(&mut self, host: &mut H, scene: &impl SceneRaycast) {
        for entry in &self.draggable {
            let position = DVec3::from(host.position(&entry.item));

            let ray = Ray::new(
                DVec3::new(position.x, position.y, DROP_RAY_HEIGHT),
                DVec3::NEG_Z,
            );
            scene.raycast_all(&ray, position, &mut self.raycast_hits);

            if self.raycast_hits.is_empty() {
                continue;
            }

            let mut min_distance = f64::MAX;
            let mut ground_z = position.z;
            for hit in &self.raycast_hits {
                let diff = (hit.position.z - position.z).abs();
                if diff < min_distance {
                    min_distance = diff;
                    ground_z = hit.position.z;
                }
            }

            host.set_position(
                &entry.item,
                DVec3::new(position.x, position.y, ground_z).into(),
            );
            self.raycast_hits.clear();
        }

        debug!(items = self.draggable.len(), "dropped to ground");
    }

    /// Derives the constraint for the handle, fixes the touch point and
    /// snapshots the selection. A ray parallel to the drag plane aborts the
    /// start.
    fn start_dragging(
        &mut self,
        host: &H,
        config: &GizmoConfig,
        hit: HitType,
        ray: &Ray,
        mode: DragMode,
    ) {
        let (axis, plane) = self.drag_axis_and_plane(config, hit);

        let Some(touch) = plane.intersect(ray) else {
            return;
        };

        self.original_touch = touch;
        self.mode = mode;
        self.axis = axis;
        self.plane = plane;
        self.draggable.clear();

        if let Some(selection) = host.drag_selection() {
            for item in selection {
                let start_position = DVec3::from(host.position(&item));
                self.draggable.push(DragEntry {
                    item,
                    start_position,
                    offset: start_position - touch,
                });
            }
        }

        debug!(?hit, items = self.draggable.len(), "drag started");
    }

    /// Constraint geometry for a handle: planar handles drag along their
    /// coordinate plane through the gizmo, axis handles along the axis,
    /// tracked on a plane that contains the axis and faces the camera.
    fn drag_axis_and_plane(&self, config: &GizmoConfig, hit: HitType) -> (Option<DVec3>, Plane) {
        let origin = self.gizmo.position();

        let axis = match hit {
            HitType::TranslateX => Some(DVec3::X),
            HitType::TranslateY => Some(DVec3::Y),
            HitType::TranslateZ => Some(DVec3::Z),
            HitType::TranslateXY | HitType::TranslateXZ | HitType::TranslateZY | HitType::None => {
                None
            }
        };

        match (axis, hit) {
            (Some(axis), _) => {
                let tangent = axis.cross(origin - config.camera_position());
                let normal = axis.cross(tangent);
                (Some(axis), Plane::new(origin, normal))
            }
            (None, HitType::TranslateZY) => (None, Plane::new(origin, DVec3::X)),
            (None, HitType::TranslateXZ) => (None, Plane::new(origin, DVec3::Y)),
            (None, _) => (None, Plane::new(origin, DVec3::Z)),
        }
    }
}
