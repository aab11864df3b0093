//! Gizmo-based object manipulation for 3D map editors.
//!
//! The crate provides the interactive core of a map editor: a translation
//! [`Gizmo`] with colored arrow and plane handles, and a [`Dragger`] that
//! turns pointer and keyboard input into constrained world-space movement of
//! the editor's selected objects.
//!
//! The editor (the host) stays in control of everything else. It implements
//! [`DragHost`] for its selectable item type, loads the handle meshes through
//! a [`GizmoAssets`] implementation, answers scene raycasts through
//! [`SceneRaycast`] and receives draw calls through [`RenderTarget`].
//!
//! # Usage
//!
//! Construct a dragger once, then drive it every frame, update first and
//! render second:
//!
//! ```ignore
//! let mut dragger = Dragger::new(&mut assets)?;
//! dragger.set_enabled(true);
//!
//! // Each frame:
//! dragger.set_anchor(selection_center);
//! let dragging = dragger.update(&mut host, &config, &input, &scene, delta_time);
//! dragger.render(&config, &mut render_target);
//! ```
//!
//! [`GizmoConfig`] carries the camera matrices and viewport used to turn the
//! pointer position into a world-space ray, the same way each frame.

pub mod config;
pub mod dragger;
pub mod gizmo;
pub mod math;
pub mod mesh;
pub mod provider;

pub mod prelude;

pub use prelude::*;
