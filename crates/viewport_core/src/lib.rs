//! viewport_core: the model viewer's core, independent of any GPU API.
//!
//! The host owns a `ViewportController`, forwards pointer/wheel events to it,
//! and calls `render_frame` on every tick with something implementing
//! `FrameBackend`. `render_wgpu` provides the real backend; `headless` a
//! recording one for tests and tooling.

pub mod backend;
pub mod background;
pub mod camera;
pub mod config;
pub mod controller;
pub mod headless;
pub mod input;
pub mod mesh_asset;
pub mod placeholder;
pub mod reaction;

pub use backend::{BackendError, DrawParams, FrameBackend};
pub use config::ViewportConfig;
pub use controller::{BodyVariant, FrameReport, ViewportController};
pub use mesh_asset::{DrawStatus, MeshAsset};
