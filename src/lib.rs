//! Native side of the `glndk` sample: an OpenGL ES renderer driven by a
//! host surface view (`init`, `resize`, `step`), plus the small helpers the
//! sample activities call into.

#[macro_use]
extern crate log;

pub mod config;
pub mod error;
pub mod esutil;
pub mod gles;
pub mod hello;
pub mod registry;
pub mod renderer;
pub mod scene;
pub mod surface;

#[cfg(target_os = "android")]
mod android;
#[cfg(target_os = "android")]
mod egl;

pub use config::RendererConfig;
pub use error::{FrameError, InitError};
pub use gles::Gles;
pub use registry::SceneKind;
pub use renderer::{FrameStats, Renderer, RendererState, Viewport};
pub use scene::Scene;
pub use surface::SurfaceSlots;
