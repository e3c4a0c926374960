//! The renderer state machine driven by a surface host.
//!
//! ```text
//! Uninitialized --init--> Ready --resize--> Resized --step--> Resized
//!                          ^  \________________/  |
//!                          |                      |
//!              init        +------ destroy -------+--> Destroyed
//! ```
//!
//! The host calls `init`, `resize` and `step` sequentially on one thread.
//! A renderer holds a `Box<dyn Scene>` without a `Send` bound, so it cannot
//! be moved to or shared with another thread:
//!
//! ```compile_fail
//! fn assert_send<T: Send>() {}
//! assert_send::<glndk::Renderer<glndk::gles::GlowBackend>>();
//! ```

use std::mem;

use crate::config::RendererConfig;
use crate::error::{FrameError, InitError};
use crate::gles::{check_error, clear_stale_errors, Gles};
use crate::scene::Scene;

mod context;
mod program;

pub use self::context::RenderContext;
pub use self::program::build_program;

/// Surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }

    /// Negative sizes reported by the host are treated as empty.
    pub fn from_surface(width: i32, height: i32) -> Self {
        Viewport {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> Option<f32> {
        if self.is_degenerate() {
            None
        } else {
            Some(self.width as f32 / self.height as f32)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererState {
    Uninitialized,
    Ready,
    Resized,
    Destroyed,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub frames_drawn: u64,
    pub frames_skipped: u64,
}

enum Stage {
    Uninitialized,
    Ready(RenderContext),
    Resized(RenderContext, Viewport),
    Destroyed,
}

pub struct Renderer<G: Gles> {
    gl: G,
    scene: Box<dyn Scene>,
    config: RendererConfig,
    stage: Stage,
    stats: FrameStats,
}

impl<G: Gles> Renderer<G> {
    pub fn new(gl: G, scene: Box<dyn Scene>, config: RendererConfig) -> Self {
        Renderer {
            gl,
            scene,
            config,
            stage: Stage::Uninitialized,
            stats: FrameStats::default(),
        }
    }

    pub fn state(&self) -> RendererState {
        match self.stage {
            Stage::Uninitialized => RendererState::Uninitialized,
            Stage::Ready(_) => RendererState::Ready,
            Stage::Resized(..) => RendererState::Resized,
            Stage::Destroyed => RendererState::Destroyed,
        }
    }

    pub fn viewport(&self) -> Option<Viewport> {
        match self.stage {
            Stage::Resized(_, viewport) => Some(viewport),
            _ => None,
        }
    }

    pub fn context(&self) -> Option<&RenderContext> {
        match &self.stage {
            Stage::Ready(context) | Stage::Resized(context, _) => Some(context),
            _ => None,
        }
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn scene(&self) -> &dyn Scene {
        self.scene.as_ref()
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn gl(&self) -> &G {
        &self.gl
    }

    pub fn gl_mut(&mut self) -> &mut G {
        &mut self.gl
    }

    fn take_context(&mut self, next: Stage) -> Option<RenderContext> {
        match mem::replace(&mut self.stage, next) {
            Stage::Ready(context) | Stage::Resized(context, _) => Some(context),
            _ => None,
        }
    }

    /// Allocates the program and buffers for the scene. Resources from a
    /// previous `init` on the same context are released first.
    pub fn try_init(&mut self) -> Result<(), InitError> {
        clear_stale_errors(&mut self.gl, "init");
        if let Some(previous) = self.take_context(Stage::Uninitialized) {
            info!("Re-initializing {}, releasing previous context", self.scene.name());
            previous.release(&mut self.gl);
        }
        let context = RenderContext::create(&mut self.gl, self.scene.as_ref())?;
        self.stage = Stage::Ready(context);
        Ok(())
    }

    /// Host-facing `init`: `false` means every later call is a no-op until a
    /// successful `init`.
    pub fn init(&mut self) -> bool {
        match self.try_init() {
            Ok(()) => {
                info!("Renderer {} initialized", self.scene.name());
                true
            }
            Err(e) => {
                error!("Renderer {} failed to initialize: {}", self.scene.name(), e);
                false
            }
        }
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        let viewport = Viewport::from_surface(width, height);
        match mem::replace(&mut self.stage, Stage::Uninitialized) {
            Stage::Ready(context) | Stage::Resized(context, _) => {
                debug!("Resize {} to {}x{}", self.scene.name(), viewport.width, viewport.height);
                self.stage = Stage::Resized(context, viewport);
            }
            other => {
                self.stage = other;
                warn!(
                    "resize({}, {}) ignored, renderer is {:?}",
                    width,
                    height,
                    self.state()
                );
            }
        }
    }

    /// Draws one frame and reports why it was skipped, if it was.
    pub fn try_step(&mut self) -> Result<(), FrameError> {
        let result = self.draw_frame();
        match result {
            Ok(()) => self.stats.frames_drawn += 1,
            Err(_) => self.stats.frames_skipped += 1,
        }
        result
    }

    /// Host-facing `step`: failures skip the frame and are only logged.
    pub fn step(&mut self) {
        if let Err(e) = self.try_step() {
            if e.is_quiet() {
                trace!("Frame skipped: {}", e);
            } else {
                warn!("Frame skipped: {}", e);
            }
        }
    }

    fn draw_frame(&mut self) -> Result<(), FrameError> {
        let (context, viewport) = match &self.stage {
            Stage::Uninitialized => return Err(FrameError::NotInitialized),
            Stage::Destroyed => return Err(FrameError::Destroyed),
            Stage::Ready(_) => return Err(FrameError::NoViewport),
            Stage::Resized(context, viewport) => (context, *viewport),
        };
        if viewport.is_degenerate() {
            return Err(FrameError::DegenerateViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let gl = &mut self.gl;
        clear_stale_errors(gl, "frame");
        let depth = self.scene.depth_test();
        gl.viewport(0, 0, viewport.width as i32, viewport.height as i32);
        gl.clear_color(self.config.clear_color);
        gl.set_depth_test(depth);
        gl.clear(depth);

        gl.use_program(Some(context.program));
        if let Some(location) = context.mvp_location {
            if let Some(mvp) = self.scene.transform(viewport, self.stats.frames_drawn) {
                gl.uniform_matrix4(location, &mvp.to_columns());
            }
        }
        gl.bind_vertex_array(Some(context.vertex_array));
        let draw_call = if context.index_buffer.is_some() {
            gl.draw_indexed_triangles(context.draw_count);
            "glDrawElements"
        } else {
            gl.draw_triangles(context.draw_count);
            "glDrawArrays"
        };
        gl.bind_vertex_array(None);
        gl.use_program(None);

        match check_error(gl, draw_call) {
            None => Ok(()),
            Some(code) => Err(FrameError::Gl { code }),
        }
    }

    /// Releases every GPU object. `init` may be called again afterwards.
    pub fn destroy(&mut self) {
        match self.take_context(Stage::Destroyed) {
            Some(context) => {
                context.release(&mut self.gl);
                info!("Renderer {} destroyed", self.scene.name());
            }
            None => debug!("Renderer {} destroyed without resources", self.scene.name()),
        }
    }

    /// Forgets every GPU object without touching the context, for when the
    /// context they lived in is already gone.
    pub fn abandon(&mut self) {
        if let Some(context) = self.take_context(Stage::Destroyed) {
            warn!(
                "Abandoning render context of {} (program {})",
                self.scene.name(),
                context.program
            );
        }
    }
}

impl<G: Gles> Drop for Renderer<G> {
    fn drop(&mut self) {
        if self.context().is_some() {
            self.destroy();
        }
    }
}
