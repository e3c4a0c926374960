//! The slice of OpenGL ES 3 the renderer issues, behind a trait so the state
//! machine can run against a real context or a recording fake.
//!
//! Object names are plain `u32`s as in the C API; `0` is never handed out.

use std::fmt;

mod glow_backend;
#[cfg(test)]
pub(crate) mod recording;

pub use self::glow_backend::GlowBackend;

pub const NO_ERROR: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

/// Graphics calls consumed by [`Renderer`](crate::Renderer).
///
/// Implementations assume a context is current on the calling thread for
/// their whole lifetime; the surface host guarantees that.
pub trait Gles {
    fn create_shader(&mut self, stage: ShaderStage) -> Result<u32, String>;
    /// Uploads `source` and compiles it, returning the info log on failure.
    fn compile_shader(&mut self, shader: u32, source: &str) -> Result<(), String>;
    fn delete_shader(&mut self, shader: u32);

    fn create_program(&mut self) -> Result<u32, String>;
    /// Attaches `shaders` and links, returning the info log on failure.
    fn link_program(&mut self, program: u32, shaders: &[u32]) -> Result<(), String>;
    fn delete_program(&mut self, program: u32);
    fn uniform_location(&mut self, program: u32, name: &str) -> Option<u32>;

    fn create_buffer(&mut self) -> Result<u32, String>;
    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<u32>);
    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&mut self, buffer: u32);

    fn create_vertex_array(&mut self) -> Result<u32, String>;
    fn bind_vertex_array(&mut self, vao: Option<u32>);
    fn delete_vertex_array(&mut self, vao: u32);
    /// Enables `index` as a tightly packed float attribute of `components`.
    fn vertex_attrib_f32(&mut self, index: u32, components: i32);

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&mut self, rgba: [f32; 4]);
    fn set_depth_test(&mut self, enabled: bool);
    fn clear(&mut self, depth: bool);

    fn use_program(&mut self, program: Option<u32>);
    fn uniform_matrix4(&mut self, location: u32, columns: &[f32; 16]);
    fn draw_triangles(&mut self, vertex_count: i32);
    fn draw_indexed_triangles(&mut self, index_count: i32);

    fn get_error(&mut self) -> u32;
}

/// Upper bound on codes read per drain. A lost context can keep reporting
/// errors forever, so draining never spins.
pub const MAX_DRAINED_ERRORS: usize = 16;

fn drain_errors<G, F>(gl: &mut G, mut report: F) -> Option<u32>
where
    G: Gles + ?Sized,
    F: FnMut(u32),
{
    let mut first = None;
    for _ in 0..MAX_DRAINED_ERRORS {
        let code = gl.get_error();
        if code == NO_ERROR {
            return first;
        }
        report(code);
        first.get_or_insert(code);
    }
    warn!("GL error flags still set after {} reads", MAX_DRAINED_ERRORS);
    first
}

/// Drains every error flag raised by `call`, logging each code like the
/// driver would. Returns the first one.
pub fn check_error<G: Gles + ?Sized>(gl: &mut G, call: &'static str) -> Option<u32> {
    drain_errors(gl, |code| error!("GL error after {}(): 0x{:08x}", call, code))
}

/// Discards flags left over from calls made outside the renderer, so they
/// are not blamed on `next`.
pub fn clear_stale_errors<G: Gles + ?Sized>(gl: &mut G, next: &'static str) -> Option<u32> {
    drain_errors(gl, |code| {
        warn!("Discarding stale GL error before {}: 0x{:08x}", next, code)
    })
}
