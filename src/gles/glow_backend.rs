use std::ffi::c_void;
use std::num::NonZeroU32;

use glow::HasContext;

use super::{BufferTarget, Gles, ShaderStage};

/// [`Gles`] over a `glow` context loaded from the host's current context.
pub struct GlowBackend {
    gl: glow::Context,
}

impl GlowBackend {
    /// # Safety
    ///
    /// A GLES 3 context must be current on this thread, and must stay current
    /// for every call made through the returned backend.
    pub unsafe fn from_loader_function<F>(loader: F) -> Self
    where
        F: FnMut(&str) -> *const c_void,
    {
        GlowBackend {
            gl: glow::Context::from_loader_function(loader),
        }
    }

    pub fn from_context(gl: glow::Context) -> Self {
        GlowBackend { gl }
    }
}

fn name(id: u32) -> Option<NonZeroU32> {
    NonZeroU32::new(id)
}

fn target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

impl Gles for GlowBackend {
    fn create_shader(&mut self, stage: ShaderStage) -> Result<u32, String> {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe { self.gl.create_shader(kind).map(|s| s.0.get()) }
    }

    fn compile_shader(&mut self, shader: u32, source: &str) -> Result<(), String> {
        let shader = match name(shader) {
            Some(id) => glow::NativeShader(id),
            None => return Err("invalid shader name 0".to_string()),
        };
        unsafe {
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if self.gl.get_shader_compile_status(shader) {
                Ok(())
            } else {
                Err(self.gl.get_shader_info_log(shader))
            }
        }
    }

    fn delete_shader(&mut self, shader: u32) {
        if let Some(id) = name(shader) {
            unsafe { self.gl.delete_shader(glow::NativeShader(id)) }
        }
    }

    fn create_program(&mut self) -> Result<u32, String> {
        unsafe { self.gl.create_program().map(|p| p.0.get()) }
    }

    fn link_program(&mut self, program: u32, shaders: &[u32]) -> Result<(), String> {
        let program = match name(program) {
            Some(id) => glow::NativeProgram(id),
            None => return Err("invalid program name 0".to_string()),
        };
        unsafe {
            for shader in shaders.iter().copied().filter_map(name) {
                self.gl.attach_shader(program, glow::NativeShader(shader));
            }
            self.gl.link_program(program);
            if self.gl.get_program_link_status(program) {
                Ok(())
            } else {
                Err(self.gl.get_program_info_log(program))
            }
        }
    }

    fn delete_program(&mut self, program: u32) {
        if let Some(id) = name(program) {
            unsafe { self.gl.delete_program(glow::NativeProgram(id)) }
        }
    }

    fn uniform_location(&mut self, program: u32, uniform: &str) -> Option<u32> {
        let program = glow::NativeProgram(name(program)?);
        unsafe { self.gl.get_uniform_location(program, uniform).map(|l| l.0) }
    }

    fn create_buffer(&mut self) -> Result<u32, String> {
        unsafe { self.gl.create_buffer().map(|b| b.0.get()) }
    }

    fn bind_buffer(&mut self, buffer_target: BufferTarget, buffer: Option<u32>) {
        let buffer = buffer.and_then(name).map(glow::NativeBuffer);
        unsafe { self.gl.bind_buffer(target(buffer_target), buffer) }
    }

    fn buffer_data(&mut self, buffer_target: BufferTarget, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(target(buffer_target), data, glow::STATIC_DRAW)
        }
    }

    fn delete_buffer(&mut self, buffer: u32) {
        if let Some(id) = name(buffer) {
            unsafe { self.gl.delete_buffer(glow::NativeBuffer(id)) }
        }
    }

    fn create_vertex_array(&mut self) -> Result<u32, String> {
        unsafe { self.gl.create_vertex_array().map(|v| v.0.get()) }
    }

    fn bind_vertex_array(&mut self, vao: Option<u32>) {
        let vao = vao.and_then(name).map(glow::NativeVertexArray);
        unsafe { self.gl.bind_vertex_array(vao) }
    }

    fn delete_vertex_array(&mut self, vao: u32) {
        if let Some(id) = name(vao) {
            unsafe { self.gl.delete_vertex_array(glow::NativeVertexArray(id)) }
        }
    }

    fn vertex_attrib_f32(&mut self, index: u32, components: i32) {
        unsafe {
            self.gl.enable_vertex_attrib_array(index);
            self.gl
                .vertex_attrib_pointer_f32(index, components, glow::FLOAT, false, 0, 0);
        }
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn clear_color(&mut self, rgba: [f32; 4]) {
        unsafe { self.gl.clear_color(rgba[0], rgba[1], rgba[2], rgba[3]) }
    }

    fn set_depth_test(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(glow::DEPTH_TEST);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
        }
    }

    fn clear(&mut self, depth: bool) {
        let mut mask = glow::COLOR_BUFFER_BIT;
        if depth {
            mask |= glow::DEPTH_BUFFER_BIT;
        }
        unsafe { self.gl.clear(mask) }
    }

    fn use_program(&mut self, program: Option<u32>) {
        let program = program.and_then(name).map(glow::NativeProgram);
        unsafe { self.gl.use_program(program) }
    }

    fn uniform_matrix4(&mut self, location: u32, columns: &[f32; 16]) {
        let location = glow::NativeUniformLocation(location);
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(Some(&location), false, &columns[..])
        }
    }

    fn draw_triangles(&mut self, vertex_count: i32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLES, 0, vertex_count) }
    }

    fn draw_indexed_triangles(&mut self, index_count: i32) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, index_count, glow::UNSIGNED_INT, 0)
        }
    }

    fn get_error(&mut self) -> u32 {
        unsafe { self.gl.get_error() }
    }
}
