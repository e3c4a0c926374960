use crate::error::InitError;
use crate::gles::{check_error, BufferTarget, Gles};
use crate::scene::{Scene, MVP_UNIFORM};

use super::program::build_program;

const POSITION_ATTRIB: u32 = 0;

/// GPU objects owned by a renderer between `init` and teardown.
#[derive(Debug, PartialEq, Eq)]
pub struct RenderContext {
    pub program: u32,
    pub vertex_array: u32,
    pub vertex_buffer: u32,
    pub index_buffer: Option<u32>,
    pub mvp_location: Option<u32>,
    pub draw_count: i32,
}

/// Names created so far, released in reverse if a later step fails.
#[derive(Default)]
struct Partial {
    program: Option<u32>,
    vertex_array: Option<u32>,
    buffers: Vec<u32>,
}

impl Partial {
    fn release<G: Gles + ?Sized>(self, gl: &mut G) {
        for buffer in self.buffers.into_iter().rev() {
            gl.delete_buffer(buffer);
        }
        if let Some(vao) = self.vertex_array {
            gl.delete_vertex_array(vao);
        }
        if let Some(program) = self.program {
            gl.delete_program(program);
        }
    }
}

fn created<G: Gles + ?Sized>(
    gl: &mut G,
    what: &'static str,
    call: &'static str,
    result: Result<u32, String>,
) -> Result<u32, InitError> {
    result.map_err(|reason| {
        check_error(gl, call);
        InitError::ObjectCreation { what, reason }
    })
}

impl RenderContext {
    /// Builds the program and uploads the mesh of `scene`. On failure nothing
    /// created here is left alive.
    pub fn create<G: Gles + ?Sized>(gl: &mut G, scene: &dyn Scene) -> Result<Self, InitError> {
        let mut partial = Partial::default();
        match Self::build(gl, scene, &mut partial) {
            Ok(context) => Ok(context),
            Err(e) => {
                partial.release(gl);
                Err(e)
            }
        }
    }

    fn build<G: Gles + ?Sized>(
        gl: &mut G,
        scene: &dyn Scene,
        partial: &mut Partial,
    ) -> Result<Self, InitError> {
        let program = build_program(gl, &scene.shaders())?;
        partial.program = Some(program);
        let mvp_location = gl.uniform_location(program, MVP_UNIFORM);

        let mesh = scene.mesh();

        let result = gl.create_vertex_array();
        let vertex_array = created(gl, "vertex array", "glGenVertexArrays", result)?;
        partial.vertex_array = Some(vertex_array);
        gl.bind_vertex_array(Some(vertex_array));

        let result = gl.create_buffer();
        let vertex_buffer = created(gl, "vertex buffer", "glGenBuffers", result)?;
        partial.buffers.push(vertex_buffer);
        gl.bind_buffer(BufferTarget::Array, Some(vertex_buffer));
        gl.buffer_data(BufferTarget::Array, bytemuck::cast_slice(&mesh.positions[..]));
        gl.vertex_attrib_f32(POSITION_ATTRIB, 3);

        let index_buffer = if mesh.is_indexed() {
            let result = gl.create_buffer();
            let buffer = created(gl, "index buffer", "glGenBuffers", result)?;
            partial.buffers.push(buffer);
            gl.bind_buffer(BufferTarget::ElementArray, Some(buffer));
            gl.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(&mesh.indices[..]));
            Some(buffer)
        } else {
            None
        };

        gl.bind_vertex_array(None);
        gl.bind_buffer(BufferTarget::Array, None);

        if let Some(code) = check_error(gl, "glBufferData") {
            return Err(InitError::Gl {
                call: "glBufferData",
                code,
            });
        }

        let draw_count = if mesh.is_indexed() {
            mesh.indices.len() as i32
        } else {
            mesh.vertex_count() as i32
        };

        debug!(
            "Created render context for {}: program {}, {} {}",
            scene.name(),
            program,
            draw_count,
            if index_buffer.is_some() { "indices" } else { "vertices" }
        );

        Ok(RenderContext {
            program,
            vertex_array,
            vertex_buffer,
            index_buffer,
            mvp_location,
            draw_count,
        })
    }

    pub fn release<G: Gles + ?Sized>(self, gl: &mut G) {
        debug!("Releasing render context, program {}", self.program);
        let mut buffers = vec![self.vertex_buffer];
        buffers.extend(self.index_buffer);
        Partial {
            program: Some(self.program),
            vertex_array: Some(self.vertex_array),
            buffers,
        }
        .release(gl);
    }
}
