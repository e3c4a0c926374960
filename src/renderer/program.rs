use crate::error::InitError;
use crate::gles::{check_error, Gles, ShaderStage};
use crate::scene::ShaderSources;

fn compile<G: Gles + ?Sized>(gl: &mut G, stage: ShaderStage, source: &str) -> Result<u32, InitError> {
    let shader = gl.create_shader(stage).map_err(|reason| {
        check_error(gl, "glCreateShader");
        InitError::ObjectCreation {
            what: "shader",
            reason,
        }
    })?;
    if let Err(log) = gl.compile_shader(shader, source) {
        error!("Could not compile {} shader:\n{}", stage, log);
        gl.delete_shader(shader);
        return Err(InitError::Compile { stage, log });
    }
    Ok(shader)
}

/// Compiles and links `sources`. Shader objects never outlive this call.
pub fn build_program<G: Gles + ?Sized>(gl: &mut G, sources: &ShaderSources) -> Result<u32, InitError> {
    let vertex = compile(gl, ShaderStage::Vertex, sources.vertex)?;
    let fragment = match compile(gl, ShaderStage::Fragment, sources.fragment) {
        Ok(shader) => shader,
        Err(e) => {
            gl.delete_shader(vertex);
            return Err(e);
        }
    };

    let linked = link(gl, vertex, fragment);
    gl.delete_shader(vertex);
    gl.delete_shader(fragment);
    linked
}

fn link<G: Gles + ?Sized>(gl: &mut G, vertex: u32, fragment: u32) -> Result<u32, InitError> {
    let program = gl.create_program().map_err(|reason| {
        check_error(gl, "glCreateProgram");
        InitError::ObjectCreation {
            what: "program",
            reason,
        }
    })?;
    if let Err(log) = gl.link_program(program, &[vertex, fragment]) {
        error!("Could not link program:\n{}", log);
        gl.delete_program(program);
        return Err(InitError::Link { log });
    }
    Ok(program)
}
