use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;

use super::{BufferTarget, Gles, ShaderStage, NO_ERROR};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    LinkProgram(u32, Vec<u32>),
    DeleteProgram(u32),
    UniformLocation(u32, String),
    CreateBuffer(u32),
    BindBuffer(BufferTarget, Option<u32>),
    BufferData(BufferTarget, usize),
    DeleteBuffer(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    VertexAttrib(u32, i32),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    DepthTest(bool),
    Clear(bool),
    UseProgram(Option<u32>),
    UniformMatrix4(u32, [f32; 16]),
    DrawTriangles(i32),
    DrawIndexedTriangles(i32),
    GetError(u32),
}

/// Names alive in a [`RecordingGl`], shareable so tests can inspect them
/// after the context has been moved into (and dropped with) a renderer.
pub type LiveNames = Rc<RefCell<BTreeSet<u32>>>;

/// Fake context that records calls and tracks live object names.
#[derive(Debug, Default)]
pub struct RecordingGl {
    pub calls: Vec<Call>,
    live: LiveNames,
    pub fail_compile: Option<ShaderStage>,
    pub fail_link: bool,
    pub fail_create_buffer: bool,
    pub pending_errors: VecDeque<u32>,
    /// Raised together by the next draw call.
    pub draw_errors: Vec<u32>,
    next_name: u32,
    stages: Vec<(u32, ShaderStage)>,
    sources: Vec<(u32, String)>,
    programs: Vec<(u32, Vec<u32>)>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> u32 {
        self.next_name += 1;
        self.live.borrow_mut().insert(self.next_name);
        self.next_name
    }

    fn release(&mut self, id: u32) {
        assert!(
            self.live.borrow_mut().remove(&id),
            "deleted unknown GL name {}",
            id
        );
    }

    fn raise_draw_error(&mut self) {
        self.pending_errors.extend(self.draw_errors.drain(..));
    }

    pub fn live_handle(&self) -> LiveNames {
        Rc::clone(&self.live)
    }

    pub fn live_names(&self) -> Vec<u32> {
        self.live.borrow().iter().copied().collect()
    }

    pub fn live_count(&self) -> usize {
        self.live.borrow().len()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn last_viewport(&self) -> Option<(i32, i32, i32, i32)> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Viewport(x, y, w, h) => Some((*x, *y, *w, *h)),
            _ => None,
        })
    }

    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::DrawTriangles(_) | Call::DrawIndexedTriangles(_)))
            .count()
    }
}

impl Gles for RecordingGl {
    fn create_shader(&mut self, stage: ShaderStage) -> Result<u32, String> {
        let id = self.allocate();
        self.stages.push((id, stage));
        self.calls.push(Call::CreateShader(stage, id));
        Ok(id)
    }

    fn compile_shader(&mut self, shader: u32, source: &str) -> Result<(), String> {
        self.calls.push(Call::CompileShader(shader));
        self.sources.push((shader, source.to_string()));
        let stage = self
            .stages
            .iter()
            .find(|(id, _)| *id == shader)
            .map(|(_, stage)| *stage);
        if stage.is_some() && stage == self.fail_compile {
            return Err("0:1: syntax error".to_string());
        }
        Ok(())
    }

    fn delete_shader(&mut self, shader: u32) {
        self.calls.push(Call::DeleteShader(shader));
        self.release(shader);
    }

    fn create_program(&mut self) -> Result<u32, String> {
        let id = self.allocate();
        self.calls.push(Call::CreateProgram(id));
        Ok(id)
    }

    fn link_program(&mut self, program: u32, shaders: &[u32]) -> Result<(), String> {
        self.calls.push(Call::LinkProgram(program, shaders.to_vec()));
        if self.fail_link {
            return Err("link failed".to_string());
        }
        self.programs.push((program, shaders.to_vec()));
        Ok(())
    }

    fn delete_program(&mut self, program: u32) {
        self.calls.push(Call::DeleteProgram(program));
        self.release(program);
    }

    fn uniform_location(&mut self, program: u32, name: &str) -> Option<u32> {
        self.calls.push(Call::UniformLocation(program, name.to_string()));
        let (_, shaders) = self.programs.iter().find(|(id, _)| *id == program)?;
        let declared = self
            .sources
            .iter()
            .filter(|(id, _)| shaders.contains(id))
            .any(|(_, source)| source.contains(&format!("uniform mat4 {};", name)));
        if declared {
            Some(0)
        } else {
            None
        }
    }

    fn create_buffer(&mut self) -> Result<u32, String> {
        if self.fail_create_buffer {
            return Err("out of memory".to_string());
        }
        let id = self.allocate();
        self.calls.push(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<u32>) {
        self.calls.push(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]) {
        self.calls.push(Call::BufferData(target, data.len()));
    }

    fn delete_buffer(&mut self, buffer: u32) {
        self.calls.push(Call::DeleteBuffer(buffer));
        self.release(buffer);
    }

    fn create_vertex_array(&mut self) -> Result<u32, String> {
        let id = self.allocate();
        self.calls.push(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&mut self, vao: Option<u32>) {
        self.calls.push(Call::BindVertexArray(vao));
    }

    fn delete_vertex_array(&mut self, vao: u32) {
        self.calls.push(Call::DeleteVertexArray(vao));
        self.release(vao);
    }

    fn vertex_attrib_f32(&mut self, index: u32, components: i32) {
        self.calls.push(Call::VertexAttrib(index, components));
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&mut self, rgba: [f32; 4]) {
        self.calls.push(Call::ClearColor(rgba));
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.calls.push(Call::DepthTest(enabled));
    }

    fn clear(&mut self, depth: bool) {
        self.calls.push(Call::Clear(depth));
    }

    fn use_program(&mut self, program: Option<u32>) {
        self.calls.push(Call::UseProgram(program));
    }

    fn uniform_matrix4(&mut self, location: u32, columns: &[f32; 16]) {
        self.calls.push(Call::UniformMatrix4(location, *columns));
    }

    fn draw_triangles(&mut self, vertex_count: i32) {
        self.calls.push(Call::DrawTriangles(vertex_count));
        self.raise_draw_error();
    }

    fn draw_indexed_triangles(&mut self, index_count: i32) {
        self.calls.push(Call::DrawIndexedTriangles(index_count));
        self.raise_draw_error();
    }

    fn get_error(&mut self) -> u32 {
        let code = self.pending_errors.pop_front().unwrap_or(NO_ERROR);
        self.calls.push(Call::GetError(code));
        code
    }
}
