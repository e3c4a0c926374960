//! What a renderer draws. A scene only describes GPU inputs; the renderer
//! owns every object created from them.

use crate::esutil::Matrix;
use crate::renderer::Viewport;

mod cube;
mod triangle;

pub use self::cube::CubeScene;
pub use self::triangle::TriangleScene;

/// Name of the model-view-projection uniform a scene's vertex shader may
/// declare.
pub const MVP_UNIFORM: &str = "u_mvpMatrix";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

/// Positions as xyz triples bound to attribute 0; empty `indices` means the
/// positions are drawn as a plain triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<f32>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }
}

pub trait Scene {
    fn name(&self) -> &'static str;

    fn shaders(&self) -> ShaderSources;

    fn mesh(&self) -> Mesh;

    fn depth_test(&self) -> bool {
        false
    }

    /// Transform for frame number `frame` at `viewport`, uploaded to
    /// [`MVP_UNIFORM`]. Must depend only on its arguments.
    fn transform(&self, _viewport: Viewport, _frame: u64) -> Option<Matrix> {
        None
    }
}
