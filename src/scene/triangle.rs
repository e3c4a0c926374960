use super::{Mesh, Scene, ShaderSources};

const VERTEX_SHADER: &str = "#version 300 es
layout(location = 0) in vec4 vPosition;
void main(){
gl_Position = vPosition;
}
";

const FRAGMENT_SHADER: &str = "#version 300 es
precision mediump float;
out vec4 fragColor;
void main(){
fragColor = vec4(1.0,0.0,0.0,1.0);
}
";

const VERTICES: [f32; 9] = [
    0.0, 0.5, 0.0, //
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0,
];

/// A single red triangle in clip space.
#[derive(Debug, Default, Clone, Copy)]
pub struct TriangleScene;

impl Scene for TriangleScene {
    fn name(&self) -> &'static str {
        "triangle"
    }

    fn shaders(&self) -> ShaderSources {
        ShaderSources {
            vertex: VERTEX_SHADER,
            fragment: FRAGMENT_SHADER,
        }
    }

    fn mesh(&self) -> Mesh {
        Mesh {
            positions: VERTICES.to_vec(),
            indices: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Viewport;

    #[test]
    fn draws_three_unindexed_vertices() {
        let mesh = TriangleScene.mesh();
        assert_eq!(mesh.vertex_count(), 3);
        assert!(!mesh.is_indexed());
    }

    #[test]
    fn has_no_transform() {
        assert!(TriangleScene
            .transform(Viewport::new(640, 480), 10)
            .is_none());
        assert!(!TriangleScene.depth_test());
    }
}
