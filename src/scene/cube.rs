use super::{Mesh, Scene, ShaderSources};
use crate::esutil::{shapes, Matrix};
use crate::renderer::Viewport;

const VERTEX_SHADER: &str = "#version 300 es
uniform mat4 u_mvpMatrix;
layout(location = 0) in vec4 a_position;
out vec4 v_color;
void main(){
v_color = vec4(a_position.xyz + 0.5, 1.0);
gl_Position = u_mvpMatrix * a_position;
}
";

const FRAGMENT_SHADER: &str = "#version 300 es
precision mediump float;
in vec4 v_color;
out vec4 fragColor;
void main(){
fragColor = v_color;
}
";

/// A spinning cube whose rotation is a function of the frame number.
#[derive(Debug, Clone, Copy)]
pub struct CubeScene {
    pub degrees_per_frame: f32,
    pub fovy: f32,
}

impl Default for CubeScene {
    fn default() -> Self {
        CubeScene {
            degrees_per_frame: 1.0,
            fovy: 60.0,
        }
    }
}

impl CubeScene {
    pub fn angle(&self, frame: u64) -> f32 {
        ((frame % 360) as f32 * self.degrees_per_frame) % 360.0
    }
}

impl Scene for CubeScene {
    fn name(&self) -> &'static str {
        "cube"
    }

    fn shaders(&self) -> ShaderSources {
        ShaderSources {
            vertex: VERTEX_SHADER,
            fragment: FRAGMENT_SHADER,
        }
    }

    fn mesh(&self) -> Mesh {
        let cube = shapes::cube(1.0);
        Mesh {
            positions: cube.vertices,
            indices: cube.indices,
        }
    }

    fn depth_test(&self) -> bool {
        true
    }

    fn transform(&self, viewport: Viewport, frame: u64) -> Option<Matrix> {
        let aspect = viewport.aspect()?;
        let mut perspective = Matrix::identity();
        perspective.perspective(self.fovy, aspect, 1.0, 20.0);

        let mut model_view = Matrix::identity();
        model_view
            .translate(0.0, 0.0, -2.0)
            .rotate(self.angle(frame), 1.0, 0.0, 1.0);
        Some(model_view * perspective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_is_pure_in_frame_and_viewport() {
        let scene = CubeScene::default();
        let a = scene.transform(Viewport::new(800, 600), 42);
        let b = scene.transform(Viewport::new(800, 600), 42);
        assert_eq!(a, b);
        assert_ne!(a, scene.transform(Viewport::new(600, 800), 42));
        assert_ne!(a, scene.transform(Viewport::new(800, 600), 43));
    }

    #[test]
    fn degenerate_viewport_has_no_transform() {
        let scene = CubeScene::default();
        assert!(scene.transform(Viewport::new(0, 0), 0).is_none());
        assert!(scene.transform(Viewport::new(800, 0), 0).is_none());
    }

    #[test]
    fn angle_wraps() {
        let scene = CubeScene {
            degrees_per_frame: 2.0,
            ..CubeScene::default()
        };
        assert_eq!(scene.angle(0), 0.0);
        assert_eq!(scene.angle(45), 90.0);
        assert_eq!(scene.angle(180), 0.0);
    }

    #[test]
    fn mesh_is_indexed_cube() {
        let mesh = CubeScene::default().mesh();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices.len(), 36);
    }
}
