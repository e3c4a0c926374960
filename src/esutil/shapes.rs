use std::f32::consts::PI;

/// Owned vertex data for a generated shape. Positions and normals are xyz
/// triples, texture coordinates are uv pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub tex_coords: Vec<f32>,
    pub indices: Vec<u32>,
}

impl Shape {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

const CUBE_VERTICES: [[f32; 3]; 24] = [
    [-0.5, -0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, -0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [0.5, 0.5, -0.5],
    [-0.5, -0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [0.5, 0.5, -0.5],
    [0.5, -0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [0.5, 0.5, 0.5],
    [0.5, -0.5, 0.5],
    [-0.5, -0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [-0.5, 0.5, 0.5],
    [-0.5, 0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [0.5, 0.5, -0.5],
];

// one normal per face, four vertices per face
const CUBE_FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, -1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, -1.0],
    [0.0, 0.0, 1.0],
    [-1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
];

const CUBE_TEX: [[f32; 2]; 24] = [
    [0.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [0.0, 0.0],
    [0.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [0.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [0.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [0.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
];

const CUBE_INDICES: [u32; 36] = [
    0, 2, 1, 0, 3, 2, //
    4, 5, 6, 4, 6, 7, //
    8, 9, 10, 8, 10, 11, //
    12, 15, 14, 12, 14, 13, //
    16, 17, 18, 16, 18, 19, //
    20, 23, 22, 20, 22, 21,
];

/// Unit cube centred on the origin, scaled by `scale`.
pub fn cube(scale: f32) -> Shape {
    Shape {
        vertices: CUBE_VERTICES
            .iter()
            .flat_map(|v| v.iter().map(move |c| c * scale))
            .collect(),
        normals: CUBE_FACE_NORMALS
            .iter()
            .flat_map(|n| std::iter::repeat(n).take(4))
            .flat_map(|n| n.iter().copied())
            .collect(),
        tex_coords: CUBE_TEX.iter().flat_map(|t| t.iter().copied()).collect(),
        indices: CUBE_INDICES.to_vec(),
    }
}

/// UV sphere with `slices` meridians and `slices / 2` parallels.
pub fn sphere(slices: u32, radius: f32) -> Shape {
    let parallels = slices / 2;
    if slices == 0 || parallels == 0 {
        return Shape::default();
    }
    let step = 2.0 * PI / slices as f32;
    let vertex_count = ((parallels + 1) * (slices + 1)) as usize;
    let mut shape = Shape {
        vertices: Vec::with_capacity(vertex_count * 3),
        normals: Vec::with_capacity(vertex_count * 3),
        tex_coords: Vec::with_capacity(vertex_count * 2),
        indices: Vec::with_capacity((parallels * slices * 6) as usize),
    };

    for i in 0..=parallels {
        for j in 0..=slices {
            let (si, ci) = (step * i as f32).sin_cos();
            let (sj, cj) = (step * j as f32).sin_cos();
            let v = [radius * si * sj, radius * ci, radius * si * cj];
            shape.vertices.extend_from_slice(&v);
            if radius != 0.0 {
                shape.normals.extend(v.iter().map(|c| c / radius));
            } else {
                shape.normals.extend_from_slice(&[0.0, 1.0, 0.0]);
            }
            shape.tex_coords.push(j as f32 / slices as f32);
            shape.tex_coords.push(1.0 - i as f32 / parallels as f32);
        }
    }

    for i in 0..parallels {
        for j in 0..slices {
            let row = i * (slices + 1);
            let next = (i + 1) * (slices + 1);
            shape.indices.extend_from_slice(&[
                row + j,
                next + j,
                next + j + 1,
                row + j,
                next + j + 1,
                row + j + 1,
            ]);
        }
    }
    shape
}

/// Flat `size` by `size` grid spanning [0, 1] in x and y.
pub fn square_grid(size: u32) -> Shape {
    if size < 2 {
        return Shape::default();
    }
    let step = (size - 1) as f32;
    let mut shape = Shape::default();
    for i in 0..size {
        for j in 0..size {
            shape
                .vertices
                .extend_from_slice(&[i as f32 / step, j as f32 / step, 0.0]);
        }
    }
    for i in 0..size - 1 {
        for j in 0..size - 1 {
            let a = j + i * size;
            let b = j + (i + 1) * size;
            shape
                .indices
                .extend_from_slice(&[a, a + 1, b + 1, a, b + 1, b]);
        }
    }
    shape
}
