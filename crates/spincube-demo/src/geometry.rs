//! Static cube geometry.
//!
//! 24 vertices (6 faces x 4 corners) held as four parallel flat arrays,
//! index-aligned by vertex, plus a 36-entry index buffer grouping them into
//! 12 CCW triangles. Contents never change after upload.

/// Vertex positions, 3 floats per vertex.
pub const POSITIONS: [f32; 72] = [
    // Front face
    -1.0, -1.0, 1.0, //
    1.0, -1.0, 1.0, //
    1.0, 1.0, 1.0, //
    -1.0, 1.0, 1.0, //
    // Back face
    -1.0, -1.0, -1.0, //
    -1.0, 1.0, -1.0, //
    1.0, 1.0, -1.0, //
    1.0, -1.0, -1.0, //
    // Top face
    -1.0, 1.0, -1.0, //
    -1.0, 1.0, 1.0, //
    1.0, 1.0, 1.0, //
    1.0, 1.0, -1.0, //
    // Bottom face
    -1.0, -1.0, -1.0, //
    1.0, -1.0, -1.0, //
    1.0, -1.0, 1.0, //
    -1.0, -1.0, 1.0, //
    // Right face
    1.0, -1.0, -1.0, //
    1.0, 1.0, -1.0, //
    1.0, 1.0, 1.0, //
    1.0, -1.0, 1.0, //
    // Left face
    -1.0, -1.0, -1.0, //
    -1.0, -1.0, 1.0, //
    -1.0, 1.0, 1.0, //
    -1.0, 1.0, -1.0, //
];

/// Vertex normals, 3 floats per vertex, constant per face.
pub const NORMALS: [f32; 72] = [
    // Front
    0.0, 0.0, 1.0, //
    0.0, 0.0, 1.0, //
    0.0, 0.0, 1.0, //
    0.0, 0.0, 1.0, //
    // Back
    0.0, 0.0, -1.0, //
    0.0, 0.0, -1.0, //
    0.0, 0.0, -1.0, //
    0.0, 0.0, -1.0, //
    // Top
    0.0, 1.0, 0.0, //
    0.0, 1.0, 0.0, //
    0.0, 1.0, 0.0, //
    0.0, 1.0, 0.0, //
    // Bottom
    0.0, -1.0, 0.0, //
    0.0, -1.0, 0.0, //
    0.0, -1.0, 0.0, //
    0.0, -1.0, 0.0, //
    // Right
    1.0, 0.0, 0.0, //
    1.0, 0.0, 0.0, //
    1.0, 0.0, 0.0, //
    1.0, 0.0, 0.0, //
    // Left
    -1.0, 0.0, 0.0, //
    -1.0, 0.0, 0.0, //
    -1.0, 0.0, 0.0, //
    -1.0, 0.0, 0.0, //
];

/// One RGBA color per face; expanded to per-vertex data by [`vertex_colors`].
pub const FACE_COLORS: [[f32; 4]; 6] = [
    [1.0, 1.0, 1.0, 1.0], // Front face: white
    [1.0, 0.0, 0.0, 1.0], // Back face: red
    [0.0, 1.0, 0.0, 1.0], // Top face: green
    [0.0, 0.0, 1.0, 1.0], // Bottom face: blue
    [1.0, 1.0, 0.0, 1.0], // Right face: yellow
    [1.0, 0.0, 1.0, 1.0], // Left face: purple
];

/// Texture coordinates, 2 floats per vertex; each face maps the full image.
pub const TEX_COORDS: [f32; 48] = [
    // Front
    0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, //
    // Back
    0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, //
    // Top
    0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, //
    // Bottom
    0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, //
    // Right
    0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, //
    // Left
    0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, //
];

/// Triangle indices: two triangles per face, fixed winding.
pub const INDICES: [u16; 36] = [
    0, 1, 2, 0, 2, 3, // front
    4, 5, 6, 4, 6, 7, // back
    8, 9, 10, 8, 10, 11, // top
    12, 13, 14, 12, 14, 15, // bottom
    16, 17, 18, 16, 18, 19, // right
    20, 21, 22, 20, 22, 23, // left
];

/// Number of vertices (6 faces x 4 corners).
pub const VERTEX_COUNT: usize = 24;

/// Expands [`FACE_COLORS`] to 4 floats per vertex (constant per face).
pub fn vertex_colors() -> [f32; VERTEX_COUNT * 4] {
    let mut colors = [0.0; VERTEX_COUNT * 4];
    for (face, rgba) in FACE_COLORS.iter().enumerate() {
        for corner in 0..4 {
            let base = (face * 4 + corner) * 4;
            colors[base..base + 4].copy_from_slice(rgba);
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_lengths_are_index_aligned() {
        assert_eq!(POSITIONS.len(), VERTEX_COUNT * 3);
        assert_eq!(NORMALS.len(), VERTEX_COUNT * 3);
        assert_eq!(TEX_COORDS.len(), VERTEX_COUNT * 2);
        assert_eq!(vertex_colors().len(), VERTEX_COUNT * 4);
        assert_eq!(INDICES.len(), 36);
    }

    #[test]
    fn indices_stay_within_vertex_range() {
        assert!(INDICES.iter().all(|&i| (i as usize) < VERTEX_COUNT));
    }

    #[test]
    fn every_vertex_is_referenced() {
        for v in 0..VERTEX_COUNT as u16 {
            assert!(INDICES.contains(&v), "vertex {v} unused");
        }
    }

    #[test]
    fn normals_are_unit_length() {
        for n in NORMALS.chunks_exact(3) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn each_face_has_constant_normal() {
        for face in 0..6 {
            let face_normals: Vec<_> = (0..4)
                .map(|c| {
                    let base = (face * 4 + c) * 3;
                    &NORMALS[base..base + 3]
                })
                .collect();
            assert!(face_normals.windows(2).all(|w| w[0] == w[1]));
        }
    }

    #[test]
    fn each_face_has_constant_color() {
        let colors = vertex_colors();
        for face in 0..6 {
            for corner in 0..4 {
                let base = (face * 4 + corner) * 4;
                assert_eq!(&colors[base..base + 4], &FACE_COLORS[face]);
            }
        }
    }

    #[test]
    fn triangles_per_face() {
        // Each face contributes exactly 6 indices referencing its own corners.
        for face in 0..6u16 {
            let lo = face * 4;
            let hi = lo + 4;
            let span = &INDICES[(face as usize) * 6..(face as usize) * 6 + 6];
            assert!(span.iter().all(|&i| i >= lo && i < hi));
        }
    }
}
