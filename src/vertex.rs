use bytemuck::{Pod, Zeroable};

#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct VertexData {
    pub position: [f32; 3],
}

impl VertexData {
    pub const COMPONENTS: i32 = 3;
    pub const STRIDE: i32 = std::mem::size_of::<VertexData>() as i32;
}

/* Normalized device coordinates, origin at the center */
pub const TRIANGLE: [VertexData; 3] = [
    VertexData {
        position: [-0.5, -0.5, 0.0],
    },
    VertexData {
        position: [0.5, -0.5, 0.0],
    },
    VertexData {
        position: [0.0, 0.5, 0.0],
    },
];

pub fn as_bytes(vertices: &[VertexData]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_nine_floats_in_order() {
        let floats: &[f32] = bytemuck::cast_slice(&TRIANGLE);
        let expected: [f32; 9] = [-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0];
        assert_eq!(floats, &expected[..]);
    }

    #[test]
    fn triangle_is_thirty_six_bytes() {
        assert_eq!(as_bytes(&TRIANGLE).len(), 36);
        assert_eq!(VertexData::STRIDE, 12);
    }

    #[test]
    fn every_coordinate_is_in_ndc_range() {
        for vertex in TRIANGLE {
            assert!(vertex.position.iter().all(|c| (-1.0..=1.0).contains(c)));
        }
    }
}
