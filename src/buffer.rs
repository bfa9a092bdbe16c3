use gl::types::GLuint;

use crate::device::Device;
use crate::vertex::{self, VertexData};

pub struct VertexBuffer {
    pub vbo: GLuint,
    pub vao: GLuint,
    pub vertex_count: i32,
}

impl VertexBuffer {
    pub fn init<D: Device>(device: &D, vertices: &[VertexData]) -> Self {
        /* Vertex array, records the attribute layout below */
        let vao = device.gen_vertex_array();
        device.bind_vertex_array(vao);

        /* Upload, set once and drawn many times */
        let vbo = device.gen_buffer();
        device.bind_array_buffer(vbo);
        device.upload_static(vertex::as_bytes(vertices));

        /* Attribute 0: position */
        device.vertex_attrib_f32(0, VertexData::COMPONENTS, VertexData::STRIDE, 0);

        device.bind_vertex_array(0);
        log::debug!(
            "uploaded {} vertices ({} bytes) to buffer {}",
            vertices.len(),
            std::mem::size_of_val(vertices),
            vbo
        );

        Self {
            vbo,
            vao,
            vertex_count: vertices.len() as i32,
        }
    }

    pub fn bind<D: Device>(&self, device: &D) {
        device.bind_vertex_array(self.vao);
    }

    pub fn cleanup<D: Device>(&self, device: &D) {
        device.delete_vertex_array(self.vao);
        device.delete_buffer(self.vbo);
    }
}
