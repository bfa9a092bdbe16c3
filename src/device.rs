use std::ffi::c_void;

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn tag(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "VERTEX",
            ShaderStage::Fragment => "FRAGMENT",
        }
    }

    fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

/// The slice of OpenGL the program talks to. Handles are raw GL names.
pub trait Device {
    fn gen_buffer(&self) -> GLuint;
    fn bind_array_buffer(&self, buffer: GLuint);
    /// Copies `data` into the bound array buffer with `STATIC_DRAW`.
    fn upload_static(&self, data: &[u8]);
    fn delete_buffer(&self, buffer: GLuint);

    fn gen_vertex_array(&self) -> GLuint;
    fn bind_vertex_array(&self, vao: GLuint);
    /// Float attribute read from the bound array buffer.
    fn vertex_attrib_f32(&self, index: GLuint, components: GLint, stride: GLsizei, offset: usize);
    fn delete_vertex_array(&self, vao: GLuint);

    fn create_shader(&self, stage: ShaderStage) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &str);
    fn compile_shader(&self, shader: GLuint);
    fn compile_status(&self, shader: GLuint) -> bool;
    fn shader_info_log(&self, shader: GLuint, capacity: usize) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn link_status(&self, program: GLuint) -> bool;
    fn program_info_log(&self, program: GLuint, capacity: usize) -> String;
    fn use_program(&self, program: GLuint);
    fn delete_program(&self, program: GLuint);

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, color: [f32; 4]);
    fn clear_color_buffer(&self);
    fn draw_triangles(&self, first: GLint, count: GLsizei);
}

/// Calls straight into the loaded `gl` function pointers. Only valid while a
/// context is current on this thread.
pub struct GlDevice;

fn read_log(buffer: &[u8], written: GLsizei) -> String {
    let written = (written.max(0) as usize).min(buffer.len());
    String::from_utf8_lossy(&buffer[..written]).into_owned()
}

impl Device for GlDevice {
    fn gen_buffer(&self) -> GLuint {
        let mut buffer = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        buffer
    }

    fn bind_array_buffer(&self, buffer: GLuint) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, buffer) };
    }

    fn upload_static(&self, data: &[u8]) {
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            )
        };
    }

    fn delete_buffer(&self, buffer: GLuint) {
        unsafe { gl::DeleteBuffers(1, &buffer) };
    }

    fn gen_vertex_array(&self) -> GLuint {
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        vao
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        unsafe { gl::BindVertexArray(vao) };
    }

    fn vertex_attrib_f32(&self, index: GLuint, components: GLint, stride: GLsizei, offset: usize) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                components,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const c_void,
            );
            gl::EnableVertexAttribArray(index);
        }
    }

    fn delete_vertex_array(&self, vao: GLuint) {
        unsafe { gl::DeleteVertexArrays(1, &vao) };
    }

    fn create_shader(&self, stage: ShaderStage) -> GLuint {
        unsafe { gl::CreateShader(stage.gl_enum()) }
    }

    fn shader_source(&self, shader: GLuint, source: &str) {
        let pointer = source.as_ptr() as *const GLchar;
        let length = source.len() as GLint;
        unsafe { gl::ShaderSource(shader, 1, &pointer, &length) };
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) };
    }

    fn compile_status(&self, shader: GLuint) -> bool {
        let mut success = gl::FALSE as GLint;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success != gl::FALSE as GLint
    }

    fn shader_info_log(&self, shader: GLuint, capacity: usize) -> String {
        let mut buffer = vec![0u8; capacity];
        let mut written = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                capacity as GLsizei,
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            )
        };
        read_log(&buffer, written)
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) };
    }

    fn link_status(&self, program: GLuint) -> bool {
        let mut success = gl::FALSE as GLint;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success != gl::FALSE as GLint
    }

    fn program_info_log(&self, program: GLuint, capacity: usize) -> String {
        let mut buffer = vec![0u8; capacity];
        let mut written = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program,
                capacity as GLsizei,
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            )
        };
        read_log(&buffer, written)
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) };
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) };
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { gl::Viewport(x, y, width, height) };
    }

    fn clear_color(&self, color: [f32; 4]) {
        unsafe { gl::ClearColor(color[0], color[1], color[2], color[3]) };
    }

    fn clear_color_buffer(&self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
    }

    fn draw_triangles(&self, first: GLint, count: GLsizei) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first, count) };
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_tags() {
        assert_eq!(ShaderStage::Vertex.tag(), "VERTEX");
        assert_eq!(ShaderStage::Fragment.tag(), "FRAGMENT");
    }

    #[test]
    fn read_log_stops_at_written_length() {
        let buffer = b"abc\0\0\0";
        assert_eq!(read_log(buffer, 3), "abc");
        assert_eq!(read_log(buffer, -1), "");
        assert_eq!(read_log(buffer, 100).len(), buffer.len());
    }
}
