use gl::types::GLuint;

use crate::device::{Device, ShaderStage};

pub const VERTEX_SHADER_SOURCE: &str = "#version 460 core
layout (location = 0) in vec3 aPos;
void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
";

pub const FRAGMENT_SHADER_SOURCE: &str = "#version 460 core
out vec4 FragColor;
void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
";

/// Bytes handed to the driver for an info log, terminator included.
pub const INFO_LOG_CAPACITY: usize = 512;

pub fn compile_failure_message(stage: ShaderStage, log: &str) -> String {
    format!("ERROR::SHADER::{}::COMPILATION::FAILED\n{}", stage.tag(), log)
}

pub fn link_failure_message(log: &str) -> String {
    format!("ERROR::SHADER::PROGRAM::LINKING_FAILED\n{}", log)
}

pub struct ShaderProgram {
    pub program: GLuint,
    pub linked: bool,
    /// Compile and link failures, in the order they were reported.
    pub diagnostics: Vec<String>,
}

impl ShaderProgram {
    /// Compiles both stages and links them. Failures are logged and kept in
    /// `diagnostics` but never abort the build.
    pub fn build<D: Device>(device: &D, vertex_source: &str, fragment_source: &str) -> Self {
        let mut diagnostics = Vec::new();

        /* Shaders */
        let vertex_shader = compile(device, ShaderStage::Vertex, vertex_source, &mut diagnostics);
        let fragment_shader =
            compile(device, ShaderStage::Fragment, fragment_source, &mut diagnostics);

        /* Program */
        let program = device.create_program();
        device.attach_shader(program, vertex_shader);
        device.attach_shader(program, fragment_shader);
        device.link_program(program);

        let linked = device.link_status(program);
        if !linked {
            let info_log = device.program_info_log(program, INFO_LOG_CAPACITY);
            let message = link_failure_message(&info_log);
            log::error!("{}", message);
            diagnostics.push(message);
        } else {
            log::info!("shader program {} linked", program);
        }

        device.delete_shader(vertex_shader);
        device.delete_shader(fragment_shader);

        Self {
            program,
            linked,
            diagnostics,
        }
    }

    pub fn activate<D: Device>(&self, device: &D) {
        device.use_program(self.program);
    }

    pub fn cleanup<D: Device>(&self, device: &D) {
        device.delete_program(self.program);
    }
}

fn compile<D: Device>(
    device: &D,
    stage: ShaderStage,
    source: &str,
    diagnostics: &mut Vec<String>,
) -> GLuint {
    let shader = device.create_shader(stage);
    device.shader_source(shader, source);
    device.compile_shader(shader);

    if !device.compile_status(shader) {
        let info_log = device.shader_info_log(shader, INFO_LOG_CAPACITY);
        let message = compile_failure_message(stage, &info_log);
        log::error!("{}", message);
        diagnostics.push(message);
    }
    shader
}
