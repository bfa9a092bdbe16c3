use anyhow::Result;

use crate::buffer::VertexBuffer;
use crate::config::Config;
use crate::device::Device;
use crate::event::AppEvent;
use crate::render_loop::{LoopState, Presenter, RenderLoop};
use crate::shader::{ShaderProgram, FRAGMENT_SHADER_SOURCE, VERTEX_SHADER_SOURCE};
use crate::vertex::TRIANGLE;

pub struct Renderer {
    pub vertex_buffer: VertexBuffer,
    pub shader_program: ShaderProgram,
    pub render_loop: RenderLoop,
    pub draw_triangle: bool,
}

impl Renderer {
    /// `framebuffer_size` is the drawable size in physical pixels, which
    /// differs from the configured logical size on scaled displays.
    pub fn init<D: Device>(device: &D, config: &Config, framebuffer_size: (u32, u32)) -> Self {
        Self::with_sources(
            device,
            config,
            framebuffer_size,
            VERTEX_SHADER_SOURCE,
            FRAGMENT_SHADER_SOURCE,
        )
    }

    pub(crate) fn with_sources<D: Device>(
        device: &D,
        config: &Config,
        framebuffer_size: (u32, u32),
        vertex_source: &str,
        fragment_source: &str,
    ) -> Self {
        /* Geometry */
        let vertex_buffer = VertexBuffer::init(device, &TRIANGLE);

        /* Shaders */
        let shader_program = ShaderProgram::build(device, vertex_source, fragment_source);

        /* Viewport */
        let (width, height) = framebuffer_size;
        device.viewport(0, 0, width as i32, height as i32);

        Self {
            vertex_buffer,
            shader_program,
            render_loop: RenderLoop::new(config.clear_color),
            draw_triangle: config.draw_triangle,
        }
    }

    pub fn handle_event<D: Device, P: Presenter>(
        &mut self,
        device: &D,
        presenter: &mut P,
        event: AppEvent,
    ) {
        self.render_loop.handle_event(device, presenter, event);
    }

    pub fn frame<D: Device, P: Presenter>(
        &mut self,
        device: &D,
        presenter: &mut P,
    ) -> Result<LoopState> {
        let vertex_buffer = &self.vertex_buffer;
        let shader_program = &self.shader_program;
        let draw_triangle = self.draw_triangle;

        self.render_loop.frame(device, presenter, |device| {
            if draw_triangle {
                shader_program.activate(device);
                vertex_buffer.bind(device);
                device.draw_triangles(0, vertex_buffer.vertex_count);
            }
        })
    }

    pub fn cleanup<D: Device>(&self, device: &D) {
        self.shader_program.cleanup(device);
        self.vertex_buffer.cleanup(device);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::recording::{Call, RecordingDevice};
    use crate::input::{Key, KeyState};
    use crate::render_loop::counting::CountingPresenter;

    #[test]
    fn init_uploads_builds_and_sets_initial_viewport() {
        let device = RecordingDevice::new();
        let renderer = Renderer::init(&device, &Config::default(), (800, 600));
        let calls = device.calls();

        assert!(calls.iter().any(|c| matches!(c, Call::UploadStatic(b) if b.len() == 36)));
        assert!(calls.contains(&Call::LinkProgram(renderer.shader_program.program)));
        assert_eq!(calls.last(), Some(&Call::Viewport(0, 0, 800, 600)));
        assert!(renderer.shader_program.diagnostics.is_empty());
    }

    #[test]
    fn initial_viewport_covers_the_scaled_framebuffer() {
        let device = RecordingDevice::new();
        let config = Config::default();
        Renderer::init(&device, &config, (config.width * 2, config.height * 2));

        let viewports: Vec<Call> = device
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Viewport(..)))
            .collect();
        assert_eq!(viewports, vec![Call::Viewport(0, 0, 1600, 1200)]);
    }

    #[test]
    fn frame_draws_the_triangle_with_the_program() {
        let device = RecordingDevice::new();
        let mut presenter = CountingPresenter::default();
        let mut renderer = Renderer::init(&device, &Config::default(), (800, 600));
        device.clear_calls();

        renderer.frame(&device, &mut presenter).unwrap();

        assert_eq!(
            device.calls(),
            vec![
                Call::ClearColor([0.2, 0.3, 0.3, 1.0]),
                Call::Clear,
                Call::UseProgram(renderer.shader_program.program),
                Call::BindVertexArray(renderer.vertex_buffer.vao),
                Call::DrawTriangles(0, 3),
            ]
        );
        assert_eq!(presenter.swaps, 1);
    }

    #[test]
    fn clear_only_mode_never_draws() {
        let device = RecordingDevice::new();
        let mut presenter = CountingPresenter::default();
        let config = Config::builder().draw_triangle(false).build();
        let mut renderer = Renderer::init(&device, &config, (800, 600));
        device.clear_calls();

        for _ in 0..3 {
            renderer.frame(&device, &mut presenter).unwrap();
        }

        assert!(!device
            .calls()
            .iter()
            .any(|c| matches!(c, Call::DrawTriangles(..) | Call::UseProgram(_))));
        assert_eq!(presenter.swaps, 3);
    }

    #[test]
    fn broken_vertex_shader_still_reaches_the_render_loop() {
        let device = RecordingDevice::failing_on("broken");
        let mut presenter = CountingPresenter::default();
        let mut renderer = Renderer::with_sources(
            &device,
            &Config::default(),
            (800, 600),
            "#version 460 core\nbroken",
            FRAGMENT_SHADER_SOURCE,
        );

        assert!(renderer.shader_program.diagnostics[0]
            .contains("ERROR::SHADER::VERTEX::COMPILATION::FAILED"));
        let state = renderer.frame(&device, &mut presenter).unwrap();
        assert_eq!(state, LoopState::Running);
        assert_eq!(presenter.swaps, 1);
    }

    #[test]
    fn escape_then_cleanup_releases_everything() {
        let device = RecordingDevice::new();
        let mut presenter = CountingPresenter::default();
        let mut renderer = Renderer::init(&device, &Config::default(), (800, 600));

        renderer.handle_event(
            &device,
            &mut presenter,
            AppEvent::Key {
                key: Key::Escape,
                state: KeyState::Pressed,
            },
        );
        assert_eq!(
            renderer.frame(&device, &mut presenter).unwrap(),
            LoopState::CloseRequested
        );

        device.clear_calls();
        renderer.cleanup(&device);
        assert_eq!(
            device.calls(),
            vec![
                Call::DeleteProgram(renderer.shader_program.program),
                Call::DeleteVertexArray(renderer.vertex_buffer.vao),
                Call::DeleteBuffer(renderer.vertex_buffer.vbo),
            ]
        );
    }
}
