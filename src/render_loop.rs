use anyhow::Result;

use crate::device::Device;
use crate::event::AppEvent;
use crate::input::{Input, Key};

/// The window side of a frame: showing the back buffer and following the
/// framebuffer size.
pub trait Presenter {
    fn swap_buffers(&mut self) -> Result<()>;
    fn resize(&mut self, width: u32, height: u32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    CloseRequested,
}

pub struct RenderLoop {
    pub state: LoopState,
    pub input: Input,
    pub clear_color: [f32; 4],
    pub frames: u64,
}

impl RenderLoop {
    pub fn new(clear_color: [f32; 4]) -> Self {
        Self {
            state: LoopState::Running,
            input: Input::default(),
            clear_color,
            frames: 0,
        }
    }

    pub fn should_close(&self) -> bool {
        self.state == LoopState::CloseRequested
    }

    pub fn request_close(&mut self) {
        if self.state != LoopState::CloseRequested {
            log::info!("close requested after {} frames", self.frames);
        }
        self.state = LoopState::CloseRequested;
    }

    pub fn handle_event<D: Device, P: Presenter>(
        &mut self,
        device: &D,
        presenter: &mut P,
        event: AppEvent,
    ) {
        match event {
            AppEvent::FramebufferResized { width, height } => {
                log::debug!("framebuffer resized to {}x{}", width, height);
                presenter.resize(width, height);
                device.viewport(0, 0, width as i32, height as i32);
            }
            AppEvent::Key { key, state } => self.input.update(key, state),
            AppEvent::CloseRequested => self.request_close(),
        }
    }

    pub fn process_input(&mut self) {
        if self.input.is_pressed(Key::Escape) {
            self.request_close();
        }
    }

    /// One loop iteration. `draw` runs between the clear and the swap. Nothing
    /// is rendered once a close was requested.
    pub fn frame<D, P, F>(&mut self, device: &D, presenter: &mut P, draw: F) -> Result<LoopState>
    where
        D: Device,
        P: Presenter,
        F: FnOnce(&D),
    {
        if self.should_close() {
            return Ok(self.state);
        }

        self.process_input();

        device.clear_color(self.clear_color);
        device.clear_color_buffer();
        draw(device);

        presenter.swap_buffers()?;
        self.frames += 1;

        Ok(self.state)
    }
}
