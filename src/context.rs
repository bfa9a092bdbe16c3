use std::ffi::{c_void, CString};
use std::num::NonZeroU32;

use anyhow::{Context, Result};
use glutin::config::{Config as FramebufferConfig, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::{Display, GetGlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use crate::config::Config;
use crate::render_loop::Presenter;
use crate::create_window;

pub struct GlContext {
    pub window: Window,
    pub display: Display,
    pub surface: Surface<WindowSurface>,
    pub context: PossiblyCurrentContext,
}

impl GlContext {
    /// Creates the window and makes a core-profile context current on it.
    pub fn init(event_loop: &EventLoop<()>, config: &Config) -> Result<Self> {
        /* Window + framebuffer config */
        let window_builder = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height));
        let template = ConfigTemplateBuilder::new();
        let (window, gl_config) = create_window(|| {
            DisplayBuilder::new()
                .with_window_builder(Some(window_builder))
                .build(event_loop, template, pick_config)
        })?;
        let display = gl_config.display();

        /* Context */
        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(window.raw_window_handle()));
        let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
            .with_context(|| format!("OpenGL {}.{} core context unavailable", major, minor))?;

        /* Surface */
        let surface_attributes = window.build_surface_attributes(Default::default());
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }?;
        let context = not_current.make_current(&surface)?;

        let size = window.inner_size();
        log::info!(
            "window \"{}\" {}x{} ({}x{} physical) with OpenGL {}.{} core context",
            config.title,
            config.width,
            config.height,
            size.width,
            size.height,
            major,
            minor
        );

        Ok(Self {
            window,
            display,
            surface,
            context,
        })
    }

    /// Drawable size in physical pixels.
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    /// Resolves an entry point through the display, null when unknown.
    pub fn proc_address(&self, symbol: &str) -> *const c_void {
        match CString::new(symbol) {
            Ok(symbol) => self.display.get_proc_address(&symbol),
            Err(_) => std::ptr::null(),
        }
    }
}

impl Presenter for GlContext {
    fn swap_buffers(&mut self) -> Result<()> {
        self.surface.swap_buffers(&self.context)?;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(&self.context, width, height);
        }
    }
}

fn pick_config(configs: Box<dyn Iterator<Item = FramebufferConfig> + '_>) -> FramebufferConfig {
    configs
        .reduce(|accum, config| {
            if config.num_samples() > accum.num_samples() {
                config
            } else {
                accum
            }
        })
        .expect("display offered no framebuffer configs")
}
