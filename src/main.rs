use anyhow::Result;
use learn_opengl::config::Config;
use learn_opengl::context::GlContext;
use learn_opengl::device::GlDevice;
use learn_opengl::event::from_window_event;
use learn_opengl::logging::{init_logging, LoggingConfig};
use learn_opengl::render_loop::LoopState;
use learn_opengl::renderer::Renderer;
use learn_opengl::{enable_debug_output, exit_code, load_gl};
use winit::event::Event;
use winit::event_loop::EventLoop;

fn main() {
    init_logging(LoggingConfig::default());

    let result = run();
    if let Err(e) = &result {
        log::error!("{:#}", e);
    }
    std::process::exit(exit_code(&result));
}

fn run() -> Result<()> {
    let config = Config::builder().build();

    /* Window + context */
    let event_loop = EventLoop::new();
    let mut context = GlContext::init(&event_loop, &config)?;

    /* Function pointers */
    load_gl(|symbol| context.proc_address(symbol))?;
    if config.debug_output && !enable_debug_output() {
        log::info!("GL debug output requested but not supported by this context");
    }

    /* Geometry + shaders */
    let device = GlDevice;
    let mut renderer = Renderer::init(&device, &config, context.framebuffer_size());

    event_loop.run(move |event, _, control_flow| {
        control_flow.set_poll();
        match event {
            Event::WindowEvent { event, .. } => {
                if let Some(event) = from_window_event(&event) {
                    renderer.handle_event(&device, &mut context, event);
                }
            }
            Event::MainEventsCleared => match renderer.frame(&device, &mut context) {
                Ok(LoopState::Running) => {}
                Ok(LoopState::CloseRequested) => control_flow.set_exit(),
                Err(e) => {
                    log::error!("frame failed: {:#}", e);
                    control_flow.set_exit_with_code(exit_code::<()>(&Err(e)));
                }
            },
            Event::LoopDestroyed => {
                renderer.cleanup(&device);
                log::info!("released GL objects, exiting");
            }
            _ => {}
        }
    })
}
