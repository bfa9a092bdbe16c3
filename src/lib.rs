pub mod buffer;
pub mod config;
pub mod context;
pub mod device;
pub mod event;
pub mod input;
pub mod logging;
pub mod render_loop;
pub mod renderer;
pub mod shader;
pub mod vertex;

use std::error::Error;
use std::ffi::{c_void, CStr};
use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, bail, Context, Result};
use gl::types::{GLchar, GLenum, GLsizei, GLuint};

pub const WINDOW_CREATION_FAILED: &str = "Failed to create window";
pub const GL_LOAD_FAILED: &str = "Failed to load OpenGL function pointers";
pub const FAILURE_EXIT_CODE: i32 = -1;

/// Runs the window/config builder and folds every way it can fail (an
/// error, no window, or a config picker with nothing to pick) into one
/// `WINDOW_CREATION_FAILED` error.
pub fn create_window<W, C, F>(build: F) -> Result<(W, C)>
where
    F: FnOnce() -> std::result::Result<(Option<W>, C), Box<dyn Error>>,
{
    let built = match panic::catch_unwind(AssertUnwindSafe(build)) {
        Ok(Ok(built)) => Ok(built),
        Ok(Err(e)) => Err(anyhow!("{}", e)),
        Err(payload) => Err(anyhow!("{}", panic_message(payload.as_ref()))),
    };
    let (window, config) = built.context(WINDOW_CREATION_FAILED)?;
    let window = window
        .ok_or_else(|| anyhow!("no window was returned"))
        .context(WINDOW_CREATION_FAILED)?;
    Ok((window, config))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "window builder panicked".to_string()
    }
}

pub fn exit_code<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => FAILURE_EXIT_CODE,
    }
}

/// Fills the global `gl` function table. Must run with a current context and
/// before any other GL call.
pub fn load_gl<F>(loader: F) -> Result<()>
where
    F: FnMut(&'static str) -> *const c_void,
{
    gl::load_with(loader);

    let missing: Vec<&str> = required_functions()
        .into_iter()
        .filter(|(_, loaded)| !loaded)
        .map(|(name, _)| name)
        .collect();
    if !missing.is_empty() {
        log::debug!("unresolved GL entry points: {}", missing.join(", "));
        bail!(GL_LOAD_FAILED);
    }
    Ok(())
}

fn required_functions() -> Vec<(&'static str, bool)> {
    vec![
        ("glGenBuffers", gl::GenBuffers::is_loaded()),
        ("glBindBuffer", gl::BindBuffer::is_loaded()),
        ("glBufferData", gl::BufferData::is_loaded()),
        ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
        ("glBindVertexArray", gl::BindVertexArray::is_loaded()),
        ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded()),
        ("glEnableVertexAttribArray", gl::EnableVertexAttribArray::is_loaded()),
        ("glCreateShader", gl::CreateShader::is_loaded()),
        ("glShaderSource", gl::ShaderSource::is_loaded()),
        ("glCompileShader", gl::CompileShader::is_loaded()),
        ("glGetShaderiv", gl::GetShaderiv::is_loaded()),
        ("glGetShaderInfoLog", gl::GetShaderInfoLog::is_loaded()),
        ("glCreateProgram", gl::CreateProgram::is_loaded()),
        ("glAttachShader", gl::AttachShader::is_loaded()),
        ("glLinkProgram", gl::LinkProgram::is_loaded()),
        ("glGetProgramiv", gl::GetProgramiv::is_loaded()),
        ("glUseProgram", gl::UseProgram::is_loaded()),
        ("glViewport", gl::Viewport::is_loaded()),
        ("glClearColor", gl::ClearColor::is_loaded()),
        ("glClear", gl::Clear::is_loaded()),
        ("glDrawArrays", gl::DrawArrays::is_loaded()),
    ]
}

extern "system" fn gl_debug_callback(
    _source: GLenum,
    gltype: GLenum,
    id: GLuint,
    severity: GLenum,
    length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    if message.is_null() {
        return;
    }
    let message = if length >= 0 {
        let bytes = unsafe { std::slice::from_raw_parts(message as *const u8, length as usize) };
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned()
    };
    log::log!(severity_level(severity), "[GL][{:#x}][{}] {}", gltype, id, message);
}

fn severity_level(severity: GLenum) -> log::Level {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => log::Level::Error,
        gl::DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
        gl::DEBUG_SEVERITY_LOW => log::Level::Info,
        _ => log::Level::Debug,
    }
}

/// Routes driver debug messages into `log` when `KHR_debug` is available.
pub fn enable_debug_output() -> bool {
    if !gl::DebugMessageCallback::is_loaded() {
        log::debug!("glDebugMessageCallback unavailable, debug output stays off");
        return false;
    }
    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_callback), std::ptr::null());
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reported(result: &Result<(u32, u8)>) -> String {
        format!("{:#}", result.as_ref().unwrap_err())
    }

    #[test]
    fn missing_window_reports_creation_failure_and_exits_with_minus_one() {
        let result = create_window::<u32, u8, _>(|| Ok((None, 0)));
        assert_eq!(
            reported(&result),
            "Failed to create window: no window was returned"
        );
        assert_eq!(exit_code(&result), -1);
    }

    #[test]
    fn builder_error_is_reported_as_creation_failure() {
        let result = create_window::<u32, u8, _>(|| Err("no display connection".into()));
        assert_eq!(
            reported(&result),
            "Failed to create window: no display connection"
        );
        assert_eq!(exit_code(&result), FAILURE_EXIT_CODE);
    }

    #[test]
    fn empty_config_pick_is_reported_instead_of_aborting() {
        let result =
            create_window::<u32, u8, _>(|| panic!("display offered no framebuffer configs"));
        assert_eq!(
            reported(&result),
            "Failed to create window: display offered no framebuffer configs"
        );
        assert_eq!(exit_code(&result), FAILURE_EXIT_CODE);
    }

    #[test]
    fn created_window_is_passed_through() {
        let result = create_window::<u32, u8, _>(|| Ok((Some(7), 3)));
        assert_eq!(exit_code(&result), 0);
        assert_eq!(result.unwrap(), (7, 3));
    }

    #[test]
    fn debug_severities_map_to_log_levels() {
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_HIGH), log::Level::Error);
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_MEDIUM), log::Level::Warn);
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_LOW), log::Level::Info);
        assert_eq!(severity_level(gl::DEBUG_SEVERITY_NOTIFICATION), log::Level::Debug);
    }

    #[test]
    fn debug_output_stays_off_without_a_loaded_callback() {
        assert!(!gl::DebugMessageCallback::is_loaded());
        assert!(!enable_debug_output());
    }

    #[test]
    fn unresolvable_entry_points_fail_loading() {
        let result = load_gl(|_| std::ptr::null());
        assert_eq!(result.as_ref().unwrap_err().to_string(), GL_LOAD_FAILED);
        assert_eq!(exit_code(&result), FAILURE_EXIT_CODE);
    }
}
