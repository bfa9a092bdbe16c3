use winit::event::{ElementState, KeyboardInput, VirtualKeyCode, WindowEvent};

use crate::input::{Key, KeyState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEvent {
    FramebufferResized { width: u32, height: u32 },
    Key { key: Key, state: KeyState },
    CloseRequested,
}

/// Keeps only the window events the render loop reacts to.
pub fn from_window_event(event: &WindowEvent) -> Option<AppEvent> {
    match event {
        WindowEvent::Resized(size) => Some(AppEvent::FramebufferResized {
            width: size.width,
            height: size.height,
        }),
        WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
            Some(AppEvent::FramebufferResized {
                width: new_inner_size.width,
                height: new_inner_size.height,
            })
        }
        WindowEvent::CloseRequested => Some(AppEvent::CloseRequested),
        WindowEvent::KeyboardInput {
            input:
                KeyboardInput {
                    state,
                    virtual_keycode: Some(keycode),
                    ..
                },
            ..
        } => {
            let key = match keycode {
                VirtualKeyCode::Escape => Key::Escape,
                _ => return None,
            };
            let state = match state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            Some(AppEvent::Key { key, state })
        }
        _ => None,
    }
}
