//! Application layer
//!
//! - [`Input`]: platform-agnostic keyboard/mouse state
//! - [`KeyBindings`]: maps keys to [`InputAction`]s
//! - [`StartGate`]: the click-to-start overlay state
//! - [`Stage`]: owns a mounted scene and drives it once per frame

pub mod bindings;
pub mod gate;
pub mod input;
#[cfg(feature = "winit")]
pub mod input_adapter;
pub mod stage;

pub use bindings::{InputAction, KeyBindings};
pub use gate::StartGate;
pub use input::{ButtonState, Input, Key, MouseButton};
pub use stage::Stage;

/// Installs the platform logger: `env_logger` natively (default level
/// `info`, overridable through `RUST_LOG`), the browser console on wasm.
///
/// Safe to call more than once.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    }
}
