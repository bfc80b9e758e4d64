//! frameinput WASM runtime
//!
//! Exposes `Keyboard`, `Mouse` and `Touch` to JavaScript. Each one binds to a
//! DOM element and is polled once per `requestAnimationFrame` tick:
//!
//! ```js
//! const keyboard = new Keyboard(window, { preventDefault: true });
//! function frame() {
//!     if (keyboard.wasPressed("space")) jump();
//!     keyboard.update();
//!     requestAnimationFrame(frame);
//! }
//! ```

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod keyboard;
#[cfg(target_arch = "wasm32")]
mod mouse;
#[cfg(target_arch = "wasm32")]
mod touch;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point, called when the WASM module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed; report through that one.
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::warn!("console logger not installed: {err}");
    }
    log::info!("frameinput web runtime initialized");
}
