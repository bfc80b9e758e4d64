//! frameinput core
//!
//! Polled keyboard, mouse and touch devices for per-frame game loops. Each
//! device listens to native events on an [`Element`] and keeps two copies of
//! its state: the live one updated by event handlers, and a snapshot taken at
//! the last `update()` call, so callers can ask both "is it down" and "did it
//! go down since last frame".
//!
//! The browser bindings live in `frameinput-web`; [`HeadlessElement`] lets a
//! native host (or a test) feed events directly.

pub mod config;
pub mod element;
pub mod headless;
pub mod keyboard;
pub mod keycode;
pub mod mouse;
pub mod pool;
pub mod touch;
pub mod touch_point;

pub use config::{InputConfig, KeyboardOptions, MouseOptions};
pub use element::{events, Element, Handler, InputEvent, TouchRecord};
pub use headless::{HeadlessElement, HeadlessEvent};
pub use keyboard::Keyboard;
pub use keycode::{to_key_code, to_key_identifier, Key, KeyIdentifier};
pub use mouse::{Mouse, BUTTON_COUNT};
pub use pool::{PointId, TouchPool};
pub use touch::Touch;
pub use touch_point::{TouchPhase, TouchPoint, TouchType};
