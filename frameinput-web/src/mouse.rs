use frameinput_core::Mouse;
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

use crate::dom::DomElement;

/// A 2D value handed to JavaScript as `{ x, y }`.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

/// Mouse device exported to JavaScript as `Mouse`.
#[wasm_bindgen(js_name = Mouse)]
pub struct WebMouse {
    inner: Mouse<DomElement>,
}

#[wasm_bindgen(js_class = Mouse)]
impl WebMouse {
    #[wasm_bindgen(constructor)]
    pub fn new(element: Option<EventTarget>) -> WebMouse {
        WebMouse {
            inner: Mouse::new(element.map(DomElement)),
        }
    }

    pub fn attach(&mut self, element: EventTarget) {
        self.inner.attach(DomElement(element));
    }

    pub fn detach(&mut self) {
        self.inner.detach();
    }

    pub fn update(&mut self) {
        self.inner.update();
    }

    #[wasm_bindgen(js_name = disableContextMenu)]
    pub fn disable_context_menu(&mut self) {
        self.inner.disable_context_menu();
    }

    #[wasm_bindgen(js_name = enableContextMenu)]
    pub fn enable_context_menu(&mut self) {
        self.inner.enable_context_menu();
    }

    #[wasm_bindgen(js_name = isPressed)]
    pub fn is_pressed(&self, button: usize) -> bool {
        self.inner.is_pressed(button)
    }

    #[wasm_bindgen(js_name = wasPressed)]
    pub fn was_pressed(&self, button: usize) -> bool {
        self.inner.was_pressed(button)
    }

    #[wasm_bindgen(js_name = wasReleased)]
    pub fn was_released(&self, button: usize) -> bool {
        self.inner.was_released(button)
    }

    #[wasm_bindgen(getter)]
    pub fn position(&self) -> Vector2 {
        let position = self.inner.position();
        Vector2 {
            x: position.x,
            y: position.y,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn wheel(&self) -> f64 {
        self.inner.wheel()
    }
}
