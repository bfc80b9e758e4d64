use frameinput_core::{Key, Keyboard, KeyboardOptions};
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

use crate::dom::DomElement;

/// Read `preventDefault` / `stopPropagation` from a plain JS options object.
fn read_options(options: &JsValue) -> KeyboardOptions {
    if !options.is_object() {
        return KeyboardOptions::default();
    }
    let flag = |name: &str| {
        js_sys::Reflect::get(options, &JsValue::from_str(name))
            .map(|value| value.is_truthy())
            .unwrap_or(false)
    };
    KeyboardOptions {
        prevent_default: flag("preventDefault"),
        stop_propagation: flag("stopPropagation"),
    }
}

/// Call `f` with a key argument given from JS as a number or a string.
fn with_key<R>(key: &JsValue, f: impl FnOnce(Key<'_>) -> R) -> R {
    if let Some(code) = key.as_f64() {
        f(Key::Code(code as u32))
    } else if let Some(name) = key.as_string() {
        f(Key::Name(&name))
    } else {
        f(Key::Code(0))
    }
}

/// Keyboard device exported to JavaScript as `Keyboard`.
#[wasm_bindgen(js_name = Keyboard)]
pub struct WebKeyboard {
    inner: Keyboard<DomElement>,
}

#[wasm_bindgen(js_class = Keyboard)]
impl WebKeyboard {
    /// `new Keyboard(element?, { preventDefault, stopPropagation }?)`
    #[wasm_bindgen(constructor)]
    pub fn new(element: Option<EventTarget>, options: JsValue) -> WebKeyboard {
        WebKeyboard {
            inner: Keyboard::with_options(element.map(DomElement), read_options(&options)),
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

    #[wasm_bindgen(js_name = isPressed)]
    pub fn is_pressed(&self, key: JsValue) -> bool {
        with_key(&key, |key| self.inner.is_pressed(key))
    }

    #[wasm_bindgen(js_name = wasPressed)]
    pub fn was_pressed(&self, key: JsValue) -> bool {
        with_key(&key, |key| self.inner.was_pressed(key))
    }

    #[wasm_bindgen(js_name = wasReleased)]
    pub fn was_released(&self, key: JsValue) -> bool {
        with_key(&key, |key| self.inner.was_released(key))
    }

    #[wasm_bindgen(getter = preventDefault)]
    pub fn prevent_default(&self) -> bool {
        self.inner.options().prevent_default
    }

    #[wasm_bindgen(setter = preventDefault)]
    pub fn set_prevent_default(&mut self, value: bool) {
        let options = KeyboardOptions {
            prevent_default: value,
            ..self.inner.options()
        };
        self.inner.set_options(options);
    }

    #[wasm_bindgen(getter = stopPropagation)]
    pub fn stop_propagation(&self) -> bool {
        self.inner.options().stop_propagation
    }

    #[wasm_bindgen(setter = stopPropagation)]
    pub fn set_stop_propagation(&mut self, value: bool) {
        let options = KeyboardOptions {
            stop_propagation: value,
            ..self.inner.options()
        };
        self.inner.set_options(options);
    }
}
