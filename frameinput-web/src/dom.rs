use frameinput_core::{Element, Handler, InputEvent, TouchRecord};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, KeyboardEvent, MouseEvent, TouchEvent, UiEvent};

/// A DOM `EventTarget` (window, document, canvas, ...) as an input element.
#[derive(Clone)]
pub struct DomElement(pub EventTarget);

/// A native DOM event. Fields are read through whichever event interface
/// the event actually implements.
pub struct DomEvent(pub web_sys::Event);

impl Element for DomElement {
    type Event = DomEvent;
    type Listener = Closure<dyn FnMut(web_sys::Event)>;

    fn create_listener(mut handler: Handler<DomEvent>) -> Self::Listener {
        Closure::new(move |event: web_sys::Event| handler(&DomEvent(event)))
    }

    fn add_event_listener(&self, kind: &str, listener: &Self::Listener, use_capture: bool) {
        let callback = listener.as_ref().unchecked_ref();
        if let Err(err) = self
            .0
            .add_event_listener_with_callback_and_bool(kind, callback, use_capture)
        {
            log::warn!("addEventListener('{kind}') failed: {err:?}");
        }
    }

    fn remove_event_listener(&self, kind: &str, listener: &Self::Listener, use_capture: bool) {
        let callback = listener.as_ref().unchecked_ref();
        if let Err(err) = self
            .0
            .remove_event_listener_with_callback_and_bool(kind, callback, use_capture)
        {
            log::warn!("removeEventListener('{kind}') failed: {err:?}");
        }
    }
}

/// Read a non-standard numeric property such as `wheelDelta`.
fn number_property(target: &JsValue, name: &str) -> f64 {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

impl InputEvent for DomEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }

    fn stop_propagation(&self) {
        self.0.stop_propagation();
    }

    fn key_code(&self) -> u32 {
        self.0.dyn_ref::<KeyboardEvent>().map_or(0, KeyboardEvent::key_code)
    }

    fn char_code(&self) -> u32 {
        self.0.dyn_ref::<KeyboardEvent>().map_or(0, KeyboardEvent::char_code)
    }

    fn button(&self) -> i16 {
        self.0.dyn_ref::<MouseEvent>().map_or(0, MouseEvent::button)
    }

    fn client_x(&self) -> f64 {
        self.0
            .dyn_ref::<MouseEvent>()
            .map_or(0.0, |event| f64::from(event.client_x()))
    }

    fn client_y(&self) -> f64 {
        self.0
            .dyn_ref::<MouseEvent>()
            .map_or(0.0, |event| f64::from(event.client_y()))
    }

    fn detail(&self) -> f64 {
        self.0
            .dyn_ref::<UiEvent>()
            .map_or(0.0, |event| f64::from(event.detail()))
    }

    fn wheel_delta(&self) -> f64 {
        number_property(self.0.as_ref(), "wheelDelta")
    }

    fn changed_touches(&self) -> Vec<TouchRecord> {
        let Some(event) = self.0.dyn_ref::<TouchEvent>() else {
            return Vec::new();
        };
        let list = event.changed_touches();
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|touch| TouchRecord {
                identifier: touch.identifier(),
                client_x: f64::from(touch.client_x()),
                client_y: f64::from(touch.client_y()),
                force: f64::from(touch.force()),
                radius_x: f64::from(touch.radius_x()),
                radius_y: f64::from(touch.radius_y()),
                rotation_angle: f64::from(touch.rotation_angle()),
            })
            .collect()
    }
}
