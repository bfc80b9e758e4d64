use frameinput_core::{Touch, TouchPoint, TouchPool};
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

use crate::dom::DomElement;
use crate::mouse::Vector2;

thread_local! {
    // One pool for every Touch created by this module instance.
    static POOL: TouchPool = TouchPool::new();
}

/// Snapshot of a touch point, exported to JavaScript as `TouchPoint`.
#[wasm_bindgen(js_name = TouchPoint)]
pub struct WebTouchPoint {
    point: TouchPoint,
}

#[wasm_bindgen(js_class = TouchPoint)]
impl WebTouchPoint {
    #[wasm_bindgen(getter = altitudeAngle)]
    pub fn altitude_angle(&self) -> f64 {
        self.point.altitude_angle
    }

    #[wasm_bindgen(getter = azimuthAngle)]
    pub fn azimuth_angle(&self) -> f64 {
        self.point.azimuth_angle
    }

    #[wasm_bindgen(getter = deltaPosition)]
    pub fn delta_position(&self) -> Vector2 {
        Vector2 {
            x: self.point.delta_position.x,
            y: self.point.delta_position.y,
        }
    }

    #[wasm_bindgen(getter = fingerId)]
    pub fn finger_id(&self) -> i32 {
        self.point.finger_id
    }

    #[wasm_bindgen(getter = maximumPossiblePressure)]
    pub fn maximum_possible_pressure(&self) -> f64 {
        self.point.maximum_possible_pressure
    }

    /// One of `began`, `moved`, `stationary`, `ended`, `canceled`.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        self.point.phase.as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn position(&self) -> Vector2 {
        Vector2 {
            x: self.point.position.x,
            y: self.point.position.y,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn pressure(&self) -> f64 {
        self.point.pressure
    }

    #[wasm_bindgen(getter)]
    pub fn radius(&self) -> Vector2 {
        Vector2 {
            x: self.point.radius.x,
            y: self.point.radius.y,
        }
    }

    #[wasm_bindgen(getter = touchType)]
    pub fn touch_type(&self) -> String {
        self.point.touch_type.as_str().to_string()
    }
}

/// Touch device exported to JavaScript as `Touch`.
#[wasm_bindgen(js_name = Touch)]
pub struct WebTouch {
    inner: Touch<DomElement>,
}

#[wasm_bindgen(js_class = Touch)]
impl WebTouch {
    #[wasm_bindgen(constructor)]
    pub fn new(element: Option<EventTarget>) -> WebTouch {
        let pool = POOL.with(TouchPool::clone);
        WebTouch {
            inner: Touch::with_pool(element.map(DomElement), pool),
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

    #[wasm_bindgen(getter = touchCount)]
    pub fn touch_count(&self) -> usize {
        self.inner.touch_count()
    }

    /// The touch at `index`, or `undefined` past the end.
    #[wasm_bindgen(js_name = getTouch)]
    pub fn get_touch(&self, index: usize) -> Option<WebTouchPoint> {
        self.inner
            .get_touch(index)
            .map(|point| WebTouchPoint { point })
    }
}
