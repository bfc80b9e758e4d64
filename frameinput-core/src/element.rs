use std::cell::RefCell;
use std::rc::Rc;

/// DOM event type names the devices listen for.
pub mod events {
    pub const KEY_DOWN: &str = "keydown";
    pub const KEY_UP: &str = "keyup";
    pub const KEY_PRESS: &str = "keypress";

    pub const MOUSE_UP: &str = "mouseup";
    pub const MOUSE_DOWN: &str = "mousedown";
    pub const MOUSE_MOVE: &str = "mousemove";
    /// WebKit / Blink wheel event.
    pub const MOUSE_WHEEL: &str = "mousewheel";
    /// Gecko wheel event.
    pub const DOM_MOUSE_SCROLL: &str = "DOMMouseScroll";
    pub const CONTEXT_MENU: &str = "contextmenu";

    pub const TOUCH_START: &str = "touchstart";
    pub const TOUCH_END: &str = "touchend";
    pub const TOUCH_MOVE: &str = "touchmove";
    pub const TOUCH_CANCEL: &str = "touchcancel";
}

/// One entry of an event's `changedTouches` list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchRecord {
    pub identifier: i32,
    pub client_x: f64,
    pub client_y: f64,
    pub force: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub rotation_angle: f64,
}

/// The fields of a native input event that the devices read.
///
/// Fields a concrete event type does not carry fall back to zero or an empty
/// list, so an unexpected event shape degrades to "nothing happened".
pub trait InputEvent {
    fn prevent_default(&self);
    fn stop_propagation(&self);

    fn key_code(&self) -> u32 {
        0
    }

    fn char_code(&self) -> u32 {
        0
    }

    fn button(&self) -> i16 {
        0
    }

    fn client_x(&self) -> f64 {
        0.0
    }

    fn client_y(&self) -> f64 {
        0.0
    }

    /// Gecko scroll amount in lines (UIEvent `detail`).
    fn detail(&self) -> f64 {
        0.0
    }

    /// WebKit scroll amount, 120 per wheel notch.
    fn wheel_delta(&self) -> f64 {
        0.0
    }

    fn changed_touches(&self) -> Vec<TouchRecord> {
        Vec::new()
    }
}

pub type Handler<Ev> = Box<dyn FnMut(&Ev)>;

/// Something input listeners can be registered on (a DOM `EventTarget`, or
/// a host window forwarding its own events).
pub trait Element {
    type Event: InputEvent + 'static;
    /// A registered handler. Removal matches on the identity of this value,
    /// so devices keep the exact listener they registered.
    type Listener;

    fn create_listener(handler: Handler<Self::Event>) -> Self::Listener;
    fn add_event_listener(&self, kind: &str, listener: &Self::Listener, use_capture: bool);
    fn remove_event_listener(&self, kind: &str, listener: &Self::Listener, use_capture: bool);
}

/// Wrap a state method as a listener body operating on shared device state.
pub(crate) fn bind_handler<S, Ev>(state: &Rc<RefCell<S>>, method: fn(&mut S, &Ev)) -> Handler<Ev>
where
    S: 'static,
    Ev: 'static,
{
    let state = Rc::clone(state);
    Box::new(move |event| method(&mut state.borrow_mut(), event))
}

/// The element a device is attached to, together with the listeners it
/// registers there.
pub(crate) struct Binding<E: Element> {
    listeners: Vec<(&'static str, E::Listener)>,
    element: Option<E>,
}

impl<E: Element> Binding<E> {
    pub fn new(listeners: Vec<(&'static str, E::Listener)>) -> Self {
        Self {
            listeners,
            element: None,
        }
    }

    /// Register every listener on `element`, detaching from the previous
    /// element first.
    pub fn attach(&mut self, element: E) {
        self.detach();
        for (kind, listener) in &self.listeners {
            element.add_event_listener(kind, listener, false);
        }
        log::debug!("attached {} listeners", self.listeners.len());
        self.element = Some(element);
    }

    /// Unregister every listener. Returns the element that was attached, if any.
    pub fn detach(&mut self) -> Option<E> {
        let element = self.element.take()?;
        for (kind, listener) in &self.listeners {
            element.remove_event_listener(kind, listener, false);
        }
        log::debug!("detached {} listeners", self.listeners.len());
        Some(element)
    }

    pub fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }
}

impl<E: Element> Drop for Binding<E> {
    fn drop(&mut self) {
        self.detach();
    }
}
