//! In-process element for hosts without a DOM.
//!
//! A native window loop (or a test) forwards its events through
//! [`HeadlessElement::dispatch`] and the devices see them exactly as they
//! would see browser events.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::element::{Element, Handler, InputEvent, TouchRecord};

/// A listener registered on a [`HeadlessElement`]. Clones share identity.
#[derive(Clone)]
pub struct HeadlessListener(Rc<RefCell<Handler<HeadlessEvent>>>);

impl HeadlessListener {
    fn same_as(&self, other: &HeadlessListener) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

struct Registration {
    kind: String,
    listener: HeadlessListener,
    use_capture: bool,
}

/// Shared handle to a listener table. Clones refer to the same element.
#[derive(Clone, Default)]
pub struct HeadlessElement {
    registrations: Rc<RefCell<Vec<Registration>>>,
}

impl HeadlessElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke every listener registered for `kind`, in registration order.
    /// Returns the number of listeners that ran.
    pub fn dispatch(&self, kind: &str, event: &HeadlessEvent) -> usize {
        // Snapshot first: handlers may add or remove listeners.
        let targets: Vec<HeadlessListener> = self
            .registrations
            .borrow()
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.listener.clone())
            .collect();

        let mut invoked = 0;
        for listener in targets {
            match listener.0.try_borrow_mut() {
                Ok(mut handler) => {
                    (*handler)(event);
                    invoked += 1;
                }
                Err(_) => log::trace!("skipping re-entrant dispatch of '{kind}'"),
            }
        }
        invoked
    }

    pub fn listener_count(&self) -> usize {
        self.registrations.borrow().len()
    }

    pub fn listener_count_for(&self, kind: &str) -> usize {
        self.registrations
            .borrow()
            .iter()
            .filter(|r| r.kind == kind)
            .count()
    }
}

impl PartialEq for HeadlessElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.registrations, &other.registrations)
    }
}

impl std::fmt::Debug for HeadlessElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessElement")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl Element for HeadlessElement {
    type Event = HeadlessEvent;
    type Listener = HeadlessListener;

    fn create_listener(handler: Handler<HeadlessEvent>) -> HeadlessListener {
        HeadlessListener(Rc::new(RefCell::new(handler)))
    }

    fn add_event_listener(&self, kind: &str, listener: &HeadlessListener, use_capture: bool) {
        let mut registrations = self.registrations.borrow_mut();
        let duplicate = registrations
            .iter()
            .any(|r| r.kind == kind && r.use_capture == use_capture && r.listener.same_as(listener));
        if duplicate {
            return;
        }
        registrations.push(Registration {
            kind: kind.to_string(),
            listener: listener.clone(),
            use_capture,
        });
    }

    fn remove_event_listener(&self, kind: &str, listener: &HeadlessListener, use_capture: bool) {
        self.registrations
            .borrow_mut()
            .retain(|r| !(r.kind == kind && r.use_capture == use_capture && r.listener.same_as(listener)));
    }
}

/// A synthetic event carrying every field the devices read.
#[derive(Debug, Clone, Default)]
pub struct HeadlessEvent {
    pub key_code: u32,
    pub char_code: u32,
    pub button: i16,
    pub client_x: f64,
    pub client_y: f64,
    pub detail: f64,
    pub wheel_delta: f64,
    pub changed_touches: Vec<TouchRecord>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl HeadlessEvent {
    pub fn key(key_code: u32) -> Self {
        Self {
            key_code,
            ..Self::default()
        }
    }

    /// A key event that only reports a `charCode` (legacy keypress shape).
    pub fn key_char(char_code: u32) -> Self {
        Self {
            char_code,
            ..Self::default()
        }
    }

    pub fn mouse_button(button: i16) -> Self {
        Self {
            button,
            ..Self::default()
        }
    }

    pub fn mouse_move(x: f64, y: f64) -> Self {
        Self {
            client_x: x,
            client_y: y,
            ..Self::default()
        }
    }

    /// Gecko `DOMMouseScroll` shape: lines scrolled in `detail`.
    pub fn dom_mouse_scroll(detail: f64) -> Self {
        Self {
            detail,
            ..Self::default()
        }
    }

    /// WebKit `mousewheel` shape: `wheelDelta` in 120ths of a notch.
    pub fn mouse_wheel(wheel_delta: f64) -> Self {
        Self {
            wheel_delta,
            ..Self::default()
        }
    }

    pub fn touches(changed_touches: Vec<TouchRecord>) -> Self {
        Self {
            changed_touches,
            ..Self::default()
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

impl InputEvent for HeadlessEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    fn key_code(&self) -> u32 {
        self.key_code
    }

    fn char_code(&self) -> u32 {
        self.char_code
    }

    fn button(&self) -> i16 {
        self.button
    }

    fn client_x(&self) -> f64 {
        self.client_x
    }

    fn client_y(&self) -> f64 {
        self.client_y
    }

    fn detail(&self) -> f64 {
        self.detail
    }

    fn wheel_delta(&self) -> f64 {
        self.wheel_delta
    }

    fn changed_touches(&self) -> Vec<TouchRecord> {
        self.changed_touches.clone()
    }
}
