use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;

use crate::config::MouseOptions;
use crate::element::{bind_handler, events, Binding, Element, InputEvent};

/// Buttons tracked, indexed by DOM `MouseEvent.button`: 0 left, 1 middle, 2 right.
pub const BUTTON_COUNT: usize = 3;

struct MouseState {
    buttons: [bool; BUTTON_COUNT],
    previous: [bool; BUTTON_COUNT],
    position: DVec2,
    wheel: f64,
}

impl MouseState {
    fn set_button<Ev: InputEvent>(&mut self, event: &Ev, pressed: bool) {
        let button = event.button();
        match usize::try_from(button).ok().and_then(|i| self.buttons.get_mut(i)) {
            Some(slot) => *slot = pressed,
            None => log::trace!("ignoring mouse button {button}"),
        }
    }

    fn handle_down<Ev: InputEvent>(&mut self, event: &Ev) {
        self.set_button(event, true);
    }

    fn handle_up<Ev: InputEvent>(&mut self, event: &Ev) {
        self.set_button(event, false);
    }

    fn handle_move<Ev: InputEvent>(&mut self, event: &Ev) {
        self.position = DVec2::new(event.client_x(), event.client_y());
    }

    fn handle_wheel<Ev: InputEvent>(&mut self, event: &Ev) {
        self.wheel = normalize_wheel(event.detail(), event.wheel_delta());
    }
}

fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Fold the two legacy wheel shapes into one value, positive meaning "up".
///
/// Gecko reports lines scrolled in `detail` with the opposite sign; WebKit
/// reports `wheelDelta` in multiples of 120 per notch.
pub fn normalize_wheel(detail: f64, wheel_delta: f64) -> f64 {
    if is_truthy(detail) {
        -detail
    } else if is_truthy(wheel_delta) {
        wheel_delta / 120.0
    } else {
        0.0
    }
}

/// A mouse bound to an element. Position is absolute client coordinates;
/// the wheel value only covers the current frame.
pub struct Mouse<E: Element> {
    state: Rc<RefCell<MouseState>>,
    binding: Binding<E>,
    context_menu: E::Listener,
    context_menu_disabled: bool,
    options: MouseOptions,
}

impl<E: Element> Mouse<E> {
    pub fn new(element: Option<E>) -> Self {
        Self::with_options(element, MouseOptions::default())
    }

    pub fn with_options(element: Option<E>, options: MouseOptions) -> Self {
        let state = Rc::new(RefCell::new(MouseState {
            buttons: [false; BUTTON_COUNT],
            previous: [false; BUTTON_COUNT],
            position: DVec2::ZERO,
            wheel: 0.0,
        }));
        let wheel = || E::create_listener(bind_handler(&state, MouseState::handle_wheel::<E::Event>));
        let listeners = vec![
            (
                events::MOUSE_UP,
                E::create_listener(bind_handler(&state, MouseState::handle_up::<E::Event>)),
            ),
            (
                events::MOUSE_DOWN,
                E::create_listener(bind_handler(&state, MouseState::handle_down::<E::Event>)),
            ),
            (
                events::MOUSE_MOVE,
                E::create_listener(bind_handler(&state, MouseState::handle_move::<E::Event>)),
            ),
            (events::MOUSE_WHEEL, wheel()),
            (events::DOM_MOUSE_SCROLL, wheel()),
        ];
        let context_menu = E::create_listener(Box::new(|event: &E::Event| event.prevent_default()));

        let mut mouse = Self {
            state,
            binding: Binding::new(listeners),
            context_menu,
            context_menu_disabled: false,
            options,
        };
        if let Some(element) = element {
            mouse.attach(element);
        }
        mouse
    }

    /// Attach the mouse handlers to `element`, detaching from any previous one.
    pub fn attach(&mut self, element: E) {
        self.detach();
        self.binding.attach(element);
        if self.options.disable_context_menu {
            self.disable_context_menu();
        }
    }

    /// Detach from the current element, including the context-menu blocker.
    pub fn detach(&mut self) {
        self.enable_context_menu();
        self.binding.detach();
    }

    pub fn element(&self) -> Option<&E> {
        self.binding.element()
    }

    pub fn is_attached(&self) -> bool {
        self.binding.element().is_some()
    }

    /// Block the context menu usually opened by a right click.
    pub fn disable_context_menu(&mut self) {
        let Some(element) = self.binding.element() else {
            return;
        };
        if !self.context_menu_disabled {
            element.add_event_listener(events::CONTEXT_MENU, &self.context_menu, false);
            self.context_menu_disabled = true;
        }
    }

    /// Allow the context menu again. This is the default.
    pub fn enable_context_menu(&mut self) {
        let Some(element) = self.binding.element() else {
            return;
        };
        if self.context_menu_disabled {
            element.remove_event_listener(events::CONTEXT_MENU, &self.context_menu, false);
            self.context_menu_disabled = false;
        }
    }

    pub fn is_context_menu_disabled(&self) -> bool {
        self.context_menu_disabled
    }

    /// Snapshot button state and clear the wheel. Call once per frame.
    pub fn update(&mut self) {
        let mut state = self.state.borrow_mut();
        state.previous[0] = state.buttons[0];
        state.previous[1] = state.buttons[1];
        state.previous[2] = state.buttons[2];
        state.wheel = 0.0;
    }

    pub fn is_pressed(&self, button: usize) -> bool {
        self.state.borrow().buttons.get(button).copied().unwrap_or(false)
    }

    /// True if the button went down since the last update.
    pub fn was_pressed(&self, button: usize) -> bool {
        let state = self.state.borrow();
        match (state.buttons.get(button), state.previous.get(button)) {
            (Some(&now), Some(&before)) => now && !before,
            _ => false,
        }
    }

    /// True if the button went up since the last update.
    pub fn was_released(&self, button: usize) -> bool {
        let state = self.state.borrow();
        match (state.buttons.get(button), state.previous.get(button)) {
            (Some(&now), Some(&before)) => !now && before,
            _ => false,
        }
    }

    pub fn position(&self) -> DVec2 {
        self.state.borrow().position
    }

    /// Wheel movement since the last update, roughly one unit per notch.
    pub fn wheel(&self) -> f64 {
        self.state.borrow().wheel
    }
}

impl<E: Element> Drop for Mouse<E> {
    fn drop(&mut self) {
        self.detach();
    }
}
