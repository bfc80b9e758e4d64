use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::config::KeyboardOptions;
use crate::element::{bind_handler, events, Binding, Element, InputEvent};
use crate::keycode::{to_key_identifier, Key, KeyIdentifier};

/// Set of keys currently held. A key that is absent is not pressed.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    keys: HashSet<KeyIdentifier>,
}

impl KeySet {
    pub fn insert(&mut self, key: KeyIdentifier) {
        self.keys.insert(key);
    }

    pub fn remove(&mut self, key: &KeyIdentifier) {
        self.keys.remove(key);
    }

    pub fn contains(&self, key: &KeyIdentifier) -> bool {
        self.keys.contains(key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyIdentifier> {
        self.keys.iter()
    }
}

struct KeyboardState {
    current: KeySet,
    previous: KeySet,
    options: KeyboardOptions,
}

impl KeyboardState {
    fn identifier<Ev: InputEvent>(event: &Ev) -> KeyIdentifier {
        let code = match event.key_code() {
            0 => event.char_code(),
            code => code,
        };
        to_key_identifier(code)
    }

    fn suppress<Ev: InputEvent>(&self, event: &Ev) {
        if self.options.prevent_default {
            event.prevent_default();
        }
        if self.options.stop_propagation {
            event.stop_propagation();
        }
    }

    fn handle_key_down<Ev: InputEvent>(&mut self, event: &Ev) {
        self.current.insert(Self::identifier(event));
        self.suppress(event);
    }

    fn handle_key_up<Ev: InputEvent>(&mut self, event: &Ev) {
        self.current.remove(&Self::identifier(event));
        self.suppress(event);
    }

    fn handle_key_press<Ev: InputEvent>(&mut self, event: &Ev) {
        let id = Self::identifier(event);
        log::trace!("keypress {id}");
        self.suppress(event);
    }
}

/// A keyboard bound to an element. Call [`Keyboard::update`] once per frame;
/// `was_pressed` / `was_released` report edges since the previous update.
///
/// Elements that cannot take focus by default (e.g. a `<div>`) need a
/// `tabindex` before they receive key events.
pub struct Keyboard<E: Element> {
    state: Rc<RefCell<KeyboardState>>,
    binding: Binding<E>,
}

impl<E: Element> Keyboard<E> {
    pub fn new(element: Option<E>) -> Self {
        Self::with_options(element, KeyboardOptions::default())
    }

    pub fn with_options(element: Option<E>, options: KeyboardOptions) -> Self {
        let state = Rc::new(RefCell::new(KeyboardState {
            current: KeySet::default(),
            previous: KeySet::default(),
            options,
        }));
        let listeners = vec![
            (
                events::KEY_DOWN,
                E::create_listener(bind_handler(&state, KeyboardState::handle_key_down::<E::Event>)),
            ),
            (
                events::KEY_PRESS,
                E::create_listener(bind_handler(&state, KeyboardState::handle_key_press::<E::Event>)),
            ),
            (
                events::KEY_UP,
                E::create_listener(bind_handler(&state, KeyboardState::handle_key_up::<E::Event>)),
            ),
        ];

        let mut keyboard = Self {
            state,
            binding: Binding::new(listeners),
        };
        if let Some(element) = element {
            keyboard.attach(element);
        }
        keyboard
    }

    /// Attach the key handlers to `element`, detaching from any previous one.
    pub fn attach(&mut self, element: E) {
        self.binding.attach(element);
    }

    /// Detach from the current element. Does nothing when not attached.
    pub fn detach(&mut self) {
        self.binding.detach();
    }

    pub fn element(&self) -> Option<&E> {
        self.binding.element()
    }

    pub fn is_attached(&self) -> bool {
        self.binding.element().is_some()
    }

    pub fn options(&self) -> KeyboardOptions {
        self.state.borrow().options
    }

    pub fn set_options(&mut self, options: KeyboardOptions) {
        self.state.borrow_mut().options = options;
    }

    /// Snapshot the current key set for edge detection. Call once per frame.
    pub fn update(&mut self) {
        let mut state = self.state.borrow_mut();
        let KeyboardState {
            current, previous, ..
        } = &mut *state;
        previous.clear();
        for key in current.iter() {
            previous.insert(key.clone());
        }
    }

    /// True while the key is held down.
    pub fn is_pressed<'k>(&self, key: impl Into<Key<'k>>) -> bool {
        let id = to_key_identifier(key);
        self.state.borrow().current.contains(&id)
    }

    /// True if the key went down since the last update.
    pub fn was_pressed<'k>(&self, key: impl Into<Key<'k>>) -> bool {
        let id = to_key_identifier(key);
        let state = self.state.borrow();
        state.current.contains(&id) && !state.previous.contains(&id)
    }

    /// True if the key went up since the last update.
    pub fn was_released<'k>(&self, key: impl Into<Key<'k>>) -> bool {
        let id = to_key_identifier(key);
        let state = self.state.borrow();
        !state.current.contains(&id) && state.previous.contains(&id)
    }

    /// Keys currently held.
    pub fn pressed_keys(&self) -> Vec<KeyIdentifier> {
        self.state.borrow().current.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessElement, HeadlessEvent};

    fn attached() -> (HeadlessElement, Keyboard<HeadlessElement>) {
        let element = HeadlessElement::new();
        let keyboard = Keyboard::new(Some(element.clone()));
        (element, keyboard)
    }

    fn key_down(element: &HeadlessElement, code: u32) -> HeadlessEvent {
        let event = HeadlessEvent::key(code);
        element.dispatch(events::KEY_DOWN, &event);
        event
    }

    fn key_up(element: &HeadlessElement, code: u32) -> HeadlessEvent {
        let event = HeadlessEvent::key(code);
        element.dispatch(events::KEY_UP, &event);
        event
    }

    // ── Attach / detach ──

    #[test]
    fn test_new_with_element_attaches() {
        let (element, keyboard) = attached();
        assert!(keyboard.is_attached());
        assert_eq!(element.listener_count(), 3);
        assert_eq!(element.listener_count_for(events::KEY_PRESS), 1);
    }

    #[test]
    fn test_detach_without_attach_is_noop() {
        let mut keyboard: Keyboard<HeadlessElement> = Keyboard::new(None);
        keyboard.detach();
        assert!(!keyboard.is_attached());
    }

    #[test]
    fn test_reattach_moves_listeners() {
        let (first, mut keyboard) = attached();
        let second = HeadlessElement::new();
        keyboard.attach(second.clone());

        assert_eq!(first.listener_count(), 0);
        assert_eq!(second.listener_count(), 3);
        assert_eq!(keyboard.element(), Some(&second));

        key_down(&first, 65);
        assert!(!keyboard.is_pressed(65));
        key_down(&second, 65);
        assert!(keyboard.is_pressed(65));
    }

    #[test]
    fn test_drop_detaches() {
        let (element, keyboard) = attached();
        drop(keyboard);
        assert_eq!(element.listener_count(), 0);
    }

    // ── Key state ──

    #[test]
    fn test_enter_scenario() {
        let (element, mut keyboard) = attached();

        key_down(&element, 13);
        assert!(keyboard.is_pressed(13));
        assert!(keyboard.was_pressed(13));

        keyboard.update();
        assert!(!keyboard.was_pressed(13));
        assert!(keyboard.is_pressed(13));

        key_up(&element, 13);
        assert!(!keyboard.is_pressed(13));
        assert!(keyboard.was_released(13));

        keyboard.update();
        assert!(!keyboard.was_released(13));
    }

    #[test]
    fn test_numeric_and_string_queries_agree() {
        let (element, keyboard) = attached();
        key_down(&element, 65);
        assert!(keyboard.is_pressed(65));
        assert!(keyboard.is_pressed("a"));
        assert!(keyboard.is_pressed('A'));
        assert!(keyboard.was_pressed("A"));
        assert!(!keyboard.is_pressed("b"));
    }

    #[test]
    fn test_named_key_query() {
        let (element, keyboard) = attached();
        key_down(&element, 27);
        assert!(keyboard.is_pressed("escape"));
        assert!(keyboard.is_pressed("ESCAPE"));
    }

    #[test]
    fn test_char_code_fallback() {
        let (element, keyboard) = attached();
        element.dispatch(events::KEY_DOWN, &HeadlessEvent::key_char(66));
        assert!(keyboard.is_pressed("b"));
    }

    #[test]
    fn test_was_pressed_once_per_edge() {
        let (element, mut keyboard) = attached();
        key_down(&element, 32);
        assert!(keyboard.was_pressed(32));
        keyboard.update();
        assert!(!keyboard.was_pressed(32));
        keyboard.update();
        assert!(!keyboard.was_pressed(32));

        key_up(&element, 32);
        keyboard.update();
        key_down(&element, 32);
        assert!(keyboard.was_pressed(32));
    }

    #[test]
    fn test_update_drops_released_keys_from_snapshot() {
        let (element, mut keyboard) = attached();
        key_down(&element, 65);
        keyboard.update();
        key_up(&element, 65);
        keyboard.update();

        // Released between updates: no stale entry left in the snapshot.
        assert!(!keyboard.was_released(65));
        key_down(&element, 65);
        assert!(keyboard.was_pressed(65));
    }

    #[test]
    fn test_press_and_release_within_one_frame() {
        let (element, mut keyboard) = attached();
        key_down(&element, 70);
        key_up(&element, 70);
        assert!(!keyboard.is_pressed(70));
        assert!(!keyboard.was_pressed(70));
        assert!(!keyboard.was_released(70));
        keyboard.update();
        assert!(!keyboard.was_released(70));
    }

    #[test]
    fn test_keypress_does_not_change_state() {
        let (element, keyboard) = attached();
        element.dispatch(events::KEY_PRESS, &HeadlessEvent::key(65));
        assert!(!keyboard.is_pressed(65));
        assert!(keyboard.pressed_keys().is_empty());
    }

    #[test]
    fn test_pressed_keys_lists_identifiers() {
        let (element, keyboard) = attached();
        key_down(&element, 13);
        let keys = keyboard.pressed_keys();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].as_str(), "U+000D");
    }

    // ── Options ──

    #[test]
    fn test_default_options_do_not_suppress() {
        let (element, _keyboard) = attached();
        let event = key_down(&element, 65);
        assert!(!event.default_prevented());
        assert!(!event.propagation_stopped());
    }

    #[test]
    fn test_options_suppress_all_key_events() {
        let element = HeadlessElement::new();
        let options = KeyboardOptions {
            prevent_default: true,
            stop_propagation: true,
        };
        let _keyboard = Keyboard::with_options(Some(element.clone()), options);

        for kind in [events::KEY_DOWN, events::KEY_PRESS, events::KEY_UP] {
            let event = HeadlessEvent::key(84);
            element.dispatch(kind, &event);
            assert!(event.default_prevented(), "{kind} not prevented");
            assert!(event.propagation_stopped(), "{kind} not stopped");
        }
    }

    #[test]
    fn test_set_options_applies_to_later_events() {
        let (element, mut keyboard) = attached();
        keyboard.set_options(KeyboardOptions {
            prevent_default: true,
            stop_propagation: false,
        });
        let event = key_down(&element, 65);
        assert!(event.default_prevented());
        assert!(!event.propagation_stopped());
        assert!(keyboard.options().prevent_default);
    }
}
