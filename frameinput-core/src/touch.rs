use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::element::{bind_handler, events, Binding, Element, InputEvent};
use crate::pool::{PointId, TouchPool};
use crate::touch_point::{TouchPhase, TouchPoint};

struct TouchState {
    pool: TouchPool,
    by_identifier: HashMap<i32, PointId>,
    /// Same points as `by_identifier`, in arrival order.
    active: Vec<PointId>,
}

impl TouchState {
    /// Point for `identifier`, acquiring one from the pool on first sight.
    fn point_for(&mut self, identifier: i32) -> PointId {
        if let Some(&id) = self.by_identifier.get(&identifier) {
            return id;
        }
        let id = self.pool.acquire();
        self.by_identifier.insert(identifier, id);
        self.active.push(id);
        id
    }

    fn apply<Ev: InputEvent>(&mut self, event: &Ev, phase: TouchPhase) {
        for touch in event.changed_touches() {
            let id = self.point_for(touch.identifier);
            self.pool.with_point_mut(id, |point| point.set(&touch, phase));
        }
    }

    fn handle_start<Ev: InputEvent>(&mut self, event: &Ev) {
        self.apply(event, TouchPhase::Began);
    }

    fn handle_end<Ev: InputEvent>(&mut self, event: &Ev) {
        self.apply(event, TouchPhase::Ended);
    }

    fn handle_move<Ev: InputEvent>(&mut self, event: &Ev) {
        // Without this Chrome on Android takes over the gesture for scrolling.
        event.prevent_default();
        self.apply(event, TouchPhase::Moved);
    }

    fn handle_cancel<Ev: InputEvent>(&mut self, event: &Ev) {
        self.apply(event, TouchPhase::Canceled);
    }

    fn update(&mut self) {
        let mut retired = Vec::new();
        for &id in &self.active {
            let phase = self.pool.with_point_mut(id, |point| {
                if point.phase == TouchPhase::Began {
                    point.phase = TouchPhase::Stationary;
                }
                point.phase
            });
            if phase.is_some_and(TouchPhase::is_finished) {
                retired.push(id);
            }
        }

        for id in retired {
            self.by_identifier.retain(|_, active| *active != id);
            self.active.retain(|active| *active != id);
            self.pool.release(id);
            log::trace!("retired touch point {id:?}");
        }
    }

    /// Hand every active point back to the pool.
    fn release_all(&mut self) {
        self.by_identifier.clear();
        for id in self.active.drain(..) {
            self.pool.release(id);
        }
    }
}

/// A touch surface bound to an element.
///
/// Points for contacts that ended or were canceled stay readable until the
/// next [`Touch::update`], which returns them to the pool. Because `update`
/// also turns `Began` into `Stationary`, a reader that only looks after
/// `update` never sees `Began`.
pub struct Touch<E: Element> {
    state: Rc<RefCell<TouchState>>,
    binding: Binding<E>,
}

impl<E: Element> Touch<E> {
    /// A touch device with its own private pool.
    pub fn new(element: Option<E>) -> Self {
        Self::with_pool(element, TouchPool::new())
    }

    /// A touch device drawing points from a shared pool.
    pub fn with_pool(element: Option<E>, pool: TouchPool) -> Self {
        let state = Rc::new(RefCell::new(TouchState {
            pool,
            by_identifier: HashMap::new(),
            active: Vec::new(),
        }));
        let listeners = vec![
            (
                events::TOUCH_START,
                E::create_listener(bind_handler(&state, TouchState::handle_start::<E::Event>)),
            ),
            (
                events::TOUCH_END,
                E::create_listener(bind_handler(&state, TouchState::handle_end::<E::Event>)),
            ),
            (
                events::TOUCH_MOVE,
                E::create_listener(bind_handler(&state, TouchState::handle_move::<E::Event>)),
            ),
            (
                events::TOUCH_CANCEL,
                E::create_listener(bind_handler(&state, TouchState::handle_cancel::<E::Event>)),
            ),
        ];

        let mut touch = Self {
            state,
            binding: Binding::new(listeners),
        };
        if let Some(element) = element {
            touch.attach(element);
        }
        touch
    }

    pub fn attach(&mut self, element: E) {
        self.binding.attach(element);
    }

    pub fn detach(&mut self) {
        self.binding.detach();
    }

    pub fn element(&self) -> Option<&E> {
        self.binding.element()
    }

    pub fn is_attached(&self) -> bool {
        self.binding.element().is_some()
    }

    pub fn pool(&self) -> TouchPool {
        self.state.borrow().pool.clone()
    }

    /// Demote new points to `Stationary` and retire finished ones. Call once per frame.
    pub fn update(&mut self) {
        self.state.borrow_mut().update();
    }

    pub fn touch_count(&self) -> usize {
        self.state.borrow().active.len()
    }

    /// Point at `index` in arrival order, or `None` past the end.
    pub fn get_touch(&self, index: usize) -> Option<TouchPoint> {
        let state = self.state.borrow();
        let id = *state.active.get(index)?;
        state.pool.get(id)
    }

    /// Pool slot backing the point at `index`.
    pub fn point_id(&self, index: usize) -> Option<PointId> {
        self.state.borrow().active.get(index).copied()
    }

    pub fn touch_by_identifier(&self, identifier: i32) -> Option<TouchPoint> {
        let state = self.state.borrow();
        let id = *state.by_identifier.get(&identifier)?;
        state.pool.get(id)
    }

    /// All active points in arrival order.
    pub fn touches(&self) -> Vec<TouchPoint> {
        let state = self.state.borrow();
        state.active.iter().filter_map(|&id| state.pool.get(id)).collect()
    }
}

impl<E: Element> Drop for Touch<E> {
    fn drop(&mut self) {
        self.detach();
        self.state.borrow_mut().release_all();
    }
}
