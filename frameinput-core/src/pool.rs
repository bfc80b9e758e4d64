use std::cell::RefCell;
use std::rc::Rc;

use crate::touch_point::TouchPoint;

/// Opaque slot index into a [`TouchPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointId(usize);

#[derive(Default)]
struct PointArena {
    slots: Vec<TouchPoint>,
    free: Vec<PointId>,
}

/// Recycling arena for touch points. Clones share the same arena, so
/// several [`Touch`](crate::touch::Touch) devices can draw from one pool.
///
/// Records are never freed, only recycled: a released record keeps its old
/// fields until the next owner calls `set` on it.
#[derive(Clone, Default)]
pub struct TouchPool {
    arena: Rc<RefCell<PointArena>>,
}

impl TouchPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the most recently released record, or allocate a fresh one.
    pub fn acquire(&self) -> PointId {
        let mut arena = self.arena.borrow_mut();
        if let Some(id) = arena.free.pop() {
            return id;
        }
        let id = PointId(arena.slots.len());
        arena.slots.push(TouchPoint::new());
        log::trace!("touch pool grew to {} points", arena.slots.len());
        id
    }

    /// Return a record to the pool.
    pub fn release(&self, id: PointId) {
        let mut arena = self.arena.borrow_mut();
        if id.0 >= arena.slots.len() || arena.free.contains(&id) {
            log::warn!("ignoring release of {id:?}: not an acquired point");
            return;
        }
        arena.free.push(id);
    }

    /// Copy of the record in `id`.
    pub fn get(&self, id: PointId) -> Option<TouchPoint> {
        self.arena.borrow().slots.get(id.0).copied()
    }

    /// Run `f` on the record in `id`.
    pub fn with_point_mut<R>(&self, id: PointId, f: impl FnOnce(&mut TouchPoint) -> R) -> Option<R> {
        self.arena.borrow_mut().slots.get_mut(id.0).map(f)
    }

    /// Number of records waiting for reuse.
    pub fn free_len(&self) -> usize {
        self.arena.borrow().free.len()
    }

    /// Number of records ever allocated.
    pub fn allocated(&self) -> usize {
        self.arena.borrow().slots.len()
    }

    /// Whether two handles share one arena.
    pub fn same_pool(&self, other: &TouchPool) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena)
    }
}

impl std::fmt::Debug for TouchPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TouchPool")
            .field("allocated", &self.allocated())
            .field("free", &self.free_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::touch_point::TouchPhase;

    #[test]
    fn test_acquire_allocates_when_empty() {
        let pool = TouchPool::new();
        let a = pool.acquire();
        let b = pool.acquire();
        assert_ne!(a, b);
        assert_eq!(pool.allocated(), 2);
        assert_eq!(pool.free_len(), 0);
    }

    #[test]
    fn test_release_then_acquire_recycles() {
        let pool = TouchPool::new();
        let a = pool.acquire();
        let _b = pool.acquire();
        pool.release(a);
        assert_eq!(pool.free_len(), 1);
        assert_eq!(pool.acquire(), a);
        assert_eq!(pool.allocated(), 2);
    }

    #[test]
    fn test_recycled_point_keeps_stale_fields() {
        let pool = TouchPool::new();
        let id = pool.acquire();
        pool.with_point_mut(id, |p| {
            p.finger_id = 9;
            p.phase = TouchPhase::Ended;
        });
        pool.release(id);
        let again = pool.acquire();
        let point = pool.get(again).unwrap();
        assert_eq!(point.finger_id, 9);
        assert_eq!(point.phase, TouchPhase::Ended);
    }

    #[test]
    fn test_double_release_ignored() {
        let pool = TouchPool::new();
        let id = pool.acquire();
        pool.release(id);
        pool.release(id);
        assert_eq!(pool.free_len(), 1);
    }

    #[test]
    fn test_clones_share_arena() {
        let pool = TouchPool::new();
        let other = pool.clone();
        let id = pool.acquire();
        other.release(id);
        assert_eq!(pool.free_len(), 1);
        assert!(pool.same_pool(&other));
        assert!(!pool.same_pool(&TouchPool::new()));
    }
}
