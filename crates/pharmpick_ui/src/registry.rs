//! "Only one open" registry shared by every dropdown of a page.
//!
//! The registry is an explicit handle passed to each dropdown when it is built.
//! It records which instance currently owns the open state and how to close it.
//! Claiming the registry closes the previous holder synchronously, before the
//! new holder is recorded, so two instances are never open at the same time.
//!
//! While any instance holds the registry the host page should be scroll-locked.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use web_time::Instant;

/// Identifies one dropdown instance within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dropdown#{}", self.0)
    }
}

/// Close request handed to the registry by the holder.
pub type CloseFn = Rc<dyn Fn(Instant)>;

struct Holder {
    id: InstanceId,
    close: CloseFn,
}

#[derive(Default)]
struct Slot {
    active: Option<Holder>,
    next_id: u64,
}

/// Shared handle to the registry. Cloning shares the same slot.
#[derive(Clone, Default)]
pub struct DropdownRegistry {
    inner: Rc<RefCell<Slot>>,
}

impl DropdownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a fresh instance id.
    pub fn allocate_id(&self) -> InstanceId {
        let mut slot = self.inner.borrow_mut();
        slot.next_id += 1;
        InstanceId(slot.next_id)
    }

    /// Make `id` the active instance, closing the previous holder first.
    ///
    /// Re-claiming by the current holder only refreshes its close callback.
    pub fn claim(&self, id: InstanceId, close: CloseFn, now: Instant) {
        let previous = {
            let mut slot = self.inner.borrow_mut();
            match slot.active.take() {
                Some(holder) if holder.id != id => Some(holder),
                _ => None,
            }
        };

        // The slot is not borrowed here, the previous holder may inspect it.
        if let Some(holder) = previous {
            log::debug!("Registry: {} claims, closing {}", id, holder.id);
            (holder.close)(now);
        }

        self.inner.borrow_mut().active = Some(Holder { id, close });
    }

    /// Release the registry if `id` still holds it. Returns true if released.
    pub fn release(&self, id: InstanceId) -> bool {
        let mut slot = self.inner.borrow_mut();
        if slot.active.as_ref().is_some_and(|h| h.id == id) {
            slot.active = None;
            log::debug!("Registry: released by {}", id);
            true
        } else {
            false
        }
    }

    /// The instance currently owning the open state.
    pub fn active_id(&self) -> Option<InstanceId> {
        self.inner.borrow().active.as_ref().map(|h| h.id)
    }

    pub fn is_active(&self, id: InstanceId) -> bool {
        self.active_id() == Some(id)
    }

    /// Whether the host page should currently be scroll-locked.
    pub fn is_scroll_locked(&self) -> bool {
        self.inner.borrow().active.is_some()
    }
}

impl fmt::Debug for DropdownRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownRegistry")
            .field("active", &self.active_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter_close(counter: &Rc<Cell<u32>>) -> CloseFn {
        let counter = Rc::clone(counter);
        Rc::new(move |_now| counter.set(counter.get() + 1))
    }

    #[test]
    fn test_ids_are_unique() {
        let registry = DropdownRegistry::new();
        let a = registry.allocate_id();
        let b = registry.allocate_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_claim_closes_previous_holder() {
        let registry = DropdownRegistry::new();
        let a = registry.allocate_id();
        let b = registry.allocate_id();
        let a_closed = Rc::new(Cell::new(0));
        let b_closed = Rc::new(Cell::new(0));
        let now = Instant::now();

        registry.claim(a, counter_close(&a_closed), now);
        assert!(registry.is_active(a));
        assert!(registry.is_scroll_locked());

        registry.claim(b, counter_close(&b_closed), now);
        assert_eq!(a_closed.get(), 1);
        assert_eq!(b_closed.get(), 0);
        assert!(registry.is_active(b));
    }

    #[test]
    fn test_reclaim_by_holder_does_not_close_itself() {
        let registry = DropdownRegistry::new();
        let a = registry.allocate_id();
        let closed = Rc::new(Cell::new(0));
        let now = Instant::now();
        registry.claim(a, counter_close(&closed), now);
        registry.claim(a, counter_close(&closed), now);
        assert_eq!(closed.get(), 0);
        assert!(registry.is_active(a));
    }

    #[test]
    fn test_release_only_by_holder() {
        let registry = DropdownRegistry::new();
        let a = registry.allocate_id();
        let b = registry.allocate_id();
        let closed = Rc::new(Cell::new(0));
        registry.claim(b, counter_close(&closed), Instant::now());
        assert!(!registry.release(a));
        assert!(registry.is_active(b));
        assert!(registry.release(b));
        assert_eq!(registry.active_id(), None);
        assert!(!registry.is_scroll_locked());
    }

    #[test]
    fn test_close_callback_may_read_registry() {
        let registry = DropdownRegistry::new();
        let a = registry.allocate_id();
        let b = registry.allocate_id();
        let seen = Rc::new(Cell::new(None));
        let close_a: CloseFn = {
            let registry = registry.clone();
            let seen = Rc::clone(&seen);
            Rc::new(move |_now| seen.set(registry.active_id()))
        };
        let now = Instant::now();
        registry.claim(a, close_a, now);
        registry.claim(b, Rc::new(|_now| {}), now);
        // The slot was emptied before the previous holder was asked to close.
        assert_eq!(seen.get(), None);
    }
}
