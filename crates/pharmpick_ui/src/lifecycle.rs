//! Open/close lifecycle of a dropdown.
//!
//! ```text
//! Closed --open--> Opening --settle delay--> Open --close--> Closing --animation--> Closed
//!                     ^                                         |
//!                     +------------------open-------------------+
//! ```
//!
//! `styles_applied` separates "logically open" from "visually transitioned
//! in": it turns on when Opening settles into Open and off the moment a close
//! starts, so enter and exit animations can be sequenced independently.
//!
//! The lifecycle state lives behind an `Rc<RefCell<..>>` so the registry can
//! close this instance synchronously when another instance opens. Everything
//! else in the dropdown subscribes through [`OpenCloseController::drain_transitions`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use web_time::Instant;

use crate::config::Timings;
use crate::registry::{CloseFn, DropdownRegistry, InstanceId};
use crate::scheduler::Scheduler;

/// Lifecycle state of one dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl OpenState {
    /// Logically open (accepting input).
    pub fn is_open(&self) -> bool {
        matches!(self, OpenState::Opening | OpenState::Open)
    }

    /// The floating layer is mounted (including the exit animation).
    pub fn is_mounted(&self) -> bool {
        !matches!(self, OpenState::Closed)
    }
}

/// A state change observed by subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: OpenState,
    pub to: OpenState,
    /// When the change happened; forced closes are observed later than this.
    pub at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LifecycleTimer {
    Settle,
    CloseAnimation,
}

#[derive(Debug)]
struct Core {
    id: InstanceId,
    state: OpenState,
    styles_applied: bool,
    timers: Scheduler<LifecycleTimer>,
    open_settle: Duration,
    close_animation: Duration,
    transitions: Vec<Transition>,
}

impl Core {
    fn set_state(&mut self, to: OpenState, at: Instant) {
        let from = self.state;
        if from != to {
            log::debug!("{}: {:?} -> {:?}", self.id, from, to);
            self.state = to;
            self.transitions.push(Transition { from, to, at });
        }
    }

    fn begin_close(&mut self, now: Instant) -> bool {
        if !self.state.is_open() {
            return false;
        }
        self.timers.cancel(LifecycleTimer::Settle);
        self.styles_applied = false;
        self.set_state(OpenState::Closing, now);
        self.timers
            .schedule(LifecycleTimer::CloseAnimation, now, self.close_animation);
        true
    }
}

/// Drives the lifecycle state machine and owns the registry handle.
pub struct OpenCloseController {
    id: InstanceId,
    core: Rc<RefCell<Core>>,
    registry: DropdownRegistry,
}

impl OpenCloseController {
    pub fn new(registry: DropdownRegistry, timings: &Timings) -> Self {
        let id = registry.allocate_id();
        let core = Core {
            id,
            state: OpenState::Closed,
            styles_applied: false,
            timers: Scheduler::new(),
            open_settle: timings.open_settle(),
            close_animation: timings.close_animation(),
            transitions: Vec::new(),
        };
        Self {
            id,
            core: Rc::new(RefCell::new(core)),
            registry,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn registry(&self) -> &DropdownRegistry {
        &self.registry
    }

    pub fn state(&self) -> OpenState {
        self.core.borrow().state
    }

    pub fn styles_applied(&self) -> bool {
        self.core.borrow().styles_applied
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    /// Open when closed, close when open. Ignored while the exit animation runs.
    pub fn toggle(&self, now: Instant) {
        match self.state() {
            OpenState::Closing => log::trace!("{}: toggle ignored while closing", self.id),
            OpenState::Closed => self.open_this(now),
            OpenState::Opening | OpenState::Open => {
                self.close_this(now);
            }
        }
    }

    /// Open this instance, cancelling a pending close and closing whichever
    /// other instance holds the registry.
    pub fn open_this(&self, now: Instant) {
        {
            let mut core = self.core.borrow_mut();
            core.timers.cancel(LifecycleTimer::CloseAnimation);
            if core.state.is_open() {
                return;
            }
        }

        // The previous holder is closed inside claim, before we mark ourselves open.
        self.registry.claim(self.id, self.close_fn(), now);

        let mut core = self.core.borrow_mut();
        core.styles_applied = false;
        core.set_state(OpenState::Opening, now);
        let settle = core.open_settle;
        core.timers.schedule(LifecycleTimer::Settle, now, settle);
    }

    /// Start the exit animation. Returns false if already closing or closed.
    pub fn close_this(&self, now: Instant) -> bool {
        self.core.borrow_mut().begin_close(now)
    }

    /// Advance the settle and close-animation timers.
    pub fn tick(&self, now: Instant) {
        let released = {
            let mut core = self.core.borrow_mut();
            let mut closed = false;
            for timer in core.timers.take_due(now) {
                match timer {
                    LifecycleTimer::Settle if core.state == OpenState::Opening => {
                        core.styles_applied = true;
                        core.set_state(OpenState::Open, now);
                    }
                    LifecycleTimer::CloseAnimation if core.state == OpenState::Closing => {
                        core.set_state(OpenState::Closed, now);
                        closed = true;
                    }
                    other => log::trace!("{}: stale lifecycle timer {:?}", core.id, other),
                }
            }
            closed
        };

        if released {
            self.registry.release(self.id);
        }
    }

    /// Transitions since the last call, oldest first.
    pub fn drain_transitions(&self) -> Vec<Transition> {
        std::mem::take(&mut self.core.borrow_mut().transitions)
    }

    /// Earliest pending lifecycle deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.core.borrow().timers.next_deadline()
    }

    /// Drop all timers, force Closed and give up the registry. Teardown is
    /// not a transition: nothing is left for subscribers to observe.
    pub fn unmount(&self) {
        {
            let mut core = self.core.borrow_mut();
            core.timers.clear();
            core.styles_applied = false;
            core.state = OpenState::Closed;
            core.transitions.clear();
        }
        self.registry.release(self.id);
    }

    fn close_fn(&self) -> CloseFn {
        let weak: Weak<RefCell<Core>> = Rc::downgrade(&self.core);
        Rc::new(move |now| {
            let Some(core) = weak.upgrade() else {
                return;
            };
            match core.try_borrow_mut() {
                Ok(mut core) => {
                    core.begin_close(now);
                }
                Err(_) => log::warn!("Registry close request hit a busy dropdown"),
            };
        })
    }
}

impl Drop for OpenCloseController {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

impl std::fmt::Debug for OpenCloseController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenCloseController")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("styles_applied", &self.styles_applied())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn controller(registry: &DropdownRegistry) -> OpenCloseController {
        OpenCloseController::new(registry.clone(), &Timings::default())
    }

    #[test]
    fn test_full_cycle() {
        let registry = DropdownRegistry::new();
        let c = controller(&registry);
        let t0 = Instant::now();

        c.toggle(t0);
        assert_eq!(c.state(), OpenState::Opening);
        assert!(!c.styles_applied());
        assert!(registry.is_active(c.id()));

        c.tick(t0 + ms(10));
        assert_eq!(c.state(), OpenState::Open);
        assert!(c.styles_applied());

        c.toggle(t0 + ms(100));
        assert_eq!(c.state(), OpenState::Closing);
        assert!(!c.styles_applied());
        assert!(registry.is_active(c.id()));

        c.tick(t0 + ms(299));
        assert_eq!(c.state(), OpenState::Closing);
        c.tick(t0 + ms(300));
        assert_eq!(c.state(), OpenState::Closed);
        assert_eq!(registry.active_id(), None);

        let transitions: Vec<_> = c.drain_transitions().iter().map(|t| t.to).collect();
        assert_eq!(
            transitions,
            vec![
                OpenState::Opening,
                OpenState::Open,
                OpenState::Closing,
                OpenState::Closed
            ]
        );
    }

    #[test]
    fn test_toggle_while_closing_is_noop() {
        let registry = DropdownRegistry::new();
        let c = controller(&registry);
        let t0 = Instant::now();
        c.open_this(t0);
        c.tick(t0 + ms(10));
        c.close_this(t0 + ms(20));
        c.drain_transitions();

        c.toggle(t0 + ms(30));
        assert_eq!(c.state(), OpenState::Closing);
        assert!(c.drain_transitions().is_empty());
    }

    #[test]
    fn test_reopen_cancels_pending_close() {
        let registry = DropdownRegistry::new();
        let c = controller(&registry);
        let t0 = Instant::now();
        c.open_this(t0);
        c.tick(t0 + ms(10));
        c.close_this(t0 + ms(20));
        c.open_this(t0 + ms(50));
        assert_eq!(c.state(), OpenState::Opening);

        // Past the original close deadline: nothing closes.
        c.tick(t0 + ms(400));
        assert_eq!(c.state(), OpenState::Open);
        assert!(c.styles_applied());
        assert!(registry.is_active(c.id()));
    }

    #[test]
    fn test_close_during_opening_cancels_settle() {
        let registry = DropdownRegistry::new();
        let c = controller(&registry);
        let t0 = Instant::now();
        c.open_this(t0);
        assert!(c.close_this(t0 + ms(1)));
        c.tick(t0 + ms(10));
        assert_eq!(c.state(), OpenState::Closing);
        assert!(!c.styles_applied());
    }

    #[test]
    fn test_opening_other_instance_closes_previous() {
        let registry = DropdownRegistry::new();
        let a = controller(&registry);
        let b = controller(&registry);
        let t0 = Instant::now();

        a.open_this(t0);
        a.tick(t0 + ms(10));
        assert_eq!(a.state(), OpenState::Open);

        b.open_this(t0 + ms(20));
        assert_eq!(a.state(), OpenState::Closing);
        assert_eq!(b.state(), OpenState::Opening);
        assert!(registry.is_active(b.id()));

        let t1 = t0 + ms(30);
        a.tick(t1);
        b.tick(t1);
        assert_eq!(b.state(), OpenState::Open);
        assert_ne!(a.state(), OpenState::Open);

        // A finishes closing within one animation duration and does not
        // take the registry away from B.
        let t2 = t0 + ms(20 + 200);
        a.tick(t2);
        b.tick(t2);
        assert_eq!(a.state(), OpenState::Closed);
        assert!(registry.is_active(b.id()));
    }

    #[test]
    fn test_unmount_releases_registry() {
        let registry = DropdownRegistry::new();
        let c = controller(&registry);
        c.open_this(Instant::now());
        c.unmount();
        assert_eq!(c.state(), OpenState::Closed);
        assert_eq!(registry.active_id(), None);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn test_drop_releases_registry() {
        let registry = DropdownRegistry::new();
        {
            let c = controller(&registry);
            c.open_this(Instant::now());
            assert!(registry.is_scroll_locked());
        }
        assert!(!registry.is_scroll_locked());
    }
}
