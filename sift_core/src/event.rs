//! Synchronous observer lists
//!
//! Listeners run on the thread that fired the event, in registration order. A
//! [`Subscription`] removes its listener again; removing twice is a no-op.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<E> = Rc<RefCell<dyn FnMut(&E)>>;
type ListenerList<E> = RefCell<Vec<(u64, Listener<E>)>>;

/// A list of listeners for events of type `E`.
pub struct EventEmitter<E> {
    listeners: Rc<ListenerList<E>>,
    next_id: u64,
}

impl<E: 'static> EventEmitter<E> {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: 0,
        }
    }

    /// Registers a listener and returns the handle that unregisters it.
    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;

        let listener: Listener<E> = Rc::new(RefCell::new(listener));
        self.listeners.borrow_mut().push((id, listener));

        let weak: Weak<ListenerList<E>> = Rc::downgrade(&self.listeners);
        Subscription {
            remove: Box::new(move || {
                if let Some(listeners) = weak.upgrade() {
                    listeners.borrow_mut().retain(|(listener_id, _)| *listener_id != id);
                }
            }),
            removed: false,
        }
    }

    /// Calls every listener with the event.
    ///
    /// The listener list is snapshotted first, so listeners may unsubscribe (themselves
    /// or others) while the event is being delivered.
    pub fn fire(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            // A listener that re-enters the same emitter is skipped rather than panicking
            if let Ok(mut listener) = listener.try_borrow_mut() {
                (&mut *listener)(event);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl<E: 'static> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

/// Handle returned when subscribing to an [`EventEmitter`].
pub struct Subscription {
    remove: Box<dyn Fn()>,
    removed: bool,
}

impl Subscription {
    /// Unregisters the listener. Calling this more than once does nothing.
    pub fn remove(&mut self) {
        if !self.removed {
            (self.remove)();
            self.removed = true;
        }
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("removed", &self.removed)
            .finish()
    }
}
