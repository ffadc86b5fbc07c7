//! Change notifications for a heightmap collection.
//!
//! Listeners are plain callbacks invoked synchronously, in registration order,
//! from inside the mutating call that raised the event.

use std::fmt;
use std::sync::Arc;

/// Handle returned by [`Event::add_listener`], used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener callback type
pub type Listener<A> = Box<dyn FnMut(&A)>;

/// Raised after a layer has been inserted.
#[derive(Debug)]
pub struct HeightmapAdded<L> {
    pub layer: Arc<L>,
    /// Position or slot passed by the caller; `None` for plain appends.
    pub position: Option<i64>,
}

/// Raised after an entry has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightmapRemoved {
    /// Physical position the entry started at when it was removed.
    pub position: usize,
}

/// A single notification channel.
pub struct Event<A> {
    listeners: Vec<(ListenerId, Listener<A>)>,
    next_id: u64,
}

impl<A> Event<A> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a listener; it stays registered until [`Event::remove_listener`].
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&A) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn raise(&mut self, args: &A) {
        log::trace!("dispatching to {} listener(s)", self.listeners.len());
        for (_, listener) in &mut self.listeners {
            listener(args);
        }
    }
}

impl<A> Default for Event<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_listeners_run_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut event = Event::<usize>::new();

        let first = Rc::clone(&calls);
        event.add_listener(move |value: &usize| first.borrow_mut().push(("first", *value)));
        let second = Rc::clone(&calls);
        event.add_listener(move |value: &usize| second.borrow_mut().push(("second", *value)));

        event.raise(&3);

        assert_eq!(*calls.borrow(), vec![("first", 3), ("second", 3)]);
    }

    #[test]
    fn test_removed_listener_is_not_called() {
        let count = Rc::new(RefCell::new(0));
        let mut event = Event::<()>::new();

        let counter = Rc::clone(&count);
        let id = event.add_listener(move |_: &()| *counter.borrow_mut() += 1);
        let kept = Rc::clone(&count);
        event.add_listener(move |_: &()| *kept.borrow_mut() += 10);

        assert!(event.remove_listener(id));
        assert!(!event.remove_listener(id), "second removal should be a no-op");
        event.raise(&());

        assert_eq!(*count.borrow(), 10);
        assert_eq!(event.listener_count(), 1);
    }
}
