//! Window dimension notifications
//!
//! A small single-threaded observer hub. Listeners are registered with
//! [`Dimensions::add_listener`] and stay registered for as long as the
//! returned [`Subscription`] is alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Window size in logical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl WindowSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert a terminal size in cells to logical units.
    ///
    /// `cell_aspect` is the height of one cell divided by its width.
    pub fn from_cells(columns: u16, rows: u16, cell_aspect: f32) -> Self {
        Self {
            width: f32::from(columns),
            height: f32::from(rows) * cell_aspect,
        }
    }
}

type Listener = Box<dyn FnMut(WindowSize)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    /// Ids released while an emit held the listener list
    released: Vec<u64>,
}

/// Source of window dimension-change notifications
#[derive(Default)]
pub struct Dimensions {
    registry: Rc<RefCell<Registry>>,
    current: Option<WindowSize>,
}

impl Dimensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently emitted size
    pub fn current(&self) -> Option<WindowSize> {
        self.current
    }

    /// Register a listener; it is removed when the subscription drops
    pub fn add_listener(&self, listener: impl FnMut(WindowSize) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        log::debug!("Dimension listener {} added", id);

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Notify every live listener of a new size
    pub fn emit(&mut self, size: WindowSize) {
        self.current = Some(size);

        // Listeners run without the registry borrowed so they may drop
        // subscriptions (their own included) while being notified.
        let mut listeners = std::mem::take(&mut self.registry.borrow_mut().listeners);
        for (id, listener) in listeners.iter_mut() {
            if !self.registry.borrow().released.contains(id) {
                listener(size);
            }
        }

        let removed = {
            let mut registry = self.registry.borrow_mut();
            let released = std::mem::take(&mut registry.released);
            let (kept, removed): (Vec<_>, Vec<_>) = listeners
                .into_iter()
                .partition(|(id, _)| !released.contains(id));
            // Anything added during the emit goes after the existing listeners
            let added = std::mem::replace(&mut registry.listeners, kept);
            registry.listeners.extend(added);
            removed
        };
        // Released listeners may own subscriptions of their own, so they are
        // dropped only once the registry is no longer borrowed.
        drop(removed);
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Handle that keeps a dimension listener registered
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Remove the listener now
    pub fn remove(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let id = self.id;
        let removed = {
            let mut registry = registry.borrow_mut();
            match registry.listeners.iter().position(|(listener_id, _)| *listener_id == id) {
                Some(index) => Some(registry.listeners.remove(index)),
                None => {
                    // The listener list is checked out by an emit in progress
                    registry.released.push(id);
                    None
                }
            }
        };
        log::debug!("Dimension listener {} removed", id);
        // The listener may own further subscriptions; drop it unborrowed
        drop(removed);
    }
}
