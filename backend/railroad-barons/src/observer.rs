//! Publish/subscribe plumbing for game events.
//!
//! Observers are shared (`Rc`) trait objects with `&self` methods: the engine only ever
//! holds shared references to them, and calls them synchronously, in registration order.
//! An observer wanting to record what it saw should use interior mutability.

use crate::manager::Manager;
use crate::map::Map;
use crate::player::Player;
use crate::route::Route;

use std::rc::Rc;

/// Notified whenever the state of a game changes.
pub trait ManagerObserver {
    /// `player` has just been dealt their pair and may claim a route.
    fn turn_started(&self, _game: &Manager, _player: &Player) {}

    /// `player`'s turn is over, whether they claimed a route or passed.
    fn turn_ended(&self, _game: &Manager, _player: &Player) {}

    /// Every route is claimed (or nobody can continue), and `winner` has the highest score.
    fn game_over(&self, _game: &Manager, _winner: &Player) {}
}

/// Notified of significant events on a [`Map`].
pub trait MapObserver {
    fn route_claimed(&self, _map: &Map, _route: &Route) {}
}

/// Notified whenever a player's hand, score or pieces change.
pub trait PlayerObserver {
    fn player_changed(&self, _player: &Player) {}
}

/// Handle returned on registration, used to unregister that same observer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ObserverId(usize);

/// Ordered list of observers of one kind.
pub struct Observers<T: ?Sized> {
    next_id: usize,
    entries: Vec<(ObserverId, Rc<T>)>,
}

impl<T: ?Sized> Observers<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Adds an observer at the end of the notification order.
    pub fn register(&mut self, observer: Rc<T>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));

        id
    }

    /// Removes the observer registered under `id`.
    /// Returns whether there was one.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);

        self.entries.len() != len_before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<T>> {
        self.entries.iter().map(|(_, observer)| observer)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ?Sized> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    trait Greeter {
        fn greet(&self, log: &RefCell<Vec<&'static str>>);
    }

    struct Named(&'static str);

    impl Greeter for Named {
        fn greet(&self, log: &RefCell<Vec<&'static str>>) {
            log.borrow_mut().push(self.0);
        }
    }

    #[test]
    fn observers_notified_in_registration_order() {
        let mut observers: Observers<dyn Greeter> = Observers::new();
        observers.register(Rc::new(Named("first")));
        observers.register(Rc::new(Named("second")));
        observers.register(Rc::new(Named("third")));

        let log = RefCell::new(Vec::new());
        for observer in observers.iter() {
            observer.greet(&log);
        }

        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unregister_by_identity() {
        let mut observers: Observers<dyn Greeter> = Observers::new();
        let first = observers.register(Rc::new(Named("first")));
        let second = observers.register(Rc::new(Named("second")));
        assert_ne!(first, second);

        assert!(observers.unregister(first));
        assert!(!observers.unregister(first));
        assert_eq!(observers.len(), 1);

        let log = RefCell::new(Vec::new());
        for observer in observers.iter() {
            observer.greet(&log);
        }
        assert_eq!(*log.borrow(), vec!["second"]);

        assert!(observers.unregister(second));
        assert!(observers.is_empty());
    }
}
