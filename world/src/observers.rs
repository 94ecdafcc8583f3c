//! Synchronous fan-out of tile events to registered observers.

use std::{cell::RefCell, fmt, rc::Rc};

use groundwork_core::{GridCoord, GroundType, TileEvent};

/// Capability implemented by collaborators that mirror the grid, such as a
/// visual layer or an analytics sink.
///
/// Each channel defaults to a no-op so observers only implement the
/// notifications they care about. Observers cannot veto or alter a mutation.
pub trait TileObserver {
    /// An empty cell received ground.
    fn on_tile_placed(&mut self, _cell: GridCoord, _ground: GroundType) {}

    /// An occupied cell was cleared.
    fn on_tile_removed(&mut self, _cell: GridCoord, _previous: GroundType) {}

    /// An occupied cell switched ground types.
    fn on_tile_changed(&mut self, _cell: GridCoord, _previous: GroundType, _current: GroundType) {
    }

    /// Routes an event to the matching channel.
    fn notify(&mut self, event: &TileEvent) {
        match *event {
            TileEvent::Placed { cell, ground } => self.on_tile_placed(cell, ground),
            TileEvent::Removed { cell, previous } => self.on_tile_removed(cell, previous),
            TileEvent::Changed {
                cell,
                previous,
                current,
            } => self.on_tile_changed(cell, previous, current),
        }
    }
}

impl<T: TileObserver + ?Sized> TileObserver for Rc<RefCell<T>> {
    fn on_tile_placed(&mut self, cell: GridCoord, ground: GroundType) {
        self.borrow_mut().on_tile_placed(cell, ground);
    }

    fn on_tile_removed(&mut self, cell: GridCoord, previous: GroundType) {
        self.borrow_mut().on_tile_removed(cell, previous);
    }

    fn on_tile_changed(&mut self, cell: GridCoord, previous: GroundType, current: GroundType) {
        self.borrow_mut().on_tile_changed(cell, previous, current);
    }

    fn notify(&mut self, event: &TileEvent) {
        self.borrow_mut().notify(event);
    }
}

/// Handle returned by a subscription, used to unsubscribe later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Numeric representation of the handle.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Ordered list of observers owned by the ground grid.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    entries: Vec<(SubscriptionId, Box<dyn TileObserver>)>,
    next_id: u64,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn TileObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(position) = self.entries.iter().position(|(entry, _)| *entry == id) else {
            return false;
        };
        let _ = self.entries.remove(position);
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn broadcast(&mut self, event: &TileEvent) {
        for (_, observer) in &mut self.entries {
            observer.notify(event);
        }
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("subscribers", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// Observer that records every event it receives, in delivery order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileEventLog {
    events: Vec<TileEvent>,
}

impl TileEventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty log behind a shared handle, ready to subscribe.
    #[must_use]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[TileEvent] {
        &self.events
    }

    /// Removes and returns every recorded event.
    pub fn drain(&mut self) -> Vec<TileEvent> {
        std::mem::take(&mut self.events)
    }
}

impl TileObserver for TileEventLog {
    fn notify(&mut self, event: &TileEvent) {
        self.events.push(*event);
    }
}
