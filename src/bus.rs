//! Session-scoped publish/subscribe channel.
//!
//! Decouples keyboard input from state transitions and carries change
//! notifications out to the host. Delivery is synchronous and in
//! subscription order; a handler that reports failure is logged and never
//! blocks delivery to the handlers after it. The bus is owned by one grid
//! session; there is no process-wide dispatcher.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::coord::{Coord, Direction};

/// Topics a handler can subscribe to.
///
/// Input topics (`Navigate`, `EditTrigger`, `RemoveTrigger`) are published
/// by the keyboard dispatcher and consumed by the session's own wiring;
/// notification topics are published by state transitions for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Directional navigation request.
    Navigate(Direction),
    /// Request to enter edit mode on the selected cell.
    EditTrigger,
    /// Request to clear the selected cell.
    RemoveTrigger,
    /// A cell became the selection.
    CellSelected,
    /// A cell's stored value changed.
    CellValueChanged,
    /// The full grid changed (carries a snapshot).
    DataChanged,
    /// An edit session on a cell ended.
    CellBlurred,
    /// A header cell was clicked.
    HeadCellClicked,
}

impl Topic {
    /// Parse a topic from its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Topic> {
        match name {
            "edit-trigger" => Some(Topic::EditTrigger),
            "remove-trigger" => Some(Topic::RemoveTrigger),
            "cellSelected" => Some(Topic::CellSelected),
            "cellValueChanged" => Some(Topic::CellValueChanged),
            "dataChanged" => Some(Topic::DataChanged),
            "cellBlurred" => Some(Topic::CellBlurred),
            "headCellClicked" => Some(Topic::HeadCellClicked),
            _ => name
                .strip_suffix("-navigate")
                .and_then(Direction::from_name)
                .map(Topic::Navigate),
        }
    }

    /// The wire name of this topic.
    ///
    /// Notification topics keep the camelCase names grid hosts
    /// already listen for (`cellSelected`, `dataChanged`, ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Topic::Navigate(Direction::Up) => "up-navigate",
            Topic::Navigate(Direction::Down) => "down-navigate",
            Topic::Navigate(Direction::Left) => "left-navigate",
            Topic::Navigate(Direction::Right) => "right-navigate",
            Topic::EditTrigger => "edit-trigger",
            Topic::RemoveTrigger => "remove-trigger",
            Topic::CellSelected => "cellSelected",
            Topic::CellValueChanged => "cellValueChanged",
            Topic::DataChanged => "dataChanged",
            Topic::CellBlurred => "cellBlurred",
            Topic::HeadCellClicked => "headCellClicked",
        }
    }
}

/// An event delivered on the bus.
#[derive(Debug, Clone)]
pub enum GridEvent {
    /// Move the selection. `force` overrides the editing suppression
    /// (tab-to-advance).
    Navigate {
        direction: Direction,
        force: bool,
    },
    /// Enter edit mode on the selected cell.
    EditTrigger,
    /// Clear the selected cell.
    RemoveTrigger,
    /// The selection moved to `cell`.
    CellSelected { cell: Coord },
    /// `cell` now stores `value`.
    CellValueChanged { cell: Coord, value: String },
    /// Snapshot of the full grid after a data mutation.
    DataChanged { rows: Vec<Vec<String>> },
    /// An edit on `cell` ended.
    CellBlurred { cell: Coord },
    /// The header cell `cell` was clicked.
    HeadCellClicked { cell: Coord },
}

impl GridEvent {
    /// The topic this event is delivered on.
    #[must_use]
    pub fn topic(&self) -> Topic {
        match self {
            GridEvent::Navigate { direction, .. } => Topic::Navigate(*direction),
            GridEvent::EditTrigger => Topic::EditTrigger,
            GridEvent::RemoveTrigger => Topic::RemoveTrigger,
            GridEvent::CellSelected { .. } => Topic::CellSelected,
            GridEvent::CellValueChanged { .. } => Topic::CellValueChanged,
            GridEvent::DataChanged { .. } => Topic::DataChanged,
            GridEvent::CellBlurred { .. } => Topic::CellBlurred,
            GridEvent::HeadCellClicked { .. } => Topic::HeadCellClicked,
        }
    }
}

/// A handler reports failure as a message; the bus logs it and moves on.
type Handler = Box<dyn FnMut(&GridEvent) -> std::result::Result<(), String>>;

struct Entry {
    id: u64,
    handler: Rc<RefCell<Handler>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: HashMap<Topic, Vec<Entry>>,
}

/// Synchronous pub/sub bus scoped to one grid session.
///
/// Cloning yields another handle to the same bus.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        EventBus::default()
    }

    /// Register `handler` for `topic`.
    ///
    /// Handlers run in subscription order. The returned [`Subscription`]
    /// is the unsubscribe capability; dropping it leaves the handler
    /// registered for the life of the session.
    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: FnMut(&GridEvent) -> std::result::Result<(), String> + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let handler: Rc<RefCell<Handler>> = Rc::new(RefCell::new(Box::new(handler)));
        registry
            .handlers
            .entry(topic)
            .or_default()
            .push(Entry { id, handler });
        Subscription {
            topic,
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every handler currently subscribed to its topic.
    ///
    /// Delivery snapshots the handler list first, so handlers may publish
    /// further events or subscribe/unsubscribe without deadlocking the
    /// bus; mid-publish registrations only see later publishes.
    pub fn publish(&self, event: &GridEvent) {
        let topic = event.topic();
        let snapshot: Vec<Rc<RefCell<Handler>>> = {
            let registry = self.registry.borrow();
            match registry.handlers.get(&topic) {
                Some(entries) => entries.iter().map(|e| Rc::clone(&e.handler)).collect(),
                None => return,
            }
        };

        for handler in snapshot {
            // A handler still borrowed here re-entered its own topic.
            let Ok(mut f) = handler.try_borrow_mut() else {
                report_handler_failure(topic, "handler re-entered its own topic");
                continue;
            };
            if let Err(message) = f(event) {
                report_handler_failure(topic, &message);
            }
        }
    }

    fn unsubscribe(registry: &Rc<RefCell<Registry>>, topic: Topic, id: u64) {
        let mut registry = registry.borrow_mut();
        if let Some(entries) = registry.handlers.get_mut(&topic) {
            entries.retain(|e| e.id != id);
        }
    }
}

/// Unsubscribe capability returned by [`EventBus::subscribe`].
pub struct Subscription {
    topic: Topic,
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Remove the handler from the bus. Safe after the bus is gone.
    pub fn cancel(self) {
        if let Some(registry) = self.registry.upgrade() {
            EventBus::unsubscribe(&registry, self.topic, self.id);
        }
    }
}

fn report_handler_failure(topic: Topic, message: &str) {
    let report = format!("gridedit: handler for '{}' failed: {message}", topic.name());
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&report.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{report}");
}
