//! Keyboard dispatch: named keys to semantic grid actions.
//!
//! The host's keyboard binding delivers named key events; this layer maps
//! them onto bus topics and decides when the platform default (browser
//! focus shift on Tab, back-navigation on Backspace) must be suppressed.
//! The DOM never reaches this module; listener wiring lives in the
//! editor surface.

use crate::bus::{EventBus, GridEvent};
use crate::coord::Direction;

/// Press or release of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// The physical keys the grid reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedKey {
    Up,
    Down,
    Left,
    Right,
    Tab,
    /// Backspace or Delete.
    Remove,
    /// A printable character, used as the start-typing edit trigger.
    Letter,
}

/// Translate a DOM `KeyboardEvent.key` value into a named key.
///
/// Returns `None` for keys the grid does not reserve (modifiers,
/// function keys, Enter, Escape, ...). Modifier chords are the host
/// binding's concern and never reach this table as plain keys.
#[must_use]
pub fn classify(key: &str) -> Option<NamedKey> {
    match key {
        "ArrowUp" => Some(NamedKey::Up),
        "ArrowDown" => Some(NamedKey::Down),
        "ArrowLeft" => Some(NamedKey::Left),
        "ArrowRight" => Some(NamedKey::Right),
        "Tab" => Some(NamedKey::Tab),
        "Backspace" | "Delete" => Some(NamedKey::Remove),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_control() => Some(NamedKey::Letter),
                _ => None,
            }
        }
    }
}

/// Publishes semantic actions for named key events.
#[derive(Clone)]
pub struct KeyboardDispatcher {
    bus: EventBus,
}

impl KeyboardDispatcher {
    /// Create a dispatcher publishing on `bus`.
    #[must_use]
    pub fn new(bus: EventBus) -> Self {
        KeyboardDispatcher { bus }
    }

    /// Handle one named key event.
    ///
    /// Grid actions fire on key release; key presses only decide default
    /// suppression. `in_editable_input` tells whether the active focus
    /// target is an editable input (the cell edit field), which gates the
    /// Tab and Backspace/Delete suppression guards.
    ///
    /// Returns `true` when the platform default for the event must be
    /// suppressed.
    pub fn dispatch(&self, key: NamedKey, phase: KeyPhase, in_editable_input: bool) -> bool {
        match (key, phase) {
            (NamedKey::Up, KeyPhase::Up) => self.navigate(Direction::Up),
            (NamedKey::Down, KeyPhase::Up) => self.navigate(Direction::Down),
            (NamedKey::Left, KeyPhase::Up) => self.navigate(Direction::Left),
            (NamedKey::Right, KeyPhase::Up) => self.navigate(Direction::Right),
            // Tab advances even mid-edit.
            (NamedKey::Tab, KeyPhase::Up) => {
                self.bus.publish(&GridEvent::Navigate {
                    direction: Direction::Right,
                    force: true,
                });
                false
            }
            // Keep Tab from moving browser focus out of the edit field.
            (NamedKey::Tab, KeyPhase::Down) => in_editable_input,
            (NamedKey::Letter, KeyPhase::Up) => {
                self.bus.publish(&GridEvent::EditTrigger);
                false
            }
            (NamedKey::Remove, KeyPhase::Up) => {
                self.bus.publish(&GridEvent::RemoveTrigger);
                false
            }
            // Keep Backspace from navigating the page back while no input
            // holds focus.
            (NamedKey::Remove, KeyPhase::Down) => !in_editable_input,
            _ => false,
        }
    }

    fn navigate(&self, direction: Direction) -> bool {
        self.bus.publish(&GridEvent::Navigate {
            direction,
            force: false,
        });
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::bus::Topic;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_bus() -> (EventBus, Rc<RefCell<Vec<GridEvent>>>) {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for topic in [
            Topic::Navigate(Direction::Up),
            Topic::Navigate(Direction::Down),
            Topic::Navigate(Direction::Left),
            Topic::Navigate(Direction::Right),
            Topic::EditTrigger,
            Topic::RemoveTrigger,
        ] {
            let log = Rc::clone(&seen);
            let _sub = bus.subscribe(topic, move |event| {
                log.borrow_mut().push(event.clone());
                Ok(())
            });
        }
        (bus, seen)
    }

    #[test]
    fn classifies_reserved_keys() {
        assert_eq!(classify("ArrowUp"), Some(NamedKey::Up));
        assert_eq!(classify("ArrowDown"), Some(NamedKey::Down));
        assert_eq!(classify("ArrowLeft"), Some(NamedKey::Left));
        assert_eq!(classify("ArrowRight"), Some(NamedKey::Right));
        assert_eq!(classify("Tab"), Some(NamedKey::Tab));
        assert_eq!(classify("Backspace"), Some(NamedKey::Remove));
        assert_eq!(classify("Delete"), Some(NamedKey::Remove));
    }

    #[test]
    fn classifies_printable_characters_as_letters() {
        assert_eq!(classify("a"), Some(NamedKey::Letter));
        assert_eq!(classify("Z"), Some(NamedKey::Letter));
        assert_eq!(classify("7"), Some(NamedKey::Letter));
        assert_eq!(classify(" "), Some(NamedKey::Letter));
    }

    #[test]
    fn ignores_unreserved_keys() {
        assert_eq!(classify("Enter"), None);
        assert_eq!(classify("Escape"), None);
        assert_eq!(classify("Shift"), None);
        assert_eq!(classify("F5"), None);
    }

    #[test]
    fn arrows_publish_navigation_on_release() {
        let (bus, seen) = recording_bus();
        let dispatcher = KeyboardDispatcher::new(bus);

        assert!(!dispatcher.dispatch(NamedKey::Down, KeyPhase::Up, false));
        assert!(!dispatcher.dispatch(NamedKey::Left, KeyPhase::Up, false));
        // Presses publish nothing.
        dispatcher.dispatch(NamedKey::Down, KeyPhase::Down, false);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(matches!(
            seen[0],
            GridEvent::Navigate {
                direction: Direction::Down,
                force: false
            }
        ));
    }

    #[test]
    fn tab_release_forces_a_right_move() {
        let (bus, seen) = recording_bus();
        let dispatcher = KeyboardDispatcher::new(bus);

        dispatcher.dispatch(NamedKey::Tab, KeyPhase::Up, true);
        let seen = seen.borrow();
        assert!(matches!(
            seen[0],
            GridEvent::Navigate {
                direction: Direction::Right,
                force: true
            }
        ));
    }

    #[test]
    fn tab_press_is_suppressed_only_inside_an_input() {
        let (bus, _seen) = recording_bus();
        let dispatcher = KeyboardDispatcher::new(bus);

        assert!(dispatcher.dispatch(NamedKey::Tab, KeyPhase::Down, true));
        assert!(!dispatcher.dispatch(NamedKey::Tab, KeyPhase::Down, false));
    }

    #[test]
    fn remove_press_is_suppressed_only_outside_inputs() {
        let (bus, _seen) = recording_bus();
        let dispatcher = KeyboardDispatcher::new(bus);

        assert!(dispatcher.dispatch(NamedKey::Remove, KeyPhase::Down, false));
        assert!(!dispatcher.dispatch(NamedKey::Remove, KeyPhase::Down, true));
    }

    #[test]
    fn letters_and_removes_publish_triggers() {
        let (bus, seen) = recording_bus();
        let dispatcher = KeyboardDispatcher::new(bus);

        dispatcher.dispatch(NamedKey::Letter, KeyPhase::Up, false);
        dispatcher.dispatch(NamedKey::Remove, KeyPhase::Up, false);

        let seen = seen.borrow();
        assert!(matches!(seen[0], GridEvent::EditTrigger));
        assert!(matches!(seen[1], GridEvent::RemoveTrigger));
    }
}
