//! DOM keyboard listener wiring for `GridEdit`.
//!
//! Installs `keydown`/`keyup` handlers on the host element. Presses only
//! decide default suppression; releases run the grid actions and then
//! nudge the host's render callback.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent};

use crate::keyboard::{self, KeyPhase, KeyboardDispatcher};

/// Install the two key listeners and hand back their closures; the caller
/// keeps them alive for the life of the editor.
pub(crate) fn install(
    target: &HtmlElement,
    dispatcher: KeyboardDispatcher,
    render_callback: Rc<RefCell<Option<Function>>>,
) -> Vec<Closure<dyn FnMut(KeyboardEvent)>> {
    let mut closures = Vec::new();

    {
        let dispatcher = dispatcher.clone();
        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let Some(key) = keyboard::classify(&event.key()) else {
                return;
            };
            if dispatcher.dispatch(key, KeyPhase::Down, targets_editable_input(&event)) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        target
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .ok();
        closures.push(closure);
    }

    {
        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let Some(key) = keyboard::classify(&event.key()) else {
                return;
            };
            if dispatcher.dispatch(key, KeyPhase::Up, targets_editable_input(&event)) {
                event.prevent_default();
            }
            invoke_render_callback(&render_callback);
        }) as Box<dyn FnMut(KeyboardEvent)>);
        target
            .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
            .ok();
        closures.push(closure);
    }

    closures
}

/// Whether the event's focus target is an editable input (the cell edit
/// field or any other text control).
fn targets_editable_input(event: &KeyboardEvent) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        .map_or(false, |el| {
            let tag = el.tag_name();
            tag.eq_ignore_ascii_case("input") || tag.eq_ignore_ascii_case("textarea")
        })
}

/// Fire the host's render callback, if one is registered.
pub(crate) fn invoke_render_callback(callback: &Rc<RefCell<Option<Function>>>) {
    if let Some(cb) = callback.borrow().as_ref() {
        let _ = cb.call0(&JsValue::NULL);
    }
}
