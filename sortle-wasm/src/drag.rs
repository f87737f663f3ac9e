use std::cell::RefCell;
use std::rc::Rc;

use sortle_core::SLOT_HOVER_COLOR;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Element};

use crate::constants::DRAG_FORMAT;
use crate::render::{paint, render};
use crate::state::State;

/// Closest ancestor of the event target matching `selector`.
fn target_closest(e: &DragEvent, selector: &str) -> Option<Element> {
    let el: Element = e.target()?.dyn_into().ok()?;
    el.closest(selector).ok().flatten()
}

fn container_of(e: &DragEvent) -> Option<Element> {
    target_closest(e, "[data-container]")
}

/// Wire drag-and-drop with document-level listeners so re-rendered cards and
/// slots need no handlers of their own.
pub fn attach_drag_and_drop(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    let dragstart = Closure::<dyn FnMut(DragEvent)>::wrap(Box::new(move |e: DragEvent| {
        let Some(card) = target_closest(&e, "[data-id]") else {
            return;
        };
        let Some(id) = card.get_attribute("data-id") else {
            return;
        };
        if let Some(dt) = e.data_transfer() {
            let _ = dt.set_data(DRAG_FORMAT, &id);
            dt.set_effect_allowed("move");
        }
    }));
    doc.add_event_listener_with_callback("dragstart", dragstart.as_ref().unchecked_ref())?;
    dragstart.forget();

    let dragover = Closure::<dyn FnMut(DragEvent)>::wrap(Box::new(move |e: DragEvent| {
        if let Some(container) = container_of(&e) {
            e.prevent_default();
            paint(&container, SLOT_HOVER_COLOR);
        }
    }));
    doc.add_event_listener_with_callback("dragover", dragover.as_ref().unchecked_ref())?;
    dragover.forget();

    let dragleave = Closure::<dyn FnMut(DragEvent)>::wrap(Box::new(move |e: DragEvent| {
        if let Some(container) = container_of(&e)
            && let Some(color) = container.get_attribute("data-color")
        {
            paint(&container, &color);
        }
    }));
    doc.add_event_listener_with_callback("dragleave", dragleave.as_ref().unchecked_ref())?;
    dragleave.forget();

    let st = state.clone();
    let ondrop = Closure::<dyn FnMut(DragEvent)>::wrap(Box::new(move |e: DragEvent| {
        let Some(container) = container_of(&e) else {
            return;
        };
        e.prevent_default();
        let Some(container_id) = container.get_attribute("data-container") else {
            return;
        };
        let id = match e.data_transfer().map(|dt| dt.get_data(DRAG_FORMAT)) {
            Some(Ok(id)) if !id.is_empty() => id,
            _ => return,
        };
        let mut s = st.borrow_mut();
        if let Some(game) = s.game_mut() {
            game.drop_on(&id, &container_id);
        }
        // Also clears the hover colour on the target.
        render(&s);
    }));
    doc.add_event_listener_with_callback("drop", ondrop.as_ref().unchecked_ref())?;
    ondrop.forget();

    Ok(())
}
