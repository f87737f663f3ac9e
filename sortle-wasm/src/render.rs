use sortle_core::{CardView, GameView, POOL_COLOR, POOL_CONTAINER_ID, SlotView};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::constants::{
    ATTEMPT_ID, DATE_ID, GAME_ID, LOADING_ID, POOL_ID, RESULT_ID, SHARE_ID, SLOTS_ID,
};
use crate::state::{Phase, State};

/// Redraw the whole page from the current state.
pub fn render(state: &State) {
    if let Err(err) = render_inner(state) {
        crate::utils::log(&format!("render failed: {:?}", err));
    }
}

fn render_inner(state: &State) -> Result<(), JsValue> {
    let doc = &state.document;
    let view = state.view();

    if let Phase::Failed(message) = &state.phase {
        set_hidden(doc, LOADING_ID, false);
        set_hidden(doc, GAME_ID, true);
        if let Some(el) = doc.get_element_by_id(LOADING_ID) {
            el.set_text_content(Some(message));
        }
        return Ok(());
    }

    set_hidden(doc, LOADING_ID, !view.loading);
    set_hidden(doc, GAME_ID, view.loading);
    if view.loading {
        return Ok(());
    }

    if let Some(pool) = doc.get_element_by_id(POOL_ID) {
        render_pool(doc, &pool, &view)?;
    }
    if let Some(slots) = doc.get_element_by_id(SLOTS_ID) {
        render_slots(doc, &slots, &view)?;
    }
    if let Some(el) = doc.get_element_by_id(RESULT_ID) {
        el.set_text_content(view.result.as_deref());
    }
    set_hidden(doc, SHARE_ID, view.share.is_none());
    if let Some(el) = doc.get_element_by_id(DATE_ID) {
        el.set_text_content(Some(&view.date_label));
    }
    if let Some(el) = doc.get_element_by_id(ATTEMPT_ID) {
        el.set_text_content(Some(&format!("Attempt {}", view.attempt)));
    }
    Ok(())
}

fn render_pool(doc: &Document, pool: &Element, view: &GameView) -> Result<(), JsValue> {
    pool.set_text_content(None);
    pool.set_attribute("data-container", POOL_CONTAINER_ID)?;
    pool.set_attribute("data-color", POOL_COLOR)?;
    paint(pool, POOL_COLOR);
    for card in &view.pool {
        let el = card_element(doc, card)?;
        pool.append_child(&el)?;
    }
    Ok(())
}

fn render_slots(doc: &Document, slots: &Element, view: &GameView) -> Result<(), JsValue> {
    slots.set_text_content(None);
    for slot in &view.slots {
        let row = slot_element(doc, slot)?;
        slots.append_child(&row)?;
    }
    Ok(())
}

fn slot_element(doc: &Document, slot: &SlotView) -> Result<Element, JsValue> {
    let row = doc.create_element("div")?;
    row.set_class_name("slot-row");

    let label = doc.create_element("span")?;
    label.set_class_name("slot-label");
    label.set_text_content(Some(&slot.label));
    row.append_child(&label)?;

    let target = doc.create_element("div")?;
    target.set_class_name("slot");
    target.set_attribute("data-container", &slot.container_id)?;
    target.set_attribute("data-color", &slot.color)?;
    paint(&target, &slot.color);
    match &slot.card {
        Some(card) => {
            let el = card_element(doc, card)?;
            target.append_child(&el)?;
        }
        None => {
            let hint = doc.create_element("span")?;
            hint.set_class_name("placeholder");
            hint.set_text_content(Some("Drop here"));
            target.append_child(&hint)?;
        }
    }
    row.append_child(&target)?;
    Ok(row)
}

// Catalog names go through set_text_content, never inner HTML.
fn card_element(doc: &Document, card: &CardView) -> Result<Element, JsValue> {
    let el = doc.create_element("div")?;
    el.set_class_name("card");
    el.set_attribute("draggable", "true")?;
    el.set_attribute("data-id", &card.id)?;
    el.set_text_content(Some(&card.name));
    Ok(el)
}

/// Set the background of a drop container.
pub fn paint(el: &Element, color: &str) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property("background-color", color);
    }
}

fn set_hidden(doc: &Document, id: &str, hidden: bool) {
    if let Some(el) = doc.get_element_by_id(id)
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        el.set_hidden(hidden);
    }
}
