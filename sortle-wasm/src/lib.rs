use std::cell::RefCell;
use std::rc::Rc;

use sortle_core::{Catalog, DaySeed, Game, GameConfig, SortleError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

mod constants;
mod drag;
mod render;
mod share;
mod state;
mod theme;
mod utils;

use constants::{
    BUNDLED_CATALOG_FILE, LOAD_FAILED_MESSAGE, RESET_ID, SHARE_ID, SUBMIT_ID, THEME_ID,
};
use render::render;
use state::{Phase, STATE, State};
use utils::{asset_url, fetch_text_with_fallbacks, get_query_param, log, now_ms, shuffle_rng};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    theme::init_theme(&window, &document);

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        config: GameConfig::default(),
        phase: Phase::Loading,
        rng: shuffle_rng(),
    }));
    STATE.with(|st| st.replace(Some(state.clone())));

    render(&state.borrow());
    attach_ui(state.clone())?;
    drag::attach_drag_and_drop(state.clone())?;

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = load_game(state.clone()).await {
            log(&format!("Failed to start game: {}", err.as_string().unwrap_or_default()));
            let mut s = state.borrow_mut();
            s.phase = Phase::Failed(LOAD_FAILED_MESSAGE.to_string());
            render(&s);
            let _ = s.window.alert_with_message(LOAD_FAILED_MESSAGE);
        }
    });
    Ok(())
}

/// Fetch the catalog and build today's game (or the `?date=` one).
async fn load_game(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let (window, config) = {
        let s = state.borrow();
        (s.window.clone(), s.config.clone())
    };
    let search = window.location().search().unwrap_or_default();

    let urls = match get_query_param(&search, "catalog") {
        Some(url) => vec![url],
        None => vec![asset_url(BUNDLED_CATALOG_FILE), config.catalog_url.clone()],
    };
    let refs: Vec<&str> = urls.iter().map(String::as_str).collect();
    let text = fetch_text_with_fallbacks(&window, &refs)
        .await
        .map_err(|e| to_js(SortleError::catalog_load(format!("{:?}", e))))?;
    let catalog = Catalog::from_json(&text)
        .map_err(to_js)?
        .retain_prefix(&config.group_prefix);
    log(&format!("catalog loaded: {} problems", catalog.len()));

    let day = get_query_param(&search, "date").and_then(|d| {
        let day = DaySeed::parse(&d);
        if day.is_none() {
            log(&format!("ignoring malformed date '{}'", d));
        }
        day
    });

    let mut guard = state.borrow_mut();
    let s = &mut *guard;
    let now = now_ms();
    let game = match day {
        Some(day) => Game::new(catalog, config, day, now, &mut s.rng),
        None => Game::for_today(catalog, config, now, &mut s.rng),
    }
    .map_err(to_js)?;
    s.phase = Phase::Ready(Box::new(game));
    render(s);
    Ok(())
}

fn to_js(err: SortleError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn on_click(doc: &Document, id: &str, f: impl FnMut() + 'static) -> Result<(), JsValue> {
    if let Some(btn) = doc.get_element_by_id(id) {
        let btn: HtmlElement = btn.dyn_into()?;
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(f));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }
    Ok(())
}

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    let st = state.clone();
    on_click(&doc, SUBMIT_ID, move || {
        let mut s = st.borrow_mut();
        if let Some(game) = s.game_mut() {
            let outcome = game.check_answer(now_ms());
            log(&format!("submitted: {:?}", outcome));
        }
        render(&s);
    })?;

    let st = state.clone();
    on_click(&doc, RESET_ID, move || {
        let mut guard = st.borrow_mut();
        let s = &mut *guard;
        if let Phase::Ready(game) = &mut s.phase {
            game.reset(&mut s.rng, now_ms());
        }
        render(s);
    })?;

    let st = state.clone();
    on_click(&doc, SHARE_ID, move || {
        let s = st.borrow();
        let url = s.window.location().href().unwrap_or_default();
        if let Some(payload) = s.game().and_then(|g| g.share_payload(&url)) {
            share::spawn_share(s.window.clone(), payload);
        }
    })?;

    let st = state.clone();
    on_click(&doc, THEME_ID, move || {
        let s = st.borrow();
        theme::toggle_theme(&s.window, &s.document);
    })?;

    Ok(())
}

/// Current game snapshot as JSON, for debugging from the console.
#[wasm_bindgen]
pub fn view_json() -> String {
    STATE.with(|st| {
        st.borrow()
            .as_ref()
            .and_then(|s| serde_json::to_string(&s.borrow().view()).ok())
            .unwrap_or_default()
    })
}
