use js_sys::{Function, Object, Promise, Reflect};
use sortle_core::{SharePayload, SortleError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

use crate::constants::COPIED_MESSAGE;
use crate::utils::log;

fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

async fn call_async(f: &Function, this: &JsValue, arg: &JsValue) -> Result<(), JsValue> {
    let ret = f.call1(this, arg)?;
    if let Ok(promise) = ret.dyn_into::<Promise>() {
        JsFuture::from(promise).await?;
    }
    Ok(())
}

fn share_data(payload: &SharePayload) -> Result<JsValue, JsValue> {
    let obj = Object::new();
    Reflect::set(&obj, &"title".into(), &payload.title.as_str().into())?;
    Reflect::set(&obj, &"text".into(), &payload.text.as_str().into())?;
    Reflect::set(&obj, &"url".into(), &payload.url.as_str().into())?;
    Ok(obj.into())
}

/// Hand the payload to the system share sheet, or copy it to the clipboard
/// and confirm with an alert when there is none.
pub async fn share(window: &Window, payload: &SharePayload) -> Result<(), SortleError> {
    let navigator: JsValue = window.navigator().into();
    let js_err = |e: JsValue| SortleError::share_failure(format!("{:?}", e));

    if let Some(share_fn) = method(&navigator, "share") {
        let data = share_data(payload).map_err(js_err)?;
        return call_async(&share_fn, &navigator, &data)
            .await
            .map_err(js_err);
    }

    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard")).map_err(js_err)?;
    let write_text = method(&clipboard, "writeText")
        .ok_or_else(|| SortleError::share_failure("no clipboard available"))?;
    let text = JsValue::from_str(&payload.clipboard_text());
    call_async(&write_text, &clipboard, &text)
        .await
        .map_err(js_err)?;
    window.alert_with_message(COPIED_MESSAGE).map_err(js_err)?;
    Ok(())
}

/// Run [`share`] in the background; failures (including a dismissed share
/// sheet) are only logged.
pub fn spawn_share(window: Window, payload: SharePayload) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = share(&window, &payload).await {
            log(&err.to_string());
        }
    });
}
