use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Milliseconds since the Unix epoch from the browser clock.
pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Non-deterministic generator for the cosmetic pool shuffle.
pub fn shuffle_rng() -> StdRng {
    let noise = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
    StdRng::seed_from_u64(noise ^ (now_ms() as u64).rotate_left(32))
}

/// Build an absolute URL for an asset, taking into account the optional
/// `window.__BASE_URL` which is set by the host page.
pub fn asset_url(path: &str) -> String {
    let p = path.trim();
    if p.starts_with("http://") || p.starts_with("https://") || p.starts_with("data:") {
        return p.to_string();
    }
    let base = web_sys::window()
        .and_then(|w| {
            let v = js_sys::Reflect::get(&w, &JsValue::from_str("__BASE_URL")).ok()?;
            v.as_string()
        })
        .unwrap_or_else(|| "/".to_string());
    join_base(&base, p)
}

fn join_base(base: &str, path: &str) -> String {
    let base = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };
    format!("{}{}", base, path.trim_start_matches('/'))
}

/// Fetch a text resource trying a list of fallback URLs in order.
pub async fn fetch_text_with_fallbacks(window: &Window, urls: &[&str]) -> Result<String, JsValue> {
    let mut last_err = JsValue::from_str("no catalog location");
    for url in urls {
        let resp_value =
            match wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(url)).await {
                Ok(v) => v,
                Err(e) => {
                    log(&format!("fetch {} failed: {:?}", url, e));
                    last_err = e;
                    continue;
                }
            };
        let resp: web_sys::Response = match resp_value.dyn_into() {
            Ok(r) => r,
            Err(e) => {
                last_err = e;
                continue;
            }
        };
        if !resp.ok() {
            log(&format!("fetch {} returned status {}", url, resp.status()));
            last_err = JsValue::from_str(&format!("fetch failed with status {}", resp.status()));
            continue;
        }
        match read_body(&resp).await {
            Ok(s) => return Ok(s),
            Err(e) => {
                log(&format!("reading {} failed: {:?}", url, e));
                last_err = e;
            }
        }
    }
    Err(last_err)
}

async fn read_body(resp: &web_sys::Response) -> Result<String, JsValue> {
    let text_js = wasm_bindgen_futures::JsFuture::from(resp.text()?).await?;
    text_js
        .as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8_lossy()
        .to_string()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn body_is_read_as_text() {
        let resp = web_sys::Response::new_with_opt_str(Some("[]")).unwrap();
        assert_eq!(read_body(&resp).await.unwrap(), "[]");
    }

    #[wasm_bindgen_test]
    async fn consumed_body_reports_its_own_error() {
        let resp = web_sys::Response::new_with_opt_str(Some("[]")).unwrap();
        read_body(&resp).await.unwrap();
        let err = read_body(&resp).await.unwrap_err();
        assert!(!err.is_undefined());
        assert_ne!(err.as_string().as_deref(), Some("no catalog location"));
    }
}
