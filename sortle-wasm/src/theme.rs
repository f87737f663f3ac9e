use web_sys::{Document, Window};

use crate::constants::THEME_STORAGE_KEY;

const DARK: &str = "dark";
const LIGHT: &str = "light";

/// Stored choice first, then the system preference.
fn prefers_dark(window: &Window) -> bool {
    let stored = window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten());
    match stored.as_deref() {
        Some(DARK) => true,
        Some(LIGHT) => false,
        _ => window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .map(|m| m.matches())
            .unwrap_or(false),
    }
}

fn apply(document: &Document, dark: bool) {
    if let Some(root) = document.document_element() {
        let _ = root.class_list().toggle_with_force(DARK, dark);
    }
}

pub fn init_theme(window: &Window, document: &Document) {
    apply(document, prefers_dark(window));
}

/// Flip the theme and remember the choice.
pub fn toggle_theme(window: &Window, document: &Document) {
    let dark = document
        .document_element()
        .map(|root| root.class_list().contains(DARK))
        .unwrap_or(false);
    apply(document, !dark);
    if let Ok(Some(storage)) = window.local_storage() {
        let _ = storage.set_item(THEME_STORAGE_KEY, if dark { LIGHT } else { DARK });
    }
}
