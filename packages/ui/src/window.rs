//! Browser window hooks: tab close, visibility changes and `confirm()`.
//!
//! Off the web every function is a no-op, and [`confirm_dialog`] answers yes.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

/// Run `on_unload` when the tab is about to close.
#[cfg(target_arch = "wasm32")]
pub fn on_before_unload(on_unload: impl Fn() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::wrap(Box::new(move |_: web_sys::Event| on_unload())
        as Box<dyn FnMut(web_sys::Event)>);
    if window
        .add_event_listener_with_callback("beforeunload", callback.as_ref().unchecked_ref())
        .is_err()
    {
        tracing::warn!("Failed to install beforeunload listener");
    }
    callback.forget();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn on_before_unload(_on_unload: impl Fn() + 'static) {}

/// Run `on_change(hidden)` whenever the tab is hidden or shown again.
#[cfg(target_arch = "wasm32")]
pub fn on_visibility_change(on_change: impl Fn(bool) + 'static) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let target = document.clone();
    let callback = Closure::wrap(Box::new(move |_: web_sys::Event| on_change(target.hidden()))
        as Box<dyn FnMut(web_sys::Event)>);
    if document
        .add_event_listener_with_callback("visibilitychange", callback.as_ref().unchecked_ref())
        .is_err()
    {
        tracing::warn!("Failed to install visibilitychange listener");
    }
    callback.forget();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn on_visibility_change(_on_change: impl Fn(bool) + 'static) {}

/// Blocking `window.confirm(message)`. A missing window counts as a refusal.
#[cfg(target_arch = "wasm32")]
pub fn confirm_dialog(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn confirm_dialog(message: &str) -> bool {
    tracing::debug!("Auto-confirming: {message}");
    true
}
