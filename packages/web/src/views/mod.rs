mod login;
pub use login::Login;

mod admin;
pub use admin::Admin;

use dioxus::prelude::*;

use crate::Route;

/// Unknown paths land on the login page.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    tracing::debug!("No route for /{}, redirecting to login", segments.join("/"));
    let nav = use_navigator();
    nav.replace(Route::Login {});
    rsx! {}
}
