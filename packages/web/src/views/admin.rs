use dioxus::prelude::*;
use ui::views::{AdminGate, AdminView};

use crate::Route;

/// Admin dashboard, reachable only through the admin gate.
#[component]
pub fn Admin() -> Element {
    let nav = use_navigator();

    rsx! {
        AdminGate {
            on_denied: move |route: &'static str| {
                nav.replace(route);
            },
            AdminView {
                on_logout: move |_| {
                    nav.replace(Route::Login {});
                },
            }
        }
    }
}
