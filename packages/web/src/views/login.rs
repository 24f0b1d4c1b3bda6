//! Login page view.

use api::admin_guard;
use dioxus::prelude::*;
use ui::use_auth_handle;
use ui::views::LoginView;

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let nav = use_navigator();
    let handle = use_auth_handle();

    // If already logged in as admin, go straight to the dashboard
    if admin_guard(handle.service()).is_allowed() {
        nav.replace(Route::Admin {});
    }

    rsx! {
        LoginView {
            on_admitted: move |_| {
                nav.push(Route::Admin {});
            },
        }
    }
}
