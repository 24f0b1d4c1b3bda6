use api::{admin_guard, auth_guard, GuardDecision};
use dioxus::prelude::*;

use crate::{use_auth, use_auth_handle};

/// Renders `children` only for an authenticated admin.
///
/// Otherwise `on_denied` receives the route to redirect to. The gate re-runs
/// whenever the current user changes, so a logout anywhere closes it.
#[component]
pub fn AdminGate(on_denied: EventHandler<&'static str>, children: Element) -> Element {
    let auth = use_auth();
    let handle = use_auth_handle();

    // Subscribe to user changes.
    let _user = auth.read().user.clone();

    let decision = match auth_guard(handle.service()) {
        GuardDecision::Allow => admin_guard(handle.service()),
        denied => denied,
    };

    match decision {
        GuardDecision::Allow => rsx! {
            {children}
        },
        GuardDecision::Redirect(route) => {
            on_denied.call(route);
            rsx! {}
        }
    }
}
