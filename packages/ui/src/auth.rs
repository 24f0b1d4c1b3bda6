//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] builds the one [`AuthService`] of the app and shares it
//! through context as an [`AuthHandle`]. It also owns the background work the
//! service cannot do on its own: mirroring the current user into a signal,
//! running the idle timer, and listening to the browser window.

use std::sync::Arc;
use std::time::Duration;

use api::{ApiClient, AuthService};
use dioxus::prelude::*;
use store::{AdminConfig, SessionStore, User};

use crate::window;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type AppStorage = store::BrowserStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type AppStorage = store::MemoryStorage;

pub type AppAuth = AuthService<AppStorage, ApiClient>;

pub const SESSION_EXPIRED: &str =
    "Your session has expired. You will be logged out for security.";

fn app_session() -> SessionStore<AppStorage> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        SessionStore::new(store::BrowserStorage::local(), store::BrowserStorage::session())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        SessionStore::new(store::MemoryStorage::new(), store::MemoryStorage::new())
    }
}

async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Shared access to the auth service and the backend client.
#[derive(Clone)]
pub struct AuthHandle {
    service: Arc<AppAuth>,
    client: ApiClient,
}

impl AuthHandle {
    pub fn new(config: &AdminConfig) -> Self {
        let client = ApiClient::new(config);
        let service = AuthService::new(app_session(), client.clone(), config.idle_timeout());
        Self {
            service: Arc::new(service),
            client,
        }
    }

    pub fn service(&self) -> &AppAuth {
        &self.service
    }

    /// Client carrying the current session's bearer token.
    pub fn api(&self) -> ApiClient {
        self.client.with_bearer(self.service.token())
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// One-off message for the login page, e.g. after an idle logout.
    pub notice: Option<String>,
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_auth_handle() -> AuthHandle {
    use_context::<AuthHandle>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(config: AdminConfig, children: Element) -> Element {
    let handle = use_context_provider(|| AuthHandle::new(&config));
    let mut auth_state = use_signal(|| AuthState {
        user: handle.service().current_user(),
        notice: None,
    });

    // Mirror the service's current user into the signal.
    use_hook(|| {
        let handle = handle.clone();
        spawn(async move {
            let mut users = handle.service().subscribe();
            while users.changed().await.is_ok() {
                let user = users.borrow_and_update().clone();
                tracing::debug!("Current user changed: {:?}", user.as_ref().map(|u| &u.email));
                auth_state.with_mut(|state| state.user = user);
            }
        });
    });

    // A single task sleeps on whichever idle ticket is current.
    use_hook(|| {
        let handle = handle.clone();
        spawn(async move {
            handle
                .service()
                .watch_idle(sleep, move || {
                    auth_state.with_mut(|state| state.notice = Some(SESSION_EXPIRED.to_string()));
                })
                .await;
        });
    });

    use_hook(|| {
        let unload = handle.clone();
        window::on_before_unload(move || unload.service().clear_on_unload());

        let visibility = handle.clone();
        window::on_visibility_change(move |hidden| visibility.service().observe_visibility(hidden));
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}
