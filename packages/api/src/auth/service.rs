//! # Auth service: the admin session
//!
//! [`AuthService`] is the single owner of the client-side session. The
//! composition root builds one, shares it (behind an `Arc`) with every view,
//! and nothing else reads or writes the session keys directly.
//!
//! ## State
//!
//! | Piece | Where | Notes |
//! |-------|-------|-------|
//! | Token + user | [`SessionStore`] | Persisted on login, removed on any logout |
//! | Current user | `watch` channel | Published on login/restore, cleared on logout |
//! | Idle timer | [`IdleTimer`] | Armed on login/restore, cancelled on logout |
//!
//! ## Lifecycle
//!
//! - **restore** (construction): a stored token + user pair is published as
//!   the current user; a user record that does not parse clears everything.
//! - **login / register**: a `{success: true, token, user}` answer persists the
//!   session, publishes the user and arms the idle timer. Any other answer is
//!   handed back untouched; only transport failures are `Err`.
//! - **validity**: [`store::is_token_valid`] is the pure check;
//!   [`AuthService::is_authenticated`] runs it and logs out on failure.
//! - **logout**: clears storage, the current user and the idle timer. Routing
//!   back to the login page is the caller's job.
//! - **force logout**: logout plus a best-effort server-side logout whose
//!   failure is only logged.
//! - **idle expiry**: [`AuthService::watch_idle`] runs as one long-lived UI
//!   task. It sleeps on the current [`IdleTicket`], starts over whenever the
//!   timer is re-armed or cancelled, and hands an elapsed ticket to
//!   [`AuthService::expire_idle`].

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::future::{select, Either};
use store::{current_timestamp, is_token_valid, KeyValueStorage, SessionStore, User};
use tokio::sync::watch;

use crate::auth::backend::AuthBackend;
use crate::auth::guard::SessionState;
use crate::auth::idle::{IdleTicket, IdleTimer};
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginCredentials, RegisterData};

pub struct AuthService<S: KeyValueStorage, B: AuthBackend> {
    session: SessionStore<S>,
    backend: B,
    current_user: watch::Sender<Option<User>>,
    idle: IdleTimer,
}

impl<S: KeyValueStorage, B: AuthBackend> AuthService<S, B> {
    /// Build the service and restore any session left in storage.
    pub fn new(session: SessionStore<S>, backend: B, idle_timeout: Duration) -> Self {
        let (current_user, _) = watch::channel(None);
        let service = Self {
            session,
            backend,
            current_user,
            idle: IdleTimer::new(idle_timeout),
        };
        service.restore();
        service
    }

    fn restore(&self) {
        let Some(_token) = self.session.token() else {
            return;
        };
        match self.session.user() {
            Ok(Some(user)) => {
                tracing::info!("Restored session for {}", user.email);
                self.current_user.send_replace(Some(user));
                self.idle.arm();
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Discarding stored session: {e}");
                self.logout();
            }
        }
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        tracing::info!("Logging in {}", credentials.email);
        let response = self.backend.login(credentials).await?;
        if !self.establish(&response) {
            tracing::info!("Login refused: {:?}", response.message);
        }
        Ok(response)
    }

    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse, ApiError> {
        tracing::info!("Registering {}", data.email);
        let response = self.backend.register(data).await?;
        self.establish(&response);
        Ok(response)
    }

    /// Persist and publish the session carried by `response`, if any.
    fn establish(&self, response: &AuthResponse) -> bool {
        let Some((token, user)) = response.session() else {
            return false;
        };
        if let Err(e) = self.session.persist(token, user) {
            tracing::error!("Failed to persist session: {e}");
            return false;
        }
        self.current_user.send_replace(Some(user.clone()));
        self.idle.arm();
        tracing::info!("Session established for {} ({})", user.email, user.role);
        true
    }

    /// Whether a stored token exists and has not expired.
    ///
    /// An expired or undecodable token ends the session as a side effect.
    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.session.token() else {
            return false;
        };
        if is_token_valid(&token, current_timestamp()) {
            return true;
        }
        tracing::info!("Stored token is expired or malformed, ending session");
        self.logout();
        false
    }

    pub fn is_admin(&self) -> bool {
        self.current_user
            .borrow()
            .as_ref()
            .is_some_and(User::is_admin)
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user.borrow().clone()
    }

    /// Role of the current user, empty when logged out.
    pub fn role(&self) -> String {
        self.current_user
            .borrow()
            .as_ref()
            .map(|user| user.role.clone())
            .unwrap_or_default()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Receiver notified whenever the current user changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current_user.subscribe()
    }

    /// Receiver of idle timer tickets, for the task that sleeps on them.
    pub fn idle_tickets(&self) -> watch::Receiver<Option<IdleTicket>> {
        self.idle.subscribe()
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle.duration()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Restart the idle timer. Does nothing without a valid session.
    pub fn reset_idle_timeout(&self) {
        if self.is_authenticated() {
            self.idle.arm();
        }
    }

    /// Called when the sleep for `ticket` completes.
    ///
    /// Returns `true` when the session was terminated.
    pub async fn expire_idle(&self, ticket: IdleTicket) -> bool {
        if !self.idle.is_current(ticket) {
            return false;
        }
        if !self.is_authenticated() {
            self.idle.cancel();
            return false;
        }
        tracing::info!("Session idle for {:?}, logging out", ticket.duration());
        self.force_logout().await;
        true
    }

    /// Drive idle expiry with the platform's `sleep`. Only one sleep is ever
    /// pending; a re-arm or cancel drops it and starts over. `on_expired` runs
    /// after each idle logout.
    pub async fn watch_idle<F, Fut>(&self, sleep: F, mut on_expired: impl FnMut())
    where
        F: Fn(Duration) -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut tickets = self.idle.subscribe();
        loop {
            let current = *tickets.borrow_and_update();
            if let Some(ticket) = current {
                let elapsed = {
                    let expiry = pin!(sleep(ticket.duration()));
                    let rearmed = pin!(tickets.changed());
                    match select(expiry, rearmed).await {
                        Either::Left(_) => true,
                        Either::Right((changed, _)) => {
                            if changed.is_err() {
                                return;
                            }
                            false
                        }
                    }
                };
                if !elapsed {
                    continue;
                }
                if self.expire_idle(ticket).await {
                    on_expired();
                }
            }
            if tickets.changed().await.is_err() {
                return;
            }
        }
    }

    /// Tab visibility is only logged. The session stays as it is, even when
    /// the stored token has expired in the meantime.
    pub fn observe_visibility(&self, hidden: bool) {
        if hidden && self.session.token().is_some() {
            tracing::debug!("Tab hidden with a session in place");
        }
    }

    pub fn logout(&self) {
        self.idle.cancel();
        self.session.clear();
        self.current_user.send_replace(None);
        tracing::info!("Session cleared");
    }

    /// Logout, then tell the backend. A failed server-side logout is ignored.
    pub async fn force_logout(&self) {
        let token = self.session.token();
        self.logout();
        match self.backend.logout(token).await {
            Ok(()) => tracing::debug!("Server logout acknowledged"),
            Err(e) => tracing::warn!("Server logout failed: {e}"),
        }
    }

    /// Tab is closing: drop the persisted session if one is active.
    pub fn clear_on_unload(&self) {
        if self.is_authenticated() {
            tracing::info!("Window closing, clearing session");
            self.session.clear_on_unload();
        }
    }
}

impl<S: KeyValueStorage, B: AuthBackend> SessionState for AuthService<S, B> {
    fn is_authenticated(&self) -> bool {
        AuthService::is_authenticated(self)
    }

    fn is_admin(&self) -> bool {
        AuthService::is_admin(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::guard::{admin_guard, auth_guard, GuardDecision, LOGIN_ROUTE};
    use crate::testing::{admin_user, token_expiring_in, FakeAuthBackend};
    use serde_json::json;
    use store::session::{SESSION_KEYS, TOKEN_KEY, USER_KEY};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use store::MemoryStorage;
    use tokio::sync::Notify;

    const TIMEOUT: Duration = Duration::from_secs(1800);

    struct Harness {
        auth: AuthService<MemoryStorage, FakeAuthBackend>,
        local: MemoryStorage,
        session: MemoryStorage,
    }

    fn harness_with(backend: FakeAuthBackend, local: MemoryStorage) -> Harness {
        let session = MemoryStorage::new();
        let store = SessionStore::new(local.clone(), session.clone());
        Harness {
            auth: AuthService::new(store, backend, TIMEOUT),
            local,
            session,
        }
    }

    fn harness(backend: FakeAuthBackend) -> Harness {
        harness_with(backend, MemoryStorage::new())
    }

    fn user_with_role(role: &str) -> User {
        User {
            role: role.into(),
            ..admin_user()
        }
    }

    fn success(token: String, user: User) -> AuthResponse {
        AuthResponse {
            success: true,
            token: Some(token),
            user: Some(user),
            message: None,
        }
    }

    fn creds() -> LoginCredentials {
        LoginCredentials::new("a@b.com", "secret")
    }

    #[tokio::test]
    async fn admin_login_establishes_session() {
        let token = token_expiring_in(3600);
        let h = harness(FakeAuthBackend::answering(success(token.clone(), admin_user())));
        let mut users = h.auth.subscribe();

        let response = h.auth.login(&creds()).await.unwrap();

        assert!(response.success);
        assert_eq!(h.local.get_item(TOKEN_KEY), Some(token));
        let stored: User = serde_json::from_str(&h.local.get_item(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored, admin_user());
        assert_eq!(h.auth.current_user(), Some(admin_user()));
        assert!(users.has_changed().unwrap());
        assert_eq!(*users.borrow_and_update(), Some(admin_user()));
        assert!(h.auth.is_authenticated());
        assert!(h.auth.is_admin());
        assert_eq!(admin_guard(&h.auth), GuardDecision::Allow);
        assert!(h.auth.idle_tickets().borrow().is_some());
        assert_eq!(h.auth.backend().logins(), vec!["a@b.com".to_string()]);
    }

    #[tokio::test]
    async fn non_admin_login_is_denied_by_admin_guard() {
        let h = harness(FakeAuthBackend::answering(success(
            token_expiring_in(3600),
            user_with_role("user"),
        )));

        let response = h.auth.login(&creds()).await.unwrap();

        assert!(response.success);
        assert_eq!(auth_guard(&h.auth), GuardDecision::Allow);
        assert_eq!(admin_guard(&h.auth), GuardDecision::Redirect(LOGIN_ROUTE));
    }

    #[tokio::test]
    async fn refused_login_is_a_value_not_an_error() {
        let h = harness(FakeAuthBackend::answering(AuthResponse::failure(
            "Invalid credentials",
        )));

        let response = h.auth.login(&creds()).await.unwrap();

        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Invalid credentials"));
        assert!(h.local.is_empty());
        assert!(h.auth.current_user().is_none());
        assert!(!h.auth.is_authenticated());
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        let h = harness(FakeAuthBackend::failing(ApiError::Unreachable(
            "connection refused".into(),
        )));

        let err = h.auth.login(&creds()).await.unwrap_err();

        assert_eq!(err.status(), 0);
        assert!(h.local.is_empty());
    }

    #[tokio::test]
    async fn success_without_user_does_not_establish_session() {
        let h = harness(FakeAuthBackend::answering(AuthResponse {
            success: true,
            token: Some(token_expiring_in(3600)),
            ..AuthResponse::default()
        }));

        h.auth.login(&creds()).await.unwrap();

        assert!(h.local.is_empty());
        assert!(h.auth.current_user().is_none());
    }

    #[tokio::test]
    async fn register_establishes_session() {
        let h = harness(FakeAuthBackend::answering(success(
            token_expiring_in(60),
            admin_user(),
        )));
        let data = RegisterData {
            name: "A".into(),
            email: "a@b.com".into(),
            password: "secret".into(),
        };

        h.auth.register(&data).await.unwrap();

        assert!(h.auth.is_authenticated());
        assert_eq!(h.auth.role(), "admin");
    }

    #[test]
    fn visibility_changes_leave_session_alone() {
        let local = MemoryStorage::new();
        local.set_item(TOKEN_KEY, &token_expiring_in(3600));
        local.set_item(USER_KEY, &serde_json::to_string(&admin_user()).unwrap());
        let h = harness_with(FakeAuthBackend::default(), local);
        let expired = token_expiring_in(-60);
        h.local.set_item(TOKEN_KEY, &expired);

        h.auth.observe_visibility(true);
        h.auth.observe_visibility(false);

        assert_eq!(h.local.get_item(TOKEN_KEY), Some(expired));
        assert_eq!(h.auth.current_user(), Some(admin_user()));
        assert!(h.auth.idle_tickets().borrow().is_some());
    }

    #[test]
    fn expired_token_clears_storage() {
        let local = MemoryStorage::new();
        local.set_item(TOKEN_KEY, &token_expiring_in(-60));
        local.set_item(USER_KEY, &serde_json::to_string(&admin_user()).unwrap());
        let h = harness_with(FakeAuthBackend::default(), local);
        assert_eq!(h.auth.current_user(), Some(admin_user()));

        assert!(!h.auth.is_authenticated());

        assert!(h.local.is_empty());
        assert!(h.auth.current_user().is_none());
        assert!(h.auth.idle_tickets().borrow().is_none());
    }

    #[test]
    fn valid_token_leaves_storage_untouched() {
        let local = MemoryStorage::new();
        let token = token_expiring_in(3600);
        local.set_item(TOKEN_KEY, &token);
        local.set_item(USER_KEY, &serde_json::to_string(&admin_user()).unwrap());
        let h = harness_with(FakeAuthBackend::default(), local);

        assert!(h.auth.is_authenticated());

        assert_eq!(h.local.get_item(TOKEN_KEY), Some(token));
        assert!(h.local.get_item(USER_KEY).is_some());
    }

    #[test]
    fn undecodable_token_clears_storage() {
        let local = MemoryStorage::new();
        local.set_item(TOKEN_KEY, "garbage");
        let h = harness_with(FakeAuthBackend::default(), local);

        assert!(!h.auth.is_authenticated());
        assert!(h.local.get_item(TOKEN_KEY).is_none());
    }

    #[test]
    fn malformed_stored_user_clears_session_on_restore() {
        let local = MemoryStorage::new();
        local.set_item(TOKEN_KEY, &token_expiring_in(3600));
        local.set_item(USER_KEY, "{broken");
        let h = harness_with(FakeAuthBackend::default(), local);

        assert!(h.local.is_empty());
        assert!(h.auth.current_user().is_none());
    }

    #[test]
    fn no_token_means_guards_redirect() {
        let h = harness(FakeAuthBackend::default());
        assert!(!h.auth.is_authenticated());
        assert_eq!(auth_guard(&h.auth), GuardDecision::Redirect(LOGIN_ROUTE));
        assert_eq!(admin_guard(&h.auth), GuardDecision::Redirect(LOGIN_ROUTE));
    }

    #[test]
    fn is_admin_follows_current_user_role() {
        for (role, expected) in [("admin", true), ("Admin", false), ("user", false), ("", false)] {
            let local = MemoryStorage::new();
            local.set_item(TOKEN_KEY, &token_expiring_in(3600));
            local.set_item(
                USER_KEY,
                &serde_json::to_string(&user_with_role(role)).unwrap(),
            );
            let h = harness_with(FakeAuthBackend::default(), local);
            assert_eq!(h.auth.is_admin(), expected, "role {role:?}");
        }
    }

    #[tokio::test]
    async fn logout_clears_everything() {
        let h = harness(FakeAuthBackend::answering(success(
            token_expiring_in(3600),
            admin_user(),
        )));
        h.auth.login(&creds()).await.unwrap();
        h.session.set_item(TOKEN_KEY, "copy");
        h.session.set_item(USER_KEY, "copy");

        h.auth.logout();

        for key in SESSION_KEYS {
            assert!(h.local.get_item(key).is_none());
            assert!(h.session.get_item(key).is_none());
        }
        assert!(h.auth.current_user().is_none());
        assert!(h.auth.role().is_empty());
        assert!(h.auth.idle_tickets().borrow().is_none());
        assert!(h.auth.backend().logouts().is_empty());
    }

    #[tokio::test]
    async fn force_logout_notifies_backend_with_token() {
        let token = token_expiring_in(3600);
        let h = harness(FakeAuthBackend::answering(success(token.clone(), admin_user())));
        h.auth.login(&creds()).await.unwrap();

        h.auth.force_logout().await;

        assert!(h.local.is_empty());
        assert_eq!(h.auth.backend().logouts(), vec![Some(token)]);
    }

    #[tokio::test]
    async fn force_logout_ignores_server_failure() {
        let local = MemoryStorage::new();
        local.set_item(TOKEN_KEY, &token_expiring_in(3600));
        local.set_item(USER_KEY, &serde_json::to_string(&admin_user()).unwrap());
        let backend = FakeAuthBackend::default().with_failing_logout();
        let h = harness_with(backend, local);

        h.auth.force_logout().await;

        assert!(h.local.is_empty());
        assert!(h.auth.current_user().is_none());
        assert_eq!(h.auth.backend().logouts().len(), 1);
    }

    #[tokio::test]
    async fn current_idle_ticket_forces_logout() {
        let h = harness(FakeAuthBackend::answering(success(
            token_expiring_in(3600),
            admin_user(),
        )));
        h.auth.login(&creds()).await.unwrap();
        let ticket = h.auth.idle_tickets().borrow().unwrap();
        assert_eq!(ticket.duration(), TIMEOUT);

        assert!(h.auth.expire_idle(ticket).await);

        assert!(h.auth.current_user().is_none());
        assert!(h.local.is_empty());
        assert_eq!(h.auth.backend().logouts().len(), 1);
    }

    #[tokio::test]
    async fn stale_idle_ticket_is_ignored() {
        let h = harness(FakeAuthBackend::answering(success(
            token_expiring_in(3600),
            admin_user(),
        )));
        h.auth.login(&creds()).await.unwrap();
        let stale = h.auth.idle_tickets().borrow().unwrap();

        h.auth.reset_idle_timeout();

        assert!(!h.auth.expire_idle(stale).await);
        assert!(h.auth.is_authenticated());
        let fresh = h.auth.idle_tickets().borrow().unwrap();
        assert_ne!(fresh, stale);
    }

    struct LiveSleep<'a>(&'a AtomicUsize);

    impl<'a> LiveSleep<'a> {
        fn start(live: &'a AtomicUsize) -> Self {
            live.fetch_add(1, Ordering::SeqCst);
            Self(live)
        }
    }

    impl Drop for LiveSleep<'_> {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn idle_watch_keeps_one_sleep_across_rearms() {
        let h = harness(FakeAuthBackend::answering(success(
            token_expiring_in(3600),
            admin_user(),
        )));
        h.auth.login(&creds()).await.unwrap();

        let fire = Notify::new();
        let started = AtomicUsize::new(0);
        let live = AtomicUsize::new(0);
        let expired = AtomicUsize::new(0);
        let (fire, started, live) = (&fire, &started, &live);
        let sleep = move |duration: Duration| {
            assert_eq!(duration, TIMEOUT);
            started.fetch_add(1, Ordering::SeqCst);
            let guard = LiveSleep::start(live);
            async move {
                fire.notified().await;
                drop(guard);
            }
        };
        let watch = h.auth.watch_idle(sleep, || {
            expired.fetch_add(1, Ordering::SeqCst);
        });

        let script = async {
            tokio::task::yield_now().await;
            assert_eq!(started.load(Ordering::SeqCst), 1);

            for _ in 0..3 {
                h.auth.reset_idle_timeout();
                tokio::task::yield_now().await;
            }
            assert_eq!(started.load(Ordering::SeqCst), 4);
            assert_eq!(live.load(Ordering::SeqCst), 1);
            assert_eq!(expired.load(Ordering::SeqCst), 0);
            assert!(h.auth.is_authenticated());

            fire.notify_one();
            tokio::task::yield_now().await;
            assert_eq!(expired.load(Ordering::SeqCst), 1);
            assert_eq!(live.load(Ordering::SeqCst), 0);
            assert!(h.auth.current_user().is_none());
            assert!(h.auth.idle_tickets().borrow().is_none());
        };

        match select(pin!(watch), pin!(script)).await {
            Either::Left(_) => panic!("idle watch ended while the service was alive"),
            Either::Right(_) => {}
        };
    }

    #[test]
    fn reset_without_session_does_not_arm() {
        let h = harness(FakeAuthBackend::default());
        h.auth.reset_idle_timeout();
        assert!(h.auth.idle_tickets().borrow().is_none());
    }

    #[test]
    fn restored_session_arms_idle_timer() {
        let local = MemoryStorage::new();
        local.set_item(TOKEN_KEY, &token_expiring_in(3600));
        local.set_item(USER_KEY, &serde_json::to_string(&admin_user()).unwrap());
        let h = harness_with(FakeAuthBackend::default(), local);
        assert!(h.auth.idle_tickets().borrow().is_some());
    }

    #[tokio::test]
    async fn unload_clears_only_when_authenticated() {
        let h = harness(FakeAuthBackend::default());
        h.session.set_item("draft", "kept");
        h.auth.clear_on_unload();
        assert_eq!(h.session.get_item("draft").as_deref(), Some("kept"));

        let h = harness(FakeAuthBackend::answering(success(
            token_expiring_in(3600),
            admin_user(),
        )));
        h.auth.login(&creds()).await.unwrap();
        h.session.set_item("draft", "gone");
        h.auth.clear_on_unload();
        assert!(h.local.is_empty());
        assert!(h.session.is_empty());
    }

    #[test]
    fn token_without_expiry_is_accepted() {
        let local = MemoryStorage::new();
        local.set_item(
            TOKEN_KEY,
            &store::token::unsigned_token(&json!({"id": "1"})),
        );
        let h = harness_with(FakeAuthBackend::default(), local);
        assert!(h.auth.is_authenticated());
    }
}
