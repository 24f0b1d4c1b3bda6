//! Route guards consulted before the admin dashboard renders.

pub const LOGIN_ROUTE: &str = "/dashboard/login";
pub const ADMIN_ROUTE: &str = "/dashboard/admin";

/// What the router should do with a navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// The two questions guards ask about the session.
pub trait SessionState {
    fn is_authenticated(&self) -> bool;
    fn is_admin(&self) -> bool;
}

/// Allow iff the session holds a valid token.
pub fn auth_guard(session: &impl SessionState) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(LOGIN_ROUTE)
    }
}

/// Allow iff the session is valid and belongs to an admin.
pub fn admin_guard(session: &impl SessionState) -> GuardDecision {
    let is_authenticated = session.is_authenticated();
    let is_admin = session.is_admin();
    tracing::debug!(is_authenticated, is_admin, "Admin guard check");

    if is_authenticated && is_admin {
        GuardDecision::Allow
    } else {
        tracing::info!("Admin guard denied access, redirecting to {LOGIN_ROUTE}");
        GuardDecision::Redirect(LOGIN_ROUTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Fixed {
        authenticated: bool,
        admin: bool,
    }

    impl SessionState for Fixed {
        fn is_authenticated(&self) -> bool {
            self.authenticated
        }

        fn is_admin(&self) -> bool {
            self.admin
        }
    }

    #[rstest]
    #[case(false, false, false, false)]
    #[case(false, true, false, false)]
    #[case(true, false, true, false)]
    #[case(true, true, true, true)]
    fn guard_table(
        #[case] authenticated: bool,
        #[case] admin: bool,
        #[case] auth_allows: bool,
        #[case] admin_allows: bool,
    ) {
        let session = Fixed {
            authenticated,
            admin,
        };
        assert_eq!(auth_guard(&session).is_allowed(), auth_allows);
        assert_eq!(admin_guard(&session).is_allowed(), admin_allows);
        if !admin_allows {
            assert_eq!(admin_guard(&session), GuardDecision::Redirect(LOGIN_ROUTE));
        }
    }
}
