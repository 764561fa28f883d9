use crate::domain::value_objects::iam::SessionState;

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Allow,
    DenyToLogin,
    RedirectToDashboard,
}

/// Per-request gate, evaluated before any handler runs. Dashboard routes
/// require a session; an authenticated user asking for a public page is sent
/// back to the dashboard instead. Deterministic in (session, path) alone.
pub fn authorize(session: &SessionState, path: &str) -> AuthorizationDecision {
    let is_on_dashboard = path.starts_with(DASHBOARD_PATH);
    if is_on_dashboard {
        if session.is_logged_in() {
            AuthorizationDecision::Allow
        } else {
            AuthorizationDecision::DenyToLogin
        }
    } else if session.is_logged_in() {
        AuthorizationDecision::RedirectToDashboard
    } else {
        AuthorizationDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::iam::UserProfile;
    use uuid::Uuid;

    fn logged_in() -> SessionState {
        SessionState {
            user: Some(UserProfile {
                id: Uuid::new_v4(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            }),
        }
    }

    fn anonymous() -> SessionState {
        SessionState::default()
    }

    #[test]
    fn denies_anonymous_dashboard_request() {
        assert_eq!(
            authorize(&anonymous(), "/dashboard/invoices"),
            AuthorizationDecision::DenyToLogin
        );
    }

    #[test]
    fn allows_authenticated_dashboard_request() {
        assert_eq!(
            authorize(&logged_in(), "/dashboard"),
            AuthorizationDecision::Allow
        );
    }

    #[test]
    fn bounces_authenticated_user_off_public_pages() {
        assert_eq!(
            authorize(&logged_in(), "/login"),
            AuthorizationDecision::RedirectToDashboard
        );
    }

    #[test]
    fn allows_anonymous_public_request() {
        assert_eq!(
            authorize(&anonymous(), "/login"),
            AuthorizationDecision::Allow
        );
    }
}
