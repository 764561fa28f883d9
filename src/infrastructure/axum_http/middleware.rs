use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::{
    application::authorization::{self, AuthorizationDecision},
    config::config_model::DotEnvyConfig,
    domain::value_objects::iam::SessionState,
    infrastructure::axum_http::session,
};

/// Runs the authorization gate before every routed request. `/api` routes
/// (liveness and similar) are never gated, and neither is sign-out: the gate
/// would otherwise bounce an authenticated sign-out back to the dashboard.
pub async fn authorize_request(
    State(config): State<Arc<DotEnvyConfig>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if path.starts_with("/api") || path == "/logout" {
        return next.run(request).await;
    }

    let session_state = session::session_from_cookies(&jar, &config.session.jwt_secret);

    match apply_gate(request, session_state, &path) {
        Ok(request) => next.run(request).await,
        Err(response) => response,
    }
}

/// On Allow the request proceeds carrying the decoded `SessionState` in its
/// extensions, so handlers never re-decode the cookie.
fn apply_gate(
    mut request: Request,
    session_state: SessionState,
    path: &str,
) -> Result<Request, Response> {
    match authorization::authorize(&session_state, path) {
        AuthorizationDecision::Allow => {
            request.extensions_mut().insert(session_state);
            Ok(request)
        }
        AuthorizationDecision::DenyToLogin => {
            debug!(%path, "gate: anonymous dashboard request denied");
            Err(Redirect::to(authorization::LOGIN_PATH).into_response())
        }
        AuthorizationDecision::RedirectToDashboard => {
            debug!(%path, "gate: authenticated user sent back to dashboard");
            Err(Redirect::to(authorization::DASHBOARD_PATH).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::iam::UserProfile;
    use axum::{body::Body, http::StatusCode};
    use uuid::Uuid;

    fn request(path: &str) -> Request {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    fn logged_in() -> SessionState {
        SessionState {
            user: Some(UserProfile {
                id: Uuid::new_v4(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            }),
        }
    }

    #[test]
    fn allowed_request_carries_the_session_in_extensions() {
        let session_state = logged_in();
        let user_id = session_state.user.as_ref().unwrap().id;

        let request = apply_gate(request("/dashboard/invoices"), session_state, "/dashboard/invoices")
            .expect("authenticated dashboard request should pass the gate");

        let carried = request
            .extensions()
            .get::<SessionState>()
            .expect("session state should ride in the request extensions");
        assert_eq!(carried.user.as_ref().unwrap().id, user_id);
    }

    #[test]
    fn denied_request_redirects_to_login() {
        let response = apply_gate(
            request("/dashboard/invoices"),
            SessionState::default(),
            "/dashboard/invoices",
        )
        .unwrap_err();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()["location"],
            authorization::LOGIN_PATH
        );
    }

    #[test]
    fn authenticated_public_request_redirects_to_dashboard() {
        let response = apply_gate(request("/login"), logged_in(), "/login").unwrap_err();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()["location"],
            authorization::DASHBOARD_PATH
        );
    }

    #[test]
    fn anonymous_public_request_passes_without_a_user() {
        let request = apply_gate(request("/login"), SessionState::default(), "/login")
            .expect("anonymous public request should pass the gate");

        let carried = request.extensions().get::<SessionState>().unwrap();
        assert!(carried.user.is_none());
    }
}
