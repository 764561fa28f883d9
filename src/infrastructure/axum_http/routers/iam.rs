use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::post,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use tracing::error;

use crate::{
    application::{
        authorization::{DASHBOARD_PATH, LOGIN_PATH},
        usecases::{
            authentication::{AuthenticationOutcome, AuthenticationUseCase},
            registration::RegistrationUseCase,
        },
    },
    config::config_model::DotEnvyConfig,
    domain::value_objects::iam::{LoginFormData, SignupFormData},
    infrastructure::{
        axum_http::{error_responses::AppError, session::SESSION_COOKIE},
        hashing::Argon2PasswordHasher,
        identity::CredentialsIdentity,
        postgres::{postgres_connection::PgPoolSquad, repositories::users::UserPostgres},
    },
};

pub struct IamState {
    registration: RegistrationUseCase<UserPostgres, Argon2PasswordHasher>,
    authentication:
        AuthenticationUseCase<CredentialsIdentity<UserPostgres, Argon2PasswordHasher>>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>, config: Arc<DotEnvyConfig>) -> Router {
    let user_repository = Arc::new(UserPostgres::new(Arc::clone(&db_pool)));
    let password_hasher = Arc::new(Argon2PasswordHasher);

    let registration =
        RegistrationUseCase::new(Arc::clone(&user_repository), Arc::clone(&password_hasher));
    let identity =
        CredentialsIdentity::new(user_repository, password_hasher, config.session.clone());
    let authentication = AuthenticationUseCase::new(Arc::new(identity));

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .with_state(Arc::new(IamState {
            registration,
            authentication,
        }))
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub kind: &'static str,
    pub message: &'static str,
}

/// Signup always answers 200 with the outcome message; success and failure
/// share the channel.
pub async fn signup(
    State(state): State<Arc<IamState>>,
    Form(form): Form<SignupFormData>,
) -> impl IntoResponse {
    let outcome = state.registration.register(form).await;
    Json(SignupResponse {
        kind: outcome.kind(),
        message: outcome.message(),
    })
}

pub async fn login(
    State(state): State<Arc<IamState>>,
    jar: CookieJar,
    Form(form): Form<LoginFormData>,
) -> Response {
    match state.authentication.authenticate(form).await {
        Ok(AuthenticationOutcome::SignedIn(session)) => {
            let cookie = Cookie::build((SESSION_COOKIE, session.token))
                .path("/")
                .http_only(true)
                .build();
            (jar.add(cookie), Redirect::to(DASHBOARD_PATH)).into_response()
        }
        Ok(AuthenticationOutcome::Rejected(message)) => {
            (StatusCode::UNAUTHORIZED, message).into_response()
        }
        Err(err) => {
            error!(error = ?err, "auth: sign-in fault");
            AppError::Internal(err).into_response()
        }
    }
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), Redirect::to(LOGIN_PATH))
}
