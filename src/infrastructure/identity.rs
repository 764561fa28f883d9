use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::{
    application::interfaces::{
        identity::{IdentityError, IdentityGateway, SignedInSession},
        password_hasher::PasswordHasher,
    },
    config::config_model::Session as SessionConfig,
    domain::{
        repositories::users::UserRepository,
        value_objects::iam::{LoginFormData, UserProfile},
    },
    infrastructure::axum_http::session,
};

/// The "credentials" sign-in strategy: look the user up by email, verify the
/// stored hash, mint a session token. An unknown email and a wrong password
/// are indistinguishable to the caller.
pub struct CredentialsIdentity<U, H>
where
    U: UserRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    user_repo: Arc<U>,
    password_hasher: Arc<H>,
    session_config: SessionConfig,
}

impl<U, H> CredentialsIdentity<U, H>
where
    U: UserRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    pub fn new(user_repo: Arc<U>, password_hasher: Arc<H>, session_config: SessionConfig) -> Self {
        Self {
            user_repo,
            password_hasher,
            session_config,
        }
    }
}

#[async_trait]
impl<U, H> IdentityGateway for CredentialsIdentity<U, H>
where
    U: UserRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    async fn sign_in_with_credentials(
        &self,
        credentials: LoginFormData,
    ) -> Result<SignedInSession, IdentityError> {
        let user = self
            .user_repo
            .find_by_email(&credentials.email)
            .await
            .map_err(IdentityError::Fault)?
            .ok_or(IdentityError::CredentialsSignin)?;

        let password_matches = self
            .password_hasher
            .verify_password(&credentials.password, &user.password_hash)
            .map_err(|err| {
                warn!(error = ?err, "identity: stored hash could not be verified");
                IdentityError::CredentialsSignin
            })?;
        if !password_matches {
            return Err(IdentityError::CredentialsSignin);
        }

        let profile = UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
        };
        let token = session::encode_session_token(&profile, &self.session_config)
            .map_err(|err| IdentityError::Configuration(err.to_string()))?;

        Ok(SignedInSession {
            token,
            user: profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::interfaces::password_hasher::MockPasswordHasher,
        domain::{entities::users::UserEntity, repositories::users::MockUserRepository},
    };
    use uuid::Uuid;

    fn session_config() -> SessionConfig {
        SessionConfig {
            jwt_secret: "supersecretjwtsecretforunittesting123".to_string(),
            ttl_seconds: 3600,
        }
    }

    fn stored_user() -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    fn credentials(password: &str) -> LoginFormData {
        LoginFormData {
            email: "ada@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn unknown_email_is_a_credentials_failure() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email()
            .returning(|_| Box::pin(async { Ok(None) }));

        let identity = CredentialsIdentity::new(
            Arc::new(user_repo),
            Arc::new(MockPasswordHasher::new()),
            session_config(),
        );

        let err = identity
            .sign_in_with_credentials(credentials("secret1"))
            .await
            .unwrap_err();

        assert!(matches!(err, IdentityError::CredentialsSignin));
    }

    #[tokio::test]
    async fn wrong_password_is_a_credentials_failure() {
        let mut user_repo = MockUserRepository::new();
        let mut password_hasher = MockPasswordHasher::new();

        user_repo
            .expect_find_by_email()
            .returning(|_| Box::pin(async { Ok(Some(stored_user())) }));
        password_hasher
            .expect_verify_password()
            .returning(|_, _| Ok(false));

        let identity = CredentialsIdentity::new(
            Arc::new(user_repo),
            Arc::new(password_hasher),
            session_config(),
        );

        let err = identity
            .sign_in_with_credentials(credentials("wrong"))
            .await
            .unwrap_err();

        assert!(matches!(err, IdentityError::CredentialsSignin));
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_a_fault_not_a_rejection() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_email()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("connection refused")) }));

        let identity = CredentialsIdentity::new(
            Arc::new(user_repo),
            Arc::new(MockPasswordHasher::new()),
            session_config(),
        );

        let err = identity
            .sign_in_with_credentials(credentials("secret1"))
            .await
            .unwrap_err();

        assert!(matches!(err, IdentityError::Fault(_)));
    }

    #[tokio::test]
    async fn matching_password_mints_a_session() {
        let mut user_repo = MockUserRepository::new();
        let mut password_hasher = MockPasswordHasher::new();
        let user = stored_user();
        let user_id = user.id;

        user_repo.expect_find_by_email().returning(move |_| {
            let user = user.clone();
            Box::pin(async move { Ok(Some(user)) })
        });
        password_hasher
            .expect_verify_password()
            .withf(|password, hash| password == "secret1" && hash == "$argon2id$stub")
            .returning(|_, _| Ok(true));

        let identity = CredentialsIdentity::new(
            Arc::new(user_repo),
            Arc::new(password_hasher),
            session_config(),
        );

        let session = identity
            .sign_in_with_credentials(credentials("secret1"))
            .await
            .unwrap();

        assert_eq!(session.user.id, user_id);
        let claims =
            session::decode_session_token(&session.token, &session_config().jwt_secret).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
    }
}
