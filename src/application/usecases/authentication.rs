use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    application::interfaces::identity::{IdentityError, IdentityGateway, SignedInSession},
    domain::value_objects::iam::LoginFormData,
};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials.";
pub const GENERIC_AUTH_MESSAGE: &str = "Something went wrong.";

#[derive(Debug)]
pub enum AuthenticationOutcome {
    SignedIn(SignedInSession),
    Rejected(&'static str),
}

pub struct AuthenticationUseCase<I>
where
    I: IdentityGateway + 'static,
{
    identity: Arc<I>,
}

impl<I> AuthenticationUseCase<I>
where
    I: IdentityGateway + 'static,
{
    pub fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }

    /// Known auth failures collapse to a login-page message. A fault the
    /// identity layer does not recognize is re-raised for the surrounding
    /// infrastructure to handle.
    pub async fn authenticate(&self, credentials: LoginFormData) -> Result<AuthenticationOutcome> {
        match self.identity.sign_in_with_credentials(credentials).await {
            Ok(session) => {
                info!(user_id = %session.user.id, "auth: credentials sign-in succeeded");
                Ok(AuthenticationOutcome::SignedIn(session))
            }
            Err(IdentityError::CredentialsSignin) => {
                warn!("auth: invalid credentials");
                Ok(AuthenticationOutcome::Rejected(INVALID_CREDENTIALS_MESSAGE))
            }
            Err(IdentityError::Configuration(reason)) => {
                warn!(%reason, "auth: sign-in failed");
                Ok(AuthenticationOutcome::Rejected(GENERIC_AUTH_MESSAGE))
            }
            Err(IdentityError::Fault(err)) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::interfaces::identity::MockIdentityGateway,
        domain::value_objects::iam::UserProfile,
    };
    use uuid::Uuid;

    fn credentials() -> LoginFormData {
        LoginFormData {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn wrong_password_maps_to_invalid_credentials_message() {
        let mut identity = MockIdentityGateway::new();
        identity
            .expect_sign_in_with_credentials()
            .returning(|_| Box::pin(async { Err(IdentityError::CredentialsSignin) }));

        let outcome = AuthenticationUseCase::new(Arc::new(identity))
            .authenticate(credentials())
            .await
            .unwrap();

        match outcome {
            AuthenticationOutcome::Rejected(message) => {
                assert_eq!(message, "Invalid credentials.");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn known_auth_failure_maps_to_generic_message() {
        let mut identity = MockIdentityGateway::new();
        identity.expect_sign_in_with_credentials().returning(|_| {
            Box::pin(async { Err(IdentityError::Configuration("missing secret".to_string())) })
        });

        let outcome = AuthenticationUseCase::new(Arc::new(identity))
            .authenticate(credentials())
            .await
            .unwrap();

        match outcome {
            AuthenticationOutcome::Rejected(message) => {
                assert_eq!(message, "Something went wrong.");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unrecognized_fault_propagates_unchanged() {
        let mut identity = MockIdentityGateway::new();
        identity.expect_sign_in_with_credentials().returning(|_| {
            Box::pin(async {
                Err(IdentityError::Fault(anyhow::anyhow!(
                    "connection pool exhausted"
                )))
            })
        });

        let err = AuthenticationUseCase::new(Arc::new(identity))
            .authenticate(credentials())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "connection pool exhausted");
    }

    #[tokio::test]
    async fn successful_sign_in_returns_the_session() {
        let mut identity = MockIdentityGateway::new();
        let user_id = Uuid::new_v4();
        identity
            .expect_sign_in_with_credentials()
            .withf(|credentials| credentials.email == "ada@example.com")
            .returning(move |_| {
                Box::pin(async move {
                    Ok(SignedInSession {
                        token: "token".to_string(),
                        user: UserProfile {
                            id: user_id,
                            name: "Ada".to_string(),
                            email: "ada@example.com".to_string(),
                        },
                    })
                })
            });

        let outcome = AuthenticationUseCase::new(Arc::new(identity))
            .authenticate(credentials())
            .await
            .unwrap();

        match outcome {
            AuthenticationOutcome::SignedIn(session) => {
                assert_eq!(session.user.id, user_id);
                assert_eq!(session.token, "token");
            }
            other => panic!("expected sign-in, got {other:?}"),
        }
    }
}
