use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::value_objects::iam::{LoginFormData, UserProfile};

/// The failure family of the identity capability. Only these kinds get a
/// friendly login-page message; `Fault` carries anything the auth layer does
/// not recognize and must be re-raised by callers, never masked.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid credentials")]
    CredentialsSignin,
    #[error("sign-in configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Fault(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct SignedInSession {
    pub token: String,
    pub user: UserProfile,
}

#[async_trait]
#[automock]
pub trait IdentityGateway: Send + Sync {
    /// Verify credentials and mint a session (the "credentials" strategy).
    async fn sign_in_with_credentials(
        &self,
        credentials: LoginFormData,
    ) -> Result<SignedInSession, IdentityError>;
}
