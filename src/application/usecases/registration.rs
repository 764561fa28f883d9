use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    application::{interfaces::password_hasher::PasswordHasher, validation},
    domain::{
        entities::users::RegisterUserEntity, repositories::users::UserRepository,
        value_objects::iam::SignupFormData,
    },
};

/// Outcome of a signup attempt. The HTTP surface shows `message()` only;
/// the kind exists so behavior stays assertable without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Success,
    ValidationError,
    DuplicateEmail,
    UnknownError,
}

impl RegistrationOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            RegistrationOutcome::Success => {
                "You have successfully created an account, Please proceed to login!"
            }
            RegistrationOutcome::ValidationError => {
                "Error: Please type in valid Email and Password."
            }
            RegistrationOutcome::DuplicateEmail => "Email Already Present",
            RegistrationOutcome::UnknownError => "Error: Something went wrong.",
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RegistrationOutcome::Success => "success",
            RegistrationOutcome::ValidationError => "validation_error",
            RegistrationOutcome::DuplicateEmail => "duplicate_email",
            RegistrationOutcome::UnknownError => "unknown_error",
        }
    }
}

pub struct RegistrationUseCase<U, H>
where
    U: UserRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    user_repo: Arc<U>,
    password_hasher: Arc<H>,
}

impl<U, H> RegistrationUseCase<U, H>
where
    U: UserRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
{
    pub fn new(user_repo: Arc<U>, password_hasher: Arc<H>) -> Self {
        Self {
            user_repo,
            password_hasher,
        }
    }

    /// Always resolves to an outcome; registration never raises. Duplicate
    /// email is a business-rule rejection checked before the insert, with the
    /// insert itself conflict-guarded as a backstop.
    pub async fn register(&self, form: SignupFormData) -> RegistrationOutcome {
        let validated = match validation::validate_registration(&form) {
            Ok(validated) => validated,
            Err(errors) => {
                warn!(
                    field_count = errors.len(),
                    "registration: signup rejected by validation"
                );
                return RegistrationOutcome::ValidationError;
            }
        };

        let password_hash = match self.password_hasher.hash_password(&validated.password) {
            Ok(hash) => hash,
            Err(err) => {
                error!(error = ?err, "registration: password hashing failed");
                return RegistrationOutcome::UnknownError;
            }
        };

        match self.user_repo.count_users_by_email(&validated.email).await {
            Ok(count) if count > 0 => {
                info!("registration: email already present");
                return RegistrationOutcome::DuplicateEmail;
            }
            Ok(_) => {}
            Err(err) => {
                error!(db_error = ?err, "registration: duplicate-email lookup failed");
                return RegistrationOutcome::UnknownError;
            }
        }

        let register_entity = RegisterUserEntity {
            name: validated.name,
            email: validated.email,
            password_hash,
        };

        if let Err(err) = self.user_repo.insert_user(register_entity).await {
            error!(db_error = ?err, "registration: insert failed");
            return RegistrationOutcome::UnknownError;
        }

        info!("registration: account created");
        RegistrationOutcome::Success
    }
}
