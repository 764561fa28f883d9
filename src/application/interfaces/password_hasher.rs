use anyhow::Result;
use mockall::automock;

/// One-way password hashing. Deliberately expensive; callers must validate
/// input before paying the cost.
#[automock]
pub trait PasswordHasher: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;
    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool>;
}
