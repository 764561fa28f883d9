use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::users::{RegisterUserEntity, UserEntity};

#[async_trait]
#[automock]
pub trait UserRepository {
    async fn count_users_by_email(&self, email: &str) -> Result<i64>;
    async fn insert_user(&self, user: RegisterUserEntity) -> Result<()>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>>;
}
