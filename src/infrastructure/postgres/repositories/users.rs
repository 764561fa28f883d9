use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{OptionalExtension, insert_into, prelude::*};

use crate::{
    domain::{
        entities::users::{RegisterUserEntity, UserEntity},
        repositories::users::UserRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::users},
};

pub struct UserPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for UserPostgres {
    async fn count_users_by_email(&self, email: &str) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = users::table
            .filter(users::email.eq(email))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn insert_user(&self, user: RegisterUserEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Conflict backstop behind the explicit duplicate-email check.
        insert_into(users::table)
            .values(&user)
            .on_conflict(users::id)
            .do_nothing()
            .execute(&mut conn)?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let user = users::table
            .filter(users::email.eq(email))
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(user)
    }
}
