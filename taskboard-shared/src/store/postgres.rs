//! PostgreSQL store
//!
//! Thin adapter over the model queries: each trait method issues exactly
//! one statement and translates "no row" into [`StoreError::NotFound`].
//! Referential integrity and `ON DELETE SET NULL` come from the schema.

use super::{Entity, Store, StoreError, StoreResult};
use crate::db::pool::{self, PoolStats};
use crate::models::task::{NewTask, Task};
use crate::models::user::{NewUser, User};
use async_trait::async_trait;
use sqlx::PgPool;

/// Store backed by a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for shutdown and test fixtures
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(User::list(&self.pool).await?)
    }

    async fn get_user(&self, id: i64) -> StoreResult<User> {
        User::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::not_found(Entity::User, id))
    }

    async fn create_user(&self, data: NewUser) -> StoreResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn update_user(&self, id: i64, data: NewUser) -> StoreResult<User> {
        User::replace(&self.pool, id, data)
            .await?
            .ok_or(StoreError::not_found(Entity::User, id))
    }

    async fn delete_user(&self, id: i64) -> StoreResult<()> {
        if User::delete(&self.pool, id).await? {
            Ok(())
        } else {
            Err(StoreError::not_found(Entity::User, id))
        }
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(Task::list(&self.pool).await?)
    }

    async fn get_task(&self, id: i64) -> StoreResult<Task> {
        Task::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::not_found(Entity::Task, id))
    }

    async fn create_task(&self, data: NewTask) -> StoreResult<Task> {
        Ok(Task::create(&self.pool, data).await?)
    }

    async fn update_task(&self, id: i64, data: NewTask) -> StoreResult<Task> {
        Task::replace(&self.pool, id, data)
            .await?
            .ok_or(StoreError::not_found(Entity::Task, id))
    }

    async fn delete_task(&self, id: i64) -> StoreResult<()> {
        if Task::delete(&self.pool, id).await? {
            Ok(())
        } else {
            Err(StoreError::not_found(Entity::Task, id))
        }
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(pool::health_check(&self.pool).await?)
    }

    fn pool_stats(&self) -> Option<PoolStats> {
        Some(PoolStats::from_pool(&self.pool))
    }
}
