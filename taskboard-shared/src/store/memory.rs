//! In-memory store
//!
//! Keeps both collections behind one `tokio::sync::RwLock`, so a write that
//! checks a task's `user_id` sees the same users table it commits against.
//! Identity counters live under the same lock and only move forward.
//!
//! Used by the HTTP tests and for running the API without PostgreSQL
//! (`STORE_BACKEND=memory`). Data is lost when the process exits.

use super::{Entity, Store, StoreError, StoreResult};
use crate::models::task::{NewTask, Task};
use crate::models::user::{NewUser, User};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    tasks: BTreeMap<i64, Task>,
    last_user_id: i64,
    last_task_id: i64,
}

impl Tables {
    fn check_assignee(&self, user_id: Option<i64>) -> StoreResult<()> {
        match user_id {
            Some(id) if !self.users.contains_key(&id) => Err(StoreError::ConstraintViolation(
                format!("user_id {} does not reference an existing user", id),
            )),
            _ => Ok(()),
        }
    }
}

/// Store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }

    async fn get_user(&self, id: i64) -> StoreResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::not_found(Entity::User, id))
    }

    async fn create_user(&self, data: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        tables.last_user_id += 1;
        let user = data.into_user(tables.last_user_id);
        tables.users.insert(user.id, user.clone());

        debug!(user_id = user.id, "Inserted user");
        Ok(user)
    }

    async fn update_user(&self, id: i64, data: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .users
            .get_mut(&id)
            .ok_or(StoreError::not_found(Entity::User, id))?;
        *slot = data.into_user(id);

        Ok(slot.clone())
    }

    async fn delete_user(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(StoreError::not_found(Entity::User, id));
        }

        // ON DELETE SET NULL
        let mut unassigned = 0;
        for task in tables.tasks.values_mut() {
            if task.user_id == Some(id) {
                task.user_id = None;
                unassigned += 1;
            }
        }

        debug!(user_id = id, unassigned, "Deleted user");
        Ok(())
    }

    async fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.values().cloned().collect())
    }

    async fn get_task(&self, id: i64) -> StoreResult<Task> {
        let tables = self.tables.read().await;
        tables
            .tasks
            .get(&id)
            .cloned()
            .ok_or(StoreError::not_found(Entity::Task, id))
    }

    async fn create_task(&self, data: NewTask) -> StoreResult<Task> {
        let mut tables = self.tables.write().await;
        tables.check_assignee(data.user_id)?;

        tables.last_task_id += 1;
        let task = data.into_task(tables.last_task_id);
        tables.tasks.insert(task.id, task.clone());

        debug!(task_id = task.id, "Inserted task");
        Ok(task)
    }

    async fn update_task(&self, id: i64, data: NewTask) -> StoreResult<Task> {
        let mut tables = self.tables.write().await;
        if !tables.tasks.contains_key(&id) {
            return Err(StoreError::not_found(Entity::Task, id));
        }
        tables.check_assignee(data.user_id)?;

        let task = data.into_task(id);
        tables.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn delete_task(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::not_found(Entity::Task, id))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
