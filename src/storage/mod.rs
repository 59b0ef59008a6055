use crate::error::DivvyError;
use crate::models::{Expense, Group, User};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, DivvyError>;
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, DivvyError>;
    async fn get_user_by_name(&self, name: &str) -> Result<Option<User>, DivvyError>;
    async fn list_users(&self) -> Result<Vec<User>, DivvyError>;

    async fn save_group(&self, group: Group) -> Result<(), DivvyError>;
    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, DivvyError>;
    async fn list_groups(&self) -> Result<Vec<Group>, DivvyError>;
    async fn delete_group(&self, group_id: Uuid) -> Result<(), DivvyError>;
    async fn get_user_groups(&self, user_id: Uuid) -> Result<Vec<Group>, DivvyError>;

    async fn save_expense(&self, expense: Expense) -> Result<(), DivvyError>;
    async fn list_group_expenses(&self, group_id: Uuid) -> Result<Vec<Expense>, DivvyError>;
}

pub mod in_memory;
