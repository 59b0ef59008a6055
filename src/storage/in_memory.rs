use crate::error::DivvyError;
use crate::models::{Expense, Group, User};
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    users_by_name: Arc<RwLock<HashMap<String, Uuid>>>,
    groups: Arc<RwLock<HashMap<Uuid, Group>>>,
    expenses: Arc<RwLock<HashMap<Uuid, Expense>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: User) -> Result<User, DivvyError> {
        let mut users = self.users.write().await;
        let mut users_by_name = self.users_by_name.write().await;
        users_by_name.insert(user.name.clone(), user.id);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, DivvyError> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn get_user_by_name(&self, name: &str) -> Result<Option<User>, DivvyError> {
        let users_by_name = self.users_by_name.read().await;
        let users = self.users.read().await;
        Ok(users_by_name.get(name).and_then(|id| users.get(id).cloned()))
    }

    async fn list_users(&self) -> Result<Vec<User>, DivvyError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        Ok(all)
    }

    async fn save_group(&self, group: Group) -> Result<(), DivvyError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id, group);
        Ok(())
    }

    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, DivvyError> {
        let groups = self.groups.read().await;
        Ok(groups.get(&group_id).cloned())
    }

    async fn list_groups(&self) -> Result<Vec<Group>, DivvyError> {
        let groups = self.groups.read().await;
        let mut all: Vec<Group> = groups.values().cloned().collect();
        all.sort_by_key(|g| g.created_at);
        Ok(all)
    }

    async fn delete_group(&self, group_id: Uuid) -> Result<(), DivvyError> {
        let mut groups = self.groups.write().await;
        if groups.remove(&group_id).is_some() {
            let mut expenses = self.expenses.write().await;
            expenses.retain(|_, e| e.group_id != group_id);
        }
        Ok(())
    }

    async fn get_user_groups(&self, user_id: Uuid) -> Result<Vec<Group>, DivvyError> {
        let groups = self.groups.read().await;
        let mut matching: Vec<Group> = groups
            .values()
            .filter(|g| g.is_member(user_id))
            .cloned()
            .collect();
        matching.sort_by_key(|g| g.created_at);
        Ok(matching)
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), DivvyError> {
        let mut expenses = self.expenses.write().await;
        expenses.insert(expense.id, expense);
        Ok(())
    }

    async fn list_group_expenses(&self, group_id: Uuid) -> Result<Vec<Expense>, DivvyError> {
        let expenses = self.expenses.read().await;
        let mut matching: Vec<Expense> = expenses
            .values()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.created_at);
        Ok(matching)
    }
}
