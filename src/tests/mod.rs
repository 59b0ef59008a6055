mod service_tests;

use crate::models::{Expense, ExpenseSplit, SplitType, User};
use crate::service::ExpenseService;
use crate::storage::in_memory::InMemoryStorage;
use chrono::Utc;
use uuid::Uuid;

pub fn create_test_service() -> ExpenseService<InMemoryStorage> {
    ExpenseService::new(InMemoryStorage::new())
}

pub fn member(name: &str) -> User {
    User::new(name.to_string())
}

/// Builds an already-resolved expense the way the service would store it:
/// per-split monetary amounts, payer excluded upstream or not at all.
pub fn expense(group_id: Uuid, amount: f64, paid_by: Uuid, splits: Vec<(Uuid, Option<f64>)>) -> Expense {
    let now = Utc::now();
    Expense {
        id: Uuid::new_v4(),
        group_id,
        description: "test expense".to_string(),
        amount,
        paid_by,
        split_type: SplitType::Exact,
        splits: splits
            .into_iter()
            .map(|(user_id, amount)| ExpenseSplit {
                user_id,
                amount,
                percentage: None,
            })
            .collect(),
        created_at: now,
        updated_at: now,
    }
}
