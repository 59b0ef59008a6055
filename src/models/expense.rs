use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    Equal,
    Percentage,
    Exact,
}

/// One member's share of an expense. Exactly one of `amount`/`percentage`
/// is meaningful, decided by the expense's split type; the stored `amount`
/// is always the resolved monetary value.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseSplit {
    pub user_id: Uuid,
    pub amount: Option<f64>,
    pub percentage: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub description: String,
    pub amount: f64,
    pub paid_by: Uuid,
    pub split_type: SplitType,
    pub splits: Vec<ExpenseSplit>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
