use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One edge of the pairwise debt ledger: `user_id` owes `owes_to` `amount`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Balance {
    pub user_id: Uuid,
    pub owes_to: Uuid,
    pub amount: f64,
}
