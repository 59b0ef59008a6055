use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::DivvyError;
use crate::models::{ExpenseSplit, SplitType};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub budget: f64,
    pub member_ids: Vec<Uuid>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateExpenseRequest {
    pub description: String,
    pub amount: f64,
    pub paid_by: Uuid,
    pub split_type: SplitType,
    #[serde(default)]
    pub splits: Vec<ExpenseSplit>,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for DivvyError to implement IntoResponse
pub struct ApiError(pub DivvyError);

impl From<DivvyError> for ApiError {
    fn from(err: DivvyError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self.0 {
            DivvyError::UserNotFound(id) => (StatusCode::NOT_FOUND, format!("User {} not found", id)),
            DivvyError::GroupNotFound(id) => (StatusCode::NOT_FOUND, format!("Group {} not found", id)),
            DivvyError::NotGroupMember(id) => {
                (StatusCode::BAD_REQUEST, format!("User {} is not a group member", id))
            }
            DivvyError::InvalidSplitUser(id) => (
                StatusCode::BAD_REQUEST,
                format!("Split user {} is not a group member", id),
            ),
            DivvyError::NotEnoughMembers(count) => (
                StatusCode::BAD_REQUEST,
                format!("Group requires at least 2 members, got {}", count),
            ),
            DivvyError::InvalidPercentageTotal(total) => (
                StatusCode::BAD_REQUEST,
                format!("Split percentages sum to {}, expected 100", total),
            ),
            DivvyError::InvalidSplit => (StatusCode::BAD_REQUEST, "Invalid split amounts".to_string()),
            DivvyError::InvalidInput(field, msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid input for {}: {:?}", field, msg),
            ),
            DivvyError::NonFiniteBalance(id) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Non-finite balance for member {}", id),
            ),
            DivvyError::StorageError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, format!("Storage error: {}", msg)),
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
