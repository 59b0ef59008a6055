use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum DivvyError {
    /// User with given ID not found
    #[error("User {0} not found")]
    UserNotFound(String),

    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(String),

    /// User is not a member of the group
    #[error("User {0} is not a group member")]
    NotGroupMember(String),

    /// User referenced by a split is not a group member
    #[error("Split user {0} is not a group member")]
    InvalidSplitUser(String),

    /// A group needs at least two members to share anything
    #[error("Group requires at least 2 members, got {0}")]
    NotEnoughMembers(usize),

    /// Percentage splits did not sum to 100
    #[error("Split percentages sum to {0}, expected 100")]
    InvalidPercentageTotal(f64),

    /// Split amounts don't add up to the expense amount
    #[error("Invalid split amounts")]
    InvalidSplit,

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// A member's net balance came out NaN or infinite; settlement refused
    #[error("Non-finite balance for member {0}")]
    NonFiniteBalance(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}
