use crate::{
    api::models::{ApiError, CreateExpenseRequest, CreateGroupRequest, CreateUserRequest, ErrorResponse},
    error::DivvyError,
    models::{Balance, Expense, Group, User},
    service::{ExpenseService, GroupBalanceResponse},
    storage::in_memory::InMemoryStorage,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

type AppService = Arc<ExpenseService<InMemoryStorage>>;

// Define API routes
pub fn routes(service: AppService) -> Router {
    Router::new()
        // add / route with a simple health check
        .route("/", get(|| async { "OK" }))
        .route("/users", post(create_user).get(list_users))
        .route("/users/batch", post(create_users))
        .route("/users/{user_id}", get(get_user))
        .route("/users/{user_id}/balances", get(get_user_balances))
        .route("/groups", post(create_group).get(list_groups))
        .route("/groups/{group_id}", get(get_group).delete(delete_group))
        .route(
            "/groups/{group_id}/expenses",
            post(create_expense).get(list_group_expenses),
        )
        .route("/groups/{group_id}/balances", get(get_group_balance))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Bad request", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(service): State<AppService>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = service.create_user(req.name).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/users/batch",
    request_body = Vec<CreateUserRequest>,
    responses(
        (status = 200, description = "Users created, existing names skipped", body = Vec<User>),
        (status = 400, description = "Bad request", body = ErrorResponse)
    )
)]
pub async fn create_users(
    State(service): State<AppService>,
    Json(req): Json<Vec<CreateUserRequest>>,
) -> Result<Json<Vec<User>>, ApiError> {
    let names = req.into_iter().map(|r| r.name).collect();
    let users = service.create_users(names).await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "All users", body = Vec<User>))
)]
pub async fn list_users(State(service): State<AppService>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(service.list_users().await?))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(service): State<AppService>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = service
        .get_user(user_id)
        .await?
        .ok_or_else(|| DivvyError::UserNotFound(user_id.to_string()))?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/balances",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Pairwise balances involving the user", body = Vec<Balance>),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user_balances(
    State(service): State<AppService>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Balance>>, ApiError> {
    Ok(Json(service.user_balances(user_id).await?))
}

#[utoipa::path(
    post,
    path = "/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created", body = Group),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "A member was not found", body = ErrorResponse)
    )
)]
pub async fn create_group(
    State(service): State<AppService>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service.create_group(req.name, req.budget, req.member_ids).await?;
    Ok(Json(group))
}

#[utoipa::path(
    get,
    path = "/groups",
    responses((status = 200, description = "All groups", body = Vec<Group>))
)]
pub async fn list_groups(State(service): State<AppService>) -> Result<Json<Vec<Group>>, ApiError> {
    Ok(Json(service.list_groups().await?))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}",
    params(("group_id" = Uuid, Path, description = "Group id")),
    responses(
        (status = 200, description = "The group", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group(
    State(service): State<AppService>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Group>, ApiError> {
    let group = service
        .get_group(group_id)
        .await?
        .ok_or_else(|| DivvyError::GroupNotFound(group_id.to_string()))?;
    Ok(Json(group))
}

#[utoipa::path(
    delete,
    path = "/groups/{group_id}",
    params(("group_id" = Uuid, Path, description = "Group id")),
    responses(
        (status = 200, description = "Group deleted"),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn delete_group(
    State(service): State<AppService>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    service.delete_group(group_id).await?;
    Ok(Json(json!({ "message": "Group deleted successfully" })))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/expenses",
    params(("group_id" = Uuid, Path, description = "Group id")),
    request_body = CreateExpenseRequest,
    responses(
        (status = 200, description = "Expense recorded", body = Expense),
        (status = 400, description = "Invalid expense", body = ErrorResponse),
        (status = 404, description = "Group or payer not found", body = ErrorResponse)
    )
)]
pub async fn create_expense(
    State(service): State<AppService>,
    Path(group_id): Path<Uuid>,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    let expense = service
        .add_expense(
            group_id,
            req.description,
            req.amount,
            req.paid_by,
            req.split_type,
            req.splits,
        )
        .await?;
    Ok(Json(expense))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/expenses",
    params(("group_id" = Uuid, Path, description = "Group id")),
    responses(
        (status = 200, description = "Expenses of the group", body = Vec<Expense>),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn list_group_expenses(
    State(service): State<AppService>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    Ok(Json(service.list_group_expenses(group_id).await?))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/balances",
    params(("group_id" = Uuid, Path, description = "Group id")),
    responses(
        (status = 200, description = "Balance report with settlements", body = GroupBalanceResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 422, description = "Balances are not finite", body = ErrorResponse)
    )
)]
pub async fn get_group_balance(
    State(service): State<AppService>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupBalanceResponse>, ApiError> {
    Ok(Json(service.group_balance(group_id).await?))
}
