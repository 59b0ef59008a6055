use utoipa::OpenApi;

use crate::{
    api::models::{CreateExpenseRequest, CreateGroupRequest, CreateUserRequest, ErrorResponse},
    engine::SettlementTransaction,
    models::{Balance, Expense, ExpenseSplit, Group, SplitType, User},
    service::{GroupBalanceResponse, MemberSummary, Spender},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_user,
        super::handlers::create_users,
        super::handlers::list_users,
        super::handlers::get_user,
        super::handlers::get_user_balances,
        super::handlers::create_group,
        super::handlers::list_groups,
        super::handlers::get_group,
        super::handlers::delete_group,
        super::handlers::create_expense,
        super::handlers::list_group_expenses,
        super::handlers::get_group_balance
    ),
    components(schemas(
        CreateUserRequest,
        CreateGroupRequest,
        CreateExpenseRequest,
        ErrorResponse,
        User,
        Group,
        Expense,
        ExpenseSplit,
        SplitType,
        Balance,
        SettlementTransaction,
        MemberSummary,
        Spender,
        GroupBalanceResponse
    )),
    info(
        title = "Divvy API",
        description = "API for splitting group expenses and settling balances",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
