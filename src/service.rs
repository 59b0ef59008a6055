use crate::constants::{
    FULL_PERCENTAGE, MAX_AMOUNT, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, SPLIT_TOLERANCE,
    TOP_SPENDER_COUNT,
};
use crate::engine::{self, GroupSettlement, SettlementTransaction, round_cents};
use crate::error::{DivvyError, FieldError};
use crate::models::{Balance, Expense, ExpenseSplit, Group, SplitType, User};
use crate::storage::Storage;
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

/// One row of the member spending overview.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberSummary {
    pub user_id: Uuid,
    pub name: String,
    pub paid: f64,
    pub should_pay: f64,
    pub get_back: f64,
    pub net: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Spender {
    pub name: String,
    pub amount: f64,
}

/// Full balance report for a group: budget figures, the per-member
/// overview, the pairwise who-owes-whom detail and the simplified
/// settlement plan.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupBalanceResponse {
    pub total_spent: f64,
    pub remaining_budget: f64,
    pub budget_exceeded: bool,
    pub members: Vec<MemberSummary>,
    pub balances: Vec<Balance>,
    pub settlements: Vec<SettlementTransaction>,
    pub highest_spenders: Vec<Spender>,
}

pub struct ExpenseService<S: Storage> {
    storage: S,
}

impl<S: Storage> ExpenseService<S> {
    pub fn new(storage: S) -> Self {
        info!("Initializing ExpenseService");
        Self { storage }
    }

    // USER MANAGEMENT

    pub async fn create_user(&self, name: String) -> Result<User, DivvyError> {
        info!("Creating user '{}'", name);
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        let created = self.storage.create_user(User::new(name)).await?;
        debug!("User created with ID: {}", created.id);
        Ok(created)
    }

    /// Batch variant; names that are already registered are skipped, only
    /// freshly created users are returned.
    pub async fn create_users(&self, names: Vec<String>) -> Result<Vec<User>, DivvyError> {
        info!("Creating {} users in batch", names.len());
        let mut created = Vec::new();
        for name in names {
            if self.storage.get_user_by_name(&name).await?.is_some() {
                debug!("Skipping existing user '{}'", name);
                continue;
            }
            created.push(self.create_user(name).await?);
        }
        Ok(created)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, DivvyError> {
        self.storage.get_user(user_id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DivvyError> {
        self.storage.list_users().await
    }

    // GROUP MANAGEMENT

    pub async fn create_group(
        &self,
        name: String,
        budget: f64,
        member_ids: Vec<Uuid>,
    ) -> Result<Group, DivvyError> {
        info!("Creating group '{}' with {} members", name, member_ids.len());
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        self.validate_amount_input("budget", budget)?;

        let mut seen = std::collections::HashSet::new();
        let unique_ids: Vec<Uuid> = member_ids.into_iter().filter(|id| seen.insert(*id)).collect();
        if unique_ids.len() < 2 {
            warn!("Rejected group '{}' with {} members", name, unique_ids.len());
            return Err(DivvyError::NotEnoughMembers(unique_ids.len()));
        }

        let members = futures::future::try_join_all(unique_ids.iter().map(|id| async move {
            self.storage
                .get_user(*id)
                .await?
                .ok_or_else(|| DivvyError::UserNotFound(id.to_string()))
        }))
        .await?;

        let group = Group::new(name, budget, members);
        self.storage.save_group(group.clone()).await?;
        debug!("Group created with ID: {}", group.id);
        Ok(group)
    }

    pub async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, DivvyError> {
        self.storage.get_group(group_id).await
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, DivvyError> {
        self.storage.list_groups().await
    }

    pub async fn delete_group(&self, group_id: Uuid) -> Result<(), DivvyError> {
        info!("Deleting group {}", group_id);
        if self.storage.get_group(group_id).await?.is_none() {
            return Err(DivvyError::GroupNotFound(group_id.to_string()));
        }
        self.storage.delete_group(group_id).await
    }

    // EXPENSE MANAGEMENT

    pub async fn add_expense(
        &self,
        group_id: Uuid,
        description: String,
        amount: f64,
        paid_by: Uuid,
        split_type: SplitType,
        splits: Vec<ExpenseSplit>,
    ) -> Result<Expense, DivvyError> {
        info!(
            "Adding expense '{}' of {} to group {} paid by {}",
            description, amount, group_id, paid_by
        );
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| DivvyError::GroupNotFound(group_id.to_string()))?;
        if self.storage.get_user(paid_by).await?.is_none() {
            return Err(DivvyError::UserNotFound(paid_by.to_string()));
        }
        if !group.is_member(paid_by) {
            warn!("Payer {} not in group {}", paid_by, group_id);
            return Err(DivvyError::NotGroupMember(paid_by.to_string()));
        }

        self.validate_string_input("description", &description, MAX_DESCRIPTION_LENGTH)?;
        self.validate_amount_input("amount", amount)?;

        let resolved = Self::resolve_splits(&group, amount, paid_by, split_type, splits)?;

        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4(),
            group_id,
            description,
            amount,
            paid_by,
            split_type,
            splits: resolved,
            created_at: now,
            updated_at: now,
        };
        self.storage.save_expense(expense.clone()).await?;
        debug!("Expense created with ID: {}", expense.id);
        Ok(expense)
    }

    pub async fn list_group_expenses(&self, group_id: Uuid) -> Result<Vec<Expense>, DivvyError> {
        if self.storage.get_group(group_id).await?.is_none() {
            return Err(DivvyError::GroupNotFound(group_id.to_string()));
        }
        self.storage.list_group_expenses(group_id).await
    }

    /// Turns the raw request splits into stored per-member shares. The
    /// payer is never stored as their own debtor.
    fn resolve_splits(
        group: &Group,
        amount: f64,
        paid_by: Uuid,
        split_type: SplitType,
        splits: Vec<ExpenseSplit>,
    ) -> Result<Vec<ExpenseSplit>, DivvyError> {
        match split_type {
            SplitType::Equal => {
                let share = round_cents(amount / group.members.len() as f64);
                Ok(group
                    .members
                    .iter()
                    .filter(|m| m.id != paid_by)
                    .map(|m| ExpenseSplit {
                        user_id: m.id,
                        amount: Some(share),
                        percentage: None,
                    })
                    .collect())
            }
            SplitType::Percentage => {
                let total: f64 = splits.iter().filter_map(|s| s.percentage).sum();
                if (total - FULL_PERCENTAGE).abs() > SPLIT_TOLERANCE {
                    warn!("Split percentages sum to {}, expected 100", total);
                    return Err(DivvyError::InvalidPercentageTotal(total));
                }
                let mut resolved = Vec::new();
                for split in splits {
                    if !group.is_member(split.user_id) {
                        return Err(DivvyError::InvalidSplitUser(split.user_id.to_string()));
                    }
                    let percentage = split.percentage.ok_or(DivvyError::InvalidSplit)?;
                    if split.user_id != paid_by {
                        resolved.push(ExpenseSplit {
                            user_id: split.user_id,
                            amount: Some(round_cents(amount * percentage / FULL_PERCENTAGE)),
                            percentage: Some(percentage),
                        });
                    }
                }
                Ok(resolved)
            }
            SplitType::Exact => {
                let total: f64 = splits.iter().filter_map(|s| s.amount).sum();
                if (total - amount).abs() > SPLIT_TOLERANCE {
                    warn!("Exact splits sum to {} but expense amount is {}", total, amount);
                    return Err(DivvyError::InvalidSplit);
                }
                let mut resolved = Vec::new();
                for split in splits {
                    if !group.is_member(split.user_id) {
                        return Err(DivvyError::InvalidSplitUser(split.user_id.to_string()));
                    }
                    let share = split.amount.ok_or(DivvyError::InvalidSplit)?;
                    if split.user_id != paid_by {
                        resolved.push(ExpenseSplit {
                            user_id: split.user_id,
                            amount: Some(share),
                            percentage: None,
                        });
                    }
                }
                Ok(resolved)
            }
        }
    }

    // BALANCES & SETTLEMENT

    pub async fn group_balance(&self, group_id: Uuid) -> Result<GroupBalanceResponse, DivvyError> {
        debug!("Calculating balances for group {}", group_id);
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| DivvyError::GroupNotFound(group_id.to_string()))?;
        let expenses = self.storage.list_group_expenses(group_id).await?;

        let settlement = engine::settle(&group.members, &expenses)?;
        Ok(Self::build_balance_response(&group, settlement))
    }

    fn build_balance_response(group: &Group, settlement: GroupSettlement) -> GroupBalanceResponse {
        let GroupSettlement {
            ledgers,
            total_spend,
            settlements,
        } = settlement;

        let total_spent = round_cents(total_spend);
        let remaining_budget = round_cents(group.budget - total_spent);
        let budget_exceeded = total_spent > group.budget;

        let mut members = Vec::with_capacity(group.members.len());
        let mut balances = Vec::new();
        let mut credit_totals: HashMap<Uuid, f64> = HashMap::new();

        for member in &group.members {
            let Some(ledger) = ledgers.get(&member.id) else {
                continue;
            };
            members.push(MemberSummary {
                user_id: member.id,
                name: member.name.clone(),
                paid: round_cents(ledger.paid),
                should_pay: round_cents(ledger.should_pay),
                get_back: round_cents(ledger.get_back),
                net: round_cents(ledger.net()),
            });

            // Pairwise detail, debtor by roster order, creditor likewise.
            for creditor in &group.members {
                let Some(&owed) = ledger.owes_to.get(&creditor.id) else {
                    continue;
                };
                if owed > SPLIT_TOLERANCE {
                    balances.push(Balance {
                        user_id: member.id,
                        owes_to: creditor.id,
                        amount: round_cents(owed),
                    });
                    *credit_totals.entry(creditor.id).or_insert(0.0) += owed;
                }
            }
        }

        let mut highest_spenders: Vec<Spender> = group
            .members
            .iter()
            .filter_map(|m| {
                let total = credit_totals.get(&m.id).copied().unwrap_or(0.0);
                (total > 0.0).then(|| Spender {
                    name: m.name.clone(),
                    amount: round_cents(total),
                })
            })
            .collect();
        highest_spenders.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        highest_spenders.truncate(TOP_SPENDER_COUNT);

        GroupBalanceResponse {
            total_spent,
            remaining_budget,
            budget_exceeded,
            members,
            balances,
            settlements,
            highest_spenders,
        }
    }

    /// Pairwise balances involving one user, across every group they
    /// belong to.
    pub async fn user_balances(&self, user_id: Uuid) -> Result<Vec<Balance>, DivvyError> {
        debug!("Calculating balances for user {}", user_id);
        if self.storage.get_user(user_id).await?.is_none() {
            return Err(DivvyError::UserNotFound(user_id.to_string()));
        }
        let groups = self.storage.get_user_groups(user_id).await?;
        let expense_lists = futures::future::try_join_all(
            groups.iter().map(|g| self.storage.list_group_expenses(g.id)),
        )
        .await?;

        let mut balances = Vec::new();
        for (group, expenses) in groups.iter().zip(expense_lists) {
            let mut ledgers = engine::aggregate(&group.members, &expenses);
            engine::summarize(&mut ledgers);

            for debtor in &group.members {
                let Some(ledger) = ledgers.get(&debtor.id) else {
                    continue;
                };
                for creditor in &group.members {
                    let Some(&owed) = ledger.owes_to.get(&creditor.id) else {
                        continue;
                    };
                    if owed > SPLIT_TOLERANCE && (debtor.id == user_id || creditor.id == user_id) {
                        balances.push(Balance {
                            user_id: debtor.id,
                            owes_to: creditor.id,
                            amount: round_cents(owed),
                        });
                    }
                }
            }
        }
        Ok(balances)
    }

    // VALIDATION HELPERS

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), DivvyError> {
        if value.trim().is_empty() {
            return Err(DivvyError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(DivvyError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), DivvyError> {
        if !amount.is_finite() {
            return Err(DivvyError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be a finite number".to_string(),
                },
            ));
        }
        if amount <= 0.0 {
            return Err(DivvyError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Invalid Amount".to_string(),
                    description: "Amount must be greater than 0".to_string(),
                },
            ));
        }
        if amount > MAX_AMOUNT {
            return Err(DivvyError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: "Amount Too Large".to_string(),
                    description: format!("Amount cannot exceed {}", MAX_AMOUNT),
                },
            ));
        }
        Ok(())
    }
}
