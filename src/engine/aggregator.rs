use super::MemberLedger;
use crate::models::{Expense, User};
use log::{debug, warn};
use std::collections::HashMap;
use uuid::Uuid;

/// Folds the expense list into per-member paid totals and the pairwise
/// debt ledger.
///
/// Expenses whose payer is not a recognized member are skipped entirely;
/// splits naming an unrecognized debtor are dropped. Both are last-resort
/// safety nets, upstream validation should have rejected such records.
pub fn aggregate(members: &[User], expenses: &[Expense]) -> HashMap<Uuid, MemberLedger> {
    let mut ledgers: HashMap<Uuid, MemberLedger> = members
        .iter()
        .map(|m| (m.id, MemberLedger::new(m.id)))
        .collect();

    for expense in expenses {
        let payer_id = expense.paid_by;
        if !ledgers.contains_key(&payer_id) {
            warn!(
                "Skipping expense {}: payer {} is not a group member",
                expense.id, payer_id
            );
            continue;
        }

        if let Some(payer) = ledgers.get_mut(&payer_id) {
            payer.paid += expense.amount;
        }

        let fallback = fallback_share(expense, members.len());
        for split in &expense.splits {
            // The payer never owes themselves.
            if split.user_id == payer_id {
                continue;
            }
            let share = match split.amount.or(fallback) {
                Some(v) => v,
                None => continue,
            };

            match ledgers.get_mut(&split.user_id) {
                Some(debtor) => {
                    *debtor.owes_to.entry(payer_id).or_insert(0.0) += share;
                }
                None => {
                    warn!(
                        "Dropping split for unknown user {} on expense {}",
                        split.user_id, expense.id
                    );
                    continue;
                }
            }
            if let Some(payer) = ledgers.get_mut(&payer_id) {
                *payer.owed_by.entry(split.user_id).or_insert(0.0) += share;
            }
        }
    }

    debug!("Aggregated {} expenses into {} ledgers", expenses.len(), ledgers.len());
    ledgers
}

/// Share used when a split carries no explicit amount: the expense amount
/// over the split count, or over `members - 1` when the expense has no
/// split list at all. `None` when the denominator would be zero.
fn fallback_share(expense: &Expense, member_count: usize) -> Option<f64> {
    let denominator = if expense.splits.is_empty() {
        member_count.saturating_sub(1)
    } else {
        expense.splits.len()
    };
    if denominator == 0 {
        return None;
    }
    Some(expense.amount / denominator as f64)
}
