//! Balance-and-settlement engine.
//!
//! Three pure stages, chained by [`settle`]: expenses are folded into a
//! per-member ledger ([`aggregate`]), the ledger is reduced to net figures
//! and the gross group spend ([`summarize`]), and the net balances are
//! turned into a short list of point-to-point payments ([`simplify`]).
//! Every invocation builds its accumulators from scratch; nothing is
//! cached or shared between calls.

mod aggregator;
mod balance;
mod simplifier;

pub use aggregator::aggregate;
pub use balance::summarize;
pub use simplifier::simplify;

use crate::error::DivvyError;
use crate::models::{Expense, User};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;

/// Per-member running totals for one computation. Built fresh per call,
/// never persisted.
#[derive(Clone, Debug)]
pub struct MemberLedger {
    pub member_id: Uuid,
    /// Total this member paid out of pocket.
    pub paid: f64,
    /// Amount owed per creditor, keyed by creditor id.
    pub owes_to: HashMap<Uuid, f64>,
    /// Amount owed to this member per debtor, keyed by debtor id.
    pub owed_by: HashMap<Uuid, f64>,
    /// Sum of `owed_by`, filled in by [`summarize`].
    pub get_back: f64,
    /// Sum of `owes_to`, filled in by [`summarize`].
    pub should_pay: f64,
}

impl MemberLedger {
    pub fn new(member_id: Uuid) -> Self {
        MemberLedger {
            member_id,
            paid: 0.0,
            owes_to: HashMap::new(),
            owed_by: HashMap::new(),
            get_back: 0.0,
            should_pay: 0.0,
        }
    }

    /// Positive means the group owes this member money.
    pub fn net(&self) -> f64 {
        self.get_back - self.should_pay
    }
}

/// One proposed payment toward settling the group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SettlementTransaction {
    pub from: Uuid,
    pub to: Uuid,
    pub amount: f64,
}

/// Output of a full engine run over one (group, expense-list) pair.
#[derive(Clone, Debug)]
pub struct GroupSettlement {
    pub ledgers: HashMap<Uuid, MemberLedger>,
    pub total_spend: f64,
    pub settlements: Vec<SettlementTransaction>,
}

/// Runs all three stages. Rejects NaN/infinite net balances before the
/// simplifier sees them; the greedy loop cannot detect bad numbers mid-run.
pub fn settle(members: &[User], expenses: &[Expense]) -> Result<GroupSettlement, DivvyError> {
    let mut ledgers = aggregate(members, expenses);
    let total_spend = summarize(&mut ledgers);

    for ledger in ledgers.values() {
        if !ledger.net().is_finite() {
            return Err(DivvyError::NonFiniteBalance(ledger.member_id.to_string()));
        }
    }

    let settlements = simplify(members, &ledgers);
    Ok(GroupSettlement {
        ledgers,
        total_spend,
        settlements,
    })
}

/// Rounds to two decimal places at output boundaries.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
