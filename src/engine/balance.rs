use super::MemberLedger;
use log::debug;
use std::collections::HashMap;
use uuid::Uuid;

/// Reduces the pairwise ledger into `get_back`/`should_pay` per member and
/// returns the gross group spend.
///
/// Every included expense added its full amount to its payer's `paid`, so
/// the paid column sums to exactly the total of included expenses.
pub fn summarize(ledgers: &mut HashMap<Uuid, MemberLedger>) -> f64 {
    let mut total_spend = 0.0;
    for ledger in ledgers.values_mut() {
        ledger.get_back = ledger.owed_by.values().sum();
        ledger.should_pay = ledger.owes_to.values().sum();
        total_spend += ledger.paid;
    }
    debug!("Summarized balances, total group spend {}", total_spend);
    total_spend
}
