use super::{MemberLedger, SettlementTransaction, round_cents};
use crate::constants::SPLIT_TOLERANCE;
use crate::models::User;
use log::debug;
use std::collections::HashMap;
use uuid::Uuid;

struct Party {
    member_id: Uuid,
    remaining: f64,
}

/// Computes a minimal list of point-to-point payments that zeroes every
/// member's net balance.
///
/// Settlement is balance-based: a pair may settle even if they never
/// transacted directly. Bounding `settled` by the pairwise debt edge can
/// stall the loop when the top creditor and top debtor share no edge, so
/// only the two remaining balances decide the amount. After a positive
/// settlement at least one cursor advances, which bounds the output at
/// `creditors + debtors - 1` transactions.
pub fn simplify(members: &[User], ledgers: &HashMap<Uuid, MemberLedger>) -> Vec<SettlementTransaction> {
    let mut creditors: Vec<Party> = Vec::new();
    let mut debtors: Vec<Party> = Vec::new();

    // Partition in roster order so ties sort deterministically below.
    for member in members {
        let Some(ledger) = ledgers.get(&member.id) else {
            continue;
        };
        let net = ledger.net();
        if net > SPLIT_TOLERANCE {
            creditors.push(Party {
                member_id: member.id,
                remaining: net,
            });
        } else if net < -SPLIT_TOLERANCE {
            debtors.push(Party {
                member_id: member.id,
                remaining: -net,
            });
        }
    }

    // Largest obligations first; stable sort keeps roster order on ties.
    creditors.sort_by(|a, b| b.remaining.total_cmp(&a.remaining));
    debtors.sort_by(|a, b| b.remaining.total_cmp(&a.remaining));

    let mut settlements = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let settled = debtors[i].remaining.min(creditors[j].remaining);

        if settled > SPLIT_TOLERANCE {
            settlements.push(SettlementTransaction {
                from: debtors[i].member_id,
                to: creditors[j].member_id,
                amount: round_cents(settled),
            });
            debtors[i].remaining -= settled;
            creditors[j].remaining -= settled;
        }

        if debtors[i].remaining < SPLIT_TOLERANCE {
            i += 1;
        }
        if creditors[j].remaining < SPLIT_TOLERANCE {
            j += 1;
        }
    }

    debug!(
        "Simplified {} creditors / {} debtors into {} transactions",
        creditors.len(),
        debtors.len(),
        settlements.len()
    );
    settlements
}
