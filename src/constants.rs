/// Two-decimal monetary tolerance. Balances within this of zero are settled.
pub const SPLIT_TOLERANCE: f64 = 0.01;

/// Percentage splits must sum to this.
pub const FULL_PERCENTAGE: f64 = 100.0;

/// Upper bound for a single expense or budget amount.
pub const MAX_AMOUNT: f64 = 1_000_000.0;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Number of entries reported in the highest-spenders ranking.
pub const TOP_SPENDER_COUNT: usize = 3;
