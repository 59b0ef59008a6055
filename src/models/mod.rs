pub mod balance;
pub mod expense;
pub mod group;
pub mod user;

pub use balance::Balance;
pub use expense::{Expense, ExpenseSplit, SplitType};
pub use group::Group;
pub use user::User;
