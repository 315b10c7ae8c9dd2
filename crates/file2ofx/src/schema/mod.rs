//! Column roles, role assignments and transaction records.

mod assignment;
mod transaction;
mod types;

pub use assignment::{ColumnRole, RoleAssignment};
pub use transaction::Transaction;
pub use types::{Role, RoleSource};
