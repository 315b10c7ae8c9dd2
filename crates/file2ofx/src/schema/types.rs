//! Core type definitions for column roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantic role of a column in a transaction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Transaction or posting date.
    Date,
    /// Signed amount in a single column.
    Amount,
    /// Outgoing amount in a split debit/credit layout.
    Debit,
    /// Incoming amount in a split debit/credit layout.
    Credit,
    /// Free-text payee or memo.
    Description,
    /// Transaction type or category tag.
    Type,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 6] = [
        Role::Date,
        Role::Amount,
        Role::Debit,
        Role::Credit,
        Role::Description,
        Role::Type,
    ];

    /// Returns true if the column carries money.
    pub fn is_amount_bearing(&self) -> bool {
        matches!(self, Role::Amount | Role::Debit | Role::Credit)
    }

    /// Lower-case name used in messages and serialized forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Date => "date",
            Role::Amount => "amount",
            Role::Debit => "debit",
            Role::Credit => "credit",
            Role::Description => "description",
            Role::Type => "type",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == lower)
            .ok_or_else(|| format!("unknown column role '{}'", s))
    }
}

/// Where a role assignment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleSource {
    /// Matched from the column's header text.
    Header,
    /// Inferred from sampled cell values.
    Data,
}
