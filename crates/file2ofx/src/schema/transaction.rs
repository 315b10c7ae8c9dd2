//! Role-keyed transaction records.

use serde::{Deserialize, Serialize};

use super::types::Role;

/// One row of a statement, keyed by role.
///
/// Values stay as source text; normalization happens at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
}

impl Transaction {
    /// Create a transaction with a single signed amount.
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount: Some(amount.into()),
            debit: None,
            credit: None,
            transaction_type: None,
        }
    }

    /// Set the type tag.
    pub fn with_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_type = Some(transaction_type.into());
        self
    }

    /// Build a transaction from role/value pairs.
    ///
    /// Returns `None` unless date, description and at least one amount-bearing
    /// value are present and non-blank.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = (Role, &'a str)>) -> Option<Self> {
        let mut date = None;
        let mut description = None;
        let mut amount = None;
        let mut debit = None;
        let mut credit = None;
        let mut transaction_type = None;

        for (role, value) in fields {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match role {
                Role::Date => &mut date,
                Role::Description => &mut description,
                Role::Amount => &mut amount,
                Role::Debit => &mut debit,
                Role::Credit => &mut credit,
                Role::Type => &mut transaction_type,
            };
            *slot = Some(value.to_string());
        }

        if amount.is_none() && debit.is_none() && credit.is_none() {
            return None;
        }

        Some(Self {
            date: date?,
            description: description?,
            amount,
            debit,
            credit,
            transaction_type,
        })
    }

    /// Value held for a role.
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Date => Some(self.date.as_str()),
            Role::Description => Some(self.description.as_str()),
            Role::Amount => self.amount.as_deref(),
            Role::Debit => self.debit.as_deref(),
            Role::Credit => self.credit.as_deref(),
            Role::Type => self.transaction_type.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_complete() {
        let tx = Transaction::from_fields([
            (Role::Date, "2023-01-01"),
            (Role::Description, " Grocery store purchase "),
            (Role::Amount, "125.50"),
            (Role::Type, "debit"),
        ])
        .unwrap();

        assert_eq!(tx.date, "2023-01-01");
        assert_eq!(tx.description, "Grocery store purchase");
        assert_eq!(tx.get(Role::Amount), Some("125.50"));
        assert_eq!(tx.get(Role::Type), Some("debit"));
    }

    #[test]
    fn test_from_fields_requires_description() {
        let tx = Transaction::from_fields([
            (Role::Date, "2023-01-01"),
            (Role::Description, "   "),
            (Role::Amount, "125.50"),
        ]);
        assert!(tx.is_none());
    }

    #[test]
    fn test_from_fields_accepts_single_side_of_split() {
        let tx = Transaction::from_fields([
            (Role::Date, "2023-01-01"),
            (Role::Description, "Coffee"),
            (Role::Debit, "4.50"),
            (Role::Credit, ""),
        ])
        .unwrap();

        assert_eq!(tx.debit.as_deref(), Some("4.50"));
        assert!(tx.credit.is_none());
        assert!(tx.amount.is_none());
    }

    #[test]
    fn test_from_fields_requires_amount() {
        let tx = Transaction::from_fields([
            (Role::Date, "2023-01-01"),
            (Role::Description, "Coffee"),
        ]);
        assert!(tx.is_none());
    }
}
