//! Column-to-role mapping built by the detector.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::types::{Role, RoleSource};

/// A single column's assigned role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRole {
    pub role: Role,
    pub source: RoleSource,
}

/// Mapping from column name to role.
///
/// Each role is held by at most one column. Debit and credit are distinct
/// roles, so a split layout holds both. Once a column has a role it keeps it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignment {
    columns: IndexMap<String, ColumnRole>,
}

impl RoleAssignment {
    /// Create an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `role` to `column`.
    ///
    /// Returns false, leaving the assignment unchanged, if the column already
    /// has a role or another column already holds this one.
    pub fn assign(&mut self, column: impl Into<String>, role: Role, source: RoleSource) -> bool {
        let column = column.into();
        if self.columns.contains_key(&column) || self.has_role(role) {
            return false;
        }
        self.columns.insert(column, ColumnRole { role, source });
        true
    }

    /// Role of a column, if any.
    pub fn role_of(&self, column: &str) -> Option<Role> {
        self.columns.get(column).map(|c| c.role)
    }

    /// Column holding a role, if any.
    pub fn column_for(&self, role: Role) -> Option<&str> {
        self.columns
            .iter()
            .find(|(_, c)| c.role == role)
            .map(|(name, _)| name.as_str())
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.columns.values().any(|c| c.role == role)
    }

    /// Returns true if any amount-bearing role is held.
    pub fn has_amount(&self) -> bool {
        self.columns.values().any(|c| c.role.is_amount_bearing())
    }

    pub fn is_assigned(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Iterate `(column, role, source)` in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Role, RoleSource)> {
        self.columns
            .iter()
            .map(|(name, c)| (name.as_str(), c.role, c.source))
    }

    /// Number of columns with a role.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_held_once() {
        let mut assignment = RoleAssignment::new();
        assert!(assignment.assign("Date", Role::Date, RoleSource::Header));
        assert!(!assignment.assign("Posted", Role::Date, RoleSource::Header));
        assert_eq!(assignment.column_for(Role::Date), Some("Date"));
        assert_eq!(assignment.len(), 1);
    }

    #[test]
    fn test_column_keeps_first_role() {
        let mut assignment = RoleAssignment::new();
        assert!(assignment.assign("col_0", Role::Description, RoleSource::Header));
        assert!(!assignment.assign("col_0", Role::Type, RoleSource::Data));
        assert_eq!(assignment.role_of("col_0"), Some(Role::Description));
    }

    #[test]
    fn test_split_amount_layout() {
        let mut assignment = RoleAssignment::new();
        assignment.assign("Debit", Role::Debit, RoleSource::Header);
        assignment.assign("Credit", Role::Credit, RoleSource::Header);
        assert!(assignment.has_amount());
        assert!(!assignment.has_role(Role::Amount));
    }
}
