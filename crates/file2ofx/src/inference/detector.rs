//! Column role detection from header names and sampled values.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::classifiers;
use crate::error::{ConvertError, Result};
use crate::input::DataTable;
use crate::schema::{Role, RoleAssignment, RoleSource};

/// Default number of non-null values sampled per column.
pub const DEFAULT_SAMPLE_LIMIT: usize = 100;

// =============================================================================
// HEADER RULES
// =============================================================================
// Groups are checked in order; the first group with a matching pattern wins.
// Type comes before description so "transaction_type" is not read as prose.

static HEADER_GROUPS: Lazy<Vec<(Role, Vec<Regex>)>> = Lazy::new(|| {
    let group = |patterns: &[&str]| -> Vec<Regex> {
        patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
    };
    vec![
        (
            Role::Date,
            group(&["date", "transaction_date", "post_date", "value_date", "timestamp"]),
        ),
        (
            Role::Amount,
            group(&["amount", "value", "sum", "total", "debit", "credit", "balance"]),
        ),
        (
            Role::Type,
            group(&[
                r"^type$",
                r"^category$",
                r"^classification$",
                r"^transaction[_\s]?type$",
            ]),
        ),
        (
            Role::Description,
            group(&[
                "description",
                "memo",
                "note",
                "details",
                "reference",
                "payee",
                "merchant",
                "transaction",
            ]),
        ),
    ]
});

// =============================================================================
// DATA RULES
// =============================================================================

/// One step of the data-sampling chain.
struct DataRule {
    role: Role,
    /// Minimum share of sampled values that must pass, in percent.
    threshold_pct: usize,
    test: fn(&str) -> bool,
}

/// Checked in order; the first rule whose threshold is met decides the column.
const DATA_RULES: [DataRule; 4] = [
    DataRule {
        role: Role::Date,
        threshold_pct: 70,
        test: classifiers::is_date,
    },
    DataRule {
        role: Role::Amount,
        threshold_pct: 60,
        test: classifiers::is_amount,
    },
    DataRule {
        role: Role::Description,
        threshold_pct: 50,
        test: classifiers::is_description,
    },
    DataRule {
        role: Role::Type,
        threshold_pct: 30,
        test: classifiers::is_type,
    },
];

/// Result of sampling a single column.
#[derive(Debug, Clone)]
pub struct ColumnAnalysis {
    /// Column name.
    pub name: String,
    /// Number of non-null values sampled.
    pub sampled: usize,
    /// Share of sampled values passing each role test, in rule order.
    pub pass_ratios: Vec<(Role, f64)>,
    /// First role whose threshold was met.
    pub role: Option<Role>,
}

/// Assigns roles to table columns.
pub struct ColumnDetector {
    /// Maximum non-null values sampled per column.
    sample_limit: usize,
}

impl ColumnDetector {
    /// Create a detector with the default sample size.
    pub fn new() -> Self {
        Self {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }

    /// Create a detector sampling at most `limit` values per column.
    pub fn with_sample_limit(limit: usize) -> Self {
        Self {
            sample_limit: limit.max(1),
        }
    }

    /// Match header names against the role pattern groups.
    pub fn detect_from_headers<S: AsRef<str>>(&self, headers: &[S]) -> RoleAssignment {
        let mut assignment = RoleAssignment::new();

        for header in headers {
            let header = header.as_ref();
            let Some(role) = Self::role_for_header(header) else {
                continue;
            };
            if assignment.assign(header, role, RoleSource::Header) {
                debug!(column = header, role = %role, "assigned role from header");
            } else {
                debug!(column = header, role = %role, "role already held, header ignored");
            }
        }

        assignment
    }

    /// Role suggested by a header name alone.
    pub fn role_for_header(header: &str) -> Option<Role> {
        let lower = header.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }

        let (role, _) = HEADER_GROUPS
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| p.is_match(&lower)))?;

        if *role == Role::Amount {
            if lower.contains("debit") {
                return Some(Role::Debit);
            }
            if lower.contains("credit") {
                return Some(Role::Credit);
            }
        }

        Some(*role)
    }

    /// Infer roles for every column from sampled values.
    pub fn detect_from_data(&self, table: &DataTable) -> RoleAssignment {
        let mut assignment = RoleAssignment::new();
        self.augment_from_data(table, &mut assignment);
        assignment
    }

    /// Fill roles for columns the assignment does not cover yet.
    ///
    /// Existing assignments are never changed.
    pub fn augment_from_data(&self, table: &DataTable, assignment: &mut RoleAssignment) {
        for index in 0..table.column_count() {
            let name = &table.headers[index];
            if assignment.is_assigned(name) {
                continue;
            }

            let analysis = self.analyze_column(table, index);
            let Some(role) = analysis.role else {
                continue;
            };

            let ratio = analysis
                .pass_ratios
                .iter()
                .find(|(r, _)| *r == role)
                .map(|(_, ratio)| *ratio)
                .unwrap_or(0.0);

            if assignment.assign(name.as_str(), role, RoleSource::Data) {
                debug!(column = %name, role = %role, ratio, "assigned role from data");
            } else {
                debug!(column = %name, role = %role, "role already held, column left unassigned");
            }
        }
    }

    /// Sample a column and score it against each data rule.
    pub fn analyze_column(&self, table: &DataTable, index: usize) -> ColumnAnalysis {
        let sample: Vec<&str> = table
            .column_values(index)
            .filter(|v| !DataTable::is_null_value(v))
            .take(self.sample_limit)
            .collect();
        let sampled = sample.len();

        let mut pass_ratios = Vec::with_capacity(DATA_RULES.len());
        let mut role = None;

        for rule in &DATA_RULES {
            let passed = sample.iter().filter(|v| (rule.test)(v)).count();
            let ratio = if sampled == 0 {
                0.0
            } else {
                passed as f64 / sampled as f64
            };
            pass_ratios.push((rule.role, ratio));

            if role.is_none() && sampled > 0 && passed * 100 >= rule.threshold_pct * sampled {
                role = Some(rule.role);
            }
        }

        ColumnAnalysis {
            name: table.headers.get(index).cloned().unwrap_or_default(),
            sampled,
            pass_ratios,
            role,
        }
    }

    /// Roles a statement needs that the assignment lacks.
    ///
    /// `amount` is satisfied by any amount-bearing role.
    pub fn missing_roles(&self, assignment: &RoleAssignment) -> Vec<Role> {
        let mut missing = Vec::new();
        if !assignment.has_role(Role::Date) {
            missing.push(Role::Date);
        }
        if !assignment.has_amount() {
            missing.push(Role::Amount);
        }
        if !assignment.has_role(Role::Description) {
            missing.push(Role::Description);
        }
        missing
    }

    /// Check that the assignment carries every required role.
    pub fn validate(&self, assignment: &RoleAssignment, context: &str) -> Result<()> {
        let missing = self.missing_roles(assignment);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConvertError::MissingRoles {
                context: context.to_string(),
                missing,
            })
        }
    }
}

impl Default for ColumnDetector {
    fn default() -> Self {
        Self::new()
    }
}
