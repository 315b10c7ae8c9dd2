//! Statement-level settings passed into each generation call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// Default OFX protocol version (OFX 1.0.2).
pub const DEFAULT_OFX_VERSION: &str = "102";

/// Default ISO 4217 currency code.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Kind of bank account the statement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    #[serde(rename = "MONEYMRKT")]
    MoneyMarket,
    #[serde(rename = "CREDITLINE")]
    CreditLine,
}

impl AccountType {
    /// Tag value written to `ACCTTYPE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "CHECKING",
            AccountType::Savings => "SAVINGS",
            AccountType::MoneyMarket => "MONEYMRKT",
            AccountType::CreditLine => "CREDITLINE",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "CHECKING" => Ok(AccountType::Checking),
            "SAVINGS" => Ok(AccountType::Savings),
            "MONEYMRKT" => Ok(AccountType::MoneyMarket),
            "CREDITLINE" => Ok(AccountType::CreditLine),
            other => Err(ConvertError::UnsupportedFormat(format!(
                "account type '{}'",
                other
            ))),
        }
    }
}

/// Institution, account and balance details for a generated statement.
///
/// Everything is optional; missing identifiers render as zero placeholders
/// and missing balances omit their blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementConfig {
    /// OFX protocol version written to the header.
    pub ofx_version: String,
    /// Financial institution organization name (`FI/ORG`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fi_org: Option<String>,
    /// Financial institution ID (`FI/FID`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fi_id: Option<String>,
    /// Routing number; falls back to `fi_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub account_type: AccountType,
    pub currency: String,
    /// Ledger balance figure; `LEDGERBAL` is written only when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_balance: Option<String>,
    /// Available balance figure; `AVAILBAL` is written only when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_balance: Option<String>,
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            ofx_version: DEFAULT_OFX_VERSION.to_string(),
            fi_org: None,
            fi_id: None,
            bank_id: None,
            account_id: None,
            account_type: AccountType::Checking,
            currency: DEFAULT_CURRENCY.to_string(),
            ledger_balance: None,
            available_balance: None,
        }
    }
}

impl StatementConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ofx_version(mut self, version: impl Into<String>) -> Self {
        self.ofx_version = version.into();
        self
    }

    /// Set the institution name and ID.
    pub fn with_institution(mut self, org: impl Into<String>, fid: impl Into<String>) -> Self {
        self.fi_org = Some(org.into());
        self.fi_id = Some(fid.into());
        self
    }

    pub fn with_bank_id(mut self, bank_id: impl Into<String>) -> Self {
        self.bank_id = Some(bank_id.into());
        self
    }

    pub fn with_account(
        mut self,
        account_id: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        self.account_id = Some(account_id.into());
        self.account_type = account_type;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_ledger_balance(mut self, balance: impl Into<String>) -> Self {
        self.ledger_balance = Some(balance.into());
        self
    }

    pub fn with_available_balance(mut self, balance: impl Into<String>) -> Self {
        self.available_balance = Some(balance.into());
        self
    }

    /// Load settings from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StatementConfig::default();
        assert_eq!(config.ofx_version, "102");
        assert_eq!(config.currency, "USD");
        assert_eq!(config.account_type, AccountType::Checking);
        assert!(config.ledger_balance.is_none());
    }

    #[test]
    fn test_account_type_parse() {
        assert_eq!("savings".parse::<AccountType>().unwrap(), AccountType::Savings);
        assert_eq!("MoneyMrkt".parse::<AccountType>().unwrap(), AccountType::MoneyMarket);
        assert!("brokerage".parse::<AccountType>().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = StatementConfig::from_json(
            r#"{"account_id": "987654321", "account_type": "CREDITLINE", "ledger_balance": "1,000.00"}"#,
        )
        .unwrap();

        assert_eq!(config.account_id.as_deref(), Some("987654321"));
        assert_eq!(config.account_type, AccountType::CreditLine);
        assert_eq!(config.currency, "USD");
        assert_eq!(config.ledger_balance.as_deref(), Some("1,000.00"));
    }
}
