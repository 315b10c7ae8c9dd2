//! OFX statement generation.

use std::fs;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use super::config::StatementConfig;
use super::document::{Document, Node, NodeBuilder};
use super::normalize::{
    ZERO_AMOUNT, chosen_amount, date_range, fit_id, format_date, format_datetime, normalize_amount,
    sanitize_text, transaction_type,
};
use super::writer::render_document;
use crate::error::{ConvertError, Result};
use crate::schema::Transaction;

/// Placeholder `BANKID` when neither a bank nor an institution ID is set.
pub const DEFAULT_BANK_ID: &str = "000000000";

/// Placeholder `ACCTID` when no account ID is set.
pub const DEFAULT_ACCOUNT_ID: &str = "000000000000";

/// Builds OFX statements from transactions.
///
/// The generator holds no statement settings; each call takes its
/// [`StatementConfig`]. The only state is an optional pinned timestamp.
#[derive(Debug, Clone, Default)]
pub struct StatementGenerator {
    timestamp: Option<NaiveDateTime>,
}

impl StatementGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed generation timestamp instead of the local clock.
    pub fn with_timestamp(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp: Some(timestamp),
        }
    }

    fn now(&self) -> NaiveDateTime {
        self.timestamp
            .unwrap_or_else(|| Local::now().naive_local())
    }

    /// Write a statement for `transactions` to `destination`.
    ///
    /// Nothing is written when `transactions` is empty.
    pub fn generate(
        &self,
        transactions: &[Transaction],
        destination: impl AsRef<Path>,
        config: &StatementConfig,
    ) -> Result<()> {
        let destination = destination.as_ref();
        let text = self.render(transactions, config)?;

        fs::write(destination, text).map_err(|e| ConvertError::io(destination, e))?;
        info!(
            path = %destination.display(),
            transactions = transactions.len(),
            "statement written"
        );
        Ok(())
    }

    /// Serialize a statement to text.
    pub fn render(&self, transactions: &[Transaction], config: &StatementConfig) -> Result<String> {
        let document = self.build_document(transactions, config)?;
        Ok(render_document(&document))
    }

    /// Build the statement tree.
    pub fn build_document(
        &self,
        transactions: &[Transaction],
        config: &StatementConfig,
    ) -> Result<Document> {
        if transactions.is_empty() {
            return Err(ConvertError::NoTransactions);
        }

        let now = self.now();
        let root = NodeBuilder::new("OFX")
            .node(signon_section(config, &now))
            .node(bank_section(transactions, config, &now))
            .build();

        Ok(Document::new(header_fields(config), root))
    }
}

fn header_fields(config: &StatementConfig) -> Vec<(String, String)> {
    [
        ("OFXHEADER", "100"),
        ("DATA", "OFXSGML"),
        ("VERSION", config.ofx_version.as_str()),
        ("SECURITY", "NONE"),
        ("ENCODING", "UTF-8"),
        ("CHARSET", "CSUNICODE"),
        ("COMPRESSION", "NONE"),
        ("OLDFILEUID", "NONE"),
        ("NEWFILEUID", "NONE"),
    ]
    .iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

fn status(builder: NodeBuilder) -> NodeBuilder {
    builder.container("STATUS", |s| s.leaf("CODE", "0").leaf("SEVERITY", "INFO"))
}

fn signon_section(config: &StatementConfig, now: &NaiveDateTime) -> Node {
    let stamp = format_datetime(now);

    NodeBuilder::new("SIGNONMSGSRSV1")
        .container("SONRS", |sonrs| {
            let sonrs = status(sonrs)
                .leaf("DTSERVER", stamp.as_str())
                .leaf("LANGUAGE", "ENG")
                .leaf("DTPROFUP", stamp.as_str())
                .leaf("DTACCTUP", stamp.as_str());

            if config.fi_org.is_none() && config.fi_id.is_none() {
                return sonrs;
            }
            sonrs.container("FI", |fi| {
                fi.leaf_opt("ORG", config.fi_org.as_deref().map(sanitize_text))
                    .leaf_opt("FID", config.fi_id.as_deref().map(sanitize_text))
            })
        })
        .build()
}

fn bank_section(
    transactions: &[Transaction],
    config: &StatementConfig,
    now: &NaiveDateTime,
) -> Node {
    let (start, end) = date_range(transactions).unwrap_or((*now, *now));
    debug!(
        start = %format_datetime(&start),
        end = %format_datetime(&end),
        "statement date range"
    );

    let bank_id = sanitize_text(
        config
            .bank_id
            .as_deref()
            .or(config.fi_id.as_deref())
            .unwrap_or(DEFAULT_BANK_ID),
    );
    let account_id = sanitize_text(config.account_id.as_deref().unwrap_or(DEFAULT_ACCOUNT_ID));

    let tran_list = transactions.iter().fold(
        NodeBuilder::new("BANKTRANLIST")
            .leaf("DTSTART", format_datetime(&start))
            .leaf("DTEND", format_datetime(&end)),
        |list, t| list.node(transaction_entry(t, now)),
    );

    let stmtrs = NodeBuilder::new("STMTRS")
        .leaf("CURDEF", sanitize_text(&config.currency))
        .container("BANKACCTFROM", |acct| {
            acct.leaf("BANKID", bank_id)
                .leaf("ACCTID", account_id)
                .leaf("ACCTTYPE", config.account_type.as_str())
        })
        .node(tran_list.build());

    let stmtrs = balance_block(stmtrs, "LEDGERBAL", config.ledger_balance.as_deref(), now);
    let stmtrs = balance_block(stmtrs, "AVAILBAL", config.available_balance.as_deref(), now);

    NodeBuilder::new("BANKMSGSRSV1")
        .container("STMTTRNRS", |trnrs| status(trnrs.leaf("TRNUID", "0")).node(stmtrs.build()))
        .build()
}

fn balance_block(
    builder: NodeBuilder,
    tag: &str,
    balance: Option<&str>,
    now: &NaiveDateTime,
) -> NodeBuilder {
    match balance {
        Some(amount) => builder.container(tag, |b| {
            b.leaf("BALAMT", normalize_amount(amount))
                .leaf("DTASOF", format_datetime(now))
        }),
        None => builder,
    }
}

fn transaction_entry(transaction: &Transaction, now: &NaiveDateTime) -> Node {
    let posted = format_date(&transaction.date, now);
    let raw_amount = chosen_amount(transaction);
    let amount = raw_amount.map_or_else(|| ZERO_AMOUNT.to_string(), normalize_amount);
    let id = fit_id(
        &transaction.date,
        raw_amount.unwrap_or(ZERO_AMOUNT),
        &transaction.description,
    );

    NodeBuilder::new("STMTTRN")
        .leaf("TRNTYPE", transaction_type(transaction).as_str())
        .leaf("DTPOSTED", posted.as_str())
        .leaf("DTUSER", posted.as_str())
        .leaf("TRNAMT", amount)
        .leaf("FITID", id)
        .leaf("NAME", sanitize_text(&transaction.description))
        .build()
}
