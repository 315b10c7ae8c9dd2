//! OFX statement construction and serialization.

pub mod config;
pub mod document;
pub mod normalize;
mod generator;
mod writer;

pub use config::{AccountType, StatementConfig};
pub use document::{Document, Node, NodeBuilder};
pub use generator::{DEFAULT_ACCOUNT_ID, DEFAULT_BANK_ID, StatementGenerator};
pub use normalize::TransactionType;
pub use writer::{render_document, write_document};
