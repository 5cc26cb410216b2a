//! # Transaction Module
//!
//! The transaction and receipt records carried by a block body.
//!
//! ```text
//! builder.rs — Transaction (legacy layout) and its fluent builder
//! receipt.rs — Receipt and Log, with per-receipt bloom derivation
//! ```
//!
//! Execution is out of scope: nothing here validates signatures, nonces or
//! balances. The block core needs a canonical encoding and an identity hash,
//! and that is what these types provide.

pub mod builder;
pub mod receipt;

pub use builder::{Transaction, TransactionBuilder};
pub use receipt::{Log, Receipt};
