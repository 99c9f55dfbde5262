//! Transaction management for the finance API.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` read shape and the `NewTransaction` create shape
//! - Database functions for storing, querying, and managing transactions
//! - Route handlers for the `/transactions` endpoints

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;
mod list_endpoint;

pub use core::{NewTransaction, Transaction, create_transaction_table};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::get_transactions_endpoint;

#[cfg(test)]
pub use core::{count_transactions, create_transaction, get_transaction};
