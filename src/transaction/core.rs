//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row, ToSql};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::{DatabaseId, TransactionId},
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// This is the shape that is read back from the database and sent to clients.
/// To create a new `Transaction`, use [NewTransaction] with [create_transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// When the transaction happened, stored as the text the client sent.
    pub date: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// Whether the transaction is an "income" or an "expense".
    ///
    /// Other values are accepted and stored as is.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// What the money was spent on or where it came from, e.g. "food".
    pub category: Option<String>,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
    /// The ID of the transaction.
    pub id: DatabaseId,
}

/// The fields of a transaction that the client supplies.
///
/// Used both to create a transaction and to replace every field of an
/// existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// When the transaction happened.
    pub date: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// Whether the transaction is an "income" or an "expense".
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// What the money was spent on or where it came from.
    #[serde(default)]
    pub category: Option<String>,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTransaction {
    /// The SQL parameters for the columns `date, amount, type, category, description`, in that order.
    pub fn to_params(&self) -> [&dyn ToSql; 5] {
        [
            &self.date,
            &self.amount,
            &self.transaction_type,
            &self.category,
            &self.description,
        ]
    }

    /// Attach the database `id` to the fields.
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            date: self.date,
            amount: self.amount,
            transaction_type: self.transaction_type,
            category: self.category,
            description: self.description,
            id,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const TRANSACTION_COLUMNS: &str = "id, date, amount, type, category, description";

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn create_transaction(
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "INSERT INTO transactions (date, amount, type, category, description)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(&transaction.to_params(), map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = :id"
        ))?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve every transaction in the database in the order they were created.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions ORDER BY id ASC"
        ))?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Overwrite every field of the transaction `id` with the fields in `transaction`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    transaction: &NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let mut params = transaction.to_params().to_vec();
    params.push(&id);

    let transaction = connection
        .prepare(&format!(
            "UPDATE transactions
             SET date = ?1, amount = ?2, type = ?3, category = ?4, description = ?5
             WHERE id = ?6
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(params.as_slice(), map_transaction_row)?;

    Ok(transaction)
}

/// Delete the transaction `id` from the database.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected =
        connection.execute("DELETE FROM transactions WHERE id = :id", &[(":id", &id)])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the transaction table in the database if it does not exist.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    // AUTOINCREMENT stops the IDs of deleted transactions from being reused.
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                amount REAL NOT NULL,
                type TEXT NOT NULL,
                category TEXT,
                description TEXT
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS ix_transactions_id ON transactions(id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns in the order `id, date, amount, type, category, description`.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let amount = row.get(2)?;
    let transaction_type = row.get(3)?;
    let category = row.get(4)?;
    let description = row.get(5)?;

    Ok(Transaction {
        date,
        amount,
        transaction_type,
        category,
        description,
        id,
    })
}

// ============================================================================
// TESTS
// ============================================================================
