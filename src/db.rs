/*! The storage gateway: opens the SQLite database, ensures the schema exists and runs units of work. */

use std::{fs, path::Path, sync::Mutex};

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// Open the SQLite database at `path`, creating the file's parent directory if it does not exist.
///
/// The schema is not touched, call [initialize] once after opening.
///
/// # Errors
/// Returns a:
/// - [Error::DatabaseDirectory] if the parent directory could not be created,
/// - or [Error::SqlError] if the database could not be opened.
pub fn open_database(path: &Path) -> Result<Connection, Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|error| {
            Error::DatabaseDirectory(parent.display().to_string(), error.to_string())
        })?;
    }

    Connection::open(path).map_err(Error::from)
}

/// Create the application tables if they do not already exist.
///
/// Safe to call on a database that has already been initialized. Existing
/// tables are left as they are.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Run `work` as a single unit of work against the shared `connection`.
///
/// The connection lock is held and a SQL transaction is open for the duration
/// of `work`. The transaction is committed if `work` returns `Ok` and rolled
/// back otherwise. Both the transaction and the lock are released before this
/// function returns.
///
/// # Errors
/// Returns an [Error::DatabaseLockError] if the lock is poisoned, otherwise
/// the error returned by `work` or by the commit.
pub fn run_in_transaction<T, F>(connection: &Mutex<Connection>, work: F) -> Result<T, Error>
where
    F: FnOnce(&Connection) -> Result<T, Error>,
{
    let connection = connection.lock().map_err(|error| {
        tracing::error!("Could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let transaction = connection.unchecked_transaction()?;
    // Dropping an uncommitted transaction rolls it back.
    let result = work(&transaction)?;
    transaction.commit()?;

    Ok(result)
}
