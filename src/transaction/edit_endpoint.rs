use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    db::run_in_transaction,
    extract::{Json, Path},
    transaction::{NewTransaction, Transaction, core::update_transaction},
};

/// The state needed to edit a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that replaces every field of a transaction, responds with
/// the updated transaction.
///
/// Responds with 404 if the transaction does not exist.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<Json<Transaction>, Error> {
    run_in_transaction(&state.db_connection, |connection| {
        update_transaction(transaction_id, &new_transaction, connection)
    })
    .inspect_err(|error| {
        if *error == Error::NotFound {
            tracing::debug!("Could not update transaction {transaction_id}: not found");
        }
    })
    .map(Json)
}
