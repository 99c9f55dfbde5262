use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    database_id::TransactionId,
    db::run_in_transaction,
    extract::{Json, Path},
    transaction::core::delete_transaction,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction, responds with `{"status": "deleted"}`.
///
/// Responds with 404 if the transaction does not exist, including when it has
/// already been deleted.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Value>, Error> {
    run_in_transaction(&state.db_connection, |connection| {
        delete_transaction(transaction_id, connection)
    })?;

    tracing::info!("Deleted transaction {transaction_id}");

    Ok(Json(json!({ "status": "deleted" })))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        Error,
        db::initialize,
        extract::Path,
        transaction::{
            NewTransaction, create_transaction,
            delete_endpoint::{DeleteTransactionState, delete_transaction_endpoint},
            get_transaction,
        },
    };

    fn must_create_test_state() -> DeleteTransactionState {
        let connection =
            Connection::open_in_memory().expect("could not create in-memory SQLite database");
        initialize(&connection).expect("could not initialize test DB");

        DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn deletes_transaction() {
        let state = must_create_test_state();
        let transaction = create_transaction(
            &NewTransaction {
                date: "2025-10-26".to_owned(),
                amount: 1.23,
                transaction_type: "expense".to_owned(),
                category: None,
                description: Some("Test".to_owned()),
            },
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = delete_transaction_endpoint(State(state.clone()), Path(transaction.id))
            .await
            .expect("could not delete transaction");

        assert_eq!(response.0, json!({ "status": "deleted" }));
        assert_eq!(
            get_transaction(transaction.id, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn delete_missing_transaction_is_not_found() {
        let state = must_create_test_state();
        let kept = create_transaction(
            &NewTransaction {
                date: "2025-10-26".to_owned(),
                amount: 1.23,
                transaction_type: "expense".to_owned(),
                category: None,
                description: None,
            },
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let result = delete_transaction_endpoint(State(state.clone()), Path(kept.id + 1)).await;

        assert_eq!(result.err(), Some(Error::NotFound));
        assert_eq!(
            get_transaction(kept.id, &state.db_connection.lock().unwrap()),
            Ok(kept)
        );
    }
}
