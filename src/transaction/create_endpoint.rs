use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    db::run_in_transaction,
    extract::Json,
    transaction::{NewTransaction, Transaction, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction, responds with the created
/// transaction including its assigned ID.
///
/// Bodies that do not match [NewTransaction] are rejected by the extractor
/// before the database is touched.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<Json<Transaction>, Error> {
    let transaction = run_in_transaction(&state.db_connection, |connection| {
        create_transaction(&new_transaction, connection)
    })?;

    tracing::info!("Created transaction {}", transaction.id);

    Ok(Json(transaction))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        extract::Json,
        transaction::{
            NewTransaction,
            create_endpoint::{CreateTransactionState, create_transaction_endpoint},
            get_transaction,
        },
    };

    #[tokio::test]
    async fn can_create_transaction() {
        let connection =
            Connection::open_in_memory().expect("could not create in-memory SQLite database");
        initialize(&connection).expect("could not initialize test DB");
        let state = CreateTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        };
        let new_transaction = NewTransaction {
            date: "2024-01-01".to_owned(),
            amount: 50.0,
            transaction_type: "expense".to_owned(),
            category: Some("food".to_owned()),
            description: Some("lunch".to_owned()),
        };

        let Json(created) =
            create_transaction_endpoint(State(state.clone()), Json(new_transaction.clone()))
                .await
                .expect("could not create transaction");

        assert_eq!(created, new_transaction.with_id(created.id));
        let stored = get_transaction(
            created.id,
            &state.db_connection.lock().expect("could not acquire lock"),
        )
        .expect("could not get test transaction");
        assert_eq!(stored, created);
    }
}
