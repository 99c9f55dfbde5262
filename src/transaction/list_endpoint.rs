use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    db::run_in_transaction,
    extract::Json,
    transaction::{Transaction, core::get_all_transactions},
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that responds with every transaction in the order they were created.
pub async fn get_transactions_endpoint(
    State(state): State<ListTransactionsState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    run_in_transaction(&state.db_connection, get_all_transactions).map(Json)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        transaction::{
            NewTransaction, create_transaction,
            list_endpoint::{ListTransactionsState, get_transactions_endpoint},
        },
    };

    fn must_create_test_state() -> ListTransactionsState {
        let connection =
            Connection::open_in_memory().expect("could not create in-memory SQLite database");
        initialize(&connection).expect("could not initialize test DB");

        ListTransactionsState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn lists_nothing_on_empty_database() {
        let state = must_create_test_state();

        let transactions = get_transactions_endpoint(State(state))
            .await
            .expect("could not list transactions");

        assert!(transactions.0.is_empty());
    }

    #[tokio::test]
    async fn lists_created_transactions() {
        let state = must_create_test_state();
        let created = create_transaction(
            &NewTransaction {
                date: "2024-02-14".to_owned(),
                amount: 80.0,
                transaction_type: "expense".to_owned(),
                category: Some("gifts".to_owned()),
                description: None,
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("could not create test transaction");

        let transactions = get_transactions_endpoint(State(state))
            .await
            .expect("could not list transactions");

        assert_eq!(transactions.0, vec![created]);
    }
}
