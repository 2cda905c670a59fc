//! Request handlers.

use axum::extract::State;

use crate::http::server::AppState;

/// `GET /`: the configured greeting, regardless of headers or query string.
pub async fn greeting_handler(State(state): State<AppState>) -> String {
    state.greeting.to_string()
}
