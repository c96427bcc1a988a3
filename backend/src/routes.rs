use axum::{routing::get, Router};

use crate::handlers::{api_not_found, shell};
use crate::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shell-config", get(shell::get_shell_config))
        .fallback(api_not_found)
}
