use axum::{extract::State, Json};
use shared::api::ShellConfig;

use crate::AppState;

pub async fn get_shell_config(State(state): State<AppState>) -> Json<ShellConfig> {
    Json(state.shell.as_ref().clone())
}
