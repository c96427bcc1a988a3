pub mod health;
pub mod shell;

use crate::error::ApiError;
use axum::http::Uri;

/// Unknown API paths get a JSON 404 instead of the app's index page.
pub async fn api_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no API route for {}", uri.path()))
}
