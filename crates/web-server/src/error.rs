use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use database::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(DbError),
    #[error("Template rendering error: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// A store miss becomes a 404; every other storage failure is a 500.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => {
                AppError::NotFound("The requested student does not exist.".to_string())
            }
            other => AppError::Database(other),
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Render(render_err) => {
                tracing::error!(error = ?render_err, "Template rendering error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The page could not be rendered".to_string(),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        let body = Html(format!(
            "<!DOCTYPE html><html lang=\"en\">\
             <head><meta charset=\"utf-8\"><title>{status}</title></head>\
             <body><h1>{status}</h1><p>{error_message}</p>\
             <p><a href=\"/Student/List\">Back to list</a></p></body></html>"
        ));
        (status, body).into_response()
    }
}
