use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use narcotk_core::InventoryError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error("no matching records")]
    NoMatch,
    #[error("{0}")]
    BadRequest(String),
    #[error("registration key is invalid")]
    Unauthorized,
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Inventory(InventoryError::NotFound { .. }) | ApiError::NoMatch => {
                StatusCode::NOT_FOUND
            }
            ApiError::Inventory(InventoryError::Storage(_)) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Inventory(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Internal(format!("cannot encode JSON: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{self}");
        } else if status != StatusCode::NOT_FOUND {
            warn!("{self}");
        }
        (status, format!("ERROR: {self}\n")).into_response()
    }
}
