use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;

use crate::api::models::ErrorResponse;
use crate::config::{AppConfig, Roster};
use crate::database::DbPool;
use crate::errors::BalanceError;

pub mod players;
pub mod teams;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
    pub roster: Roster,
}

/// Failure of a request handler, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unprocessable(String),
    Internal(String),
}

impl From<BalanceError> for ApiError {
    fn from(e: BalanceError) -> Self {
        match e {
            BalanceError::InvalidInput(_) => ApiError::BadRequest(e.to_string()),
            BalanceError::NoData | BalanceError::EmptyTeam => ApiError::Unprocessable(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        error!("Request failed: {:?}", e);
        ApiError::Internal(format!("{:#}", e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
