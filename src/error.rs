use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::BettingError;
use crate::ports::RepositoryError;
use crate::services::football::ProviderError;
use crate::services::{AuthError, FavoritesError};
use crate::use_cases::UseCaseError;
use crate::validation::ValidationError;

const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            INTERNAL_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<BettingError> for AppError {
    fn from(e: BettingError) -> Self {
        let message = e.to_string();
        match e {
            BettingError::InsufficientFunds | BettingError::NotActive | BettingError::LiveBet => {
                AppError::BadRequest(message)
            }
            BettingError::BetNotFound | BettingError::UserNotFound => AppError::NotFound(message),
            BettingError::NotOwner => AppError::Unauthorized(message),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Rejected(rule) => rule.into(),
            RepositoryError::NotFound(what) => {
                tracing::debug!(what = %what, "Repository lookup missed");
                AppError::NotFound("Not found".to_string())
            }
            RepositoryError::Database(db) => AppError::Database(db),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<UseCaseError> for AppError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Validation(v) => v.into(),
            UseCaseError::Repository(r) => r.into(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        let message = e.to_string();
        match e {
            AuthError::Invalid(_)
            | AuthError::EmailTaken
            | AuthError::UsernameTaken
            | AuthError::WrongPassword => AppError::BadRequest(message),
            AuthError::InvalidCredentials => AppError::Unauthorized(message),
            AuthError::UserNotFound => AppError::NotFound(message),
            AuthError::Repository(r) => r.into(),
            AuthError::Hashing(_) | AuthError::Token(_) => AppError::Internal(message),
        }
    }
}

impl From<FavoritesError> for AppError {
    fn from(e: FavoritesError) -> Self {
        let message = e.to_string();
        match e {
            FavoritesError::UnknownTeam | FavoritesError::AlreadyFavorite => {
                AppError::BadRequest(message)
            }
            FavoritesError::NotFavorite | FavoritesError::UserNotFound => {
                AppError::NotFound(message)
            }
            FavoritesError::Repository(r) => r.into(),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_betting_error_status_codes() {
        let cases = [
            (BettingError::InsufficientFunds, StatusCode::BAD_REQUEST),
            (BettingError::NotActive, StatusCode::BAD_REQUEST),
            (BettingError::LiveBet, StatusCode::BAD_REQUEST),
            (BettingError::BetNotFound, StatusCode::NOT_FOUND),
            (BettingError::UserNotFound, StatusCode::NOT_FOUND),
            (BettingError::NotOwner, StatusCode::UNAUTHORIZED),
        ];

        for (error, expected) in cases {
            assert_eq!(AppError::from(error).status_code(), expected);
        }
    }

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(AuthError::WrongPassword).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(AuthError::EmailTaken).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_favorites_error_status_codes() {
        assert_eq!(
            AppError::from(FavoritesError::NotFavorite).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(FavoritesError::AlreadyFavorite).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_rejection_body_carries_the_rule_message() {
        let error: AppError = RepositoryError::Rejected(BettingError::InsufficientFunds).into();
        let (status, body) = body_of(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Insufficient balance"}));
    }

    #[tokio::test]
    async fn test_repository_miss_hides_internal_detail() {
        let error: AppError = RepositoryError::NotFound("row".to_string()).into();
        let (status, body) = body_of(error).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_database_error_response_is_generic() {
        let (status, body) = body_of(AppError::Database(sqlx::Error::RowNotFound)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_MESSAGE);
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let error: AppError = ValidationError::new("stake", "must be between 0.01 and 10000.00").into();
        let (status, body) = body_of(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "stake: must be between 0.01 and 10000.00");
    }
}
