//! Service-layer error type
//!
//! `ServiceError` sits between the repositories (`sqlx::Error`, cache
//! backends, renderer failures) and the API layer (`AppError`), so handlers can use
//! `?` without mapping every infrastructure error by hand.

use axum::response::IntoResponse;
use card_render::RenderError;
use shared::error::{AppError, ErrorCode};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// - `Db`: database or cache backend error (logged, mapped to DatabaseError)
/// - `Render`: card could not be rendered or encoded
/// - `App`: business-rule error, passed through to the client
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    Render(RenderError),
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<RenderError> for ServiceError {
    fn from(e: RenderError) -> Self {
        ServiceError::Render(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
            ServiceError::Render(RenderError::UnknownMode(mode)) => AppError::with_message(
                ErrorCode::InvalidRenderMode,
                format!("Unknown render mode '{mode}'"),
            ),
            ServiceError::Render(err @ RenderError::Encode(_)) => {
                tracing::error!(error = %err, "Card export failed");
                AppError::new(ErrorCode::ExportFailed)
            }
            ServiceError::Render(err) => {
                tracing::error!(error = %err, "Card render failed");
                AppError::new(ErrorCode::RenderFailed)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
