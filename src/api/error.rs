use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::model::{AnnouncementError, DatasetError, StorageError, SummaryError};

/// Handler error with its HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400
    #[error("{0}")]
    BadRequest(String),

    /// 404
    #[error("{0}")]
    NotFound(String),

    /// 500
    #[error("{0}")]
    Internal(String),

    /// 503
    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "detail": self.to_string(),
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

impl From<SummaryError> for ApiError {
    fn from(err: SummaryError) -> Self {
        match err {
            SummaryError::EmptyTicker => ApiError::BadRequest(err.to_string()),
            SummaryError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            // A missing dataset is a server-side configuration problem here.
            SummaryError::Dataset(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AnnouncementError> for ApiError {
    fn from(err: AnnouncementError) -> Self {
        match err {
            AnnouncementError::UploadsMissing { .. }
            | AnnouncementError::Dataset(DatasetError::NotConfigured { .. }) => {
                ApiError::Unavailable(err.to_string())
            }
            AnnouncementError::Dataset(e @ DatasetError::Read { .. }) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("background task failed: {}", err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_errors_map_to_statuses() {
        let not_found: ApiError = SummaryError::NotFound {
            ticker: "XYZ".into(),
            file: "eod_2024-01-05.csv".into(),
        }
        .into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert!(not_found.to_string().contains("eod_2024-01-05.csv"));

        let empty: ApiError = SummaryError::EmptyTicker.into();
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

        let missing: ApiError = SummaryError::Dataset(DatasetError::NotConfigured { dir: "data".into() }).into();
        assert_eq!(missing.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(missing.to_string(), "EOD CSV not found in data");
    }

    #[test]
    fn announcement_errors_map_to_statuses() {
        let uploads: ApiError = AnnouncementError::UploadsMissing { dir: "up".into() }.into();
        assert_eq!(uploads.status(), StatusCode::SERVICE_UNAVAILABLE);

        let no_data: ApiError =
            AnnouncementError::Dataset(DatasetError::NotConfigured { dir: "data".into() }).into();
        assert_eq!(no_data.status(), StatusCode::SERVICE_UNAVAILABLE);

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let read: ApiError = AnnouncementError::Dataset(DatasetError::Read {
            file: "eod.csv".into(),
            source: io.into(),
        })
        .into();
        assert_eq!(read.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_carries_status() {
        let response = ApiError::NotFound("gone".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
