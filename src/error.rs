use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors produced while turning an uploaded roster export into a download.
///
/// The first three variants are rejected before any parsing happens and map
/// to 400. Everything else is a processing fault and maps to 500 with the
/// failure text in a JSON body.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("File must be a CSV file")]
    UnsupportedExtension,

    #[error("multipart field 'file' missing from upload")]
    MissingFile,

    #[error("invalid multipart upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("uploaded file is empty")]
    EmptyUpload,

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("input has {columns} columns, extraction needs at least {required}")]
    TooNarrow { columns: usize, required: usize },

    #[error("row {row} has {found} columns, extraction needs at least {required}")]
    RowTooShort {
        row: usize,
        found: usize,
        required: usize,
    },

    #[error("failed to build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build response: {0}")]
    Response(#[from] axum::http::Error),
}

impl ProcessError {
    /// HTTP status this error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            ProcessError::UnsupportedExtension
            | ProcessError::MissingFile
            | ProcessError::Multipart(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProcessError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("request failed: {}", self);
            format!("Error processing CSV: {}", self)
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "status": "error",
            "message": message,
        }));

        (status, body).into_response()
    }
}
