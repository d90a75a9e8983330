//! JSON envelope shared by every endpoint: `{status, message?, data?}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Outcome marker carried in every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// Response body wrapper
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: Option<String>, data: Option<T>) -> Self {
        Self {
            status: Status::Success,
            message,
            data,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Render the envelope with an explicit status code
    pub fn into_response_with(self, code: StatusCode) -> Response {
        (code, Json(self)).into_response()
    }
}

/// Successful handler result: status code plus a `success` envelope.
#[derive(Debug)]
pub struct ApiResponse<T> {
    code: StatusCode,
    envelope: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// `200 OK` carrying only data
    pub fn ok(data: T) -> Self {
        Self {
            code: StatusCode::OK,
            envelope: Envelope::success(None, Some(data)),
        }
    }

    /// `201 Created` carrying a message and data
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            code: StatusCode::CREATED,
            envelope: Envelope::success(Some(message.into()), Some(data)),
        }
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }
}

impl ApiResponse<()> {
    /// `200 OK` carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::OK,
            envelope: Envelope::success(Some(message.into()), None),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        self.envelope.into_response_with(self.code)
    }
}
