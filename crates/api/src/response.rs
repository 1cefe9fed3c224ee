//! Shared response envelope for API handlers.
//!
//! Every success body is `{ "success": true, "data": ..., "message"?: ... }`;
//! failures are produced by [`AppError`](crate::error::AppError). Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!` so the envelope
//! stays consistent.

use serde::Serialize;

/// Standard success envelope.
///
/// ```ignore
/// Ok(Json(DataResponse::new(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// Attach a human-readable message for the client to display.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
