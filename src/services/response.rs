use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
	#[error("query failed: {0}")]
	Query(#[source] sqlx::Error),

	#[error("insert failed: {0}")]
	Insert(#[source] sqlx::Error),

	#[error("conversation `{0}` not found")]
	ConversationNotFound(String),

	#[error("sender must not be empty")]
	EmptySender,

	#[error("message must not be empty")]
	EmptyMessage,

	#[error("`{0}` is not a valid boolean")]
	InvalidRedirect(String),

	#[error("malformed request body: {0}")]
	MalformedBody(String),

	#[error("template rendering failed: {0}")]
	Template(#[from] minijinja::Error),
}

impl ServiceError {
	/// Short machine-readable code sent to the client in place of the error detail.
	pub fn code(&self) -> &'static str {
		match self {
			ServiceError::Query(err) if is_decode_error(err) => "ERROR_ROWS_SCAN",
			ServiceError::Query(_) => "ERROR_DB_QUERY",
			ServiceError::Insert(_) => "CANT_INSERT_DB",
			ServiceError::ConversationNotFound(_) => "CONVERSATION_NOT_FOUND",
			ServiceError::EmptySender => "FORM_EMPTY_SENDER",
			ServiceError::EmptyMessage => "FORM_EMPTY_MESSAGE",
			ServiceError::InvalidRedirect(_) => "ERROR_PARSEBOOL",
			ServiceError::MalformedBody(_) => "ERROR_BAD_REQUEST",
			ServiceError::Template(_) => "EXECUTE_TEMPLATE_ERROR",
		}
	}

	pub fn status(&self) -> StatusCode {
		match self {
			ServiceError::ConversationNotFound(_) => StatusCode::NOT_FOUND,
			ServiceError::EmptySender | ServiceError::EmptyMessage => StatusCode::UNPROCESSABLE_ENTITY,
			ServiceError::InvalidRedirect(_) | ServiceError::MalformedBody(_) => StatusCode::BAD_REQUEST,
			ServiceError::Query(_) | ServiceError::Insert(_) | ServiceError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn log(&self) {
		let status = self.status();
		if status.is_server_error() {
			tracing::error!(code = self.code(), error = %self, "request failed");
		} else {
			tracing::debug!(code = self.code(), error = %self, "request rejected");
		}
	}
}

fn is_decode_error(err: &sqlx::Error) -> bool {
	matches!(
		err,
		sqlx::Error::ColumnDecode { .. }
			| sqlx::Error::Decode(_)
			| sqlx::Error::ColumnNotFound(_)
			| sqlx::Error::ColumnIndexOutOfBounds { .. }
			| sqlx::Error::TypeNotFound { .. }
	)
}

/// Errors on HTML routes go back as the bare code in plain text.
impl IntoResponse for ServiceError {
	fn into_response(self) -> Response {
		self.log();
		(self.status(), self.code()).into_response()
	}
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
	pub status: u16,
	pub error: &'static str,
}

/// Wraps a [`ServiceError`] raised on a JSON route so it is rendered as
/// `{"status": .., "error": ..}`.
#[derive(Debug)]
pub struct JsonError(pub ServiceError);

impl From<ServiceError> for JsonError {
	fn from(value: ServiceError) -> Self {
		JsonError(value)
	}
}

impl IntoResponse for JsonError {
	fn into_response(self) -> Response {
		self.0.log();
		let status = self.0.status();
		let body = ErrorBody {
			status: status.as_u16(),
			error: self.0.code(),
		};
		(status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod test {
	use axum::{body::to_bytes, http::header::CONTENT_TYPE};

	use super::*;

	#[test]
	fn test_decode_failures_are_reported_as_scan_errors() {
		let err = ServiceError::Query(sqlx::Error::ColumnNotFound("sender".into()));
		assert_eq!(err.code(), "ERROR_ROWS_SCAN");
		assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

		let err = ServiceError::Query(sqlx::Error::PoolTimedOut);
		assert_eq!(err.code(), "ERROR_DB_QUERY");
	}

	#[test]
	fn test_validation_errors_are_unprocessable() {
		assert_eq!(ServiceError::EmptySender.status(), StatusCode::UNPROCESSABLE_ENTITY);
		assert_eq!(ServiceError::EmptyMessage.status(), StatusCode::UNPROCESSABLE_ENTITY);
		assert_eq!(ServiceError::InvalidRedirect("maybe".into()).status(), StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn test_plain_error_body_is_the_code() {
		let response = ServiceError::ConversationNotFound("abc".into()).into_response();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);

		let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		assert_eq!(&body[..], b"CONVERSATION_NOT_FOUND");
	}

	#[tokio::test]
	async fn test_json_error_body() {
		let response = JsonError::from(ServiceError::EmptyMessage).into_response();
		assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
		assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

		let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
		assert_eq!(value, serde_json::json!({"status": 422, "error": "FORM_EMPTY_MESSAGE"}));
	}
}
