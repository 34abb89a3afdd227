use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Produces a custom JSON body from an error at response time.
pub type BodyParser = Arc<dyn Fn(&APIError) -> Value + Send + Sync>;

/// A construction-time directive for [`APIError::with_options`].
///
/// Options are applied in the order supplied; a later option of the same
/// kind overrides an earlier one.
#[derive(Clone)]
pub enum APIErrorOption {
    PreventAbort(bool),
    BodyParser(BodyParser),
}

impl APIErrorOption {
    pub fn body_parser(parse: impl Fn(&APIError) -> Value + Send + Sync + 'static) -> Self {
        Self::BodyParser(Arc::new(parse))
    }
}

/// An error destined for the HTTP client, carrying the status code and
/// message to respond with.
///
/// Serializes as `{"statusCode": <u16>, "message": <string>}`; the abort
/// flag and body parser never reach the wire. A zero `status_code` is left
/// out of the body and the response line degrades to 500.
#[derive(Clone, Serialize)]
pub struct APIError {
    #[serde(rename = "statusCode", skip_serializing_if = "status_is_zero")]
    pub status_code: u16,
    pub message: String,
    #[serde(skip)]
    pub(crate) prevent_abort: bool,
    #[serde(skip)]
    pub(crate) body_parser: Option<BodyParser>,
}

fn status_is_zero(code: &u16) -> bool {
    *code == 0
}

impl APIError {
    /// Builds an error with the given status code and message. The code is
    /// not validated here; an invalid one becomes 500 at response time.
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            prevent_abort: false,
            body_parser: None,
        }
    }

    pub fn with_options(
        status_code: u16,
        message: impl Into<String>,
        options: impl IntoIterator<Item = APIErrorOption>,
    ) -> Self {
        Self::new(status_code, message).apply_options(options)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST.as_u16(), message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED.as_u16(), message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN.as_u16(), message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND.as_u16(), message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT.as_u16(), message)
    }

    pub fn unprocessable_entity(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY.as_u16(), message)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS.as_u16(), message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), message)
    }

    pub fn apply_options(mut self, options: impl IntoIterator<Item = APIErrorOption>) -> Self {
        for option in options {
            match option {
                APIErrorOption::PreventAbort(v) => self.prevent_abort = v,
                APIErrorOption::BodyParser(parse) => self.body_parser = Some(parse),
            }
        }
        self
    }

    /// Keeps the rest of the handler chain running after this error is
    /// translated. By default the chain is aborted.
    pub fn prevent_abort(mut self) -> Self {
        self.prevent_abort = true;
        self
    }

    /// Replaces the default JSON body with the output of `parse`.
    pub fn with_body_parser(
        mut self,
        parse: impl Fn(&APIError) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.body_parser = Some(Arc::new(parse));
        self
    }

    pub fn prevents_abort(&self) -> bool {
        self.prevent_abort
    }

    /// The JSON body this error responds with: the body parser's output when
    /// one is set, otherwise the error's own serialization.
    pub fn response_body(&self) -> Value {
        match &self.body_parser {
            Some(parse) => parse(self),
            None => serde_json::to_value(self).unwrap_or(Value::Null),
        }
    }
}

impl std::fmt::Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.message)
    }
}

impl std::fmt::Debug for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("APIError")
            .field("status_code", &self.status_code)
            .field("message", &self.message)
            .field("prevent_abort", &self.prevent_abort)
            .field("body_parser", &self.body_parser.is_some())
            .finish()
    }
}

impl std::error::Error for APIError {}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let code =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (code, Json(self.response_body())).into_response()
    }
}
