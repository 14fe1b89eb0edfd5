use serde_json::{json, Value};
use vercel_runtime::{Body, Response, StatusCode};

use super::cors::{ALLOWED_METHODS, CORS_HEADERS};
use crate::error::AppError;

/// What the handler decided to answer, before it is turned into a platform response.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl Reply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self { status, body: Some(body) }
    }

    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }
}

impl From<&AppError> for Reply {
    fn from(err: &AppError) -> Self {
        let (status, body) = error_response(err);
        Self::json(status, body)
    }
}

pub fn error_response(err: &AppError) -> (StatusCode, Value) {
    match err {
        AppError::MissingFields => {
            (StatusCode::BAD_REQUEST, json!({"error": "Missing required fields: season, skinHex"}))
        }
        AppError::InvalidBody(msg) => {
            (StatusCode::BAD_REQUEST, json!({"error": "Invalid JSON", "detail": msg}))
        }
        AppError::MethodNotAllowed => {
            (StatusCode::METHOD_NOT_ALLOWED, json!({"error": "Method not allowed"}))
        }
        AppError::Upstream(body) => {
            (StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "OpenAI error", "detail": body}))
        }
        AppError::Other(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "Server error", "detail": format!("{e:#}")}),
        ),
    }
}

/// Builds the platform response, adding CORS headers and `Content-Type` for JSON bodies.
pub fn into_response(reply: Reply) -> anyhow::Result<Response<Body>> {
    let mut builder = Response::builder().status(reply.status);
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }
    if reply.status == StatusCode::METHOD_NOT_ALLOWED {
        builder = builder.header("Allow", ALLOWED_METHODS);
    }

    let resp = match reply.body {
        Some(value) => builder
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(&value)?.into())?,
        None => builder.body(Body::Empty)?,
    };
    Ok(resp)
}
