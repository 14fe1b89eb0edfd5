use serde_json::json;
use vercel_runtime::{Body, Error, Request, Response, StatusCode};

use crate::{
    clients::openai::CompletionBackend,
    error::{AppError, Result},
    http::response::{into_response, Reply},
    models::attributes::AttributeInput,
    services::stylist,
};

pub const STATUS_MESSAGE: &str =
    "AI Stylist API is running. POST JSON to this endpoint to get outfit suggestions.";

/// Vercel entry point for `/api/recommend`.
pub async fn handler(
    req: Request,
    backend: &dyn CompletionBackend,
) -> std::result::Result<Response<Body>, Error> {
    let reply = dispatch(req.method().as_str(), req.body(), backend).await;
    Ok(into_response(reply)?)
}

/// Routes on method and converts every failure into a JSON reply.
pub async fn dispatch(method: &str, body: &[u8], backend: &dyn CompletionBackend) -> Reply {
    tracing::debug!(method, body_len = body.len(), "Handling request");
    match method {
        "OPTIONS" => Reply::empty(StatusCode::OK),
        "GET" => Reply::json(StatusCode::OK, json!({"ok": true, "message": STATUS_MESSAGE})),
        "POST" => match recommend(body, backend).await {
            Ok(value) => Reply::json(StatusCode::OK, value),
            Err(err) => {
                log_failure(&err);
                Reply::from(&err)
            }
        },
        _ => Reply::from(&AppError::MethodNotAllowed),
    }
}

async fn recommend(body: &[u8], backend: &dyn CompletionBackend) -> Result<serde_json::Value> {
    let input = parse_body(body)?;
    stylist::recommend(backend, &input).await
}

fn parse_body(body: &[u8]) -> Result<AttributeInput> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AttributeInput::default());
    }
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))?;
    Ok(AttributeInput::from_body(value))
}

fn log_failure(err: &AppError) {
    match err {
        AppError::MissingFields | AppError::InvalidBody(_) => {
            tracing::info!(error = %err, "Rejected request")
        }
        AppError::Upstream(_) => {}
        _ => tracing::error!(error = %err, "Recommendation failed"),
    }
}
