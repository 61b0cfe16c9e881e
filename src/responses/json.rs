// responses/json.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;
use serde_json::json;

pub fn json_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

/// `{ "error": "…" }` with the error's status code. API routes answer
/// with this instead of an HTML page.
pub fn json_error(err: ServerError) -> Response {
    let status = err.status();
    if status >= 500 {
        tracing::error!("{err}");
    } else {
        tracing::debug!("{err}");
    }

    json_response(status, &json!({ "error": err.public_message() }))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
