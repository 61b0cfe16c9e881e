// responses/xml.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

pub fn xml_response(body: String) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "application/xml; charset=utf-8")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
