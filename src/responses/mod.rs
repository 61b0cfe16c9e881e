pub mod errors;
pub mod html;
pub mod json;
pub mod xml;

pub use errors::{html_error_response, ResultResp};
pub use html::{asset, html_response, redirect, text_response};
pub use json::{json_error, json_response};
pub use xml::xml_response;
