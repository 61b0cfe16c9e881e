use crate::cms::blocks::convert_html_to_blocks;
use crate::cms::queries;
use crate::cms::webhook::{parse_webhook, WebhookError, SIGNATURE_HEADER};
use crate::domain::{listing, FilterState};
use crate::errors::ServerError;
use crate::geocode::valid_coordinates;
use crate::mailer::ContactMessage;
use crate::responses::{
    asset, html_response, json_error, json_response, redirect, text_response, xml_response,
    ResultResp,
};
use crate::sitemap;
use crate::state::AppState;
use crate::templates::pages;
use astra::{Request, Response};
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;
use url::form_urlencoded;

/// Largest request body any route accepts.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

const MAIN_CSS: &str = include_str!("../static/main.css");
const MAP_JS: &str = include_str!("../static/map.js");

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => listing_page(&req, state),
        ("GET", "/portfoy") => {
            let completed = state.store.completed_listings();
            html_response(pages::portfolio_page(&completed))
        }
        ("GET", "/iletisim") => html_response(pages::contact_page(&ContactMessage::default(), None)),
        ("POST", "/iletisim") => contact_submit(&mut req, state),
        ("GET", "/iletisim/gonderildi") => html_response(pages::contact_sent_page()),

        ("POST", "/api/send-email") => Ok(api(send_email(&mut req, state))),
        ("POST", "/api/revalidate") => Ok(api(revalidate(&mut req, state))),
        ("GET", "/api/reverse-geocode") => Ok(api(reverse_geocode(&req, state))),
        ("POST", "/api/paste-html") => Ok(api(paste_html(&mut req))),

        ("GET", "/sitemap.xml") => sitemap_xml(state),
        ("GET", "/health") => text_response(200, "ok"),
        ("GET", "/static/main.css") => asset(MAIN_CSS, "text/css; charset=utf-8"),
        ("GET", "/static/map.js") => asset(MAP_JS, "text/javascript; charset=utf-8"),

        ("GET", p) if p.starts_with("/ilan/") => property_page(&p["/ilan/".len()..], state),
        _ => Err(ServerError::NotFound),
    }
}

/// API routes answer errors as JSON instead of an HTML page.
fn api(result: ResultResp) -> Response {
    result.unwrap_or_else(json_error)
}

fn listing_page(req: &Request, state: &AppState) -> ResultResp {
    let params = parse_query(req);
    let filters = FilterState::from_query(&params, &state.config.default_province);

    let records = state.store.active_listings();
    let page = listing::run(&records, &filters);
    tracing::debug!(
        total = page.total_count,
        page = page.page,
        pages = page.total_pages,
        "listing filtered"
    );

    html_response(pages::home_page(&filters, &page))
}

fn property_page(slug: &str, state: &AppState) -> ResultResp {
    let slug = slug.trim_end_matches('/');
    if slug.is_empty() || slug.contains('/') {
        return Err(ServerError::NotFound);
    }

    match state.store.property(slug)? {
        Some(record) => html_response(pages::property_page(&record)),
        None => Err(ServerError::NotFound),
    }
}

fn contact_submit(req: &mut Request, state: &AppState) -> ResultResp {
    let body = read_body(req)?;
    let fields: HashMap<String, String> = form_urlencoded::parse(&body).into_owned().collect();
    let msg = ContactMessage::from_form(&fields);

    if let Err(e) = msg.validate() {
        return html_response(pages::contact_page(&msg, Some(e.visitor_message())));
    }

    let Some(mailer) = &state.mailer else {
        let error = "E-posta gönderimi şu anda kullanılamıyor. Lütfen bizi telefonla arayın.";
        return html_response(pages::contact_page(&msg, Some(error)));
    };

    match mailer.send_contact(&msg) {
        Ok(_) => redirect("/iletisim/gonderildi"),
        Err(e) => {
            tracing::error!("contact form mail failed: {e}");
            let error = "Mesajınız gönderilemedi. Lütfen daha sonra tekrar deneyin.";
            html_response(pages::contact_page(&msg, Some(error)))
        }
    }
}

fn send_email(req: &mut Request, state: &AppState) -> ResultResp {
    let body = read_body(req)?;
    let msg: ContactMessage = serde_json::from_slice(&body)
        .map_err(|_| ServerError::BadRequest("Invalid JSON body".to_string()))?;
    msg.validate().map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let mailer = state
        .mailer
        .as_ref()
        .ok_or_else(|| ServerError::Unavailable("Email service is not configured".to_string()))?;
    let id = mailer.send_contact(&msg)?;

    json_response(200, &json!({ "message": "Email sent successfully", "id": id }))
}

fn revalidate(req: &mut Request, state: &AppState) -> ResultResp {
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = read_body(req)?;

    let payload = parse_webhook(
        state.config.webhook_secret.as_deref(),
        signature.as_deref(),
        &body,
    )
    .map_err(|e| {
        tracing::warn!("webhook rejected: {e}");
        match e {
            WebhookError::BadPayload => ServerError::BadRequest(e.to_string()),
            _ => ServerError::Unauthorized(e.to_string()),
        }
    })?;

    state.store.invalidate(payload.slug());

    json_response(
        200,
        &json!({
            "revalidated": true,
            "paths": payload.affected_paths(),
            "now": Utc::now().timestamp_millis(),
        }),
    )
}

fn reverse_geocode(req: &Request, state: &AppState) -> ResultResp {
    let params = parse_query(req);
    let coord = |key: &str| params.get(key).and_then(|v| v.trim().parse::<f64>().ok());

    let (lat, lng) = match (coord("lat"), coord("lng")) {
        (Some(lat), Some(lng)) if valid_coordinates(lat, lng) => (lat, lng),
        _ => {
            return Err(ServerError::BadRequest(
                "lat and lng must be valid coordinates".to_string(),
            ))
        }
    };

    json_response(200, &state.geocoder.reverse(lat, lng))
}

fn paste_html(req: &mut Request) -> ResultResp {
    let body = read_body(req)?;
    let html = String::from_utf8(body)
        .map_err(|_| ServerError::BadRequest("body must be UTF-8 HTML".to_string()))?;

    json_response(200, &convert_html_to_blocks(&html))
}

fn sitemap_xml(state: &AppState) -> ResultResp {
    // The sitemap is still useful without property links.
    let entries = match state.store.source().fetch(queries::SITEMAP_ENTRIES, &[]) {
        Ok(value) => sitemap::entries_from_value(value),
        Err(e) => {
            tracing::warn!("sitemap entries unavailable: {e}");
            Vec::new()
        }
    };

    xml_response(sitemap::render(&state.config.site_url, &entries, Utc::now()))
}

fn read_body(req: &mut Request) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("could not read request body: {e}")))?;

    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("request body too large".to_string()));
    }
    Ok(buf)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
