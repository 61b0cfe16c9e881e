// src/tests/router_tests/api_tests.rs

use crate::cms::webhook::{sign, SIGNATURE_HEADER};
use crate::router::handle;
use crate::tests::utils::{body_json, get, post, test_state};
use astra::{Body, Request};

const SECRET: &str = "webhook-secret";

fn webhook(body: &str, signature: Option<String>) -> Request {
    let mut builder = http::Request::builder()
        .method("POST")
        .uri("/api/revalidate")
        .header("Content-Type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header(SIGNATURE_HEADER, signature);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[test]
fn revalidate_drops_cached_listings() {
    let (state, source) = test_state(&[("SANITY_WEBHOOK_SECRET", SECRET)]);
    handle(get("/"), &state).unwrap();
    assert_eq!(source.calls(), 1);

    let body = r#"{"_type":"property","slug":{"current":"kas-merkezde-kiralik-daire"}}"#;
    let signature = sign(SECRET, "1714000000000", body.as_bytes()).unwrap();
    let mut resp = handle(webhook(body, Some(signature)), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let json = body_json(&mut resp);
    assert_eq!(json["revalidated"], true);
    assert_eq!(json["paths"][2], "/ilan/kas-merkezde-kiralik-daire");

    handle(get("/"), &state).unwrap();
    assert_eq!(source.calls(), 2);
}

#[test]
fn revalidate_rejects_bad_signature() {
    let (state, _) = test_state(&[("SANITY_WEBHOOK_SECRET", SECRET)]);
    let body = r#"{"_type":"property"}"#;
    let signature = sign("not-the-secret", "1", body.as_bytes()).unwrap();

    let resp = handle(webhook(body, Some(signature)), &state).unwrap();
    assert_eq!(resp.status(), 401);

    let resp = handle(webhook(body, None), &state).unwrap();
    assert_eq!(resp.status(), 401);
}

#[test]
fn revalidate_without_secret_is_unauthorized() {
    let (state, _) = test_state(&[]);
    let body = r#"{"_type":"property"}"#;
    let signature = sign(SECRET, "1", body.as_bytes()).unwrap();

    let resp = handle(webhook(body, Some(signature)), &state).unwrap();
    assert_eq!(resp.status(), 401);
}

#[test]
fn revalidate_without_type_is_bad_request() {
    let (state, _) = test_state(&[("SANITY_WEBHOOK_SECRET", SECRET)]);
    let body = r#"{"slug":{"current":"x"}}"#;
    let signature = sign(SECRET, "1", body.as_bytes()).unwrap();

    let resp = handle(webhook(body, Some(signature)), &state).unwrap();
    assert_eq!(resp.status(), 400);
}

#[test]
fn send_email_requires_fields() {
    let (state, _) = test_state(&[]);
    let req = post(
        "/api/send-email",
        "application/json",
        r#"{"name":"Ali","email":"ali@example.com"}"#,
    );
    let mut resp = handle(req, &state).unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(
        body_json(&mut resp)["error"],
        "Name, email and message are required"
    );
}

#[test]
fn send_email_null_name_is_a_missing_field() {
    let (state, _) = test_state(&[]);
    let req = post(
        "/api/send-email",
        "application/json",
        r#"{"name":null,"email":"ali@example.com","message":"Merhaba","phone":""}"#,
    );
    let mut resp = handle(req, &state).unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(
        body_json(&mut resp)["error"],
        "Name, email and message are required"
    );
}

#[test]
fn send_email_rejects_malformed_address() {
    let (state, _) = test_state(&[]);
    let req = post(
        "/api/send-email",
        "application/json",
        r#"{"name":"Ali","email":"ali","message":"Merhaba"}"#,
    );
    let mut resp = handle(req, &state).unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(
        body_json(&mut resp)["error"],
        "A valid email address is required"
    );
}

#[test]
fn send_email_rejects_malformed_json() {
    let (state, _) = test_state(&[]);
    let resp = handle(post("/api/send-email", "application/json", "{"), &state).unwrap();
    assert_eq!(resp.status(), 400);
}

#[test]
fn send_email_without_mail_service_is_unavailable() {
    let (state, _) = test_state(&[]);
    let req = post(
        "/api/send-email",
        "application/json",
        r#"{"name":"Ali","email":"ali@example.com","message":"Merhaba","subject":"Randevu"}"#,
    );
    let mut resp = handle(req, &state).unwrap();
    assert_eq!(resp.status(), 503);
    assert!(body_json(&mut resp)["error"].is_string());
}

#[test]
fn reverse_geocode_validates_coordinates() {
    let (state, _) = test_state(&[]);
    for uri in [
        "/api/reverse-geocode",
        "/api/reverse-geocode?lat=abc&lng=30.7",
        "/api/reverse-geocode?lat=95&lng=30.7",
    ] {
        let resp = handle(get(uri), &state).unwrap();
        assert_eq!(resp.status(), 400, "{uri}");
    }
}

#[test]
fn paste_html_returns_blocks() {
    let (state, _) = test_state(&[]);
    let req = post(
        "/api/paste-html",
        "text/html",
        "<h2>Özellikler</h2><p>Merkezi <strong>konum</strong></p>",
    );
    let mut resp = handle(req, &state).unwrap();
    assert_eq!(resp.status(), 200);

    let blocks = body_json(&mut resp);
    assert_eq!(blocks[0]["style"], "h2");
    assert_eq!(blocks[1]["_type"], "block");
    assert_eq!(blocks[1]["children"][1]["marks"][0], "strong");
}
