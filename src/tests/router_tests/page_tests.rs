// src/tests/router_tests/page_tests.rs

use crate::errors::ServerError;
use crate::responses::html_error_response;
use crate::router::handle;
use crate::tests::utils::{body_string, get, post, test_state};

#[test]
fn property_detail_page() {
    let (state, _) = test_state(&[]);
    let mut resp = handle(get("/ilan/lara-deniz-manzarali-daire"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("Lara Deniz Manzaralı 3+1 Daire"));
    assert!(body.contains("4.250.000 ₺"));
    assert!(body.contains(r#"data-lat="36.8601""#));
    assert!(body.contains("Hatice Özen"));
}

#[test]
fn property_detail_shows_floor_age_and_amenities() {
    let (state, _) = test_state(&[]);
    let mut resp = handle(get("/ilan/lara-deniz-manzarali-daire"), &state).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("<th>Bina Yaşı</th><td>1-5</td>"));
    assert!(body.contains("<th>Bulunduğu Kat</th><td>Bahçe Katı</td>"));
    assert!(body.contains("<h3>İç Özellikler</h3><ul><li>Klima</li><li>Asansör</li></ul>"));
    assert!(body.contains("<h3>Dış Özellikler</h3><ul><li>Otopark</li></ul>"));
    assert!(!body.contains("<h3>Ulaşım</h3>"));
}

#[test]
fn land_map_is_centred_on_parcel() {
    let (state, _) = test_state(&[]);
    let mut resp = handle(get("/ilan/kepez-yatirimlik-arsa"), &state).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains(r#"data-approximate="true""#));
    assert!(body.contains(r#"data-radius="500""#));
    assert!(body.contains("data-polygon="));
}

#[test]
fn unknown_slug_is_not_found() {
    let (state, _) = test_state(&[]);
    let Err(err) = handle(get("/ilan/yok-boyle-bir-ilan"), &state) else {
        panic!("expected an error for an unknown slug");
    };
    assert!(matches!(err, ServerError::NotFound));

    let mut resp = html_error_response(err);
    assert_eq!(resp.status(), 404);
    assert!(body_string(&mut resp).contains("Aradığınız sayfa bulunamadı."));
}

#[test]
fn content_store_failure_on_detail_is_bad_gateway() {
    let (state, source) = test_state(&[]);
    source.set_failing(true);

    let Err(err) = handle(get("/ilan/lara-deniz-manzarali-daire"), &state) else {
        panic!("expected a content store error");
    };
    assert_eq!(err.status(), 502);
}

#[test]
fn unknown_route_is_not_found() {
    let (state, _) = test_state(&[]);
    assert!(matches!(
        handle(get("/hakkimizda"), &state),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn portfolio_lists_completed_deals() {
    let (state, _) = test_state(&[]);
    let mut resp = handle(get("/portfoy"), &state).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("Muratpaşa Satılan Dubleks"));
    assert!(body.contains("Alanya Kiralanan Yazlık"));
    assert!(!body.contains("Konyaaltı Havuzlu Villa"));
}

#[test]
fn contact_form_renders() {
    let (state, _) = test_state(&[]);
    let mut resp = handle(get("/iletisim"), &state).unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains(r#"action="/iletisim""#));
    assert!(body.contains(r#"name="message""#));
}

#[test]
fn contact_post_with_missing_fields_keeps_input() {
    let (state, _) = test_state(&[]);
    let req = post(
        "/iletisim",
        "application/x-www-form-urlencoded",
        "name=Ay%C5%9Fe&email=&message=",
    );
    let mut resp = handle(req, &state).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("Lütfen ad, e-posta ve mesaj alanlarını doldurun."));
    assert!(body.contains(r#"value="Ayşe""#));
}

#[test]
fn contact_post_with_bad_email_asks_for_a_valid_one() {
    let (state, _) = test_state(&[]);
    let req = post(
        "/iletisim",
        "application/x-www-form-urlencoded",
        "name=Ali&email=ali.example.com&message=Merhaba&phone=",
    );
    let mut resp = handle(req, &state).unwrap();
    let body = body_string(&mut resp);

    assert!(body.contains("Lütfen geçerli bir e-posta adresi girin."));
    assert!(!body.contains("Lütfen ad, e-posta ve mesaj alanlarını doldurun."));
    assert!(body.contains(r#"value="ali.example.com""#));
}

#[test]
fn contact_post_without_mailer_says_so() {
    let (state, _) = test_state(&[]);
    let req = post(
        "/iletisim",
        "application/x-www-form-urlencoded",
        "name=Ali&email=ali%40example.com&message=Merhaba",
    );
    let mut resp = handle(req, &state).unwrap();
    assert!(body_string(&mut resp).contains("E-posta gönderimi şu anda kullanılamıyor."));
}

#[test]
fn sitemap_lists_active_properties() {
    let (state, _) = test_state(&[("SITE_URL", "https://haticeozen.example")]);
    let mut resp = handle(get("/sitemap.xml"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(&mut resp);
    assert!(body.contains("<loc>https://haticeozen.example/portfoy</loc>"));
    assert!(body.contains("<loc>https://haticeozen.example/ilan/kepez-yatirimlik-arsa</loc>"));
    assert!(!body.contains("muratpasa-satilan-dubleks"));
}

#[test]
fn health() {
    let (state, _) = test_state(&[]);
    let mut resp = handle(get("/health"), &state).unwrap();
    assert_eq!(body_string(&mut resp), "ok");
}
