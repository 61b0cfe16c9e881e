// src/tests/router_tests/listing_tests.rs

use crate::router::handle;
use crate::tests::utils::{body_string, get, test_state};

fn listing(uri: &str) -> String {
    let (state, _) = test_state(&[]);
    let mut resp = handle(get(uri), &state).unwrap();
    assert_eq!(resp.status(), 200);
    body_string(&mut resp)
}

#[test]
fn default_province_is_preselected() {
    let body = listing("/");

    assert!(body.contains("4 ilan bulundu"));
    assert!(body.contains("Lara Deniz Manzaralı 3+1 Daire"));
    assert!(!body.contains("Mezitli Sahile Yakın Daire"));
    // Completed deals never show up on the listing page.
    assert!(!body.contains("Muratpaşa Satılan Dubleks"));
}

#[test]
fn empty_province_means_all_provinces() {
    let body = listing("/?province=");
    assert!(body.contains("5 ilan bulundu"));
    assert!(body.contains("Mezitli Sahile Yakın Daire"));
}

#[test]
fn type_filter() {
    let body = listing("/?type=arsa");
    assert!(body.contains("1 ilan bulundu"));
    assert!(body.contains("Kepez Yatırımlık Arsa"));
    assert!(!body.contains("Konyaaltı Havuzlu Villa"));
}

#[test]
fn search_matches_location_case_insensitively() {
    let body = listing("/?province=&q=MEZITLI");
    assert!(body.contains("1 ilan bulundu"));
    assert!(body.contains("Mezitli Sahile Yakın Daire"));
}

#[test]
fn price_bounds_accept_grouped_digits() {
    let body = listing("/?min=3.000.000&max=5.000.000");
    assert!(body.contains("1 ilan bulundu"));
    assert!(body.contains("Lara Deniz Manzaralı 3+1 Daire"));
}

#[test]
fn price_sort_orders_cards() {
    let body = listing("/?sort=price-desc");
    let villa = body.find("Konyaaltı Havuzlu Villa").unwrap();
    let lara = body.find("Lara Deniz Manzaralı 3+1 Daire").unwrap();
    let kas = body.find("Kaş Merkezde Kiralık Daire").unwrap();
    assert!(villa < lara && lara < kas);
}

#[test]
fn province_change_drops_stale_district() {
    // The district belongs to the previous province and must be ignored.
    let body = listing("/?prev_province=Antalya&province=Mersin&district=Kaş");
    assert!(body.contains("1 ilan bulundu"));
    assert!(body.contains("Mezitli Sahile Yakın Daire"));
}

#[test]
fn district_options_follow_province() {
    let body = listing("/");
    assert!(body.contains(r#"<option value="Konyaaltı">"#));
    assert!(!body.contains(r#"<option value="Mezitli">"#));
}

#[test]
fn page_past_the_end_is_empty() {
    let body = listing("/?page=5");
    assert!(body.contains("4 ilan bulundu"));
    assert!(body.contains("Aradığınız kriterlere uygun ilan bulunamadı."));
}

#[test]
fn failing_content_store_shows_empty_listing() {
    let (state, source) = test_state(&[]);
    source.set_failing(true);

    let mut resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains("0 ilan bulundu"));
}
