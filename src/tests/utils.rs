// src/tests/utils.rs

use crate::cms::{queries, CmsError, ContentSource};
use crate::config::Config;
use crate::domain::property::{Agent, NumericField};
use crate::domain::{PropertyRecord, PropertyStatus, PropertyType};
use crate::geos::GeoPoint;
use crate::state::AppState;
use astra::{Body, Request, Response};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Read;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// An in-memory content store answering the site's queries.
pub struct FixtureSource {
    records: Vec<PropertyRecord>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl FixtureSource {
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        Self {
            records,
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every fetch fails.
    pub fn failing() -> Self {
        let source = Self::new(Vec::new());
        source.set_failing(true);
        source
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of fetches so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn values<'a>(&'a self, keep: impl Fn(&PropertyRecord) -> bool + 'a) -> Value {
        Value::Array(
            self.records
                .iter()
                .filter(|r| keep(r))
                .map(|r| serde_json::to_value(r).unwrap())
                .collect(),
        )
    }
}

fn is_completed(record: &PropertyRecord) -> bool {
    record.status.is_some_and(|s| s.is_completed())
}

impl ContentSource for FixtureSource {
    fn fetch(&self, query: &str, params: &[(&str, &str)]) -> Result<Value, CmsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CmsError::Request("connection refused".to_string()));
        }

        let value = match query {
            queries::ACTIVE_LISTINGS => self.values(|r| !is_completed(r)),
            queries::COMPLETED_LISTINGS => self.values(is_completed),
            queries::PROPERTY_BY_SLUG => {
                let slug = params
                    .iter()
                    .find(|(name, _)| *name == "slug")
                    .map(|(_, value)| *value);
                self.records
                    .iter()
                    .find(|r| slug.is_some() && r.slug.as_deref() == slug)
                    .map(|r| serde_json::to_value(r).unwrap())
                    .unwrap_or(Value::Null)
            }
            queries::SITEMAP_ENTRIES => Value::Array(
                self.records
                    .iter()
                    .filter(|r| !is_completed(r))
                    .map(|r| json!({ "slug": r.slug, "_updatedAt": r.updated_at }))
                    .collect(),
            ),
            other => return Err(CmsError::Decode(format!("unexpected query: {other}"))),
        };
        Ok(value)
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    title: &str,
    slug: &str,
    price: NumericField,
    property_type: PropertyType,
    status: PropertyStatus,
    location: (&str, &str, &str),
    created_at: &str,
) -> PropertyRecord {
    PropertyRecord {
        id: id.to_string(),
        created_at: Some(created_at.to_string()),
        updated_at: Some(created_at.to_string()),
        title: title.to_string(),
        slug: Some(slug.to_string()),
        price: Some(price),
        property_type: Some(property_type),
        status: Some(status),
        province: Some(location.0.to_string()),
        district: Some(location.1.to_string()),
        neighborhood: Some(location.2.to_string()),
        ..Default::default()
    }
}

/// A small portfolio: five active listings over two provinces plus one
/// sold and one rented property.
pub fn fixture_records() -> Vec<PropertyRecord> {
    let mut lara = record(
        "a",
        "Lara Deniz Manzaralı 3+1 Daire",
        "lara-deniz-manzarali-daire",
        NumericField::Number(4_250_000.0),
        PropertyType::Apartment,
        PropertyStatus::ForSale,
        ("Antalya", "Muratpaşa", "Güzeloba"),
        "2024-04-01T09:00:00Z",
    );
    lara.bedrooms = Some("3+1".into());
    lara.area = Some(NumericField::Number(145.0));
    lara.location_map = Some(GeoPoint {
        lat: 36.8601,
        lng: 30.7905,
    });
    lara.building_age = Some("1-5".into());
    lara.floor = Some("Bahçe Katı".into());
    lara.amenities.indoor_features = vec!["Klima".into(), "Asansör".into()];
    lara.amenities.outdoor_features = vec!["Otopark".into()];
    lara.agent = Some(Agent {
        name: "Hatice Özen".into(),
        phone: Some("0532 000 00 00".into()),
    });

    let mut villa = record(
        "b",
        "Konyaaltı Havuzlu Villa",
        "konyaalti-havuzlu-villa",
        NumericField::Text("12.500.000".into()),
        PropertyType::Villa,
        PropertyStatus::ForSale,
        ("Antalya", "Konyaaltı", "Hurma"),
        "2024-03-15T09:00:00Z",
    );
    villa.bedrooms = Some("4+1".into());
    villa.area = Some(NumericField::Text("280".into()));

    let mut kas = record(
        "c",
        "Kaş Merkezde Kiralık Daire",
        "kas-merkezde-kiralik-daire",
        NumericField::Number(35_000.0),
        PropertyType::Apartment,
        PropertyStatus::ForRent,
        ("Antalya", "Kaş", "Andifli"),
        "2024-02-10T09:00:00Z",
    );
    kas.bedrooms = Some("2+1".into());
    kas.area = Some(NumericField::Number(90.0));

    let mut land = record(
        "d",
        "Kepez Yatırımlık Arsa",
        "kepez-yatirimlik-arsa",
        NumericField::Number(2_000_000.0),
        PropertyType::Land,
        PropertyStatus::ForSale,
        ("Antalya", "Kepez", "Varsak"),
        "2024-01-05T09:00:00Z",
    );
    land.area = Some(NumericField::Number(500.0));
    land.show_approximate_location = true;
    land.polygon = vec![
        GeoPoint { lat: 36.95, lng: 30.70 },
        GeoPoint { lat: 36.95, lng: 30.72 },
        GeoPoint { lat: 36.97, lng: 30.72 },
        GeoPoint { lat: 36.97, lng: 30.70 },
    ];

    let mut mersin = record(
        "e",
        "Mezitli Sahile Yakın Daire",
        "mezitli-sahile-yakin-daire",
        NumericField::Number(3_100_000.0),
        PropertyType::Apartment,
        PropertyStatus::ForSale,
        ("Mersin", "Mezitli", "Viranşehir"),
        "2024-03-01T09:00:00Z",
    );
    mersin.bedrooms = Some("2+1".into());

    let sold = record(
        "f",
        "Muratpaşa Satılan Dubleks",
        "muratpasa-satilan-dubleks",
        NumericField::Number(6_000_000.0),
        PropertyType::Apartment,
        PropertyStatus::Sold,
        ("Antalya", "Muratpaşa", "Şirinyalı"),
        "2023-11-20T09:00:00Z",
    );

    let rented = record(
        "g",
        "Alanya Kiralanan Yazlık",
        "alanya-kiralanan-yazlik",
        NumericField::Number(25_000.0),
        PropertyType::DetachedHouse,
        PropertyStatus::Rented,
        ("Antalya", "Alanya", "Kestel"),
        "2023-10-02T09:00:00Z",
    );

    vec![lara, villa, kas, land, mersin, sold, rented]
}

pub fn test_config(vars: &[(&str, &str)]) -> Config {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_vars(|key| map.get(key).cloned()).expect("test config")
}

/// App state over the fixture records, with mail disabled.
pub fn test_state(vars: &[(&str, &str)]) -> (AppState, Arc<FixtureSource>) {
    let source = Arc::new(FixtureSource::new(fixture_records()));
    let state = AppState::with_source(test_config(vars), Arc::clone(&source) as Arc<dyn ContentSource>)
        .expect("test state");
    (state, source)
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post(uri: &str, content_type: &str, body: impl Into<String>) -> Request {
    http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", content_type)
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn body_string(resp: &mut Response) -> String {
    let mut body = String::new();
    resp.body_mut()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    body
}

pub fn body_json(resp: &mut Response) -> Value {
    serde_json::from_str(&body_string(resp)).unwrap()
}
