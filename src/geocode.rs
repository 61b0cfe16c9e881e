// src/geocode.rs

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

const USER_AGENT: &str = concat!("ozen-emlak/", env!("CARGO_PKG_VERSION"));

/// Raw `address` object from a Nominatim reverse lookup.
#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    state: Option<String>,
    province: Option<String>,
    county: Option<String>,
    city_district: Option<String>,
    district: Option<String>,
    suburb: Option<String>,
    neighbourhood: Option<String>,
    quarter: Option<String>,
    village: Option<String>,
    road: Option<String>,
    street: Option<String>,
    pedestrian: Option<String>,
    avenue: Option<String>,
    boulevard: Option<String>,
    house_number: Option<String>,
    postcode: Option<String>,
    town: Option<String>,
    municipality: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
    address: Option<NominatimAddress>,
}

/// A reverse-geocoded address in Turkish administrative terms.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseAddress {
    pub province: Option<String>,
    pub district: Option<String>,
    pub neighborhood: Option<String>,
    pub town: Option<String>,
    pub avenue: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub postcode: Option<String>,
    pub full_address: Option<String>,
    /// Comma-separated summary, most general part first.
    pub summary: String,
}

impl ReverseAddress {
    fn from_nominatim(resp: NominatimResponse) -> Option<Self> {
        let a = resp.address?;

        let mut address = ReverseAddress {
            province: a.state.or(a.province),
            district: a.county.or(a.city_district).or(a.district),
            neighborhood: a.suburb.or(a.neighbourhood).or(a.quarter).or(a.village),
            town: a.town.or(a.municipality),
            avenue: a.avenue.or(a.boulevard),
            street: a.road.or(a.street).or(a.pedestrian),
            house_number: a.house_number,
            postcode: a.postcode,
            full_address: resp.display_name,
            summary: String::new(),
        };
        address.summary = address.compose_summary();
        Some(address)
    }

    fn compose_summary(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut push = |part: &Option<String>| {
            if let Some(p) = part.as_deref().filter(|p| !p.is_empty()) {
                parts.push(p.to_string());
            }
        };

        push(&self.province);
        push(&self.district);
        if self.town.is_some() && self.town != self.district {
            push(&self.town);
        }
        push(&self.neighborhood);
        push(&self.avenue);
        push(&self.street);
        push(&self.house_number.as_ref().map(|n| format!("No: {n}")));
        push(&self.postcode);

        parts.join(", ")
    }
}

pub struct NominatimClient {
    base_url: String,
    client: Client,
}

impl NominatimClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Best-effort reverse lookup. Any failure is logged and reported as
    /// "no address found".
    pub fn reverse(&self, lat: f64, lng: f64) -> Option<ReverseAddress> {
        let url = format!("{}/reverse", self.base_url);
        let result = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", lat.to_string()),
                ("lon", lng.to_string()),
                ("accept-language", "tr".to_string()),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<NominatimResponse>());

        match result {
            Ok(resp) => ReverseAddress::from_nominatim(resp),
            Err(e) => {
                tracing::warn!("reverse geocoding {lat},{lng} failed: {e}");
                None
            }
        }
    }
}

pub fn valid_coordinates(lat: f64, lng: f64) -> bool {
    lat.is_finite() && lng.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}
