// src/domain/property.rs

use crate::geos::GeoPoint;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A numeric CMS field that may arrive either as a JSON number or as a
/// locale-formatted string such as `"1.000.000"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PropertyType {
    #[serde(rename = "daire")]
    Apartment,
    #[serde(rename = "villa")]
    Villa,
    #[serde(rename = "mustakil")]
    DetachedHouse,
    #[serde(rename = "isyeri")]
    Commercial,
    #[serde(rename = "arsa")]
    Land,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Apartment,
        PropertyType::Villa,
        PropertyType::DetachedHouse,
        PropertyType::Commercial,
        PropertyType::Land,
    ];

    /// Value used by the CMS and in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::Apartment => "daire",
            PropertyType::Villa => "villa",
            PropertyType::DetachedHouse => "mustakil",
            PropertyType::Commercial => "isyeri",
            PropertyType::Land => "arsa",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyType::Apartment => "Daire",
            PropertyType::Villa => "Villa",
            PropertyType::DetachedHouse => "Müstakil",
            PropertyType::Commercial => "İş Yeri",
            PropertyType::Land => "Arsa",
        }
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown property type '{s}'"))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PropertyStatus {
    #[serde(rename = "satilik")]
    ForSale,
    #[serde(rename = "kiralik")]
    ForRent,
    #[serde(rename = "satildi")]
    Sold,
    #[serde(rename = "kiralandi")]
    Rented,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 4] = [
        PropertyStatus::ForSale,
        PropertyStatus::ForRent,
        PropertyStatus::Sold,
        PropertyStatus::Rented,
    ];

    /// Statuses shown on the public listing page.
    pub const ACTIVE: [PropertyStatus; 2] = [PropertyStatus::ForSale, PropertyStatus::ForRent];

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyStatus::ForSale => "satilik",
            PropertyStatus::ForRent => "kiralik",
            PropertyStatus::Sold => "satildi",
            PropertyStatus::Rented => "kiralandi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyStatus::ForSale => "Satılık",
            PropertyStatus::ForRent => "Kiralık",
            PropertyStatus::Sold => "Satıldı",
            PropertyStatus::Rented => "Kiralandı",
        }
    }

    pub fn is_completed(self) -> bool {
        matches!(self, PropertyStatus::Sold | PropertyStatus::Rented)
    }
}

impl FromStr for PropertyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| format!("unknown status '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Agent {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
struct SlugRef {
    #[serde(default, deserialize_with = "lenient")]
    current: Option<String>,
}

/// One property listing as returned by the content store.
///
/// The engine only ever reads these. Every optional field is decoded
/// leniently: a value of the wrong JSON type becomes `None` rather than
/// rejecting the whole record.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_createdAt", default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
    #[serde(rename = "_updatedAt", default, deserialize_with = "lenient")]
    pub updated_at: Option<String>,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "slug_current")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub listing_id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<NumericField>,
    #[serde(default, deserialize_with = "lenient")]
    pub property_type: Option<PropertyType>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<PropertyStatus>,

    // Location
    #[serde(default, deserialize_with = "lenient")]
    pub province: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub neighborhood: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub location_map: Option<GeoPoint>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub polygon: Vec<GeoPoint>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub show_approximate_location: bool,

    // Details
    #[serde(default, deserialize_with = "lenient")]
    pub area: Option<NumericField>,
    #[serde(default, deserialize_with = "lenient")]
    pub gross_area: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub bedrooms: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub bathrooms: Option<f64>,
    /// Age bracket such as `"0"`, `"1-5"` or `"21+"`.
    #[serde(default, deserialize_with = "lenient")]
    pub building_age: Option<String>,
    /// Free text: `"Bahçe Katı"`, `"3. Kat"`.
    #[serde(default, deserialize_with = "lenient")]
    pub floor: Option<String>,
    #[serde(flatten)]
    pub amenities: Amenities,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub agent: Option<Agent>,

    // Media, already resolved to asset URLs by the query projection
    #[serde(default, deserialize_with = "lenient")]
    pub main_image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub image_urls: Vec<String>,
}

/// The CMS amenity checklists, one string array per category.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenities {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub indoor_features: Vec<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub outdoor_features: Vec<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub surroundings: Vec<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub transportation: Vec<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub view: Vec<String>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub accessibility: Vec<String>,
    #[serde(rename = "altyapi", default, deserialize_with = "lenient_or_default")]
    pub infrastructure: Vec<String>,
    #[serde(rename = "konum", default, deserialize_with = "lenient_or_default")]
    pub location: Vec<String>,
    #[serde(rename = "genelOzellikler", default, deserialize_with = "lenient_or_default")]
    pub general: Vec<String>,
    #[serde(rename = "manzaraArsa", default, deserialize_with = "lenient_or_default")]
    pub land_view: Vec<String>,
}

impl Amenities {
    /// Non-empty categories with their display headings, in page order.
    /// Blank entries are skipped.
    pub fn groups(&self) -> Vec<(&'static str, Vec<&str>)> {
        [
            ("İç Özellikler", &self.indoor_features),
            ("Dış Özellikler", &self.outdoor_features),
            ("Muhit", &self.surroundings),
            ("Ulaşım", &self.transportation),
            ("Manzara", &self.view),
            ("Engelliye ve Yaşlıya Uygun", &self.accessibility),
            ("Altyapı", &self.infrastructure),
            ("Konum", &self.location),
            ("Genel Özellikler", &self.general),
            ("Manzara (Arsa)", &self.land_view),
        ]
        .into_iter()
        .map(|(label, items)| {
            let items: Vec<&str> = items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect();
            (label, items)
        })
        .filter(|(_, items)| !items.is_empty())
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups().is_empty()
    }
}

impl PropertyRecord {
    /// Creation time; a missing or malformed timestamp sorts as the oldest.
    pub fn created_at(&self) -> DateTime<Utc> {
        parse_timestamp(self.created_at.as_deref())
    }

    pub fn price_value(&self) -> f64 {
        parse_price(&self.price)
    }

    pub fn area_value(&self) -> f64 {
        parse_area(&self.area)
    }

    /// `"{neighborhood} {district} {province}"`, used by free-text search.
    pub fn composed_address(&self) -> String {
        format!(
            "{} {} {}",
            self.neighborhood.as_deref().unwrap_or(""),
            self.district.as_deref().unwrap_or(""),
            self.province.as_deref().unwrap_or(""),
        )
    }

    /// Human-readable location, skipping empty parts.
    pub fn location_line(&self) -> String {
        [&self.neighborhood, &self.district, &self.province]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse a listing price into a number.
///
/// Numbers pass through. Strings keep only their ASCII digits, so the
/// thousands separators of `"1.000.000"` disappear. Anything missing or
/// unparseable counts as 0.
pub fn parse_price(raw: &Option<NumericField>) -> f64 {
    match raw {
        Some(NumericField::Number(n)) if n.is_finite() => *n,
        Some(NumericField::Text(s)) => {
            let digits: String = s.chars().filter(char::is_ascii_digit).collect();
            digits.parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Parse a floor area. Strings may use `,` as the decimal separator.
pub fn parse_area(raw: &Option<NumericField>) -> f64 {
    match raw {
        Some(NumericField::Number(n)) if n.is_finite() => *n,
        Some(NumericField::Text(s)) => s
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn parse_timestamp(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

fn slug_current<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        // Queries may project `"slug": slug.current` directly.
        Some(Value::String(s)) => Some(s),
        Some(other) => serde_json::from_value::<SlugRef>(other)
            .ok()
            .and_then(|s| s.current),
        None => None,
    }
    .filter(|s| !s.is_empty()))
}
