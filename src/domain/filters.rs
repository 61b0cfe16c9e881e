// src/domain/filters.rs

use crate::domain::property::{PropertyStatus, PropertyType};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// Listings shown per page.
pub const PAGE_SIZE: usize = 12;

/// Province pre-selected when the listing page is first opened.
pub const DEFAULT_PROVINCE: &str = "Antalya";

/// Query value meaning "every property type".
pub const ALL_TYPES: &str = "tumu";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    PriceDesc,
    PriceAsc,
    AreaDesc,
    AreaAsc,
    ProvinceAsc,
    DistrictAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::PriceDesc,
        SortKey::PriceAsc,
        SortKey::AreaDesc,
        SortKey::AreaAsc,
        SortKey::ProvinceAsc,
        SortKey::DistrictAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::PriceDesc => "price-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::AreaDesc => "area-desc",
            SortKey::AreaAsc => "area-asc",
            SortKey::ProvinceAsc => "province-asc",
            SortKey::DistrictAsc => "district-asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Newest => "En Yeni",
            SortKey::Oldest => "En Eski",
            SortKey::PriceDesc => "Fiyat (Yüksek → Düşük)",
            SortKey::PriceAsc => "Fiyat (Düşük → Yüksek)",
            SortKey::AreaDesc => "Alan (Büyük → Küçük)",
            SortKey::AreaAsc => "Alan (Küçük → Büyük)",
            SortKey::ProvinceAsc => "İl (A → Z)",
            SortKey::DistrictAsc => "İlçe (A → Z)",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Older links use the short names.
        let key = match s {
            "price-high" => SortKey::PriceDesc,
            "price-low" => SortKey::PriceAsc,
            "area-large" => SortKey::AreaDesc,
            "area-small" => SortKey::AreaAsc,
            "province" => SortKey::ProvinceAsc,
            "district" => SortKey::DistrictAsc,
            other => SortKey::ALL
                .into_iter()
                .find(|k| k.as_str() == other)
                .ok_or_else(|| format!("unknown sort key '{other}'"))?,
        };
        Ok(key)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The caller-owned state of the listing page.
///
/// Every setter that changes which listings match resets `page` to 1.
/// Location setters also clear the levels below them.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// `None` shows every type.
    pub property_type: Option<PropertyType>,
    pub search_text: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub bedrooms: Option<String>,
    pub status: Option<PropertyStatus>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub neighborhood: Option<String>,
    pub sort: SortKey,
    /// 1-based.
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_PROVINCE)
    }
}

impl FilterState {
    pub fn new(default_province: &str) -> Self {
        Self {
            property_type: None,
            search_text: String::new(),
            min_price: None,
            max_price: None,
            bedrooms: None,
            status: None,
            province: non_empty(default_province),
            district: None,
            neighborhood: None,
            sort: SortKey::Newest,
            page: 1,
        }
    }

    pub fn set_property_type(&mut self, property_type: Option<PropertyType>) {
        self.property_type = property_type;
        self.page = 1;
    }

    pub fn set_search(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.page = 1;
    }

    pub fn set_min_price(&mut self, min: Option<f64>) {
        self.min_price = min;
        self.page = 1;
    }

    pub fn set_max_price(&mut self, max: Option<f64>) {
        self.max_price = max;
        self.page = 1;
    }

    pub fn set_bedrooms(&mut self, label: Option<String>) {
        self.bedrooms = label.filter(|l| !l.is_empty());
        self.page = 1;
    }

    pub fn set_status(&mut self, status: Option<PropertyStatus>) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn select_province(&mut self, province: Option<String>) {
        self.province = province.filter(|p| !p.is_empty());
        self.district = None;
        self.neighborhood = None;
        self.page = 1;
    }

    pub fn select_district(&mut self, district: Option<String>) {
        self.district = district.filter(|d| !d.is_empty());
        self.neighborhood = None;
        self.page = 1;
    }

    pub fn select_neighborhood(&mut self, neighborhood: Option<String>) {
        self.neighborhood = neighborhood.filter(|n| !n.is_empty());
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn clear(&mut self, default_province: &str) {
        *self = Self::new(default_province);
    }

    /// Rebuild the state from listing-page query parameters.
    ///
    /// The filter form echoes the province and district it was rendered
    /// with as `prev_province` / `prev_district`. When the submitted value
    /// differs, the cascade reset applies and the stale lower levels are
    /// dropped. Without a `province` parameter the default province is
    /// selected; an empty one means "all provinces".
    pub fn from_query(params: &HashMap<String, String>, default_province: &str) -> Self {
        let mut state = Self::new(default_province);
        let get = |key: &str| params.get(key).map(|v| v.trim().to_string());

        state.property_type = get("type")
            .filter(|t| t != ALL_TYPES)
            .and_then(|t| t.parse().ok());
        state.search_text = get("q").unwrap_or_default();
        state.min_price = get("min").as_deref().and_then(parse_price_bound);
        state.max_price = get("max").as_deref().and_then(parse_price_bound);
        state.bedrooms = get("rooms").filter(|r| !r.is_empty());
        state.status = get("status").and_then(|s| s.parse().ok());
        state.sort = get("sort")
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();

        if let Some(province) = get("province") {
            state.select_province(Some(province));
        }

        let province_changed = match get("prev_province") {
            Some(prev) => non_empty(&prev) != state.province,
            None => false,
        };
        if !province_changed {
            if let Some(district) = get("district") {
                state.select_district(Some(district));
            }

            let district_changed = match get("prev_district") {
                Some(prev) => non_empty(&prev) != state.district,
                None => false,
            };
            if !district_changed {
                state.select_neighborhood(get("neighborhood"));
            }
        }

        let page = get("page")
            .and_then(|p| p.parse::<usize>().ok())
            .unwrap_or(1);
        state.set_page(page);
        state
    }

    /// Query string that reproduces this state, without the page number.
    pub fn to_query(&self) -> String {
        self.query_pairs(None)
    }

    /// Query string for a specific page of the same result set.
    pub fn page_query(&self, page: usize) -> String {
        self.query_pairs(Some(page.max(1)))
    }

    fn query_pairs(&self, page: Option<usize>) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());

        query.append_pair(
            "type",
            self.property_type.map(|t| t.as_str()).unwrap_or(ALL_TYPES),
        );
        if !self.search_text.is_empty() {
            query.append_pair("q", &self.search_text);
        }
        if let Some(min) = self.min_price {
            query.append_pair("min", &format!("{min:.0}"));
        }
        if let Some(max) = self.max_price {
            query.append_pair("max", &format!("{max:.0}"));
        }
        if let Some(rooms) = &self.bedrooms {
            query.append_pair("rooms", rooms);
        }
        if let Some(status) = self.status {
            query.append_pair("status", status.as_str());
        }
        // Always present so "all provinces" survives the round trip.
        query.append_pair("province", self.province.as_deref().unwrap_or(""));
        if let Some(district) = &self.district {
            query.append_pair("district", district);
        }
        if let Some(neighborhood) = &self.neighborhood {
            query.append_pair("neighborhood", neighborhood);
        }
        query.append_pair("sort", self.sort.as_str());
        if let Some(page) = page {
            query.append_pair("page", &page.to_string());
        }

        query.finish()
    }
}

/// Parse a user-typed price bound like `"1.500.000"`.
/// Only digits count; no digits means no bound.
pub fn parse_price_bound(input: &str) -> Option<f64> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<f64>().ok()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let state = FilterState::default();
        assert_eq!(state.property_type, None);
        assert_eq!(state.sort, SortKey::Newest);
        assert_eq!(state.page, 1);
        assert_eq!(state.province.as_deref(), Some("Antalya"));
        assert_eq!(state.district, None);
    }

    #[test]
    fn selecting_province_clears_lower_levels() {
        let mut state = FilterState::default();
        state.select_district(Some("Muratpaşa".into()));
        state.select_neighborhood(Some("Güzeloba".into()));
        state.set_page(4);

        state.select_province(Some("Mersin".into()));

        assert_eq!(state.province.as_deref(), Some("Mersin"));
        assert_eq!(state.district, None);
        assert_eq!(state.neighborhood, None);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn selecting_district_clears_neighborhood_only() {
        let mut state = FilterState::default();
        state.select_district(Some("Muratpaşa".into()));
        state.select_neighborhood(Some("Güzeloba".into()));

        state.select_district(Some("Konyaaltı".into()));

        assert_eq!(state.province.as_deref(), Some("Antalya"));
        assert_eq!(state.district.as_deref(), Some("Konyaaltı"));
        assert_eq!(state.neighborhood, None);
    }

    #[test]
    fn filter_changes_reset_page() {
        let mut state = FilterState::default();

        state.set_page(3);
        state.set_search("deniz");
        assert_eq!(state.page, 1);

        state.set_page(3);
        state.set_sort(SortKey::PriceAsc);
        assert_eq!(state.page, 1);

        state.set_page(3);
        state.set_bedrooms(Some("3+1".into()));
        assert_eq!(state.page, 1);

        state.set_page(0);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn clear_restores_defaults() {
        let mut state = FilterState::default();
        state.set_search("villa");
        state.set_status(Some(PropertyStatus::ForRent));
        state.select_province(None);
        state.clear(DEFAULT_PROVINCE);
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn price_bounds_ignore_separators() {
        assert_eq!(parse_price_bound("1.500.000"), Some(1_500_000.0));
        assert_eq!(parse_price_bound("abc"), None);
        assert_eq!(parse_price_bound(""), None);
    }

    #[test]
    fn from_query_without_params_is_default() {
        let state = FilterState::from_query(&HashMap::new(), DEFAULT_PROVINCE);
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn from_query_reads_every_filter() {
        let state = FilterState::from_query(
            &params(&[
                ("type", "villa"),
                ("q", "havuzlu"),
                ("min", "1.000.000"),
                ("max", "x"),
                ("rooms", "4+1"),
                ("status", "kiralik"),
                ("province", "Antalya"),
                ("district", "Kemer"),
                ("neighborhood", "Çamyuva"),
                ("sort", "price-low"),
                ("page", "2"),
            ]),
            DEFAULT_PROVINCE,
        );

        assert_eq!(state.property_type, Some(PropertyType::Villa));
        assert_eq!(state.search_text, "havuzlu");
        assert_eq!(state.min_price, Some(1_000_000.0));
        assert_eq!(state.max_price, None);
        assert_eq!(state.bedrooms.as_deref(), Some("4+1"));
        assert_eq!(state.status, Some(PropertyStatus::ForRent));
        assert_eq!(state.district.as_deref(), Some("Kemer"));
        assert_eq!(state.neighborhood.as_deref(), Some("Çamyuva"));
        assert_eq!(state.sort, SortKey::PriceAsc);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn from_query_empty_province_means_all() {
        let state = FilterState::from_query(&params(&[("province", "")]), DEFAULT_PROVINCE);
        assert_eq!(state.province, None);
    }

    #[test]
    fn from_query_applies_cascade_when_province_changes() {
        let state = FilterState::from_query(
            &params(&[
                ("province", "Mersin"),
                ("prev_province", "Antalya"),
                ("district", "Muratpaşa"),
                ("prev_district", "Muratpaşa"),
                ("neighborhood", "Güzeloba"),
            ]),
            DEFAULT_PROVINCE,
        );
        assert_eq!(state.province.as_deref(), Some("Mersin"));
        assert_eq!(state.district, None);
        assert_eq!(state.neighborhood, None);
    }

    #[test]
    fn from_query_applies_cascade_when_district_changes() {
        let state = FilterState::from_query(
            &params(&[
                ("province", "Antalya"),
                ("prev_province", "Antalya"),
                ("district", "Kepez"),
                ("prev_district", "Muratpaşa"),
                ("neighborhood", "Güzeloba"),
            ]),
            DEFAULT_PROVINCE,
        );
        assert_eq!(state.district.as_deref(), Some("Kepez"));
        assert_eq!(state.neighborhood, None);
    }

    #[test]
    fn query_round_trip_keeps_state() {
        let mut state = FilterState::default();
        state.set_property_type(Some(PropertyType::Land));
        state.set_search("deniz manzaralı");
        state.set_min_price(Some(500_000.0));
        state.select_district(Some("Kaş".into()));
        state.set_sort(SortKey::AreaDesc);

        let parsed: HashMap<String, String> =
            form_urlencoded::parse(state.page_query(3).as_bytes())
                .into_owned()
                .collect();
        let restored = FilterState::from_query(&parsed, DEFAULT_PROVINCE);

        let mut expected = state.clone();
        expected.set_page(3);
        assert_eq!(restored, expected);
    }

    #[test]
    fn sort_key_aliases() {
        assert_eq!("price-high".parse::<SortKey>(), Ok(SortKey::PriceDesc));
        assert_eq!("district".parse::<SortKey>(), Ok(SortKey::DistrictAsc));
        assert_eq!("area-asc".parse::<SortKey>(), Ok(SortKey::AreaAsc));
        assert!("random".parse::<SortKey>().is_err());
    }
}
