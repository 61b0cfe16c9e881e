// src/domain/listing.rs

//! The listing filter/sort/paginate pipeline.
//!
//! Everything here is a pure function of `(records, filters)`: records are
//! borrowed, never mutated, and malformed numbers or timestamps degrade to
//! 0 / the minimum timestamp instead of failing.

use crate::domain::collation;
use crate::domain::filters::{FilterState, SortKey, PAGE_SIZE};
use crate::domain::property::PropertyRecord;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Option lists for the cascading filter selects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadingOptions {
    pub provinces: Vec<String>,
    pub districts: Vec<String>,
    pub neighborhoods: Vec<String>,
    pub bedrooms: Vec<String>,
}

/// One rendered page of the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage<'a> {
    pub records: Vec<&'a PropertyRecord>,
    pub page: usize,
    pub total_pages: usize,
    /// Number of records that passed the filters, across all pages.
    pub total_count: usize,
    pub options: CascadingOptions,
}

pub fn run<'a>(records: &'a [PropertyRecord], filters: &FilterState) -> ListingPage<'a> {
    let mut filtered = filter_records(records, filters);
    sort_records(&mut filtered, filters.sort);

    let total_count = filtered.len();
    ListingPage {
        records: paginate(&filtered, filters.page).to_vec(),
        page: filters.page,
        total_pages: total_pages(total_count),
        total_count,
        options: cascading_options(records, filters),
    }
}

pub fn filter_records<'a>(
    records: &'a [PropertyRecord],
    filters: &FilterState,
) -> Vec<&'a PropertyRecord> {
    let search = filters.search_text.trim().to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, filters, &search))
        .collect()
}

/// True when `record` passes every active filter. `search` must already be
/// trimmed and lowercased.
pub fn matches(record: &PropertyRecord, filters: &FilterState, search: &str) -> bool {
    if let Some(wanted) = filters.property_type {
        if record.property_type != Some(wanted) {
            return false;
        }
    }

    if !search.is_empty() {
        let title = record.title.to_lowercase();
        let address = record.composed_address().to_lowercase();
        if !title.contains(search) && !address.contains(search) {
            return false;
        }
    }

    let price = record.price_value();
    if filters.min_price.is_some_and(|min| price < min) {
        return false;
    }
    if filters.max_price.is_some_and(|max| price > max) {
        return false;
    }

    if let Some(bedrooms) = &filters.bedrooms {
        if record.bedrooms.as_ref() != Some(bedrooms) {
            return false;
        }
    }

    if let Some(status) = filters.status {
        if record.status != Some(status) {
            return false;
        }
    }

    equals_if_set(&filters.province, &record.province)
        && equals_if_set(&filters.district, &record.district)
        && equals_if_set(&filters.neighborhood, &record.neighborhood)
}

fn equals_if_set(filter: &Option<String>, value: &Option<String>) -> bool {
    match filter {
        Some(wanted) => value.as_ref() == Some(wanted),
        None => true,
    }
}

/// Stable sort: ties keep their filtered order.
pub fn sort_records(records: &mut [&PropertyRecord], key: SortKey) {
    records.sort_by(|a, b| compare(a, b, key));
}

pub fn compare(a: &PropertyRecord, b: &PropertyRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Newest => b.created_at().cmp(&a.created_at()),
        SortKey::Oldest => a.created_at().cmp(&b.created_at()),
        SortKey::PriceDesc => b.price_value().total_cmp(&a.price_value()),
        SortKey::PriceAsc => a.price_value().total_cmp(&b.price_value()),
        SortKey::AreaDesc => b.area_value().total_cmp(&a.area_value()),
        SortKey::AreaAsc => a.area_value().total_cmp(&b.area_value()),
        SortKey::ProvinceAsc => collation::compare(
            a.province.as_deref().unwrap_or(""),
            b.province.as_deref().unwrap_or(""),
        ),
        SortKey::DistrictAsc => collation::compare(
            a.district.as_deref().unwrap_or(""),
            b.district.as_deref().unwrap_or(""),
        ),
    }
}

pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// The slice for a 1-based page; empty past the last page.
pub fn paginate<'s, T>(items: &'s [T], page: usize) -> &'s [T] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Distinct option values from the unfiltered record list.
///
/// Districts are limited to the selected province and neighborhoods to the
/// selected district. Neighborhoods also respect the selected province so
/// that same-named districts in different provinces are not merged.
pub fn cascading_options(records: &[PropertyRecord], filters: &FilterState) -> CascadingOptions {
    let in_province = |r: &&PropertyRecord| equals_if_set(&filters.province, &r.province);
    let in_district = |r: &&PropertyRecord| equals_if_set(&filters.district, &r.district);

    CascadingOptions {
        provinces: distinct(records.iter(), |r| &r.province),
        districts: distinct(records.iter().filter(in_province), |r| &r.district),
        neighborhoods: distinct(
            records.iter().filter(in_province).filter(in_district),
            |r| &r.neighborhood,
        ),
        bedrooms: distinct(records.iter(), |r| &r.bedrooms),
    }
}

fn distinct<'a, I, F>(records: I, field: F) -> Vec<String>
where
    I: Iterator<Item = &'a PropertyRecord>,
    F: Fn(&'a PropertyRecord) -> &'a Option<String>,
{
    records
        .filter_map(|r| field(r).as_deref())
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
