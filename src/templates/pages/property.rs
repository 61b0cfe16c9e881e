// templates/pages/property.rs

use crate::domain::currency::format_price;
use crate::domain::PropertyRecord;
use crate::geos::{map_center, APPROXIMATE_RADIUS_M};
use crate::templates::{desktop_layout, NavItem};
use maud::{html, Markup};

fn fact(label: &str, value: Option<String>) -> Markup {
    html! {
        @if let Some(value) = value.filter(|v| !v.is_empty()) {
            tr {
                th { (label) }
                td { (value) }
            }
        }
    }
}

/// Data attributes read by `/static/map.js`.
fn map(record: &PropertyRecord) -> Markup {
    let center = map_center(record);
    let polygon = serde_json::to_string(&record.polygon).unwrap_or_else(|_| "[]".to_string());
    let radius = record
        .show_approximate_location
        .then_some(APPROXIMATE_RADIUS_M);

    html! {
        div id="property-map" class="map"
            data-lat=(center.lat)
            data-lng=(center.lng)
            data-approximate=(record.show_approximate_location.to_string())
            data-radius=[radius]
            data-polygon=(polygon) {}
    }
}

pub fn property_page(record: &PropertyRecord) -> Markup {
    let area = record.area_value();
    let amenities = record.amenities.groups();
    let images: Vec<&String> = record
        .main_image_url
        .iter()
        .chain(record.image_urls.iter())
        .collect();

    desktop_layout(
        &record.title,
        NavItem::None,
        html! {
            article class="property-detail" {
                header {
                    @if let Some(status) = record.status {
                        span class={ "badge " (status.as_str()) } { (status.label()) }
                    }
                    h1 { (record.title) }
                    p class="location" { (record.location_line()) }
                    p class="price" { (format_price(record.price_value())) }
                }

                @if !images.is_empty() {
                    div class="gallery" {
                        @for src in &images {
                            img src=(src) alt=(record.title) loading="lazy";
                        }
                    }
                }

                table class="facts" {
                    (fact("İlan No", record.listing_id.clone()))
                    (fact("Emlak Tipi", record.property_type.map(|t| t.label().to_string())))
                    (fact("Net Alan", (area > 0.0).then(|| format!("{area} m²"))))
                    (fact("Brüt Alan", record.gross_area.map(|a| format!("{a} m²"))))
                    (fact("Oda Sayısı", record.bedrooms.clone()))
                    (fact("Banyo", record.bathrooms.map(|b| b.to_string())))
                    (fact("Bina Yaşı", record.building_age.clone()))
                    (fact("Bulunduğu Kat", record.floor.clone()))
                }

                @if !amenities.is_empty() {
                    section class="features" {
                        h2 { "Özellikler" }
                        @for (heading, items) in &amenities {
                            h3 { (heading) }
                            ul {
                                @for item in items {
                                    li { (item) }
                                }
                            }
                        }
                    }
                }

                @if let Some(description) = &record.description {
                    section class="description" {
                        h2 { "Açıklama" }
                        p style="white-space: pre-wrap;" { (description) }
                    }
                }

                section class="location-map" {
                    h2 { "Konum" }
                    @if record.show_approximate_location {
                        p class="note" { "Konum yaklaşık olarak gösterilmektedir." }
                    }
                    (map(record))
                }

                @if let Some(agent) = &record.agent {
                    aside class="agent" {
                        h2 { "Danışman" }
                        p { (agent.name) }
                        @if let Some(phone) = &agent.phone {
                            a href={ "tel:" (phone) } { (phone) }
                        }
                    }
                }
            }
        },
    )
}
