use crate::domain::currency::format_price;
use crate::domain::PropertyRecord;
use maud::{html, Markup};

pub fn property_card(record: &PropertyRecord) -> Markup {
    let href = record.slug.as_deref().map(|slug| format!("/ilan/{slug}"));
    let area = record.area_value();

    html! {
        article class="card property-card" {
            a href=[href.as_deref()] {
                @match &record.main_image_url {
                    Some(src) => {
                        img src=(src) alt=(record.title) loading="lazy";
                    }
                    None => {
                        div class="no-photo" { "Fotoğraf Yok" }
                    }
                }
                div class="card-body" {
                    @if let Some(status) = record.status {
                        span class={ "badge " (status.as_str()) } { (status.label()) }
                    }
                    h2 { (record.title) }
                    p class="price" { (format_price(record.price_value())) }
                    p class="location" { (record.location_line()) }
                    ul class="facts" {
                        @if let Some(kind) = record.property_type {
                            li { (kind.label()) }
                        }
                        @if let Some(rooms) = &record.bedrooms {
                            li { (rooms) }
                        }
                        @if area > 0.0 {
                            li { (area) " m²" }
                        }
                    }
                }
            }
        }
    }
}

pub fn property_grid<'a>(records: impl IntoIterator<Item = &'a PropertyRecord>) -> Markup {
    html! {
        div class="property-grid" {
            @for record in records {
                (property_card(record))
            }
        }
    }
}
