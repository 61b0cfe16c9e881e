// templates/pages/home.rs

use crate::domain::{FilterState, ListingPage};
use crate::templates::{
    components::{filter_form, pagination, property_grid},
    desktop_layout, NavItem,
};
use maud::{html, Markup};

pub fn home_page(filters: &FilterState, listing: &ListingPage<'_>) -> Markup {
    desktop_layout(
        "İlanlar",
        NavItem::Listings,
        html! {
            section class="hero" {
                h1 { "Satılık ve Kiralık İlanlar" }
            }

            (filter_form(filters, &listing.options))

            p class="result-count" { (listing.total_count) " ilan bulundu" }

            @if listing.records.is_empty() {
                p class="empty" { "Aradığınız kriterlere uygun ilan bulunamadı." }
            } @else {
                (property_grid(listing.records.iter().copied()))
            }

            (pagination(filters, listing.page, listing.total_pages))
        },
    )
}
