// templates/pages/portfolio.rs

use crate::domain::{PropertyRecord, PropertyStatus};
use crate::templates::{components::property_grid, desktop_layout, NavItem};
use maud::{html, Markup};

/// Completed sales and rentals.
pub fn portfolio_page(records: &[PropertyRecord]) -> Markup {
    let count = |status: PropertyStatus| {
        records
            .iter()
            .filter(|r| r.status == Some(status))
            .count()
    };

    desktop_layout(
        "Portföy",
        NavItem::Portfolio,
        html! {
            section class="hero" {
                h1 { "Portföyümüz" }
                p { "Aracılık ettiğimiz satış ve kiralamalar." }
                ul class="stats" {
                    li { strong { (count(PropertyStatus::Sold)) } " satıldı" }
                    li { strong { (count(PropertyStatus::Rented)) } " kiralandı" }
                }
            }

            @if records.is_empty() {
                p class="empty" { "Henüz tamamlanan bir işlem bulunmuyor." }
            } @else {
                (property_grid(records))
            }
        },
    )
}
