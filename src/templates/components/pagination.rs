use crate::domain::FilterState;
use maud::{html, Markup};

/// Page links for the listing. Nothing is rendered for a single page.
pub fn pagination(filters: &FilterState, page: usize, total_pages: usize) -> Markup {
    let link = |n: usize| format!("/?{}", filters.page_query(n));

    html! {
        @if total_pages > 1 {
            nav class="pagination" aria-label="Sayfalar" {
                @if page > 1 {
                    a href=(link(page - 1)) rel="prev" { "‹ Önceki" }
                }
                @for n in 1..=total_pages {
                    @if n == page {
                        span class="current" aria-current="page" { (n) }
                    } @else {
                        a href=(link(n)) { (n) }
                    }
                }
                @if page < total_pages {
                    a href=(link(page + 1)) rel="next" { "Sonraki ›" }
                }
            }
        }
    }
}
