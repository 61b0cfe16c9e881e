use crate::templates::{desktop_layout, NavItem};
use maud::{html, Markup};

/// Error page shown for failed HTML routes.
pub fn error_page(status: u16, message: &str) -> Markup {
    let title = match status {
        404 => "Sayfa Bulunamadı",
        400 => "Geçersiz İstek",
        _ => "Bir Hata Oluştu",
    };

    desktop_layout(
        title,
        NavItem::None,
        html! {
            section class="error" {
                h1 { (status) " - " (title) }
                p { (message) }
                p { a href="/" { "← Ana sayfaya dön" } }
            }
        },
    )
}
