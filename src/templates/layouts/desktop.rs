use maud::{html, Markup, DOCTYPE};

/// Top-level site sections, used to highlight the current nav link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Listings,
    Portfolio,
    Contact,
    None,
}

const NAV: [(NavItem, &str, &str); 3] = [
    (NavItem::Listings, "/", "Ana Sayfa"),
    (NavItem::Portfolio, "/portfoy", "Portföy"),
    (NavItem::Contact, "/iletisim", "İletişim"),
];

pub fn desktop_layout(title: &str, active: NavItem, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="tr" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Hatice Özen Gayrimenkul" }
                link rel="stylesheet" href="/static/main.css";
                link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
                script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" defer {};
                script src="/static/map.js" defer {};
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    a href="/" class="brand" { "Hatice Özen Gayrimenkul" }
                    nav {
                        ul {
                            @for (item, href, label) in NAV {
                                li {
                                    a href=(href) class=[(item == active).then_some("active")] { (label) }
                                }
                            }
                        }
                    }
                }
                main { (content) }
                footer class="site-footer" {
                    p { "© Hatice Özen Gayrimenkul" }
                }
            }
        }
    }
}
