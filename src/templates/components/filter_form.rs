use crate::domain::currency::format_price_input;
use crate::domain::filters::{SortKey, ALL_TYPES};
use crate::domain::{CascadingOptions, FilterState, PropertyStatus, PropertyType};
use maud::{html, Markup};

fn select(
    name: &str,
    label: &str,
    any_label: &str,
    options: &[String],
    selected: Option<&str>,
    auto_submit: bool,
) -> Markup {
    html! {
        label {
            span { (label) }
            select name=(name) onchange=[auto_submit.then_some("this.form.submit()")] {
                option value="" selected[selected.is_none()] { (any_label) }
                @for value in options {
                    option value=(value) selected[selected == Some(value.as_str())] { (value) }
                }
            }
        }
    }
}

/// The listing filter form.
///
/// Location selects submit on change. The province and district the form
/// was rendered with travel along as `prev_*` so the server can tell which
/// level changed and clear the ones below it.
pub fn filter_form(filters: &FilterState, options: &CascadingOptions) -> Markup {
    let bound = |v: f64| format_price_input(&format!("{v:.0}"));
    let min = filters.min_price.map(bound);
    let max = filters.max_price.map(bound);

    html! {
        form class="filters" method="get" action="/" {
            input type="hidden" name="prev_province" value=(filters.province.as_deref().unwrap_or(""));
            input type="hidden" name="prev_district" value=(filters.district.as_deref().unwrap_or(""));

            div class="type-tabs" {
                label {
                    input type="radio" name="type" value=(ALL_TYPES)
                        checked[filters.property_type.is_none()] onchange="this.form.submit()";
                    " Tümü"
                }
                @for kind in PropertyType::ALL {
                    label {
                        input type="radio" name="type" value=(kind.as_str())
                            checked[filters.property_type == Some(kind)] onchange="this.form.submit()";
                        " " (kind.label())
                    }
                }
            }

            label {
                span { "Arama" }
                input type="search" name="q" value=(filters.search_text) placeholder="Başlık veya konum";
            }

            (select("province", "İl", "Tüm İller", &options.provinces, filters.province.as_deref(), true))
            (select("district", "İlçe", "Tüm İlçeler", &options.districts, filters.district.as_deref(), true))
            (select("neighborhood", "Mahalle", "Tüm Mahalleler", &options.neighborhoods, filters.neighborhood.as_deref(), false))

            label {
                span { "Min. Fiyat" }
                input type="text" inputmode="numeric" name="min" value=[min];
            }
            label {
                span { "Maks. Fiyat" }
                input type="text" inputmode="numeric" name="max" value=[max];
            }

            (select("rooms", "Oda Sayısı", "Tümü", &options.bedrooms, filters.bedrooms.as_deref(), false))

            label {
                span { "Durum" }
                select name="status" {
                    option value="" selected[filters.status.is_none()] { "Tümü" }
                    @for status in PropertyStatus::ACTIVE {
                        option value=(status.as_str()) selected[filters.status == Some(status)] { (status.label()) }
                    }
                }
            }

            label {
                span { "Sıralama" }
                select name="sort" onchange="this.form.submit()" {
                    @for key in SortKey::ALL {
                        option value=(key.as_str()) selected[filters.sort == key] { (key.label()) }
                    }
                }
            }

            button type="submit" class="btn" { "Filtrele" }
            a href="/" class="btn secondary" { "Temizle" }
        }
    }
}
