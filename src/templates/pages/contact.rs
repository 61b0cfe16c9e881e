// templates/pages/contact.rs

use crate::mailer::ContactMessage;
use crate::templates::{desktop_layout, NavItem};
use maud::{html, Markup};

/// The contact form, refilled with `form` after a failed submission.
pub fn contact_page(form: &ContactMessage, error: Option<&str>) -> Markup {
    desktop_layout(
        "İletişim",
        NavItem::Contact,
        html! {
            section class="contact" {
                h1 { "Bize Ulaşın" }

                @if let Some(error) = error {
                    p class="form-error" role="alert" { (error) }
                }

                form method="post" action="/iletisim" class="contact-form" {
                    label {
                        span { "Ad Soyad *" }
                        input type="text" name="name" value=[form.name.as_deref()] required;
                    }
                    label {
                        span { "E-posta *" }
                        input type="email" name="email" value=[form.email.as_deref()] autocomplete="email" required;
                    }
                    label {
                        span { "Telefon" }
                        input type="tel" name="phone" value=[form.phone.as_deref()];
                    }
                    label {
                        span { "Konu" }
                        input type="text" name="subject" value=[form.subject.as_deref()];
                    }
                    label {
                        span { "Mesajınız *" }
                        textarea name="message" rows="6" required { (form.message.as_deref().unwrap_or_default()) }
                    }
                    button type="submit" class="btn" { "Gönder" }
                }
            }
        },
    )
}

pub fn contact_sent_page() -> Markup {
    desktop_layout(
        "Mesajınız Alındı",
        NavItem::Contact,
        html! {
            section class="contact" {
                h1 { "Teşekkürler" }
                p { "Mesajınız bize ulaştı. En kısa sürede sizinle iletişime geçeceğiz." }
                p { a href="/" { "← İlanlara dön" } }
            }
        },
    )
}
