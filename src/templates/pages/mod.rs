pub mod contact;
pub mod home;
pub mod portfolio;
pub mod property;

pub use contact::{contact_page, contact_sent_page};
pub use home::home_page;
pub use portfolio::portfolio_page;
pub use property::property_page;
