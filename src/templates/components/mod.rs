pub mod error;
pub mod filter_form;
pub mod pagination;
pub mod property_card;

pub use error::error_page;
pub use filter_form::filter_form;
pub use pagination::pagination;
pub use property_card::{property_card, property_grid};
