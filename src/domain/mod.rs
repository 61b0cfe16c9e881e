pub mod collation;
pub mod currency;
pub mod filters;
pub mod listing;
pub mod property;

pub use filters::{FilterState, SortKey, PAGE_SIZE};
pub use listing::{CascadingOptions, ListingPage};
pub use property::{PropertyRecord, PropertyStatus, PropertyType};
