mod api_tests;
mod listing_tests;
mod page_tests;
