pub mod listing_scraper;
pub mod request_planner;

pub use listing_scraper::*;
pub use request_planner::*;
