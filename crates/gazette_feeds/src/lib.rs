pub mod fetch;
pub mod filter;
pub mod manager;
pub mod parse;
pub mod sources;

pub use fetch::Fetcher;
pub use filter::FilterRules;
pub use manager::{FeedManager, Harvest};

pub mod prelude {
    pub use super::fetch::Fetcher;
    pub use super::filter::FilterRules;
    pub use super::manager::{FeedManager, Harvest};
    pub use gazette_core::{Error, FeedSource, Result, Story};
}
