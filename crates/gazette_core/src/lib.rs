pub mod error;
pub mod manifest;
pub mod slug;
pub mod types;

pub use error::Error;
pub use manifest::ManifestStore;
pub use slug::slug_for;
pub use types::{FeedSource, ManifestEntry, Story};

pub type Result<T> = std::result::Result<T, Error>;
