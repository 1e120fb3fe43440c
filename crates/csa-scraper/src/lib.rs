//! Client for the third-party comment scraping provider.
//!
//! The provider returns a flat, loosely-typed list of records per post; this
//! crate only fetches them. Interpreting the records is the caller's job.

pub mod client;
pub mod error;
pub mod retry;
pub mod types;

pub use client::ApifyClient;
pub use error::ScraperError;
pub use retry::MAX_ATTEMPTS;
pub use types::{CommentSource, FetchLimits};
