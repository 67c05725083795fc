//! Contribution data sources.

pub mod github;

pub use github::{ContributionSource, GitHubClient, MAX_CHUNK_DAYS, date_chunks, fetch_in_chunks};
