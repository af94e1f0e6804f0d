//! GitHub REST adapter.
//!
//! Two calls only: list the files changed by a pull request (flattened across pages)
//! and add labels to it. Everything is blocking; one invocation makes at most one
//! paginated read and one write.

#![forbid(unsafe_code)]

mod client;
mod error;
mod repository;

pub use client::{ClientConfig, DEFAULT_API_URL, GitHubClient, MAX_PAGES, PER_PAGE};
pub use error::GitHubError;
pub use repository::Repository;
