//! Release-notes site access
//!
//! Used only by reload; graph generation reads the persisted copies.

pub mod client;
pub mod endpoints;
pub mod index;

pub use client::ReleaseNotesClient;
pub use index::parse_release_index;
