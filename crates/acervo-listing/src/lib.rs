//! Acervo Listing - UI state for listing pages
//!
//! - [`ListController`]: filter/sort state over a fetched collection
//! - [`DirectoryController`]: paginated loading with de-duplication and a
//!   stale-response guard
//! - [`timeline`]: calendar durations and long dates

pub mod directory;
pub mod error;
pub mod list;
pub mod timeline;

pub use directory::{
    Applied, DirectoryController, DirectoryItem, Page, PageFetcher, PendingRequest, Phase,
    RequestToken,
};
pub use error::{Error, Result};
pub use list::{ListController, ListState, Listable, SortKey, SortSpec, MISSING};
