//! Acervo Content - read access to the museum's content store
//!
//! Everything the site shows lives in a headless CMS. This crate owns the
//! boundary with it: a typed HTTP client, per-collection record schemas, and
//! the small pure helpers every page needs.
//!
//! # Architecture
//!
//! - **Client**: item reads, single-record reads and counts ([`ContentClient`])
//! - **Query**: field selection, filters, sorting, paging, locale `deep` filters
//! - **Models**: typed schemas with [`Relation`] for id-or-record fields
//! - **Translation**: locale variant selection with placeholders
//! - **Assets**: asset id to public URL
//! - **Text**: accent folding and collation
//!
//! # Example
//!
//! ```no_run
//! use acervo_content::{ClientConfig, ContentClient, Locale};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ContentClient::new(&ClientConfig::default())?;
//!     for building in client.buildings(Locale::Pt).await? {
//!         println!("{}", building.id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod client;
pub mod collections;
pub mod error;
pub mod locale;
pub mod models;
pub mod query;
pub mod staff;
pub mod text;
pub mod translation;

pub use assets::{transform, AssetUrls, PLACEHOLDER_PATH};
pub use client::{ClientConfig, ContentClient};
pub use error::{Error, Result};
pub use locale::Locale;
pub use models::{
    AttachedFile, Building, CareerYear, Course, Document, DocumentCategory, GalleryCategory,
    GalleryPhoto, Group, LectiveYear, Material, MaterialCategory, MaterialKind, MaterialLink,
    Publication, Record, RecordId, Relation, Service, StaffMember,
};
pub use query::{Filter, Query, SortOrder};
pub use staff::{SearchMode, StaffMatches, StaffPage, StaffQuery, StaffSort};
pub use translation::{resolve, LocaleVariant, LocalizedText, Translated};
