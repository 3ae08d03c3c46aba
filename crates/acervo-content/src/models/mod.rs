//! Typed schemas of the content store's collections.
//!
//! Every record decoded at the client boundary lands in one of these types.
//! Relation fields use [`Relation`] so callers can ask for the related key or
//! the expanded record without guessing the shape.
//!
//! # Collections
//!
//! - [`Building`], [`Course`], [`LectiveYear`]
//! - [`Publication`], [`Service`], [`Group`]
//! - [`GalleryCategory`], [`GalleryPhoto`]
//! - [`DocumentCategory`], [`Document`]
//! - [`MaterialCategory`], [`Material`]
//! - [`StaffMember`]

mod building;
mod common;
mod course;
mod document;
mod gallery;
mod material;
mod publication;
mod service;
mod staff;

pub use building::Building;
pub use common::{
    attached_files, expanded, lenient_date, lenient_int, parse_date, AttachedFile, FileLink,
    FileObject, KeyOnly, Language, Record, RecordId, Relation,
};
pub use course::{Course, LectiveYear, LectiveYearLink};
pub use document::{Document, DocumentCategory};
pub use gallery::{GalleryCategory, GalleryPhoto};
pub use material::{Material, MaterialCategory, MaterialKind, MaterialLink};
pub use publication::{author_names, Author, AuthorLink, Publication};
pub use service::{Group, Service};
pub use staff::{CareerYear, DisciplineLink, StaffMember, StaffYear, Term};
