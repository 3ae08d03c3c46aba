//! Acervo Web - the museum site
//!
//! Server-rendered pages over the content store: buildings, courses, staff,
//! publications, services, groups, the photo gallery, documents and
//! materials, in Portuguese or English.
//!
//! # Architecture
//!
//! - **Pages**: one handler per route, fetching through [`ContentClient`]
//! - **Render**: pure functions from typed records to HTML strings
//! - **I18n**: interface labels and the `lang` cookie extractor
//! - **API**: staff directory JSON, health checks and the language switch
//!
//! # Example
//!
//! ```no_run
//! use acervo_web::{server, WebConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WebConfig::from_env()?;
//!     server::run(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! [`ContentClient`]: acervo_content::ContentClient

pub mod api;
pub mod config;
pub mod error;
pub mod i18n;
pub mod pages;
pub mod render;
pub mod server;

pub use config::WebConfig;
pub use error::{Error, PageError, Result};
pub use server::{build_router, AppState, SharedState};
