//! Error types for the web server.

use crate::i18n::labels;
use crate::render::{document, widgets, Document};
use acervo_content::Locale;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

/// Result type for server start-up and wiring.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while starting or running the server.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content store error
    #[error("Content error: {0}")]
    Content(#[from] acervo_content::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a page failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageErrorKind {
    NotFound,
    Failure,
}

/// A page that could not be rendered, shown to the visitor in their locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageError {
    pub kind: PageErrorKind,
    pub locale: Locale,
}

impl PageError {
    pub fn not_found(locale: Locale) -> Self {
        Self { kind: PageErrorKind::NotFound, locale }
    }

    pub fn failure(locale: Locale) -> Self {
        Self { kind: PageErrorKind::Failure, locale }
    }

    /// Classify a content error: a missing record is a 404, anything else a 500.
    pub fn from_content(err: &acervo_content::Error, locale: Locale) -> Self {
        if err.is_not_found() {
            warn!(error = %err, "record not found");
            Self::not_found(locale)
        } else {
            error!(error = %err, "page fetch failed");
            Self::failure(locale)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            PageErrorKind::NotFound => StatusCode::NOT_FOUND,
            PageErrorKind::Failure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Full HTML page for this error.
    pub fn render(&self) -> String {
        let l = labels(self.locale);
        let (title, message) = match self.kind {
            PageErrorKind::NotFound => (l.not_found, l.not_found_desc),
            PageErrorKind::Failure => (l.error_title, l.error_desc),
        };
        let body =
            format!("{}{}", widgets::page_header(title, message), widgets::back_link("/", l));
        document(&Document::new(title, body), self.locale)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status(), Html(self.render())).into_response()
    }
}

/// Attach the visitor's locale to a content result.
pub trait PageResultExt<T> {
    fn or_page(self, locale: Locale) -> std::result::Result<T, PageError>;
}

impl<T> PageResultExt<T> for acervo_content::Result<T> {
    fn or_page(self, locale: Locale) -> std::result::Result<T, PageError> {
        self.map_err(|e| PageError::from_content(&e, locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_404_localized() {
        let missing = acervo_content::Error::NotFound("Edificios/9".into());
        let err = PageError::from_content(&missing, Locale::Pt);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.render().contains("Página não encontrada"));
    }

    #[test]
    fn other_errors_are_500() {
        let err = PageError::from_content(
            &acervo_content::Error::Status { status: 502, message: "bad gateway".into() },
            Locale::En,
        );
        assert_eq!(err.kind, PageErrorKind::Failure);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = err.render();
        assert!(html.contains("Something went wrong"));
        assert!(!html.contains("bad gateway"));
    }

    #[test]
    fn result_extension_maps_errors() {
        let ok: acervo_content::Result<u8> = Ok(1);
        assert_eq!(ok.or_page(Locale::Pt), Ok(1));
        let missing: acervo_content::Result<u8> = Err(acervo_content::Error::NotFound("x".into()));
        assert_eq!(missing.or_page(Locale::En), Err(PageError::not_found(Locale::En)));
    }
}
