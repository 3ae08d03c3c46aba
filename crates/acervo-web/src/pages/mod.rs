//! Page handlers.
//!
//! Each handler fetches what it needs through the shared [`ContentClient`],
//! resolves translations for the visitor's locale and renders a full
//! document. A missing primary record is a 404 page, any other failure on it
//! a 500 page; secondary lists degrade to empty.
//!
//! [`ContentClient`]: acervo_content::ContentClient

pub mod buildings;
pub mod courses;
pub mod documents;
pub mod gallery;
pub mod groups;
pub mod home;
pub mod materials;
pub mod publications;
pub mod services;
pub mod staff;

use crate::error::PageError;
use crate::i18n::Lang;
use crate::render::{document, Document};
use acervo_content::{Locale, RecordId};
use acervo_listing::{ListController, ListState, Listable, SortSpec};
use axum::response::Html;
use serde::Deserialize;
use std::future::Future;
use tracing::warn;

pub type PageResult = Result<Html<String>, PageError>;

/// Wrap a rendered body in the site layout.
pub fn page(doc: Document, locale: Locale) -> Html<String> {
    Html(document(&doc, locale))
}

/// Parse a path id; malformed ids are a 404.
pub fn record_id(raw: &str, locale: Locale) -> Result<RecordId, PageError> {
    RecordId::parse(raw).ok_or_else(|| PageError::not_found(locale))
}

/// Await a secondary list, logging and degrading to empty on failure.
pub async fn or_empty<T>(
    what: &str,
    fut: impl Future<Output = acervo_content::Result<Vec<T>>>,
) -> Vec<T> {
    match fut.await {
        Ok(items) => items,
        Err(e) => {
            warn!(list = what, error = %e, "secondary list unavailable");
            Vec::new()
        }
    }
}

/// Fallback handler for unknown paths.
pub async fn not_found(lang: Lang) -> PageError {
    PageError::not_found(lang.locale())
}

/// Query parameters shared by the listing pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub tipo: Option<String>,
    pub sub: Option<String>,
    pub edificio: Option<String>,
    pub estado: Option<String>,
    pub sort: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

fn year(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse().ok())
}

impl ListParams {
    pub fn sort_or(&self, default: SortSpec) -> SortSpec {
        self.sort.as_deref().and_then(SortSpec::parse).unwrap_or(default)
    }

    /// Requested year range within `bounds`; a missing side takes the bound.
    pub fn range(&self, bounds: (i64, i64)) -> Option<(i64, i64)> {
        let from = year(self.from.as_deref());
        let to = year(self.to.as_deref());
        if from.is_none() && to.is_none() {
            return None;
        }
        Some((from.unwrap_or(bounds.0), to.unwrap_or(bounds.1)))
    }

    /// List state for these parameters. `filter` is taken from `tipo`, or
    /// `estado` when `tipo` is absent.
    pub fn state(&self, default_sort: SortSpec, bounds: (i64, i64)) -> ListState {
        ListState {
            query: self.q.clone().unwrap_or_default(),
            filter: self.tipo.clone().or_else(|| self.estado.clone()),
            sub_filter: self.sub.clone(),
            sort: self.sort_or(default_sort),
            range: self.range(bounds),
            scope: self.edificio.clone(),
        }
    }

    /// Value for a toolbar hidden field.
    pub fn keep(value: &Option<String>) -> String {
        value.clone().unwrap_or_default()
    }
}

/// Controller over `items` with the state requested in `params`.
///
/// The year range is clamped to the collection's own bounds when a side is missing.
pub fn list_controller<T: Listable>(
    items: Vec<T>,
    params: &ListParams,
    default_sort: SortSpec,
) -> ListController<T> {
    let mut controller = ListController::new(items);
    let state = params.state(default_sort, controller.bounds());
    controller.apply_state(state);
    controller
}

#[cfg(test)]
mod tests {
    use super::*;
    use acervo_content::SortOrder;
    use acervo_listing::SortKey;

    #[test]
    fn state_from_params() {
        let params = ListParams {
            q: Some("liceu".into()),
            tipo: Some("jornal".into()),
            sort: Some("year-desc".into()),
            from: Some("1990".into()),
            edificio: Some("2".into()),
            ..Default::default()
        };
        let state = params.state(SortSpec::default(), (1950, 2020));
        assert_eq!(state.query, "liceu");
        assert_eq!(state.filter.as_deref(), Some("jornal"));
        assert_eq!(state.sort, SortSpec::new(SortKey::Year, SortOrder::Desc));
        assert_eq!(state.range, Some((1990, 2020)));
        assert_eq!(state.scope.as_deref(), Some("2"));
    }

    #[test]
    fn bad_sort_and_years_fall_back() {
        let params = ListParams {
            sort: Some("sideways".into()),
            from: Some("abc".into()),
            ..Default::default()
        };
        let default = SortSpec::new(SortKey::Name, SortOrder::Asc);
        assert_eq!(params.sort_or(default), default);
        assert_eq!(params.range((1, 2)), None);
    }

    #[test]
    fn estado_is_the_filter_without_tipo() {
        let params = ListParams { estado: Some("ativo".into()), ..Default::default() };
        assert_eq!(params.state(SortSpec::default(), (0, 0)).filter.as_deref(), Some("ativo"));
    }

    #[test]
    fn malformed_ids_are_not_found() {
        assert!(record_id("12", Locale::Pt).is_ok());
        assert_eq!(record_id("", Locale::En), Err(PageError::not_found(Locale::En)));
    }
}
