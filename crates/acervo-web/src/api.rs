//! Query endpoint, health checks, language switch and static assets.

use crate::server::SharedState;
use acervo_content::staff::{DEFAULT_LIMIT, MAX_LIMIT};
use acervo_content::{transform, Locale, RecordId, SortOrder, StaffMember, StaffQuery, StaffSort};
use axum::extract::{Path, Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, LOCATION, REFERER, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

const PLACEHOLDER_SVG: &str = include_str!("../static/placeholder.svg");

/// One year, in seconds.
const LANG_COOKIE_MAX_AGE: u64 = 31_536_000;

// --- Health endpoints ---

pub async fn health() -> &'static str {
    "OK"
}

pub async fn ready() -> &'static str {
    "OK"
}

pub async fn placeholder() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "image/svg+xml"), (CACHE_CONTROL, "public, max-age=86400")],
        PLACEHOLDER_SVG,
    )
}

// --- Language switch ---

/// Path of a `Referer` value; absolute URLs are reduced to their path so
/// the redirect never leaves the site.
fn back_path(referer: Option<&str>) -> String {
    let Some(referer) = referer.map(str::trim).filter(|r| !r.is_empty()) else {
        return "/".to_string();
    };
    let path = match referer.split_once("://") {
        Some((_, rest)) => rest.find('/').map(|i| &rest[i..]).unwrap_or("/"),
        None => referer,
    };
    if path.starts_with('/') && !path.starts_with("//") {
        path.to_string()
    } else {
        "/".to_string()
    }
}

/// Store the chosen locale in the `lang` cookie and go back.
pub async fn set_language(Path(code): Path<String>, headers: HeaderMap) -> impl IntoResponse {
    let locale = Locale::from_code(&code).unwrap_or_default();
    let target = back_path(headers.get(REFERER).and_then(|v| v.to_str().ok()));
    debug!(locale = locale.code(), %target, "language switched");
    let cookie = format!(
        "{}={}; Path=/; Max-Age={LANG_COOKIE_MAX_AGE}; SameSite=Lax",
        Locale::COOKIE,
        locale.code()
    );
    (StatusCode::SEE_OTHER, [(SET_COOKIE, cookie), (LOCATION, target)])
}

// --- Staff directory ---

/// Raw query parameters of the staff directory.
///
/// Every field is parsed leniently: unparseable values fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub q: Option<String>,
    pub docente: Option<String>,
    pub from_year: Option<String>,
    pub to_year: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

fn parsed<T: std::str::FromStr>(raw: &Option<String>) -> Option<T> {
    raw.as_deref().and_then(|v| v.trim().parse().ok())
}

impl StaffParams {
    pub fn to_query(&self) -> StaffQuery {
        StaffQuery {
            page: parsed(&self.page).unwrap_or(1),
            limit: parsed(&self.limit).unwrap_or(DEFAULT_LIMIT),
            q: self.q.clone(),
            teacher: match self.docente.as_deref() {
                Some("true") => Some(true),
                Some("false") => Some(false),
                _ => None,
            },
            from_year: parsed(&self.from_year),
            to_year: parsed(&self.to_year),
            sort: self.sort.as_deref().and_then(StaffSort::parse).unwrap_or_default(),
            order: self.order.as_deref().and_then(SortOrder::parse).unwrap_or_default(),
        }
        .normalized()
    }
}

/// One row of the directory response.
#[derive(Debug, Serialize)]
pub struct StaffEntry {
    pub id: RecordId,
    pub nome: Option<String>,
    pub numero_processo: Option<i64>,
    pub docente: Option<bool>,
    pub foto: Option<String>,
    pub foto_url: String,
}

#[derive(Debug, Serialize)]
pub struct StaffDirectoryResponse {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub data: Vec<StaffEntry>,
}

fn entry(member: StaffMember, state: &SharedState) -> StaffEntry {
    let foto_url = state.assets.url(member.foto.as_deref(), transform::AVATAR);
    StaffEntry {
        id: member.id,
        nome: member.nome,
        numero_processo: member.numero_processo,
        docente: member.docente,
        foto: member.foto,
        foto_url,
    }
}

/// `GET /api/pessoal`
pub async fn staff_directory(
    State(state): State<SharedState>,
    Query(params): Query<StaffParams>,
) -> impl IntoResponse {
    let query = params.to_query();
    debug!(?query, "staff directory query");
    match state.client.staff_search(&query).await {
        Ok(page) => {
            let data = page.items.into_iter().map(|m| entry(m, &state)).collect();
            let body = StaffDirectoryResponse {
                page: query.page,
                limit: query.limit,
                total: page.total,
                data,
            };
            Json(body).into_response()
        }
        Err(e) => {
            error!(error = %e, "staff directory query failed");
            let body = Json(json!({ "error": e.to_string() }));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> StaffParams {
        let map: serde_json::Map<String, serde_json::Value> =
            pairs.iter().map(|(k, v)| (k.to_string(), json!(v))).collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    #[test]
    fn parses_directory_params() {
        let query = params(&[
            ("docente", "true"),
            ("fromYear", "1990"),
            ("toYear", "2000"),
            ("sort", "numero_processo"),
            ("order", "desc"),
            ("page", "3"),
            ("limit", "500"),
        ])
        .to_query();
        assert_eq!(query.teacher, Some(true));
        assert_eq!(query.from_year, Some(1990));
        assert_eq!(query.to_year, Some(2000));
        assert_eq!(query.sort, StaffSort::ProcessNumber);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!(query.page, 3);
        assert_eq!(query.limit, MAX_LIMIT);
    }

    #[test]
    fn bad_params_fall_back() {
        let query =
            params(&[("docente", "maybe"), ("page", "0"), ("limit", "x"), ("sort", "idade")])
                .to_query();
        assert_eq!(query.teacher, None);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert_eq!(query.sort, StaffSort::Name);
    }

    #[test]
    fn referer_is_reduced_to_path() {
        assert_eq!(back_path(Some("http://site.example/cursos?q=a")), "/cursos?q=a");
        assert_eq!(back_path(Some("https://evil.example")), "/");
        assert_eq!(back_path(Some("/galeria")), "/galeria");
        assert_eq!(back_path(Some("//evil.example/x")), "/");
        assert_eq!(back_path(None), "/");
    }

    #[tokio::test]
    async fn language_switch_sets_cookie_and_redirects() {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, "http://localhost/edificios".parse().unwrap());
        let response = set_language(Path("en".to_string()), headers).await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/edificios");
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("lang=en;"));
    }
}
