//! Test harness: an in-process content store and the site served against it.
//!
//! [`MockCms`] answers the item API with fixture rows and evaluates the
//! filter, sort, paging and count parameters the content client sends, so
//! the tests exercise the real request encoding end to end.

use acervo_web::{AppState, WebConfig};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Rows returned when a read sets no limit.
const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Default)]
struct Store {
    collections: HashMap<String, Vec<Value>>,
    /// Item API requests served, per collection
    reads: Mutex<HashMap<String, usize>>,
}

impl Store {
    fn record_read(&self, collection: &str) {
        if let Ok(mut reads) = self.reads.lock() {
            *reads.entry(collection.to_string()).or_default() += 1;
        }
    }
}

type Shared = Arc<Store>;

/// A content store listening on a loopback port.
#[derive(Debug, Clone)]
pub struct MockCms {
    pub url: String,
    store: Shared,
}

impl MockCms {
    /// Serve `data`, an object mapping collection names to arrays of rows.
    pub async fn start(data: Value) -> std::io::Result<Self> {
        let collections: HashMap<String, Vec<Value>> = data
            .as_object()
            .map(|map| {
                map.iter()
                    .map(|(name, rows)| {
                        (name.clone(), rows.as_array().cloned().unwrap_or_default())
                    })
                    .collect()
            })
            .unwrap_or_default();
        let store = Arc::new(Store { collections, ..Store::default() });

        let app = Router::new()
            .route("/items/{collection}", get(items))
            .route("/items/{collection}/{id}", get(item))
            .with_state(store.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self { url: format!("http://{addr}"), store })
    }

    /// Requests served so far for `collection`.
    pub fn reads(&self, collection: &str) -> usize {
        self.store
            .reads
            .lock()
            .map(|reads| reads.get(collection).copied().unwrap_or_default())
            .unwrap_or_default()
    }
}

/// Start the site against `content_url` and return its base URL.
pub async fn start_site(content_url: &str) -> acervo_web::Result<String> {
    let config = WebConfig {
        content_url: content_url.to_string(),
        public_url: content_url.to_string(),
        api_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        ..WebConfig::default()
    };
    let state = Arc::new(AppState::new(config)?);
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = acervo_web::server::serve(listener, state).await;
    });
    Ok(format!("http://{addr}"))
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "errors": [{ "message": "You don't have permission to access this." }] })),
    )
        .into_response()
}

async fn items(
    State(store): State<Shared>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    store.record_read(&collection);
    let Some(rows) = store.collections.get(&collection) else {
        return forbidden();
    };
    let filter = params.get("filter").and_then(|f| serde_json::from_str::<Value>(f).ok());
    let mut rows: Vec<&Value> = rows
        .iter()
        .filter(|row| filter.as_ref().map_or(true, |f| matches(row, f)))
        .collect();

    if params.contains_key("aggregate[count]") {
        let counted = json!({ "data": [{ "count": rows.len().to_string() }] });
        return Json(counted).into_response();
    }

    let count = rows.len();
    if let Some(sort) = params.get("sort") {
        let keys: Vec<&str> = sort.split(',').filter(|k| !k.is_empty()).collect();
        rows.sort_by(|a, b| compare_rows(a, b, &keys));
    }
    let offset = params.get("offset").and_then(|o| o.parse().ok()).unwrap_or(0);
    let limit = match params.get("limit").and_then(|l| l.parse::<i64>().ok()) {
        Some(l) if l < 0 => usize::MAX,
        Some(l) => l as usize,
        None => DEFAULT_LIMIT,
    };
    let page: Vec<Value> = rows.into_iter().skip(offset).take(limit).cloned().collect();

    let mut body = json!({ "data": page });
    if params.get("meta").is_some_and(|m| m.contains("filter_count")) {
        body["meta"] = json!({ "filter_count": count });
    }
    Json(body).into_response()
}

async fn item(
    State(store): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    store.record_read(&collection);
    let row = store
        .collections
        .get(&collection)
        .and_then(|rows| rows.iter().find(|row| row.get("id").is_some_and(|v| text(v) == id)));
    match row {
        Some(row) => Json(json!({ "data": row })).into_response(),
        None => forbidden(),
    }
}

/// Relations may be stored as a bare key or an expanded object.
fn key(value: &Value) -> &Value {
    match value {
        Value::Object(map) => map.get("id").unwrap_or(value),
        other => other,
    }
}

fn text(value: &Value) -> String {
    match key(value) {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn loose_eq(value: &Value, arg: &Value) -> bool {
    let value = key(value);
    match (value.as_f64(), arg.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => value == arg || text(value) == text(arg),
    }
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => text(a).cmp(&text(b)),
        },
    }
}

fn compare_rows(a: &Value, b: &Value, keys: &[&str]) -> Ordering {
    for raw in keys {
        let (field, descending) = match raw.strip_prefix('-') {
            Some(field) => (field, true),
            None => (*raw, false),
        };
        let ordering = compare(
            a.get(field).unwrap_or(&Value::Null),
            b.get(field).unwrap_or(&Value::Null),
        );
        let ordering = if descending { ordering.reverse() } else { ordering };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Evaluate a filter object against a row.
fn matches(row: &Value, filter: &Value) -> bool {
    let Some(clauses) = filter.as_object() else {
        return true;
    };
    clauses.iter().all(|(name, cond)| match name.as_str() {
        "_and" => cond.as_array().is_some_and(|fs| fs.iter().all(|f| matches(row, f))),
        "_or" => cond.as_array().is_some_and(|fs| fs.iter().any(|f| matches(row, f))),
        field => field_matches(row.get(field), cond),
    })
}

fn field_matches(value: Option<&Value>, cond: &Value) -> bool {
    let Some(ops) = cond.as_object() else {
        return false;
    };
    let present = value.filter(|v| !v.is_null());
    ops.iter().all(|(op, arg)| match op.as_str() {
        "_eq" => present.is_some_and(|v| loose_eq(v, arg)),
        "_icontains" => present
            .and_then(Value::as_str)
            .zip(arg.as_str())
            .is_some_and(|(v, needle)| v.to_lowercase().contains(&needle.to_lowercase())),
        "_in" => arg.as_array().is_some_and(|candidates| {
            present.is_some_and(|v| candidates.iter().any(|c| loose_eq(v, c)))
        }),
        "_null" => present.is_none(),
        "_nnull" => present.is_some(),
        "_lte" => present.is_some_and(|v| compare(key(v), arg) != Ordering::Greater),
        "_gte" => present.is_some_and(|v| compare(key(v), arg) != Ordering::Less),
        "_between" => match (arg.get(0), arg.get(1), present) {
            (Some(lo), Some(hi), Some(v)) => {
                compare(key(v), lo) != Ordering::Less && compare(key(v), hi) != Ordering::Greater
            }
            _ => false,
        },
        "_some" => present
            .and_then(Value::as_array)
            .is_some_and(|rows| rows.iter().any(|row| matches(row, arg))),
        nested => field_matches(present.and_then(|v| v.get(nested)), arg),
    })
}

fn lective_year(id: i64, start: i64, end: i64) -> Value {
    json!({
        "id": id * 10,
        "Anos_Lectivos_id": { "id": id, "ano_inicio": start, "ano_fim": end }
    })
}

fn names(pt: &str, en: &str) -> Value {
    json!([
        { "languages_code": "pt", "nome": pt, "descricao": format!("<p>{pt}</p>") },
        { "languages_code": "en", "nome": en, "descricao": format!("<p>{en}</p>") }
    ])
}

/// A small but complete data set.
pub fn fixtures() -> Value {
    json!({
        "Pessoal": [
            { "id": 1, "nome": "Ana Conceição", "numero_processo": 1234, "docente": true,
              "foto": "ana",
              "anos_lectivos": [lective_year(1, 1985, 1986), lective_year(2, 1992, 1993)] },
            { "id": 2, "nome": "Bruno Sá", "numero_processo": 2001, "docente": true,
              "anos_lectivos": [lective_year(3, 2005, 2006)] },
            { "id": 3, "nome": "Carla Ávila", "numero_processo": 3001, "docente": false,
              "anos_lectivos": [lective_year(4, 1995, 1996)] },
            { "id": 4, "nome": "Duarte Melo", "numero_processo": "1500", "docente": true,
              "anos_lectivos": [lective_year(5, 1999, 2000)] },
            { "id": 5, "nome": "Élia Conceicao", "numero_processo": 1700, "docente": true,
              "anos_lectivos": [lective_year(6, 1970, 1971)] },
            { "id": 6, "nome": "Fábio Nunes", "numero_processo": 4100, "docente": true,
              "anos_lectivos": [] }
        ],
        "Anos_Lectivos": [
            { "id": 1, "ano_inicio": 1970, "ano_fim": 1971 },
            { "id": 2, "ano_inicio": 2005, "ano_fim": 2006 }
        ],
        "Edificios": [
            { "id": 1, "ano_construcao": 1950, "data_inicio": "1952-10-01",
              "data_fim": "1998-07-31",
              "imagem": "img-liceu", "translations": names("Liceu Antigo", "Old Lyceum") },
            { "id": 2, "ano_construcao": 1996, "data_inicio": "1998-09-15",
              "translations": names("Edifício Novo", "New Building") }
        ],
        "Cursos": [
            { "id": 1, "edificio": 1, "translations": names("Humanidades", "Humanities"),
              "anos_lectivos": [lective_year(1, 1970, 1971)] }
        ],
        "Servicos": [
            { "id": 1, "data_inicio": "1990-09-01",
              "translations": names("Biblioteca", "Library") },
            { "id": 2, "data_inicio": "1960-09-01", "data_fim": "1985-06-30",
              "translations": names("Cantina", "Canteen") }
        ],
        "Grupos": [
            { "id": 1, "tipo_grupo": "Clube",
              "translations": names("Clube de Xadrez", "Chess Club") }
        ],
        "Publicacoes": [
            { "id": 1, "tipo_publicacao": "Jornal", "ano_publicacao": 1995,
              "translations": names("O Liceu", "The Lyceum") }
        ],
        "Traducoes": [
            { "nome": "Clube", "codigo_lingua": "en", "traducao": "Club" }
        ],
        "Galeria_Categorias": [
            { "id": 10, "ordem": 1, "categoria_principal": null,
              "translations": names("Escola", "School") },
            { "id": 11, "ordem": 2, "categoria_principal": 10,
              "translations": names("Recreio", "Playground") }
        ],
        "Galeria_Fotos": [
            { "id": 100, "ordem": 1, "foto": "f-fachada", "categoria": 10,
              "translations": names("Fachada", "Facade") },
            { "id": 101, "ordem": 2, "foto": "f-recreio", "categoria": 11,
              "translations": names("Intervalo", "Break") }
        ],
        "Documentos_Categorias": [
            { "id": 1, "ordem": 1, "translations": names("Atas", "Minutes") }
        ],
        "Documentos": [
            { "id": 1, "data": "1961-03-02", "ficheiro": "doc-ata", "categoria": 1,
              "translations": names("Ata de 1961", "1961 Minutes") }
        ],
        "Materiais_e_trabalhos_Categorias": [
            { "id": 1, "translations": names("Mapas", "Maps") },
            { "id": 2, "translations": names("Maquetas", "Models") }
        ],
        "Materiais_e_trabalhos": [
            { "id": 1, "tipo": "Material", "categoria": 1, "edificio": 1,
              "translations": names("Mapa de Portugal", "Map of Portugal") },
            { "id": 2, "tipo": "Trabalho", "categoria": 2, "edificio": 2,
              "translations": names("Maqueta da escola", "School model") }
        ]
    })
}
