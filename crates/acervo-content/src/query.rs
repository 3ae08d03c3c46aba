//! Query and filter builder for item reads.
//!
//! Filters serialise to the store's JSON filter language. Dotted field paths
//! (`Anos_Lectivos_id.ano_inicio`) become nested objects.

use crate::locale::Locale;
use serde_json::{json, Map, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// A filter predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    IContains(String, String),
    In(String, Vec<Value>),
    IsNull(String),
    NotNull(String),
    Lte(String, Value),
    Gte(String, Value),
    Between(String, Value, Value),
    /// Some row of a to-many relation matches
    Any(String, Box<Filter>),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(path: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(path.to_string(), value.into())
    }

    pub fn icontains(path: &str, needle: &str) -> Self {
        Filter::IContains(path.to_string(), needle.to_string())
    }

    pub fn is_in<V: Into<Value>>(path: &str, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In(path.to_string(), values.into_iter().map(Into::into).collect())
    }

    pub fn is_null(path: &str) -> Self {
        Filter::IsNull(path.to_string())
    }

    pub fn not_null(path: &str) -> Self {
        Filter::NotNull(path.to_string())
    }

    pub fn lte(path: &str, value: impl Into<Value>) -> Self {
        Filter::Lte(path.to_string(), value.into())
    }

    pub fn gte(path: &str, value: impl Into<Value>) -> Self {
        Filter::Gte(path.to_string(), value.into())
    }

    pub fn between(path: &str, lo: impl Into<Value>, hi: impl Into<Value>) -> Self {
        Filter::Between(path.to_string(), lo.into(), hi.into())
    }

    pub fn any(path: &str, inner: Filter) -> Self {
        Filter::Any(path.to_string(), Box::new(inner))
    }

    /// Conjunction; a single clause is returned as is.
    pub fn all(mut clauses: Vec<Filter>) -> Option<Self> {
        match clauses.len() {
            0 => None,
            1 => clauses.pop(),
            _ => Some(Filter::And(clauses)),
        }
    }

    /// Serialise to the store's filter JSON.
    pub fn to_value(&self) -> Value {
        match self {
            Filter::Eq(path, v) => nest(path, json!({ "_eq": v })),
            Filter::IContains(path, s) => nest(path, json!({ "_icontains": s })),
            Filter::In(path, vs) => nest(path, json!({ "_in": vs })),
            Filter::IsNull(path) => nest(path, json!({ "_null": true })),
            Filter::NotNull(path) => nest(path, json!({ "_nnull": true })),
            Filter::Lte(path, v) => nest(path, json!({ "_lte": v })),
            Filter::Gte(path, v) => nest(path, json!({ "_gte": v })),
            Filter::Between(path, lo, hi) => nest(path, json!({ "_between": [lo, hi] })),
            Filter::Any(path, inner) => nest(path, json!({ "_some": inner.to_value() })),
            Filter::And(clauses) => json!({ "_and": values(clauses) }),
            Filter::Or(clauses) => json!({ "_or": values(clauses) }),
        }
    }
}

fn values(clauses: &[Filter]) -> Vec<Value> {
    clauses.iter().map(Filter::to_value).collect()
}

/// Wrap `leaf` in one object per path segment.
fn nest(path: &str, leaf: Value) -> Value {
    path.rsplit('.').fold(leaf, |acc, segment| {
        let mut map = Map::new();
        map.insert(segment.to_string(), acc);
        Value::Object(map)
    })
}

/// Recursively merge `src` into `dst`; objects merge, anything else overwrites.
fn merge(dst: &mut Map<String, Value>, src: Map<String, Value>) {
    for (key, value) in src {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) =
            (dst.get_mut(&key), &value)
        {
            merge(existing, incoming.clone());
            continue;
        }
        dst.insert(key, value);
    }
}

/// Parameters of an item read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    fields: Vec<String>,
    filter: Option<Filter>,
    sort: Vec<String>,
    limit: Option<i64>,
    offset: Option<u64>,
    deep: Map<String, Value>,
    filter_count: bool,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn maybe_filter(mut self, filter: Option<Filter>) -> Self {
        self.filter = filter;
        self
    }

    /// Add a raw sort key (`-` prefix for descending).
    pub fn sort(mut self, key: &str) -> Self {
        self.sort.push(key.to_string());
        self
    }

    pub fn sort_by(self, field: &str, order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => self.sort(field),
            SortOrder::Desc => self.sort(&format!("-{field}")),
        }
    }

    /// Page size; `-1` reads every row.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Restrict the translation lists at `paths` to `locale`.
    pub fn translated(mut self, locale: Locale, paths: &[&str]) -> Self {
        for path in paths {
            let filter = json!({ "_filter": { "languages_code": { "_eq": locale.code() } } });
            if let Value::Object(map) = nest(path, filter) {
                merge(&mut self.deep, map);
            }
        }
        self
    }

    /// Ask the store to report the filtered row count.
    pub fn with_filter_count(mut self) -> Self {
        self.filter_count = true;
        self
    }

    pub fn filter_ref(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Encode as URL query parameters.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.fields.is_empty() {
            params.push(("fields".to_string(), self.fields.join(",")));
        }
        if let Some(filter) = &self.filter {
            params.push(("filter".to_string(), filter.to_value().to_string()));
        }
        if !self.sort.is_empty() {
            params.push(("sort".to_string(), self.sort.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        if !self.deep.is_empty() {
            params.push(("deep".to_string(), Value::Object(self.deep.clone()).to_string()));
        }
        if self.filter_count {
            params.push(("meta".to_string(), "filter_count".to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn dotted_paths_nest() {
        let f = Filter::lte("Anos_Lectivos_id.ano_inicio", 2000);
        assert_eq!(f.to_value(), json!({ "Anos_Lectivos_id": { "ano_inicio": { "_lte": 2000 } } }));
    }

    #[test]
    fn relational_and_logical_filters() {
        let f = Filter::And(vec![
            Filter::eq("docente", true),
            Filter::any(
                "anos_lectivos",
                Filter::Or(vec![Filter::is_null("x"), Filter::between("y", 1, 2)]),
            ),
        ]);
        assert_eq!(
            f.to_value(),
            json!({ "_and": [
                { "docente": { "_eq": true } },
                { "anos_lectivos": { "_some": { "_or": [
                    { "x": { "_null": true } },
                    { "y": { "_between": [1, 2] } }
                ] } } }
            ] })
        );
    }

    #[test]
    fn all_collapses_single_clause() {
        assert_eq!(Filter::all(vec![]), None);
        assert_eq!(Filter::all(vec![Filter::not_null("a")]), Some(Filter::not_null("a")));
    }

    #[test]
    fn deep_filters_merge() {
        let q = Query::new().translated(Locale::En, &["translations", "categoria.translations"]);
        let params = q.to_params();
        let deep: Value = serde_json::from_str(param(&params, "deep").unwrap()).unwrap();
        let want = json!({ "_filter": { "languages_code": { "_eq": "en" } } });
        assert_eq!(deep["translations"], want);
        assert_eq!(deep["categoria"]["translations"], want);
    }

    #[test]
    fn nested_deep_paths_share_parents() {
        let paths = ["anos_lectivos.funcao.translations", "anos_lectivos.curso.translations"];
        let q = Query::new().translated(Locale::Pt, &paths);
        let params = q.to_params();
        let deep: Value = serde_json::from_str(param(&params, "deep").unwrap()).unwrap();
        assert!(deep["anos_lectivos"]["funcao"]["translations"].is_object());
        assert!(deep["anos_lectivos"]["curso"]["translations"].is_object());
    }

    #[test]
    fn encodes_params() {
        let q = Query::new()
            .fields(["id", "nome"])
            .sort_by("nome", SortOrder::Desc)
            .limit(20)
            .offset(40)
            .with_filter_count();
        let params = q.to_params();
        assert_eq!(param(&params, "fields"), Some("id,nome"));
        assert_eq!(param(&params, "sort"), Some("-nome"));
        assert_eq!(param(&params, "limit"), Some("20"));
        assert_eq!(param(&params, "offset"), Some("40"));
        assert_eq!(param(&params, "meta"), Some("filter_count"));
        assert_eq!(param(&params, "filter"), None);
    }

    #[test]
    fn sort_order_parsing() {
        assert_eq!(SortOrder::parse("DESC"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("up"), None);
        assert_eq!(SortOrder::Desc.apply(std::cmp::Ordering::Less), std::cmp::Ordering::Greater);
    }
}
