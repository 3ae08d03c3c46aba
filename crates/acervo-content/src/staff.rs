//! Staff directory search.
//!
//! Numeric queries are answered by the store (name substring or process
//! number). Text queries are matched accent-insensitively here, over the
//! complete filtered set, before the page is cut, so `total` and every page
//! agree with each other. [`StaffMatches`] keeps that set so several pages of
//! one query can be cut from a single read.

use crate::client::ContentClient;
use crate::error::Result;
use crate::models::StaffMember;
use crate::query::{Filter, Query, SortOrder};
use crate::text::contains_folded;
use tracing::{debug, warn};

/// Page size when none is requested.
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page a caller may ask for.
pub const MAX_LIMIT: u32 = 100;

/// Lower year bound when only the upper one is given.
const OPEN_FROM_YEAR: i64 = 0;

/// Upper year bound when only the lower one is given.
const OPEN_TO_YEAR: i64 = 9999;

const ROW_FIELDS: [&str; 5] = ["id", "nome", "numero_processo", "docente", "foto"];

/// Sortable directory columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaffSort {
    #[default]
    Name,
    ProcessNumber,
}

impl StaffSort {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "nome" => Some(StaffSort::Name),
            "numero_processo" => Some(StaffSort::ProcessNumber),
            _ => None,
        }
    }

    pub const fn field(self) -> &'static str {
        match self {
            StaffSort::Name => "nome",
            StaffSort::ProcessNumber => "numero_processo",
        }
    }
}

/// How a free-text query is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMode {
    None,
    /// Contains digits: name substring or this process number, in the store
    ProcessNumber(i64),
    /// Plain text: folded match over the filtered set
    Text(String),
}

/// Parameters of one directory page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffQuery {
    pub page: u32,
    pub limit: u32,
    pub q: Option<String>,
    /// `None` = everyone
    pub teacher: Option<bool>,
    pub from_year: Option<i64>,
    pub to_year: Option<i64>,
    pub sort: StaffSort,
    pub order: SortOrder,
}

impl Default for StaffQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            q: None,
            teacher: None,
            from_year: None,
            to_year: None,
            sort: StaffSort::Name,
            order: SortOrder::Asc,
        }
    }
}

impl StaffQuery {
    /// Clamp page to at least 1 and limit to `1..=MAX_LIMIT`.
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(1, MAX_LIMIT);
        self.q = self.q.map(|q| q.trim().to_string()).filter(|q| !q.is_empty());
        self
    }

    /// The same query at its first page, naming the filtered set.
    pub fn unpaged(&self) -> Self {
        Self { page: 1, limit: DEFAULT_LIMIT, ..self.clone() }.normalized()
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    pub fn search_mode(&self) -> SearchMode {
        let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return SearchMode::None;
        };
        let digits: String = q
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();
        // Digit runs too long for a process number fall back to text.
        match digits.parse::<i64>() {
            Ok(n) => SearchMode::ProcessNumber(n),
            Err(_) => SearchMode::Text(q.to_string()),
        }
    }

    /// Teacher and lective-year clauses, without the text search.
    pub fn base_filter(&self) -> Vec<Filter> {
        let mut clauses = Vec::new();
        if let Some(teacher) = self.teacher {
            clauses.push(Filter::eq("docente", teacher));
        }
        if self.from_year.is_some() || self.to_year.is_some() {
            let from = self.from_year.unwrap_or(OPEN_FROM_YEAR);
            let to = self.to_year.unwrap_or(OPEN_TO_YEAR);
            // Some lective year [ano_inicio, ano_fim] overlaps [from, to].
            clauses.push(Filter::any(
                "anos_lectivos",
                Filter::And(vec![
                    Filter::lte("Anos_Lectivos_id.ano_inicio", to),
                    Filter::gte("Anos_Lectivos_id.ano_fim", from),
                ]),
            ));
        }
        clauses
    }

    /// The complete filter sent to the store for this query.
    pub fn store_filter(&self) -> Option<Filter> {
        let mut clauses = self.base_filter();
        if let (SearchMode::ProcessNumber(n), Some(q)) = (self.search_mode(), self.q.as_deref()) {
            clauses.push(Filter::Or(vec![
                Filter::icontains("nome", q.trim()),
                Filter::eq("numero_processo", n),
            ]));
        }
        Filter::all(clauses)
    }
}

/// One page of the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffPage {
    pub total: u64,
    pub items: Vec<StaffMember>,
}

/// Members matching a text query, in directory order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffMatches {
    members: Vec<StaffMember>,
}

impl StaffMatches {
    pub fn total(&self) -> u64 {
        self.members.len() as u64
    }

    /// The page `query` asks for.
    pub fn page(&self, query: &StaffQuery) -> StaffPage {
        let query = query.clone().normalized();
        let skip = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let items = self.members.iter().skip(skip).take(query.limit as usize).cloned().collect();
        StaffPage { total: self.total(), items }
    }
}

fn base_query(query: &StaffQuery) -> Query {
    Query::new()
        .fields(ROW_FIELDS)
        .maybe_filter(query.store_filter())
        .sort_by(query.sort.field(), query.order)
        .sort("id")
}

impl ContentClient {
    /// Run a directory query.
    pub async fn staff_search(&self, query: &StaffQuery) -> Result<StaffPage> {
        let query = query.clone().normalized();
        if let SearchMode::Text(needle) = query.search_mode() {
            let matches = self.staff_text_matches(&query, &needle).await?;
            return Ok(matches.page(&query));
        }

        let page = base_query(&query).limit(i64::from(query.limit)).offset(query.offset());
        let (items, reported) = self.read_items_counted(StaffMember::COLLECTION, &page).await?;
        let total = match reported {
            Some(n) => n,
            None => {
                let filter = query.store_filter();
                self.count(StaffMember::COLLECTION, filter.as_ref()).await.unwrap_or_else(|e| {
                    warn!(error = %e, "staff count failed, reporting zero");
                    0
                })
            }
        };
        Ok(StaffPage { total, items })
    }

    /// Read the whole filtered set once and keep the members whose name
    /// contains `needle`, ignoring case and accents.
    pub async fn staff_text_matches(
        &self,
        query: &StaffQuery,
        needle: &str,
    ) -> Result<StaffMatches> {
        let all: Vec<StaffMember> =
            self.read_items(StaffMember::COLLECTION, &base_query(query).limit(-1)).await?;
        let members: Vec<StaffMember> = all
            .into_iter()
            .filter(|m| m.nome.as_deref().is_some_and(|n| contains_folded(n, needle)))
            .collect();
        debug!(total = members.len(), "staff text search");
        Ok(StaffMatches { members })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn q(text: &str) -> StaffQuery {
        StaffQuery { q: Some(text.to_string()), ..Default::default() }
    }

    #[test]
    fn normalises_paging() {
        let n = StaffQuery { page: 0, limit: 1000, q: Some("  ".into()), ..Default::default() }
            .normalized();
        assert_eq!((n.page, n.limit, n.q), (1, MAX_LIMIT, None));
        let n = StaffQuery { page: 3, limit: 0, ..Default::default() }.normalized();
        assert_eq!(n.limit, 1);
        assert_eq!(StaffQuery { page: 3, limit: 20, ..Default::default() }.offset(), 40);
    }

    #[test]
    fn search_modes() {
        assert_eq!(StaffQuery::default().search_mode(), SearchMode::None);
        assert_eq!(q("proc 1234 x 56").search_mode(), SearchMode::ProcessNumber(1234));
        assert_eq!(q("Conceição").search_mode(), SearchMode::Text("Conceição".into()));
        let huge = "99999999999999999999";
        assert_eq!(q(huge).search_mode(), SearchMode::Text(huge.into()));
    }

    #[test]
    fn year_overlap_filter() {
        let query = StaffQuery {
            teacher: Some(true),
            from_year: Some(1990),
            to_year: Some(2000),
            ..Default::default()
        };
        let value = query.store_filter().unwrap().to_value();
        assert_eq!(
            value,
            json!({ "_and": [
                { "docente": { "_eq": true } },
                { "anos_lectivos": { "_some": { "_and": [
                    { "Anos_Lectivos_id": { "ano_inicio": { "_lte": 2000 } } },
                    { "Anos_Lectivos_id": { "ano_fim": { "_gte": 1990 } } }
                ] } } }
            ] })
        );
    }

    #[test]
    fn open_year_bounds() {
        let query = StaffQuery { to_year: Some(1980), ..Default::default() };
        let value = query.store_filter().unwrap().to_value();
        let overlap = &value["anos_lectivos"]["_some"]["_and"];
        assert_eq!(overlap[1]["Anos_Lectivos_id"]["ano_fim"]["_gte"], json!(0));
        let query = StaffQuery { from_year: Some(1980), ..Default::default() };
        let value = query.store_filter().unwrap().to_value();
        let overlap = &value["anos_lectivos"]["_some"]["_and"];
        assert_eq!(overlap[0]["Anos_Lectivos_id"]["ano_inicio"]["_lte"], json!(9999));
    }

    #[test]
    fn only_numeric_queries_reach_the_store() {
        assert_eq!(q("Maria").store_filter(), None);
        let value = q("nº 42").store_filter().unwrap().to_value();
        assert_eq!(
            value,
            json!({ "_or": [
                { "nome": { "_icontains": "nº 42" } },
                { "numero_processo": { "_eq": 42 } }
            ] })
        );
    }

    #[test]
    fn matches_are_paged_locally() {
        let members: Vec<StaffMember> = serde_json::from_value(json!([
            { "id": 1, "nome": "Ana" },
            { "id": 2, "nome": "Ana Rita" },
            { "id": 3, "nome": "Anabela" }
        ]))
        .unwrap();
        let matches = StaffMatches { members };
        let second = matches.page(&StaffQuery { page: 2, limit: 2, ..q("ana") });
        assert_eq!(second.total, 3);
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].nome.as_deref(), Some("Anabela"));
        assert!(matches.page(&StaffQuery { page: 4, limit: 2, ..q("ana") }).items.is_empty());
    }

    #[test]
    fn unpaged_query_ignores_paging() {
        let first = StaffQuery { page: 1, limit: 5, ..q("ana") };
        let third = StaffQuery { page: 3, limit: 5, ..q(" ana ") };
        assert_eq!(first.unpaged(), third.unpaged());
        assert_ne!(first.unpaged(), q("rita").unpaged());
    }

    #[test]
    fn sort_params() {
        assert_eq!(StaffSort::parse("numero_processo"), Some(StaffSort::ProcessNumber));
        assert_eq!(StaffSort::parse("idade"), None);
        assert_eq!(StaffSort::Name.field(), "nome");
    }
}
