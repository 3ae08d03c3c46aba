//! Filter/sort state over an already-fetched collection.
//!
//! The visible view is recomputed from scratch on every call: filter, then a
//! stable sort. Collections are small (tens to low hundreds of rows).

use acervo_content::text::{collate, contains_folded};
use acervo_content::SortOrder;
use chrono::Datelike;
use std::cmp::Ordering;

/// Sort value used for items lacking a numeric key. Sorts as the smallest value.
pub const MISSING: i64 = i64::MIN;

/// How far back [`ListController::bounds`] reaches for a collection without years.
const FALLBACK_SPAN_YEARS: i64 = 50;

/// What a list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Name,
    Year,
    Date,
    Count,
}

impl SortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "name" | "nome" => Some(SortKey::Name),
            "year" | "ano" => Some(SortKey::Year),
            "date" | "data" => Some(SortKey::Date),
            "count" | "anos" => Some(SortKey::Count),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Year => "year",
            SortKey::Date => "date",
            SortKey::Count => "count",
        }
    }
}

/// A sort key and direction, written `key-dir` in URLs (`year-desc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub const fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_ascii_lowercase();
        let (key, order) = match raw.split_once('-') {
            Some((key, dir)) => (SortKey::parse(key)?, SortOrder::parse(dir)?),
            None => (SortKey::parse(&raw)?, SortOrder::Asc),
        };
        Some(Self { key, order })
    }

    pub fn to_param(self) -> String {
        format!("{}-{}", self.key.as_str(), self.order.as_str())
    }
}

/// An item a [`ListController`] can filter and sort.
pub trait Listable {
    /// Display name in the active locale.
    fn name(&self) -> &str;

    /// Value compared against the categorical filter.
    fn category(&self) -> Option<&str> {
        None
    }

    /// Value compared against the dependent sub-filter.
    fn subcategory(&self) -> Option<&str> {
        None
    }

    /// Whether the item belongs to `scope` (a building, usually).
    fn in_scope(&self, _scope: &str) -> bool {
        false
    }

    /// Inclusive year spans the item covers.
    fn spans(&self) -> Vec<(i64, i64)> {
        Vec::new()
    }

    /// Numeric sort value for `key`; `None` sorts as [`MISSING`].
    fn sort_value(&self, _key: SortKey) -> Option<i64> {
        None
    }
}

/// UI state of one listing page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListState {
    pub query: String,
    pub filter: Option<String>,
    pub sub_filter: Option<String>,
    pub sort: SortSpec,
    pub range: Option<(i64, i64)>,
    pub scope: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl ListState {
    /// Whether `item` passes every active condition.
    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        if !contains_folded(item.name(), &self.query) {
            return false;
        }
        if let Some(filter) = &self.filter {
            if item.category() != Some(filter.as_str()) {
                return false;
            }
        }
        if let Some(sub) = &self.sub_filter {
            if item.subcategory() != Some(sub.as_str()) {
                return false;
            }
        }
        if let Some(scope) = &self.scope {
            if !item.in_scope(scope) {
                return false;
            }
        }
        if let Some((lo, hi)) = self.range {
            if !item.spans().iter().any(|&(start, end)| start <= hi && end >= lo) {
                return false;
            }
        }
        true
    }

    /// Comparator of the active sort.
    pub fn compare<T: Listable>(&self, a: &T, b: &T) -> Ordering {
        match self.sort.key {
            SortKey::Name => self.sort.order.apply(collate(a.name(), b.name())),
            key => {
                let va = a.sort_value(key).unwrap_or(MISSING);
                let vb = b.sort_value(key).unwrap_or(MISSING);
                self.sort
                    .order
                    .apply(va.cmp(&vb))
                    .then_with(|| collate(a.name(), b.name()))
            }
        }
    }
}

/// Items plus the state that derives their visible view.
#[derive(Debug, Clone)]
pub struct ListController<T> {
    items: Vec<T>,
    state: ListState,
}

impl<T: Listable> ListController<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, state: ListState::default() }
    }

    pub fn with_state(items: Vec<T>, state: ListState) -> Self {
        let mut controller = Self::new(items);
        controller.apply_state(state);
        controller
    }

    /// Replace the whole state through the setters, so it is normalized the same way.
    pub fn apply_state(&mut self, state: ListState) {
        self.set_query(&state.query);
        self.set_filter(state.filter);
        self.set_sub_filter(state.sub_filter);
        self.set_sort(state.sort);
        match state.range {
            Some((lo, hi)) => self.set_range(lo, hi),
            None => self.clear_range(),
        }
        self.set_scope(state.scope);
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn set_query(&mut self, query: &str) {
        self.state.query = query.trim().to_string();
    }

    /// Replace the categorical filter. Clears the sub-filter, which depends on it.
    pub fn set_filter(&mut self, value: Option<String>) {
        self.state.filter = non_empty(value);
        self.state.sub_filter = None;
    }

    pub fn set_sub_filter(&mut self, value: Option<String>) {
        self.state.sub_filter = non_empty(value);
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.state.sort = sort;
    }

    /// Replace the year range; reversed bounds are swapped.
    pub fn set_range(&mut self, lo: i64, hi: i64) {
        self.state.range = Some((lo.min(hi), lo.max(hi)));
    }

    pub fn clear_range(&mut self) {
        self.state.range = None;
    }

    pub fn set_scope(&mut self, scope: Option<String>) {
        self.state.scope = non_empty(scope);
    }

    /// Back to the unfiltered, name-sorted view.
    pub fn reset(&mut self) {
        self.state = ListState::default();
    }

    /// Items passing the state, in sort order.
    pub fn visible_items(&self) -> Vec<&T> {
        let mut visible: Vec<&T> =
            self.items.iter().filter(|item| self.state.matches(*item)).collect();
        visible.sort_by(|a, b| self.state.compare(*a, *b));
        visible
    }

    /// Year bounds of the whole collection, relative to `current_year` when it has none.
    pub fn bounds_at(&self, current_year: i64) -> (i64, i64) {
        let spans = self.items.iter().flat_map(|item| item.spans());
        let (lo, hi) = spans.fold((None, None), |(lo, hi): (Option<i64>, Option<i64>), (s, e)| {
            (Some(lo.map_or(s, |l| l.min(s))), Some(hi.map_or(e, |h| h.max(e))))
        });
        lo.zip(hi)
            .unwrap_or((current_year - FALLBACK_SPAN_YEARS, current_year))
    }

    /// Year bounds of the whole collection.
    pub fn bounds(&self) -> (i64, i64) {
        self.bounds_at(i64::from(chrono::Local::now().year()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: &'static str,
        kind: Option<&'static str>,
        sub: Option<&'static str>,
        building: Option<&'static str>,
        spans: Vec<(i64, i64)>,
        year: Option<i64>,
    }

    fn item(name: &'static str, kind: Option<&'static str>, year: Option<i64>) -> Item {
        let spans = year.map(|y| vec![(y, y)]).unwrap_or_default();
        Item { name, kind, sub: None, building: None, spans, year }
    }

    impl Listable for Item {
        fn name(&self) -> &str {
            self.name
        }
        fn category(&self) -> Option<&str> {
            self.kind
        }
        fn subcategory(&self) -> Option<&str> {
            self.sub
        }
        fn in_scope(&self, scope: &str) -> bool {
            self.building == Some(scope)
        }
        fn spans(&self) -> Vec<(i64, i64)> {
            self.spans.clone()
        }
        fn sort_value(&self, key: SortKey) -> Option<i64> {
            match key {
                SortKey::Year => self.year,
                _ => None,
            }
        }
    }

    fn names(view: Vec<&Item>) -> Vec<&'static str> {
        view.into_iter().map(|i| i.name).collect()
    }

    fn sample() -> Vec<Item> {
        vec![
            item("Jornal", Some("Jornal"), Some(2001)),
            item("Anuário", Some("Anuário"), Some(1999)),
            item("Revista B", Some("Revista"), None),
            item("revista a", Some("Revista"), Some(2010)),
            item("Álbum", None, Some(2001)),
        ]
    }

    #[test]
    fn default_view_is_name_sorted() {
        let c = ListController::new(sample());
        assert_eq!(
            names(c.visible_items()),
            vec!["Álbum", "Anuário", "Jornal", "revista a", "Revista B"]
        );
    }

    #[test]
    fn filters_combine() {
        let mut c = ListController::new(sample());
        c.set_filter(Some("Revista".into()));
        assert_eq!(names(c.visible_items()), vec!["revista a", "Revista B"]);
        c.set_range(2005, 2020);
        assert_eq!(names(c.visible_items()), vec!["revista a"]);
        c.set_query("REVISTA A");
        assert_eq!(names(c.visible_items()).len(), 1);
        c.set_query("zzz");
        assert!(c.visible_items().is_empty());
    }

    #[test]
    fn visible_is_subset_satisfying_state() {
        let mut c = ListController::new(sample());
        c.set_filter(Some("Jornal".into()));
        c.set_range(2000, 2002);
        for v in c.visible_items() {
            assert!(c.items().contains(v));
            assert_eq!(v.category(), Some("Jornal"));
            assert!(v.spans().iter().any(|&(s, e)| s <= 2002 && e >= 2000));
        }
    }

    #[test]
    fn changing_filter_clears_sub_filter() {
        let mut c = ListController::new(sample());
        c.set_filter(Some("Revista".into()));
        c.set_sub_filter(Some("x".into()));
        assert_eq!(c.state().sub_filter.as_deref(), Some("x"));
        c.set_filter(Some("Jornal".into()));
        assert_eq!(c.state().sub_filter, None);
        c.set_filter(Some("  ".into()));
        assert_eq!(c.state().filter, None);
    }

    #[test]
    fn numeric_sort_with_missing_values_and_ties() {
        let mut c = ListController::new(sample());
        c.set_sort(SortSpec::new(SortKey::Year, SortOrder::Desc));
        assert_eq!(
            names(c.visible_items()),
            vec!["revista a", "Álbum", "Jornal", "Anuário", "Revista B"]
        );
        c.set_sort(SortSpec::new(SortKey::Year, SortOrder::Asc));
        let first = names(c.visible_items());
        assert_eq!(first[0], "Revista B");
        assert_eq!(first, names(c.visible_items()));
    }

    #[test]
    fn range_is_normalised_and_inclusive() {
        let mut c = ListController::new(sample());
        c.set_range(2001, 1999);
        assert_eq!(c.state().range, Some((1999, 2001)));
        assert_eq!(c.visible_items().len(), 3);
        c.clear_range();
        assert_eq!(c.visible_items().len(), 5);
    }

    #[test]
    fn scope_excludes_unscoped_items() {
        let mut items = sample();
        items[0].building = Some("1");
        let mut c = ListController::new(items);
        c.set_scope(Some("1".into()));
        assert_eq!(names(c.visible_items()), vec!["Jornal"]);
        c.reset();
        assert_eq!(c.visible_items().len(), 5);
    }

    #[test]
    fn bounds_fall_back_to_recent_years() {
        let c = ListController::new(sample());
        assert_eq!(c.bounds_at(2030), (1999, 2010));
        let empty: ListController<Item> = ListController::new(Vec::new());
        assert_eq!(empty.bounds_at(2030), (1980, 2030));
    }

    #[test]
    fn sort_spec_params() {
        let newest = SortSpec::new(SortKey::Year, SortOrder::Desc);
        assert_eq!(SortSpec::parse("year-desc"), Some(newest));
        assert_eq!(SortSpec::parse("nome"), Some(SortSpec::new(SortKey::Name, SortOrder::Asc)));
        assert_eq!(SortSpec::parse("year-sideways"), None);
        assert_eq!(SortSpec::new(SortKey::Count, SortOrder::Desc).to_param(), "count-desc");
    }

    #[test]
    fn with_state_applies_setters() {
        let state = ListState {
            range: Some((2010, 2000)),
            filter: Some("Jornal".into()),
            sub_filter: Some("s".into()),
            ..Default::default()
        };
        let c = ListController::with_state(sample(), state);
        assert_eq!(c.state().range, Some((2000, 2010)));
        assert_eq!(c.state().sub_filter.as_deref(), Some("s"));
    }
}
