use super::{list_controller, or_empty, page, ListParams, PageResult};
use crate::error::PageResultExt;
use crate::i18n::{Labels, Lang};
use crate::render::widgets::{chip_row, empty_state, page_header, toolbar, Chip, Toolbar};
use crate::render::{escape, href, Document};
use crate::server::SharedState;
use acervo_content::{Course, Locale, SortOrder, Translated};
use acervo_listing::{Listable, SortKey, SortSpec};
use axum::extract::{Query, State};
use std::collections::HashMap;

/// A course resolved for display and listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRow {
    pub name: String,
    pub building: Option<String>,
    pub spans: Vec<(i64, i64)>,
}

impl CourseRow {
    pub fn new(course: &Course, locale: Locale) -> Self {
        Self {
            name: course.localized(locale).name,
            building: course.building_id().map(|id| id.to_string()),
            spans: course.year_spans(),
        }
    }

    fn years(&self) -> Option<(i64, i64)> {
        let start = self.spans.iter().map(|s| s.0).min()?;
        let end = self.spans.iter().map(|s| s.1).max()?;
        Some((start, end))
    }
}

impl Listable for CourseRow {
    fn name(&self) -> &str {
        &self.name
    }

    fn in_scope(&self, scope: &str) -> bool {
        self.building.as_deref() == Some(scope)
    }

    fn spans(&self) -> Vec<(i64, i64)> {
        self.spans.clone()
    }

    fn sort_value(&self, key: SortKey) -> Option<i64> {
        match key {
            SortKey::Count => Some(self.spans.len() as i64),
            SortKey::Year => self.years().map(|(start, _)| start),
            _ => None,
        }
    }
}

fn sort_options(l: &'static Labels) -> [(SortSpec, &'static str); 4] {
    [
        (SortSpec::new(SortKey::Name, SortOrder::Asc), l.sort_name_az),
        (SortSpec::new(SortKey::Name, SortOrder::Desc), l.sort_name_za),
        (SortSpec::new(SortKey::Count, SortOrder::Desc), l.sort_count_most),
        (SortSpec::new(SortKey::Count, SortOrder::Asc), l.sort_count_least),
    ]
}

fn row(course: &CourseRow, buildings: &HashMap<String, String>, l: &Labels) -> String {
    let years = course
        .years()
        .map(|(start, end)| {
            let count = course.spans.len();
            format!("{start}–{end} · {count} {}", l.lective_years.to_lowercase())
        })
        .unwrap_or_default();
    let building = course
        .building
        .as_ref()
        .and_then(|id| buildings.get(id))
        .map(|name| format!("<p>{}</p>", escape(name)))
        .unwrap_or_default();
    format!(
        "<li><h3>{}</h3><p>{}</p>{building}</li>",
        escape(&course.name),
        escape(&years)
    )
}

pub async fn list(
    State(state): State<SharedState>,
    lang: Lang,
    Query(params): Query<ListParams>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();

    let (courses, buildings, year_bounds) = tokio::join!(
        state.client.courses(None, locale),
        or_empty("buildings", state.client.buildings(locale)),
        state.client.lective_year_bounds(),
    );
    let courses = courses.or_page(locale)?;
    let building_names: HashMap<String, String> =
        buildings.iter().map(|b| (b.id.to_string(), b.localized(locale).name)).collect();

    let rows: Vec<CourseRow> = courses.iter().map(|c| CourseRow::new(c, locale)).collect();
    let default_sort = SortSpec::new(SortKey::Name, SortOrder::Asc);
    let controller = list_controller(rows, &params, default_sort);
    let list_state = controller.state();

    let bounds = match year_bounds {
        Ok(Some(bounds)) => bounds,
        Ok(None) => controller.bounds(),
        Err(e) => {
            tracing::warn!(error = %e, "lective year bounds unavailable");
            controller.bounds()
        }
    };

    let sort = list_state.sort.to_param();
    let from = params.from.as_deref();
    let to = params.to.as_deref();
    let q = params.q.as_deref();
    let mut chips = vec![Chip {
        label: l.all.to_string(),
        href: href(
            "/cursos",
            &[("q", q), ("sort", Some(sort.as_str())), ("from", from), ("to", to)],
        ),
        active: list_state.scope.is_none(),
    }];
    chips.extend(buildings.iter().map(|b| {
        let id = b.id.to_string();
        Chip {
            label: b.localized(locale).name,
            href: href(
                "/cursos",
                &[
                    ("edificio", Some(id.as_str())),
                    ("q", q),
                    ("sort", Some(sort.as_str())),
                    ("from", from),
                    ("to", to),
                ],
            ),
            active: list_state.scope.as_deref() == Some(id.as_str()),
        }
    }));

    let options = sort_options(l);
    let bar = Toolbar {
        action: "/cursos",
        hidden: vec![("edificio", ListParams::keep(&params.edificio))],
        search: Some((list_state.query.as_str(), "")),
        sort: Some((&options[..], list_state.sort)),
        range: Some((bounds, list_state.range)),
    };

    let visible = controller.visible_items();
    let list = if visible.is_empty() {
        empty_state(l)
    } else {
        let items: String = visible.iter().map(|c| row(c, &building_names, l)).collect();
        format!("<ul class=\"course-list\">{items}</ul>")
    };

    let body = format!(
        "{}{}{}{list}",
        page_header(l.courses, l.courses_desc),
        chip_row(&chips),
        toolbar(&bar, l)
    );
    Ok(page(Document::new(l.courses, body), locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use acervo_listing::ListController;

    fn course(name: &str, building: Option<&str>, spans: &[(i64, i64)]) -> CourseRow {
        CourseRow {
            name: name.into(),
            building: building.map(str::to_string),
            spans: spans.to_vec(),
        }
    }

    fn names(c: &ListController<CourseRow>) -> Vec<&str> {
        c.visible_items().into_iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn scope_and_range_filter_together() {
        let rows = vec![
            course("Eletrotecnia", Some("1"), &[(1980, 1981), (1981, 1982)]),
            course("Comércio", Some("2"), &[(1990, 1991)]),
            course("Ciências", Some("1"), &[(2005, 2006)]),
        ];
        let params = ListParams {
            edificio: Some("1".into()),
            from: Some("1975".into()),
            to: Some("1985".into()),
            ..Default::default()
        };
        let controller = list_controller(rows, &params, SortSpec::default());
        assert_eq!(names(&controller), ["Eletrotecnia"]);
    }

    #[test]
    fn sorts_by_lective_year_count() {
        let rows = vec![
            course("B", None, &[(1990, 1991)]),
            course("A", None, &[(1990, 1991), (1991, 1992)]),
            course("C", None, &[]),
        ];
        let params = ListParams { sort: Some("count-desc".into()), ..Default::default() };
        let controller = list_controller(rows, &params, SortSpec::default());
        assert_eq!(names(&controller), ["A", "B", "C"]);
    }

    #[test]
    fn row_shows_year_span() {
        let l = crate::i18n::labels(Locale::En);
        let buildings = HashMap::from([("1".to_string(), "Main".to_string())]);
        let html = row(&course("Arts", Some("1"), &[(1990, 1991), (1995, 1996)]), &buildings, l);
        assert!(html.contains("1990–1996 · 2 school years"));
        assert!(html.contains("<p>Main</p>"));
    }
}
