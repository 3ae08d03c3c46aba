use super::{page, record_id, PageResult};
use crate::api::StaffParams;
use crate::error::{PageError, PageResultExt};
use crate::i18n::{Labels, Lang};
use crate::render::timeline::{career_list, staff_table};
use crate::render::widgets::{back_link, chip_row, facts, page_header, Chip};
use crate::render::{escape, href, Document};
use crate::server::SharedState;
use acervo_content::{
    transform, ContentClient, SearchMode, SortOrder, StaffMatches, StaffMember, StaffQuery,
    StaffSort,
};
use acervo_listing::{DirectoryController, Page, PageFetcher};
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use tracing::error;

/// Most pages `/pessoal?paginas=N` renders at once.
pub const MAX_PAGES: u32 = 10;

/// Directory pages read from the content store.
///
/// Text searches are answered from one read of the filtered set, kept here
/// while later pages of the same query are requested.
#[derive(Debug)]
pub struct StoreFetcher {
    client: ContentClient,
    matches: Mutex<Option<(StaffQuery, Arc<StaffMatches>)>>,
}

impl StoreFetcher {
    pub fn new(client: ContentClient) -> Self {
        Self { client, matches: Mutex::new(None) }
    }

    fn cached(&self, key: &StaffQuery) -> Option<Arc<StaffMatches>> {
        let slot = self.matches.lock().ok()?;
        slot.as_ref().filter(|(k, _)| k == key).map(|(_, m)| Arc::clone(m))
    }

    fn remember(&self, key: StaffQuery, matches: Arc<StaffMatches>) {
        if let Ok(mut slot) = self.matches.lock() {
            *slot = Some((key, matches));
        }
    }

    async fn text_matches(
        &self,
        query: &StaffQuery,
        needle: &str,
    ) -> acervo_content::Result<Arc<StaffMatches>> {
        let key = query.unpaged();
        if let Some(matches) = self.cached(&key) {
            return Ok(matches);
        }
        let matches = Arc::new(self.client.staff_text_matches(query, needle).await?);
        self.remember(key, Arc::clone(&matches));
        Ok(matches)
    }
}

impl PageFetcher for StoreFetcher {
    type Item = StaffMember;
    type Params = StaffQuery;

    async fn fetch_page(
        &self,
        params: &StaffQuery,
        page: u32,
        limit: u32,
    ) -> acervo_listing::Result<Page<StaffMember>> {
        let query = StaffQuery { page, limit, ..params.clone() }.normalized();
        let result = match query.search_mode() {
            SearchMode::Text(needle) => self.text_matches(&query, &needle).await?.page(&query),
            _ => self.client.staff_search(&query).await?,
        };
        Ok(Page { items: result.items, total: result.total })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryParams {
    #[serde(flatten)]
    pub staff: StaffParams,
    pub paginas: Option<String>,
}

impl DirectoryParams {
    /// Pages to render, `1..=MAX_PAGES`.
    pub fn pages(&self) -> u32 {
        self.paginas
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_PAGES)
    }

    /// Link to this listing with `changes` applied over the current parameters.
    fn link(&self, changes: &[(&str, Option<&str>)]) -> String {
        let s = &self.staff;
        let mut params: Vec<(&str, Option<&str>)> = vec![
            ("q", s.q.as_deref()),
            ("docente", s.docente.as_deref()),
            ("fromYear", s.from_year.as_deref()),
            ("toYear", s.to_year.as_deref()),
            ("sort", s.sort.as_deref()),
            ("order", s.order.as_deref()),
            ("limit", s.limit.as_deref()),
            ("paginas", None),
        ];
        for (key, value) in changes {
            match params.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = *value,
                None => params.push((*key, *value)),
            }
        }
        href("/pessoal", &params)
    }
}

fn sort_select(query: &StaffQuery, l: &Labels) -> String {
    let options = [
        (StaffSort::Name, SortOrder::Asc, l.sort_name_az),
        (StaffSort::Name, SortOrder::Desc, l.sort_name_za),
        (StaffSort::ProcessNumber, SortOrder::Asc, l.process_number),
    ];
    options
        .iter()
        .map(|(sort, order, label)| {
            let value = format!("{}:{}", sort.field(), order.as_str());
            let active = query.sort == *sort && query.order == *order;
            let selected = if active { " selected" } else { "" };
            format!("<option value=\"{value}\"{selected}>{}</option>", escape(label))
        })
        .collect()
}

fn search_form(params: &DirectoryParams, query: &StaffQuery, l: &Labels) -> String {
    let year = |y: Option<i64>| y.map(|y| y.to_string()).unwrap_or_default();
    let docente = params.staff.docente.as_deref().unwrap_or_default();
    format!(
        "<form class=\"toolbar\" method=\"get\" action=\"/pessoal\">\
<input type=\"hidden\" name=\"docente\" value=\"{docente}\">\
<label>{search}<input type=\"search\" name=\"q\" value=\"{q}\" \
placeholder=\"{placeholder}\"></label>\
<label>{from_label}<input type=\"number\" name=\"fromYear\" value=\"{from}\"></label>\
<label>{to_label}<input type=\"number\" name=\"toYear\" value=\"{to}\"></label>\
<label>{sort_label}<select name=\"sort\">{options}</select></label>\
<button type=\"submit\">{apply}</button><a href=\"/pessoal\">{clear}</a></form>",
        docente = escape(docente),
        search = escape(l.search),
        q = escape(query.q.as_deref().unwrap_or_default()),
        placeholder = escape(l.search_placeholder),
        from_label = escape(l.from_year),
        from = year(query.from_year),
        to_label = escape(l.to_year),
        to = year(query.to_year),
        sort_label = escape(l.sort),
        options = sort_select(query, l),
        apply = escape(l.apply),
        clear = escape(l.clear),
    )
}

/// Split a combined `field:order` sort value, as sent by the search form.
fn split_sort(params: &mut DirectoryParams) {
    let combined = params.staff.sort.clone();
    if let Some((field, order)) = combined.as_deref().and_then(|s| s.split_once(':')) {
        params.staff.sort = Some(field.to_string());
        params.staff.order = Some(order.to_string());
    }
}

pub async fn list(
    State(state): State<SharedState>,
    lang: Lang,
    Query(mut params): Query<DirectoryParams>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();

    split_sort(&mut params);
    let query = StaffQuery { page: 1, ..params.staff.to_query() };
    let pages = params.pages();

    let fetcher = StoreFetcher::new(state.client.clone());
    let mut directory = DirectoryController::new(fetcher, query.clone(), query.limit);
    if let Err(e) = directory.load_pages(query.clone(), pages).await {
        error!(error = %e, "staff directory failed");
        return Err(PageError::failure(locale));
    }

    let docente = params.staff.docente.as_deref();
    let chips = [
        (l.all, None),
        (l.teachers, Some("true")),
        (l.non_teachers, Some("false")),
    ]
    .into_iter()
    .map(|(label, value)| Chip {
        label: label.to_string(),
        href: params.link(&[("docente", value)]),
        active: docente.filter(|d| *d == "true" || *d == "false") == value,
    })
    .collect::<Vec<_>>();

    let more = if directory.has_more() {
        let next = (pages + 1).to_string();
        format!(
            "<a class=\"load-more\" href=\"{}\">{}</a>",
            escape(&params.link(&[("paginas", Some(next.as_str()))])),
            escape(l.load_more)
        )
    } else {
        String::new()
    };

    let body = format!(
        "{}{}{}<p>{} {}</p>{}{more}",
        page_header(l.staff, l.staff_desc),
        chip_row(&chips),
        search_form(&params, &query, l),
        directory.total(),
        escape(l.results),
        staff_table(directory.items(), &state.assets, locale),
    );
    Ok(page(Document::new(l.staff, body), locale))
}

pub async fn detail(
    State(state): State<SharedState>,
    lang: Lang,
    Path(id): Path<String>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();
    let id = record_id(&id, locale)?;

    let member = state.client.staff_member(&id, locale).await.or_page(locale)?;
    let name = member.nome.clone().unwrap_or_default();

    let mut rows = vec![
        (l.process_number, member.numero_processo.map(|n| n.to_string()).unwrap_or_default()),
        (l.teacher, (if member.is_teacher() { l.yes } else { l.no }).to_string()),
        (l.lective_years_worked, member.lective_year_count().to_string()),
    ];
    if member.is_teacher() {
        rows.push((l.taught_disciplines_count, member.discipline_count().to_string()));
    }

    let body = format!(
        "{}{}<img class=\"portrait\" src=\"{}\" alt=\"{}\">{}<h2>{}</h2>{}",
        back_link("/pessoal", l),
        page_header(&name, ""),
        escape(&state.assets.url(member.foto.as_deref(), transform::AVATAR)),
        escape(&name),
        facts(&rows),
        escape(l.lective_years),
        career_list(&member.career(locale), locale),
    );
    Ok(page(Document::new(name, body), locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(pairs: &[(&str, &str)]) -> DirectoryParams {
        let map: serde_json::Map<String, serde_json::Value> =
            pairs.iter().map(|(k, v)| (k.to_string(), serde_json::json!(v))).collect();
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }

    #[test]
    fn page_count_is_capped() {
        assert_eq!(directory(&[]).pages(), 1);
        assert_eq!(directory(&[("paginas", "3")]).pages(), 3);
        assert_eq!(directory(&[("paginas", "500")]).pages(), MAX_PAGES);
        assert_eq!(directory(&[("paginas", "0")]).pages(), 1);
    }

    #[test]
    fn links_keep_active_filters() {
        let params = directory(&[("q", "ana"), ("docente", "true"), ("paginas", "2")]);
        assert_eq!(params.link(&[("paginas", Some("3"))]), "/pessoal?q=ana&docente=true&paginas=3");
        assert_eq!(params.link(&[("docente", None)]), "/pessoal?q=ana");
    }

    #[test]
    fn combined_sort_value_is_split() {
        let mut params = directory(&[("sort", "numero_processo:desc")]);
        split_sort(&mut params);
        let query = params.staff.to_query();
        assert_eq!(query.sort, StaffSort::ProcessNumber);
        assert_eq!(query.order, SortOrder::Desc);
    }
}
