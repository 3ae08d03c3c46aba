use super::{list_controller, page, record_id, ListParams, PageResult};
use crate::error::PageResultExt;
use crate::i18n::{Labels, Lang};
use crate::render::media::{gallery, Slide};
use crate::render::widgets::{
    back_link, card_grid, chip_row, facts, page_header, rich_text, toolbar, Card, Chip, Toolbar,
};
use crate::render::{escape, href, Document};
use crate::server::SharedState;
use acervo_content::{transform, Locale, Service, SortOrder, Translated};
use acervo_listing::timeline::long_date;
use acervo_listing::{Listable, SortKey, SortSpec};
use axum::extract::{Path, Query, State};
use chrono::Datelike;

pub const ACTIVE: &str = "ativo";
pub const INACTIVE: &str = "inativo";

/// A service resolved for listing.
#[derive(Debug, Clone)]
pub struct ServiceRow {
    pub service: Service,
    pub name: String,
}

impl ServiceRow {
    pub fn new(service: Service, locale: Locale) -> Self {
        let name = service.localized(locale).name;
        Self { service, name }
    }
}

impl Listable for ServiceRow {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&str> {
        Some(if self.service.is_active() { ACTIVE } else { INACTIVE })
    }

    fn sort_value(&self, key: SortKey) -> Option<i64> {
        match key {
            SortKey::Date => self.service.data_inicio.map(|d| i64::from(d.num_days_from_ce())),
            _ => None,
        }
    }
}

fn sort_options(l: &'static Labels) -> [(SortSpec, &'static str); 4] {
    [
        (SortSpec::new(SortKey::Date, SortOrder::Desc), l.sort_date_newest),
        (SortSpec::new(SortKey::Date, SortOrder::Asc), l.sort_date_oldest),
        (SortSpec::new(SortKey::Name, SortOrder::Asc), l.sort_name_az),
        (SortSpec::new(SortKey::Name, SortOrder::Desc), l.sort_name_za),
    ]
}

fn status(service: &Service, l: &Labels) -> &'static str {
    if service.is_active() {
        l.active
    } else {
        l.inactive
    }
}

pub async fn list(
    State(state): State<SharedState>,
    lang: Lang,
    Query(params): Query<ListParams>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();

    let services = state.client.services(locale).await.or_page(locale)?;
    let rows: Vec<ServiceRow> = services.into_iter().map(|s| ServiceRow::new(s, locale)).collect();
    let controller = list_controller(rows, &params, SortSpec::new(SortKey::Date, SortOrder::Desc));
    let list_state = controller.state();

    let sort = list_state.sort.to_param();
    let q = params.q.as_deref();
    let chips: Vec<Chip> = [(l.all, None), (l.active, Some(ACTIVE)), (l.inactive, Some(INACTIVE))]
        .into_iter()
        .map(|(label, value)| Chip {
            label: label.to_string(),
            href: href("/servicos", &[("estado", value), ("q", q), ("sort", Some(sort.as_str()))]),
            active: list_state.filter.as_deref() == value,
        })
        .collect();

    let options = sort_options(l);
    let bar = Toolbar {
        action: "/servicos",
        hidden: vec![("estado", ListParams::keep(&params.estado))],
        search: Some((list_state.query.as_str(), "")),
        sort: Some((&options[..], list_state.sort)),
        range: None,
    };

    let cards: Vec<Card> = controller
        .visible_items()
        .into_iter()
        .map(|row| {
            let s = &row.service;
            let since = s.data_inicio.map(|d| d.year().to_string()).unwrap_or_default();
            let subtitle = if since.is_empty() {
                status(s, l).to_string()
            } else {
                format!("{since} · {}", status(s, l))
            };
            let cover = state.assets.url(s.foto_capa.as_deref(), transform::THUMB);
            Card::new(format!("/servicos/{}", s.id), cover, &row.name).subtitle(subtitle)
        })
        .collect();

    let body = format!(
        "{}{}{}{}",
        page_header(l.services, l.services_desc),
        chip_row(&chips),
        toolbar(&bar, l),
        card_grid(&cards, l)
    );
    Ok(page(Document::new(l.services, body), locale))
}

pub async fn detail(
    State(state): State<SharedState>,
    lang: Lang,
    Path(id): Path<String>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();
    let id = record_id(&id, locale)?;

    let service = state.client.service(&id, locale).await.or_page(locale)?;
    let text = service.localized(locale);

    let info = facts(&[
        (l.status, status(&service, l).to_string()),
        (l.start_date, service.data_inicio.map(|d| long_date(d, locale)).unwrap_or_default()),
        (l.end_date, service.data_fim.map(|d| long_date(d, locale)).unwrap_or_default()),
    ]);
    let slides = Slide::from_files(&service.gallery(), &state.assets, &text.name);

    let body = format!(
        "{}{}<img class=\"cover\" src=\"{}\" alt=\"{}\">{info}<h2>{}</h2>{}{}",
        back_link("/servicos", l),
        page_header(&text.name, text.summary.as_deref().unwrap_or_default()),
        escape(&state.assets.url(service.foto_capa.as_deref(), transform::COVER)),
        escape(&text.name),
        escape(l.about_service),
        rich_text(&text.description),
        gallery("fotos", &slides),
    );
    Ok(page(Document::new(text.name, body), locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<ServiceRow> {
        let list: Vec<Service> = serde_json::from_value(json!([
            { "id": 1, "data_inicio": "1980-09-01", "data_fim": "1999-07-31",
              "translations": [{ "languages_code": "en", "nome": "Canteen" }] },
            { "id": 2, "data_inicio": "2005-01-10",
              "translations": [{ "languages_code": "en", "nome": "Library" }] },
            { "id": 3,
              "translations": [{ "languages_code": "en", "nome": "Archive" }] }
        ]))
        .unwrap();
        list.into_iter().map(|s| ServiceRow::new(s, Locale::En)).collect()
    }

    fn names(params: &ListParams) -> Vec<String> {
        let newest = SortSpec::new(SortKey::Date, SortOrder::Desc);
        let controller = list_controller(rows(), params, newest);
        controller.visible_items().into_iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn newest_start_first() {
        assert_eq!(names(&ListParams::default()), ["Library", "Canteen", "Archive"]);
    }

    #[test]
    fn status_filter() {
        let active = ListParams { estado: Some(ACTIVE.into()), ..Default::default() };
        assert_eq!(names(&active), ["Library", "Archive"]);
        let inactive = ListParams { estado: Some(INACTIVE.into()), ..Default::default() };
        assert_eq!(names(&inactive), ["Canteen"]);
    }
}
