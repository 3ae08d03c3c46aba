use super::{list_controller, page, record_id, ListParams, PageResult};
use crate::error::PageResultExt;
use crate::i18n::{Labels, Lang};
use crate::render::widgets::{
    back_link, card_grid, chip_row, facts, page_header, rich_text, toolbar, Card, Chip, Toolbar,
};
use crate::render::{escape, href, Document};
use crate::server::SharedState;
use acervo_content::{transform, Locale, Publication, SortOrder, Translated};
use acervo_listing::timeline::long_date;
use acervo_listing::{Listable, SortKey, SortSpec};
use axum::extract::{Path, Query, State};
use std::collections::BTreeMap;

/// A publication resolved for listing.
#[derive(Debug, Clone)]
pub struct PublicationRow {
    pub publication: Publication,
    pub name: String,
}

impl PublicationRow {
    pub fn new(publication: Publication, locale: Locale) -> Self {
        let name = publication.localized(locale).name;
        Self { publication, name }
    }
}

impl Listable for PublicationRow {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&str> {
        self.publication.tipo_publicacao.as_deref()
    }

    fn spans(&self) -> Vec<(i64, i64)> {
        self.publication.year().map(|y| vec![(y, y)]).unwrap_or_default()
    }

    fn sort_value(&self, key: SortKey) -> Option<i64> {
        match key {
            SortKey::Year => self.publication.year(),
            _ => None,
        }
    }
}

fn sort_options(l: &'static Labels) -> [(SortSpec, &'static str); 4] {
    [
        (SortSpec::new(SortKey::Year, SortOrder::Desc), l.sort_year_newest),
        (SortSpec::new(SortKey::Year, SortOrder::Asc), l.sort_year_oldest),
        (SortSpec::new(SortKey::Name, SortOrder::Asc), l.sort_name_az),
        (SortSpec::new(SortKey::Name, SortOrder::Desc), l.sort_name_za),
    ]
}

pub async fn list(
    State(state): State<SharedState>,
    lang: Lang,
    Query(params): Query<ListParams>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();

    let publications = state.client.publications(locale).await.or_page(locale)?;

    // Distinct types with their display label.
    let types: BTreeMap<String, String> = publications
        .iter()
        .filter_map(|p| {
            let raw = p.tipo_publicacao.clone()?;
            let label = p.type_name().unwrap_or(&raw).to_string();
            Some((raw, label))
        })
        .collect();

    let rows: Vec<PublicationRow> =
        publications.into_iter().map(|p| PublicationRow::new(p, locale)).collect();
    let default_sort = SortSpec::new(SortKey::Year, SortOrder::Desc);
    let controller = list_controller(rows, &params, default_sort);
    let list_state = controller.state();

    let sort = list_state.sort.to_param();
    let q = params.q.as_deref();
    let mut chips = vec![Chip {
        label: l.all.to_string(),
        href: href("/publicacoes", &[("q", q), ("sort", Some(sort.as_str()))]),
        active: list_state.filter.is_none(),
    }];
    chips.extend(types.iter().map(|(raw, label)| Chip {
        label: label.clone(),
        href: href(
            "/publicacoes",
            &[("tipo", Some(raw.as_str())), ("q", q), ("sort", Some(sort.as_str()))],
        ),
        active: list_state.filter.as_deref() == Some(raw.as_str()),
    }));

    let options = sort_options(l);
    let bar = Toolbar {
        action: "/publicacoes",
        hidden: vec![("tipo", ListParams::keep(&params.tipo))],
        search: Some((list_state.query.as_str(), "")),
        sort: Some((&options[..], list_state.sort)),
        range: None,
    };

    let cards: Vec<Card> = controller
        .visible_items()
        .into_iter()
        .map(|row| {
            let p = &row.publication;
            let subtitle = [p.type_name().map(str::to_string), p.year().map(|y| y.to_string())]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" · ");
            let cover = state.assets.url(p.capa.as_deref(), transform::THUMB);
            Card::new(format!("/publicacoes/{}", p.id), cover, &row.name).subtitle(subtitle)
        })
        .collect();

    let body = format!(
        "{}{}{}{}",
        page_header(l.publications, l.publications_desc),
        chip_row(&chips),
        toolbar(&bar, l),
        card_grid(&cards, l)
    );
    Ok(page(Document::new(l.publications, body), locale))
}

pub async fn detail(
    State(state): State<SharedState>,
    lang: Lang,
    Path(id): Path<String>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();
    let id = record_id(&id, locale)?;

    let publication = state.client.publication(&id, locale).await.or_page(locale)?;
    let text = publication.localized(locale);

    let info = facts(&[
        (l.kind, publication.type_name().unwrap_or_default().to_string()),
        (l.authors, publication.authors().join(", ")),
        (l.year, publication.year().map(|y| y.to_string()).unwrap_or_default()),
        (
            l.published,
            publication.data_publicacao.map(|d| long_date(d, locale)).unwrap_or_default(),
        ),
        (l.edition, publication.edicao.clone().unwrap_or_default()),
        (l.pages, publication.paginas.map(|n| n.to_string()).unwrap_or_default()),
    ]);

    let content = publication
        .conteudo
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(rich_text)
        .unwrap_or_else(|| rich_text(&text.description));

    let body = format!(
        "{}{}<img class=\"cover\" src=\"{}\" alt=\"{}\">{info}{content}",
        back_link("/publicacoes", l),
        page_header(&text.name, text.summary.as_deref().unwrap_or_default()),
        escape(&state.assets.url(publication.capa.as_deref(), transform::COVER)),
        escape(&text.name),
    );
    Ok(page(Document::new(text.name, body), locale))
}
