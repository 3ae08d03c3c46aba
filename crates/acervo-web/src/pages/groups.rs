use super::{list_controller, page, record_id, ListParams, PageResult};
use crate::error::PageResultExt;
use crate::i18n::{Labels, Lang};
use crate::render::media::{gallery, Slide};
use crate::render::widgets::{
    back_link, card_grid, chip_row, facts, page_header, rich_text, toolbar, Card, Chip, Toolbar,
};
use crate::render::{escape, href, Document};
use crate::server::SharedState;
use acervo_content::{transform, Group, Locale, SortOrder, Translated};
use acervo_listing::{Listable, SortKey, SortSpec};
use axum::extract::{Path, Query, State};
use std::collections::BTreeMap;

/// A group resolved for listing.
#[derive(Debug, Clone)]
pub struct GroupRow {
    pub group: Group,
    pub name: String,
}

impl GroupRow {
    pub fn new(group: Group, locale: Locale) -> Self {
        let name = group.localized(locale).name;
        Self { group, name }
    }
}

impl Listable for GroupRow {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Option<&str> {
        self.group.tipo_grupo.as_deref()
    }
}

fn sort_options(l: &'static Labels) -> [(SortSpec, &'static str); 2] {
    [
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

    let groups = state.client.groups(locale).await.or_page(locale)?;
    let types: BTreeMap<String, String> = groups
        .iter()
        .filter_map(|g| {
            let raw = g.tipo_grupo.clone()?;
            let label = g.type_name().unwrap_or(&raw).to_string();
            Some((raw, label))
        })
        .collect();

    let rows: Vec<GroupRow> = groups.into_iter().map(|g| GroupRow::new(g, locale)).collect();
    let controller = list_controller(rows, &params, SortSpec::default());
    let list_state = controller.state();

    let sort = list_state.sort.to_param();
    let q = params.q.as_deref();
    let mut chips = vec![Chip {
        label: l.all.to_string(),
        href: href("/grupos", &[("q", q), ("sort", Some(sort.as_str()))]),
        active: list_state.filter.is_none(),
    }];
    chips.extend(types.iter().map(|(raw, label)| Chip {
        label: label.clone(),
        href: href(
            "/grupos",
            &[("tipo", Some(raw.as_str())), ("q", q), ("sort", Some(sort.as_str()))],
        ),
        active: list_state.filter.as_deref() == Some(raw.as_str()),
    }));

    let options = sort_options(l);
    let bar = Toolbar {
        action: "/grupos",
        hidden: vec![("tipo", ListParams::keep(&params.tipo))],
        search: Some((list_state.query.as_str(), "")),
        sort: Some((&options[..], list_state.sort)),
        range: None,
    };

    let cards: Vec<Card> = controller
        .visible_items()
        .into_iter()
        .map(|row| {
            let g = &row.group;
            let cover = state.assets.url(g.foto_capa.as_deref(), transform::THUMB);
            Card::new(format!("/grupos/{}", g.id), cover, &row.name)
                .subtitle(g.type_name().unwrap_or_default())
        })
        .collect();

    let body = format!(
        "{}{}{}{}",
        page_header(l.groups, l.groups_desc),
        chip_row(&chips),
        toolbar(&bar, l),
        card_grid(&cards, l)
    );
    Ok(page(Document::new(l.groups, body), locale))
}

pub async fn detail(
    State(state): State<SharedState>,
    lang: Lang,
    Path(id): Path<String>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();
    let id = record_id(&id, locale)?;

    let group = state.client.group(&id, locale).await.or_page(locale)?;
    let text = group.localized(locale);
    let slides = Slide::from_files(&group.gallery(), &state.assets, &text.name);

    let body = format!(
        "{}{}<img class=\"cover\" src=\"{}\" alt=\"{}\">{}{}{}",
        back_link("/grupos", l),
        page_header(&text.name, text.summary.as_deref().unwrap_or_default()),
        escape(&state.assets.url(group.foto_capa.as_deref(), transform::COVER)),
        escape(&text.name),
        facts(&[(l.kind, group.type_name().unwrap_or_default().to_string())]),
        rich_text(&text.description),
        gallery("fotos", &slides),
    );
    Ok(page(Document::new(text.name, body), locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_filter_and_name_sort() {
        let groups: Vec<Group> = serde_json::from_value(json!([
            { "id": 1, "tipo_grupo": "Clube",
              "translations": [{ "languages_code": "pt", "nome": "Xadrez" }] },
            { "id": 2, "tipo_grupo": "Associação",
              "translations": [{ "languages_code": "pt", "nome": "Estudantes" }] },
            { "id": 3, "tipo_grupo": "Clube",
              "translations": [{ "languages_code": "pt", "nome": "Ciência" }] }
        ]))
        .unwrap();
        let rows = groups.into_iter().map(|g| GroupRow::new(g, Locale::Pt)).collect();
        let params = ListParams { tipo: Some("Clube".into()), ..Default::default() };
        let controller = list_controller(rows, &params, SortSpec::default());
        let names: Vec<&str> =
            controller.visible_items().into_iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Ciência", "Xadrez"]);
    }
}
