//! Teaching materials and student works, browsed by category and building.

use super::{list_controller, or_empty, page, record_id, ListParams, PageResult};
use crate::error::PageResultExt;
use crate::i18n::{Labels, Lang};
use crate::render::widgets::{
    back_link, card_grid, chip_row, facts, page_header, rich_text, toolbar, Card, Chip, Toolbar,
};
use crate::render::{escape, href, Document};
use crate::server::SharedState;
use acervo_content::translation::related_name;
use acervo_content::{
    transform, Building, Locale, Material, MaterialCategory, MaterialKind, MaterialLink, SortOrder,
    Translated, PLACEHOLDER_PATH,
};
use acervo_listing::{Listable, SortKey, SortSpec};
use axum::extract::{Path, Query, State};
use std::collections::BTreeSet;

fn kind_of(params: &ListParams) -> MaterialKind {
    params.tipo.as_deref().and_then(MaterialKind::parse).unwrap_or_default()
}

fn kind_label(kind: MaterialKind, l: &'static Labels) -> &'static str {
    match kind {
        MaterialKind::Material => l.materials,
        MaterialKind::Trabalho => l.works,
    }
}

/// `tipo` selects the collection slice here, not a row category.
fn listing_params(params: &ListParams) -> ListParams {
    ListParams { tipo: None, estado: None, ..params.clone() }
}

fn sort_options(l: &'static Labels) -> [(SortSpec, &'static str); 2] {
    [
        (SortSpec::new(SortKey::Name, SortOrder::Asc), l.sort_name_az),
        (SortSpec::new(SortKey::Name, SortOrder::Desc), l.sort_name_za),
    ]
}

/// A category together with the buildings holding items of the listed kind.
#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub category: MaterialCategory,
    pub name: String,
    buildings: BTreeSet<String>,
}

impl CategoryRow {
    fn new(category: MaterialCategory, links: &[MaterialLink], locale: Locale) -> Option<Self> {
        let id = category.id.clone()?;
        let buildings: BTreeSet<String> = links
            .iter()
            .filter(|link| link.category == id)
            .map(|link| link.building.to_string())
            .collect();
        if buildings.is_empty() {
            return None;
        }
        let name = category.localized(locale).name;
        Some(Self { category, name, buildings })
    }
}

impl Listable for CategoryRow {
    fn name(&self) -> &str {
        &self.name
    }

    fn in_scope(&self, scope: &str) -> bool {
        self.buildings.contains(scope)
    }
}

/// A material resolved for listing.
#[derive(Debug, Clone)]
pub struct MaterialRow {
    pub material: Material,
    pub name: String,
}

impl Listable for MaterialRow {
    fn name(&self) -> &str {
        &self.name
    }

    fn in_scope(&self, scope: &str) -> bool {
        self.material.building_id().is_some_and(|b| b.to_string() == scope)
    }
}

/// Chips for "all buildings" plus each building in `ids`, in the store's order.
fn building_chips(
    buildings: &[Building],
    ids: &BTreeSet<String>,
    path: &str,
    kind: MaterialKind,
    active: Option<&str>,
    locale: Locale,
    l: &Labels,
) -> Vec<Chip> {
    let tipo = Some(kind.param());
    let mut chips = vec![Chip {
        label: l.all.to_string(),
        href: href(path, &[("tipo", tipo)]),
        active: active.is_none(),
    }];
    chips.extend(buildings.iter().filter_map(|b| {
        let id = b.id.to_string();
        ids.contains(&id).then(|| Chip {
            label: b.localized(locale).name,
            href: href(path, &[("tipo", tipo), ("edificio", Some(id.as_str()))]),
            active: active == Some(id.as_str()),
        })
    }));
    chips
}

pub async fn landing(lang: Lang) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();

    let cards: Vec<Card> = [MaterialKind::Material, MaterialKind::Trabalho]
        .into_iter()
        .map(|kind| {
            Card::new(
                href("/materiais/categorias", &[("tipo", Some(kind.param()))]),
                PLACEHOLDER_PATH,
                kind_label(kind, l),
            )
        })
        .collect();

    let body = format!("{}{}", page_header(l.materials, l.materials_desc), card_grid(&cards, l));
    Ok(page(Document::new(l.materials, body), locale))
}

pub async fn categories(
    State(state): State<SharedState>,
    lang: Lang,
    Query(params): Query<ListParams>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();
    let kind = kind_of(&params);

    let (links, categories) = tokio::join!(
        state.client.material_links(kind),
        state.client.material_categories(locale)
    );
    let links = links.or_page(locale)?;
    let categories = categories.or_page(locale)?;
    let buildings = or_empty("buildings", state.client.buildings(locale)).await;

    let rows: Vec<CategoryRow> = categories
        .into_iter()
        .filter_map(|c| CategoryRow::new(c, &links, locale))
        .collect();
    let controller = list_controller(rows, &listing_params(&params), SortSpec::default());
    let list_state = controller.state();

    let linked: BTreeSet<String> = links.iter().map(|link| link.building.to_string()).collect();
    let chips = building_chips(
        &buildings,
        &linked,
        "/materiais/categorias",
        kind,
        list_state.scope.as_deref(),
        locale,
        l,
    );

    let options = sort_options(l);
    let bar = Toolbar {
        action: "/materiais/categorias",
        hidden: vec![
            ("tipo", kind.param().to_string()),
            ("edificio", ListParams::keep(&params.edificio)),
        ],
        search: Some((list_state.query.as_str(), "")),
        sort: Some((&options[..], list_state.sort)),
        range: None,
    };

    let cards: Vec<Card> = controller
        .visible_items()
        .into_iter()
        .filter_map(|row| {
            let id = row.category.id.as_ref()?.to_string();
            let link = href(
                &format!("/materiais/categorias/{id}"),
                &[("tipo", Some(kind.param())), ("edificio", list_state.scope.as_deref())],
            );
            let cover = state.assets.url(row.category.imagem.as_deref(), transform::THUMB);
            Some(Card::new(link, cover, &row.name))
        })
        .collect();

    let title = kind_label(kind, l);
    let body = format!(
        "{}{}{}{}{}",
        back_link("/materiais", l),
        page_header(title, l.categories),
        chip_row(&chips),
        toolbar(&bar, l),
        card_grid(&cards, l)
    );
    Ok(page(Document::new(title, body), locale))
}

pub async fn category(
    State(state): State<SharedState>,
    lang: Lang,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();
    let kind = kind_of(&params);
    let id = record_id(&id, locale)?;

    let category = state.client.material_category(&id, locale).await.or_page(locale)?;
    let (materials, buildings) = tokio::join!(
        or_empty("materials", state.client.materials(&id, kind, locale)),
        or_empty("buildings", state.client.buildings(locale)),
    );
    let text = category.localized(locale);

    let held: BTreeSet<String> = materials
        .iter()
        .filter_map(|m| m.building_id())
        .map(ToString::to_string)
        .collect();
    let rows: Vec<MaterialRow> = materials
        .into_iter()
        .map(|material| {
            let name = material.localized(locale).name;
            MaterialRow { material, name }
        })
        .collect();
    let controller = list_controller(rows, &listing_params(&params), SortSpec::default());
    let list_state = controller.state();

    let path = format!("/materiais/categorias/{id}");
    let scope = list_state.scope.as_deref();
    let chips = building_chips(&buildings, &held, &path, kind, scope, locale, l);

    let options = sort_options(l);
    let bar = Toolbar {
        action: &path,
        hidden: vec![
            ("tipo", kind.param().to_string()),
            ("edificio", ListParams::keep(&params.edificio)),
        ],
        search: Some((list_state.query.as_str(), "")),
        sort: Some((&options[..], list_state.sort)),
        range: None,
    };

    let cards: Vec<Card> = controller
        .visible_items()
        .into_iter()
        .map(|row| {
            let m = &row.material;
            let cover = state.assets.url(m.capa.as_deref(), transform::THUMB);
            Card::new(format!("/materiais/{}", m.id), cover, &row.name)
        })
        .collect();

    let back = href("/materiais/categorias", &[("tipo", Some(kind.param()))]);
    let body = format!(
        "{}{}{}{}{}",
        back_link(&back, l),
        page_header(&text.name, kind_label(kind, l)),
        chip_row(&chips),
        toolbar(&bar, l),
        card_grid(&cards, l)
    );
    Ok(page(Document::new(text.name, body), locale))
}

pub async fn detail(
    State(state): State<SharedState>,
    lang: Lang,
    Path(id): Path<String>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();
    let id = record_id(&id, locale)?;

    let material = state.client.material(&id, locale).await.or_page(locale)?;
    let text = material.localized(locale);

    let kind = match material.kind() {
        Some(kind) => kind_label(kind, l).to_string(),
        None => material.tipo.clone().unwrap_or_default(),
    };
    let tipo = material.kind().unwrap_or_default().param();
    let back = match material.category_id() {
        Some(c) => href(&format!("/materiais/categorias/{c}"), &[("tipo", Some(tipo))]),
        None => href("/materiais/categorias", &[("tipo", Some(tipo))]),
    };

    let body = format!(
        "{}{}<img class=\"cover\" src=\"{}\" alt=\"{}\">{}{}",
        back_link(&back, l),
        page_header(&text.name, text.summary.as_deref().unwrap_or_default()),
        escape(&state.assets.url(material.capa.as_deref(), transform::COVER)),
        escape(&text.name),
        facts(&[
            (l.kind, kind),
            (l.category, related_name(material.categoria.as_ref(), locale).unwrap_or_default()),
        ]),
        rich_text(&text.description),
    );
    Ok(page(Document::new(text.name, body), locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use acervo_content::RecordId;
    use serde_json::json;

    fn link(category: i64, building: i64) -> MaterialLink {
        MaterialLink { category: RecordId::Int(category), building: RecordId::Int(building) }
    }

    fn category(id: i64, name: &str) -> MaterialCategory {
        serde_json::from_value(json!({
            "id": id,
            "translations": [{ "languages_code": "pt", "nome": name }]
        }))
        .unwrap()
    }

    #[test]
    fn categories_without_items_of_the_kind_are_dropped() {
        let links = [link(1, 7), link(1, 8), link(2, 8)];
        let categories = [category(1, "Mapas"), category(2, "Maquetas"), category(3, "Vazia")];
        let rows: Vec<CategoryRow> = categories
            .into_iter()
            .filter_map(|c| CategoryRow::new(c, &links, Locale::Pt))
            .collect();
        assert_eq!(rows.len(), 2);

        let params = ListParams {
            tipo: Some("material".into()),
            edificio: Some("7".into()),
            ..Default::default()
        };
        let controller = list_controller(rows, &listing_params(&params), SortSpec::default());
        let names: Vec<&str> =
            controller.visible_items().into_iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Mapas"]);
    }

    #[test]
    fn materials_scoped_by_building() {
        let materials: Vec<Material> = serde_json::from_value(json!([
            { "id": 1, "tipo": "Trabalho", "edificio": { "id": 2 },
              "translations": [{ "languages_code": "pt", "nome": "Herbário" }] },
            { "id": 2, "tipo": "Trabalho", "edificio": null,
              "translations": [{ "languages_code": "pt", "nome": "Atlas" }] }
        ]))
        .unwrap();
        let rows: Vec<MaterialRow> = materials
            .into_iter()
            .map(|material| {
                let name = material.localized(Locale::Pt).name;
                MaterialRow { material, name }
            })
            .collect();
        let params = ListParams { edificio: Some("2".into()), ..Default::default() };
        let controller = list_controller(rows, &params, SortSpec::default());
        assert_eq!(controller.visible_items().len(), 1);
        assert_eq!(controller.visible_items()[0].name, "Herbário");
    }
}
