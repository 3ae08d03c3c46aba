//! Photo gallery: overview with category filters, category pages and single photos.

use super::{list_controller, or_empty, page, record_id, ListParams, PageResult};
use crate::error::PageResultExt;
use crate::i18n::{Labels, Lang};
use crate::render::media::{carousel, Slide};
use crate::render::widgets::{
    back_link, breadcrumbs, card_grid, chip_row, page_header, rich_text, Card, Chip,
};
use crate::render::{escape, href, Document};
use crate::server::{AppState, SharedState};
use acervo_content::{transform, GalleryCategory, GalleryPhoto, Locale, RecordId, Translated};
use acervo_listing::{Listable, SortSpec};
use axum::extract::{Path, Query, State};

/// A photo placed under its root category and, when deeper, its own category.
#[derive(Debug, Clone)]
pub struct PhotoRow {
    pub photo: GalleryPhoto,
    pub title: String,
    root: String,
    sub: Option<String>,
}

impl PhotoRow {
    pub fn new(photo: GalleryPhoto, root: &RecordId, locale: Locale) -> Self {
        let title = photo.title(locale);
        let sub = photo.category_id().filter(|id| *id != root).map(ToString::to_string);
        Self { photo, title, root: root.to_string(), sub }
    }
}

impl Listable for PhotoRow {
    fn name(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<&str> {
        Some(&self.root)
    }

    fn subcategory(&self) -> Option<&str> {
        self.sub.as_deref()
    }
}

fn category_href(category: &GalleryCategory) -> Option<String> {
    let id = category.id.as_ref()?;
    Some(if category.is_root() {
        format!("/galeria/categoria/{id}")
    } else {
        format!("/galeria/subcategoria/{id}")
    })
}

/// Gallery, then the ancestors of `category` root first, then `category`
/// itself (linked only when `link_last`).
fn trail(
    category: &GalleryCategory,
    link_last: bool,
    locale: Locale,
    l: &Labels,
) -> Vec<(String, Option<String>)> {
    let mut crumbs = vec![(l.gallery.to_string(), Some("/galeria".to_string()))];
    crumbs.extend(
        category
            .ancestors()
            .into_iter()
            .map(|a| (a.localized(locale).name, category_href(a))),
    );
    let last = if link_last { category_href(category) } else { None };
    crumbs.push((category.localized(locale).name, last));
    crumbs
}

fn photo_slides(photos: &[&GalleryPhoto], state: &AppState, locale: Locale) -> Vec<Slide> {
    photos
        .iter()
        .filter_map(|p| {
            let file = p.foto.as_deref()?;
            Some(Slide {
                src: state.assets.url(Some(file), transform::SLIDE),
                thumb: state.assets.url(Some(file), transform::THUMB),
                alt: p.title(locale),
                caption: p.caption(locale),
            })
        })
        .collect()
}

fn photo_cards(photos: &[&GalleryPhoto], state: &AppState, locale: Locale) -> Vec<Card> {
    photos
        .iter()
        .map(|p| {
            Card::new(
                format!("/galeria/{}", p.id),
                state.assets.url(p.foto.as_deref(), transform::THUMB),
                p.title(locale),
            )
        })
        .collect()
}

fn category_cards(categories: &[GalleryCategory], state: &AppState, locale: Locale) -> Vec<Card> {
    categories
        .iter()
        .filter_map(|c| {
            Some(Card::new(
                category_href(c)?,
                state.assets.url(c.imagem.as_deref(), transform::THUMB),
                c.localized(locale).name,
            ))
        })
        .collect()
}

pub async fn overview(
    State(state): State<SharedState>,
    lang: Lang,
    Query(params): Query<ListParams>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();

    let roots = state.client.gallery_root_categories(locale).await.or_page(locale)?;
    let selected = params
        .tipo
        .as_deref()
        .and_then(RecordId::parse)
        .filter(|id| roots.iter().any(|r| r.id.as_ref() == Some(id)));

    let mut chips = vec![Chip {
        label: l.all.to_string(),
        href: "/galeria".to_string(),
        active: selected.is_none(),
    }];
    chips.extend(roots.iter().filter_map(|r| {
        let id = r.id.as_ref()?.to_string();
        Some(Chip {
            label: r.localized(locale).name,
            href: href("/galeria", &[("tipo", Some(id.as_str()))]),
            active: selected.is_some() && r.id == selected,
        })
    }));

    let Some(root) = selected else {
        let body = format!(
            "{}{}{}",
            page_header(l.gallery, l.gallery_desc),
            chip_row(&chips),
            card_grid(&category_cards(&roots, &state, locale), l)
        );
        return Ok(page(Document::new(l.gallery, body), locale));
    };

    let subs = or_empty(
        "gallery subcategories",
        state.client.gallery_subcategories(Some(&root), locale),
    )
    .await;
    let mut ids = vec![root.clone()];
    ids.extend(subs.iter().filter_map(|s| s.id.clone()));
    let photos = or_empty("gallery photos", state.client.gallery_photos(&ids, locale)).await;

    let rows: Vec<PhotoRow> = photos.into_iter().map(|p| PhotoRow::new(p, &root, locale)).collect();
    let params = ListParams { tipo: Some(root.to_string()), ..params };
    let controller = list_controller(rows, &params, SortSpec::default());
    let visible: Vec<&GalleryPhoto> =
        controller.visible_items().into_iter().map(|r| &r.photo).collect();

    let tipo = root.to_string();
    let active_sub = controller.state().sub_filter.clone();
    let mut sub_chips = vec![Chip {
        label: l.all.to_string(),
        href: href("/galeria", &[("tipo", Some(tipo.as_str()))]),
        active: active_sub.is_none(),
    }];
    sub_chips.extend(subs.iter().filter_map(|s| {
        let id = s.id.as_ref()?.to_string();
        Some(Chip {
            label: s.localized(locale).name,
            href: href("/galeria", &[("tipo", Some(tipo.as_str())), ("sub", Some(id.as_str()))]),
            active: active_sub.as_deref() == Some(id.as_str()),
        })
    }));

    let body = format!(
        "{}{}{}{}",
        page_header(l.gallery, l.gallery_desc),
        chip_row(&chips),
        if subs.is_empty() { String::new() } else { chip_row(&sub_chips) },
        card_grid(&photo_cards(&visible, &state, locale), l)
    );
    Ok(page(Document::new(l.gallery, body), locale))
}

async fn category_page(state: SharedState, lang: Lang, id: String) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();
    let id = record_id(&id, locale)?;

    let category = state.client.gallery_category(&id, locale).await.or_page(locale)?;
    let (children, photos) = tokio::join!(
        or_empty("gallery subcategories", state.client.gallery_subcategories(Some(&id), locale)),
        or_empty("gallery photos", state.client.gallery_photos(std::slice::from_ref(&id), locale)),
    );
    let text = category.localized(locale);
    let photos: Vec<&GalleryPhoto> = photos.iter().collect();

    let mut body = breadcrumbs(&trail(&category, false, locale, l));
    body.push_str(&page_header(&text.name, text.summary.as_deref().unwrap_or_default()));
    if !children.is_empty() {
        body.push_str(&format!("<h2>{}</h2>", escape(l.subcategories)));
        body.push_str(&card_grid(&category_cards(&children, &state, locale), l));
    }
    if !photos.is_empty() || children.is_empty() {
        body.push_str(&format!("<h2>{}</h2>", escape(l.photos)));
        body.push_str(&carousel("fotos", &photo_slides(&photos, &state, locale)));
        body.push_str(&card_grid(&photo_cards(&photos, &state, locale), l));
    }
    Ok(page(Document::new(text.name, body), locale))
}

pub async fn category(
    State(state): State<SharedState>,
    lang: Lang,
    Path(id): Path<String>,
) -> PageResult {
    category_page(state, lang, id).await
}

pub async fn subcategory(
    State(state): State<SharedState>,
    lang: Lang,
    Path(id): Path<String>,
) -> PageResult {
    category_page(state, lang, id).await
}

pub async fn photo(
    State(state): State<SharedState>,
    lang: Lang,
    Path(id): Path<String>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();
    let id = record_id(&id, locale)?;

    let photo = state.client.gallery_photo(&id, locale).await.or_page(locale)?;
    let title = photo.title(locale);
    let category = photo.categoria.as_ref().and_then(|c| c.expanded());

    let mut crumbs = match category {
        Some(c) => trail(c, true, locale, l),
        None => vec![(l.gallery.to_string(), Some("/galeria".to_string()))],
    };
    crumbs.push((title.clone(), None));
    let back = category.and_then(category_href).unwrap_or_else(|| "/galeria".to_string());

    let body = format!(
        "{}{}{}<figure class=\"photo\"><img src=\"{}\" alt=\"{}\"></figure>{}",
        breadcrumbs(&crumbs),
        back_link(&back, l),
        page_header(&title, ""),
        escape(&state.assets.url(photo.foto.as_deref(), transform::LARGE)),
        escape(&title),
        rich_text(&photo.localized(locale).description),
    );
    Ok(page(Document::new(title, body), locale))
}
