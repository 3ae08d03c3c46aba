use super::{or_empty, page, record_id, PageResult};
use crate::error::PageResultExt;
use crate::i18n::Lang;
use crate::render::widgets::{back_link, card_grid, facts, page_header, rich_text, Card};
use crate::render::{escape, Document};
use crate::server::SharedState;
use acervo_content::translation::related_name;
use acervo_content::{transform, Translated};
use acervo_listing::timeline::long_date;
use axum::extract::{Path, State};

pub async fn category(
    State(state): State<SharedState>,
    lang: Lang,
    Path(id): Path<String>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();
    let id = record_id(&id, locale)?;

    let category = state.client.document_category(&id, locale).await.or_page(locale)?;
    let documents = or_empty("documents", state.client.documents(&id, locale)).await;
    let text = category.localized(locale);

    let cards: Vec<Card> = documents
        .iter()
        .map(|d| {
            Card::new(
                format!("/documentos/{}", d.id),
                state.assets.url(d.capa.as_deref(), transform::THUMB),
                d.localized(locale).name,
            )
            .subtitle(d.data.map(|date| long_date(date, locale)).unwrap_or_default())
        })
        .collect();

    let body = format!(
        "{}{}{}",
        back_link("/", l),
        page_header(&text.name, text.summary.as_deref().unwrap_or_default()),
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

    let document = state.client.document(&id, locale).await.or_page(locale)?;
    let text = document.localized(locale);
    let back = document
        .category_id()
        .map(|c| format!("/documentos/categoria/{c}"))
        .unwrap_or_else(|| "/".to_string());

    let info = facts(&[
        (l.date, document.data.map(|d| long_date(d, locale)).unwrap_or_default()),
        (l.authors, document.authors().join(", ")),
        (l.category, related_name(document.categoria.as_ref(), locale).unwrap_or_default()),
    ]);
    let open = document
        .ficheiro
        .as_deref()
        .map(|file| {
            format!(
                "<p><a class=\"button\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></p>",
                escape(&state.assets.url(Some(file), "")),
                escape(l.open_document)
            )
        })
        .unwrap_or_default();

    let body = format!(
        "{}{}<img class=\"cover\" src=\"{}\" alt=\"{}\">{info}{}{open}",
        back_link(&back, l),
        page_header(&text.name, text.summary.as_deref().unwrap_or_default()),
        escape(&state.assets.url(document.capa.as_deref(), transform::COVER)),
        escape(&text.name),
        rich_text(&text.description),
    );
    Ok(page(Document::new(text.name, body), locale))
}
