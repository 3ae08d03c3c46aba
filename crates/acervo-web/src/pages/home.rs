use super::{or_empty, page};
use crate::i18n::{Lang, Labels};
use crate::render::widgets::{card_grid, page_header, Card};
use crate::render::{escape, Document};
use crate::server::SharedState;
use acervo_content::{transform, Translated, PLACEHOLDER_PATH};
use axum::extract::State;
use axum::response::Html;

/// Top-level sections: path, title, description.
fn sections(l: &'static Labels) -> [(&'static str, &'static str, &'static str); 9] {
    [
        ("/edificios", l.buildings, l.buildings_desc),
        ("/cursos", l.courses, l.courses_desc),
        ("/pessoal", l.staff, l.staff_desc),
        ("/publicacoes", l.publications, l.publications_desc),
        ("/servicos", l.services, l.services_desc),
        ("/grupos", l.groups, l.groups_desc),
        ("/galeria", l.gallery, l.gallery_desc),
        ("/materiais", l.materials, l.materials_desc),
        ("/materiais/categorias?tipo=trabalho", l.works, l.materials_desc),
    ]
}

pub async fn index(State(state): State<SharedState>, lang: Lang) -> Html<String> {
    let locale = lang.locale();
    let l = lang.labels();

    let section_cards: Vec<Card> = sections(l)
        .into_iter()
        .map(|(href, title, desc)| Card::new(href, PLACEHOLDER_PATH, title).subtitle(desc))
        .collect();

    let categories =
        or_empty("document categories", state.client.document_categories(locale)).await;
    let document_cards: Vec<Card> = categories
        .iter()
        .filter_map(|c| {
            let id = c.id.as_ref()?;
            Some(Card::new(
                format!("/documentos/categoria/{id}"),
                state.assets.url(c.imagem.as_deref(), transform::THUMB),
                c.localized(locale).name,
            ))
        })
        .collect();

    let mut body = format!(
        "<section class=\"hero\"><h1>{}</h1><p>{}</p><p><small>{}</small></p></section>",
        escape(l.site_title),
        escape(l.site_tagline),
        escape(l.explore)
    );
    body.push_str(&card_grid(&section_cards, l));
    if !document_cards.is_empty() {
        body.push_str(&page_header(l.documents, l.documents_desc));
        body.push_str(&card_grid(&document_cards, l));
    }

    page(Document::new("", body), locale)
}
