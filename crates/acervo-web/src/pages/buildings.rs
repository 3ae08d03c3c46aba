use super::{or_empty, page, record_id, PageResult};
use crate::error::PageResultExt;
use crate::i18n::Lang;
use crate::render::media::{gallery, Slide};
use crate::render::timeline::{building_timeline, TimelineEntry};
use crate::render::widgets::{back_link, card_grid, facts, page_header, rich_text, Card};
use crate::render::{escape, Document};
use crate::server::SharedState;
use acervo_content::{transform, Building, Translated, PLACEHOLDER_PATH};
use acervo_listing::timeline::today;
use axum::extract::{Path, State};
use chrono::{Datelike, NaiveDate};

/// Chronological key: start date when known, else 1 January of the year of
/// construction. Undated buildings, and years outside the calendar, go last.
fn chronology(b: &Building) -> (i32, i64) {
    let start = b.data_inicio.or_else(|| {
        b.ano_construcao
            .and_then(|y| i32::try_from(y).ok())
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
    });
    let day = start.map_or(i32::MAX, |d| d.num_days_from_ce());
    (day, b.id.as_i64().unwrap_or_default())
}

pub async fn list(State(state): State<SharedState>, lang: Lang) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();

    let mut buildings = state.client.buildings(locale).await.or_page(locale)?;
    buildings.sort_by_key(chronology);

    let cards: Vec<Card> = buildings
        .iter()
        .map(|b| {
            let subtitle = b.ano_construcao.map(|y| y.to_string()).unwrap_or_default();
            Card::new(
                format!("/edificios/{}", b.id),
                state.assets.url(b.imagem.as_deref(), transform::THUMB),
                b.localized(locale).name,
            )
            .subtitle(subtitle)
        })
        .collect();

    let entries: Vec<TimelineEntry> = buildings
        .iter()
        .map(|b| TimelineEntry {
            href: format!("/edificios/{}", b.id),
            title: b.localized(locale).name,
            start: b.data_inicio,
            end: b.data_fim,
            year: b.ano_construcao,
        })
        .collect();

    let body = format!(
        "{}{}<h2>{}</h2>{}",
        page_header(l.buildings, l.buildings_desc),
        card_grid(&cards, l),
        escape(l.timeline),
        building_timeline(&entries, today(), locale)
    );
    Ok(page(Document::new(l.buildings, body), locale))
}

pub async fn detail(
    State(state): State<SharedState>,
    lang: Lang,
    Path(id): Path<String>,
) -> PageResult {
    let locale = lang.locale();
    let l = lang.labels();
    let id = record_id(&id, locale)?;

    let building = state.client.building(&id, locale).await.or_page(locale)?;
    let courses = or_empty("building courses", state.client.courses(Some(&id), locale)).await;
    let text = building.localized(locale);

    let cover = format!(
        "<img class=\"cover\" src=\"{}\" alt=\"{}\">",
        escape(&state.assets.url(building.imagem.as_deref(), transform::COVER)),
        escape(&text.name)
    );
    let info = facts(&[
        (l.year_built, building.ano_construcao.map(|y| y.to_string()).unwrap_or_default()),
        (l.location, building.localizacao.clone().unwrap_or_default()),
    ]);
    let slides = Slide::from_files(&building.gallery(), &state.assets, &text.name);

    let mut body = format!(
        "{}{}{cover}{info}<h2>{}</h2>{}{}",
        back_link("/edificios", l),
        page_header(&text.name, ""),
        escape(l.about_building),
        rich_text(&text.description),
        gallery("fotos", &slides),
    );

    if !courses.is_empty() {
        let cards: Vec<Card> = courses
            .iter()
            .map(|c| {
                let spans = c.year_spans();
                let start = spans.iter().map(|s| s.0).min();
                let end = spans.iter().map(|s| s.1).max();
                let years = match start.zip(end) {
                    Some((start, end)) => format!("{start}–{end}"),
                    None => String::new(),
                };
                let link = format!("/cursos?edificio={}", building.id);
                Card::new(link, PLACEHOLDER_PATH, c.localized(locale).name).subtitle(years)
            })
            .collect();
        body.push_str(&format!("<h2>{}</h2>{}", escape(l.courses), card_grid(&cards, l)));
    }

    Ok(page(Document::new(text.name, body), locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(rows: serde_json::Value) -> Vec<String> {
        let mut buildings: Vec<Building> = serde_json::from_value(rows).unwrap();
        buildings.sort_by_key(chronology);
        buildings.iter().map(|b| b.id.to_string()).collect()
    }

    #[test]
    fn construction_year_orders_with_start_dates() {
        let ids = order(json!([
            { "id": 2, "data_inicio": "1953-01-01" },
            { "id": 1, "ano_construcao": 1950 },
            { "id": 3, "ano_construcao": 1953, "data_inicio": "1952-12-31" }
        ]));
        assert_eq!(ids, ["1", "3", "2"]);
    }

    #[test]
    fn out_of_range_years_sort_last() {
        let ids = order(json!([
            { "id": 1, "ano_construcao": 9_000_000_000_i64 },
            { "id": 2 },
            { "id": 3, "ano_construcao": 1900 }
        ]));
        assert_eq!(ids, ["3", "1", "2"]);
    }
}
