//! Building timeline, staff table and staff career list.

use super::{escape, widgets::empty_state};
use crate::i18n::labels;
use acervo_content::{transform, AssetUrls, CareerYear, Locale, StaffMember};
use acervo_listing::timeline::{format_duration, long_date};
use chrono::NaiveDate;

/// One entry of a building timeline.
#[derive(Debug, Clone)]
pub struct TimelineEntry {
    pub href: String,
    pub title: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub year: Option<i64>,
}

fn period(entry: &TimelineEntry, locale: Locale) -> String {
    let l = labels(locale);
    match (entry.start, entry.end) {
        (Some(start), Some(end)) => {
            format!("{} – {}", long_date(start, locale), long_date(end, locale))
        }
        (Some(start), None) => format!("{} – {}", long_date(start, locale), l.in_use),
        (None, _) => entry.year.map(|y| y.to_string()).unwrap_or_default(),
    }
}

/// Vertical timeline; each entry shows its period and how long it lasted.
pub fn building_timeline(entries: &[TimelineEntry], today: NaiveDate, locale: Locale) -> String {
    if entries.is_empty() {
        return empty_state(labels(locale));
    }
    let items: String = entries
        .iter()
        .map(|e| {
            let duration = e
                .start
                .map(|start| format_duration(start, e.end, today, locale))
                .filter(|d| !d.is_empty())
                .map(|d| format!("<div class=\"duration\">{}</div>", escape(&d)))
                .unwrap_or_default();
            format!(
                "<li><div class=\"when\">{}</div><a href=\"{}\">{}</a>{duration}</li>",
                escape(&period(e, locale)),
                escape(&e.href),
                escape(&e.title)
            )
        })
        .collect();
    format!("<ol class=\"timeline\">{items}</ol>")
}

/// Directory table of staff members.
pub fn staff_table(members: &[StaffMember], assets: &AssetUrls, locale: Locale) -> String {
    let l = labels(locale);
    if members.is_empty() {
        return empty_state(l);
    }
    let rows: String = members
        .iter()
        .map(|m| {
            let name = m.nome.as_deref().unwrap_or_default();
            let teacher = if m.is_teacher() { l.yes } else { l.no };
            format!(
                "<tr><td><img src=\"{photo}\" alt=\"\" loading=\"lazy\"></td>\
<td><a href=\"/pessoal/{id}\">{name}</a></td><td>{number}</td><td>{teacher}</td></tr>",
                photo = escape(&assets.url(m.foto.as_deref(), transform::AVATAR)),
                id = escape(&m.id.to_string()),
                name = escape(name),
                number = m.numero_processo.map(|n| n.to_string()).unwrap_or_default(),
                teacher = escape(teacher),
            )
        })
        .collect();
    format!(
        "<table class=\"staff\"><thead><tr><th></th><th>{}</th><th>{}</th><th>{}</th></tr></thead>\
<tbody>{rows}</tbody></table>",
        escape(l.staff),
        escape(l.process_number),
        escape(l.teacher)
    )
}

/// Per-year career of a staff member, oldest first.
pub fn career_list(years: &[CareerYear], locale: Locale) -> String {
    let l = labels(locale);
    if years.is_empty() {
        return empty_state(l);
    }
    let items: String = years
        .iter()
        .map(|y| {
            let mut facts = Vec::new();
            for (label, value) in [
                (l.role, &y.role),
                (l.staff_category, &y.category),
                (l.group, &y.group),
                (l.course, &y.course),
            ] {
                if let Some(value) = value {
                    facts.push(format!("<dt>{}</dt><dd>{}</dd>", escape(label), escape(value)));
                }
            }
            if !y.disciplines.is_empty() {
                facts.push(format!(
                    "<dt>{}</dt><dd>{}</dd>",
                    escape(l.disciplines),
                    escape(&y.disciplines.join(", "))
                ));
            }
            format!(
                "<li><div class=\"when\">{}/{}</div><dl class=\"facts\">{}</dl></li>",
                y.start,
                y.end,
                facts.concat()
            )
        })
        .collect();
    format!("<ol class=\"timeline\">{items}</ol>")
}
