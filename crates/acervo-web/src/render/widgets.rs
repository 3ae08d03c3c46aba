//! Small building blocks shared by every page.

use super::escape;
use crate::i18n::Labels;
use acervo_listing::SortSpec;

pub fn page_header(title: &str, description: &str) -> String {
    let description = if description.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", escape(description))
    };
    format!("<div class=\"page-header\"><h1>{}</h1>{description}</div>", escape(title))
}

pub fn back_link(href: &str, labels: &Labels) -> String {
    format!("<a class=\"back\" href=\"{}\">&larr; {}</a>", escape(href), escape(labels.back))
}

/// "Nothing found" message.
pub fn empty_state(labels: &Labels) -> String {
    format!("<p class=\"empty\">{}</p>", escape(labels.nothing_found))
}

/// Rich text from the store, inserted as-is.
pub fn rich_text(html: &str) -> String {
    format!("<div class=\"rich-text\">{html}</div>")
}

/// A linked tile with an image.
#[derive(Debug, Clone, Default)]
pub struct Card {
    pub href: String,
    pub image: String,
    pub title: String,
    pub subtitle: Option<String>,
}

impl Card {
    pub fn new(
        href: impl Into<String>,
        image: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self { href: href.into(), image: image.into(), title: title.into(), subtitle: None }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        let subtitle = subtitle.into();
        if !subtitle.is_empty() {
            self.subtitle = Some(subtitle);
        }
        self
    }
}

fn card(card: &Card) -> String {
    let subtitle = card
        .subtitle
        .as_deref()
        .map(|s| format!("<p>{}</p>", escape(s)))
        .unwrap_or_default();
    format!(
        "<a class=\"card\" href=\"{href}\"><img src=\"{img}\" alt=\"{alt}\" loading=\"lazy\">\
<div class=\"body\"><h3>{title}</h3>{subtitle}</div></a>",
        href = escape(&card.href),
        img = escape(&card.image),
        alt = escape(&card.title),
        title = escape(&card.title),
    )
}

/// Card grid, or the empty state when there are no cards.
pub fn card_grid(cards: &[Card], labels: &Labels) -> String {
    if cards.is_empty() {
        return empty_state(labels);
    }
    let inner: String = cards.iter().map(card).collect();
    format!("<div class=\"grid\">{inner}</div>")
}

/// A filter link.
#[derive(Debug, Clone)]
pub struct Chip {
    pub label: String,
    pub href: String,
    pub active: bool,
}

pub fn chip_row(chips: &[Chip]) -> String {
    if chips.is_empty() {
        return String::new();
    }
    let inner: String = chips
        .iter()
        .map(|c| {
            let class = if c.active { "chip active" } else { "chip" };
            format!("<a class=\"{class}\" href=\"{}\">{}</a>", escape(&c.href), escape(&c.label))
        })
        .collect();
    format!("<nav class=\"chips\">{inner}</nav>")
}

/// Trail of links; the last crumb is the current page and has no link.
pub fn breadcrumbs(crumbs: &[(String, Option<String>)]) -> String {
    if crumbs.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = crumbs
        .iter()
        .map(|(label, href)| match href {
            Some(href) => format!("<a href=\"{}\">{}</a>", escape(href), escape(label)),
            None => format!("<strong>{}</strong>", escape(label)),
        })
        .collect();
    format!("<nav class=\"breadcrumbs\">{}</nav>", parts.join("<span>/</span>"))
}

/// Definition list of label/value pairs, skipping empty values.
pub fn facts(rows: &[(&str, String)]) -> String {
    let inner: String = rows
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("<dt>{}</dt><dd>{}</dd>", escape(label), escape(value)))
        .collect();
    if inner.is_empty() {
        return String::new();
    }
    format!("<dl class=\"facts\">{inner}</dl>")
}

/// GET form holding search, sort and year-range controls for a listing.
///
/// Parameters in `hidden` are carried over so a submission keeps the active filters.
#[derive(Debug, Clone, Default)]
pub struct Toolbar<'a> {
    pub action: &'a str,
    pub hidden: Vec<(&'a str, String)>,
    pub search: Option<(&'a str, &'a str)>,
    pub sort: Option<(&'a [(SortSpec, &'a str)], SortSpec)>,
    pub range: Option<((i64, i64), Option<(i64, i64)>)>,
}

pub fn toolbar(bar: &Toolbar<'_>, labels: &Labels) -> String {
    let mut out =
        format!("<form class=\"toolbar\" method=\"get\" action=\"{}\">", escape(bar.action));

    for (name, value) in &bar.hidden {
        if !value.is_empty() {
            out.push_str(&format!(
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
                escape(name),
                escape(value)
            ));
        }
    }

    if let Some((query, placeholder)) = bar.search {
        out.push_str(&format!(
            "<label>{label}<input type=\"search\" name=\"q\" value=\"{value}\" \
placeholder=\"{placeholder}\"></label>",
            label = escape(labels.search),
            value = escape(query),
            placeholder = escape(placeholder),
        ));
    }

    if let Some((options, current)) = bar.sort {
        let opts: String = options
            .iter()
            .map(|(spec, label)| {
                let selected = if *spec == current { " selected" } else { "" };
                let value = spec.to_param();
                format!("<option value=\"{value}\"{selected}>{}</option>", escape(label))
            })
            .collect();
        out.push_str(&format!(
            "<label>{}<select name=\"sort\">{opts}</select></label>",
            escape(labels.sort)
        ));
    }

    if let Some(((lo, hi), current)) = bar.range {
        let (from, to) = current.unwrap_or((lo, hi));
        out.push_str(&format!(
            "<label>{from_label}<input type=\"number\" name=\"from\" \
min=\"{lo}\" max=\"{hi}\" value=\"{from}\"></label>\
<label>{to_label}<input type=\"number\" name=\"to\" \
min=\"{lo}\" max=\"{hi}\" value=\"{to}\"></label>",
            from_label = escape(labels.from_year),
            to_label = escape(labels.to_year),
        ));
    }

    out.push_str(&format!(
        "<button type=\"submit\">{}</button><a href=\"{}\">{}</a></form>",
        escape(labels.apply),
        escape(bar.action),
        escape(labels.clear)
    ));
    out
}
