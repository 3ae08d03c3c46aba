//! Page shell: head, site header with language switch, footer.

use super::escape;
use crate::i18n::labels;
use acervo_content::{Locale, PLACEHOLDER_PATH};

const STYLE: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,sans-serif;color:#1f2933;background:#f7f5f2}
a{color:inherit}
.site-header{display:flex;justify-content:space-between;align-items:center;
  padding:1rem 2rem;background:#1f3a5f;color:#fff}
.site-header a{text-decoration:none}
.lang a{margin-left:.5rem;opacity:.7}.lang a.active{opacity:1;font-weight:600}
main{max-width:1200px;margin:0 auto;padding:2rem}
.page-header h1{margin:0 0 .25rem}.page-header p{margin:0 0 1.5rem;color:#52606d}
.back{display:inline-block;margin-bottom:1rem}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:1.25rem}
.card{display:block;background:#fff;border-radius:8px;overflow:hidden;text-decoration:none;
  box-shadow:0 1px 3px #0002}
.card img{width:100%;aspect-ratio:4/3;object-fit:cover;display:block}
.card .body{padding:.75rem 1rem}.card h3{margin:0 0 .25rem;font-size:1.05rem}
.card p{margin:0;color:#52606d;font-size:.9rem}
.chips{display:flex;flex-wrap:wrap;gap:.5rem;margin:0 0 1rem}
.chip{padding:.3rem .8rem;border-radius:999px;background:#e4e7eb;text-decoration:none;
  font-size:.9rem}
.chip.active{background:#1f3a5f;color:#fff}
.toolbar{display:flex;flex-wrap:wrap;gap:1rem;align-items:end;margin-bottom:1.5rem}
.toolbar label{display:flex;flex-direction:column;font-size:.85rem;gap:.25rem}
.carousel{display:flex;overflow-x:auto;scroll-snap-type:x mandatory;gap:1rem;margin:1rem 0}
.carousel figure{flex:0 0 100%;scroll-snap-align:center;margin:0}
.carousel img{width:100%;max-height:70vh;object-fit:contain;background:#000}
.thumbs{display:flex;gap:.5rem;overflow-x:auto}.thumbs img{width:96px;height:72px;object-fit:cover}
figcaption{padding:.5rem 0;color:#52606d}
.breadcrumbs{font-size:.9rem;margin-bottom:1rem}.breadcrumbs span{margin:0 .35rem}
.timeline{list-style:none;padding:0;border-left:3px solid #1f3a5f}
.timeline li{margin:0 0 1.25rem 1rem}.timeline .when{font-weight:600}
.timeline .duration{color:#52606d;font-size:.9rem}
table{width:100%;border-collapse:collapse;background:#fff}
th,td{text-align:left;padding:.5rem .75rem;border-bottom:1px solid #e4e7eb}
td img{width:40px;height:40px;border-radius:50%;object-fit:cover}
.facts{display:grid;grid-template-columns:max-content 1fr;gap:.25rem 1rem}.facts dt{font-weight:600}
.empty{padding:2rem;text-align:center;color:#52606d}
.load-more{display:block;margin:1.5rem auto;text-align:center}
"#;

/// A rendered page body plus its title.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub title: String,
    pub body: String,
}

impl Document {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into() }
    }
}

fn language_switch(locale: Locale) -> String {
    Locale::ALL
        .iter()
        .map(|l| {
            let class = if *l == locale { " class=\"active\"" } else { "" };
            format!(
                "<a href=\"/lang/{code}\"{class}>{label}</a>",
                code = l.code(),
                label = l.code().to_uppercase()
            )
        })
        .collect()
}

/// Full HTML document around `doc`.
pub fn document(doc: &Document, locale: Locale) -> String {
    let l = labels(locale);
    let title = if doc.title.is_empty() {
        l.site_title.to_string()
    } else {
        format!("{} | {}", doc.title, l.site_title)
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{title}</title><link rel=\"icon\" href=\"{icon}\"><style>{STYLE}</style></head>\
<body><header class=\"site-header\">\
<a href=\"/\"><strong>{site}</strong> <small>{subtitle}</small></a>\
<nav class=\"lang\" aria-label=\"{language}\">{switch}</nav></header>\
<main>{body}</main></body></html>",
        lang = locale.code(),
        title = escape(&title),
        icon = PLACEHOLDER_PATH,
        site = escape(l.site_title),
        subtitle = escape(l.site_subtitle),
        language = escape(l.language),
        switch = language_switch(locale),
        body = doc.body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_body_with_locale() {
        let html = document(&Document::new("Cursos", "<p>x</p>"), Locale::Pt);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"pt\">"));
        assert!(html.contains("<title>Cursos | Domingos Rebelo</title>"));
        assert!(html.contains("<main><p>x</p></main>"));
        assert!(html.contains("<a href=\"/lang/pt\" class=\"active\">PT</a>"));
        assert!(html.contains("<a href=\"/lang/en\">EN</a>"));
    }

    #[test]
    fn escapes_title() {
        let html = document(&Document::new("<script>", ""), Locale::En);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<title><script>"));
    }
}
