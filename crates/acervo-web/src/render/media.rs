//! Image carousel and gallery.

use super::escape;
use acervo_content::{transform, AssetUrls, AttachedFile};

/// One image of a carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub src: String,
    pub thumb: String,
    pub alt: String,
    pub caption: Option<String>,
}

impl Slide {
    /// Slides for attached gallery files, captioned by file title then description.
    pub fn from_files(files: &[AttachedFile], assets: &AssetUrls, alt: &str) -> Vec<Slide> {
        files
            .iter()
            .map(|f| Slide {
                src: assets.url(Some(&f.file), transform::SLIDE),
                thumb: assets.url(Some(&f.file), transform::THUMB),
                alt: f.title.clone().unwrap_or_else(|| alt.to_string()),
                caption: f.title.clone().or_else(|| f.description.clone()),
            })
            .collect()
    }
}

fn figure(id: &str, index: usize, slide: &Slide) -> String {
    let caption = slide
        .caption
        .as_deref()
        .map(|c| format!("<figcaption>{}</figcaption>", escape(c)))
        .unwrap_or_default();
    format!(
        "<figure id=\"{id}-{index}\">\
<img src=\"{src}\" alt=\"{alt}\" loading=\"lazy\">{caption}</figure>",
        src = escape(&slide.src),
        alt = escape(&slide.alt),
    )
}

/// Horizontally scrolling strip of slides. Empty input renders nothing.
pub fn carousel(id: &str, slides: &[Slide]) -> String {
    if slides.is_empty() {
        return String::new();
    }
    let id = escape(id);
    let inner: String = slides.iter().enumerate().map(|(i, s)| figure(&id, i, s)).collect();
    format!("<section class=\"carousel\" id=\"{id}\">{inner}</section>")
}

/// Carousel plus a thumbnail row jumping to each slide.
pub fn gallery(id: &str, slides: &[Slide]) -> String {
    if slides.is_empty() {
        return String::new();
    }
    let anchor = escape(id);
    let thumbs: String = slides
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "<a href=\"#{anchor}-{i}\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\"></a>",
                escape(&s.thumb),
                escape(&s.alt)
            )
        })
        .collect();
    format!("{}<nav class=\"thumbs\">{thumbs}</nav>", carousel(id, slides))
}
