//! Photo gallery: a two-level category tree holding photos.

use super::common::{Record, RecordId, Relation};
use crate::locale::Locale;
use crate::translation::{find_variant, name_placeholder, LocaleVariant, Translated};
use crate::text::non_blank;
use serde::{Deserialize, Serialize};

/// A gallery category. Root categories have no `categoria_principal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryCategory {
    #[serde(default)]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub ordem: Option<i64>,

    #[serde(default)]
    pub imagem: Option<String>,

    #[serde(default)]
    pub categoria_principal: Option<Relation<GalleryCategory>>,

    #[serde(default)]
    pub translations: Vec<Relation<LocaleVariant>>,
}

impl GalleryCategory {
    pub const COLLECTION: &'static str = "Galeria_Categorias";

    pub fn is_root(&self) -> bool {
        self.categoria_principal.is_none()
    }

    pub fn parent_id(&self) -> Option<&RecordId> {
        self.categoria_principal.as_ref()?.id()
    }

    /// Ancestors from the root down to the direct parent, as far as they were expanded.
    pub fn ancestors(&self) -> Vec<&GalleryCategory> {
        let mut chain = Vec::new();
        let mut current = self.categoria_principal.as_ref().and_then(Relation::expanded);
        while let Some(parent) = current {
            chain.push(parent);
            current = parent.categoria_principal.as_ref().and_then(Relation::expanded);
        }
        chain.reverse();
        chain
    }
}

impl Record for GalleryCategory {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl Translated for GalleryCategory {
    fn variants(&self) -> &[Relation<LocaleVariant>] {
        &self.translations
    }
}

/// A photo in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryPhoto {
    pub id: RecordId,

    #[serde(default)]
    pub ordem: Option<i64>,

    /// Image asset
    #[serde(default)]
    pub foto: Option<String>,

    #[serde(default)]
    pub categoria: Option<Relation<GalleryCategory>>,

    #[serde(default)]
    pub translations: Vec<Relation<LocaleVariant>>,
}

impl GalleryPhoto {
    pub const COLLECTION: &'static str = "Galeria_Fotos";

    pub fn category_id(&self) -> Option<&RecordId> {
        self.categoria.as_ref()?.id()
    }

    /// Caption in the active locale: the variant name, else its summary.
    pub fn caption(&self, locale: Locale) -> Option<String> {
        let variant = find_variant(&self.translations, locale)?;
        non_blank(variant.nome.as_deref())
            .or_else(|| non_blank(variant.breve_descricao.as_deref()))
            .map(str::to_string)
    }

    /// Caption, or the placeholder name.
    pub fn title(&self, locale: Locale) -> String {
        self.caption(locale)
            .unwrap_or_else(|| name_placeholder(locale).to_string())
    }
}

impl Record for GalleryPhoto {
    fn id(&self) -> Option<&RecordId> {
        Some(&self.id)
    }
}

impl Translated for GalleryPhoto {
    fn variants(&self) -> &[Relation<LocaleVariant>] {
        &self.translations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ancestor_chain_runs_root_first() {
        let c: GalleryCategory = serde_json::from_value(json!({
            "id": 30,
            "categoria_principal": {
                "id": 20,
                "categoria_principal": { "id": 10, "categoria_principal": null }
            }
        }))
        .unwrap();
        let ids: Vec<_> = c.ancestors().iter().filter_map(|a| a.id.clone()).collect();
        assert_eq!(ids, vec![RecordId::Int(10), RecordId::Int(20)]);
        assert_eq!(c.parent_id(), Some(&RecordId::Int(20)));
        assert!(!c.is_root());
    }

    #[test]
    fn unexpanded_parent_ends_chain() {
        let c: GalleryCategory =
            serde_json::from_value(json!({ "id": 30, "categoria_principal": 20 })).unwrap();
        assert!(c.ancestors().is_empty());
        assert_eq!(c.parent_id(), Some(&RecordId::Int(20)));
    }

    #[test]
    fn photo_caption_fallbacks() {
        let p: GalleryPhoto = serde_json::from_value(json!({
            "id": 1,
            "foto": "f1",
            "categoria": 5,
            "translations": [{ "languages_code": "pt", "breve_descricao": "Recreio" }]
        }))
        .unwrap();
        assert_eq!(p.caption(Locale::Pt).as_deref(), Some("Recreio"));
        assert_eq!(p.title(Locale::En), "Name unavailable");
        assert_eq!(p.category_id(), Some(&RecordId::Int(5)));
    }
}
