//! Locale variant selection.
//!
//! Translated collections embed a list of per-language rows. Resolution picks
//! the row whose language code equals the active locale exactly; a missing row
//! or a blank field yields a fixed placeholder instead of an error.

use crate::locale::Locale;
use crate::models::{Language, Record, RecordId, Relation};
use crate::text::non_blank;
use serde::{Deserialize, Serialize};

/// One language row of a translated record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocaleVariant {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub languages_code: Option<Relation<Language>>,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub breve_descricao: Option<String>,
}

impl Record for LocaleVariant {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl LocaleVariant {
    /// Language code of this row, whichever relation shape was returned.
    pub fn code(&self) -> Option<&str> {
        match self.languages_code.as_ref()? {
            Relation::Id(RecordId::Text(code)) => Some(code),
            Relation::Id(RecordId::Int(_)) => None,
            Relation::Expanded(lang) => Some(&lang.code),
        }
    }
}

/// A record carrying locale variants.
pub trait Translated {
    fn variants(&self) -> &[Relation<LocaleVariant>];

    /// Resolve this record's text for `locale`.
    fn localized(&self, locale: Locale) -> LocalizedText {
        resolve(self.variants(), locale)
    }
}

/// Display text of a record in one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedText {
    pub name: String,
    pub description: String,
    pub summary: Option<String>,
}

/// Placeholder shown when a record has no name in the active locale.
pub fn name_placeholder(locale: Locale) -> &'static str {
    match locale {
        Locale::Pt => "Nome não disponível",
        Locale::En => "Name unavailable",
    }
}

/// Placeholder shown when a record has no description in the active locale.
pub fn description_placeholder(locale: Locale) -> &'static str {
    match locale {
        Locale::Pt => "Descrição não disponível",
        Locale::En => "Description unavailable",
    }
}

/// The variant whose language code matches `locale` exactly.
pub fn find_variant(
    variants: &[Relation<LocaleVariant>],
    locale: Locale,
) -> Option<&LocaleVariant> {
    variants
        .iter()
        .filter_map(Relation::expanded)
        .find(|v| v.code() == Some(locale.code()))
}

/// Resolve display text. Total: never fails, never leaves `name` or `description` empty.
pub fn resolve(variants: &[Relation<LocaleVariant>], locale: Locale) -> LocalizedText {
    let variant = find_variant(variants, locale);
    let field = |pick: fn(&LocaleVariant) -> Option<&String>| {
        variant
            .and_then(|v| non_blank(pick(v).map(String::as_str)))
            .map(str::to_string)
    };

    LocalizedText {
        name: field(|v| v.nome.as_ref()).unwrap_or_else(|| name_placeholder(locale).to_string()),
        description: field(|v| v.descricao.as_ref())
            .unwrap_or_else(|| description_placeholder(locale).to_string()),
        summary: field(|v| v.breve_descricao.as_ref()),
    }
}

/// Name of a related translated record, if it was expanded and has one.
pub fn related_name<T: Translated>(
    relation: Option<&Relation<T>>,
    locale: Locale,
) -> Option<String> {
    let record = relation?.expanded()?;
    let variant = find_variant(record.variants(), locale)?;
    non_blank(variant.nome.as_deref()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn variants(value: serde_json::Value) -> Vec<Relation<LocaleVariant>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn picks_exact_locale() {
        let v = variants(json!([
            { "languages_code": "pt", "nome": "Biblioteca", "descricao": "Sala" },
            { "languages_code": { "code": "en", "name": "English" },
              "nome": "Library", "descricao": "Room" }
        ]));
        let en = resolve(&v, Locale::En);
        assert_eq!(en.name, "Library");
        assert_eq!(en.description, "Room");
        assert_eq!(en.summary, None);

        let pt = resolve(&v, Locale::Pt);
        assert_eq!(pt.name, "Biblioteca");
    }

    #[test]
    fn missing_variant_uses_placeholders() {
        let v = variants(json!([{ "languages_code": "pt", "nome": "Biblioteca" }]));
        let en = resolve(&v, Locale::En);
        assert_eq!(en.name, "Name unavailable");
        assert_eq!(en.description, "Description unavailable");

        let none = resolve(&[], Locale::Pt);
        assert_eq!(none.name, "Nome não disponível");
        assert_eq!(none.description, "Descrição não disponível");
    }

    #[test]
    fn blank_fields_and_bare_ids_are_missing() {
        let v = variants(json!([
            12,
            { "languages_code": "pt", "nome": "  ", "breve_descricao": "Curta" }
        ]));
        let pt = resolve(&v, Locale::Pt);
        assert_eq!(pt.name, "Nome não disponível");
        assert_eq!(pt.summary.as_deref(), Some("Curta"));
    }

    #[test]
    fn unknown_code_shape_never_matches() {
        let v = variants(json!([{ "languages_code": 1, "nome": "X" }]));
        assert!(find_variant(&v, Locale::Pt).is_none());
    }
}
