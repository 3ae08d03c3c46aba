//! Publications and their authors.

use super::common::{expanded, lenient_date, lenient_int, Record, RecordId, Relation};
use crate::translation::{LocaleVariant, Translated};
use crate::text::non_blank;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A row of the authors collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub nome: Option<String>,
}

impl Record for Author {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// Junction row between a record and an author.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthorLink {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, rename = "Autores_id")]
    pub author: Option<Relation<Author>>,
}

impl Record for AuthorLink {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// Author names of a junction list, skipping unexpanded or unnamed rows.
pub fn author_names(links: &[Relation<AuthorLink>]) -> Vec<String> {
    expanded(links)
        .filter_map(|link| link.author.as_ref()?.expanded())
        .filter_map(|a| non_blank(a.nome.as_deref()).map(str::to_string))
        .collect()
}

/// A school publication (magazine, newspaper, yearbook...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: RecordId,

    #[serde(default)]
    pub nome: Option<String>,

    /// Publication type, stored in Portuguese
    #[serde(default)]
    pub tipo_publicacao: Option<String>,

    #[serde(default, deserialize_with = "lenient_int::deserialize")]
    pub ano_publicacao: Option<i64>,

    #[serde(default, with = "lenient_date")]
    pub data_publicacao: Option<NaiveDate>,

    #[serde(default)]
    pub edicao: Option<String>,

    #[serde(default, deserialize_with = "lenient_int::deserialize")]
    pub paginas: Option<i64>,

    #[serde(default)]
    pub capa: Option<String>,

    /// Rich text body
    #[serde(default)]
    pub conteudo: Option<String>,

    #[serde(default)]
    pub autores: Vec<Relation<AuthorLink>>,

    #[serde(default)]
    pub translations: Vec<Relation<LocaleVariant>>,

    /// Type label in the active locale, filled in after fetching
    #[serde(skip)]
    pub type_label: Option<String>,
}

impl Publication {
    pub const COLLECTION: &'static str = "Publicacoes";

    /// Publication year, from the explicit field or the date.
    pub fn year(&self) -> Option<i64> {
        self.ano_publicacao
            .or_else(|| self.data_publicacao.map(|d| i64::from(d.year())))
    }

    pub fn authors(&self) -> Vec<String> {
        author_names(&self.autores)
    }

    /// Localised type label, falling back to the stored type.
    pub fn type_name(&self) -> Option<&str> {
        self.type_label.as_deref().or(self.tipo_publicacao.as_deref())
    }
}

impl Record for Publication {
    fn id(&self) -> Option<&RecordId> {
        Some(&self.id)
    }
}

impl Translated for Publication {
    fn variants(&self) -> &[Relation<LocaleVariant>] {
        &self.translations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn year_falls_back_to_date() {
        let p: Publication = serde_json::from_value(json!({
            "id": 1,
            "data_publicacao": "2024-06-15",
            "autores": [
                { "Autores_id": { "id": 1, "nome": "Comissão Editorial" } },
                { "Autores_id": 9 },
                { "Autores_id": { "id": 2, "nome": "" } }
            ]
        }))
        .unwrap();
        assert_eq!(p.year(), Some(2024));
        assert_eq!(p.authors(), vec!["Comissão Editorial".to_string()]);
    }

    #[test]
    fn type_label_overrides_stored_type() {
        let mut p: Publication = serde_json::from_value(json!({
            "id": 1,
            "tipo_publicacao": "Revista",
            "ano_publicacao": 1999
        }))
        .unwrap();
        assert_eq!(p.type_name(), Some("Revista"));
        p.type_label = Some("Magazine".into());
        assert_eq!(p.type_name(), Some("Magazine"));
        assert_eq!(p.year(), Some(1999));
    }
}
