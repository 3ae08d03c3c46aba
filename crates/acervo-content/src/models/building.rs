//! Buildings of the school.

use super::common::{
    attached_files, lenient_date, lenient_int, AttachedFile, FileLink, Record, RecordId, Relation,
};
use crate::translation::{LocaleVariant, Translated};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A building the school has occupied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: RecordId,

    /// Untranslated name
    #[serde(default)]
    pub nome: Option<String>,

    #[serde(default)]
    pub localizacao: Option<String>,

    #[serde(default, deserialize_with = "lenient_int::deserialize")]
    pub ano_construcao: Option<i64>,

    /// First day the school used the building
    #[serde(default, with = "lenient_date")]
    pub data_inicio: Option<NaiveDate>,

    /// Last day of use; absent while still in use
    #[serde(default, with = "lenient_date")]
    pub data_fim: Option<NaiveDate>,

    /// Cover image asset
    #[serde(default)]
    pub imagem: Option<String>,

    #[serde(default)]
    pub translations: Vec<Relation<LocaleVariant>>,

    #[serde(default)]
    pub fotos_galeria: Vec<Relation<FileLink>>,
}

impl Building {
    pub const COLLECTION: &'static str = "Edificios";

    /// Gallery photos, flattened from the junction rows.
    pub fn gallery(&self) -> Vec<AttachedFile> {
        attached_files(&self.fotos_galeria)
    }
}

impl Record for Building {
    fn id(&self) -> Option<&RecordId> {
        Some(&self.id)
    }
}

impl Translated for Building {
    fn variants(&self) -> &[Relation<LocaleVariant>] {
        &self.translations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use serde_json::json;

    #[test]
    fn decodes_store_row() {
        let b: Building = serde_json::from_value(json!({
            "id": 1,
            "nome": "Edifício Principal",
            "ano_construcao": "1952",
            "data_inicio": "1952-10-01",
            "data_fim": null,
            "imagem": "abc",
            "translations": [{ "languages_code": "en", "nome": "Main Building" }],
            "fotos_galeria": [{ "directus_files_id": { "id": "f1", "title": "Facade" } }]
        }))
        .unwrap();

        assert_eq!(b.ano_construcao, Some(1952));
        assert_eq!(b.data_inicio, NaiveDate::from_ymd_opt(1952, 10, 1));
        assert_eq!(b.data_fim, None);
        assert_eq!(b.localized(Locale::En).name, "Main Building");
        assert_eq!(b.gallery()[0].title.as_deref(), Some("Facade"));
    }

    #[test]
    fn minimal_row() {
        let b: Building = serde_json::from_value(json!({ "id": 2 })).unwrap();
        assert!(b.translations.is_empty());
        assert!(b.gallery().is_empty());
    }
}
