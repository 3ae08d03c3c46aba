//! Archive documents grouped in categories.

use super::common::{lenient_date, Record, RecordId, Relation};
use super::publication::{author_names, AuthorLink};
use crate::translation::{LocaleVariant, Translated};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentCategory {
    #[serde(default)]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub ordem: Option<i64>,

    #[serde(default)]
    pub imagem: Option<String>,

    #[serde(default)]
    pub translations: Vec<Relation<LocaleVariant>>,
}

impl DocumentCategory {
    pub const COLLECTION: &'static str = "Documentos_Categorias";
}

impl Record for DocumentCategory {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl Translated for DocumentCategory {
    fn variants(&self) -> &[Relation<LocaleVariant>] {
        &self.translations
    }
}

/// A digitised document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: RecordId,

    #[serde(default, with = "lenient_date")]
    pub data: Option<NaiveDate>,

    /// Cover image asset
    #[serde(default)]
    pub capa: Option<String>,

    /// The document file itself
    #[serde(default)]
    pub ficheiro: Option<String>,

    #[serde(default)]
    pub categoria: Option<Relation<DocumentCategory>>,

    #[serde(default)]
    pub autores: Vec<Relation<AuthorLink>>,

    #[serde(default)]
    pub translations: Vec<Relation<LocaleVariant>>,
}

impl Document {
    pub const COLLECTION: &'static str = "Documentos";

    pub fn authors(&self) -> Vec<String> {
        author_names(&self.autores)
    }

    pub fn category_id(&self) -> Option<&RecordId> {
        self.categoria.as_ref()?.id()
    }
}

impl Record for Document {
    fn id(&self) -> Option<&RecordId> {
        Some(&self.id)
    }
}

impl Translated for Document {
    fn variants(&self) -> &[Relation<LocaleVariant>] {
        &self.translations
    }
}
