//! Services offered by the school, and its student groups.

use super::common::{
    attached_files, lenient_date, AttachedFile, FileLink, Record, RecordId, Relation,
};
use crate::translation::{LocaleVariant, Translated};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A service (canteen, library, psychology office...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: RecordId,

    #[serde(default, with = "lenient_date")]
    pub data_inicio: Option<NaiveDate>,

    /// Absent while the service is still running
    #[serde(default, with = "lenient_date")]
    pub data_fim: Option<NaiveDate>,

    #[serde(default)]
    pub foto_capa: Option<String>,

    #[serde(default)]
    pub fotos_galeria: Vec<Relation<FileLink>>,

    #[serde(default)]
    pub translations: Vec<Relation<LocaleVariant>>,
}

impl Service {
    pub const COLLECTION: &'static str = "Servicos";

    pub fn is_active(&self) -> bool {
        self.data_fim.is_none()
    }

    pub fn gallery(&self) -> Vec<AttachedFile> {
        attached_files(&self.fotos_galeria)
    }
}

impl Record for Service {
    fn id(&self) -> Option<&RecordId> {
        Some(&self.id)
    }
}

impl Translated for Service {
    fn variants(&self) -> &[Relation<LocaleVariant>] {
        &self.translations
    }
}

/// A club, association or other group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: RecordId,

    /// Group type, stored in Portuguese
    #[serde(default)]
    pub tipo_grupo: Option<String>,

    #[serde(default)]
    pub foto_capa: Option<String>,

    #[serde(default)]
    pub fotos_galeria: Vec<Relation<FileLink>>,

    #[serde(default)]
    pub translations: Vec<Relation<LocaleVariant>>,

    /// Type label in the active locale, filled in after fetching
    #[serde(skip)]
    pub type_label: Option<String>,
}

impl Group {
    pub const COLLECTION: &'static str = "Grupos";

    pub fn gallery(&self) -> Vec<AttachedFile> {
        attached_files(&self.fotos_galeria)
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_label.as_deref().or(self.tipo_grupo.as_deref())
    }
}

impl Record for Group {
    fn id(&self) -> Option<&RecordId> {
        Some(&self.id)
    }
}

impl Translated for Group {
    fn variants(&self) -> &[Relation<LocaleVariant>] {
        &self.translations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn active_means_no_end_date() {
        let s: Service =
            serde_json::from_value(json!({ "id": 1, "data_inicio": "2001-09-01" })).unwrap();
        assert!(s.is_active());
        let s: Service = serde_json::from_value(json!({
            "id": 2,
            "data_inicio": "2001-09-01",
            "data_fim": "2010-06-30"
        }))
        .unwrap();
        assert!(!s.is_active());
    }

    #[test]
    fn group_type_name() {
        let g: Group = serde_json::from_value(json!({ "id": 1, "tipo_grupo": "Clube" })).unwrap();
        assert_eq!(g.type_name(), Some("Clube"));
    }
}
