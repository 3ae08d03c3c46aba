//! Courses and lective years.

use super::common::{expanded, lenient_int, KeyOnly, Record, RecordId, Relation};
use crate::translation::{LocaleVariant, Translated};
use serde::{Deserialize, Serialize};

/// A school year (`ano_inicio`/`ano_fim`, e.g. 1990/1991).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LectiveYear {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_int::deserialize")]
    pub ano_inicio: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int::deserialize")]
    pub ano_fim: Option<i64>,
}

impl LectiveYear {
    pub const COLLECTION: &'static str = "Anos_Lectivos";

    /// The year span, when both ends are known.
    pub fn span(&self) -> Option<(i64, i64)> {
        Some((self.ano_inicio?, self.ano_fim?))
    }
}

impl Record for LectiveYear {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// Junction row between a course and a lective year.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LectiveYearLink {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, rename = "Anos_Lectivos_id")]
    pub lective_year: Option<Relation<LectiveYear>>,
}

impl Record for LectiveYearLink {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// A course taught at the school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: RecordId,

    #[serde(default)]
    pub nome: Option<String>,

    /// Building the course was taught in
    #[serde(default)]
    pub edificio: Option<Relation<KeyOnly>>,

    #[serde(default)]
    pub anos_lectivos: Vec<Relation<LectiveYearLink>>,

    #[serde(default)]
    pub translations: Vec<Relation<LocaleVariant>>,
}

impl Course {
    pub const COLLECTION: &'static str = "Cursos";

    /// Known year spans, ordered by start year.
    pub fn year_spans(&self) -> Vec<(i64, i64)> {
        let mut spans: Vec<(i64, i64)> = expanded(&self.anos_lectivos)
            .filter_map(|link| link.lective_year.as_ref()?.expanded()?.span())
            .collect();
        spans.sort_unstable();
        spans
    }

    pub fn building_id(&self) -> Option<&RecordId> {
        self.edificio.as_ref()?.id()
    }
}

impl Record for Course {
    fn id(&self) -> Option<&RecordId> {
        Some(&self.id)
    }
}

impl Translated for Course {
    fn variants(&self) -> &[Relation<LocaleVariant>] {
        &self.translations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalises_lective_years() {
        let c: Course = serde_json::from_value(json!({
            "id": 3,
            "edificio": { "id": 1 },
            "anos_lectivos": [
                { "Anos_Lectivos_id": { "ano_inicio": 1995, "ano_fim": 1996 } },
                { "Anos_Lectivos_id": { "ano_inicio": 1990, "ano_fim": 1991 } },
                { "Anos_Lectivos_id": 17 },
                { "Anos_Lectivos_id": { "ano_inicio": 2001 } }
            ]
        }))
        .unwrap();

        assert_eq!(c.year_spans(), vec![(1990, 1991), (1995, 1996)]);
        assert_eq!(c.building_id(), Some(&RecordId::Int(1)));
    }

    #[test]
    fn building_may_be_bare_key() {
        let c: Course = serde_json::from_value(json!({ "id": 1, "edificio": 4 })).unwrap();
        assert_eq!(c.building_id(), Some(&RecordId::Int(4)));
    }
}
