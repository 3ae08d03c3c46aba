//! Staff members and their careers.

use super::common::{expanded, lenient_int, Record, RecordId, Relation};
use super::course::LectiveYear;
use crate::locale::Locale;
use crate::translation::{related_name, LocaleVariant, Translated};
use serde::{Deserialize, Serialize};

/// A translated lookup row (role, category, group, course, discipline).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Term {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub translations: Vec<Relation<LocaleVariant>>,
}

impl Record for Term {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl Translated for Term {
    fn variants(&self) -> &[Relation<LocaleVariant>] {
        &self.translations
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisciplineLink {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, rename = "Disciplinas_id")]
    pub discipline: Option<Relation<Term>>,
}

impl Record for DisciplineLink {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// What a member did in one lective year.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaffYear {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, rename = "Anos_Lectivos_id")]
    pub lective_year: Option<Relation<LectiveYear>>,
    #[serde(default)]
    pub funcao: Option<Relation<Term>>,
    #[serde(default)]
    pub categoria: Option<Relation<Term>>,
    #[serde(default)]
    pub grupo: Option<Relation<Term>>,
    #[serde(default)]
    pub curso: Option<Relation<Term>>,
    #[serde(default)]
    pub disciplinas: Vec<Relation<DisciplineLink>>,
}

impl Record for StaffYear {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// A member of staff (teacher or not).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: RecordId,

    #[serde(default)]
    pub nome: Option<String>,

    #[serde(default, deserialize_with = "lenient_int::deserialize")]
    pub numero_processo: Option<i64>,

    #[serde(default)]
    pub docente: Option<bool>,

    /// Portrait asset
    #[serde(default)]
    pub foto: Option<String>,

    #[serde(default)]
    pub anos_lectivos: Vec<Relation<StaffYear>>,
}

/// One resolved row of a member's career.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerYear {
    pub id: Option<RecordId>,
    pub start: i64,
    pub end: i64,
    pub role: Option<String>,
    pub category: Option<String>,
    pub group: Option<String>,
    pub course: Option<String>,
    pub disciplines: Vec<String>,
}

impl StaffMember {
    pub const COLLECTION: &'static str = "Pessoal";

    pub fn is_teacher(&self) -> bool {
        self.docente.unwrap_or(false)
    }

    pub fn lective_year_count(&self) -> usize {
        self.anos_lectivos.len()
    }

    /// Disciplines taught across all years; zero for non-teaching staff.
    pub fn discipline_count(&self) -> usize {
        if !self.is_teacher() {
            return 0;
        }
        expanded(&self.anos_lectivos).map(|y| y.disciplinas.len()).sum()
    }

    /// Career rows with both year bounds known, oldest first.
    pub fn career(&self, locale: Locale) -> Vec<CareerYear> {
        let mut years: Vec<CareerYear> = expanded(&self.anos_lectivos)
            .filter_map(|row| {
                let (start, end) = row.lective_year.as_ref()?.expanded()?.span()?;
                Some(CareerYear {
                    id: row.id.clone(),
                    start,
                    end,
                    role: related_name(row.funcao.as_ref(), locale),
                    category: related_name(row.categoria.as_ref(), locale),
                    group: related_name(row.grupo.as_ref(), locale),
                    course: related_name(row.curso.as_ref(), locale),
                    disciplines: expanded(&row.disciplinas)
                        .filter_map(|d| related_name(d.discipline.as_ref(), locale))
                        .collect(),
                })
            })
            .collect();
        years.sort_by_key(|y| y.start);
        years
    }
}

impl Record for StaffMember {
    fn id(&self) -> Option<&RecordId> {
        Some(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member() -> StaffMember {
        serde_json::from_value(json!({
            "id": 7,
            "nome": "Ana Conceição",
            "numero_processo": "1234",
            "docente": true,
            "anos_lectivos": [
                {
                    "id": 2,
                    "Anos_Lectivos_id": { "ano_inicio": 1995, "ano_fim": 1996 },
                    "funcao": {
                        "translations": [{ "languages_code": "pt", "nome": "Professora" }]
                    },
                    "disciplinas": [
                        { "Disciplinas_id": {
                            "translations": [{ "languages_code": "pt", "nome": "Física" }]
                        } },
                        { "Disciplinas_id": 3 }
                    ]
                },
                {
                    "id": 1,
                    "Anos_Lectivos_id": { "ano_inicio": 1990, "ano_fim": 1991 },
                    "disciplinas": [{ "Disciplinas_id": 4 }]
                },
                { "id": 3, "Anos_Lectivos_id": 99 }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn career_is_sorted_and_resolved() {
        let m = member();
        let career = m.career(Locale::Pt);
        assert_eq!(career.len(), 2);
        assert_eq!((career[0].start, career[0].end), (1990, 1991));
        assert_eq!(career[1].role.as_deref(), Some("Professora"));
        assert_eq!(career[1].disciplines, vec!["Física".to_string()]);
        assert_eq!(career[1].course, None);
    }

    #[test]
    fn counts() {
        let mut m = member();
        assert_eq!(m.numero_processo, Some(1234));
        assert_eq!(m.lective_year_count(), 3);
        assert_eq!(m.discipline_count(), 3);
        m.docente = Some(false);
        assert_eq!(m.discipline_count(), 0);
    }
}
