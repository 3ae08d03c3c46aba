//! Teaching materials and student works.

use super::common::{KeyOnly, Record, RecordId, Relation};
use crate::translation::{LocaleVariant, Translated};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two kinds of item the materials collection holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaterialKind {
    #[default]
    Material,
    Trabalho,
}

impl MaterialKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            MaterialKind::Material => "Material",
            MaterialKind::Trabalho => "Trabalho",
        }
    }

    /// Case-insensitive; accepts the stored values and their lower-case URL form.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "material" => Some(MaterialKind::Material),
            "trabalho" => Some(MaterialKind::Trabalho),
            _ => None,
        }
    }

    /// Lower-case form used in URLs.
    pub fn param(self) -> &'static str {
        match self {
            MaterialKind::Material => "material",
            MaterialKind::Trabalho => "trabalho",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCategory {
    #[serde(default)]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub imagem: Option<String>,

    #[serde(default)]
    pub translations: Vec<Relation<LocaleVariant>>,
}

impl MaterialCategory {
    pub const COLLECTION: &'static str = "Materiais_e_trabalhos_Categorias";
}

impl Record for MaterialCategory {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

impl Translated for MaterialCategory {
    fn variants(&self) -> &[Relation<LocaleVariant>] {
        &self.translations
    }
}

/// A material or student work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: RecordId,

    /// Kind as stored; unknown values are kept verbatim
    #[serde(default)]
    pub tipo: Option<String>,

    #[serde(default)]
    pub capa: Option<String>,

    #[serde(default)]
    pub categoria: Option<Relation<MaterialCategory>>,

    #[serde(default)]
    pub edificio: Option<Relation<KeyOnly>>,

    #[serde(default)]
    pub translations: Vec<Relation<LocaleVariant>>,
}

impl Material {
    pub const COLLECTION: &'static str = "Materiais_e_trabalhos";

    pub fn kind(&self) -> Option<MaterialKind> {
        MaterialKind::parse(self.tipo.as_deref()?)
    }

    pub fn category_id(&self) -> Option<&RecordId> {
        self.categoria.as_ref()?.id()
    }

    pub fn building_id(&self) -> Option<&RecordId> {
        self.edificio.as_ref()?.id()
    }
}

impl Record for Material {
    fn id(&self) -> Option<&RecordId> {
        Some(&self.id)
    }
}

impl Translated for Material {
    fn variants(&self) -> &[Relation<LocaleVariant>] {
        &self.translations
    }
}

/// Which buildings a material category has items in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialLink {
    pub category: RecordId,
    pub building: RecordId,
}

impl MaterialLink {
    /// Category/building pairs of a set of materials; rows missing either side are dropped.
    pub fn from_materials(materials: &[Material]) -> Vec<MaterialLink> {
        materials
            .iter()
            .filter_map(|m| {
                Some(MaterialLink {
                    category: m.category_id()?.clone(),
                    building: m.building_id()?.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_kind_is_kept() {
        let m: Material = serde_json::from_value(json!({ "id": 1, "tipo": "Maqueta" })).unwrap();
        assert_eq!(m.kind(), None);
        assert_eq!(m.tipo.as_deref(), Some("Maqueta"));
    }

    #[test]
    fn links_need_both_sides() {
        let rows: Vec<Material> = serde_json::from_value(json!([
            { "id": 1, "tipo": "Material", "categoria": { "id": 3 }, "edificio": { "id": 1 } },
            { "id": 2, "tipo": "Material", "categoria": 3, "edificio": null },
            { "id": 3, "tipo": "Material", "categoria": 4, "edificio": 2 }
        ]))
        .unwrap();
        let links = MaterialLink::from_materials(&rows);
        assert_eq!(links.len(), 2);
        let expected = MaterialLink { category: RecordId::Int(4), building: RecordId::Int(2) };
        assert_eq!(links[1], expected);
        assert_eq!(rows[0].kind(), Some(MaterialKind::Material));
    }

    #[test]
    fn kind_from_url() {
        assert_eq!(MaterialKind::parse("trabalho"), Some(MaterialKind::Trabalho));
        assert_eq!(MaterialKind::parse(" Material "), Some(MaterialKind::Material));
        assert_eq!(MaterialKind::parse("obra"), None);
        assert_eq!(MaterialKind::Trabalho.param(), "trabalho");
    }
}
