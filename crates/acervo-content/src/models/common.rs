//! Shapes shared by every collection: identifiers, relations, dates, files.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Primary key of a record. Most collections use integers, some use UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Parse a path segment; numeric segments become [`RecordId::Int`].
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse::<i64>() {
            Ok(n) => RecordId::Int(n),
            Err(_) => RecordId::Text(raw.to_string()),
        })
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RecordId::Int(n) => Some(*n),
            RecordId::Text(s) => s.parse().ok(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<&RecordId> for serde_json::Value {
    fn from(id: &RecordId) -> Self {
        match id {
            RecordId::Int(n) => serde_json::Value::from(*n),
            RecordId::Text(s) => serde_json::Value::from(s.as_str()),
        }
    }
}

/// A record that carries its own primary key.
pub trait Record {
    fn id(&self) -> Option<&RecordId>;
}

/// A relation field: the store returns either the bare key or the nested
/// record, depending on how deep the requested field list reaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Relation<T> {
    Id(RecordId),
    Expanded(Box<T>),
}

impl<T> Relation<T> {
    /// The nested record, if the query expanded it.
    pub fn expanded(&self) -> Option<&T> {
        match self {
            Relation::Id(_) => None,
            Relation::Expanded(inner) => Some(inner),
        }
    }

    pub fn into_expanded(self) -> Option<T> {
        match self {
            Relation::Id(_) => None,
            Relation::Expanded(inner) => Some(*inner),
        }
    }
}

impl<T: Record> Relation<T> {
    /// The related key, whichever shape was returned.
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Relation::Id(id) => Some(id),
            Relation::Expanded(inner) => inner.id(),
        }
    }
}

/// Expanded records of a relation list, skipping bare keys.
pub fn expanded<T>(relations: &[Relation<T>]) -> impl Iterator<Item = &T> {
    relations.iter().filter_map(Relation::expanded)
}

/// A related record of which only the key was requested (`edificio.id`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeyOnly {
    #[serde(default)]
    pub id: Option<RecordId>,
}

impl Record for KeyOnly {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// A row of the languages collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Metadata of a stored file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Record for FileObject {
    fn id(&self) -> Option<&RecordId> {
        None
    }
}

/// Junction row of a many-to-many file field (`fotos_galeria`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileLink {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub directus_files_id: Option<Relation<FileObject>>,
}

impl Record for FileLink {
    fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }
}

/// A file attached to a record, flattened from its junction row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    pub file: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Flatten a file junction list. Rows whose file is missing are dropped.
pub fn attached_files(links: &[Relation<FileLink>]) -> Vec<AttachedFile> {
    expanded(links)
        .filter_map(|link| match link.directus_files_id.as_ref()? {
            Relation::Id(RecordId::Text(id)) => Some(AttachedFile {
                file: id.clone(),
                title: None,
                description: None,
            }),
            Relation::Id(RecordId::Int(_)) => None,
            Relation::Expanded(file) => Some(AttachedFile {
                file: file.id.clone(),
                title: file.title.clone().filter(|t| !t.trim().is_empty()),
                description: file.description.clone().filter(|d| !d.trim().is_empty()),
            }),
        })
        .collect()
}

/// Parse a date or date-time string from the store.
///
/// Accepts `YYYY-MM-DD` and anything starting with it (`2020-01-15T10:00:00`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Serde adapter for optional, possibly malformed date fields.
pub mod lenient_date {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
        Ok(match raw {
            Some(serde_json::Value::String(s)) => parse_date(&s),
            _ => None,
        })
    }

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }
}

/// Serde adapter for integers that some collections store as strings.
pub mod lenient_int {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
        Ok(match raw {
            Some(serde_json::Value::Number(n)) => {
                n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))
            }
            Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Holder {
        rel: Option<Relation<KeyOnly>>,
        #[serde(default, deserialize_with = "lenient_date::deserialize")]
        date: Option<NaiveDate>,
    }

    #[test]
    fn relation_accepts_both_shapes() {
        let bare: Holder = serde_json::from_value(json!({ "rel": 7 })).unwrap();
        assert_eq!(bare.rel.as_ref().and_then(Relation::id), Some(&RecordId::Int(7)));
        assert!(bare.rel.as_ref().and_then(Relation::expanded).is_none());

        let nested: Holder = serde_json::from_value(json!({ "rel": { "id": "x" } })).unwrap();
        assert_eq!(nested.rel.as_ref().and_then(Relation::id), Some(&RecordId::from("x")));

        let null: Holder = serde_json::from_value(json!({ "rel": null })).unwrap();
        assert!(null.rel.is_none());
    }

    #[test]
    fn dates_are_lenient() {
        let h: Holder =
            serde_json::from_value(json!({ "rel": null, "date": "2020-01-15T08:00:00" })).unwrap();
        assert_eq!(h.date, NaiveDate::from_ymd_opt(2020, 1, 15));

        let h: Holder = serde_json::from_value(json!({ "rel": null, "date": "soon" })).unwrap();
        assert_eq!(h.date, None);

        let h: Holder = serde_json::from_value(json!({ "rel": null, "date": 2020 })).unwrap();
        assert_eq!(h.date, None);
    }

    #[test]
    fn record_id_parsing() {
        assert_eq!(RecordId::parse("42"), Some(RecordId::Int(42)));
        assert_eq!(RecordId::parse("abc-1"), Some(RecordId::from("abc-1")));
        assert_eq!(RecordId::parse(" "), None);
        assert_eq!(RecordId::Int(3).to_string(), "3");
    }

    #[test]
    fn flattens_file_links() {
        let links: Vec<Relation<FileLink>> = serde_json::from_value(json!([
            { "id": 1, "directus_files_id": { "id": "f1", "title": "Front", "description": "" } },
            { "id": 2, "directus_files_id": "f2" },
            { "id": 3, "directus_files_id": null },
            4
        ]))
        .unwrap();
        let files = attached_files(&links);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].title.as_deref(), Some("Front"));
        assert_eq!(files[0].description, None);
        assert_eq!(files[1].file, "f2");
    }
}
