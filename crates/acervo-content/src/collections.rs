//! Typed reads of every collection the site shows.

use crate::client::ContentClient;
use crate::error::Result;
use crate::locale::Locale;
use crate::models::{
    Building, Course, Document, DocumentCategory, GalleryCategory, GalleryPhoto, Group, LectiveYear,
    Material, MaterialCategory, MaterialKind, MaterialLink, Publication, RecordId, Service,
    StaffMember,
};
use crate::query::{Filter, Query};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

const TRANSLATIONS: &[&str] = &["translations"];

/// Fields of records with translated text and an author list.
const AUTHORED: &[&str] = &["*", "translations.*", "autores.Autores_id.*"];

/// Glossary collection mapping Portuguese terms to other languages.
const TERMS_COLLECTION: &str = "Traducoes";

#[derive(Debug, Deserialize)]
struct TermRow {
    nome: Option<String>,
    traducao: Option<String>,
}

fn translated(fields: &[&str], locale: Locale, paths: &[&str]) -> Query {
    Query::new().fields(fields.iter().copied()).translated(locale, paths)
}

impl ContentClient {
    // --- Buildings and courses ---

    pub async fn buildings(&self, locale: Locale) -> Result<Vec<Building>> {
        let query = translated(&["*", "translations.*"], locale, TRANSLATIONS).sort("data_inicio");
        self.read_items(Building::COLLECTION, &query).await
    }

    pub async fn building(&self, id: &RecordId, locale: Locale) -> Result<Building> {
        let query = translated(
            &["*", "translations.*", "fotos_galeria.directus_files_id.*"],
            locale,
            TRANSLATIONS,
        );
        self.read_item(Building::COLLECTION, id, &query).await
    }

    /// Courses, optionally only those taught in one building.
    pub async fn courses(
        &self,
        building: Option<&RecordId>,
        locale: Locale,
    ) -> Result<Vec<Course>> {
        let query = translated(
            &["*", "translations.*", "edificio.id", "anos_lectivos.Anos_Lectivos_id.*"],
            locale,
            TRANSLATIONS,
        )
        .maybe_filter(building.map(|b| Filter::eq("edificio", b)));
        self.read_items(Course::COLLECTION, &query).await
    }

    /// First and last year of all lective years on record.
    pub async fn lective_year_bounds(&self) -> Result<Option<(i64, i64)>> {
        let query = Query::new().fields(["ano_inicio", "ano_fim"]).sort("ano_inicio").limit(-1);
        let years: Vec<LectiveYear> = self.read_items(LectiveYear::COLLECTION, &query).await?;
        let lo = years.iter().filter_map(|y| y.ano_inicio).min();
        let hi = years.iter().filter_map(|y| y.ano_fim.or(y.ano_inicio)).max();
        Ok(lo.zip(hi))
    }

    // --- Glossary ---

    /// Translations of glossary terms into `locale`.
    ///
    /// Empty for the default locale. Failures are logged and yield an empty map
    /// so callers fall back to the stored term.
    pub async fn term_translations(
        &self,
        terms: &[String],
        locale: Locale,
    ) -> HashMap<String, String> {
        let unique: BTreeSet<&str> =
            terms.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).collect();
        if locale.is_default() || unique.is_empty() {
            return HashMap::new();
        }
        let filter = Filter::And(vec![
            Filter::is_in("nome", unique.iter().copied()),
            Filter::eq("codigo_lingua", locale.code()),
        ]);
        let query = Query::new().fields(["nome", "traducao"]).filter(filter);
        match self.read_items::<TermRow>(TERMS_COLLECTION, &query).await {
            Ok(rows) => rows
                .into_iter()
                .filter_map(|r| Some((r.nome?, r.traducao.filter(|t| !t.trim().is_empty())?)))
                .collect(),
            Err(e) => {
                warn!(locale = %locale, error = %e, "term translations unavailable");
                HashMap::new()
            }
        }
    }

    // --- Publications, services, groups ---

    pub async fn publications(&self, locale: Locale) -> Result<Vec<Publication>> {
        let query = translated(AUTHORED, locale, TRANSLATIONS).sort("-ano_publicacao");
        let mut items: Vec<Publication> = self.read_items(Publication::COLLECTION, &query).await?;
        let types: Vec<String> = items.iter().filter_map(|p| p.tipo_publicacao.clone()).collect();
        let labels = self.term_translations(&types, locale).await;
        for item in &mut items {
            item.type_label = item.tipo_publicacao.as_ref().and_then(|t| labels.get(t)).cloned();
        }
        Ok(items)
    }

    pub async fn publication(&self, id: &RecordId, locale: Locale) -> Result<Publication> {
        let query = translated(AUTHORED, locale, TRANSLATIONS);
        let mut item: Publication = self.read_item(Publication::COLLECTION, id, &query).await?;
        if let Some(tipo) = item.tipo_publicacao.clone() {
            item.type_label = self.term_translations(&[tipo.clone()], locale).await.remove(&tipo);
        }
        Ok(item)
    }

    pub async fn services(&self, locale: Locale) -> Result<Vec<Service>> {
        let query = translated(&["*", "translations.*"], locale, TRANSLATIONS).sort("-data_inicio");
        self.read_items(Service::COLLECTION, &query).await
    }

    pub async fn service(&self, id: &RecordId, locale: Locale) -> Result<Service> {
        let query = translated(
            &["*", "translations.*", "fotos_galeria.directus_files_id.*"],
            locale,
            TRANSLATIONS,
        );
        self.read_item(Service::COLLECTION, id, &query).await
    }

    pub async fn groups(&self, locale: Locale) -> Result<Vec<Group>> {
        let query = translated(&["*", "translations.*"], locale, TRANSLATIONS);
        let mut items: Vec<Group> = self.read_items(Group::COLLECTION, &query).await?;
        let types: Vec<String> = items.iter().filter_map(|g| g.tipo_grupo.clone()).collect();
        let labels = self.term_translations(&types, locale).await;
        for item in &mut items {
            item.type_label = item.tipo_grupo.as_ref().and_then(|t| labels.get(t)).cloned();
        }
        Ok(items)
    }

    pub async fn group(&self, id: &RecordId, locale: Locale) -> Result<Group> {
        let query = translated(
            &["*", "translations.*", "fotos_galeria.directus_files_id.*"],
            locale,
            TRANSLATIONS,
        );
        let mut item: Group = self.read_item(Group::COLLECTION, id, &query).await?;
        if let Some(tipo) = item.tipo_grupo.clone() {
            item.type_label = self.term_translations(&[tipo.clone()], locale).await.remove(&tipo);
        }
        Ok(item)
    }

    // --- Gallery ---

    pub async fn gallery_root_categories(&self, locale: Locale) -> Result<Vec<GalleryCategory>> {
        let query = translated(&["*", "translations.*"], locale, TRANSLATIONS)
            .filter(Filter::is_null("categoria_principal"))
            .sort("ordem");
        self.read_items(GalleryCategory::COLLECTION, &query).await
    }

    /// Subcategories of `parent`, or every non-root category.
    pub async fn gallery_subcategories(
        &self,
        parent: Option<&RecordId>,
        locale: Locale,
    ) -> Result<Vec<GalleryCategory>> {
        let filter = match parent {
            Some(id) => Filter::eq("categoria_principal", id),
            None => Filter::not_null("categoria_principal"),
        };
        let query = translated(&["*", "translations.*"], locale, TRANSLATIONS)
            .filter(filter)
            .sort("ordem");
        self.read_items(GalleryCategory::COLLECTION, &query).await
    }

    /// A category with its ancestors expanded up to two levels.
    pub async fn gallery_category(&self, id: &RecordId, locale: Locale) -> Result<GalleryCategory> {
        let query = translated(
            &[
                "*",
                "translations.*",
                "categoria_principal.id",
                "categoria_principal.translations.*",
                "categoria_principal.categoria_principal.id",
                "categoria_principal.categoria_principal.translations.*",
                "categoria_principal.categoria_principal.categoria_principal",
            ],
            locale,
            &[
                "translations",
                "categoria_principal.translations",
                "categoria_principal.categoria_principal.translations",
            ],
        );
        self.read_item(GalleryCategory::COLLECTION, id, &query).await
    }

    /// Photos in any of `categories`, in display order.
    pub async fn gallery_photos(
        &self,
        categories: &[RecordId],
        locale: Locale,
    ) -> Result<Vec<GalleryPhoto>> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }
        let query = translated(&["*", "translations.*", "categoria.id"], locale, TRANSLATIONS)
            .filter(Filter::is_in("categoria", categories))
            .sort("ordem")
            .limit(-1);
        self.read_items(GalleryPhoto::COLLECTION, &query).await
    }

    pub async fn gallery_photo(&self, id: &RecordId, locale: Locale) -> Result<GalleryPhoto> {
        let query = translated(
            &[
                "*",
                "translations.*",
                "categoria.id",
                "categoria.translations.*",
                "categoria.categoria_principal.id",
                "categoria.categoria_principal.translations.*",
            ],
            locale,
            &[
                "translations",
                "categoria.translations",
                "categoria.categoria_principal.translations",
            ],
        );
        self.read_item(GalleryPhoto::COLLECTION, id, &query).await
    }

    // --- Documents ---

    pub async fn document_categories(&self, locale: Locale) -> Result<Vec<DocumentCategory>> {
        let query = translated(&["*", "translations.*"], locale, TRANSLATIONS).sort("ordem");
        self.read_items(DocumentCategory::COLLECTION, &query).await
    }

    pub async fn document_category(
        &self,
        id: &RecordId,
        locale: Locale,
    ) -> Result<DocumentCategory> {
        let query = translated(&["*", "translations.*"], locale, TRANSLATIONS);
        self.read_item(DocumentCategory::COLLECTION, id, &query).await
    }

    pub async fn documents(&self, category: &RecordId, locale: Locale) -> Result<Vec<Document>> {
        let query = translated(AUTHORED, locale, TRANSLATIONS)
            .filter(Filter::eq("categoria", category))
            .sort("-data");
        self.read_items(Document::COLLECTION, &query).await
    }

    pub async fn document(&self, id: &RecordId, locale: Locale) -> Result<Document> {
        let query = translated(
            &[
                "*",
                "translations.*",
                "autores.Autores_id.*",
                "categoria.id",
                "categoria.translations.*",
            ],
            locale,
            &["translations", "categoria.translations"],
        );
        self.read_item(Document::COLLECTION, id, &query).await
    }

    // --- Materials ---

    pub async fn material_categories(&self, locale: Locale) -> Result<Vec<MaterialCategory>> {
        let query = translated(&["*", "translations.*"], locale, TRANSLATIONS);
        self.read_items(MaterialCategory::COLLECTION, &query).await
    }

    pub async fn material_category(
        &self,
        id: &RecordId,
        locale: Locale,
    ) -> Result<MaterialCategory> {
        let query = translated(&["*", "translations.*"], locale, TRANSLATIONS);
        self.read_item(MaterialCategory::COLLECTION, id, &query).await
    }

    /// Category/building pairs for items of `kind`.
    pub async fn material_links(&self, kind: MaterialKind) -> Result<Vec<MaterialLink>> {
        let query = Query::new()
            .fields(["id", "tipo", "categoria.id", "edificio.id"])
            .filter(Filter::eq("tipo", kind.as_str()))
            .limit(-1);
        let rows: Vec<Material> = self.read_items(Material::COLLECTION, &query).await?;
        Ok(MaterialLink::from_materials(&rows))
    }

    pub async fn materials(
        &self,
        category: &RecordId,
        kind: MaterialKind,
        locale: Locale,
    ) -> Result<Vec<Material>> {
        let fields = ["id", "tipo", "capa", "translations.*", "edificio.id"];
        let query = translated(&fields, locale, TRANSLATIONS)
            .filter(Filter::And(vec![
                Filter::eq("categoria", category),
                Filter::eq("tipo", kind.as_str()),
            ]))
            .limit(-1);
        self.read_items(Material::COLLECTION, &query).await
    }

    pub async fn material(&self, id: &RecordId, locale: Locale) -> Result<Material> {
        let query = translated(
            &["*", "translations.*", "categoria.id", "categoria.translations.*"],
            locale,
            &["translations", "categoria.translations"],
        );
        self.read_item(Material::COLLECTION, id, &query).await
    }

    // --- Staff ---

    /// A member with the full career expanded.
    pub async fn staff_member(&self, id: &RecordId, locale: Locale) -> Result<StaffMember> {
        let query = translated(
            &[
                "*",
                "anos_lectivos.id",
                "anos_lectivos.Anos_Lectivos_id.*",
                "anos_lectivos.funcao.id",
                "anos_lectivos.funcao.translations.*",
                "anos_lectivos.categoria.id",
                "anos_lectivos.categoria.translations.*",
                "anos_lectivos.grupo.id",
                "anos_lectivos.grupo.translations.*",
                "anos_lectivos.curso.id",
                "anos_lectivos.curso.translations.*",
                "anos_lectivos.disciplinas.Disciplinas_id.id",
                "anos_lectivos.disciplinas.Disciplinas_id.translations.*",
            ],
            locale,
            &[
                "anos_lectivos.funcao.translations",
                "anos_lectivos.categoria.translations",
                "anos_lectivos.grupo.translations",
                "anos_lectivos.curso.translations",
                "anos_lectivos.disciplinas.Disciplinas_id.translations",
            ],
        );
        self.read_item(StaffMember::COLLECTION, id, &query).await
    }
}
