//! Field catalog loading.
//!
//! The catalog describes the columns of the target table and is the source
//! of the `Field` values referenced by filter conditions. It is typically
//! exported from the table service's schema endpoint as JSON.

use crate::field::{Field, FieldType};
use crate::operations;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("schema file not found: {0}")]
    Missing(String),
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse schema file {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// The set of fields available on the target table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldCatalog {
    pub fields: Vec<Field>,
}

impl FieldCatalog {
    /// Load a catalog from a JSON schema file of the form
    /// `{ "fields": [ { "id": "...", "name": "...", "type": "..." }, ... ] }`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(CatalogError::Missing(path_ref.display().to_string()));
        }

        let content = fs::read_to_string(path_ref).map_err(|source| CatalogError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;

        let catalog = serde_json::from_str(&content).map_err(|source| CatalogError::Json {
            path: path_ref.display().to_string(),
            source,
        })?;

        Ok(catalog)
    }

    /// Look up a field by display name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields with at least one registered filter operator.
    pub fn filterable_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|field| operations::is_filterable(field.field_type))
    }

    /// A small built-in catalog used when no schema file is available.
    pub fn sample() -> Self {
        Self {
            fields: vec![
                Field::new("Status", FieldType::SingleLineText),
                Field::new("Class", FieldType::MultipleRecordLinks),
                Field::new("Priority", FieldType::Number),
                Field::new("Contact Email", FieldType::Email),
                Field::new("Stage", FieldType::SingleSelect),
                Field::new("Documents", FieldType::MultipleAttachments),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn loads_a_valid_schema_file() {
        let path = temp_path("filter_formula_schema_valid.json");
        fs::write(
            &path,
            r#"{"fields":[
                {"id":"fld1","name":"Status","type":"singleLineText"},
                {"name":"Docs","type":"multipleAttachments"}
            ]}"#,
        )
        .unwrap();

        let catalog = FieldCatalog::from_json_file(&path).unwrap();
        assert_eq!(catalog.fields.len(), 2);
        assert_eq!(catalog.field("Status").unwrap().id, "fld1");
        assert!(catalog.field("Missing").is_none());

        let filterable: Vec<_> = catalog.filterable_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(filterable, vec!["Status"]);

        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = FieldCatalog::from_json_file("no_such_schema.json");
        assert!(matches!(result, Err(CatalogError::Missing(_))));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let path = temp_path("filter_formula_schema_invalid.json");
        fs::write(&path, "not json").unwrap();

        let result = FieldCatalog::from_json_file(&path);
        assert!(matches!(result, Err(CatalogError::Json { .. })));

        fs::remove_file(path).ok();
    }

    #[test]
    fn unknown_field_type_tags_are_rejected() {
        let path = temp_path("filter_formula_schema_unknown_type.json");
        fs::write(
            &path,
            r#"{"fields":[{"name":"Mystery","type":"holographic"}]}"#,
        )
        .unwrap();

        let result = FieldCatalog::from_json_file(&path);
        assert!(matches!(result, Err(CatalogError::Json { .. })));

        fs::remove_file(path).ok();
    }

    #[test]
    fn sample_catalog_has_filterable_fields() {
        let catalog = FieldCatalog::sample();
        assert!(catalog.filterable_fields().count() > 0);
        assert!(catalog.field("Status").is_some());
    }
}
