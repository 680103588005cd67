//! Field descriptors for the target table schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed vocabulary of column kinds the target table service exposes.
///
/// Only a subset of kinds supports filtering; see [`crate::operations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    SingleLineText,
    Email,
    Url,
    MultilineText,
    Number,
    Currency,
    Percent,
    Date,
    DateTime,
    PhoneNumber,
    MultipleAttachments,
    Checkbox,
    Rating,
    Duration,
    SingleSelect,
    MultipleSelects,
    SingleCollaborator,
    MultipleCollaborators,
    MultipleRecordLinks,
    MultipleLookupValues,
    Rollup,
    Count,
    Formula,
    CreatedTime,
    CreatedBy,
    LastModifiedTime,
    LastModifiedBy,
    AutoNumber,
    Barcode,
    RichText,
    Button,
    AiText,
    ExternalSyncSource,
}

impl FieldType {
    /// Every known column kind, in schema-catalog order.
    pub const ALL: &'static [FieldType] = &[
        FieldType::SingleLineText,
        FieldType::Email,
        FieldType::Url,
        FieldType::MultilineText,
        FieldType::Number,
        FieldType::Currency,
        FieldType::Percent,
        FieldType::Date,
        FieldType::DateTime,
        FieldType::PhoneNumber,
        FieldType::MultipleAttachments,
        FieldType::Checkbox,
        FieldType::Rating,
        FieldType::Duration,
        FieldType::SingleSelect,
        FieldType::MultipleSelects,
        FieldType::SingleCollaborator,
        FieldType::MultipleCollaborators,
        FieldType::MultipleRecordLinks,
        FieldType::MultipleLookupValues,
        FieldType::Rollup,
        FieldType::Count,
        FieldType::Formula,
        FieldType::CreatedTime,
        FieldType::CreatedBy,
        FieldType::LastModifiedTime,
        FieldType::LastModifiedBy,
        FieldType::AutoNumber,
        FieldType::Barcode,
        FieldType::RichText,
        FieldType::Button,
        FieldType::AiText,
        FieldType::ExternalSyncSource,
    ];

    /// The camelCase tag used for this kind in schema payloads.
    pub fn as_key(&self) -> &'static str {
        match self {
            FieldType::SingleLineText => "singleLineText",
            FieldType::Email => "email",
            FieldType::Url => "url",
            FieldType::MultilineText => "multilineText",
            FieldType::Number => "number",
            FieldType::Currency => "currency",
            FieldType::Percent => "percent",
            FieldType::Date => "date",
            FieldType::DateTime => "dateTime",
            FieldType::PhoneNumber => "phoneNumber",
            FieldType::MultipleAttachments => "multipleAttachments",
            FieldType::Checkbox => "checkbox",
            FieldType::Rating => "rating",
            FieldType::Duration => "duration",
            FieldType::SingleSelect => "singleSelect",
            FieldType::MultipleSelects => "multipleSelects",
            FieldType::SingleCollaborator => "singleCollaborator",
            FieldType::MultipleCollaborators => "multipleCollaborators",
            FieldType::MultipleRecordLinks => "multipleRecordLinks",
            FieldType::MultipleLookupValues => "multipleLookupValues",
            FieldType::Rollup => "rollup",
            FieldType::Count => "count",
            FieldType::Formula => "formula",
            FieldType::CreatedTime => "createdTime",
            FieldType::CreatedBy => "createdBy",
            FieldType::LastModifiedTime => "lastModifiedTime",
            FieldType::LastModifiedBy => "lastModifiedBy",
            FieldType::AutoNumber => "autoNumber",
            FieldType::Barcode => "barcode",
            FieldType::RichText => "richText",
            FieldType::Button => "button",
            FieldType::AiText => "aiText",
            FieldType::ExternalSyncSource => "externalSyncSource",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// One column of the target table.
///
/// `name` doubles as the `{Name}` reference token inside formulas, so names
/// containing `}` are rejected at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Opaque column identifier; empty when the schema source does not know it.
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            field_type,
        }
    }
}
