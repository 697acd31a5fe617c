// src/models/labels.rs

//! Mapping from the site's row labels to canonical summary fields.
//!
//! Listing rows look like `Thể loại: Action, Drama`. The label is looked up
//! here; a label missing from the table is reported and the row is skipped.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Canonical summary field a label can feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SummaryField {
    Genres,
    Status,
    TotalViews,
    TotalComments,
    Followers,
    OtherNames,
    UpdatedAt,
    Authors,
}

/// How the raw text of a field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Split into a list, then matched against the genre taxonomy
    GenreList,
    /// Two-state status label
    Status,
    /// Counter with thousands separators or `N/A`
    Total,
    /// Always a list (possibly empty)
    List,
    /// List when separators are present, otherwise a single value
    ListOrScalar,
    /// Plain text
    Text,
}

impl SummaryField {
    pub fn kind(self) -> ValueKind {
        match self {
            SummaryField::Genres => ValueKind::GenreList,
            SummaryField::Status => ValueKind::Status,
            SummaryField::TotalViews | SummaryField::TotalComments | SummaryField::Followers => {
                ValueKind::Total
            }
            SummaryField::OtherNames => ValueKind::List,
            SummaryField::Authors => ValueKind::ListOrScalar,
            SummaryField::UpdatedAt => ValueKind::Text,
        }
    }
}

/// One label-to-field entry, as written in `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelMapping {
    /// Label text as it appears before the colon
    pub label: String,

    /// Field the value is stored in
    pub field: SummaryField,
}

impl LabelMapping {
    pub fn new(label: impl Into<String>, field: SummaryField) -> Self {
        Self {
            label: label.into(),
            field,
        }
    }
}

/// Validated lookup table built from [`LabelMapping`]s.
#[derive(Debug, Clone)]
pub struct LabelTable {
    by_label: HashMap<String, SummaryField>,
}

impl LabelTable {
    /// Build the table, rejecting empty labels, duplicate labels and fields
    /// fed by more than one label.
    pub fn new(mappings: &[LabelMapping]) -> Result<Self> {
        let mut by_label = HashMap::with_capacity(mappings.len());
        let mut fields = HashSet::new();

        for mapping in mappings {
            let label = mapping.label.trim();
            if label.is_empty() {
                return Err(AppError::validation("label table contains an empty label"));
            }
            if by_label.insert(label.to_string(), mapping.field).is_some() {
                return Err(AppError::validation(format!("duplicate label '{label}'")));
            }
            if !fields.insert(mapping.field) {
                return Err(AppError::validation(format!(
                    "field {:?} is mapped by more than one label",
                    mapping.field
                )));
            }
        }

        Ok(Self { by_label })
    }

    /// Look up a label; surrounding whitespace is ignored.
    pub fn field(&self, label: &str) -> Option<SummaryField> {
        self.by_label.get(label.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}

/// Labels used by the Vietnamese site.
pub fn default_labels() -> Vec<LabelMapping> {
    vec![
        LabelMapping::new("Thể loại", SummaryField::Genres),
        LabelMapping::new("Tình trạng", SummaryField::Status),
        LabelMapping::new("Lượt xem", SummaryField::TotalViews),
        LabelMapping::new("Bình luận", SummaryField::TotalComments),
        LabelMapping::new("Theo dõi", SummaryField::Followers),
        LabelMapping::new("Tên khác", SummaryField::OtherNames),
        LabelMapping::new("Ngày cập nhật", SummaryField::UpdatedAt),
        LabelMapping::new("Tác giả", SummaryField::Authors),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = LabelTable::new(&default_labels()).unwrap();
        assert_eq!(table.len(), 8);
        assert_eq!(table.field(" Thể loại "), Some(SummaryField::Genres));
        assert_eq!(table.field("Unknown"), None);
    }

    #[test]
    fn test_rejects_duplicate_label() {
        let mut labels = default_labels();
        labels.push(LabelMapping::new("Thể loại", SummaryField::Genres));
        assert!(LabelTable::new(&labels).is_err());
    }

    #[test]
    fn test_rejects_field_mapped_twice() {
        let labels = vec![
            LabelMapping::new("Tác giả", SummaryField::Authors),
            LabelMapping::new("Author", SummaryField::Authors),
        ];
        assert!(LabelTable::new(&labels).is_err());
    }

    #[test]
    fn test_rejects_empty_label() {
        let labels = vec![LabelMapping::new("  ", SummaryField::Status)];
        assert!(LabelTable::new(&labels).is_err());
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(SummaryField::Followers.kind(), ValueKind::Total);
        assert_eq!(SummaryField::Authors.kind(), ValueKind::ListOrScalar);
    }
}
