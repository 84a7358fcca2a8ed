//! Data merge: one element list per imported data row.
//!
//! Placeholders mapped to a column become plain text holding the row's
//! value. Barcodes mapped to one or more columns get the non-empty values
//! joined by a separator. Everything else is copied unchanged.

use std::collections::HashMap;

use crate::model::{Element, ElementKind, ElementType};

/// One imported record, keyed by column name.
pub type DataRow = HashMap<String, String>;

const DEFAULT_SEPARATOR: &str = " ";

/// Extracts the field name from a `{{field}}` token.
pub fn field_name(content: &str) -> Option<&str> {
    let start = content.find("{{")? + 2;
    let len = content[start..].find("}}")?;
    let name = &content[start..start + len];
    (!name.is_empty()).then_some(name)
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Column assignments for a merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergePlan {
    /// Placeholder element id to column.
    pub column_mapping: HashMap<String, String>,
    /// Barcode element id to the columns composing its content.
    pub barcode_columns: HashMap<String, Vec<String>>,
    /// Barcode element id to the separator between column values.
    pub separators: HashMap<String, String>,
}

impl MergePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map_placeholder(&mut self, element_id: &str, column: &str) -> &mut Self {
        self.column_mapping
            .insert(element_id.to_string(), column.to_string());
        self
    }

    pub fn map_barcode(
        &mut self,
        element_id: &str,
        columns: &[&str],
        separator: Option<&str>,
    ) -> &mut Self {
        self.barcode_columns.insert(
            element_id.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
        );
        self.separators.insert(
            element_id.to_string(),
            separator.unwrap_or(DEFAULT_SEPARATOR).to_string(),
        );
        self
    }

    /// Maps each placeholder whose `{{field}}` matches a column, ignoring
    /// case, spaces and underscores. Barcodes start unmapped with a space
    /// separator.
    pub fn auto_map(elements: &[Element], columns: &[String]) -> Self {
        let mut plan = Self::new();
        for element in elements {
            match &element.kind {
                ElementKind::Placeholder { content } => {
                    let Some(field) = field_name(content) else {
                        continue;
                    };
                    let field = field.trim().to_lowercase();
                    let wanted = squash(&field);
                    if let Some(column) = columns.iter().find(|col| {
                        col.trim().to_lowercase() == field || squash(col) == wanted
                    }) {
                        plan.column_mapping
                            .insert(element.id.clone(), column.clone());
                    }
                }
                ElementKind::Barcode(_) => {
                    plan.barcode_columns.insert(element.id.clone(), Vec::new());
                    plan.separators
                        .insert(element.id.clone(), DEFAULT_SEPARATOR.to_string());
                }
                _ => {}
            }
        }
        tracing::debug!(
            "Auto-mapped {} placeholders to columns",
            plan.column_mapping.len()
        );
        plan
    }

    /// Every placeholder is mapped, and at least one barcode (if any exist)
    /// has a column.
    pub fn is_complete(&self, elements: &[Element]) -> bool {
        let placeholders_mapped = elements
            .iter()
            .filter(|e| e.element_type() == ElementType::Placeholder)
            .all(|e| self.column_mapping.contains_key(&e.id));

        let mut barcodes = elements
            .iter()
            .filter(|e| e.element_type() == ElementType::Barcode)
            .peekable();
        let barcode_mapped = barcodes.peek().is_none()
            || barcodes.any(|e| {
                self.barcode_columns
                    .get(&e.id)
                    .is_some_and(|cols| cols.iter().any(|c| !c.is_empty()))
            });

        placeholders_mapped && barcode_mapped
    }

    /// Elements for a single row.
    pub fn apply_row(&self, elements: &[Element], row: &DataRow) -> Vec<Element> {
        elements
            .iter()
            .map(|element| {
                let mut merged = element.clone();
                match &element.kind {
                    ElementKind::Barcode(_) => {
                        let columns: Vec<&String> = self
                            .barcode_columns
                            .get(&element.id)
                            .map(|cols| cols.iter().filter(|c| !c.is_empty()).collect())
                            .unwrap_or_default();
                        if !columns.is_empty() {
                            let separator = self
                                .separators
                                .get(&element.id)
                                .filter(|s| !s.is_empty())
                                .map(String::as_str)
                                .unwrap_or(DEFAULT_SEPARATOR);
                            let value = columns
                                .iter()
                                .filter_map(|col| row.get(*col))
                                .filter(|v| !v.is_empty())
                                .map(String::as_str)
                                .collect::<Vec<_>>()
                                .join(separator);
                            merged.set_content(value);
                        }
                    }
                    ElementKind::Placeholder { .. } => {
                        if let Some(column) = self.column_mapping.get(&element.id) {
                            let value = row.get(column).cloned().unwrap_or_default();
                            merged.kind = ElementKind::Text { content: value };
                        }
                    }
                    _ => {}
                }
                merged
            })
            .collect()
    }

    /// One element list per row, in row order.
    pub fn apply(&self, elements: &[Element], rows: &[DataRow]) -> Vec<Vec<Element>> {
        rows.iter().map(|row| self.apply_row(elements, row)).collect()
    }
}
