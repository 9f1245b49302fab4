//! Store table files.
//!
//! Taxonomy and layout tables can be supplied as TOML and merged over the
//! built-ins, so adding a store is a data change, not a code change:
//!
//! ```toml
//! [stores."Corner Bodega".taxonomy]
//! "Dairy" = { main = "Grocery", section = "Back Wall" }
//!
//! [[stores."Corner Bodega".sections]]
//! key = "Back Wall"
//! x = 1
//! y = 0
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::layout::{LayoutRegistry, StoreLayout, StoreSection};
use crate::taxonomy::{TaxonomyRegistry, TaxonomyTable};

/// Taxonomy and layout registries that travel together.
#[derive(Debug, Clone)]
pub struct StoreTables {
    pub taxonomies: TaxonomyRegistry,
    pub layouts: LayoutRegistry,
}

impl StoreTables {
    /// The built-in tables only.
    pub fn builtin() -> Self {
        Self {
            taxonomies: TaxonomyRegistry::builtin(),
            layouts: LayoutRegistry::builtin(),
        }
    }

    /// Built-in tables with the stores from a TOML document merged on top.
    pub fn from_toml_str(doc: &str) -> Result<Self, TableError> {
        let file: TableFile = toml::from_str(doc)?;
        let mut tables = Self::builtin();

        for (store, def) in file.stores {
            if def.taxonomy.is_empty() && def.sections.is_empty() {
                return Err(TableError::EmptyStore(store));
            }

            let mut seen = std::collections::HashSet::new();
            for row in &def.sections {
                if !seen.insert(row.key.as_str()) {
                    return Err(TableError::DuplicateSectionKey {
                        store,
                        key: row.key.clone(),
                    });
                }
            }

            if !def.taxonomy.is_empty() {
                let mut table = TaxonomyTable::new();
                for (sub, row) in &def.taxonomy {
                    table.set_main(sub.clone(), row.main.clone());
                    if let Some(section) = &row.section {
                        table.set_section(sub.clone(), section.clone());
                    }
                }
                tables.taxonomies.insert(store.clone(), table);
            }

            if !def.sections.is_empty() {
                let sections = def
                    .sections
                    .iter()
                    .map(|row| {
                        let name = row.name.clone().unwrap_or_else(|| row.key.clone());
                        StoreSection::new(row.key.clone(), name, row.x, row.y)
                    })
                    .collect();
                tables.layouts.insert(store.clone(), StoreLayout::new(sections));
            }
        }

        Ok(tables)
    }

    /// Load a table file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let doc = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read store tables from {}", path.display()))?;
        Self::from_toml_str(&doc)
            .with_context(|| format!("invalid store tables in {}", path.display()))
    }
}

impl Default for StoreTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TableFile {
    #[serde(default)]
    stores: HashMap<String, StoreDef>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDef {
    #[serde(default)]
    taxonomy: HashMap<String, TaxonomyRow>,
    #[serde(default)]
    sections: Vec<SectionRow>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TaxonomyRow {
    main: String,
    #[serde(default)]
    section: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SectionRow {
    key: String,
    #[serde(default)]
    name: Option<String>,
    x: i32,
    y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BODEGA: &str = r#"
        [stores."Corner Bodega".taxonomy]
        "Dairy" = { main = "Grocery", section = "Back Wall" }
        "Produce" = { main = "Grocery", section = "Front Bins" }

        [[stores."Corner Bodega".sections]]
        key = "Front Bins"
        x = 1
        y = 0

        [[stores."Corner Bodega".sections]]
        key = "Back Wall"
        name = "Dairy Wall"
        x = 2
        y = 0
    "#;

    #[test]
    fn merges_custom_store_over_builtins() {
        let tables = StoreTables::from_toml_str(BODEGA).unwrap();

        let taxonomy = tables.taxonomies.table_for("Corner Bodega");
        assert_eq!(taxonomy.section_key_for("Dairy"), "Back Wall");

        let layout = tables.layouts.layout_for("Corner Bodega");
        assert_eq!(layout.sections.len(), 2);
        assert_eq!(layout.section("Back Wall").unwrap().name, "Dairy Wall");

        // Builtins survive the merge.
        let target = tables.taxonomies.table_for("Target");
        assert_eq!(target.main_category_for("Dairy"), "Grocery");
    }

    #[test]
    fn empty_store_is_rejected() {
        let doc = r#"
            [stores."Ghost Mart"]
        "#;
        let err = StoreTables::from_toml_str(doc).unwrap_err();
        assert!(matches!(err, TableError::EmptyStore(_)));
    }

    #[test]
    fn duplicate_section_key_is_rejected() {
        let doc = r#"
            [[stores."Twin Mart".sections]]
            key = "Aisle 1"
            x = 0
            y = 0

            [[stores."Twin Mart".sections]]
            key = "Aisle 1"
            x = 1
            y = 0
        "#;
        let err = StoreTables::from_toml_str(doc).unwrap_err();
        assert!(matches!(err, TableError::DuplicateSectionKey { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BODEGA.as_bytes()).unwrap();

        let tables = StoreTables::from_path(file.path()).unwrap();
        assert!(tables.taxonomies.stores().contains(&"Corner Bodega"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = StoreTables::from_path("/nonexistent/tables.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tables.toml"));
    }
}
