use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::item::{Item, ItemDefinition};

/// Errors raised while building an item catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse item definitions: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate item name {0:?}")]
    DuplicateName(String),

    #[error("item {name:?} has max_quantity {max_quantity}, expected at least 2")]
    MaxQuantityTooSmall { name: String, max_quantity: u32 },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    item: Vec<ItemDefinition>,
}

/// Name-keyed collection of item definitions, typically loaded from a TOML
/// asset file:
///
/// ```toml
/// [[item]]
/// name = "Carrot"
/// max_quantity = 10
/// ```
#[derive(Debug, Default)]
pub struct ItemCatalog {
    items: HashMap<String, Arc<ItemDefinition>>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document of `[[item]]` tables into a catalog.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        let mut catalog = Self::new();
        for definition in file.item {
            catalog.add(definition)?;
        }
        Ok(catalog)
    }

    /// Add a definition, rejecting duplicate names and max quantities below
    /// 2 (a stack of at most one item is not a stack).
    pub fn add(&mut self, definition: ItemDefinition) -> Result<(), CatalogError> {
        if definition.max_quantity() < 2 {
            return Err(CatalogError::MaxQuantityTooSmall {
                name: definition.name().to_owned(),
                max_quantity: definition.max_quantity(),
            });
        }
        if self.items.contains_key(definition.name()) {
            return Err(CatalogError::DuplicateName(definition.name().to_owned()));
        }
        self.items
            .insert(definition.name().to_owned(), Arc::new(definition));
        Ok(())
    }

    /// Look up a definition by item name, ready to back stacks.
    pub fn get(&self, name: &str) -> Option<Arc<ItemDefinition>> {
        self.items.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINITIONS: &str = r#"
        [[item]]
        name = "Carrot"
        max_quantity = 10

        [[item]]
        name = "Cucumber"
        max_quantity = 5
    "#;

    #[test]
    fn parses_item_tables() {
        let catalog = ItemCatalog::from_toml_str(DEFINITIONS).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Carrot").unwrap().max_quantity(), 10);
        assert!(catalog.get("Potato").is_none());
    }

    #[test]
    fn an_empty_document_is_an_empty_catalog() {
        let catalog = ItemCatalog::from_toml_str("").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut catalog = ItemCatalog::new();
        catalog.add(ItemDefinition::new("Carrot", 10)).unwrap();
        let err = catalog.add(ItemDefinition::new("Carrot", 5)).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName(_)));
    }

    #[test]
    fn rejects_unstackable_max_quantities() {
        let mut catalog = ItemCatalog::new();
        let err = catalog.add(ItemDefinition::new("Relic", 1)).unwrap_err();
        assert!(matches!(err, CatalogError::MaxQuantityTooSmall { .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = ItemCatalog::from_toml_str("[[item]]\nname = 3").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
