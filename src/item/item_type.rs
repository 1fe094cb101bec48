use serde::Deserialize;

/// A single item type.
///
/// Host applications implement this for their own item assets; the
/// inventory core queries it and never constructs or owns definitions.
/// Names carry item identity: two items are the same type iff their names
/// compare equal.
pub trait Item {
    /// The player-facing name of this item.
    fn name(&self) -> &str;

    /// Maximum quantity a single stack of this item can hold. Must be
    /// greater than 1.
    fn max_quantity(&self) -> u32;
}

/// Two items are the same type iff their names compare equal.
pub fn same_item(first: &dyn Item, second: &dyn Item) -> bool {
    first.name() == second.name()
}

/// A plain data-backed item definition.
///
/// Usable directly or loaded in bulk through an
/// [`ItemCatalog`](crate::item::ItemCatalog).
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDefinition {
    name: String,
    max_quantity: u32,
}

impl ItemDefinition {
    pub fn new(name: impl Into<String>, max_quantity: u32) -> Self {
        Self {
            name: name.into(),
            max_quantity,
        }
    }
}

impl Item for ItemDefinition {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_quantity(&self) -> u32 {
        self.max_quantity
    }
}
