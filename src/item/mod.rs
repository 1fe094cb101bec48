pub mod catalog;
pub mod item_type;

pub use catalog::{CatalogError, ItemCatalog};
pub use item_type::{same_item, Item, ItemDefinition};
