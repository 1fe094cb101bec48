pub mod inventory;
pub mod item;
pub mod ui;

pub use inventory::{
    Inventory, InventoryError, InventoryId, InventoryRegistry, InventorySlot, ItemStack,
    SharedInventory,
};
pub use item::{same_item, CatalogError, Item, ItemCatalog, ItemDefinition};
pub use ui::{DropEvent, DropHandler, DropOutcome, HeadlessView, InventoryView};
