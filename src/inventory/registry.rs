use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use crate::inventory::{Inventory, InventoryId, SharedInventory};

/// Lookup table from inventory id to live inventory.
///
/// The registry never owns inventories: it keeps weak handles that
/// inventories add on construction and remove when dropped. Inject one
/// registry instance wherever cross-inventory lookups are needed rather
/// than relying on ambient global state.
#[derive(Debug, Default)]
pub struct InventoryRegistry {
    inventories: RefCell<HashMap<InventoryId, Weak<RefCell<Inventory>>>>,
}

impl InventoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by `Inventory::new`; never by application code.
    pub(crate) fn register(&self, id: InventoryId, inventory: Weak<RefCell<Inventory>>) {
        self.inventories.borrow_mut().insert(id, inventory);
    }

    /// Called by `Inventory::drop`; never by application code.
    pub(crate) fn unregister(&self, id: InventoryId) {
        self.inventories.borrow_mut().remove(&id);
    }

    /// Find a live inventory by id. `None` for unknown ids and for
    /// inventories that have been dropped; both are normal results, not
    /// errors.
    pub fn get_by_id(&self, id: InventoryId) -> Option<SharedInventory> {
        self.inventories.borrow().get(&id).and_then(Weak::upgrade)
    }

    /// Number of registered inventories.
    pub fn len(&self) -> usize {
        self.inventories.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventories.borrow().is_empty()
    }
}
