use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use log::{debug, warn};

use crate::inventory::{
    InventoryError, InventoryId, InventoryRegistry, InventorySlot, ItemStack,
};
use crate::ui::InventoryView;

/// Handle form for an inventory: shared within the single-threaded model,
/// resolvable through the registry.
pub type SharedInventory = Rc<RefCell<Inventory>>;

/// A fixed-size, row-major grid of slots with a name and a unique id.
///
/// An inventory owns its slots and the stacks they hold. It drives its view
/// whenever slot contents change, registers itself with the registry on
/// construction and unregisters when dropped. The grid shape is fixed for
/// life; the row count is derived from `slots.len() / columns`.
pub struct Inventory {
    id: InventoryId,
    name: String,
    columns: u32,
    slots: Vec<InventorySlot>,
    view: Box<dyn InventoryView>,
    registry: Rc<InventoryRegistry>,
}

impl Inventory {
    /// Create an inventory with `columns * rows` slots indexed `0..n` in
    /// row-major order, notify the view and register the new handle.
    pub fn new(
        registry: &Rc<InventoryRegistry>,
        name: impl Into<String>,
        columns: u32,
        rows: u32,
        view: Box<dyn InventoryView>,
    ) -> Result<SharedInventory, InventoryError> {
        if columns == 0 {
            return Err(InventoryError::InvalidArgument(
                "an inventory needs at least one column".into(),
            ));
        }
        let slot_count = columns.checked_mul(rows).ok_or_else(|| {
            InventoryError::InvalidArgument(format!("slot grid {columns}x{rows} is too large"))
        })? as usize;

        let id = InventoryId::next();
        let slots = (0..slot_count).map(InventorySlot::new).collect();
        let mut inventory = Self {
            id,
            name: name.into(),
            columns,
            slots,
            view,
            registry: Rc::clone(registry),
        };
        inventory
            .view
            .inventory_created(id, &inventory.name, columns, &inventory.slots);
        debug!(
            "inventory {id} ({name}) created with {slot_count} slots",
            name = inventory.name
        );

        let shared = Rc::new(RefCell::new(inventory));
        registry.register(id, Rc::downgrade(&shared));
        Ok(shared)
    }

    pub fn id(&self) -> InventoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Derived from the slot count; never stored.
    pub fn rows(&self) -> u32 {
        self.slots.len() as u32 / self.columns
    }

    /// All slots in index order. Slot `i` always has index `i`.
    pub fn slots(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn get_slot(&self, index: usize) -> Option<&InventorySlot> {
        self.slots.get(index)
    }

    /// Mutable slot access for advanced callers; pair direct mutation with
    /// [`propagate_change`](Self::propagate_change).
    pub fn get_slot_mut(&mut self, index: usize) -> Option<&mut InventorySlot> {
        self.slots.get_mut(index)
    }

    /// Place a stack into the slot at `index` and notify the view.
    /// A `SlotOccupied` failure from the slot propagates untouched.
    pub fn place_item_stack(
        &mut self,
        index: usize,
        stack: ItemStack,
    ) -> Result<(), InventoryError> {
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            InventoryError::InvalidArgument(format!("slot index {index} is out of bounds"))
        })?;
        slot.place_stack(stack)?;
        self.propagate_change(index);
        Ok(())
    }

    /// The stack at `index`, or `None` when the slot is empty or the index
    /// out of bounds. Never mutates.
    pub fn try_get_stack_at(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(InventorySlot::stack)
    }

    /// Run `mutate` with exclusive access to the stack living in slot
    /// `index`, then notify the view. Mutations are visible through the
    /// slot; this is the sanctioned way to change a stack in place.
    ///
    /// Generic over the closure's return value so callers can surface
    /// results such as a merge overflow.
    pub fn modify_slot<R>(
        &mut self,
        index: usize,
        mutate: impl FnOnce(&mut ItemStack) -> R,
    ) -> Result<R, InventoryError> {
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            InventoryError::InvalidArgument(format!("slot index {index} is out of bounds"))
        })?;
        let stack = slot.stack_mut().ok_or(InventoryError::SlotEmpty(index))?;
        let result = mutate(stack);
        self.propagate_change(index);
        Ok(result)
    }

    /// Re-render a single slot. For callers that mutated slot data directly
    /// instead of going through the operations above.
    pub fn propagate_change(&mut self, index: usize) {
        match self.slots.get(index) {
            Some(slot) => {
                debug!("inventory {id}: render slot {index}", id = self.id);
                self.view.render_slot(slot);
            }
            None => warn!(
                "inventory {id}: cannot propagate change for out-of-bounds slot {index}",
                id = self.id
            ),
        }
    }

    /// Re-render every slot.
    pub fn propagate_changes(&mut self) {
        for slot in &self.slots {
            self.view.render_slot(slot);
        }
    }
}

impl Drop for Inventory {
    // Disposal only affects registry visibility; slot data is untouched.
    fn drop(&mut self) {
        debug!("inventory {id} ({name}) dropped", id = self.id, name = self.name);
        self.registry.unregister(self.id);
    }
}

/// Identity is the id alone: independently obtained handles to the same
/// logical inventory compare equal.
impl PartialEq for Inventory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Inventory {}

impl Hash for Inventory {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inventory")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("columns", &self.columns)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}
