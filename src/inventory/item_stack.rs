use std::fmt;
use std::sync::Arc;

use crate::inventory::InventoryError;
use crate::item::{same_item, Item};

/// A capacity-bounded quantity of a single item type.
///
/// The item type is fixed at construction and the quantity never leaves
/// `[0, item.max_quantity()]`. Stacks are values: cloning one is cheap and
/// there is no identity beyond the data.
#[derive(Clone)]
pub struct ItemStack {
    item: Arc<dyn Item>,
    quantity: u32,
}

impl ItemStack {
    /// An empty stack of the given item type.
    pub fn new(item: Arc<dyn Item>) -> Self {
        Self { item, quantity: 0 }
    }

    /// A stack holding `quantity` items. Validation is eager: quantities
    /// above the item's maximum fail here, not on first use.
    pub fn with_quantity(item: Arc<dyn Item>, quantity: u32) -> Result<Self, InventoryError> {
        let max = item.max_quantity();
        if quantity > max {
            return Err(InventoryError::QuantityOutOfRange {
                value: quantity,
                max,
            });
        }
        Ok(Self { item, quantity })
    }

    /// The item type this stack holds.
    pub fn item(&self) -> &Arc<dyn Item> {
        &self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Maximum quantity a stack of this item type can hold.
    pub fn max_quantity(&self) -> u32 {
        self.item.max_quantity()
    }

    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    pub fn is_full(&self) -> bool {
        self.quantity >= self.item.max_quantity()
    }

    /// Whether `other` holds the same item type (compared by name).
    pub fn is_compatible_with(&self, other: &ItemStack) -> bool {
        same_item(self.item.as_ref(), other.item.as_ref())
    }

    /// Add a single item to the stack.
    pub fn add_one(&mut self) -> Result<(), InventoryError> {
        if self.is_full() {
            return Err(InventoryError::StackFull {
                quantity: self.quantity,
                max: self.item.max_quantity(),
            });
        }
        self.quantity += 1;
        Ok(())
    }

    /// Remove a single item and return its type. `None` when the stack is
    /// already empty.
    pub fn take_one(&mut self) -> Option<Arc<dyn Item>> {
        if self.is_empty() {
            return None;
        }
        self.quantity -= 1;
        Some(Arc::clone(&self.item))
    }

    /// Take up to `quantity` items into a new stack.
    ///
    /// Requesting more than is available empties this stack and returns
    /// everything it held instead of failing.
    pub fn take_many(&mut self, quantity: u32) -> Result<ItemStack, InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::InvalidArgument(
                "cannot take zero items from a stack".into(),
            ));
        }
        let taken = quantity.min(self.quantity);
        self.quantity -= taken;
        Ok(Self {
            item: Arc::clone(&self.item),
            quantity: taken,
        })
    }

    /// Move as many items as capacity allows from `other` onto this stack
    /// and return the overflow (quantity 0 when everything fit).
    ///
    /// After a successful merge the returned overflow is the canonical
    /// remainder; `other` must be treated as consumed. On an incompatible
    /// item type both stacks are left unchanged.
    pub fn add_stack(&mut self, other: &ItemStack) -> Result<ItemStack, InventoryError> {
        if !self.is_compatible_with(other) {
            return Err(InventoryError::IncompatibleItem {
                first: self.item.name().to_owned(),
                second: other.item.name().to_owned(),
            });
        }
        let space = self.item.max_quantity() - self.quantity;
        let moved = other.quantity.min(space);
        self.quantity += moved;
        Ok(Self {
            item: Arc::clone(&self.item),
            quantity: other.quantity - moved,
        })
    }
}

impl fmt::Debug for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemStack")
            .field("item", &self.item.name())
            .field("quantity", &self.quantity)
            .finish()
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.item.name(), self.quantity)
    }
}
