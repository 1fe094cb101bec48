use thiserror::Error;

/// Errors raised by stack, slot and inventory operations.
///
/// None of these are fatal: every failure leaves the touched state unchanged
/// and can be recovered by the caller retrying or reverting its own state.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A quantity outside `[0, max]` for the item type.
    #[error("quantity {value} is not in range [0,{max}]")]
    QuantityOutOfRange { value: u32, max: u32 },

    /// The slot already holds a stack.
    #[error("inventory slot {0} is already occupied by another stack")]
    SlotOccupied(usize),

    /// The slot holds no stack.
    #[error("inventory slot {0} is empty")]
    SlotEmpty(usize),

    /// Two stacks hold different item types (compared by name).
    #[error("{first} is incompatible with {second}")]
    IncompatibleItem { first: String, second: String },

    /// The stack is at the item's maximum quantity.
    #[error("cannot add to a full stack ({quantity}/{max})")]
    StackFull { quantity: u32, max: u32 },

    #[error("{0}")]
    InvalidArgument(String),
}
