use std::rc::Rc;

use log::{debug, error, warn};

use crate::inventory::{InventoryId, InventoryRegistry, ItemStack, SharedInventory};

/// A drop gesture, fully resolved by the pointer layer before calling in:
/// where the drag started, what is being dragged and where it should land.
#[derive(Debug, Clone)]
pub struct DropEvent {
    /// Inventory the drag started in.
    pub source: SharedInventory,
    /// Slot index the dragged stack was attached to.
    pub source_slot: usize,
    /// The stack being dragged, as resolved at drag start. When the source
    /// slot still holds a stack at drop time, the slot's stack wins.
    pub dragged: ItemStack,
    /// Id of the inventory under the pointer.
    pub destination: InventoryId,
    /// Slot index under the pointer.
    pub destination_slot: usize,
}

/// What the pointer layer should do with the dragged visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Keep the new position; the transfer went through.
    Accepted,
    /// Snap the visual back to the source slot. A rejected drop can still
    /// have merged part of the stack into the destination (the overflow
    /// case): the data model keeps the partial merge while the gesture is
    /// reverted visually.
    Rejected,
}

impl DropOutcome {
    pub fn is_accepted(self) -> bool {
        matches!(self, DropOutcome::Accepted)
    }
}

/// Either the transfer went through, or a stack has to go back into the
/// source slot.
enum Verdict {
    Accept,
    PutBack(ItemStack),
}

/// Reconciles drop gestures against the data model.
///
/// One handler serves any number of inventories; cross-inventory lookups go
/// through the injected registry. A rejected gesture leaves the data model
/// as it was before the drop, except for the partial-merge case documented
/// on [`DropOutcome::Rejected`].
pub struct DropHandler {
    registry: Rc<InventoryRegistry>,
}

impl DropHandler {
    pub fn new(registry: Rc<InventoryRegistry>) -> Self {
        Self { registry }
    }

    /// Decide a drop gesture.
    pub fn handle_drop(&self, event: DropEvent) -> DropOutcome {
        let DropEvent {
            source,
            source_slot,
            dragged,
            destination,
            destination_slot,
        } = event;

        let Some(dest) = self.registry.get_by_id(destination) else {
            warn!("destination inventory not found, tried with id {destination}");
            return DropOutcome::Rejected;
        };

        // Lift the stack out of the source slot. From here on every reject
        // path has to put a stack back there.
        // TODO: split stacks that were only partially dragged
        let dragged = match Self::take_from_source(&source, source_slot) {
            Some(stack) => stack,
            None => {
                debug!("source slot {source_slot} no longer holds a stack, using drag metadata");
                dragged
            }
        };

        match Self::merge_or_place(&dest, destination_slot, dragged) {
            Verdict::Accept => DropOutcome::Accepted,
            Verdict::PutBack(stack) => {
                debug!("returning {stack} to source slot {source_slot}");
                Self::restore_to_source(&source, source_slot, stack);
                DropOutcome::Rejected
            }
        }
    }

    /// Remove the stack at `slot_index` if one is still there. Goes through
    /// the slot directly: the dragged visual already left its old position,
    /// so there is nothing to re-render yet.
    fn take_from_source(source: &SharedInventory, slot_index: usize) -> Option<ItemStack> {
        source
            .borrow_mut()
            .get_slot_mut(slot_index)
            .and_then(|slot| slot.remove_stack().ok())
    }

    /// Merge into an occupied destination slot or place into an empty one.
    /// Borrows the destination only, so the source (which may be the same
    /// inventory) stays borrowable for the restore step.
    fn merge_or_place(dest: &SharedInventory, slot_index: usize, dragged: ItemStack) -> Verdict {
        let mut dest = dest.borrow_mut();

        let occupied = match dest.get_slot(slot_index) {
            Some(slot) => !slot.is_empty(),
            None => {
                warn!("destination slot {slot_index} is out of bounds");
                return Verdict::PutBack(dragged);
            }
        };

        if occupied {
            debug!("destination slot {slot_index} already occupied, merging");
            match dest.modify_slot(slot_index, |stack| stack.add_stack(&dragged)) {
                Ok(Ok(overflow)) if overflow.is_empty() => {
                    debug!("fully merged, no overflow");
                    Verdict::Accept
                }
                Ok(Ok(overflow)) => {
                    debug!("{} items overflowed", overflow.quantity());
                    Verdict::PutBack(overflow)
                }
                Ok(Err(err)) => {
                    // Incompatible item types; the destination stack is
                    // untouched.
                    debug!("merge refused: {err}");
                    Verdict::PutBack(dragged)
                }
                Err(err) => {
                    error!("destination slot {slot_index} vanished mid-merge: {err}");
                    Verdict::PutBack(dragged)
                }
            }
        } else {
            debug!("destination slot {slot_index} is empty, placing stack");
            // Emptiness was checked under the same borrow, so this cannot
            // fail while gestures are serialized.
            if let Err(err) = dest.place_item_stack(slot_index, dragged) {
                error!("failed to place dragged stack into empty slot {slot_index}: {err}");
            }
            Verdict::Accept
        }
    }

    /// Put a stack back where the drag started. Goes through the inventory
    /// operation so the source slot re-renders.
    fn restore_to_source(source: &SharedInventory, slot_index: usize, stack: ItemStack) {
        if let Err(err) = source.borrow_mut().place_item_stack(slot_index, stack) {
            // The slot was emptied by this same gesture; reaching this
            // means gestures were not serialized.
            error!("failed to return stack to source slot {slot_index}: {err}");
        }
    }
}
