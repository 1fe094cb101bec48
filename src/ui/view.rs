use crate::inventory::{InventoryId, InventorySlot};

/// Render-trigger boundary between an inventory and its UI.
///
/// An inventory drives its view: once when its slot grid is constructed and
/// then for every slot whose contents changed. Implementations read the
/// state they are handed and draw it; they never mutate inventory data.
pub trait InventoryView {
    /// The inventory finished constructing its slot grid.
    fn inventory_created(
        &mut self,
        id: InventoryId,
        name: &str,
        columns: u32,
        slots: &[InventorySlot],
    ) {
        let _ = (id, name, columns, slots);
    }

    /// The slot's contents changed and should be re-rendered.
    fn render_slot(&mut self, slot: &InventorySlot) {
        let _ = slot;
    }
}

/// A view that renders nothing, for headless use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessView;

impl InventoryView for HeadlessView {}
