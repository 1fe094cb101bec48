//! Scripted drag-and-drop walkthrough over two inventories.
//! Run with: cargo run --bin drag_demo
//! Set RUST_LOG=debug to watch the reconciliation steps.

use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use inventory_engine::{
    DropEvent, DropHandler, DropOutcome, Inventory, InventoryId, InventoryRegistry, InventorySlot,
    InventoryView, ItemCatalog, ItemStack, SharedInventory,
};

const ITEM_DEFINITIONS: &str = r#"
[[item]]
name = "Carrot"
max_quantity = 10

[[item]]
name = "Cucumber"
max_quantity = 5
"#;

/// Prints a line for every slot change, tagged with the inventory it
/// belongs to.
#[derive(Default)]
struct ConsoleView {
    label: String,
}

impl InventoryView for ConsoleView {
    fn inventory_created(
        &mut self,
        id: InventoryId,
        name: &str,
        columns: u32,
        slots: &[InventorySlot],
    ) {
        self.label = format!("{name}#{id}");
        let rows = slots.len() as u32 / columns;
        println!(
            "[{label}] created: {columns}x{rows} ({count} slots)",
            label = self.label,
            count = slots.len()
        );
    }

    fn render_slot(&mut self, slot: &InventorySlot) {
        match slot.stack() {
            Some(stack) => println!("[{}] slot {:>2}: {stack}", self.label, slot.index()),
            None => println!("[{}] slot {:>2}: empty", self.label, slot.index()),
        }
    }
}

/// What the pointer layer would resolve at drag start: a copy of the stack
/// under the cursor.
fn pick_up(source: &SharedInventory, source_slot: usize) -> Result<ItemStack> {
    source
        .borrow()
        .try_get_stack_at(source_slot)
        .cloned()
        .ok_or_else(|| anyhow!("slot {source_slot} holds nothing to drag"))
}

fn drop_onto(
    handler: &DropHandler,
    source: &SharedInventory,
    source_slot: usize,
    destination: InventoryId,
    destination_slot: usize,
) -> Result<DropOutcome> {
    let event = DropEvent {
        source: Rc::clone(source),
        source_slot,
        dragged: pick_up(source, source_slot)?,
        destination,
        destination_slot,
    };
    let outcome = handler.handle_drop(event);
    println!("   -> {outcome:?}");
    Ok(outcome)
}

fn dump(inventory: &SharedInventory) {
    let inventory = inventory.borrow();
    println!(
        "{} ({}x{}):",
        inventory.name(),
        inventory.columns(),
        inventory.rows()
    );
    for slot in inventory.slots().iter().filter(|slot| !slot.is_empty()) {
        if let Some(stack) = slot.stack() {
            println!("  slot {:>2}: {stack}", slot.index());
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let catalog =
        ItemCatalog::from_toml_str(ITEM_DEFINITIONS).context("loading item definitions")?;
    let carrot = catalog
        .get("Carrot")
        .ok_or_else(|| anyhow!("Carrot missing from catalog"))?;
    let cucumber = catalog
        .get("Cucumber")
        .ok_or_else(|| anyhow!("Cucumber missing from catalog"))?;

    let registry = Rc::new(InventoryRegistry::new());
    let inventory = Inventory::new(
        &registry,
        "Inventory",
        6,
        3,
        Box::new(ConsoleView::default()),
    )?;
    let hotbar = Inventory::new(&registry, "Hotbar", 10, 1, Box::new(ConsoleView::default()))?;
    let inventory_id = inventory.borrow().id();
    let hotbar_id = hotbar.borrow().id();

    {
        let mut inventory = inventory.borrow_mut();
        inventory.place_item_stack(0, ItemStack::with_quantity(carrot.clone(), 5)?)?;
        inventory.place_item_stack(2, ItemStack::with_quantity(carrot.clone(), 5)?)?;
        inventory.place_item_stack(4, ItemStack::with_quantity(carrot.clone(), 5)?)?;
        inventory.place_item_stack(5, ItemStack::with_quantity(cucumber.clone(), 3)?)?;
    }

    let handler = DropHandler::new(Rc::clone(&registry));

    println!("\n-- merge: carrots from slot 2 onto the carrots in slot 0");
    drop_onto(&handler, &inventory, 2, inventory_id, 0)?;

    println!("\n-- incompatible: carrots from slot 4 onto the cucumbers in slot 5");
    drop_onto(&handler, &inventory, 4, inventory_id, 5)?;

    println!("\n-- move: carrots from slot 4 into empty hotbar slot 3");
    drop_onto(&handler, &inventory, 4, hotbar_id, 3)?;

    println!("\n-- overflow: hotbar carrots onto the full stack in slot 0");
    drop_onto(&handler, &hotbar, 3, inventory_id, 0)?;

    println!();
    dump(&inventory);
    dump(&hotbar);

    Ok(())
}
