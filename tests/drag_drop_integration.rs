//! End-to-end drag-and-drop reconciliation scenarios across inventories.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::{mpsc, Arc};
use std::thread;

use inventory_engine::{
    DropEvent, DropHandler, HeadlessView, Inventory, InventoryId, InventoryRegistry,
    InventorySlot, InventoryView, Item, ItemDefinition, ItemStack, SharedInventory,
};

fn tomato() -> Arc<ItemDefinition> {
    Arc::new(ItemDefinition::new("Tomato", 10))
}

fn cucumber() -> Arc<ItemDefinition> {
    Arc::new(ItemDefinition::new("Cucumber", 5))
}

fn new_inventory(
    registry: &Rc<InventoryRegistry>,
    name: &str,
    columns: u32,
    rows: u32,
) -> SharedInventory {
    Inventory::new(registry, name, columns, rows, Box::new(HeadlessView))
        .expect("inventory construction")
}

fn drag(
    source: &SharedInventory,
    source_slot: usize,
    destination: InventoryId,
    destination_slot: usize,
) -> DropEvent {
    let dragged = source
        .borrow()
        .try_get_stack_at(source_slot)
        .cloned()
        .expect("source slot holds a stack");
    DropEvent {
        source: Rc::clone(source),
        source_slot,
        dragged,
        destination,
        destination_slot,
    }
}

fn quantity_at(inventory: &SharedInventory, index: usize) -> Option<u32> {
    inventory
        .borrow()
        .try_get_stack_at(index)
        .map(|stack| stack.quantity())
}

/// Total item count of one item type across an inventory.
fn total_named(inventory: &SharedInventory, name: &str) -> u32 {
    inventory
        .borrow()
        .slots()
        .iter()
        .filter_map(|slot| slot.stack())
        .filter(|stack| stack.item().name() == name)
        .map(|stack| stack.quantity())
        .sum()
}

#[test]
fn merge_onto_occupied_slot_caps_at_max_quantity() {
    let registry = Rc::new(InventoryRegistry::new());
    let inventory = new_inventory(&registry, "Chest", 6, 1);

    inventory
        .borrow_mut()
        .place_item_stack(0, ItemStack::with_quantity(tomato(), 5).unwrap())
        .unwrap();
    let overflow = inventory
        .borrow_mut()
        .modify_slot(0, |stack| {
            stack.add_stack(&ItemStack::with_quantity(tomato(), 10).unwrap())
        })
        .unwrap()
        .unwrap();

    assert_eq!(overflow.quantity(), 5);
    assert_eq!(quantity_at(&inventory, 0), Some(10));
}

#[test]
fn cross_inventory_move_to_empty_slot_is_accepted() {
    let registry = Rc::new(InventoryRegistry::new());
    let source = new_inventory(&registry, "Chest", 6, 1);
    let target = new_inventory(&registry, "Hotbar", 6, 1);
    let handler = DropHandler::new(Rc::clone(&registry));

    source
        .borrow_mut()
        .place_item_stack(0, ItemStack::with_quantity(tomato(), 5).unwrap())
        .unwrap();

    let target_id = target.borrow().id();
    let outcome = handler.handle_drop(drag(&source, 0, target_id, 2));

    assert!(outcome.is_accepted());
    assert_eq!(quantity_at(&source, 0), None);
    assert_eq!(quantity_at(&target, 2), Some(5));
}

#[test]
fn incompatible_destination_is_rejected_and_everything_restored() {
    let registry = Rc::new(InventoryRegistry::new());
    let source = new_inventory(&registry, "Chest", 6, 1);
    let target = new_inventory(&registry, "Hotbar", 6, 1);
    let handler = DropHandler::new(Rc::clone(&registry));

    source
        .borrow_mut()
        .place_item_stack(0, ItemStack::with_quantity(tomato(), 5).unwrap())
        .unwrap();
    target
        .borrow_mut()
        .place_item_stack(2, ItemStack::with_quantity(cucumber(), 3).unwrap())
        .unwrap();

    let target_id = target.borrow().id();
    let outcome = handler.handle_drop(drag(&source, 0, target_id, 2));

    assert!(!outcome.is_accepted());
    assert_eq!(quantity_at(&source, 0), Some(5));
    assert_eq!(quantity_at(&target, 2), Some(3));
    assert_eq!(
        target.borrow().try_get_stack_at(2).unwrap().item().name(),
        "Cucumber"
    );
}

#[test]
fn partial_merge_is_rejected_with_overflow_back_at_the_source() {
    let registry = Rc::new(InventoryRegistry::new());
    let source = new_inventory(&registry, "Chest", 6, 1);
    let target = new_inventory(&registry, "Hotbar", 6, 1);
    let handler = DropHandler::new(Rc::clone(&registry));

    source
        .borrow_mut()
        .place_item_stack(0, ItemStack::with_quantity(tomato(), 8).unwrap())
        .unwrap();
    target
        .borrow_mut()
        .place_item_stack(2, ItemStack::with_quantity(tomato(), 5).unwrap())
        .unwrap();
    let before = total_named(&source, "Tomato") + total_named(&target, "Tomato");

    let target_id = target.borrow().id();
    let outcome = handler.handle_drop(drag(&source, 0, target_id, 2));

    // The partial merge persists in the data model even though the gesture
    // snaps back.
    assert!(!outcome.is_accepted());
    assert_eq!(quantity_at(&target, 2), Some(10));
    assert_eq!(quantity_at(&source, 0), Some(3));
    let after = total_named(&source, "Tomato") + total_named(&target, "Tomato");
    assert_eq!(before, after);
}

#[test]
fn missing_destination_inventory_rejects_without_mutation() {
    let registry = Rc::new(InventoryRegistry::new());
    let source = new_inventory(&registry, "Chest", 6, 1);
    let handler = DropHandler::new(Rc::clone(&registry));

    let stale_id = {
        let temp = new_inventory(&registry, "Temp", 1, 1);
        let id = temp.borrow().id();
        drop(temp);
        id
    };

    source
        .borrow_mut()
        .place_item_stack(0, ItemStack::with_quantity(tomato(), 5).unwrap())
        .unwrap();

    let outcome = handler.handle_drop(drag(&source, 0, stale_id, 0));

    assert!(!outcome.is_accepted());
    assert_eq!(quantity_at(&source, 0), Some(5));
}

#[test]
fn vanished_source_stack_falls_back_to_drag_metadata() {
    let registry = Rc::new(InventoryRegistry::new());
    let source = new_inventory(&registry, "Chest", 6, 1);
    let target = new_inventory(&registry, "Hotbar", 6, 1);
    let handler = DropHandler::new(Rc::clone(&registry));

    source
        .borrow_mut()
        .place_item_stack(0, ItemStack::with_quantity(tomato(), 5).unwrap())
        .unwrap();
    let event = drag(&source, 0, target.borrow().id(), 1);

    // A concurrent edit cleared the source slot between drag start and drop.
    source
        .borrow_mut()
        .get_slot_mut(0)
        .unwrap()
        .remove_stack()
        .unwrap();

    let outcome = handler.handle_drop(event);

    assert!(outcome.is_accepted());
    assert_eq!(quantity_at(&source, 0), None);
    assert_eq!(quantity_at(&target, 1), Some(5));
}

#[test]
fn transfer_within_one_inventory_works() {
    let registry = Rc::new(InventoryRegistry::new());
    let inventory = new_inventory(&registry, "Chest", 6, 1);
    let handler = DropHandler::new(Rc::clone(&registry));

    inventory
        .borrow_mut()
        .place_item_stack(0, ItemStack::with_quantity(tomato(), 5).unwrap())
        .unwrap();

    let id = inventory.borrow().id();
    let outcome = handler.handle_drop(drag(&inventory, 0, id, 3));

    assert!(outcome.is_accepted());
    assert_eq!(quantity_at(&inventory, 0), None);
    assert_eq!(quantity_at(&inventory, 3), Some(5));
}

#[test]
fn dropping_a_stack_onto_its_own_slot_is_accepted() {
    let registry = Rc::new(InventoryRegistry::new());
    let inventory = new_inventory(&registry, "Chest", 6, 1);
    let handler = DropHandler::new(Rc::clone(&registry));

    inventory
        .borrow_mut()
        .place_item_stack(0, ItemStack::with_quantity(tomato(), 5).unwrap())
        .unwrap();

    let id = inventory.borrow().id();
    let outcome = handler.handle_drop(drag(&inventory, 0, id, 0));

    assert!(outcome.is_accepted());
    assert_eq!(quantity_at(&inventory, 0), Some(5));
}

#[test]
fn out_of_bounds_destination_slot_rejects_and_restores() {
    let registry = Rc::new(InventoryRegistry::new());
    let source = new_inventory(&registry, "Chest", 6, 1);
    let target = new_inventory(&registry, "Hotbar", 2, 1);
    let handler = DropHandler::new(Rc::clone(&registry));

    source
        .borrow_mut()
        .place_item_stack(0, ItemStack::with_quantity(tomato(), 5).unwrap())
        .unwrap();

    let target_id = target.borrow().id();
    let outcome = handler.handle_drop(drag(&source, 0, target_id, 99));

    assert!(!outcome.is_accepted());
    assert_eq!(quantity_at(&source, 0), Some(5));
}

/// Records which slot indices were rendered, for asserting notification
/// behavior.
#[derive(Default)]
struct RecordingView {
    rendered: Rc<RefCell<Vec<usize>>>,
}

impl InventoryView for RecordingView {
    fn render_slot(&mut self, slot: &InventorySlot) {
        self.rendered.borrow_mut().push(slot.index());
    }
}

#[test]
fn mutating_operations_notify_the_view_per_slot() {
    let rendered = Rc::new(RefCell::new(Vec::new()));
    let view = RecordingView {
        rendered: Rc::clone(&rendered),
    };
    let registry = Rc::new(InventoryRegistry::new());
    let inventory =
        Inventory::new(&registry, "Chest", 3, 1, Box::new(view)).expect("inventory construction");

    let mut inventory_ref = inventory.borrow_mut();
    inventory_ref
        .place_item_stack(1, ItemStack::with_quantity(tomato(), 2).unwrap())
        .unwrap();
    inventory_ref.modify_slot(1, |stack| stack.add_one()).unwrap().unwrap();
    inventory_ref.propagate_change(0);
    drop(inventory_ref);

    assert_eq!(*rendered.borrow(), vec![1, 1, 0]);

    inventory.borrow_mut().propagate_changes();
    assert_eq!(*rendered.borrow(), vec![1, 1, 0, 0, 1, 2]);
}

#[test]
fn concurrent_construction_yields_unique_ids() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 16;

    let (tx, rx) = mpsc::channel();
    let mut handles = Vec::new();
    for _ in 0..THREADS {
        let tx = tx.clone();
        handles.push(thread::spawn(move || {
            let registry = Rc::new(InventoryRegistry::new());
            for _ in 0..PER_THREAD {
                let inventory = Inventory::new(&registry, "Worker", 2, 2, Box::new(HeadlessView))
                    .expect("inventory construction");
                let id = inventory.borrow().id().value();
                tx.send(id).expect("send id");
            }
        }));
    }
    drop(tx);

    for handle in handles {
        handle.join().expect("worker thread");
    }

    let ids: Vec<u32> = rx.iter().collect();
    assert_eq!(ids.len(), THREADS * PER_THREAD);
    let unique: HashSet<u32> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
}
