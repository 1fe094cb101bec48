pub mod drag_drop;
pub mod view;

pub use drag_drop::{DropEvent, DropHandler, DropOutcome};
pub use view::{HeadlessView, InventoryView};
