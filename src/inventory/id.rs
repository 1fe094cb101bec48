use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Unique identifier for an inventory.
///
/// Ids are process-wide and monotonic, so two inventories never share one
/// even when they were created through different registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InventoryId(u32);

static NEXT_ID: AtomicU32 = AtomicU32::new(0);

impl InventoryId {
    /// Atomically claims the next id. Safe to call from any thread; ids
    /// start at 1.
    pub(crate) fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
