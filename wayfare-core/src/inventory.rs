use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use wayfare_shared::{PackageRef, TimeSlot};

/// Read-only view of per-slot capacity. The backing store is owned and
/// mutated by the external inventory service; this engine never writes.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// All departures for a package on the given date (canonical
    /// YYYY-MM-DD). An unknown package or date resolves to an empty
    /// list, not an error.
    async fn slots_for_date(
        &self,
        package: &PackageRef,
        date: &str,
    ) -> Result<Vec<TimeSlot>, Box<dyn std::error::Error + Send + Sync>>;
}

/// In-memory inventory for tests and local development
pub struct InMemoryInventory {
    slots: Mutex<HashMap<(PackageRef, String), Vec<TimeSlot>>>,
    calls: AtomicUsize,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Seed the departures for a package on a date
    pub fn insert(&self, package: PackageRef, date: &str, slots: Vec<TimeSlot>) {
        self.slots
            .lock()
            .unwrap()
            .insert((package, date.to_string()), slots);
    }

    /// Number of lookups issued so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryService for InMemoryInventory {
    async fn slots_for_date(
        &self,
        package: &PackageRef,
        date: &str,
    ) -> Result<Vec<TimeSlot>, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let slots = self
            .slots
            .lock()
            .unwrap()
            .get(&(package.clone(), date.to_string()))
            .cloned()
            .unwrap_or_default();
        Ok(slots)
    }
}
