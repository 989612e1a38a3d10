use crate::models::{RawCartItem, SlotVerdict};
use crate::normalize::normalize;
use crate::validator::SlotValidator;
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;

/// Fans slot validation out across a whole cart. The items are
/// independent reads, so a cart of N items costs one slow round trip,
/// not N sequential ones.
pub struct CartValidator {
    slots: Arc<SlotValidator>,
}

impl CartValidator {
    pub fn new(slots: Arc<SlotValidator>) -> Self {
        Self { slots }
    }

    /// Validate every cart line against live inventory.
    ///
    /// Structurally incomplete items are settled locally and never reach
    /// the network. The rest are dispatched concurrently and collected
    /// once all have settled; per-item failures stay per-item. Every
    /// input id gets exactly one verdict.
    pub async fn validate_cart_items(
        &self,
        items: &[RawCartItem],
    ) -> HashMap<String, SlotVerdict> {
        let mut verdicts = HashMap::with_capacity(items.len());

        let mut pending = Vec::with_capacity(items.len());
        for raw in items {
            match normalize(raw) {
                Ok(item) => pending.push(item),
                Err(err) => {
                    tracing::debug!(item_id = %raw.id, field = err.field, "cart item incomplete");
                    verdicts.insert(raw.id.clone(), SlotVerdict::invalid(err.to_string()));
                }
            }
        }
        if pending.is_empty() {
            return verdicts;
        }

        // One clock round trip per batch; every item is judged against
        // the same authoritative day.
        let today = self.slots.business_today().await;

        let checks = pending.into_iter().map(|item| {
            let slots = Arc::clone(&self.slots);
            async move {
                let verdict = slots
                    .validate_against(
                        item.package.package_type,
                        &item.package.package_id,
                        &item.date,
                        &item.time,
                        item.guests,
                        today,
                    )
                    .await;
                (item.id, verdict)
            }
        });

        for (id, verdict) in join_all(checks).await {
            verdicts.insert(id, verdict);
        }
        verdicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{FixedOffset, TimeZone, Utc};
    use std::time::Duration;
    use wayfare_core::{FixedClock, InMemoryInventory, InventoryService};
    use wayfare_shared::{PackageRef, PackageType, TimeSlot};

    const PACKAGE_ID: &str = "66b2f0c4a1d2e3f4a5b6c7d8";

    fn package() -> PackageRef {
        PackageRef {
            package_type: PackageType::Tour,
            package_id: PACKAGE_ID.to_string(),
        }
    }

    fn item(id: &str, time: &str, guests: u32) -> RawCartItem {
        RawCartItem {
            id: id.to_string(),
            package_type: PackageType::Tour,
            package_id: Some(PACKAGE_ID.to_string()),
            date: Some("2025-06-15".to_string()),
            time: Some(time.to_string()),
            selected_date: None,
            selected_time: None,
            guests: Some(guests),
            adults: None,
            children: None,
        }
    }

    fn cart_validator(inventory: Arc<dyn InventoryService>) -> CartValidator {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap(),
        ));
        CartValidator::new(Arc::new(SlotValidator::new(
            inventory,
            clock,
            FixedOffset::east_opt(0).unwrap(),
        )))
    }

    #[tokio::test]
    async fn test_incomplete_item_settles_locally() {
        let inventory = Arc::new(InMemoryInventory::new());
        inventory.insert(
            package(),
            "2025-06-15",
            vec![
                TimeSlot {
                    time: "09:00".to_string(),
                    capacity: 10,
                    booked_count: 0,
                },
                TimeSlot {
                    time: "11:00".to_string(),
                    capacity: 10,
                    booked_count: 10,
                },
            ],
        );
        let validator = cart_validator(inventory.clone());

        let mut broken = item("item-3", "09:00", 2);
        broken.date = None;
        let items = vec![
            item("item-1", "09:00", 2),
            item("item-2", "11:00", 1),
            broken,
            item("item-4", "09:00", 4),
            item("item-5", "14:00", 1),
        ];

        let verdicts = validator.validate_cart_items(&items).await;

        assert_eq!(verdicts.len(), 5);
        assert!(verdicts["item-1"].is_valid);
        assert!(verdicts["item-2"].is_full);
        assert_eq!(verdicts["item-3"].message, "Missing booking information");
        assert!(verdicts["item-4"].is_valid);
        assert_eq!(verdicts["item-5"].message, "Time slot not found");
        // The broken item never produced a network call
        assert_eq!(inventory.call_count(), 4);
    }

    #[tokio::test]
    async fn test_every_id_present_when_all_lookups_fail() {
        struct FailingInventory;

        #[async_trait]
        impl InventoryService for FailingInventory {
            async fn slots_for_date(
                &self,
                _package: &PackageRef,
                _date: &str,
            ) -> Result<Vec<TimeSlot>, Box<dyn std::error::Error + Send + Sync>> {
                Err("upstream down".into())
            }
        }

        let validator = cart_validator(Arc::new(FailingInventory));
        let items = vec![item("a", "09:00", 1), item("b", "10:00", 2)];
        let verdicts = validator.validate_cart_items(&items).await;

        assert_eq!(verdicts.len(), 2);
        for verdict in verdicts.values() {
            assert!(!verdict.is_valid);
            assert!(verdict.message.contains("upstream down"));
        }
    }

    #[tokio::test]
    async fn test_legacy_shape_items_validate() {
        let inventory = Arc::new(InMemoryInventory::new());
        inventory.insert(
            package(),
            "2025-06-15",
            vec![TimeSlot {
                time: "09:00".to_string(),
                capacity: 10,
                booked_count: 0,
            }],
        );
        let validator = cart_validator(inventory);

        let legacy = RawCartItem {
            id: "legacy-1".to_string(),
            package_type: PackageType::Tour,
            package_id: Some(PACKAGE_ID.to_string()),
            date: None,
            time: None,
            selected_date: Some("2025-06-15".to_string()),
            selected_time: Some("09:00".to_string()),
            guests: None,
            adults: Some(2),
            children: Some(1),
        };
        let verdicts = validator.validate_cart_items(&[legacy]).await;
        assert!(verdicts["legacy-1"].is_valid);
    }

    #[tokio::test]
    async fn test_empty_cart_skips_the_clock() {
        let inventory = Arc::new(InMemoryInventory::new());
        let validator = cart_validator(inventory.clone());
        let verdicts = validator.validate_cart_items(&[]).await;
        assert!(verdicts.is_empty());
        assert_eq!(inventory.call_count(), 0);
    }

    /// Inventory that blocks every lookup until all expected lookups
    /// have arrived. Sequential dispatch would deadlock here; the test
    /// passing proves the batch is dispatched concurrently.
    struct RendezvousInventory {
        barrier: tokio::sync::Barrier,
    }

    #[async_trait]
    impl InventoryService for RendezvousInventory {
        async fn slots_for_date(
            &self,
            _package: &PackageRef,
            _date: &str,
        ) -> Result<Vec<TimeSlot>, Box<dyn std::error::Error + Send + Sync>> {
            self.barrier.wait().await;
            Ok(vec![TimeSlot {
                time: "09:00".to_string(),
                capacity: 10,
                booked_count: 0,
            }])
        }
    }

    #[tokio::test]
    async fn test_items_are_dispatched_concurrently() {
        let validator = cart_validator(Arc::new(RendezvousInventory {
            barrier: tokio::sync::Barrier::new(4),
        }));
        let items = vec![
            item("a", "09:00", 1),
            item("b", "09:00", 1),
            item("c", "09:00", 1),
            item("d", "09:00", 1),
        ];

        let verdicts = tokio::time::timeout(
            Duration::from_secs(5),
            validator.validate_cart_items(&items),
        )
        .await
        .expect("batch stalled: items were not dispatched concurrently");

        assert_eq!(verdicts.len(), 4);
        assert!(verdicts.values().all(|v| v.is_valid));
    }
}
