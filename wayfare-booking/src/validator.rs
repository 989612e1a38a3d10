use crate::models::SlotVerdict;
use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use std::sync::Arc;
use wayfare_core::{ClockSource, InventoryService};
use wayfare_shared::{PackageRef, PackageType};

/// Catalog identifiers are 24-character hex object tokens
const PACKAGE_ID_LEN: usize = 24;

/// Checks a single booking request against the authoritative clock and
/// a fresh inventory snapshot. Read-only and advisory: two requests for
/// the same slot can both see the last seat, and the commit-time check
/// owned by the inventory service is the one that decrements capacity.
pub struct SlotValidator {
    inventory: Arc<dyn InventoryService>,
    clock: Arc<dyn ClockSource>,
    business_tz: FixedOffset,
}

impl SlotValidator {
    pub fn new(
        inventory: Arc<dyn InventoryService>,
        clock: Arc<dyn ClockSource>,
        business_tz: FixedOffset,
    ) -> Self {
        Self {
            inventory,
            clock,
            business_tz,
        }
    }

    /// Validate one slot request. Never returns an error: every failure
    /// mode is folded into the verdict.
    pub async fn validate_slot(
        &self,
        package_type: PackageType,
        package_id: &str,
        date: &str,
        time: &str,
        guests: u32,
    ) -> SlotVerdict {
        let today = self.business_today().await;
        self.validate_against(package_type, package_id, date, time, guests, today)
            .await
    }

    /// Current calendar day in the business timezone. Falls back to the
    /// host's local date when the time service is unreachable, so an
    /// outage degrades expiry precision instead of failing validation.
    pub async fn business_today(&self) -> NaiveDate {
        match self.clock.now().await {
            Ok(now) => now.with_timezone(&self.business_tz).date_naive(),
            Err(err) => {
                tracing::warn!("time service unavailable, using local date: {}", err);
                Local::now().date_naive()
            }
        }
    }

    /// Validate against an already-resolved authoritative day. Batch
    /// validation resolves the day once and shares it across items.
    pub(crate) async fn validate_against(
        &self,
        package_type: PackageType,
        package_id: &str,
        date: &str,
        time: &str,
        guests: u32,
        today: NaiveDate,
    ) -> SlotVerdict {
        if package_id.is_empty() || date.is_empty() || time.is_empty() || guests < 1 {
            return SlotVerdict::invalid("Invalid input parameters");
        }
        if !is_package_token(package_id) {
            return SlotVerdict::invalid("Invalid package ID format");
        }

        let Some((query_date, slot_day)) = canonical_date(date) else {
            return SlotVerdict::invalid("Invalid input parameters");
        };

        // Calendar-day comparison, not a timestamp comparison: a slot on
        // the current day is never expired regardless of time of day.
        if slot_day < today {
            return SlotVerdict::expired();
        }

        let package = PackageRef {
            package_type,
            package_id: package_id.to_string(),
        };
        let slots = match self.inventory.slots_for_date(&package, &query_date).await {
            Ok(slots) => slots,
            Err(err) => {
                tracing::warn!(
                    package_id,
                    date = %query_date,
                    "inventory lookup failed: {}",
                    err
                );
                return SlotVerdict::failure(err);
            }
        };

        let Some(slot) = slots.iter().find(|s| s.time == time) else {
            return SlotVerdict::invalid("Time slot not found");
        };

        let available = slot.available();
        let capacity = slot.capacity.max(0) as u32;
        if available <= 0 {
            return SlotVerdict::full(0, capacity);
        }
        if guests > available as u32 {
            return SlotVerdict::full(available as u32, capacity);
        }
        tracing::debug!(package_id, time, guests, available, "slot available");
        SlotVerdict::available(available as u32, capacity)
    }
}

fn is_package_token(id: &str) -> bool {
    id.len() == PACKAGE_ID_LEN && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Canonical query form of a requested date plus its calendar day.
///
/// A `YYYY-MM-DD` input is used verbatim for the inventory query; this
/// avoids the day shift that comes from round-tripping a bare date
/// through a UTC timestamp. Timestamps are reduced to the calendar date
/// of their own offset, and the remaining legacy format is re-serialized.
fn canonical_date(input: &str) -> Option<(String, NaiveDate)> {
    if input.len() == 10 {
        if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Some((input.to_string(), day));
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        let day = ts.naive_local().date();
        return Some((day.format("%Y-%m-%d").to_string(), day));
    }
    // Non-padded ISO dates and the US legacy format get re-serialized
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(day) = NaiveDate::parse_from_str(input, format) {
            return Some((day.format("%Y-%m-%d").to_string(), day));
        }
    }
    None
}
