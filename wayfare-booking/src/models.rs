use serde::{Deserialize, Serialize};
use wayfare_shared::{PackageRef, PackageType};

/// Outcome of checking one booking request against current inventory.
/// Exactly one of `is_valid` or a failure reason (`is_expired`,
/// `is_full`, or a generic invalid condition) holds; callers render
/// their UI state from this tuple alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotVerdict {
    pub is_valid: bool,
    #[serde(default)]
    pub is_expired: bool,
    #[serde(default)]
    pub is_full: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_slots: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_capacity: Option<u32>,
}

impl SlotVerdict {
    /// Request can be honored against the current snapshot
    pub fn available(available: u32, capacity: u32) -> Self {
        Self {
            is_valid: true,
            is_expired: false,
            is_full: false,
            message: "Slot available".to_string(),
            available_slots: Some(available),
            total_capacity: Some(capacity),
        }
    }

    /// Structural or not-found failure, resolved without capacity data
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            is_expired: false,
            is_full: false,
            message: message.into(),
            available_slots: None,
            total_capacity: None,
        }
    }

    /// Requested date lies strictly before the authoritative current day
    pub fn expired() -> Self {
        Self {
            is_valid: false,
            is_expired: true,
            is_full: false,
            message: "Date has expired".to_string(),
            available_slots: None,
            total_capacity: None,
        }
    }

    /// Slot exists but cannot seat the requested party
    pub fn full(available: u32, capacity: u32) -> Self {
        let message = if available == 0 {
            "Time slot is fully booked".to_string()
        } else {
            format!("Only {} spots available", available)
        };
        Self {
            is_valid: false,
            is_expired: false,
            is_full: true,
            message,
            available_slots: Some(available),
            total_capacity: Some(capacity),
        }
    }

    /// Transport or parse failure from the inventory lookup
    pub fn failure(err: impl std::fmt::Display) -> Self {
        Self::invalid(format!("Validation error: {}", err))
    }
}

/// Cart line as produced by the upstream cart services. Two producer
/// generations use different field names for date and time, and party
/// size arrives either directly or split into adults and children.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCartItem {
    pub id: String,
    pub package_type: PackageType,
    #[serde(default)]
    pub package_id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub selected_date: Option<String>,
    #[serde(default)]
    pub selected_time: Option<String>,
    #[serde(default)]
    pub guests: Option<u32>,
    #[serde(default)]
    pub adults: Option<u32>,
    #[serde(default)]
    pub children: Option<u32>,
}

/// Canonical validation input, produced by `normalize`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: String,
    pub package: PackageRef,
    pub date: String,
    pub time: String,
    pub guests: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_wire_shape() {
        let verdict = SlotVerdict::available(2, 10);
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["isValid"], true);
        assert_eq!(json["availableSlots"], 2);
        assert_eq!(json["totalCapacity"], 10);
        assert_eq!(json["message"], "Slot available");
    }

    #[test]
    fn test_capacity_fields_omitted_when_unknown() {
        let json = serde_json::to_value(SlotVerdict::expired()).unwrap();
        assert_eq!(json["isExpired"], true);
        assert!(json.get("availableSlots").is_none());
        assert!(json.get("totalCapacity").is_none());
    }

    #[test]
    fn test_full_message_switches_on_remaining() {
        assert_eq!(SlotVerdict::full(0, 5).message, "Time slot is fully booked");
        assert_eq!(SlotVerdict::full(2, 10).message, "Only 2 spots available");
    }

    #[test]
    fn test_failure_embeds_error_text() {
        let verdict = SlotVerdict::failure("connection refused");
        assert!(!verdict.is_valid);
        assert!(!verdict.is_expired);
        assert!(!verdict.is_full);
        assert!(verdict.message.contains("connection refused"));
    }

    #[test]
    fn test_raw_item_accepts_both_producer_shapes() {
        let legacy: RawCartItem = serde_json::from_str(
            r#"{"id":"a","packageType":"tour","packageId":"x","selectedDate":"2025-06-15","selectedTime":"09:00","adults":2,"children":1}"#,
        )
        .unwrap();
        assert_eq!(legacy.selected_date.as_deref(), Some("2025-06-15"));
        assert_eq!(legacy.adults, Some(2));

        let current: RawCartItem = serde_json::from_str(
            r#"{"id":"b","packageType":"transfer","packageId":"y","date":"2025-06-15","time":"10:00","guests":3}"#,
        )
        .unwrap();
        assert_eq!(current.guests, Some(3));
    }
}
