use crate::models::{CartItem, RawCartItem};
use wayfare_shared::PackageRef;

/// A required booking field could not be resolved from any accepted shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing booking information")]
pub struct MissingBookingInfo {
    pub field: &'static str,
}

/// Resolve a raw cart line into the canonical validation input.
///
/// Field resolution, one row per canonical field:
///
///   date   <- `date`, else `selectedDate`
///   time   <- `time`, else `selectedTime`
///   guests <- `guests`, else `adults` + `children` (children default 0)
///
/// Empty strings count as absent, matching the upstream producers.
/// A missing package id, date, or time fails here, before any network
/// call; party-size bounds are the validator's concern.
pub fn normalize(raw: &RawCartItem) -> Result<CartItem, MissingBookingInfo> {
    let package_id = raw
        .package_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(MissingBookingInfo { field: "packageId" })?;
    let date = resolve(&raw.date, &raw.selected_date).ok_or(MissingBookingInfo { field: "date" })?;
    let time = resolve(&raw.time, &raw.selected_time).ok_or(MissingBookingInfo { field: "time" })?;
    let guests = raw
        .guests
        .unwrap_or_else(|| raw.adults.unwrap_or(0) + raw.children.unwrap_or(0));

    Ok(CartItem {
        id: raw.id.clone(),
        package: PackageRef {
            package_type: raw.package_type,
            package_id: package_id.to_string(),
        },
        date,
        time,
        guests,
    })
}

fn resolve(primary: &Option<String>, legacy: &Option<String>) -> Option<String> {
    primary
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| legacy.as_deref().filter(|s| !s.is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfare_shared::PackageType;

    fn raw() -> RawCartItem {
        RawCartItem {
            id: "item-1".to_string(),
            package_type: PackageType::Tour,
            package_id: Some("66b2f0c4a1d2e3f4a5b6c7d8".to_string()),
            date: Some("2025-06-15".to_string()),
            time: Some("09:00".to_string()),
            selected_date: None,
            selected_time: None,
            guests: Some(2),
            adults: None,
            children: None,
        }
    }

    #[test]
    fn test_current_shape_resolves() {
        let item = normalize(&raw()).unwrap();
        assert_eq!(item.date, "2025-06-15");
        assert_eq!(item.time, "09:00");
        assert_eq!(item.guests, 2);
    }

    #[test]
    fn test_legacy_shape_resolves() {
        let mut input = raw();
        input.date = None;
        input.time = None;
        input.selected_date = Some("2025-07-01".to_string());
        input.selected_time = Some("14:00".to_string());
        input.guests = None;
        input.adults = Some(2);
        input.children = Some(1);

        let item = normalize(&input).unwrap();
        assert_eq!(item.date, "2025-07-01");
        assert_eq!(item.time, "14:00");
        assert_eq!(item.guests, 3);
    }

    #[test]
    fn test_primary_wins_over_legacy() {
        let mut input = raw();
        input.selected_date = Some("1999-01-01".to_string());
        assert_eq!(normalize(&input).unwrap().date, "2025-06-15");
    }

    #[test]
    fn test_empty_string_falls_through_to_legacy() {
        let mut input = raw();
        input.date = Some(String::new());
        input.selected_date = Some("2025-07-01".to_string());
        assert_eq!(normalize(&input).unwrap().date, "2025-07-01");
    }

    #[test]
    fn test_adults_only_resolves_guests() {
        let mut input = raw();
        input.guests = None;
        input.adults = Some(4);
        assert_eq!(normalize(&input).unwrap().guests, 4);
    }

    #[test]
    fn test_missing_date_is_structural() {
        let mut input = raw();
        input.date = None;
        let err = normalize(&input).unwrap_err();
        assert_eq!(err.field, "date");
        assert_eq!(err.to_string(), "Missing booking information");
    }

    #[test]
    fn test_missing_package_id_is_structural() {
        let mut input = raw();
        input.package_id = None;
        assert_eq!(normalize(&input).unwrap_err().field, "packageId");
    }

    #[test]
    fn test_absent_party_size_resolves_to_zero() {
        // Zero guests passes normalization; the validator rejects it
        // as invalid input without touching the network.
        let mut input = raw();
        input.guests = None;
        assert_eq!(normalize(&input).unwrap().guests, 0);
    }
}
