use serde::{Deserialize, Serialize};

/// Rates applied on top of the item subtotal, from business configuration
#[derive(Debug, Clone, Copy)]
pub struct ChargeRules {
    pub tax_rate: f64,
    pub booking_fee_rate: f64,
}

/// Priced cart line, amounts in minor units
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    pub unit_price: i64,
    pub guests: u32,
}

/// Price lines for a cart, amounts in minor units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal: i64,
    pub booking_fee: i64,
    pub tax: i64,
    pub total: i64,
}

impl CartTotals {
    /// Fold per-item prices into subtotal, surcharge, and tax lines.
    /// Each rate line rounds to the nearest minor unit independently.
    pub fn compute(items: &[PricedItem], rules: &ChargeRules) -> Self {
        let subtotal: i64 = items
            .iter()
            .map(|item| item.unit_price * i64::from(item.guests))
            .sum();
        let booking_fee = apply_rate(subtotal, rules.booking_fee_rate);
        let tax = apply_rate(subtotal, rules.tax_rate);
        Self {
            subtotal,
            booking_fee,
            tax,
            total: subtotal + booking_fee + tax,
        }
    }
}

fn apply_rate(amount: i64, rate: f64) -> i64 {
    (amount as f64 * rate).round() as i64
}
