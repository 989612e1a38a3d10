use std::sync::Arc;
use wayfare_booking::{CartValidator, ChargeRules, SlotValidator};

#[derive(Clone)]
pub struct AppState {
    pub slots: Arc<SlotValidator>,
    pub cart: Arc<CartValidator>,
    pub rules: ChargeRules,
}
