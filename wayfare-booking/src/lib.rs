pub mod cart;
pub mod models;
pub mod normalize;
pub mod totals;
pub mod validator;

pub use cart::CartValidator;
pub use models::{CartItem, RawCartItem, SlotVerdict};
pub use normalize::{normalize, MissingBookingInfo};
pub use totals::{CartTotals, ChargeRules, PricedItem};
pub use validator::SlotValidator;
