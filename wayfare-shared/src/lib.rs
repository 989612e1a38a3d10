pub mod models;

pub use models::{PackageRef, PackageType, TimeSlot};
