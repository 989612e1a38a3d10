use serde::{Deserialize, Serialize};
use std::fmt;

/// Bookable product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Tour,
    Transfer,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Tour => "tour",
            PackageType::Transfer => "transfer",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies a bookable product in the upstream catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRef {
    pub package_type: PackageType,
    pub package_id: String,
}

/// One departure for a package on a specific date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub time: String,
    pub capacity: i32,
    pub booked_count: i32,
}

impl TimeSlot {
    /// Seats still open for sale. Negative if the inventory service
    /// oversold; callers clamp for display.
    pub fn available(&self) -> i32 {
        self.capacity - self.booked_count
    }
}
