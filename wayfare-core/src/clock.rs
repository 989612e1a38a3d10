use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trusted source of the current time, independent of any client clock
#[async_trait]
pub trait ClockSource: Send + Sync {
    /// Resolve the authoritative current instant
    async fn now(&self) -> Result<DateTime<Utc>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Reads the host clock. Used when no remote time service is configured.
pub struct SystemClock;

#[async_trait]
impl ClockSource for SystemClock {
    async fn now(&self) -> Result<DateTime<Utc>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Utc::now())
    }
}

/// Clock pinned to a fixed instant, for tests
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

#[async_trait]
impl ClockSource for FixedClock {
    async fn now(&self) -> Result<DateTime<Utc>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.instant)
    }
}

/// Clock that always fails, for exercising the degraded local-time path
pub struct UnavailableClock;

#[async_trait]
impl ClockSource for UnavailableClock {
    async fn now(&self) -> Result<DateTime<Utc>, Box<dyn std::error::Error + Send + Sync>> {
        Err("time service unreachable".into())
    }
}
