// ── Security state repository ──
//
// The engine reads and writes alarm state through this seam. The memory
// backend below is the default; a persistent backend implements the same
// trait and the engine never knows the difference.

pub mod memory;

use thiserror::Error;
use uuid::Uuid;

use crate::model::{AlarmStatus, ArmingStatus, Sensor};

pub use memory::MemoryRepository;

/// Failure surface of a repository backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persistence backend failed (disk, database, ...).
    #[error("Repository backend error: {message}")]
    Backend { message: String },
}

/// Holds the security monitor's state: the arming mode, the alarm
/// escalation level, and the registered sensor set.
///
/// Every method is fallible: persistent backends have I/O failure modes,
/// and the engine must surface them rather than guess at state.
pub trait SecurityRepository: Send + Sync {
    fn arming_status(&self) -> Result<ArmingStatus, StoreError>;
    fn set_arming_status(&self, status: ArmingStatus) -> Result<(), StoreError>;

    fn alarm_status(&self) -> Result<AlarmStatus, StoreError>;
    fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), StoreError>;

    /// Snapshot of every registered sensor.
    fn sensors(&self) -> Result<Vec<Sensor>, StoreError>;
    fn sensor(&self, id: &Uuid) -> Result<Option<Sensor>, StoreError>;
    /// Insert or replace a sensor keyed by its id.
    fn upsert_sensor(&self, sensor: Sensor) -> Result<(), StoreError>;
    /// Remove a sensor; returns it if it was registered.
    fn remove_sensor(&self, id: &Uuid) -> Result<Option<Sensor>, StoreError>;
}
