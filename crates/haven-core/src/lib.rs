// haven-core: alarm-state engine between sensor/camera inputs and consumers.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{EngineConfig, ReactivationPolicy};
pub use engine::AlarmEngine;
pub use error::CoreError;
pub use store::{MemoryRepository, SecurityRepository, StoreError};

// Re-export model types at the crate root for ergonomics.
pub use model::{AlarmStatus, ArmingStatus, Sensor, SensorKind};
