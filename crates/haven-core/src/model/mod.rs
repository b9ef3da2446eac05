// ── Domain model ──
//
// The three things the engine reasons about: sensors, the arming mode,
// and the current alarm escalation level.

pub mod sensor;
pub mod status;

pub use sensor::{Sensor, SensorKind};
pub use status::{AlarmStatus, ArmingStatus};
