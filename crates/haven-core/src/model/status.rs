// ── Arming and alarm status types ──

use serde::{Deserialize, Serialize};
use strum::Display;

/// Whether the system is disarmed or armed in a given mode.
///
/// A single process-wide value, held by the repository. Changing it goes
/// through [`crate::AlarmEngine::set_arming_status`] so the side effects
/// (sensor reset on arm, alarm clear on disarm) always apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ArmingStatus {
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    pub fn is_armed(&self) -> bool {
        matches!(self, Self::ArmedHome | Self::ArmedAway)
    }
}

impl Default for ArmingStatus {
    fn default() -> Self {
        Self::Disarmed
    }
}

/// Current escalation level of the alarm.
///
/// Transitions happen only through the engine's rules -- callers other
/// than the engine never write this directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AlarmStatus {
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    /// One sensor activation away from a full alarm.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PendingAlarm)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Alarm)
    }
}

impl Default for AlarmStatus {
    fn default() -> Self {
        Self::NoAlarm
    }
}
