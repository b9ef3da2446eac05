// ── Engine configuration ──
//
// Built by the embedding application and handed to `AlarmEngine` --
// the core never reads config files.

use serde::{Deserialize, Serialize};

/// What to do when an activation event arrives for a sensor that is
/// already active.
///
/// The original system's behavior here was ambiguous, so it is explicit
/// configuration rather than a silent choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReactivationPolicy {
    /// Treat it as a fresh activation and run the escalation rule again.
    /// A sensor re-tripping while PENDING_ALARM escalates to ALARM.
    #[default]
    Escalate,
    /// Ignore it; only inactive-to-active edges escalate. For capture
    /// layers that re-send the current level instead of edges.
    Ignore,
}

/// Tuning for a single [`crate::AlarmEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Confidence threshold (percent) passed to the classifier.
    pub confidence_threshold: f32,
    /// Handling of activation events for already-active sensors.
    pub reactivation: ReactivationPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 50.0,
            reactivation: ReactivationPolicy::Escalate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_behavior() {
        let config = EngineConfig::default();
        assert!((config.confidence_threshold - 50.0).abs() < f32::EPSILON);
        assert_eq!(config.reactivation, ReactivationPolicy::Escalate);
    }
}
