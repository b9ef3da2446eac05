// ── Alarm state engine ──
//
// The one place alarm-status transitions happen. Three inputs move the
// state machine: sensor activation events, arming-mode changes, and
// image classification verdicts. Everything else in the system reads.
//
// State machine: NO_ALARM -> PENDING_ALARM -> ALARM. ALARM is sticky
// against sensor churn; it exits only via disarm or the
// "no cat + no active sensor" image rule.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{EngineConfig, ReactivationPolicy};
use crate::error::CoreError;
use crate::model::{AlarmStatus, ArmingStatus, Sensor};
use crate::store::SecurityRepository;
use haven_image::{ImageClassifier, ImageFrame};

/// Applies the alarm transition rules and persists the results.
///
/// Each public operation is a single critical section: read current
/// state, compute, write back. Callers on multiple threads serialize on
/// the internal lock, so every transition is computed from a consistent
/// snapshot of arming status + sensor set.
pub struct AlarmEngine {
    repository: Arc<dyn SecurityRepository>,
    classifier: Arc<dyn ImageClassifier>,
    config: EngineConfig,
    op_lock: Mutex<()>,
}

impl AlarmEngine {
    pub fn new(
        repository: Arc<dyn SecurityRepository>,
        classifier: Arc<dyn ImageClassifier>,
        config: EngineConfig,
    ) -> Self {
        Self {
            repository,
            classifier,
            config,
            op_lock: Mutex::new(()),
        }
    }

    // ── Event operations ─────────────────────────────────────────────

    /// Record a sensor activation or deactivation and apply the
    /// escalation rules.
    ///
    /// The sensor must already be registered; activation events for
    /// unknown sensors are rejected with [`CoreError::UnknownSensor`].
    /// While DISARMED the sensor flag still updates but the alarm status
    /// is never touched.
    pub fn change_sensor_activation(
        &self,
        sensor_id: &Uuid,
        active: bool,
    ) -> Result<(), CoreError> {
        let _guard = self.lock_ops();

        let mut sensor = self
            .repository
            .sensor(sensor_id)?
            .ok_or(CoreError::UnknownSensor { id: *sensor_id })?;

        let was_active = sensor.active;
        sensor.active = active;
        self.repository.upsert_sensor(sensor)?;

        let arming = self.repository.arming_status()?;
        if !arming.is_armed() {
            debug!(%sensor_id, active, "sensor event while disarmed -- alarm untouched");
            return Ok(());
        }

        let alarm = self.repository.alarm_status()?;
        if active {
            let fresh_edge = !was_active;
            if fresh_edge || self.config.reactivation == ReactivationPolicy::Escalate {
                self.escalate(alarm)?;
            } else {
                debug!(%sensor_id, "re-activation ignored by policy");
            }
        } else if was_active && alarm.is_pending() && !self.any_sensor_active()? {
            // Last active sensor went quiet before the pending alarm tripped.
            self.set_alarm(alarm, AlarmStatus::NoAlarm)?;
        }

        Ok(())
    }

    /// Change the arming mode.
    ///
    /// Arming (HOME or AWAY) force-deactivates every registered sensor;
    /// the reset alone never changes the alarm status. Disarming clears
    /// the alarm unconditionally and leaves sensors as they are.
    pub fn set_arming_status(&self, status: ArmingStatus) -> Result<(), CoreError> {
        let _guard = self.lock_ops();

        self.repository.set_arming_status(status)?;
        info!(%status, "arming status changed");

        if status.is_armed() {
            for mut sensor in self.repository.sensors()? {
                sensor.active = false;
                self.repository.upsert_sensor(sensor)?;
            }
        } else {
            let alarm = self.repository.alarm_status()?;
            self.set_alarm(alarm, AlarmStatus::NoAlarm)?;
        }

        Ok(())
    }

    /// Run a camera frame through the classifier and apply the cat rules.
    ///
    /// A cat while ARMED_HOME trips the alarm; no cat with every sensor
    /// quiet stands the alarm down. A cat while ARMED_AWAY deliberately
    /// has no effect.
    pub fn process_image(&self, image: &ImageFrame) -> Result<(), CoreError> {
        let _guard = self.lock_ops();

        let contains_cat = self
            .classifier
            .contains_cat(image, self.config.confidence_threshold)?;
        let arming = self.repository.arming_status()?;
        let alarm = self.repository.alarm_status()?;

        if contains_cat && arming == ArmingStatus::ArmedHome {
            self.set_alarm(alarm, AlarmStatus::Alarm)?;
        } else if !contains_cat && !self.any_sensor_active()? {
            self.set_alarm(alarm, AlarmStatus::NoAlarm)?;
        } else {
            debug!(contains_cat, %arming, "classification caused no transition");
        }

        Ok(())
    }

    // ── Read and registration passthroughs ───────────────────────────

    pub fn arming_status(&self) -> Result<ArmingStatus, CoreError> {
        Ok(self.repository.arming_status()?)
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus, CoreError> {
        Ok(self.repository.alarm_status()?)
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>, CoreError> {
        Ok(self.repository.sensors()?)
    }

    pub fn add_sensor(&self, sensor: Sensor) -> Result<(), CoreError> {
        let _guard = self.lock_ops();
        Ok(self.repository.upsert_sensor(sensor)?)
    }

    pub fn remove_sensor(&self, sensor_id: &Uuid) -> Result<Option<Sensor>, CoreError> {
        let _guard = self.lock_ops();
        Ok(self.repository.remove_sensor(sensor_id)?)
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn lock_ops(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned guard only means another operation panicked; the
        // repository still holds consistent state.
        self.op_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Activation escalation: NO_ALARM -> PENDING_ALARM -> ALARM.
    fn escalate(&self, current: AlarmStatus) -> Result<(), CoreError> {
        match current {
            AlarmStatus::NoAlarm => self.set_alarm(current, AlarmStatus::PendingAlarm),
            AlarmStatus::PendingAlarm => self.set_alarm(current, AlarmStatus::Alarm),
            // Already maximal; sensor churn while the alarm sounds is noise.
            AlarmStatus::Alarm => Ok(()),
        }
    }

    fn any_sensor_active(&self) -> Result<bool, CoreError> {
        Ok(self.repository.sensors()?.iter().any(|s| s.active))
    }

    fn set_alarm(&self, from: AlarmStatus, to: AlarmStatus) -> Result<(), CoreError> {
        self.repository.set_alarm_status(to)?;
        if from == to {
            debug!(%to, "alarm status rewritten unchanged");
        } else {
            info!(%from, %to, "alarm status changed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SensorKind;
    use crate::store::{MemoryRepository, StoreError};
    use haven_image::{ClassifierError, FakeClassifier};

    fn engine_with(
        classifier: FakeClassifier,
        config: EngineConfig,
    ) -> (AlarmEngine, Arc<MemoryRepository>) {
        let repo = Arc::new(MemoryRepository::new());
        let engine = AlarmEngine::new(repo.clone(), Arc::new(classifier), config);
        (engine, repo)
    }

    fn registered_sensor(engine: &AlarmEngine, name: &str, kind: SensorKind) -> Uuid {
        let sensor = Sensor::new(name, kind);
        let id = *sensor.id();
        engine.add_sensor(sensor).unwrap();
        id
    }

    #[test]
    fn unknown_sensor_is_rejected() {
        let (engine, _repo) = engine_with(FakeClassifier::always(false), EngineConfig::default());
        let missing = Uuid::new_v4();
        let err = engine.change_sensor_activation(&missing, true).unwrap_err();
        assert!(matches!(err, CoreError::UnknownSensor { id } if id == missing));
    }

    #[test]
    fn disarmed_sensor_events_update_the_flag_but_not_the_alarm() {
        let (engine, _repo) = engine_with(FakeClassifier::always(false), EngineConfig::default());
        let id = registered_sensor(&engine, "porch", SensorKind::Motion);

        engine.change_sensor_activation(&id, true).unwrap();
        assert_eq!(engine.alarm_status().unwrap(), AlarmStatus::NoAlarm);
        assert!(engine.sensors().unwrap()[0].active);
    }

    #[test]
    fn reactivation_policy_ignore_needs_a_fresh_edge() {
        let config = EngineConfig {
            reactivation: ReactivationPolicy::Ignore,
            ..EngineConfig::default()
        };
        let (engine, _repo) = engine_with(FakeClassifier::always(false), config);
        let id = registered_sensor(&engine, "porch", SensorKind::Motion);
        engine.set_arming_status(ArmingStatus::ArmedAway).unwrap();

        engine.change_sensor_activation(&id, true).unwrap();
        assert_eq!(engine.alarm_status().unwrap(), AlarmStatus::PendingAlarm);

        // Same sensor again: already active, so no escalation to ALARM.
        engine.change_sensor_activation(&id, true).unwrap();
        assert_eq!(engine.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
    }

    #[test]
    fn reactivation_policy_escalate_retriggers() {
        let (engine, _repo) = engine_with(FakeClassifier::always(false), EngineConfig::default());
        let id = registered_sensor(&engine, "porch", SensorKind::Motion);
        engine.set_arming_status(ArmingStatus::ArmedAway).unwrap();

        engine.change_sensor_activation(&id, true).unwrap();
        engine.change_sensor_activation(&id, true).unwrap();
        assert_eq!(engine.alarm_status().unwrap(), AlarmStatus::Alarm);
    }

    #[test]
    fn deactivating_an_inactive_sensor_never_touches_the_alarm() {
        let (engine, repo) = engine_with(FakeClassifier::always(false), EngineConfig::default());
        let quiet = registered_sensor(&engine, "window", SensorKind::Window);
        let tripped = registered_sensor(&engine, "door", SensorKind::Door);
        engine.set_arming_status(ArmingStatus::ArmedHome).unwrap();
        engine.change_sensor_activation(&tripped, true).unwrap();
        assert_eq!(engine.alarm_status().unwrap(), AlarmStatus::PendingAlarm);

        // `quiet` is already inactive; the pending alarm must survive even
        // though another sensor is still active.
        engine.change_sensor_activation(&quiet, false).unwrap();
        assert_eq!(repo.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
    }

    #[test]
    fn classifier_failure_propagates() {
        struct BrokenClassifier;
        impl ImageClassifier for BrokenClassifier {
            fn contains_cat(
                &self,
                _image: &ImageFrame,
                _confidence_threshold: f32,
            ) -> Result<bool, ClassifierError> {
                Err(ClassifierError::Backend {
                    message: "model not loaded".into(),
                })
            }
        }

        let repo = Arc::new(MemoryRepository::new());
        let engine = AlarmEngine::new(repo, Arc::new(BrokenClassifier), EngineConfig::default());
        let err = engine.process_image(&ImageFrame::empty()).unwrap_err();
        assert!(matches!(err, CoreError::Classifier(_)));
    }

    #[test]
    fn repository_failure_propagates() {
        struct BrokenRepository;
        impl SecurityRepository for BrokenRepository {
            fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
                Err(StoreError::Backend {
                    message: "disk gone".into(),
                })
            }
            fn set_arming_status(&self, _status: ArmingStatus) -> Result<(), StoreError> {
                Err(StoreError::Backend {
                    message: "disk gone".into(),
                })
            }
            fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
                Err(StoreError::Backend {
                    message: "disk gone".into(),
                })
            }
            fn set_alarm_status(&self, _status: AlarmStatus) -> Result<(), StoreError> {
                Err(StoreError::Backend {
                    message: "disk gone".into(),
                })
            }
            fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
                Err(StoreError::Backend {
                    message: "disk gone".into(),
                })
            }
            fn sensor(&self, _id: &Uuid) -> Result<Option<Sensor>, StoreError> {
                Err(StoreError::Backend {
                    message: "disk gone".into(),
                })
            }
            fn upsert_sensor(&self, _sensor: Sensor) -> Result<(), StoreError> {
                Err(StoreError::Backend {
                    message: "disk gone".into(),
                })
            }
            fn remove_sensor(&self, _id: &Uuid) -> Result<Option<Sensor>, StoreError> {
                Err(StoreError::Backend {
                    message: "disk gone".into(),
                })
            }
        }

        let engine = AlarmEngine::new(
            Arc::new(BrokenRepository),
            Arc::new(FakeClassifier::always(false)),
            EngineConfig::default(),
        );
        let err = engine
            .set_arming_status(ArmingStatus::ArmedHome)
            .unwrap_err();
        assert!(matches!(err, CoreError::Store(_)));
    }
}
