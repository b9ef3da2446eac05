// ── In-memory repository ──
//
// Thread-safe storage for the security state. Status values live in
// `watch` channels so layers outside the core (panels, notifiers) can
// subscribe to changes without the engine knowing they exist.

use dashmap::DashMap;
use tokio::sync::watch;
use uuid::Uuid;

use super::{SecurityRepository, StoreError};
use crate::model::{AlarmStatus, ArmingStatus, Sensor};

/// Default [`SecurityRepository`] backend.
///
/// Sensors in a `DashMap` keyed by id; arming and alarm status behind
/// `watch` senders. Reads are snapshots, writes broadcast to subscribers
/// via `send_modify` (which updates even with zero receivers).
pub struct MemoryRepository {
    sensors: DashMap<Uuid, Sensor>,
    arming: watch::Sender<ArmingStatus>,
    alarm: watch::Sender<AlarmStatus>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        let (arming, _) = watch::channel(ArmingStatus::default());
        let (alarm, _) = watch::channel(AlarmStatus::default());

        Self {
            sensors: DashMap::new(),
            arming,
            alarm,
        }
    }

    /// Subscribe to alarm-status changes.
    pub fn subscribe_alarm(&self) -> watch::Receiver<AlarmStatus> {
        self.alarm.subscribe()
    }

    /// Subscribe to arming-status changes.
    pub fn subscribe_arming(&self) -> watch::Receiver<ArmingStatus> {
        self.arming.subscribe()
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityRepository for MemoryRepository {
    fn arming_status(&self) -> Result<ArmingStatus, StoreError> {
        Ok(*self.arming.borrow())
    }

    fn set_arming_status(&self, status: ArmingStatus) -> Result<(), StoreError> {
        self.arming.send_modify(|current| *current = status);
        Ok(())
    }

    fn alarm_status(&self) -> Result<AlarmStatus, StoreError> {
        Ok(*self.alarm.borrow())
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), StoreError> {
        self.alarm.send_modify(|current| *current = status);
        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>, StoreError> {
        Ok(self.sensors.iter().map(|r| r.value().clone()).collect())
    }

    fn sensor(&self, id: &Uuid) -> Result<Option<Sensor>, StoreError> {
        Ok(self.sensors.get(id).map(|r| r.value().clone()))
    }

    fn upsert_sensor(&self, sensor: Sensor) -> Result<(), StoreError> {
        self.sensors.insert(*sensor.id(), sensor);
        Ok(())
    }

    fn remove_sensor(&self, id: &Uuid) -> Result<Option<Sensor>, StoreError> {
        Ok(self.sensors.remove(id).map(|(_, sensor)| sensor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SensorKind;

    #[test]
    fn statuses_start_quiet() {
        let repo = MemoryRepository::new();
        assert_eq!(repo.arming_status().unwrap(), ArmingStatus::Disarmed);
        assert_eq!(repo.alarm_status().unwrap(), AlarmStatus::NoAlarm);
    }

    #[test]
    fn upsert_then_lookup_and_remove() {
        let repo = MemoryRepository::new();
        let sensor = Sensor::new("back door", SensorKind::Door);
        let id = *sensor.id();

        repo.upsert_sensor(sensor.clone()).unwrap();
        assert_eq!(repo.sensor_count(), 1);
        assert_eq!(repo.sensor(&id).unwrap(), Some(sensor.clone()));

        let removed = repo.remove_sensor(&id).unwrap();
        assert_eq!(removed, Some(sensor));
        assert_eq!(repo.sensor_count(), 0);
        assert_eq!(repo.sensor(&id).unwrap(), None);
    }

    #[test]
    fn upsert_replaces_by_id() {
        let repo = MemoryRepository::new();
        let mut sensor = Sensor::new("garage", SensorKind::Motion);
        repo.upsert_sensor(sensor.clone()).unwrap();

        sensor.active = true;
        repo.upsert_sensor(sensor.clone()).unwrap();

        assert_eq!(repo.sensor_count(), 1);
        assert!(repo.sensor(sensor.id()).unwrap().unwrap().active);
    }

    #[test]
    fn alarm_subscription_sees_writes() {
        let repo = MemoryRepository::new();
        let rx = repo.subscribe_alarm();
        repo.set_alarm_status(AlarmStatus::PendingAlarm).unwrap();
        assert_eq!(*rx.borrow(), AlarmStatus::PendingAlarm);
    }
}
