// ── Sensor domain types ──

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use strum::Display;
use uuid::Uuid;

/// Physical sensor category. Closed set -- the rules never branch on it,
/// but consumers group and label sensors by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorKind {
    Door,
    Window,
    Motion,
}

/// A binary detector: a door contact, window contact, or motion sensor.
///
/// Human-facing identity is (name, kind); the generated `id` is the
/// repository key, so two sensors may share a name without colliding.
/// Equality and hashing go by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    id: Uuid,
    pub name: String,
    pub kind: SensorKind,
    pub active: bool,
}

impl Sensor {
    /// New inactive sensor with a fresh id.
    pub fn new(name: impl Into<String>, kind: SensorKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            active: false,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
