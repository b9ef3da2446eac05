// ── Core error types ──
//
// User-facing errors from haven-core. Collaborator failures (repository,
// classifier) pass through unchanged -- absorbing one would leave the
// persisted alarm status out of sync with what the rules computed.

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;
use haven_image::ClassifierError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An operation referenced a sensor the repository does not hold.
    /// Registration is a deliberate act (`add_sensor`); activation events
    /// for unregistered sensors are a caller error, never auto-registered.
    #[error("Unknown sensor: {id}")]
    UnknownSensor { id: Uuid },

    /// The repository collaborator failed.
    #[error("Repository error: {0}")]
    Store(#[from] StoreError),

    /// The image classifier collaborator failed.
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),
}
