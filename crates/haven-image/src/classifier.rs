// ── Classifier trait and the fake stand-in ──

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::frame::ImageFrame;

/// Failure surface of an image classifier.
///
/// Real backends fail in backend-specific ways (model not loaded, RPC
/// refused, malformed frame); they all surface here so the security core
/// can propagate a single collaborator error.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The frame could not be interpreted by this backend.
    #[error("Unsupported frame: {reason}")]
    UnsupportedFrame { reason: String },

    /// The detector backend failed (model crash, remote call, ...).
    #[error("Classifier backend error: {message}")]
    Backend { message: String },
}

/// Judges whether an image contains a cat above a confidence threshold.
///
/// The detection algorithm is entirely the implementor's business; the
/// security core only ever calls this one method. Implementations must be
/// safe to share across threads.
pub trait ImageClassifier: Send + Sync {
    fn contains_cat(
        &self,
        image: &ImageFrame,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError>;
}

enum FakeMode {
    /// Always return the same verdict.
    Fixed(bool),
    /// Coin-flip verdicts from a seeded generator.
    Random(Mutex<StdRng>),
}

/// Stand-in for a real detector.
///
/// Guesses at random like the placeholder service it replaces, but from a
/// caller-supplied seed so a test run is reproducible. Tests that need a
/// known verdict use [`FakeClassifier::always`] instead.
pub struct FakeClassifier {
    mode: FakeMode,
}

impl FakeClassifier {
    /// Random verdicts from the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            mode: FakeMode::Random(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    /// Fixed verdict, regardless of input.
    pub fn always(contains_cat: bool) -> Self {
        Self {
            mode: FakeMode::Fixed(contains_cat),
        }
    }
}

impl ImageClassifier for FakeClassifier {
    fn contains_cat(
        &self,
        image: &ImageFrame,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError> {
        let verdict = match &self.mode {
            FakeMode::Fixed(v) => *v,
            FakeMode::Random(rng) => {
                let mut rng = rng.lock().map_err(|_| ClassifierError::Backend {
                    message: "fake classifier rng poisoned".into(),
                })?;
                rng.gen_bool(0.5)
            }
        };
        debug!(
            width = image.width(),
            height = image.height(),
            confidence_threshold,
            verdict,
            "fake classification"
        );
        Ok(verdict)
    }
}
