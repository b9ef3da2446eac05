// haven-image: the image-classification boundary of the haven engine.
//
// The security core never inspects pixels. It hands an opaque `ImageFrame`
// to an `ImageClassifier` and gets back a single verdict: does this frame
// contain a cat, above a confidence threshold. Real detectors (ML models,
// cloud vision APIs) live behind the same trait.

pub mod classifier;
pub mod frame;

pub use classifier::{ClassifierError, FakeClassifier, ImageClassifier};
pub use frame::ImageFrame;
