pub mod openai;
pub mod vision;

pub use openai::OpenAiClassifier;
pub use vision::{ClassifierError, VisionClassifier};
