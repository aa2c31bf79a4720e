//! Caafiye — deterministic core of a guided symptom-triage assessant.
//!
//! Patient answers go in; a schema-complete feature vector goes out to an
//! externally trained classifier; the raw class label comes back as a
//! localized, tiered recommendation with advice. Questionnaire rendering,
//! model training, and record persistence all live outside this crate.

pub mod assessment;
pub mod classifier;
pub mod config;
pub mod derived;
pub mod localize;
pub mod normalize;
pub mod payload;
pub mod schema;
pub mod symptoms;
pub mod tokens;

pub use assessment::{assess, AssessmentError, AssessmentRequest};
#[cfg(feature = "onnx-model")]
pub use classifier::OnnxClassifier;
pub use classifier::{Classifier, ClassifierError, LabelDecoder, MockClassifier, RawPrediction};
pub use localize::{SeverityTier, TriageResult};
pub use normalize::{FeatureValue, FeatureVector};
pub use payload::{AnswerPayload, AnswerValue};
pub use schema::FeatureSchema;
pub use symptoms::{FollowUp, SymptomGroup, UnknownSymptomGroup};
pub use tokens::{MappedToken, WidgetKind};
