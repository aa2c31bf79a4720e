//! Classifier boundary — the externally-trained triage model behind a
//! trait, plus best-effort decoding of its raw output back to the
//! training-time label strings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::FeatureVector;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Model artifact not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("Model initialization failed: {0}")]
    ModelInit(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Raw model output before decoding: pipelines exported with a label
/// encoder emit a class index, others emit the label directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrediction {
    ClassIndex(i64),
    Label(String),
}

/// The pre-trained triage model. Opaque: trained and versioned outside
/// this crate, consuming the schema-ordered feature vector.
pub trait Classifier: Send + Sync {
    fn predict(&self, input: &FeatureVector) -> Result<RawPrediction, ClassifierError>;
}

// ─── Label decoding ──────────────────────────────────────────────────────────

/// Reverse mapping from encoded class index to training label.
///
/// The class table is optional, mirroring the optional label-encoder
/// artifact: without one, decoding degrades to the stringified raw output.
#[derive(Debug, Clone, Default)]
pub struct LabelDecoder {
    classes: Option<Vec<String>>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self {
            classes: Some(classes),
        }
    }

    /// Decoder with no class table.
    pub fn none() -> Self {
        Self { classes: None }
    }

    /// Best-effort load of a `classes.json` class list. A missing or
    /// malformed file yields the table-less decoder, never an error.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    "label classes unreadable at {}: {e}; decoding will stringify raw output",
                    path.display()
                );
                return Self::none();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(classes) => {
                tracing::info!("label decoder loaded {} classes", classes.len());
                Self::new(classes)
            }
            Err(e) => {
                tracing::warn!(
                    "label classes malformed at {}: {e}; decoding will stringify raw output",
                    path.display()
                );
                Self::none()
            }
        }
    }

    /// Decode a raw prediction to its training label. Never fails: an
    /// unknown index or absent table yields the stringified raw output.
    pub fn decode(&self, raw: &RawPrediction) -> String {
        match raw {
            RawPrediction::Label(label) => label.clone(),
            RawPrediction::ClassIndex(index) => {
                if let Some(classes) = &self.classes {
                    if let Ok(i) = usize::try_from(*index) {
                        if let Some(label) = classes.get(i) {
                            return label.clone();
                        }
                    }
                    tracing::warn!("class index {index} outside decoder table; using raw value");
                }
                index.to_string()
            }
        }
    }
}

// ─── Mock classifier ─────────────────────────────────────────────────────────

/// Deterministic classifier for tests and wiring without a model artifact.
pub struct MockClassifier {
    output: RawPrediction,
}

impl MockClassifier {
    pub fn returning(output: RawPrediction) -> Self {
        Self { output }
    }
}

impl Classifier for MockClassifier {
    fn predict(&self, _input: &FeatureVector) -> Result<RawPrediction, ClassifierError> {
        Ok(self.output.clone())
    }
}

// ═══════════════════════════════════════════════════════════
// ONNX classifier — behind `onnx-model` feature
// ═══════════════════════════════════════════════════════════

#[cfg(feature = "onnx-model")]
mod onnx {
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex;

    use ort::session::Session;

    use super::{Classifier, ClassifierError, RawPrediction};
    use crate::normalize::{FeatureValue, FeatureVector};

    /// Encoded value for a slot with no usable data.
    const MISSING_ORDINAL: f32 = -1.0;

    /// Tabular triage model exported to ONNX with ordinal-encoded
    /// categoricals.
    ///
    /// Requires two files in the model directory:
    /// - `model.onnx` — the exported pipeline weights
    /// - `encoders.json` — per-feature token→ordinal tables written at
    ///   export time
    ///
    /// Uses interior mutability (Mutex) because ort::Session::run requires
    /// `&mut self` but the Classifier trait exposes `&self` for ergonomic
    /// shared usage.
    pub struct OnnxClassifier {
        session: Mutex<Session>,
        encoders: HashMap<String, HashMap<String, f32>>,
    }

    impl OnnxClassifier {
        /// Load the exported model from a directory.
        ///
        /// `model_dir` must contain `model.onnx` and `encoders.json`.
        pub fn load(model_dir: &Path) -> Result<Self, ClassifierError> {
            let model_path = model_dir.join("model.onnx");
            let encoders_path = model_dir.join("encoders.json");

            if !model_path.exists() {
                return Err(ClassifierError::ModelNotFound(model_path));
            }
            if !encoders_path.exists() {
                return Err(ClassifierError::ModelNotFound(encoders_path));
            }

            let session = Session::builder()
                .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
                .with_intra_threads(2)
                .map_err(|e: ort::Error| ClassifierError::ModelInit(e.to_string()))?
                .commit_from_file(&model_path)
                .map_err(|e: ort::Error| {
                    ClassifierError::ModelInit(format!("ONNX load failed: {e}"))
                })?;

            let encoders_json = std::fs::read_to_string(&encoders_path)
                .map_err(|e| ClassifierError::ModelInit(format!("encoders.json read: {e}")))?;
            let encoders = serde_json::from_str(&encoders_json)
                .map_err(|e| ClassifierError::ModelInit(format!("encoders.json parse: {e}")))?;

            tracing::info!("ONNX triage model loaded from {}", model_dir.display());

            Ok(Self {
                session: Mutex::new(session),
                encoders,
            })
        }

        /// Encode one row: ordinals for known tokens, MISSING_ORDINAL for
        /// missing slots and tokens absent from the export-time tables.
        fn encode(&self, input: &FeatureVector) -> Vec<f32> {
            input
                .cells()
                .iter()
                .map(|cell| match &cell.value {
                    FeatureValue::Number(n) => *n as f32,
                    FeatureValue::Text(token) => self
                        .encoders
                        .get(&cell.name)
                        .and_then(|table| table.get(token.as_str()))
                        .copied()
                        .unwrap_or(MISSING_ORDINAL),
                    FeatureValue::Missing => MISSING_ORDINAL,
                })
                .collect()
        }
    }

    impl Classifier for OnnxClassifier {
        fn predict(&self, input: &FeatureVector) -> Result<RawPrediction, ClassifierError> {
            use ort::value::TensorRef;

            let row = self.encode(input);
            let width = row.len();
            let array = ndarray::Array2::from_shape_vec((1, width), row)
                .map_err(|e| ClassifierError::Inference(e.to_string()))?;
            let tensor = TensorRef::from_array_view(&array)
                .map_err(|e| ClassifierError::Inference(e.to_string()))?;

            let mut session = self
                .session
                .lock()
                .map_err(|_| ClassifierError::Inference("Session lock poisoned".to_string()))?;

            let outputs = session
                .run(ort::inputs![tensor])
                .map_err(|e| ClassifierError::Inference(format!("ONNX inference failed: {e}")))?;

            let (shape, scores) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| ClassifierError::Inference(format!("Output extraction: {e}")))?;

            // Output shape: [1, n_classes] — argmax to the encoded index.
            if shape.len() != 2 || shape[0] != 1 {
                return Err(ClassifierError::Inference(format!(
                    "Unexpected output shape: {shape:?}"
                )));
            }

            let best = scores
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(i, _)| i as i64)
                .ok_or_else(|| ClassifierError::Inference("Empty score vector".to_string()))?;

            Ok(RawPrediction::ClassIndex(best))
        }
    }
}

#[cfg(feature = "onnx-model")]
pub use onnx::OnnxClassifier;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::payload::AnswerPayload;
    use crate::schema::FeatureSchema;

    fn make_decoder() -> LabelDecoder {
        LabelDecoder::new(vec![
            "Xaalad deg deg ah".into(),
            "Xaalad dhax dhaxaad eh (Bukaan socod)".into(),
            "Xaalad fudud (Daryeel guri)".into(),
        ])
    }

    #[test]
    fn decode_maps_index_to_class() {
        let decoder = make_decoder();
        assert_eq!(
            decoder.decode(&RawPrediction::ClassIndex(0)),
            "Xaalad deg deg ah"
        );
        assert_eq!(
            decoder.decode(&RawPrediction::ClassIndex(2)),
            "Xaalad fudud (Daryeel guri)"
        );
    }

    #[test]
    fn decode_out_of_range_stringifies() {
        let decoder = make_decoder();
        assert_eq!(decoder.decode(&RawPrediction::ClassIndex(7)), "7");
        assert_eq!(decoder.decode(&RawPrediction::ClassIndex(-1)), "-1");
    }

    #[test]
    fn decode_without_table_stringifies() {
        let decoder = LabelDecoder::none();
        assert_eq!(decoder.decode(&RawPrediction::ClassIndex(1)), "1");
    }

    #[test]
    fn decode_passes_label_through() {
        let decoder = make_decoder();
        assert_eq!(
            decoder.decode(&RawPrediction::Label("Xaalad deg deg ah".into())),
            "Xaalad deg deg ah"
        );
    }

    #[test]
    fn load_missing_classes_file_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let decoder = LabelDecoder::load(&dir.path().join("classes.json"));
        assert_eq!(decoder.decode(&RawPrediction::ClassIndex(0)), "0");
    }

    #[test]
    fn load_malformed_classes_file_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classes.json");
        std::fs::write(&path, "{\"not\": \"a list\"}").unwrap();
        let decoder = LabelDecoder::load(&path);
        assert_eq!(decoder.decode(&RawPrediction::ClassIndex(0)), "0");
    }

    #[test]
    fn load_valid_classes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classes.json");
        std::fs::write(&path, r#"["Xaalad deg deg ah"]"#).unwrap();
        let decoder = LabelDecoder::load(&path);
        assert_eq!(
            decoder.decode(&RawPrediction::ClassIndex(0)),
            "Xaalad deg deg ah"
        );
    }

    #[test]
    fn mock_returns_configured_output() {
        let classifier = MockClassifier::returning(RawPrediction::ClassIndex(1));
        let input = normalize(&AnswerPayload::default(), &FeatureSchema::fallback());
        assert_eq!(
            classifier.predict(&input).unwrap(),
            RawPrediction::ClassIndex(1)
        );
    }

    #[test]
    fn raw_prediction_deserializes_untagged() {
        let index: RawPrediction = serde_json::from_str("2").unwrap();
        assert_eq!(index, RawPrediction::ClassIndex(2));
        let label: RawPrediction = serde_json::from_str("\"Xaalad deg deg ah\"").unwrap();
        assert_eq!(label, RawPrediction::Label("Xaalad deg deg ah".into()));
    }
}
