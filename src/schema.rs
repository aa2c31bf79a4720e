//! Feature schema registry — the column contract between the questionnaire
//! and the trained classifier.
//!
//! Loaded once at process start from the `feature_schema.json` exported next
//! to the pipeline artifact, then passed by shared reference for the rest of
//! the process lifetime. Loading is best-effort: any problem degrades to the
//! built-in fallback that mirrors the training export, never an error.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Categorical columns, in training order.
const CAT_FALLBACK: [&str; 30] = [
    "Has_Fever",
    "Fever_Level",
    "Fever_Duration_Level",
    "Chills",
    "Has_Cough",
    "Cough_Type",
    "Cough_Duration_Level",
    "Blood_Cough",
    "Breath_Difficulty",
    "Has_Headache",
    "Headache_Severity",
    "Headache_Duration_Level",
    "Photophobia",
    "Neck_Stiffness",
    "Has_Abdominal_Pain",
    "Pain_Location",
    "Pain_Duration_Level",
    "Nausea",
    "Diarrhea",
    "Has_Fatigue",
    "Fatigue_Severity",
    "Fatigue_Duration_Level",
    "Weight_Loss",
    "Fever_With_Fatigue",
    "Has_Vomiting",
    "Vomiting_Severity",
    "Vomiting_Duration_Level",
    "Blood_Vomit",
    "Unable_To_Keep_Fluids",
    "Age_Group",
];

/// Numeric columns, in training order.
const NUM_FALLBACK: [&str; 1] = ["Red_Flag_Count"];

/// Ordered categorical and numeric column names the classifier expects.
///
/// The two lists are disjoint; together they are the single source of truth
/// for feature naming and order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSchema {
    pub cat_cols: Vec<String>,
    pub num_cols: Vec<String>,
}

/// On-disk shape. Each key is optional and falls back individually.
#[derive(Debug, Deserialize)]
struct SchemaFile {
    cat_cols: Option<Vec<String>>,
    num_cols: Option<Vec<String>>,
}

impl FeatureSchema {
    /// The built-in schema matching the bundled pipeline's training export.
    pub fn fallback() -> Self {
        Self {
            cat_cols: CAT_FALLBACK.iter().map(|s| s.to_string()).collect(),
            num_cols: NUM_FALLBACK.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Best-effort load of an exported schema file.
    ///
    /// A missing or malformed file degrades to [`FeatureSchema::fallback`];
    /// a file carrying only one of the two keys falls back for the other
    /// key only.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    "feature schema unreadable at {}: {e}; using built-in fallback",
                    path.display()
                );
                return Self::fallback();
            }
        };

        match serde_json::from_str::<SchemaFile>(&raw) {
            Ok(file) => {
                let fallback = Self::fallback();
                Self {
                    cat_cols: file.cat_cols.unwrap_or(fallback.cat_cols),
                    num_cols: file.num_cols.unwrap_or(fallback.num_cols),
                }
            }
            Err(e) => {
                tracing::warn!(
                    "feature schema malformed at {}: {e}; using built-in fallback",
                    path.display()
                );
                Self::fallback()
            }
        }
    }

    /// Full column set in classifier order: categorical first, then numeric.
    pub fn expected_cols(&self) -> impl Iterator<Item = &str> {
        self.cat_cols
            .iter()
            .map(String::as_str)
            .chain(self.num_cols.iter().map(String::as_str))
    }

    /// Total column count.
    pub fn len(&self) -> usize {
        self.cat_cols.len() + self.num_cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cat_cols.is_empty() && self.num_cols.is_empty()
    }

    pub fn has_numeric(&self, name: &str) -> bool {
        self.num_cols.iter().any(|c| c == name)
    }
}
