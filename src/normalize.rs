//! Input normalization — the sparse payload becomes a schema-complete,
//! correctly-typed single-row feature vector. The vector's key set always
//! equals the schema's, whatever the questionnaire collected.

use serde::Serialize;

use crate::payload::{AnswerPayload, AnswerValue};
use crate::schema::FeatureSchema;

/// One typed slot in the model input row. `Missing` is the canonical
/// missing-value marker for both categorical and numeric slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Text(String),
    Number(f64),
    Missing,
}

impl FeatureValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// A named slot of the model input row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCell {
    pub name: String,
    pub value: FeatureValue,
}

/// Fixed-order model input row, one cell per schema column.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureVector {
    cells: Vec<FeatureCell>,
}

impl FeatureVector {
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.cells
            .iter()
            .find(|cell| cell.name == name)
            .map(|cell| &cell.value)
    }

    pub fn cells(&self) -> &[FeatureCell] {
        &self.cells
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|cell| cell.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Produce the complete typed row the classifier expects.
///
/// Categorical slots hold trimmed non-empty text or the missing marker;
/// numeric slots hold a coerced number or the missing marker. Coercion
/// failures are data-quality issues, not errors.
pub fn normalize(payload: &AnswerPayload, schema: &FeatureSchema) -> FeatureVector {
    let mut cells = Vec::with_capacity(schema.len());

    for name in &schema.cat_cols {
        cells.push(FeatureCell {
            name: name.clone(),
            value: categorical_value(payload.get(name)),
        });
    }
    for name in &schema.num_cols {
        cells.push(FeatureCell {
            name: name.clone(),
            value: numeric_value(payload.get(name)),
        });
    }

    FeatureVector { cells }
}

fn categorical_value(raw: Option<&AnswerValue>) -> FeatureValue {
    match raw {
        Some(AnswerValue::Token(token)) => {
            let trimmed = token.trim();
            if trimmed.is_empty() {
                FeatureValue::Missing
            } else {
                FeatureValue::Text(trimmed.to_string())
            }
        }
        // A number landing in a categorical slot is stringified, matching
        // the model's object-typed column contract.
        Some(AnswerValue::Number(n)) => FeatureValue::Text(n.to_string()),
        None => FeatureValue::Missing,
    }
}

fn numeric_value(raw: Option<&AnswerValue>) -> FeatureValue {
    match raw {
        Some(AnswerValue::Number(n)) => FeatureValue::Number(*n),
        Some(AnswerValue::Token(token)) => match token.trim().parse::<f64>() {
            Ok(n) => FeatureValue::Number(n),
            Err(_) => FeatureValue::Missing,
        },
        None => FeatureValue::Missing,
    }
}
