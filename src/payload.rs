//! Sparse answer payload — the per-assessment record the questionnaire
//! fills in before derivation and normalization. Created fresh for every
//! submission, consumed once, then discarded.

use std::collections::HashMap;

use serde::Serialize;

use crate::symptoms::SymptomGroup;
use crate::tokens::{self, TOKEN_ABSENT, TOKEN_PRESENT};

/// A raw answer slot: token text for categorical answers, plain numbers for
/// derived counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Token(String),
    Number(f64),
}

impl AnswerValue {
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Self::Token(token) => Some(token),
            Self::Number(_) => None,
        }
    }
}

/// Feature name → raw answer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnswerPayload {
    entries: HashMap<String, AnswerValue>,
}

impl AnswerPayload {
    pub fn get(&self, feature: &str) -> Option<&AnswerValue> {
        self.entries.get(feature)
    }

    /// Token value of a feature, if it holds one.
    pub fn token(&self, feature: &str) -> Option<&str> {
        self.entries.get(feature).and_then(AnswerValue::as_token)
    }

    pub fn set_token(&mut self, feature: impl Into<String>, token: impl Into<String>) {
        self.entries
            .insert(feature.into(), AnswerValue::Token(token.into()));
    }

    pub fn set_number(&mut self, feature: impl Into<String>, value: f64) {
        self.entries
            .insert(feature.into(), AnswerValue::Number(value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the payload for one submission.
///
/// Every group's presence flag is fully determined: absent by default,
/// present when selected. Follow-up answers are honored only for selected
/// groups, so an answer lingering from a previously deselected group never
/// reaches the payload.
pub fn build_payload(
    selected: &[SymptomGroup],
    answers: &HashMap<String, String>,
) -> AnswerPayload {
    let mut payload = AnswerPayload::default();

    for group in SymptomGroup::ALL {
        payload.set_token(group.flag(), TOKEN_ABSENT);
    }

    for group in selected {
        payload.set_token(group.flag(), TOKEN_PRESENT);
        for field in group.follow_ups() {
            if let Some(display) = answers.get(field.feature) {
                let token = tokens::to_token(field.widget, display);
                payload.set_token(field.feature, token.into_token());
            }
        }
    }

    payload
}
