//! Assessment orchestration — one guided questionnaire submission through
//! the full pipeline: validate, build, derive, normalize, predict,
//! localize.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{Classifier, ClassifierError, LabelDecoder};
use crate::derived;
use crate::localize::{self, TriageResult};
use crate::normalize;
use crate::payload;
use crate::schema::FeatureSchema;
use crate::symptoms::SymptomGroup;

const AGE_GROUP_FEATURE: &str = "Age_Group";

/// Demographic choices offered alongside the symptom groups.
pub const AGE_GROUP_CHOICES: [&str; 3] = ["Child", "Adult", "Elderly"];

/// Everything the questionnaire collected for one submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentRequest {
    /// Symptom groups the patient reported.
    pub selected: Vec<SymptomGroup>,
    /// Follow-up answers keyed by feature name, in display vocabulary.
    #[serde(default)]
    pub answers: HashMap<String, String>,
    /// Optional demographic, stored verbatim — the training vocabulary for
    /// this column is the display vocabulary.
    #[serde(default)]
    pub age_group: Option<String>,
}

#[derive(Debug, Error)]
pub enum AssessmentError {
    /// The single user-visible validation failure: nothing selected.
    #[error("Please select at least one symptom.")]
    NoSymptomsSelected,

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Run one assessment to completion.
///
/// An empty selection is rejected before any feature vector is built.
/// Every data-quality problem after that degrades to a documented default
/// instead of failing; only classifier faults propagate.
pub fn assess(
    request: &AssessmentRequest,
    schema: &FeatureSchema,
    classifier: &dyn Classifier,
    decoder: &LabelDecoder,
) -> Result<TriageResult, AssessmentError> {
    if request.selected.is_empty() {
        return Err(AssessmentError::NoSymptomsSelected);
    }

    let mut payload = payload::build_payload(&request.selected, &request.answers);
    if let Some(age_group) = &request.age_group {
        payload.set_token(AGE_GROUP_FEATURE, age_group.clone());
    }
    derived::apply(&mut payload, schema);

    let input = normalize::normalize(&payload, schema);
    let raw = classifier.predict(&input)?;
    let result = localize::localize(&raw, decoder);

    tracing::info!(
        assessment = %result.id,
        tier = result.tier.as_str(),
        "assessment complete"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{MockClassifier, RawPrediction};
    use crate::localize::SeverityTier;
    use crate::normalize::FeatureValue;

    fn make_answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn make_classifier(label: &str) -> MockClassifier {
        MockClassifier::returning(RawPrediction::Label(label.to_string()))
    }

    #[test]
    fn empty_selection_is_rejected_before_prediction() {
        let schema = FeatureSchema::fallback();
        let classifier = make_classifier("Xaalad deg deg ah");
        let request = AssessmentRequest::default();
        let err = assess(&request, &schema, &classifier, &LabelDecoder::none()).unwrap_err();
        assert!(matches!(err, AssessmentError::NoSymptomsSelected));
        assert_eq!(err.to_string(), "Please select at least one symptom.");
    }

    #[test]
    fn full_pipeline_emergency_path() {
        let schema = FeatureSchema::fallback();
        let classifier = make_classifier("Xaalad deg deg ah");
        let request = AssessmentRequest {
            selected: vec![SymptomGroup::Cough],
            answers: make_answers(&[("Blood_Cough", "Yes"), ("Breath_Difficulty", "Yes")]),
            age_group: Some("Adult".into()),
        };
        let result = assess(&request, &schema, &classifier, &LabelDecoder::none()).unwrap();
        assert_eq!(result.display_label, "Emergency condition");
        assert_eq!(result.tier, SeverityTier::Emergency);
    }

    #[test]
    fn pipeline_decodes_class_index_through_decoder() {
        let schema = FeatureSchema::fallback();
        let classifier = MockClassifier::returning(RawPrediction::ClassIndex(0));
        let decoder = LabelDecoder::new(vec!["Xaalad fudud (Daryeel guri)".into()]);
        let request = AssessmentRequest {
            selected: vec![SymptomGroup::Fever],
            ..Default::default()
        };
        let result = assess(&request, &schema, &classifier, &decoder).unwrap();
        assert_eq!(result.display_label, "Mild condition (Home care)");
        assert_eq!(result.tier, SeverityTier::Mild);
    }

    #[test]
    fn age_group_flows_into_the_vector() {
        let schema = FeatureSchema::fallback();
        let request = AssessmentRequest {
            selected: vec![SymptomGroup::Fatigue],
            answers: HashMap::new(),
            age_group: Some("Elderly".into()),
        };
        let mut payload = payload::build_payload(&request.selected, &request.answers);
        payload.set_token(AGE_GROUP_FEATURE, request.age_group.clone().unwrap());
        derived::apply(&mut payload, &schema);
        let vector = normalize::normalize(&payload, &schema);
        assert_eq!(
            vector.get("Age_Group"),
            Some(&FeatureValue::Text("Elderly".into()))
        );
    }

    #[test]
    fn derived_features_reach_the_classifier_input() {
        let schema = FeatureSchema::fallback();
        let request = AssessmentRequest {
            selected: vec![SymptomGroup::Fever, SymptomGroup::Fatigue],
            answers: make_answers(&[("Fatigue_Severity", "Severe")]),
            age_group: None,
        };
        let mut payload = payload::build_payload(&request.selected, &request.answers);
        derived::apply(&mut payload, &schema);
        let vector = normalize::normalize(&payload, &schema);
        assert_eq!(
            vector.get("Fever_With_Fatigue"),
            Some(&FeatureValue::Text("haa".into()))
        );
        assert_eq!(
            vector.get("Red_Flag_Count"),
            Some(&FeatureValue::Number(1.0))
        );
    }

    #[test]
    fn request_round_trips_through_json() {
        let request = AssessmentRequest {
            selected: vec![SymptomGroup::AbdominalPain],
            answers: make_answers(&[("Pain_Location", "Upper abdomen")]),
            age_group: Some("Child".into()),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("Abdominal Pain"));
        let parsed: AssessmentRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.selected, vec![SymptomGroup::AbdominalPain]);
        assert_eq!(parsed.age_group.as_deref(), Some("Child"));
    }
}
