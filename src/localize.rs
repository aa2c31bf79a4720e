//! Result localization — the model's raw output becomes a patient-facing
//! triage recommendation: display label, severity tier, advice, and the
//! fixed general notice.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::{LabelDecoder, RawPrediction};

/// Training labels (Somali) → display labels (English). Exact match; the
/// training data carries two spellings of the moderate label.
const LABEL_TRANSLATIONS: [(&str, &str); 4] = [
    ("Xaalad fudud (Daryeel guri)", "Mild condition (Home care)"),
    (
        "Xaalad dhax dhaxaad eh (Bukaan socod)",
        "Moderate condition (Outpatient care)",
    ),
    (
        "Xaalad dhax dhaxaad ah (Bukaan socod)",
        "Moderate condition (Outpatient care)",
    ),
    ("Xaalad deg deg ah", "Emergency condition"),
];

/// Ordered substring rules over the lowercased display label; first match
/// wins, default Mild. Matching runs on the translated label to preserve
/// the legacy tier behavior (see DESIGN.md).
const TIER_RULES: [(&str, SeverityTier); 4] = [
    ("emergency", SeverityTier::Emergency),
    ("urgent", SeverityTier::Emergency),
    ("moderate", SeverityTier::Moderate),
    ("outpatient", SeverityTier::Moderate),
];

const ADVICE: [(&str, &str); 3] = [
    (
        "Mild condition (Home care)",
        "Rest at home, drink plenty of fluids, eat light meals, take pain relievers or fever reducers if needed, monitor your symptoms for 24 hours, if they worsen contact a healthcare facility.",
    ),
    (
        "Moderate condition (Outpatient care)",
        "Visit a healthcare facility within 24 hours for evaluation, bring any previous medication records if available, drink plenty of fluids.",
    ),
    (
        "Emergency condition",
        "Go to the hospital immediately, do not attempt home treatment, if possible have someone accompany you, bring any previous medication records if available.",
    ),
];

/// Advice attached when the display label has no table entry.
pub const GENERIC_ADVICE: &str =
    "General advice: if you are concerned about your condition, contact a healthcare facility.";

/// Fixed notice attached to every assessment regardless of tier.
pub const GENERAL_NOTICE: &str = "Important notice: This is a general assessment to help you \
understand your condition and next steps. If you are concerned about your condition, contact a \
healthcare provider.";

/// Severity tier drives result presentation downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Mild,
    Moderate,
    Emergency,
}

impl SeverityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Emergency => "emergency",
        }
    }
}

/// The per-assessment outcome handed to the presentation layer.
/// Created once per assessment, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageResult {
    pub id: Uuid,
    /// Training-time label as decoded from the model output.
    pub raw_label: String,
    /// Patient-facing label.
    pub display_label: String,
    pub tier: SeverityTier,
    pub advice: String,
    /// Fixed general notice, always attached.
    pub notice: String,
    pub assessed_at: NaiveDateTime,
}

/// Decode, translate, tier, and attach advice. Never fails: unrecognized
/// output stays visible as a passthrough label with generic advice.
pub fn localize(raw: &RawPrediction, decoder: &LabelDecoder) -> TriageResult {
    let raw_label = decoder.decode(raw);
    let display_label = translate_label(&raw_label);
    let tier = classify_tier(&display_label);
    let advice = advice_for(&display_label)
        .unwrap_or(GENERIC_ADVICE)
        .to_string();

    TriageResult {
        id: Uuid::new_v4(),
        raw_label,
        display_label,
        tier,
        advice,
        notice: GENERAL_NOTICE.to_string(),
        assessed_at: chrono::Local::now().naive_local(),
    }
}

/// Exact-match translation with passthrough fallback, so unexpected labels
/// stay visible instead of failing the assessment.
pub fn translate_label(raw_label: &str) -> String {
    match LABEL_TRANSLATIONS
        .iter()
        .find(|(training, _)| *training == raw_label)
    {
        Some((_, display)) => (*display).to_string(),
        None => {
            tracing::warn!("untranslated triage label {raw_label:?} passed through to display");
            raw_label.to_string()
        }
    }
}

/// Classify the severity tier from the display label.
pub fn classify_tier(display_label: &str) -> SeverityTier {
    let lowered = display_label.to_lowercase();
    for (needle, tier) in TIER_RULES {
        if lowered.contains(needle) {
            return tier;
        }
    }
    SeverityTier::Mild
}

fn advice_for(display_label: &str) -> Option<&'static str> {
    ADVICE
        .iter()
        .find(|(label, _)| *label == display_label)
        .map(|(_, advice)| *advice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_translate() {
        assert_eq!(
            translate_label("Xaalad fudud (Daryeel guri)"),
            "Mild condition (Home care)"
        );
        assert_eq!(
            translate_label("Xaalad deg deg ah"),
            "Emergency condition"
        );
    }

    #[test]
    fn both_moderate_spellings_translate_identically() {
        assert_eq!(
            translate_label("Xaalad dhax dhaxaad eh (Bukaan socod)"),
            "Moderate condition (Outpatient care)"
        );
        assert_eq!(
            translate_label("Xaalad dhax dhaxaad ah (Bukaan socod)"),
            "Moderate condition (Outpatient care)"
        );
    }

    #[test]
    fn unknown_label_passes_through() {
        assert_eq!(translate_label("Xaalad cusub"), "Xaalad cusub");
    }

    #[test]
    fn tier_rules_in_order() {
        assert_eq!(classify_tier("Emergency condition"), SeverityTier::Emergency);
        assert_eq!(classify_tier("Urgent referral"), SeverityTier::Emergency);
        assert_eq!(
            classify_tier("Moderate condition (Outpatient care)"),
            SeverityTier::Moderate
        );
        assert_eq!(classify_tier("Outpatient follow-up"), SeverityTier::Moderate);
        assert_eq!(classify_tier("Mild condition (Home care)"), SeverityTier::Mild);
        // Default tier for anything unmatched.
        assert_eq!(classify_tier("Xaalad cusub"), SeverityTier::Mild);
    }

    #[test]
    fn tier_match_is_case_insensitive() {
        assert_eq!(classify_tier("EMERGENCY CONDITION"), SeverityTier::Emergency);
    }

    #[test]
    fn localize_known_emergency_label() {
        let decoder = LabelDecoder::none();
        let result = localize(
            &RawPrediction::Label("Xaalad deg deg ah".into()),
            &decoder,
        );
        assert_eq!(result.raw_label, "Xaalad deg deg ah");
        assert_eq!(result.display_label, "Emergency condition");
        assert_eq!(result.tier, SeverityTier::Emergency);
        assert!(result.advice.starts_with("Go to the hospital immediately"));
        assert_eq!(result.notice, GENERAL_NOTICE);
    }

    #[test]
    fn localize_unrecognized_label_gets_mild_and_generic_advice() {
        let decoder = LabelDecoder::none();
        let result = localize(&RawPrediction::Label("Xaalad cusub".into()), &decoder);
        assert_eq!(result.display_label, "Xaalad cusub");
        assert_eq!(result.tier, SeverityTier::Mild);
        assert_eq!(result.advice, GENERIC_ADVICE);
    }

    #[test]
    fn localize_decodes_class_index() {
        let decoder = LabelDecoder::new(vec![
            "Xaalad deg deg ah".into(),
            "Xaalad fudud (Daryeel guri)".into(),
        ]);
        let result = localize(&RawPrediction::ClassIndex(1), &decoder);
        assert_eq!(result.display_label, "Mild condition (Home care)");
        assert_eq!(result.tier, SeverityTier::Mild);
        assert!(result.advice.starts_with("Rest at home"));
    }

    #[test]
    fn localize_undecodable_index_stays_visible() {
        let result = localize(&RawPrediction::ClassIndex(9), &LabelDecoder::none());
        assert_eq!(result.raw_label, "9");
        assert_eq!(result.display_label, "9");
        assert_eq!(result.tier, SeverityTier::Mild);
        assert_eq!(result.advice, GENERIC_ADVICE);
    }

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SeverityTier::Emergency).unwrap(),
            "\"emergency\""
        );
        assert_eq!(SeverityTier::Moderate.as_str(), "moderate");
    }
}
