//! Derived features — composites the questionnaire never asks directly,
//! computed from the raw payload before normalization.

use crate::payload::AnswerPayload;
use crate::schema::FeatureSchema;
use crate::tokens::{TOKEN_PRESENT, TOKEN_SEVERE};

pub const RED_FLAG_FEATURE: &str = "Red_Flag_Count";
pub const FEVER_WITH_FATIGUE_FEATURE: &str = "Fever_With_Fatigue";

/// Binary danger signs worth one red-flag point each.
const DANGER_SIGNS: [&str; 5] = [
    "Breath_Difficulty",
    "Blood_Cough",
    "Neck_Stiffness",
    "Blood_Vomit",
    "Unable_To_Keep_Fluids",
];

/// Severity families: `_Severity` naming checked first, legacy `_Level`
/// naming second — whichever the questionnaire populated.
const SEVERITY_FAMILIES: [(&str, &str); 4] = [
    ("Fever_Severity", "Fever_Level"),
    ("Headache_Severity", "Headache_Level"),
    ("Fatigue_Severity", "Fatigue_Level"),
    ("Vomiting_Severity", "Vomiting_Level"),
];

/// Apply every derivation rule, in fixed order.
///
/// `Fever_With_Fatigue` is set only when both presence flags are present;
/// otherwise the slot stays unset and falls to the missing marker
/// downstream. The red-flag count is computed only when the schema's
/// numeric list requests it.
pub fn apply(payload: &mut AnswerPayload, schema: &FeatureSchema) {
    if payload.token("Has_Fever") == Some(TOKEN_PRESENT)
        && payload.token("Has_Fatigue") == Some(TOKEN_PRESENT)
    {
        payload.set_token(FEVER_WITH_FATIGUE_FEATURE, TOKEN_PRESENT);
    }

    if schema.has_numeric(RED_FLAG_FEATURE) {
        let count = red_flag_count(payload);
        payload.set_number(RED_FLAG_FEATURE, count as f64);
    }
}

/// Order-independent sum of danger signs and severe severities, 0..=9.
pub fn red_flag_count(payload: &AnswerPayload) -> u32 {
    let mut count = 0;

    for sign in DANGER_SIGNS {
        if payload.token(sign) == Some(TOKEN_PRESENT) {
            count += 1;
        }
    }

    for (primary, legacy) in SEVERITY_FAMILIES {
        let value = payload.token(primary).or_else(|| payload.token(legacy));
        if value == Some(TOKEN_SEVERE) {
            count += 1;
        }
    }

    count
}
