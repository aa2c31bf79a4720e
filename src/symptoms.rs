//! Static symptom-group registry — the six guided-questionnaire clusters,
//! each a presence flag plus ordered follow-up fields. Defined at startup,
//! immutable for the process lifetime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tokens::WidgetKind;

/// One follow-up question: target feature, patient-facing label, widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FollowUp {
    pub feature: &'static str,
    pub label: &'static str,
    pub widget: WidgetKind,
}

const fn follow_up(feature: &'static str, label: &'static str, widget: WidgetKind) -> FollowUp {
    FollowUp {
        feature,
        label,
        widget,
    }
}

const FEVER_FIELDS: [FollowUp; 3] = [
    follow_up("Fever_Level", "Fever severity", WidgetKind::Severity),
    follow_up("Fever_Duration_Level", "Fever duration", WidgetKind::Duration),
    follow_up("Chills", "Chills", WidgetKind::YesNo),
];

const COUGH_FIELDS: [FollowUp; 4] = [
    follow_up("Cough_Type", "Type of cough", WidgetKind::CoughType),
    follow_up("Cough_Duration_Level", "Cough duration", WidgetKind::Duration),
    follow_up("Blood_Cough", "Blood in cough", WidgetKind::YesNo),
    follow_up("Breath_Difficulty", "Breathing difficulty", WidgetKind::YesNo),
];

const HEADACHE_FIELDS: [FollowUp; 4] = [
    follow_up("Headache_Severity", "Headache severity", WidgetKind::Severity),
    follow_up("Headache_Duration_Level", "Headache duration", WidgetKind::Duration),
    follow_up("Photophobia", "Light sensitivity", WidgetKind::YesNo),
    follow_up("Neck_Stiffness", "Neck stiffness", WidgetKind::YesNo),
];

const ABDOMINAL_PAIN_FIELDS: [FollowUp; 4] = [
    follow_up("Pain_Location", "Pain location", WidgetKind::PainLocation),
    follow_up("Pain_Duration_Level", "Pain duration", WidgetKind::Duration),
    follow_up("Nausea", "Nausea", WidgetKind::YesNo),
    follow_up("Diarrhea", "Diarrhea", WidgetKind::YesNo),
];

const FATIGUE_FIELDS: [FollowUp; 3] = [
    follow_up("Fatigue_Severity", "Fatigue severity", WidgetKind::Severity),
    follow_up("Fatigue_Duration_Level", "Fatigue duration", WidgetKind::Duration),
    follow_up("Weight_Loss", "Weight loss", WidgetKind::YesNo),
];

const VOMITING_FIELDS: [FollowUp; 4] = [
    follow_up("Vomiting_Severity", "Vomiting severity", WidgetKind::Severity),
    follow_up("Vomiting_Duration_Level", "Vomiting duration", WidgetKind::Duration),
    follow_up("Blood_Vomit", "Blood in vomit", WidgetKind::YesNo),
    follow_up("Unable_To_Keep_Fluids", "Unable to keep fluids down", WidgetKind::YesNo),
];

/// A reportable symptom cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymptomGroup {
    Fever,
    Cough,
    Headache,
    #[serde(rename = "Abdominal Pain")]
    AbdominalPain,
    Fatigue,
    Vomiting,
}

impl SymptomGroup {
    pub const ALL: [SymptomGroup; 6] = [
        Self::Fever,
        Self::Cough,
        Self::Headache,
        Self::AbdominalPain,
        Self::Fatigue,
        Self::Vomiting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fever => "Fever",
            Self::Cough => "Cough",
            Self::Headache => "Headache",
            Self::AbdominalPain => "Abdominal Pain",
            Self::Fatigue => "Fatigue",
            Self::Vomiting => "Vomiting",
        }
    }

    /// Presence-flag feature for this group.
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Fever => "Has_Fever",
            Self::Cough => "Has_Cough",
            Self::Headache => "Has_Headache",
            Self::AbdominalPain => "Has_Abdominal_Pain",
            Self::Fatigue => "Has_Fatigue",
            Self::Vomiting => "Has_Vomiting",
        }
    }

    /// Ordered follow-up questions shown when this group is selected.
    pub fn follow_ups(&self) -> &'static [FollowUp] {
        match self {
            Self::Fever => &FEVER_FIELDS,
            Self::Cough => &COUGH_FIELDS,
            Self::Headache => &HEADACHE_FIELDS,
            Self::AbdominalPain => &ABDOMINAL_PAIN_FIELDS,
            Self::Fatigue => &FATIGUE_FIELDS,
            Self::Vomiting => &VOMITING_FIELDS,
        }
    }
}

/// A caller named a symptom group outside the registry.
#[derive(Debug, Error)]
#[error("Unknown symptom group: {0}")]
pub struct UnknownSymptomGroup(pub String);

impl std::str::FromStr for SymptomGroup {
    type Err = UnknownSymptomGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| UnknownSymptomGroup(s.to_string()))
    }
}
