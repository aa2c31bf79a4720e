//! Token dictionaries — bidirectional mappings between the English display
//! vocabulary shown to patients and the Somali token vocabulary the
//! classifier was trained on.
//!
//! Forward lookups are lenient: a display value outside a widget's known
//! vocabulary is forwarded verbatim rather than rejected, so new UI options
//! keep working before the dictionary catches up. Callers can tell the two
//! cases apart through [`MappedToken`].

use serde::{Deserialize, Serialize};

/// Model token for a reported symptom or a "yes" answer.
pub const TOKEN_PRESENT: &str = "haa";
/// Model token for an unreported symptom or a "no" answer.
pub const TOKEN_ABSENT: &str = "maya";
/// Severity token that counts toward the red-flag score.
pub const TOKEN_SEVERE: &str = "aad u daran";

/// Answer widget kinds — closed set, one dictionary each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    YesNo,
    Severity,
    CoughType,
    PainLocation,
    Duration,
}

// ─── Dictionaries (display, token) ───────────────────────────────────────────

const YES_NO: [(&str, &str); 2] = [("Yes", "haa"), ("No", "maya")];

const SEVERITY: [(&str, &str); 3] = [
    ("Mild", "fudud"),
    ("Moderate", "dhexdhexaad"),
    ("Severe", "aad u daran"),
];

const COUGH_TYPE: [(&str, &str); 2] = [("Dry", "qalalan"), ("Wet", "qoyan")];

const PAIN_LOCATION: [(&str, &str); 3] = [
    ("Upper abdomen", "caloosha sare"),
    ("Lower abdomen", "caloosha hoose"),
    ("Entire abdomen", "caloosha oo dhan"),
];

/// Duration pairs, token-first because the forward and reverse directions
/// are not strict inverses here: the training data carries two spellings of
/// the moderate-duration token and both render as "2-3 days". The canonical
/// short form is listed first so the display→token lookup always yields it.
const DURATION: [(&str, &str); 4] = [
    ("fudud", "Less than 1 day"),
    ("dhexdhexaad", "2-3 days"),
    ("dhexdhexaad ah", "2-3 days"),
    ("aad u daran", "More than 3 days"),
];

fn dictionary(kind: WidgetKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        WidgetKind::YesNo => &YES_NO,
        WidgetKind::Severity => &SEVERITY,
        WidgetKind::CoughType => &COUGH_TYPE,
        WidgetKind::PainLocation => &PAIN_LOCATION,
        WidgetKind::Duration => &DURATION,
    }
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// Result of a display→token lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappedToken {
    /// Display value found in the widget's dictionary.
    Known(&'static str),
    /// Unknown display value, forwarded verbatim to the model.
    Passthrough(String),
}

impl MappedToken {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(token) => token,
            Self::Passthrough(raw) => raw,
        }
    }

    pub fn into_token(self) -> String {
        match self {
            Self::Known(token) => token.to_string(),
            Self::Passthrough(raw) => raw,
        }
    }
}

/// Map a display value to its model token.
///
/// Duration phrases deterministically resolve to the canonical short token
/// (`dhexdhexaad` for "2-3 days"), collapsing the documented near-duplicate.
pub fn to_token(kind: WidgetKind, display: &str) -> MappedToken {
    let hit = match kind {
        WidgetKind::Duration => DURATION
            .iter()
            .find(|(_, d)| *d == display)
            .map(|(token, _)| *token),
        _ => dictionary(kind)
            .iter()
            .find(|(d, _)| *d == display)
            .map(|(_, token)| *token),
    };

    match hit {
        Some(token) => MappedToken::Known(token),
        None => {
            let display_value = display;
            tracing::warn!("unmapped {kind:?} display value {display_value:?} forwarded to model");
            MappedToken::Passthrough(display.to_string())
        }
    }
}

/// Reverse lookup: model token to display value.
///
/// Both spellings of the moderate-duration token render as "2-3 days".
pub fn display_for(kind: WidgetKind, token: &str) -> Option<&'static str> {
    match kind {
        WidgetKind::Duration => DURATION
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, display)| *display),
        _ => dictionary(kind)
            .iter()
            .find(|(_, t)| *t == token)
            .map(|(display, _)| *display),
    }
}

/// Ordered display vocabulary for a widget, duplicates collapsed.
pub fn choices(kind: WidgetKind) -> Vec<&'static str> {
    let mut seen = Vec::new();
    let displays: Vec<&'static str> = match kind {
        WidgetKind::Duration => DURATION.iter().map(|(_, d)| *d).collect(),
        _ => dictionary(kind).iter().map(|(d, _)| *d).collect(),
    };
    for display in displays {
        if !seen.contains(&display) {
            seen.push(display);
        }
    }
    seen
}
