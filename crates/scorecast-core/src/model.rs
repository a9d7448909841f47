//! Core data model types for scorecast.
//!
//! The form is a sparse mapping from field key to value. Keys only appear
//! once the user has edited them; defaults live in the field table and are
//! applied when a value is displayed or stepped, never stored.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FieldInputError;

/// Keys of every field on the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    StudyHoursPerDay,
    SleepHours,
    AttendancePercentage,
    MotivationLevel,
    StressLevel,
    ScreenTime,
    LearningStyle,
    StudyEnvironment,
}

impl FieldName {
    pub const ALL: [FieldName; 8] = [
        FieldName::StudyHoursPerDay,
        FieldName::SleepHours,
        FieldName::AttendancePercentage,
        FieldName::MotivationLevel,
        FieldName::StressLevel,
        FieldName::ScreenTime,
        FieldName::LearningStyle,
        FieldName::StudyEnvironment,
    ];

    /// The JSON key for this field.
    pub fn key(self) -> &'static str {
        match self {
            FieldName::StudyHoursPerDay => "study_hours_per_day",
            FieldName::SleepHours => "sleep_hours",
            FieldName::AttendancePercentage => "attendance_percentage",
            FieldName::MotivationLevel => "motivation_level",
            FieldName::StressLevel => "stress_level",
            FieldName::ScreenTime => "screen_time",
            FieldName::LearningStyle => "learning_style",
            FieldName::StudyEnvironment => "study_environment",
        }
    }

    /// Label, bounds, and default for this field.
    pub fn spec(self) -> FieldSpec {
        let numeric = |label, max, default| FieldSpec {
            name: self,
            label,
            kind: FieldKind::Numeric {
                min: 0,
                max,
                step: 1,
                default,
            },
        };
        match self {
            FieldName::StudyHoursPerDay => numeric("Study Hours / Day", 12, 5),
            FieldName::SleepHours => numeric("Sleep Hours", 12, 7),
            FieldName::AttendancePercentage => numeric("Attendance %", 100, 85),
            FieldName::MotivationLevel => numeric("Motivation Level", 10, 7),
            FieldName::StressLevel => numeric("Stress Level", 10, 4),
            FieldName::ScreenTime => numeric("Screen Time (hrs)", 12, 5),
            FieldName::LearningStyle => FieldSpec {
                name: self,
                label: "Learning Style",
                kind: FieldKind::Choice {
                    options: LearningStyle::NAMES,
                },
            },
            FieldName::StudyEnvironment => FieldSpec {
                name: self,
                label: "Study Environment",
                kind: FieldKind::Choice {
                    options: StudyEnvironment::NAMES,
                },
            },
        }
    }

    /// Parse user-typed text into a value of this field's kind.
    ///
    /// Numbers are clamped into the field's bounds; choices match
    /// case-insensitively.
    pub fn parse_value(self, raw: &str) -> Result<FieldValue, FieldInputError> {
        let raw = raw.trim();
        let invalid = |expected: String| FieldInputError::InvalidValue {
            field: self.key(),
            value: raw.to_string(),
            expected,
        };
        match self.spec().kind {
            FieldKind::Numeric { min, max, .. } => raw
                .parse::<i64>()
                .map(|n| FieldValue::Number(n.clamp(min, max)))
                .map_err(|_| invalid(format!("an integer in {min}..={max}"))),
            FieldKind::Choice { options } => {
                let expected = || options.join(", ");
                match self {
                    FieldName::LearningStyle => raw
                        .parse::<LearningStyle>()
                        .map(FieldValue::LearningStyle)
                        .map_err(|_| invalid(expected())),
                    _ => raw
                        .parse::<StudyEnvironment>()
                        .map(FieldValue::StudyEnvironment)
                        .map_err(|_| invalid(expected())),
                }
            }
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FieldName {
    type Err = FieldInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|name| name.key() == s)
            .ok_or_else(|| FieldInputError::UnknownField(s.to_string()))
    }
}

/// Static description of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: FieldName,
    /// Display label (e.g. "Study Hours / Day").
    pub label: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Bounded integer stepped by buttons. Bounds are inclusive.
    Numeric {
        min: i64,
        max: i64,
        step: i64,
        default: i64,
    },
    /// One of a fixed option set; unset until chosen.
    Choice { options: &'static [&'static str] },
}

impl FieldKind {
    /// The value shown when the user has not edited the field.
    pub fn default_value(&self) -> Option<FieldValue> {
        match self {
            FieldKind::Numeric { default, .. } => Some(FieldValue::Number(*default)),
            FieldKind::Choice { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearningStyle {
    Visual,
    Auditory,
    Reading,
    Kinesthetic,
}

impl LearningStyle {
    pub const NAMES: &'static [&'static str] = &["Visual", "Auditory", "Reading", "Kinesthetic"];
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LearningStyle::Visual => "Visual",
            LearningStyle::Auditory => "Auditory",
            LearningStyle::Reading => "Reading",
            LearningStyle::Kinesthetic => "Kinesthetic",
        };
        f.write_str(name)
    }
}

impl FromStr for LearningStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "visual" => Ok(LearningStyle::Visual),
            "auditory" => Ok(LearningStyle::Auditory),
            "reading" => Ok(LearningStyle::Reading),
            "kinesthetic" => Ok(LearningStyle::Kinesthetic),
            other => Err(format!("unknown learning style: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudyEnvironment {
    Quiet,
    Moderate,
    Noisy,
}

impl StudyEnvironment {
    pub const NAMES: &'static [&'static str] = &["Quiet", "Moderate", "Noisy"];
}

impl fmt::Display for StudyEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StudyEnvironment::Quiet => "Quiet",
            StudyEnvironment::Moderate => "Moderate",
            StudyEnvironment::Noisy => "Noisy",
        };
        f.write_str(name)
    }
}

impl FromStr for StudyEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(StudyEnvironment::Quiet),
            "moderate" => Ok(StudyEnvironment::Moderate),
            "noisy" => Ok(StudyEnvironment::Noisy),
            other => Err(format!("unknown study environment: {other}")),
        }
    }
}

/// A single field value as it appears in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    LearningStyle(LearningStyle),
    StudyEnvironment(StudyEnvironment),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::LearningStyle(s) => write!(f, "{s}"),
            FieldValue::StudyEnvironment(e) => write!(f, "{e}"),
        }
    }
}

/// The user's explicit edits. Serialises directly as the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    values: BTreeMap<FieldName, FieldValue>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one field, leaving every other key untouched.
    pub fn set(&mut self, name: FieldName, value: FieldValue) {
        self.values.insert(name, value);
    }

    /// Drop an edit so the field reads as its default (or unset) again.
    pub fn remove(&mut self, name: FieldName) -> Option<FieldValue> {
        self.values.remove(&name)
    }

    /// The explicitly edited value, if any.
    pub fn get(&self, name: FieldName) -> Option<FieldValue> {
        self.values.get(&name).copied()
    }

    /// The value to display or step from: the edit, else the field default.
    pub fn effective_value(&self, name: FieldName) -> Option<FieldValue> {
        resolve_effective_value(self, name, name.spec().kind.default_value())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Serialise as the JSON request body.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Default::default()))
    }
}

/// Resolve the value of `name`, falling back to `default` when unedited.
///
/// An explicit edit always wins, including an edit to 0.
pub fn resolve_effective_value(
    state: &FormState,
    name: FieldName,
    default: Option<FieldValue>,
) -> Option<FieldValue> {
    state.get(name).or(default)
}

/// The endpoint's answer. Both fields are kept exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub predicted_exam_score: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub predicted_performance_class: Value,
}

impl PredictionResult {
    /// Read the two result keys out of any JSON answer.
    ///
    /// Only an object carries them. Any other value yields an empty result.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(mut map) => Self {
                predicted_exam_score: map.remove("predicted_exam_score").unwrap_or_default(),
                predicted_performance_class: map
                    .remove("predicted_performance_class")
                    .unwrap_or_default(),
            },
            _ => Self::default(),
        }
    }

    pub fn score(&self) -> Option<f64> {
        match &self.predicted_exam_score {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn performance_class(&self) -> Option<&str> {
        self.predicted_performance_class.as_str()
    }

    /// Score as displayed: the received value verbatim, empty when absent.
    pub fn score_text(&self) -> String {
        display_raw(&self.predicted_exam_score)
    }

    pub fn performance_text(&self) -> String {
        display_raw(&self.predicted_performance_class)
    }
}

fn display_raw(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_parse_back() {
        for name in FieldName::ALL {
            assert_eq!(name.key().parse::<FieldName>().unwrap(), name);
        }
        assert!(matches!(
            "gpa".parse::<FieldName>(),
            Err(FieldInputError::UnknownField(_))
        ));
    }

    #[test]
    fn field_table_matches_documented_defaults() {
        let expect = [
            (FieldName::StudyHoursPerDay, 12, 5),
            (FieldName::SleepHours, 12, 7),
            (FieldName::AttendancePercentage, 100, 85),
            (FieldName::MotivationLevel, 10, 7),
            (FieldName::StressLevel, 10, 4),
            (FieldName::ScreenTime, 12, 5),
        ];
        for (name, want_max, want_default) in expect {
            match name.spec().kind {
                FieldKind::Numeric {
                    min,
                    max,
                    step,
                    default,
                } => {
                    assert_eq!((min, max, step, default), (0, want_max, 1, want_default));
                }
                FieldKind::Choice { .. } => panic!("{name} should be numeric"),
            }
        }
        assert_eq!(FieldName::LearningStyle.spec().kind.default_value(), None);
        assert_eq!(FieldName::StudyEnvironment.spec().kind.default_value(), None);
    }

    #[test]
    fn empty_form_serialises_to_empty_object() {
        let form = FormState::new();
        assert_eq!(serde_json::to_string(&form).unwrap(), "{}");
    }

    #[test]
    fn form_serialises_with_snake_case_keys_and_integers() {
        let mut form = FormState::new();
        form.set(FieldName::StudyHoursPerDay, FieldValue::Number(6));
        form.set(
            FieldName::LearningStyle,
            FieldValue::LearningStyle(LearningStyle::Visual),
        );
        let json = serde_json::to_string(&form).unwrap();
        assert_eq!(
            json,
            r#"{"study_hours_per_day":6,"learning_style":"Visual"}"#
        );
    }

    #[test]
    fn effective_value_prefers_edits_including_zero() {
        let mut form = FormState::new();
        assert_eq!(
            form.effective_value(FieldName::SleepHours),
            Some(FieldValue::Number(7))
        );
        form.set(FieldName::SleepHours, FieldValue::Number(0));
        assert_eq!(
            form.effective_value(FieldName::SleepHours),
            Some(FieldValue::Number(0))
        );
        assert_eq!(form.effective_value(FieldName::StudyEnvironment), None);
        // Resolving never writes the default back.
        assert_eq!(form.len(), 1);
    }

    #[test]
    fn parse_value_clamps_numbers_and_matches_choices() {
        assert_eq!(
            FieldName::AttendancePercentage.parse_value("140").unwrap(),
            FieldValue::Number(100)
        );
        assert_eq!(
            FieldName::StressLevel.parse_value("-3").unwrap(),
            FieldValue::Number(0)
        );
        assert_eq!(
            FieldName::LearningStyle.parse_value("kinesthetic").unwrap(),
            FieldValue::LearningStyle(LearningStyle::Kinesthetic)
        );
        assert_eq!(
            FieldName::StudyEnvironment.parse_value("Noisy").unwrap(),
            FieldValue::StudyEnvironment(StudyEnvironment::Noisy)
        );
        assert!(FieldName::StudyEnvironment.parse_value("Loud").is_err());
        assert!(FieldName::SleepHours.parse_value("seven").is_err());
    }

    #[test]
    fn prediction_result_keeps_fields_verbatim() {
        let result: PredictionResult = serde_json::from_str(
            r#"{"predicted_exam_score":78.5,"predicted_performance_class":"Good","extra":1}"#,
        )
        .unwrap();
        assert_eq!(result.score(), Some(78.5));
        assert_eq!(result.performance_class(), Some("Good"));
        assert_eq!(result.score_text(), "78.5");
        assert_eq!(result.performance_text(), "Good");
    }

    #[test]
    fn prediction_result_absent_fields_are_empty() {
        let result: PredictionResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result.score_text(), "");
        assert_eq!(result.performance_text(), "");
        assert_eq!(result.score(), None);
    }

    #[test]
    fn from_json_reads_objects_only() {
        let result = PredictionResult::from_json(serde_json::json!({
            "predicted_exam_score": "81",
            "predicted_performance_class": "Excellent"
        }));
        assert_eq!(result.score(), Some(81.0));
        assert_eq!(result.performance_text(), "Excellent");

        for other in [
            Value::Null,
            serde_json::json!(78),
            serde_json::json!("x"),
            serde_json::json!([1, "Good"]),
        ] {
            assert_eq!(PredictionResult::from_json(other), PredictionResult::default());
        }
    }
}
