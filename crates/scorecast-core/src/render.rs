//! Plain-text rendering of the form, the result, and the failure notice.

use std::fmt::Write as _;

use crate::controller::SubmissionController;
use crate::model::{FieldKind, FieldName, FormState, PredictionResult};

pub const TITLE: &str = "Student Performance Predictor";
pub const SUBTITLE: &str = "Fill only what you know, the model handles the rest";

/// Placeholder shown for a choice field nobody has picked yet.
pub const UNSET: &str = "Select";

/// One line per field: label, effective value, and its range or options.
pub fn render_form(form: &FormState) -> String {
    let width = FieldName::ALL
        .iter()
        .map(|name| name.spec().label.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for name in FieldName::ALL {
        let spec = name.spec();
        let value = form
            .effective_value(name)
            .map(|v| v.to_string())
            .unwrap_or_else(|| UNSET.to_string());
        let hint = match spec.kind {
            FieldKind::Numeric { min, max, .. } => format!("[- {value} +]  ({min}..={max})"),
            FieldKind::Choice { options } => format!("{value}  ({})", options.join(" | ")),
        };
        let marker = if form.get(name).is_some() { "*" } else { " " };
        let _ = writeln!(out, "{marker} {:<width$}  {hint}", spec.label);
    }
    out
}

/// The result section exactly as received.
pub fn render_result(result: &PredictionResult) -> String {
    format!(
        "Prediction\nExam Score: {}\nPerformance: {}\n",
        result.score_text(),
        result.performance_text()
    )
}

/// Everything below the form: result, notice, or nothing.
pub fn render_outcome(controller: &SubmissionController) -> String {
    let mut out = String::new();
    if let Some(notice) = controller.notice() {
        let _ = writeln!(out, "{notice}");
    }
    if let Some(result) = controller.result() {
        out.push_str(&render_result(result));
    }
    out
}

/// Full screen: title, fields, submit button, outcome.
pub fn render_screen(controller: &SubmissionController) -> String {
    let mut out = format!("{TITLE}\n{SUBTITLE}\n\n");
    out.push_str(&render_form(controller.form()));
    let _ = writeln!(out, "\n[ {} ]", controller.submit_label());
    let outcome = render_outcome(controller);
    if !outcome.is_empty() {
        out.push('\n');
        out.push_str(&outcome);
    }
    out
}
