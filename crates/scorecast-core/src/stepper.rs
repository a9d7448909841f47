//! Bounded numeric stepper bound to one form field.
//!
//! A `FieldControl` holds no value of its own. The owner passes the current
//! value in and receives the stepped value through a callback.

use crate::model::{FieldKind, FieldName, FieldValue};

/// Which stepper button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepButton {
    Decrement,
    Increment,
}

/// A decrement/increment control for a numeric field.
///
/// `min > max` is a caller error and is not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldControl {
    pub label: String,
    pub name: FieldName,
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

impl FieldControl {
    pub fn new(label: impl Into<String>, name: FieldName, min: i64, max: i64) -> Self {
        Self {
            label: label.into(),
            name,
            min,
            max,
            step: 1,
        }
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    /// Control for a field from the form table. `None` for choice fields.
    pub fn for_field(name: FieldName) -> Option<Self> {
        let spec = name.spec();
        match spec.kind {
            FieldKind::Numeric { min, max, step, .. } => {
                Some(Self::new(spec.label, name, min, max).with_step(step))
            }
            FieldKind::Choice { .. } => None,
        }
    }

    pub fn decrement(&self, current: i64) -> i64 {
        self.min.max(current.saturating_sub(self.step))
    }

    pub fn increment(&self, current: i64) -> i64 {
        self.max.min(current.saturating_add(self.step))
    }

    /// Compute the stepped value and report it through `on_change`.
    pub fn press<F>(&self, button: StepButton, current: i64, on_change: F)
    where
        F: FnOnce(FieldName, FieldValue),
    {
        let next = match button {
            StepButton::Decrement => self.decrement(current),
            StepButton::Increment => self.increment(current),
        };
        on_change(self.name, FieldValue::Number(next));
    }
}
