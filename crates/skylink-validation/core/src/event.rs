//! Typed form events and what handling them produced

use crate::error::FieldInvalid;

/// Everything the engine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The field lost focus: run its rule
    FieldBlurred { field: String },
    /// The field's value changed: clear its annotation, do not validate
    FieldChanged { field: String },
    /// Someone tried to submit the form
    FormSubmitted,
}

impl FormEvent {
    pub fn blurred(field: impl Into<String>) -> Self {
        Self::FieldBlurred {
            field: field.into(),
        }
    }

    pub fn changed(field: impl Into<String>) -> Self {
        Self::FieldChanged {
            field: field.into(),
        }
    }

    /// The field the event targets, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::FieldBlurred { field } | Self::FieldChanged { field } => Some(field),
            Self::FormSubmitted => None,
        }
    }
}

/// Whether a submit attempt may go ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed,
    /// The host should cancel the event and stop its propagation.
    ///
    /// `failures` lists custom-rule failures found during submit; it is
    /// empty when only baseline constraints failed.
    Cancel { failures: Vec<FieldInvalid> },
}

impl SubmitDecision {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancel { .. })
    }
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Nobody was listening for this event
    Ignored,
    /// Optimistic clear on change
    Cleared { field: String },
    /// Blur-time validation
    Validated(Result<(), FieldInvalid>),
    Submit(SubmitDecision),
}
