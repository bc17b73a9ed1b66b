// File: src/form.rs
// Purpose: In-memory form host with baseline (HTML5-style) constraints

use regex::Regex;

use crate::email;
use crate::host::{FieldValues, FormHost};
use crate::string;

/// Built-in constraints, checked by [`FormHost::check_validity`].
///
/// Mirrors the browser's constraint validation: an empty value only fails
/// `required`; pattern, length and type checks apply to non-empty values.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    pub required: bool,
    pub pattern: Option<Regex>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub email: bool,
}

impl Constraints {
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Adds a `pattern` attribute; like the browser, it must match the whole value.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(&format!("^(?:{})$", pattern))?);
        Ok(self)
    }

    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// `type="email"`
    pub fn with_email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn is_satisfied_by(&self, value: &str) -> bool {
        if value.is_empty() {
            return !self.required;
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(value) {
                return false;
            }
        }
        let len = string::char_count(value);
        if self.min_length.map_or(false, |min| len < min) {
            return false;
        }
        if self.max_length.map_or(false, |max| len > max) {
            return false;
        }
        !self.email || email::is_valid_email(value)
    }
}

/// A single named input.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    value: String,
    constraints: Constraints,
    invalid: bool,
    messages: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            constraints: Constraints::default(),
            invalid: false,
            messages: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// The message currently shown next to the field
    pub fn error_message(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }

    /// Every message node attached to the field; more than one is a bug
    pub fn error_messages(&self) -> &[String] {
        &self.messages
    }
}

/// In-memory form: an ordered list of fields plus the "attempted" flag.
#[derive(Debug, Clone, Default)]
pub struct Form {
    name: String,
    fields: Vec<Field>,
    attempted: bool,
}

impl Form {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            attempted: false,
        }
    }

    /// Appends a field. Lookups by name find the first match, as
    /// `querySelector` would.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Replaces a field's value, as typing would. Returns `false` for unknown fields.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn is_attempted(&self) -> bool {
        self.attempted
    }

    /// Names of fields currently flagged invalid
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.invalid)
            .map(|f| f.name.as_str())
            .collect()
    }
}

impl FieldValues for Form {
    fn value_of(&self, name: &str) -> Option<String> {
        self.field(name).map(|f| f.value.clone())
    }
}

impl FormHost for Form {
    fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    fn set_invalid(&mut self, field: &str, invalid: bool) {
        if let Some(field) = self.field_mut(field) {
            field.invalid = invalid;
        }
    }

    fn remove_error_message(&mut self, field: &str) -> bool {
        match self.field_mut(field) {
            Some(field) if !field.messages.is_empty() => {
                field.messages.remove(0);
                true
            }
            _ => false,
        }
    }

    fn insert_error_message(&mut self, field: &str, message: &str) {
        if let Some(field) = self.field_mut(field) {
            field.messages.push(message.to_string());
        }
    }

    fn check_validity(&self) -> bool {
        self.fields
            .iter()
            .all(|f| f.constraints.is_satisfied_by(&f.value))
    }

    fn mark_attempted(&mut self) {
        self.attempted = true;
    }
}
