//! Host traits
//!
//! The engine never touches a DOM directly. It reads values through
//! [`FieldValues`] and annotates through [`FormHost`], which the in-memory
//! [`Form`](crate::Form) and the browser adapter both implement.

use std::collections::{BTreeMap, HashMap};

/// Read access to the current value of every field in a form.
pub trait FieldValues {
    /// Current raw (untrimmed) value of the named field, if the form has one.
    fn value_of(&self, name: &str) -> Option<String>;
}

impl FieldValues for HashMap<String, String> {
    fn value_of(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl FieldValues for BTreeMap<String, String> {
    fn value_of(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<T: FieldValues + ?Sized> FieldValues for &T {
    fn value_of(&self, name: &str) -> Option<String> {
        (**self).value_of(name)
    }
}

/// A live form the engine can annotate.
///
/// The methods are primitives; the annotation protocol (flag, drop the old
/// message, insert one new message) is sequenced by the engine.
pub trait FormHost: FieldValues {
    /// Names of the fields currently in the form, in document order.
    fn field_names(&self) -> Vec<String>;

    /// Sets or clears the visual invalid flag on a field.
    fn set_invalid(&mut self, field: &str, invalid: bool);

    /// Removes the error message attached to a field.
    ///
    /// Returns `false` when there was nothing to remove.
    fn remove_error_message(&mut self, field: &str) -> bool;

    /// Inserts one error message adjacent to a field.
    fn insert_error_message(&mut self, field: &str, message: &str);

    /// The host's built-in required/pattern/type constraint check.
    fn check_validity(&self) -> bool;

    /// Records that submission was attempted, so hints can be revealed.
    fn mark_attempted(&mut self);
}
