//! DOM adapter
//!
//! Page contract:
//! - forms to gate carry `.needs-validation`
//! - watched inputs carry `.form-control` and a `name`
//! - error text goes in a `.invalid-feedback` div appended to the input's parent;
//!   a server-rendered `.invalid-feedback` already there is replaced, not duplicated
//! - `trip_type` radios enable or disable the `return_date` input

use std::rc::Rc;

use skylink_validation_core::{
    return_date_enabled, EventOutcome, FieldValues, FormEvent, FormHost, FormValidationEngine,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

const INVALID_CLASS: &str = "is-invalid";
const FEEDBACK_CLASS: &str = "invalid-feedback";
const ATTEMPTED_CLASS: &str = "was-validated";
const CONTROL_SELECTOR: &str = ".form-control";
const GATED_ATTR: &str = "data-skylink-gated";
const WATCHED_ATTR: &str = "data-skylink-watched";
const TRIP_TYPE_ATTR: &str = "data-skylink-trip-type";

/// Tags `element` with `marker`; false when it already carried it.
fn claim(element: &Element, marker: &str) -> bool {
    if element.has_attribute(marker) {
        return false;
    }
    let _ = element.set_attribute(marker, "");
    true
}

/// A form (or the whole document, for inputs outside any form) seen as a
/// [`FormHost`].
///
/// When built for a specific control, that control answers for its own name
/// even if other controls in the scope share it.
pub struct DomForm {
    scope: Element,
    target: Option<Element>,
}

impl DomForm {
    pub fn new(scope: Element) -> Self {
        Self {
            scope,
            target: None,
        }
    }

    /// The host seen from `control`, e.g. the input that fired a blur.
    pub fn for_control(control: &Element) -> Option<Self> {
        let mut host = Self::around(control)?;
        host.target = Some(control.clone());
        Some(host)
    }

    /// The form around `control`, else the document element.
    pub fn around(control: &Element) -> Option<Self> {
        control
            .closest("form")
            .ok()
            .flatten()
            .or_else(|| control.owner_document().and_then(|d| d.document_element()))
            .map(Self::new)
    }

    fn control(&self, name: &str) -> Option<Element> {
        if let Some(target) = &self.target {
            if target.get_attribute("name").as_deref() == Some(name) {
                return Some(target.clone());
            }
        }
        self.scope
            .query_selector(&format!("[name=\"{}\"]", escape_attr(name)))
            .ok()
            .flatten()
    }

    // Our own tagged message first, then any untagged one the server rendered
    fn feedback(&self, control: &Element, name: &str) -> Option<Element> {
        let parent = control.parent_element()?;
        let tagged = format!(".{}[data-field=\"{}\"]", FEEDBACK_CLASS, escape_attr(name));
        let untagged = format!(":scope > .{}:not([data-field])", FEEDBACK_CLASS);
        [tagged, untagged]
            .iter()
            .find_map(|selector| parent.query_selector(selector).ok().flatten())
    }
}

fn escape_attr(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn control_value(control: &Element) -> Option<String> {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(textarea) = control.dyn_ref::<HtmlTextAreaElement>() {
        return Some(textarea.value());
    }
    control.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
}

impl FieldValues for DomForm {
    fn value_of(&self, name: &str) -> Option<String> {
        self.control(name).and_then(|control| control_value(&control))
    }
}

impl FormHost for DomForm {
    fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let Ok(controls) = self.scope.query_selector_all(CONTROL_SELECTOR) else {
            return names;
        };
        for i in 0..controls.length() {
            let name = controls
                .item(i)
                .and_then(|node| node.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute("name"));
            if let Some(name) = name {
                if !name.is_empty() && !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    fn set_invalid(&mut self, field: &str, invalid: bool) {
        if let Some(control) = self.control(field) {
            let classes = control.class_list();
            let _ = if invalid {
                classes.add_1(INVALID_CLASS)
            } else {
                classes.remove_1(INVALID_CLASS)
            };
        }
    }

    fn remove_error_message(&mut self, field: &str) -> bool {
        let Some(control) = self.control(field) else {
            return false;
        };
        match self.feedback(&control, field) {
            Some(feedback) => {
                feedback.remove();
                true
            }
            None => false,
        }
    }

    fn insert_error_message(&mut self, field: &str, message: &str) {
        let Some(control) = self.control(field) else {
            return;
        };
        let (Some(parent), Some(document)) = (control.parent_element(), control.owner_document())
        else {
            return;
        };
        let Ok(feedback) = document.create_element("div") else {
            return;
        };
        feedback.set_class_name(FEEDBACK_CLASS);
        let _ = feedback.set_attribute("data-field", field);
        feedback.set_text_content(Some(message));
        if let Err(err) = parent.append_child(&feedback) {
            web_sys::console::warn_2(&JsValue::from_str("could not insert error message"), &err);
        }
    }

    fn check_validity(&self) -> bool {
        self.scope
            .dyn_ref::<HtmlFormElement>()
            .map_or(true, |form| form.check_validity())
    }

    fn mark_attempted(&mut self) {
        let _ = self.scope.class_list().add_1(ATTEMPTED_CLASS);
    }
}

/// Intercepts submits on `form`: cancels them while the engine says so.
///
/// Returns false when the form was already registered.
pub fn register_form(engine: &Rc<FormValidationEngine>, form: HtmlFormElement) -> Result<bool, JsValue> {
    let scope: Element = form.clone().into();
    if !claim(&scope, GATED_ATTR) {
        return Ok(false);
    }
    let engine = Rc::clone(engine);

    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let mut host = DomForm::new(scope.clone());
        if let EventOutcome::Submit(decision) = engine.handle(&mut host, &FormEvent::FormSubmitted) {
            if decision.is_cancelled() {
                event.prevent_default();
                event.stop_propagation();
            }
        }
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    // Listeners live as long as the page
    on_submit.forget();
    Ok(true)
}

/// Validates `control` on blur and clears its error on input.
///
/// Returns false for unnamed controls and controls already watched.
pub fn attach_field_watchers(engine: &Rc<FormValidationEngine>, control: &Element) -> Result<bool, JsValue> {
    let Some(name) = control.get_attribute("name").filter(|n| !n.is_empty()) else {
        return Ok(false);
    };
    if !claim(control, WATCHED_ATTR) {
        return Ok(false);
    }

    for (event_name, event) in [
        ("blur", FormEvent::blurred(name.as_str())),
        ("input", FormEvent::changed(name.as_str())),
    ] {
        let engine = Rc::clone(engine);
        let control_ref = control.clone();
        let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            if let Some(mut host) = DomForm::for_control(&control_ref) {
                engine.handle(&mut host, &event);
            }
        });
        control.add_event_listener_with_callback(event_name, handler.as_ref().unchecked_ref())?;
        handler.forget();
    }
    Ok(true)
}

// One-way disables and clears `return_date`; anything else enables it
fn apply_trip_type(radio: &HtmlInputElement) {
    if !radio.checked() {
        return;
    }
    let return_date = DomForm::around(radio)
        .and_then(|host| host.control("return_date"))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    let Some(return_date) = return_date else {
        return;
    };

    let enabled = return_date_enabled(&radio.value());
    return_date.set_disabled(!enabled);
    if !enabled {
        return_date.set_value("");
    }
}

/// Keeps `return_date` in step with a `trip_type` radio.
///
/// Applies the radio's current state right away. Returns false when the
/// radio was already wired.
pub fn attach_trip_type_toggle(radio: &HtmlInputElement) -> Result<bool, JsValue> {
    if !claim(radio, TRIP_TYPE_ATTR) {
        return Ok(false);
    }
    apply_trip_type(radio);

    let radio_ref = radio.clone();
    let on_change = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        apply_trip_type(&radio_ref);
    });
    radio.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(true)
}
