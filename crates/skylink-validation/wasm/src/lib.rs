//! SkyLink Validation WASM
//!
//! WebAssembly bindings for the SkyLink booking pages.
//! Wires the core validation engine to the page's forms and exposes the
//! seat picker and travel checks to page scripts.

use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use skylink_validation_core::{
    check_flight_search, check_return_date, earliest_travel_date, return_date_enabled, Config,
    FormValidationEngine, Notice, RuleTable, Seat, SeatMap, SeatToggle,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement};

pub mod dom;

pub use dom::DomForm;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of a single-field check, as seen from JavaScript
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FieldVerdict {
    pub valid: bool,
    pub message: String,
}

fn from_optional<T>(value: JsValue) -> Result<T, JsValue>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse argument: {}", e)))
}

fn document() -> Result<web_sys::Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

/// Validate a single field value against the booking rules
///
/// `config` is optional and takes the same shape as `skylink.toml`; its
/// `rules` section sets thresholds and messages.
///
/// # Example (JavaScript)
/// ```javascript
/// const { valid, message } = validateField('confirm_password', 'secret1', {
///     password: 'secret1'
/// });
/// validateField('password', 'abcdefg', {}, { rules: { password_min_length: 8 } });
/// ```
#[wasm_bindgen(js_name = validateField)]
pub fn validate_field(
    field_name: &str,
    value: &str,
    siblings: JsValue,
    config: JsValue,
) -> Result<JsValue, JsValue> {
    let siblings: HashMap<String, String> = from_optional(siblings)?;
    let config: Config = from_optional(config)?;
    let rules = RuleTable::from_config(&config.rules);

    let verdict = match rules.check(field_name, value, &siblings) {
        Ok(()) => FieldVerdict {
            valid: true,
            message: String::new(),
        },
        Err(err) => FieldVerdict {
            valid: false,
            message: err.message,
        },
    };
    Ok(serde_wasm_bindgen::to_value(&verdict)?)
}

/// Gate every `.needs-validation` form and watch every `.form-control`
///
/// `config` takes the same shape as `skylink.toml`, e.g.
/// `{ engine: { submit_policy: "baseline_and_rules" } }`; omit it for defaults.
///
/// Safe to call again after new markup is added: forms and controls already
/// wired are skipped. Returns how many forms and controls were newly wired.
#[wasm_bindgen(js_name = initFormValidation)]
pub fn init_form_validation(config: JsValue) -> Result<u32, JsValue> {
    let config: Config = from_optional(config)?;
    let engine = Rc::new(FormValidationEngine::from_config(&config));
    let document = document()?;
    let mut wired = 0;

    let forms = document.query_selector_all(".needs-validation")?;
    for i in 0..forms.length() {
        if let Some(form) = forms.item(i).and_then(|n| n.dyn_into::<HtmlFormElement>().ok()) {
            if dom::register_form(&engine, form)? {
                wired += 1;
            }
        }
    }

    let controls = document.query_selector_all(".form-control")?;
    for i in 0..controls.length() {
        if let Some(control) = controls.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            if dom::attach_field_watchers(&engine, &control)? {
                wired += 1;
            }
        }
    }
    Ok(wired)
}

/// Wire every `trip_type` radio to the `return_date` input
///
/// Returns how many radios were newly wired.
#[wasm_bindgen(js_name = initTripTypeToggle)]
pub fn init_trip_type_toggle() -> Result<u32, JsValue> {
    let radios = document()?.query_selector_all("input[name=\"trip_type\"]")?;
    let mut wired = 0;
    for i in 0..radios.length() {
        if let Some(radio) = radios.item(i).and_then(|n| n.dyn_into::<HtmlInputElement>().ok()) {
            if dom::attach_trip_type_toggle(&radio)? {
                wired += 1;
            }
        }
    }
    Ok(wired)
}

/// Whether `return_date` should be enabled for a `trip_type` value
#[wasm_bindgen(js_name = returnDateEnabled)]
pub fn return_date_enabled_js(trip_type: &str) -> bool {
    return_date_enabled(trip_type)
}

/// Pre-submit check for the flight search form
///
/// Returns the notice to show, or `undefined` when the search may go ahead.
#[wasm_bindgen(js_name = checkFlightSearch)]
pub fn check_flight_search_js(values: JsValue) -> Result<JsValue, JsValue> {
    let values: HashMap<String, String> = from_optional(values)?;
    match check_flight_search(&values) {
        Ok(()) => Ok(JsValue::UNDEFINED),
        Err(notice) => Ok(serde_wasm_bindgen::to_value(&notice)?),
    }
}

/// Returns the notice to show when the return date must be cleared
#[wasm_bindgen(js_name = checkReturnDate)]
pub fn check_return_date_js(departure: &str, return_date: &str) -> Result<JsValue, JsValue> {
    match check_return_date(departure, return_date) {
        Ok(()) => Ok(JsValue::UNDEFINED),
        Err(notice) => Ok(serde_wasm_bindgen::to_value(&notice)?),
    }
}

/// `min` for date inputs: today, in the browser's timezone
#[wasm_bindgen(js_name = earliestTravelDate)]
pub fn earliest_travel_date_js() -> String {
    earliest_travel_date(chrono::Local::now().date_naive())
}

#[derive(Serialize)]
struct ToggleResult {
    status: &'static str,
    notice: Option<Notice>,
}

/// Seat picker state for the seat selection page
#[wasm_bindgen]
pub struct SeatPicker {
    map: SeatMap,
}

#[wasm_bindgen]
impl SeatPicker {
    /// `seats`: `[{ id, booked?, selected? }]` in layout order.
    /// `max_seats`: the raw value of the page's `max-seats` input, if any.
    /// `config`: optional, `skylink.toml` shape; `seats.max_seats` is the cap
    /// when the page gives none.
    #[wasm_bindgen(constructor)]
    pub fn new(seats: JsValue, max_seats: Option<String>, config: JsValue) -> Result<SeatPicker, JsValue> {
        let seats: Vec<Seat> = from_optional(seats)?;
        let config: Config = from_optional(config)?;
        Ok(Self {
            map: SeatMap::with_max_seats_attr(seats, max_seats.as_deref(), &config.seats),
        })
    }

    /// Returns `{ status, notice }`; `status` is one of
    /// `selected`, `deselected`, `limit`, `unavailable`.
    pub fn toggle(&mut self, id: &str) -> Result<JsValue, JsValue> {
        let result = match self.map.toggle(id) {
            SeatToggle::Selected => ToggleResult {
                status: "selected",
                notice: None,
            },
            SeatToggle::Deselected => ToggleResult {
                status: "deselected",
                notice: None,
            },
            SeatToggle::LimitReached(notice) => ToggleResult {
                status: "limit",
                notice: Some(notice),
            },
            SeatToggle::Unavailable => ToggleResult {
                status: "unavailable",
                notice: None,
            },
        };
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }

    /// Value for the `selected_seats` hidden input
    #[wasm_bindgen(js_name = hiddenValue)]
    pub fn hidden_value(&self) -> String {
        self.map.hidden_value()
    }

    #[wasm_bindgen(getter, js_name = maxSeats)]
    pub fn max_seats(&self) -> usize {
        self.map.max_seats()
    }
}
