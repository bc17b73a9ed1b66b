//! SkyLink Validation Core
//!
//! DOM-free form validation for the SkyLink booking pages.
//! The browser bindings in `skylink-validation-wasm` drive the same engine
//! from real `blur` / `input` / `submit` listeners; tests drive it directly
//! through [`FormEvent`]s against the in-memory [`Form`].
//!
//! ```
//! use skylink_validation_core::{Field, Form, FormEvent, FormValidationEngine, RuleTable};
//!
//! let engine = FormValidationEngine::new(RuleTable::standard());
//! let form = Form::new("register")
//!     .with_field(Field::new("password").with_value("abc"))
//!     .with_field(Field::new("confirm_password").with_value("abc"));
//!
//! let mut session = engine.register_form(form);
//! session.attach_field_watchers();
//!
//! session.dispatch(&FormEvent::blurred("password"));
//! assert!(session.host().field("password").unwrap().is_invalid());
//! ```

pub mod config;
pub mod email;
pub mod engine;
pub mod error;
pub mod event;
pub mod form;
pub mod host;
pub mod notice;
pub mod rule;
pub mod seats;
pub mod string;
pub mod travel;

pub use config::{Config, EngineConfig, RulesConfig, SeatsConfig};
pub use email::is_valid_email;
pub use engine::{FormSession, FormValidationEngine, SubmitPolicy};
pub use error::FieldInvalid;
pub use event::{EventOutcome, FormEvent, SubmitDecision};
pub use form::{Constraints, Field, Form};
pub use host::{FieldValues, FormHost};
pub use notice::{Notice, NoticeLevel};
pub use rule::{Check, Rule, RuleTable};
pub use seats::{Seat, SeatMap, SeatToggle};
pub use travel::{
    check_flight_search, check_return_date, earliest_travel_date, return_date_enabled, TripType,
};
