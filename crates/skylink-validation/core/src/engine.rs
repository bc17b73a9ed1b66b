// File: src/engine.rs
// Purpose: Form validation engine - per-field feedback and submission gating

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::FieldInvalid;
use crate::event::{EventOutcome, FormEvent, SubmitDecision};
use crate::form::Form;
use crate::host::{FieldValues, FormHost};
use crate::rule::RuleTable;

/// What a submit attempt checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Only the host's built-in constraints gate submission. Custom rules
    /// run on blur alone, so a never-focused field is not checked.
    #[default]
    BaselineOnly,
    /// Built-in constraints, then every custom rule; failures are annotated.
    BaselineAndRules,
}

/// Runs the rule table against a form host in response to [`FormEvent`]s.
///
/// Immutable once built; one engine serves every form on a page.
#[derive(Debug, Clone)]
pub struct FormValidationEngine {
    rules: RuleTable,
    submit_policy: SubmitPolicy,
}

impl FormValidationEngine {
    pub fn new(rules: RuleTable) -> Self {
        Self {
            rules,
            submit_policy: SubmitPolicy::default(),
        }
    }

    /// Rule table and submit policy as configured
    pub fn from_config(config: &Config) -> Self {
        Self::new(RuleTable::from_config(&config.rules))
            .with_submit_policy(config.engine.submit_policy)
    }

    pub fn with_submit_policy(mut self, policy: SubmitPolicy) -> Self {
        self.submit_policy = policy;
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn submit_policy(&self) -> SubmitPolicy {
        self.submit_policy
    }

    /// Starts intercepting submits for `host`.
    ///
    /// Field events are ignored until [`FormSession::attach_field_watchers`].
    pub fn register_form<H: FormHost>(&self, host: H) -> FormSession<'_, H> {
        FormSession {
            engine: self,
            host,
            watched: BTreeSet::new(),
        }
    }

    /// Checks one field against its rule without touching the host.
    ///
    /// A field the form does not have is validated as an empty value.
    pub fn validate_field<H>(&self, host: &H, field: &str) -> Result<(), FieldInvalid>
    where
        H: FieldValues + ?Sized,
    {
        let value = host.value_of(field).unwrap_or_default();
        self.rules.check(field, &value, &host)
    }

    /// Handles one event against `host`, regardless of subscriptions.
    pub fn handle<H>(&self, host: &mut H, event: &FormEvent) -> EventOutcome
    where
        H: FormHost + ?Sized,
    {
        match event {
            FormEvent::FieldBlurred { field } => {
                EventOutcome::Validated(self.revalidate_field(host, field))
            }
            FormEvent::FieldChanged { field } => {
                self.clear_field_error(host, field);
                EventOutcome::Cleared {
                    field: field.clone(),
                }
            }
            FormEvent::FormSubmitted => EventOutcome::Submit(self.submit(host)),
        }
    }

    /// Clears the field, runs its rule and annotates on failure.
    fn revalidate_field<H>(&self, host: &mut H, field: &str) -> Result<(), FieldInvalid>
    where
        H: FormHost + ?Sized,
    {
        self.clear_field_error(host, field);
        let result = self.validate_field(&*host, field);
        if let Err(err) = &result {
            self.show_field_error(host, err);
        }
        result
    }

    /// Flags the field and leaves exactly one message next to it.
    pub fn show_field_error<H>(&self, host: &mut H, err: &FieldInvalid)
    where
        H: FormHost + ?Sized,
    {
        debug!("Field '{}' invalid: {}", err.field, err.message);
        host.set_invalid(&err.field, true);
        while host.remove_error_message(&err.field) {}
        host.insert_error_message(&err.field, &err.message);
    }

    /// Removes the flag and any message. Does not run the rule; idempotent.
    pub fn clear_field_error<H>(&self, host: &mut H, field: &str)
    where
        H: FormHost + ?Sized,
    {
        trace!("Clearing annotation on '{}'", field);
        host.set_invalid(field, false);
        while host.remove_error_message(field) {}
    }

    fn submit<H>(&self, host: &mut H) -> SubmitDecision
    where
        H: FormHost + ?Sized,
    {
        let baseline_ok = host.check_validity();

        let mut failures = Vec::new();
        if self.submit_policy == SubmitPolicy::BaselineAndRules {
            for field in host.field_names() {
                if self.rules.get(&field).is_none() {
                    continue;
                }
                if let Err(err) = self.revalidate_field(host, &field) {
                    failures.push(err);
                }
            }
        }

        // Attempted on every try, so hints show even after a pass
        host.mark_attempted();

        if baseline_ok && failures.is_empty() {
            debug!("Submit allowed");
            SubmitDecision::Proceed
        } else {
            debug!(
                "Submit cancelled (baseline ok: {}, rule failures: {})",
                baseline_ok,
                failures.len()
            );
            SubmitDecision::Cancel { failures }
        }
    }
}

/// A form registered with an engine, with its field subscriptions.
#[derive(Debug)]
pub struct FormSession<'e, H> {
    engine: &'e FormValidationEngine,
    host: H,
    watched: BTreeSet<String>,
}

impl<'e, H: FormHost> FormSession<'e, H> {
    /// Subscribes every field currently in the form to blur and change events.
    ///
    /// Returns how many fields were newly subscribed. Fields added to the
    /// host later need another call.
    pub fn attach_field_watchers(&mut self) -> usize {
        let before = self.watched.len();
        self.watched.extend(self.host.field_names());
        self.watched.len() - before
    }

    pub fn is_watching(&self, field: &str) -> bool {
        self.watched.contains(field)
    }

    /// Delivers an event the way the host would: field events only reach
    /// subscribed fields, submits always reach the interceptor.
    pub fn dispatch(&mut self, event: &FormEvent) -> EventOutcome {
        if let Some(field) = event.field() {
            if !self.watched.contains(field) {
                trace!("No watcher on '{}', ignoring {:?}", field, event);
                return EventOutcome::Ignored;
            }
        }
        self.engine.handle(&mut self.host, event)
    }

    pub fn blur(&mut self, field: &str) -> EventOutcome {
        self.dispatch(&FormEvent::blurred(field))
    }

    pub fn submit(&mut self) -> EventOutcome {
        self.dispatch(&FormEvent::FormSubmitted)
    }

    /// Validates without annotating
    pub fn validate_field(&self, field: &str) -> Result<(), FieldInvalid> {
        self.engine.validate_field(&self.host, field)
    }

    pub fn engine(&self) -> &'e FormValidationEngine {
        self.engine
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

impl FormSession<'_, Form> {
    /// Types a new value into a field, then delivers the change event.
    pub fn input(&mut self, field: &str, value: impl Into<String>) -> EventOutcome {
        self.host.set_value(field, value);
        self.dispatch(&FormEvent::changed(field))
    }
}
