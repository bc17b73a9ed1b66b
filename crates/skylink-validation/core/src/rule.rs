// File: src/rule.rs
// Purpose: Validation rules and the immutable name -> rule table

use std::collections::HashMap;
use std::fmt;

use crate::config::RulesConfig;
use crate::email;
use crate::error::FieldInvalid;
use crate::host::FieldValues;
use crate::string;

pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PASSWORD_MESSAGE: &str = "Password must be at least 6 characters long";
pub const CONFIRM_PASSWORD_MESSAGE: &str = "Passwords do not match";
pub const CARD_NUMBER_MESSAGE: &str = "Please enter a valid card number";
pub const CVV_MESSAGE: &str = "Please enter a valid CVV";

/// The predicate half of a rule.
#[derive(Clone)]
pub enum Check {
    /// Email address shape, see [`email::is_valid_email`]
    Email,
    /// At least this many characters
    MinChars(usize),
    /// Value must equal the current raw value of another field
    EqualsField(String),
    /// Only ASCII digits, between `min` and `max` of them
    Digits {
        min: usize,
        max: usize,
        /// Drop interior whitespace first ("4111 1111 ...")
        strip_whitespace: bool,
    },
    /// Anything else; must stay pure
    Custom(fn(&str, &dyn FieldValues) -> bool),
}

impl Check {
    /// Evaluates the check. Never panics, whatever the input.
    pub fn passes(&self, value: &str, siblings: &dyn FieldValues) -> bool {
        match self {
            Check::Email => email::is_valid_email(value),
            Check::MinChars(min) => string::has_min_chars(value, *min),
            // A missing sibling never matches
            Check::EqualsField(other) => siblings
                .value_of(other)
                .map_or(false, |expected| expected == value),
            Check::Digits {
                min,
                max,
                strip_whitespace,
            } => {
                if *strip_whitespace {
                    string::is_digits_between(&string::strip_whitespace(value), *min, *max)
                } else {
                    string::is_digits_between(value, *min, *max)
                }
            }
            Check::Custom(check) => check(value, siblings),
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Email => write!(f, "Email"),
            Check::MinChars(min) => f.debug_tuple("MinChars").field(min).finish(),
            Check::EqualsField(other) => f.debug_tuple("EqualsField").field(other).finish(),
            Check::Digits {
                min,
                max,
                strip_whitespace,
            } => f
                .debug_struct("Digits")
                .field("min", min)
                .field("max", max)
                .field("strip_whitespace", strip_whitespace)
                .finish(),
            Check::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// A check plus the message shown when it fails.
#[derive(Debug, Clone)]
pub struct Rule {
    check: Check,
    message: String,
}

impl Rule {
    pub fn new(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
        }
    }

    pub fn check(&self) -> &Check {
        &self.check
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Runs the rule for `field` against an already-trimmed value.
    pub fn evaluate(
        &self,
        field: &str,
        value: &str,
        siblings: &dyn FieldValues,
    ) -> Result<(), FieldInvalid> {
        if self.check.passes(value, siblings) {
            Ok(())
        } else {
            Err(FieldInvalid::new(field, self.message.as_str()))
        }
    }
}

/// Immutable mapping from field name to its rule.
///
/// At most one rule per name. Names without a rule are always valid.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<String, Rule>,
}

impl RuleTable {
    /// A table with no rules; every field passes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The booking site's rules with their stock thresholds and messages.
    pub fn standard() -> Self {
        Self::from_config(&RulesConfig::default())
    }

    /// Builds the booking site's rules from configured thresholds.
    ///
    /// Message overrides in `config.messages` replace the stock text for the
    /// matching field name.
    pub fn from_config(config: &RulesConfig) -> Self {
        let message = |field: &str, stock: &str| -> String {
            config
                .messages
                .get(field)
                .cloned()
                .unwrap_or_else(|| stock.to_string())
        };

        let password_message = if config.password_min_length == 6 {
            PASSWORD_MESSAGE.to_string()
        } else {
            format!(
                "Password must be at least {} characters long",
                config.password_min_length
            )
        };

        Self::empty()
            .with_rule("email", Rule::new(Check::Email, message("email", EMAIL_MESSAGE)))
            .with_rule(
                "password",
                Rule::new(
                    Check::MinChars(config.password_min_length),
                    message("password", &password_message),
                ),
            )
            .with_rule(
                "confirm_password",
                Rule::new(
                    Check::EqualsField("password".to_string()),
                    message("confirm_password", CONFIRM_PASSWORD_MESSAGE),
                ),
            )
            .with_rule(
                "card_number",
                Rule::new(
                    Check::Digits {
                        min: config.card_min_digits,
                        max: config.card_max_digits,
                        strip_whitespace: true,
                    },
                    message("card_number", CARD_NUMBER_MESSAGE),
                ),
            )
            .with_rule(
                "cvv",
                Rule::new(
                    Check::Digits {
                        min: config.cvv_min_digits,
                        max: config.cvv_max_digits,
                        strip_whitespace: false,
                    },
                    message("cvv", CVV_MESSAGE),
                ),
            )
    }

    /// Adds or replaces the rule for `field`.
    pub fn with_rule(mut self, field: impl Into<String>, rule: Rule) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Rule> {
        self.rules.get(field)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Field names that carry a rule, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Validates a raw value: trims it, looks up the rule, runs it.
    ///
    /// Sibling values are passed through untouched.
    pub fn check(
        &self,
        field: &str,
        raw_value: &str,
        siblings: &dyn FieldValues,
    ) -> Result<(), FieldInvalid> {
        match self.rules.get(field) {
            Some(rule) => rule.evaluate(field, raw_value.trim(), siblings),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn no_siblings() -> HashMap<String, String> {
        HashMap::new()
    }

    fn siblings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[rstest]
    #[case("first_name", "")]
    #[case("first_name", "   ")]
    #[case("departure_airport", "!!!")]
    #[case("Email", "not an email")]
    #[case("", "anything at all")]
    fn test_unlisted_fields_always_valid(#[case] field: &str, #[case] value: &str) {
        let table = RuleTable::standard();
        assert!(table.check(field, value, &no_siblings()).is_ok());
    }

    #[rstest]
    #[case("a@b.com", true)]
    #[case("  a@b.com  ", true)]
    #[case("ab.com", false)]
    #[case("a@bcom", false)]
    #[case("a.b@com", false)]
    #[case("", false)]
    fn test_email_rule(#[case] value: &str, #[case] valid: bool) {
        let table = RuleTable::standard();
        let result = table.check("email", value, &no_siblings());
        assert_eq!(result.is_ok(), valid, "value {:?}", value);
        if !valid {
            assert_eq!(result.unwrap_err().message, EMAIL_MESSAGE);
        }
    }

    #[rstest]
    #[case("abcde", false)]
    #[case("abcdef", true)]
    #[case("abcdefg", true)]
    // Trimmed before counting
    #[case("  abcde  ", false)]
    #[case("", false)]
    fn test_password_rule(#[case] value: &str, #[case] valid: bool) {
        let table = RuleTable::standard();
        let result = table.check("password", value, &no_siblings());
        assert_eq!(result.is_ok(), valid);
        if !valid {
            assert_eq!(
                result.unwrap_err(),
                FieldInvalid::new("password", PASSWORD_MESSAGE)
            );
        }
    }

    #[test]
    fn test_confirm_password_reads_current_sibling() {
        let table = RuleTable::standard();
        let mut form = siblings(&[("password", "secret1")]);
        assert!(table.check("confirm_password", "secret1", &form).is_ok());

        form.insert("password".to_string(), "secret2".to_string());
        let err = table
            .check("confirm_password", "secret1", &form)
            .unwrap_err();
        assert_eq!(err.message, CONFIRM_PASSWORD_MESSAGE);
    }

    #[test]
    fn test_confirm_password_without_password_field() {
        let table = RuleTable::standard();
        assert!(table.check("confirm_password", "", &no_siblings()).is_err());
    }

    #[rstest]
    #[case("4111 1111 1111 1111", true)]
    #[case("4111111111111111", true)]
    #[case("4222222222222", true)]
    #[case("1234567890123456789", true)]
    #[case("12345678901234567890", false)]
    #[case("123", false)]
    #[case("4111-1111-1111-1111", false)]
    #[case("", false)]
    fn test_card_number_rule(#[case] value: &str, #[case] valid: bool) {
        let table = RuleTable::standard();
        assert_eq!(table.check("card_number", value, &no_siblings()).is_ok(), valid);
    }

    #[rstest]
    #[case("123", true)]
    #[case("1234", true)]
    #[case("12", false)]
    #[case("12345", false)]
    #[case("1 23", false)]
    #[case("abc", false)]
    fn test_cvv_rule(#[case] value: &str, #[case] valid: bool) {
        let table = RuleTable::standard();
        assert_eq!(table.check("cvv", value, &no_siblings()).is_ok(), valid);
    }

    #[test]
    fn test_standard_table_names() {
        assert_eq!(
            RuleTable::standard().field_names(),
            vec!["card_number", "confirm_password", "cvv", "email", "password"]
        );
    }

    #[test]
    fn test_custom_rule() {
        fn no_same_airports(value: &str, siblings: &dyn FieldValues) -> bool {
            siblings.value_of("departure_airport").as_deref() != Some(value)
        }

        let table = RuleTable::empty().with_rule(
            "arrival_airport",
            Rule::new(
                Check::Custom(no_same_airports),
                "Arrival airport must differ from departure",
            ),
        );
        let form = siblings(&[("departure_airport", "JFK")]);
        assert!(table.check("arrival_airport", "LHR", &form).is_ok());
        assert!(table.check("arrival_airport", "JFK", &form).is_err());
    }

    #[test]
    fn test_rule_debug() {
        let table = RuleTable::standard();
        assert_eq!(format!("{:?}", table.get("email").unwrap().check()), "Email");
        assert_eq!(
            format!("{:?}", table.get("cvv").unwrap().check()),
            "Digits { min: 3, max: 4, strip_whitespace: false }"
        );
        fn always(_: &str, _: &dyn FieldValues) -> bool {
            true
        }
        assert_eq!(format!("{:?}", Check::Custom(always)), "Custom(..)");
    }

    #[test]
    fn test_configured_thresholds_and_messages() {
        let mut config = RulesConfig::default();
        config.password_min_length = 8;
        config
            .messages
            .insert("cvv".to_string(), "CVV looks wrong".to_string());

        let table = RuleTable::from_config(&config);
        let err = table.check("password", "abcdefg", &no_siblings()).unwrap_err();
        assert_eq!(err.message, "Password must be at least 8 characters long");

        let err = table.check("cvv", "1", &no_siblings()).unwrap_err();
        assert_eq!(err.message, "CVV looks wrong");
    }
}
