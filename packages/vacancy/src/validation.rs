//! Field validation combinators.
//!
//! Every parameter struct validates itself through a [`Validator`], which
//! collects one [`Violation`] per offending field instead of stopping at the
//! first failure. Rules on a single field short-circuit: once a field has
//! failed, later rules for that field are skipped.
//!
//! ```
//! use platsbanken_vacancy::validation::Validator;
//!
//! let mut v = Validator::new("job_position_title");
//! v.text("title", Some("Welder")).required().max_chars(75);
//! assert!(v.finish().is_ok());
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Maximum number of addresses accepted in a `;`-separated e-mail list.
pub const MAX_EMAIL_LIST_LEN: usize = 3;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// A single constraint a field can violate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be present and non-empty.
    Required,
    /// Value must be exactly this many characters.
    ExactLength(usize),
    /// Value must not exceed this many characters.
    MaxLength(usize),
    /// Value must be one of the listed values.
    OneOf(Vec<String>),
    /// Number must lie within the inclusive range.
    Range { min: i64, max: i64 },
    /// Value must be a valid e-mail address.
    Email,
    /// Value must be a list of up to `max` e-mail addresses separated by `;`.
    EmailList { max: usize },
    /// Value must be an absolute URI with one of the given schemes.
    Uri { schemes: Vec<String> },
    /// Value must be a real calendar date formatted `yyyy-mm-dd`.
    IsoDate,
    /// Value must match a named pattern.
    Pattern(&'static str),
    /// The summed length of several fields must not exceed `max`.
    CombinedLength { fields: Vec<&'static str>, max: usize },
    /// The element may appear at most `max` times.
    MaxOccurrences(usize),
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "is required"),
            Self::ExactLength(n) => write!(f, "must be exactly {n} characters"),
            Self::MaxLength(n) => write!(f, "must be at most {n} characters"),
            Self::OneOf(values) => write!(f, "must be one of [{}]", values.join(", ")),
            Self::Range { min, max } => write!(f, "must be between {min} and {max}"),
            Self::Email => write!(f, "must be a valid e-mail address"),
            Self::EmailList { max } => write!(
                f,
                "must be at most {max} valid e-mail addresses separated by ';'"
            ),
            Self::Uri { schemes } => write!(f, "must be a valid {} URI", schemes.join("/")),
            Self::IsoDate => write!(f, "must be a valid date formatted yyyy-mm-dd"),
            Self::Pattern(description) => write!(f, "must be {description}"),
            Self::CombinedLength { fields, max } => write!(
                f,
                "combined length of {} must not exceed {max} characters",
                fields.join(" + ")
            ),
            Self::MaxOccurrences(n) => write!(f, "may appear at most {n} times"),
        }
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Parameter name as the caller supplied it (camelCase).
    pub field: String,
    /// The rule that failed.
    pub rule: Rule,
    /// The rejected value, if one was supplied.
    pub value: Option<String>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "\"{}\" {} (got {value:?})", self.field, self.rule),
            None => write!(f, "\"{}\" {}", self.field, self.rule),
        }
    }
}

/// Parameters rejected by an operation's validation rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid parameters for {operation}(): {}", format_violations(.violations))]
pub struct ValidationError {
    /// The operation whose parameters were rejected.
    pub operation: &'static str,
    /// All violations found, in field declaration order.
    pub violations: Vec<Violation>,
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Find the violation recorded for a field.
    #[must_use]
    pub fn violation(&self, field: &str) -> Option<&Violation> {
        self.violations.iter().find(|v| v.field == field)
    }

    /// Check whether a field was rejected.
    #[must_use]
    pub fn has_violation(&self, field: &str) -> bool {
        self.violation(field).is_some()
    }

    /// Names of all rejected fields.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

/// Collects violations for one operation's parameters.
#[derive(Debug)]
pub struct Validator {
    operation: &'static str,
    violations: Vec<Violation>,
}

impl Validator {
    /// Create a validator for the named operation.
    #[must_use]
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            violations: Vec::new(),
        }
    }

    /// Start a rule chain for a string field.
    pub fn text<'v, 'a>(
        &'v mut self,
        field: &'static str,
        value: Option<&'a str>,
    ) -> TextRules<'v, 'a> {
        TextRules {
            validator: self,
            field,
            value,
            failed: false,
        }
    }

    /// Start a rule chain for a numeric field.
    pub fn number(&mut self, field: &'static str, value: Option<i64>) -> NumberRules<'_> {
        NumberRules {
            validator: self,
            field,
            value,
            failed: false,
        }
    }

    /// Require a value to be present, for fields that are neither text nor numbers.
    pub fn present<T: fmt::Debug>(&mut self, field: &'static str, value: Option<&T>) -> &mut Self {
        if value.is_none() {
            self.reject(field, Rule::Required, None);
        }
        self
    }

    /// Apply `rules` only when `condition` holds.
    pub fn when(&mut self, condition: bool, rules: impl FnOnce(&mut Self)) -> &mut Self {
        if condition {
            rules(self);
        }
        self
    }

    /// Record `rule` against `field` unless `ok`.
    pub fn check(
        &mut self,
        ok: bool,
        field: &'static str,
        rule: Rule,
        value: Option<String>,
    ) -> &mut Self {
        if !ok {
            self.reject(field, rule, value);
        }
        self
    }

    /// Whether no violation has been recorded so far.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Finish validation.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                operation: self.operation,
                violations: self.violations,
            })
        }
    }

    fn reject(&mut self, field: &'static str, rule: Rule, value: Option<String>) {
        self.violations.push(Violation {
            field: field.to_string(),
            rule,
            value,
        });
    }
}

/// Rule chain for one string field.
///
/// Every rule except [`TextRules::required`] passes when the value is absent.
pub struct TextRules<'v, 'a> {
    validator: &'v mut Validator,
    field: &'static str,
    value: Option<&'a str>,
    failed: bool,
}

impl<'a> TextRules<'_, 'a> {
    /// Value must be present and non-empty.
    pub fn required(mut self) -> Self {
        if !self.failed && self.value.is_none_or(str::is_empty) {
            self.fail(Rule::Required);
        }
        self
    }

    /// Value must be exactly `n` characters.
    pub fn exact_chars(self, n: usize) -> Self {
        self.test(|s| s.chars().count() == n, || Rule::ExactLength(n))
    }

    /// Value must be at most `n` characters.
    pub fn max_chars(self, n: usize) -> Self {
        self.test(|s| s.chars().count() <= n, || Rule::MaxLength(n))
    }

    /// Value must equal one of `allowed`.
    pub fn one_of(self, allowed: &[&str]) -> Self {
        self.test(
            |s| allowed.iter().any(|a| *a == s),
            || Rule::OneOf(allowed.iter().map(ToString::to_string).collect()),
        )
    }

    /// Value must be a valid e-mail address.
    pub fn email(self) -> Self {
        self.test(is_email, || Rule::Email)
    }

    /// Value must be up to `max` e-mail addresses separated by `;`.
    pub fn email_list(self, max: usize) -> Self {
        self.test(
            |s| {
                let addresses: Vec<&str> = s.split(';').map(str::trim).collect();
                addresses.len() <= max && addresses.iter().all(|a| is_email(a))
            },
            || Rule::EmailList { max },
        )
    }

    /// Value must be an absolute URI using one of `schemes`.
    pub fn uri(self, schemes: &[&str]) -> Self {
        self.test(
            |s| {
                url::Url::parse(s)
                    .map(|u| schemes.iter().any(|scheme| *scheme == u.scheme()) && u.has_host())
                    .unwrap_or(false)
            },
            || Rule::Uri {
                schemes: schemes.iter().map(ToString::to_string).collect(),
            },
        )
    }

    /// Value must be a calendar date formatted `yyyy-mm-dd`.
    pub fn iso_date(self) -> Self {
        self.test(is_iso_date, || Rule::IsoDate)
    }

    /// Value must match `pattern`, described as `description` in errors.
    pub fn matches(self, pattern: &Regex, description: &'static str) -> Self {
        self.test(|s| pattern.is_match(s), || Rule::Pattern(description))
    }

    fn test(mut self, ok: impl FnOnce(&'a str) -> bool, rule: impl FnOnce() -> Rule) -> Self {
        if let Some(value) = self.value {
            if !self.failed && !ok(value) {
                self.fail(rule());
            }
        }
        self
    }

    fn fail(&mut self, rule: Rule) {
        self.failed = true;
        let value = self.value.map(ToString::to_string);
        self.validator.reject(self.field, rule, value);
    }
}

/// Rule chain for one numeric field.
pub struct NumberRules<'v> {
    validator: &'v mut Validator,
    field: &'static str,
    value: Option<i64>,
    failed: bool,
}

impl NumberRules<'_> {
    /// Value must be present.
    pub fn required(mut self) -> Self {
        if !self.failed && self.value.is_none() {
            self.fail(Rule::Required);
        }
        self
    }

    /// Value must equal one of `allowed`.
    pub fn one_of(self, allowed: &[i64]) -> Self {
        self.test(
            |n| allowed.contains(&n),
            || Rule::OneOf(allowed.iter().map(ToString::to_string).collect()),
        )
    }

    /// Value must lie in `min..=max`.
    pub fn between(self, min: i64, max: i64) -> Self {
        self.test(|n| (min..=max).contains(&n), || Rule::Range { min, max })
    }

    fn test(mut self, ok: impl FnOnce(i64) -> bool, rule: impl FnOnce() -> Rule) -> Self {
        if let Some(value) = self.value {
            if !self.failed && !ok(value) {
                self.fail(rule());
            }
        }
        self
    }

    fn fail(&mut self, rule: Rule) {
        self.failed = true;
        let value = self.value.map(|n| n.to_string());
        self.validator.reject(self.field, rule, value);
    }
}

/// Check a single e-mail address.
#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Check a `yyyy-mm-dd` date string, rejecting impossible dates.
#[must_use]
pub fn is_iso_date(value: &str) -> bool {
    DATE_PATTERN.is_match(value)
        && chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
