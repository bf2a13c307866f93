//! Qualifications: what the position requires and what is merely preferred.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{checked, non_empty, Fragment};
use crate::cursor::Cursor;
use crate::document::{Element, Scalar};
use crate::validation::{Rule, Validator, ValidationError};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ATTRIBUTE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9._-]*$").expect("valid regex"));

/// Attribute names written by [`Qualification`] itself.
const KNOWN_ATTRIBUTES: [&str; 4] = ["type", "description", "yearsOfExperience", "category"];

/// `<P>` under `<QualificationsRequired>`: free-text requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualificationsRequiredSummary {
    /// Optional; an absent summary produces an empty `<P/>`.
    pub summary: Option<String>,
}

impl QualificationsRequiredSummary {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
        }
    }
}

impl Fragment for QualificationsRequiredSummary {
    const OPERATION: &'static str = "qualifications_required_summary";
    const ELEMENT: &'static str = "P";
    const PARENT: Cursor = Cursor::QualificationsRequired;

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn to_element(&self) -> Element {
        match non_empty(&self.summary) {
            Some(summary) => Element::leaf(Self::ELEMENT, summary),
            None => Element::empty(Self::ELEMENT),
        }
    }
}

/// `<P>` under `<QualificationsPreferred>`: free-text merits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualificationsPreferredSummary {
    pub summary: Option<String>,
}

impl QualificationsPreferredSummary {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
        }
    }
}

impl Fragment for QualificationsPreferredSummary {
    const OPERATION: &'static str = "qualifications_preferred_summary";
    const ELEMENT: &'static str = "P";
    const PARENT: Cursor = Cursor::QualificationsPreferred;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("summary", self.summary.as_deref()).required();
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::leaf(Self::ELEMENT, checked(&self.summary))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualificationType {
    Skill,
    Experience,
    Education,
    License,
    Certification,
    Equipment,
    Other,
}

impl QualificationType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::License => "license",
            Self::Certification => "certification",
            Self::Equipment => "equipment",
            Self::Other => "other",
        }
    }
}

/// Whether prior experience is demanded. The API encodes this in the
/// `yearsOfExperience` attribute with two fixed codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Experience {
    NotRequired,
    Required,
}

impl Experience {
    /// Every accepted code.
    pub const CODES: [i64; 2] = [1, 4];

    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::NotRequired => 1,
            Self::Required => 4,
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::NotRequired),
            4 => Some(Self::Required),
            _ => None,
        }
    }
}

impl From<bool> for Experience {
    fn from(required: bool) -> Self {
        if required {
            Self::Required
        } else {
            Self::NotRequired
        }
    }
}

/// `<Qualification>`: one requirement, expressed entirely in attributes.
///
/// `required` is the readable way to state an experience requirement and
/// wins over a raw `years_of_experience` code when both are given. Any
/// unrecognised keys in a deserialized record are kept in `extra` and written
/// as additional attributes, in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Qualification {
    #[serde(rename = "type")]
    pub kind: Option<QualificationType>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Raw experience code, 1 or 4.
    pub years_of_experience: Option<i64>,
    pub required: Option<bool>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Scalar>,
}

impl Qualification {
    pub fn new(kind: QualificationType) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// An experience requirement.
    pub fn experience(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Self::new(QualificationType::Experience)
        }
    }

    /// A driving licence of the given category, e.g. `B`.
    pub fn drivers_license(category: impl Into<String>) -> Self {
        Self {
            description: Some("DriversLicense".to_string()),
            category: Some(category.into()),
            ..Self::new(QualificationType::License)
        }
    }

    /// Access to a car.
    pub fn car() -> Self {
        Self {
            description: Some("Car".to_string()),
            ..Self::new(QualificationType::Equipment)
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// The experience level that will be written, if any.
    #[must_use]
    pub fn resolved_experience(&self) -> Option<Experience> {
        match self.required {
            Some(required) => Some(Experience::from(required)),
            None => self.years_of_experience.and_then(Experience::from_code),
        }
    }

    fn is(&self, kind: QualificationType) -> bool {
        self.kind == Some(kind)
    }
}

impl Fragment for Qualification {
    const OPERATION: &'static str = "qualification";
    const ELEMENT: &'static str = "Qualification";
    const PARENT: Cursor = Cursor::QualificationsRequired;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);

        // The boolean form replaces the raw code entirely.
        v.when(self.required.is_none(), |v| {
            let rules = v
                .number("yearsOfExperience", self.years_of_experience)
                .one_of(&Experience::CODES);
            if self.is(QualificationType::Experience) {
                rules.required();
            }
        });
        v.when(self.is(QualificationType::License), |v| {
            v.text("description", self.description.as_deref())
                .required()
                .one_of(&["DriversLicense"]);
            v.text("category", self.category.as_deref()).required();
        });
        v.when(self.is(QualificationType::Equipment), |v| {
            v.text("description", self.description.as_deref())
                .required()
                .one_of(&["Car"]);
        });
        for name in self.extra.keys() {
            v.check(
                ATTRIBUTE_NAME_PATTERN.is_match(name) && !KNOWN_ATTRIBUTES.contains(&name.as_str()),
                "extra",
                Rule::Pattern("a valid attribute name not already written by qualification()"),
                Some(name.clone()),
            );
        }
        v.finish()
    }

    fn to_element(&self) -> Element {
        let mut element = Element::empty(Self::ELEMENT)
            .with_optional_attribute("type", self.kind.map(QualificationType::as_str))
            .with_optional_attribute("description", non_empty(&self.description))
            .with_optional_attribute(
                "yearsOfExperience",
                self.resolved_experience().map(Experience::code),
            )
            .with_optional_attribute("category", non_empty(&self.category));
        for (name, value) in self.extra.iter().filter(|(_, value)| !value.is_empty()) {
            element = element.with_attribute(name, value.clone());
        }
        element
    }
}
