//! How applicants respond to the posting.

use serde::{Deserialize, Serialize};

use super::{checked, non_empty, Fragment};
use crate::cursor::Cursor;
use crate::document::Element;
use crate::validation::{Validator, ValidationError};

/// The only distribution the service accepts.
pub const DISTRIBUTE_EXTERNAL: &str = "external";

/// `<HowToApply>`: container for application methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HowToApply {
    /// Defaults to [`DISTRIBUTE_EXTERNAL`].
    pub distribute: Option<String>,
}

impl HowToApply {
    fn distribute(&self) -> &str {
        self.distribute.as_deref().unwrap_or(DISTRIBUTE_EXTERNAL)
    }
}

impl Fragment for HowToApply {
    const OPERATION: &'static str = "how_to_apply";
    const ELEMENT: &'static str = "HowToApply";
    const PARENT: Cursor = Cursor::JobPositionPosting;
    const REGISTERS: Option<Cursor> = Some(Cursor::HowToApply);

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("distribute", Some(self.distribute()))
            .required()
            .one_of(&[DISTRIBUTE_EXTERNAL]);
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::container(Self::ELEMENT).with_attribute("distribute", self.distribute())
    }
}

/// `<ByWeb>`: apply through the employer's web form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ByWeb {
    pub url: Option<String>,
    pub summary: Option<String>,
}

impl ByWeb {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            summary: None,
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

impl Fragment for ByWeb {
    const OPERATION: &'static str = "by_web";
    const ELEMENT: &'static str = "ByWeb";
    const PARENT: Cursor = Cursor::ApplicationMethods;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("url", self.url.as_deref())
            .required()
            .max_chars(200)
            .uri(&["http", "https"]);
        v.text("summary", self.summary.as_deref()).max_chars(340);
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::container(Self::ELEMENT)
            .with_child(Element::leaf("URL", checked(&self.url)))
            .with_optional_child(
                non_empty(&self.summary).map(|summary| Element::leaf("SummaryText", summary)),
            )
    }
}

/// `<ByEmail>`: apply by e-mail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ByEmail {
    pub email: Option<String>,
}

impl ByEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }
}

impl Fragment for ByEmail {
    const OPERATION: &'static str = "by_email";
    const ELEMENT: &'static str = "ByEmail";
    const PARENT: Cursor = Cursor::ApplicationMethods;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("email", self.email.as_deref())
            .required()
            .max_chars(100)
            .email();
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::container(Self::ELEMENT).with_child(Element::leaf("E-mail", checked(&self.email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Rule;

    #[test]
    fn test_how_to_apply_defaults_to_external() {
        let h = HowToApply::default();
        assert!(h.validate().is_ok());
        let el = h.to_element();
        assert_eq!(el.attribute("distribute").unwrap().to_string(), "external");
        assert!(el.is_container());
    }

    #[test]
    fn test_how_to_apply_rejects_other_distribution() {
        let h = HowToApply {
            distribute: Some("internal".to_string()),
        };
        let err = h.validate().unwrap_err();
        assert!(matches!(err.violation("distribute").unwrap().rule, Rule::OneOf(_)));
    }

    #[test]
    fn test_by_web_url_rules() {
        assert!(ByWeb::new("https://jobs.example.org/apply").validate().is_ok());
        assert!(ByWeb::new("not a valid url").validate().is_err());
        assert!(ByWeb::default().validate().is_err());

        let long = format!("https://example.org/{}", "a".repeat(181));
        let err = ByWeb::new(long).validate().unwrap_err();
        assert_eq!(err.violation("url").unwrap().rule, Rule::MaxLength(200));
    }

    #[test]
    fn test_by_web_summary() {
        let web = ByWeb::new("https://example.org").with_summary("s".repeat(341));
        assert!(web.validate().unwrap_err().has_violation("summary"));

        let el = ByWeb::new("https://example.org").with_summary("Ansök senast 1 dec").to_element();
        assert_eq!(
            el.child("SummaryText").unwrap().text().unwrap().to_string(),
            "Ansök senast 1 dec"
        );
        assert!(ByWeb::new("https://example.org").to_element().child("SummaryText").is_none());
    }

    #[test]
    fn test_by_email() {
        assert!(ByEmail::new("jobs@example.org").validate().is_ok());
        assert!(ByEmail::new("jobs").validate().is_err());
        let el = ByEmail::new("jobs@example.org").to_element();
        assert_eq!(el.child("E-mail").unwrap().text().unwrap().to_string(), "jobs@example.org");
    }
}
