//! The posting itself and the records attached directly to it.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{checked, non_empty, Fragment};
use crate::cursor::Cursor;
use crate::document::Element;
use crate::validation::{Validator, ValidationError};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COUNTRY_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static MUNICIPALITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("valid regex"));

/// Publication state of a posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingStatus {
    /// Publish the posting.
    #[default]
    Active,
    /// Remove a previously published posting.
    Inactive,
}

impl PostingStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// `<JobPositionPosting>`: the vacancy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPositionPosting {
    /// Posting identifier, conventionally
    /// `CountryCode-HiringOrgId-Optional1-Optional2`.
    pub id: Option<String>,
    pub status: Option<PostingStatus>,
}

impl JobPositionPosting {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            status: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: PostingStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl Fragment for JobPositionPosting {
    const OPERATION: &'static str = "job_position_posting";
    const ELEMENT: &'static str = "JobPositionPosting";
    const PARENT: Cursor = Cursor::Payload;
    const REGISTERS: Option<Cursor> = Some(Cursor::JobPositionPosting);

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("id", self.id.as_deref()).required().max_chars(50);
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::container(Self::ELEMENT)
            .with_attribute("status", self.status.unwrap_or_default().as_str())
            .with_child(Element::leaf("JobPositionPostingId", checked(&self.id)))
    }
}

/// `<HiringOrg>`: the employer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HiringOrg {
    /// Company name as shown in Platsbanken.
    pub name: Option<String>,
    /// Country-prefixed organisation number.
    pub id: Option<String>,
    pub url: Option<String>,
}

impl HiringOrg {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            id: Some(id.into()),
            url: None,
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl Fragment for HiringOrg {
    const OPERATION: &'static str = "hiring_org";
    const ELEMENT: &'static str = "HiringOrg";
    const PARENT: Cursor = Cursor::JobPositionPosting;
    const REGISTERS: Option<Cursor> = Some(Cursor::HiringOrg);

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("name", self.name.as_deref()).required();
        v.text("id", self.id.as_deref()).required();
        v.text("url", non_empty(&self.url)).uri(&["http", "https"]);
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::container(Self::ELEMENT)
            .with_child(Element::leaf("HiringOrgName", checked(&self.name)))
            .with_child(Element::leaf("HiringOrgId", checked(&self.id)))
            .with_optional_child(non_empty(&self.url).map(|url| Element::leaf("WebSite", url)))
    }
}

/// A Swedish postal address, shared by the employer contact and the
/// workplace location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostalAddress {
    /// ISO 3166-1 alpha-2, e.g. `SE`.
    pub country_code: Option<String>,
    /// Five characters, no spaces.
    pub postal_code: Option<String>,
    /// Four-digit municipality code. See
    /// [`MUNICIPALITY_UNSPECIFIED`](crate::config::MUNICIPALITY_UNSPECIFIED)
    /// and [`MUNICIPALITY_ABROAD`](crate::config::MUNICIPALITY_ABROAD).
    pub municipality: Option<String>,
    /// Visiting address.
    pub address_line: Option<String>,
    pub street_name: Option<String>,
}

impl PostalAddress {
    pub fn new(
        country_code: impl Into<String>,
        postal_code: impl Into<String>,
        municipality: impl Into<String>,
        address_line: impl Into<String>,
        street_name: impl Into<String>,
    ) -> Self {
        Self {
            country_code: Some(country_code.into()),
            postal_code: Some(postal_code.into()),
            municipality: Some(municipality.into()),
            address_line: Some(address_line.into()),
            street_name: Some(street_name.into()),
        }
    }

    pub(crate) fn validate_into(&self, v: &mut Validator) {
        v.text("countryCode", self.country_code.as_deref())
            .required()
            .exact_chars(2)
            .matches(&COUNTRY_CODE_PATTERN, "an uppercase ISO 3166-1 alpha-2 code");
        v.text("postalCode", self.postal_code.as_deref())
            .required()
            .exact_chars(5);
        v.text("municipality", self.municipality.as_deref())
            .required()
            .exact_chars(4)
            .matches(&MUNICIPALITY_PATTERN, "a four-digit municipality code");
        v.text("addressLine", self.address_line.as_deref())
            .required()
            .max_chars(50);
        v.text("streetName", self.street_name.as_deref())
            .required()
            .max_chars(50);
    }

    pub(crate) fn to_element(&self) -> Element {
        Element::container("PostalAddress")
            .with_child(Element::leaf("CountryCode", checked(&self.country_code)))
            .with_child(Element::leaf("PostalCode", checked(&self.postal_code)))
            .with_child(Element::leaf("Municipality", checked(&self.municipality)))
            .with_child(
                Element::container("DeliveryAddress")
                    .with_child(Element::leaf("AddressLine", checked(&self.address_line)))
                    .with_child(Element::leaf("StreetName", checked(&self.street_name))),
            )
    }
}

/// `<Contact>` under `<HiringOrg>`: the employer's postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HiringOrgContact {
    pub address: PostalAddress,
}

impl From<PostalAddress> for HiringOrgContact {
    fn from(address: PostalAddress) -> Self {
        Self { address }
    }
}

impl Fragment for HiringOrgContact {
    const OPERATION: &'static str = "hiring_org_contact";
    const ELEMENT: &'static str = "Contact";
    const PARENT: Cursor = Cursor::HiringOrg;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        self.address.validate_into(&mut v);
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::container(Self::ELEMENT).with_child(self.address.to_element())
    }
}

/// `<PostDetail>`: publication window and the recruiter who registered the
/// posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostDetail {
    /// First day of publication, `yyyy-mm-dd`. The service uses the
    /// submission date when omitted.
    pub start_date: Option<String>,
    /// Last day of publication, `yyyy-mm-dd`.
    pub end_date: Option<String>,
    /// Not published.
    pub recruiter_name: Option<String>,
    pub recruiter_email: Option<String>,
}

impl PostDetail {
    pub fn new(end_date: impl Into<String>, recruiter_name: impl Into<String>) -> Self {
        Self {
            end_date: Some(end_date.into()),
            recruiter_name: Some(recruiter_name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    #[must_use]
    pub fn with_recruiter_email(mut self, email: impl Into<String>) -> Self {
        self.recruiter_email = Some(email.into());
        self
    }
}

impl Fragment for PostDetail {
    const OPERATION: &'static str = "post_detail";
    const ELEMENT: &'static str = "PostDetail";
    const PARENT: Cursor = Cursor::JobPositionPosting;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("startDate", non_empty(&self.start_date)).iso_date();
        v.text("endDate", self.end_date.as_deref())
            .required()
            .iso_date();
        v.text("recruiterName", self.recruiter_name.as_deref())
            .required()
            .max_chars(100);
        v.text("recruiterEmail", non_empty(&self.recruiter_email))
            .email();
        v.finish()
    }

    fn to_element(&self) -> Element {
        let dated = |tag: &str, date: &str| {
            Element::container(tag).with_child(Element::leaf("Date", date))
        };
        let contact = Element::container("Contact")
            .with_child(
                Element::container("PersonName")
                    .with_child(Element::leaf("FormattedName", checked(&self.recruiter_name))),
            )
            .with_optional_child(
                non_empty(&self.recruiter_email).map(|email| Element::leaf("E-mail", email)),
            );

        Element::container(Self::ELEMENT)
            .with_optional_child(non_empty(&self.start_date).map(|date| dated("StartDate", date)))
            .with_child(dated("EndDate", checked(&self.end_date)))
            .with_child(Element::container("PostedBy").with_child(contact))
    }
}

/// `<NumberToFill>`: how many people the employer is hiring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberToFill {
    pub number: Option<i64>,
}

impl NumberToFill {
    pub fn new(number: i64) -> Self {
        Self {
            number: Some(number),
        }
    }
}

impl Fragment for NumberToFill {
    const OPERATION: &'static str = "number_to_fill";
    const ELEMENT: &'static str = "NumberToFill";
    const PARENT: Cursor = Cursor::JobPositionPosting;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.number("number", self.number).required().between(1, 999);
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::leaf(Self::ELEMENT, self.number.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Rule;

    fn address() -> PostalAddress {
        PostalAddress::new("SE", "11356", "0180", "Storgatan 1", "Storgatan")
    }

    #[test]
    fn test_posting_status_defaults_to_active() {
        let el = JobPositionPosting::new("SE-ORG-1").to_element();
        assert_eq!(el.attribute("status").unwrap().to_string(), "active");
        let el = JobPositionPosting::new("SE-ORG-1")
            .with_status(PostingStatus::Inactive)
            .to_element();
        assert_eq!(el.attribute("status").unwrap().to_string(), "inactive");
    }

    #[test]
    fn test_posting_id_length() {
        assert!(JobPositionPosting::new("x".repeat(50)).validate().is_ok());
        let err = JobPositionPosting::new("x".repeat(51)).validate().unwrap_err();
        assert_eq!(err.violation("id").unwrap().rule, Rule::MaxLength(50));
    }

    #[test]
    fn test_posting_status_rejects_unknown_value() {
        let parsed: Result<JobPositionPosting, _> =
            serde_json::from_str(r#"{"id":"SE-1","status":"foo"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_hiring_org_website_optional() {
        let el = HiringOrg::new("Acme", "46-5566778899").to_element();
        let names: Vec<&str> = el.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["HiringOrgName", "HiringOrgId"]);

        let el = HiringOrg::new("Acme", "46-5566778899")
            .with_url("https://acme.example")
            .to_element();
        assert_eq!(
            el.child("WebSite").unwrap().text().unwrap().to_string(),
            "https://acme.example"
        );
    }

    #[test]
    fn test_hiring_org_rejects_bad_url() {
        let err = HiringOrg::new("Acme", "1").with_url("acme").validate().unwrap_err();
        assert_eq!(err.fields(), vec!["url"]);
    }

    #[test]
    fn test_postal_address_rules() {
        let contact = HiringOrgContact::from(PostalAddress::new(
            "se", "1135", "Stockholm", "x".repeat(51), "Storgatan",
        ));
        let err = contact.validate().unwrap_err();
        assert_eq!(
            err.fields(),
            vec!["countryCode", "postalCode", "municipality", "addressLine"]
        );
    }

    #[test]
    fn test_reserved_municipality_codes_are_valid() {
        for code in ["9090", "9999"] {
            let mut a = address();
            a.municipality = Some(code.to_string());
            assert!(HiringOrgContact::from(a).validate().is_ok());
        }
    }

    #[test]
    fn test_hiring_org_contact_element() {
        let el = HiringOrgContact::from(address()).to_element();
        assert_eq!(el.name, "Contact");
        assert_eq!(
            el.find_by_path("PostalAddress/DeliveryAddress/StreetName")
                .unwrap()
                .text()
                .unwrap()
                .to_string(),
            "Storgatan"
        );
    }

    #[test]
    fn test_hiring_org_contact_deserializes_flat() {
        let contact: HiringOrgContact = serde_json::from_str(
            r#"{"countryCode":"SE","postalCode":"11356","municipality":"0180","addressLine":"Storgatan 1","streetName":"Storgatan"}"#,
        )
        .unwrap();
        assert_eq!(contact.address, address());
    }

    #[test]
    fn test_post_detail_dates() {
        assert!(PostDetail::new("2018-12-01", "Alex").validate().is_ok());
        let err = PostDetail::new("2018-13-01", "Alex")
            .with_start_date("yesterday")
            .validate()
            .unwrap_err();
        assert_eq!(err.fields(), vec!["startDate", "endDate"]);
        assert!(PostDetail::default().validate().unwrap_err().has_violation("endDate"));
    }

    #[test]
    fn test_post_detail_omits_absent_optionals() {
        let el = PostDetail::new("2018-12-01", "Alex").to_element();
        let names: Vec<&str> = el.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["EndDate", "PostedBy"]);
        assert!(el.find_by_path("PostedBy/Contact/E-mail").is_none());

        let el = PostDetail::new("2018-12-01", "Alex")
            .with_start_date("2018-09-01")
            .with_recruiter_email("alex@example.org")
            .to_element();
        assert_eq!(
            el.find_by_path("StartDate/Date").unwrap().text().unwrap().to_string(),
            "2018-09-01"
        );
        assert_eq!(
            el.find_by_path("PostedBy/Contact/PersonName/FormattedName")
                .unwrap()
                .text()
                .unwrap()
                .to_string(),
            "Alex"
        );
        assert!(el.find_by_path("PostedBy/Contact/E-mail").is_some());
    }

    #[test]
    fn test_number_to_fill_range() {
        assert!(NumberToFill::new(1).validate().is_ok());
        assert!(NumberToFill::new(999).validate().is_ok());
        assert!(NumberToFill::new(1000).validate().is_err());
        assert!(NumberToFill::new(0).validate().is_err());
        assert!(NumberToFill::default().validate().is_err());
    }
}
