//! `<JobPositionInformation>` content: title and the description block.

use serde::{Deserialize, Serialize};

use super::{checked, non_empty, Fragment, PostalAddress};
use crate::cursor::Cursor;
use crate::document::Element;
use crate::validation::{Rule, Validator, ValidationError};

/// Longest accepted title.
pub const MAX_TITLE_CHARS: usize = 75;

/// Longest accepted benefits and pay summary, counted together.
pub const MAX_COMPENSATION_CHARS: usize = 255;

/// `<JobPositionTitle>`: the advert headline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPositionTitle {
    pub title: Option<String>,
}

impl JobPositionTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

impl Fragment for JobPositionTitle {
    const OPERATION: &'static str = "job_position_title";
    const ELEMENT: &'static str = "JobPositionTitle";
    const PARENT: Cursor = Cursor::JobPositionInformation;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("title", self.title.as_deref())
            .required()
            .max_chars(MAX_TITLE_CHARS);
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::leaf(Self::ELEMENT, checked(&self.title))
    }
}

/// `<JobPositionPurpose>`: the advert body text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPositionPurpose {
    pub purpose: Option<String>,
}

impl JobPositionPurpose {
    pub fn new(purpose: impl Into<String>) -> Self {
        Self {
            purpose: Some(purpose.into()),
        }
    }
}

impl Fragment for JobPositionPurpose {
    const OPERATION: &'static str = "job_position_purpose";
    const ELEMENT: &'static str = "JobPositionPurpose";
    const PARENT: Cursor = Cursor::JobPositionDescription;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("purpose", self.purpose.as_deref()).required();
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::leaf(Self::ELEMENT, checked(&self.purpose))
    }
}

/// `<JobPositionLocation>`: where the work is done.
///
/// The municipality and country code are repeated in `<LocationSummary>`,
/// which is what makes the posting searchable by location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobPositionLocation {
    pub address: PostalAddress,
}

impl From<PostalAddress> for JobPositionLocation {
    fn from(address: PostalAddress) -> Self {
        Self { address }
    }
}

impl Fragment for JobPositionLocation {
    const OPERATION: &'static str = "job_position_location";
    const ELEMENT: &'static str = "JobPositionLocation";
    const PARENT: Cursor = Cursor::JobPositionDescription;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        self.address.validate_into(&mut v);
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::container(Self::ELEMENT)
            .with_child(self.address.to_element())
            .with_child(
                Element::container("LocationSummary")
                    .with_child(Element::leaf("Municipality", checked(&self.address.municipality)))
                    .with_child(Element::leaf("CountryCode", checked(&self.address.country_code))),
            )
    }
}

/// Working hours. Full time is 38 hours a week or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    Full,
    Part,
}

impl ScheduleType {
    fn marker(self) -> &'static str {
        match self {
            Self::Full => "FullTime",
            Self::Part => "PartTime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationType {
    /// Permanent employment.
    Regular,
    /// Fixed-term employment; needs a [`TermLength`].
    Temporary,
}

/// Term length codes for temporary employment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermLength {
    /// Six months or longer.
    SixMonthsOrLonger,
    /// Three to six months.
    ThreeToSixMonths,
    /// Summer months, June to August.
    Summer,
    /// Eleven days to three months.
    ElevenDaysToThreeMonths,
    /// Ten days at most.
    TenDaysOrLess,
}

impl TermLength {
    /// Every accepted code.
    pub const CODES: [i64; 5] = [2, 3, 4, 7, 8];

    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::SixMonthsOrLonger => 2,
            Self::ThreeToSixMonths => 3,
            Self::Summer => 4,
            Self::ElevenDaysToThreeMonths => 7,
            Self::TenDaysOrLess => 8,
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            2 => Some(Self::SixMonthsOrLonger),
            3 => Some(Self::ThreeToSixMonths),
            4 => Some(Self::Summer),
            7 => Some(Self::ElevenDaysToThreeMonths),
            8 => Some(Self::TenDaysOrLess),
            _ => None,
        }
    }
}

/// `<Classification>`: schedule and duration of the employment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Classification {
    pub schedule_type: Option<ScheduleType>,
    pub duration: Option<DurationType>,
    /// Term length code. Required for temporary positions, ignored for
    /// regular ones.
    pub term_length: Option<i64>,
    /// Free text such as "part time 50%".
    pub schedule_summary_text: Option<String>,
    /// Free text, e.g. the dates of a temporary position.
    pub duration_summary_text: Option<String>,
}

impl Classification {
    pub fn new(
        schedule_type: ScheduleType,
        duration: DurationType,
        schedule_summary_text: impl Into<String>,
        duration_summary_text: impl Into<String>,
    ) -> Self {
        Self {
            schedule_type: Some(schedule_type),
            duration: Some(duration),
            term_length: None,
            schedule_summary_text: Some(schedule_summary_text.into()),
            duration_summary_text: Some(duration_summary_text.into()),
        }
    }

    #[must_use]
    pub fn with_term_length(mut self, term_length: TermLength) -> Self {
        self.term_length = Some(term_length.code());
        self
    }

    fn is_temporary(&self) -> bool {
        self.duration == Some(DurationType::Temporary)
    }
}

impl Fragment for Classification {
    const OPERATION: &'static str = "classification";
    const ELEMENT: &'static str = "Classification";
    const PARENT: Cursor = Cursor::JobPositionDescription;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.present("scheduleType", self.schedule_type.as_ref());
        v.present("duration", self.duration.as_ref());
        v.when(self.is_temporary(), |v| {
            v.number("termLength", self.term_length)
                .required()
                .one_of(&TermLength::CODES);
        });
        v.text("scheduleSummaryText", self.schedule_summary_text.as_deref())
            .required();
        v.text("durationSummaryText", self.duration_summary_text.as_deref())
            .required();
        v.finish()
    }

    fn to_element(&self) -> Element {
        let schedule = Element::container("Schedule")
            .with_optional_child(self.schedule_type.map(|s| Element::empty(s.marker())))
            .with_child(Element::leaf("SummaryText", checked(&self.schedule_summary_text)));

        let term = if self.is_temporary() {
            Element::container("Temporary")
                .with_child(Element::leaf("TermLength", self.term_length.unwrap_or_default()))
        } else {
            Element::empty("Regular")
        };
        let duration = Element::container("Duration")
            .with_child(term)
            .with_child(Element::leaf("SummaryText", checked(&self.duration_summary_text)));

        Element::container(Self::ELEMENT)
            .with_child(schedule)
            .with_child(duration)
    }
}

/// Salary form codes. Not published, used as a search criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryType {
    Fixed,
    FixedPlusCommission,
    CommissionOnly,
}

impl SalaryType {
    pub const CODES: [i64; 3] = [1, 2, 3];

    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Fixed => 1,
            Self::FixedPlusCommission => 2,
            Self::CommissionOnly => 3,
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Fixed),
            2 => Some(Self::FixedPlusCommission),
            3 => Some(Self::CommissionOnly),
            _ => None,
        }
    }
}

/// `<CompensationDescription>`: pay and benefits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompensationDescription {
    pub currency: Option<String>,
    /// [`SalaryType`] code.
    pub salary_type: Option<i64>,
    /// Free text: car, housing, insurance and so on.
    pub benefits: Option<String>,
    /// Free text describing the pay; published under "Lön".
    pub summary: Option<String>,
}

impl CompensationDescription {
    pub fn new(
        currency: impl Into<String>,
        salary_type: SalaryType,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            currency: Some(currency.into()),
            salary_type: Some(salary_type.code()),
            benefits: None,
            summary: Some(summary.into()),
        }
    }

    #[must_use]
    pub fn with_benefits(mut self, benefits: impl Into<String>) -> Self {
        self.benefits = Some(benefits.into());
        self
    }

    fn text_chars(&self) -> usize {
        [&self.benefits, &self.summary]
            .into_iter()
            .flatten()
            .map(|s| s.chars().count())
            .sum()
    }
}

impl Fragment for CompensationDescription {
    const OPERATION: &'static str = "compensation_description";
    const ELEMENT: &'static str = "CompensationDescription";
    const PARENT: Cursor = Cursor::JobPositionDescription;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("currency", self.currency.as_deref()).required();
        v.number("salaryType", self.salary_type)
            .required()
            .one_of(&SalaryType::CODES);
        v.text("summary", self.summary.as_deref()).required();
        let total = self.text_chars();
        v.check(
            total <= MAX_COMPENSATION_CHARS,
            "summary",
            Rule::CombinedLength {
                fields: vec!["benefits", "summary"],
                max: MAX_COMPENSATION_CHARS,
            },
            Some(total.to_string()),
        );
        v.finish()
    }

    fn to_element(&self) -> Element {
        let pay = Element::container("Pay").with_child(
            Element::leaf("SalaryMonthly", self.salary_type.unwrap_or_default())
                .with_attribute("currency", checked(&self.currency)),
        );
        let benefits = non_empty(&self.benefits).map(|text| {
            Element::container("BenefitsDescription").with_child(Element::leaf("P", text))
        });

        Element::container(Self::ELEMENT)
            .with_child(pay)
            .with_optional_child(benefits)
            .with_child(Element::leaf("SummaryText", checked(&self.summary)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_names(el: &Element) -> Vec<&str> {
        el.children().iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_title_boundary() {
        assert!(JobPositionTitle::new("t".repeat(75)).validate().is_ok());
        let err = JobPositionTitle::new("t".repeat(76)).validate().unwrap_err();
        assert_eq!(err.violation("title").unwrap().rule, Rule::MaxLength(75));
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        assert!(JobPositionTitle::new("ö".repeat(75)).validate().is_ok());
    }

    #[test]
    fn test_location_summary_repeats_address_codes() {
        let address = PostalAddress::new("SE", "11356", "0180", "Storgatan 1", "Storgatan");
        let el = JobPositionLocation::from(address).to_element();
        assert_eq!(child_names(&el), vec!["PostalAddress", "LocationSummary"]);
        assert_eq!(
            el.find_by_path("LocationSummary/Municipality").unwrap().text().unwrap().to_string(),
            "0180"
        );
        assert_eq!(
            el.find_by_path("LocationSummary/CountryCode").unwrap().text().unwrap().to_string(),
            "SE"
        );
    }

    #[test]
    fn test_classification_regular() {
        let c = Classification::new(
            ScheduleType::Full,
            DurationType::Regular,
            "Heltid",
            "Tillsvidare",
        );
        assert!(c.validate().is_ok());
        let el = c.to_element();
        assert!(el.find_by_path("Schedule/FullTime").is_some());
        assert!(el.find_by_path("Duration/Regular").is_some());
        assert!(el.find_by_path("Duration/Temporary").is_none());
    }

    #[test]
    fn test_classification_regular_ignores_term_length() {
        let c = Classification::new(ScheduleType::Part, DurationType::Regular, "50%", "Tillsvidare")
            .with_term_length(TermLength::Summer);
        assert!(c.validate().is_ok());
        assert!(c.to_element().find_by_path("Duration/Temporary").is_none());
    }

    #[test]
    fn test_classification_temporary_requires_term_length() {
        let c = Classification::new(ScheduleType::Part, DurationType::Temporary, "50%", "Sommar");
        let err = c.validate().unwrap_err();
        assert_eq!(err.violation("termLength").unwrap().rule, Rule::Required);

        let mut c = c;
        c.term_length = Some(5);
        assert!(c.validate().unwrap_err().has_violation("termLength"));

        let c = c.with_term_length(TermLength::Summer);
        assert!(c.validate().is_ok());
        let el = c.to_element();
        assert!(el.find_by_path("Schedule/PartTime").is_some());
        assert_eq!(
            el.find_by_path("Duration/Temporary/TermLength").unwrap().text().unwrap().to_string(),
            "4"
        );
    }

    #[test]
    fn test_classification_missing_everything() {
        let err = Classification::default().validate().unwrap_err();
        assert_eq!(
            err.fields(),
            vec!["scheduleType", "duration", "scheduleSummaryText", "durationSummaryText"]
        );
    }

    #[test]
    fn test_classification_deserializes_lowercase_enums() {
        let c: Classification = serde_json::from_str(
            r#"{"scheduleType":"full","duration":"temporary","termLength":7,"scheduleSummaryText":"a","durationSummaryText":"b"}"#,
        )
        .unwrap();
        assert_eq!(c.schedule_type, Some(ScheduleType::Full));
        assert_eq!(
            TermLength::from_code(c.term_length.unwrap()),
            Some(TermLength::ElevenDaysToThreeMonths)
        );
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_term_length_codes_round_trip() {
        for code in TermLength::CODES {
            assert_eq!(TermLength::from_code(code).map(TermLength::code), Some(code));
        }
        assert_eq!(TermLength::from_code(1), None);
    }

    #[test]
    fn test_compensation_combined_length() {
        let ok = CompensationDescription::new("SEK", SalaryType::Fixed, "s".repeat(155))
            .with_benefits("b".repeat(100));
        assert!(ok.validate().is_ok());

        let too_long = CompensationDescription::new("SEK", SalaryType::Fixed, "s".repeat(156))
            .with_benefits("b".repeat(100));
        let err = too_long.validate().unwrap_err();
        let violation = err.violation("summary").unwrap();
        assert!(matches!(violation.rule, Rule::CombinedLength { max: 255, .. }));
        assert_eq!(violation.value.as_deref(), Some("256"));
    }

    #[test]
    fn test_compensation_salary_type_code() {
        let mut c = CompensationDescription::new("SEK", SalaryType::CommissionOnly, "Provision");
        assert!(c.validate().is_ok());
        c.salary_type = Some(4);
        assert!(c.validate().unwrap_err().has_violation("salaryType"));
    }

    #[test]
    fn test_compensation_element() {
        let el = CompensationDescription::new("SEK", SalaryType::FixedPlusCommission, "Fast lön")
            .to_element();
        assert_eq!(child_names(&el), vec!["Pay", "SummaryText"]);
        let salary = el.find_by_path("Pay/SalaryMonthly").unwrap();
        assert_eq!(salary.attribute("currency").unwrap().to_string(), "SEK");
        assert_eq!(salary.text().unwrap().to_string(), "2");

        let el = CompensationDescription::new("SEK", SalaryType::Fixed, "Fast lön")
            .with_benefits("Friskvård")
            .to_element();
        assert_eq!(child_names(&el), vec!["Pay", "BenefitsDescription", "SummaryText"]);
    }
}
