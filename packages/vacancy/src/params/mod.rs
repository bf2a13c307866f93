//! Parameter records for builder operations.
//!
//! Each operation takes one struct. Fields that the schema requires are
//! still `Option` so that records assembled by a front end (JSON, YAML,
//! command-line flags) can be checked and rejected with a field-level
//! [`ValidationError`] instead of failing to deserialize.
//!
//! Validation is pure: [`Fragment::validate`] never touches a document and
//! may be called any number of times.

mod application;
mod envelope;
mod extension;
mod information;
mod posting;
mod requirements;

pub use application::{ByEmail, ByWeb, HowToApply, DISTRIBUTE_EXTERNAL};
pub use envelope::{Packet, Sender, Transaction};
pub use extension::{
    Contact, HiringOrgDescription, OccupationGroup, MAX_COMPANY_CONTACTS, MAX_UNION_CONTACTS,
    OCCUPATION_NAME_ID,
};
pub use information::{
    Classification, CompensationDescription, DurationType, JobPositionLocation,
    JobPositionPurpose, JobPositionTitle, SalaryType, ScheduleType, TermLength,
    MAX_COMPENSATION_CHARS, MAX_TITLE_CHARS,
};
pub use posting::{
    HiringOrg, HiringOrgContact, JobPositionPosting, NumberToFill, PostDetail, PostalAddress,
    PostingStatus,
};
pub use requirements::{
    Experience, Qualification, QualificationType, QualificationsPreferredSummary,
    QualificationsRequiredSummary,
};

use crate::cursor::Cursor;
use crate::document::Element;
use crate::validation::ValidationError;

/// A validated piece of the document that one operation appends.
pub trait Fragment {
    /// Builder method name, used in errors and logs.
    const OPERATION: &'static str;

    /// Tag of the element this fragment produces.
    const ELEMENT: &'static str;

    /// Container the element is appended to.
    const PARENT: Cursor;

    /// Cursor bound to the appended element, for containers that later
    /// operations attach to.
    const REGISTERS: Option<Cursor> = None;

    /// Check the parameters without side effects.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Build the element. Only called after [`Fragment::validate`] succeeded.
    fn to_element(&self) -> Element;
}

/// Borrow a required field that validation has already checked.
pub(crate) fn checked(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// Drop empty strings so optional elements are omitted rather than emitted
/// empty.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
