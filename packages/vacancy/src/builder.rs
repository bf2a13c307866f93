//! The operation catalog.
//!
//! [`VacancyBuilder`] owns a [`Document`] and a [`CursorRegistry`]. Every
//! operation follows the same steps:
//!
//! 1. validate the parameter record,
//! 2. work out which structural containers are missing and confirm that the
//!    nearest identity container exists,
//! 3. create the missing containers, outermost first,
//! 4. append the element and register its cursor, if it has one.
//!
//! Steps 1 and 2 never mutate anything, so a failed operation leaves the
//! document exactly as it was.

use std::fmt;

use crate::config::BuilderConfig;
use crate::cursor::{Cursor, CursorRegistry};
use crate::document::{Document, Element, NodePath};
use crate::error::{PrecedenceError, Result};
use crate::params::{
    ByEmail, ByWeb, Classification, CompensationDescription, Contact, Fragment, HiringOrg,
    HiringOrgContact, HiringOrgDescription, HowToApply, JobPositionLocation, JobPositionPosting,
    JobPositionPurpose, JobPositionTitle, NumberToFill, OccupationGroup, Packet, PostDetail,
    Qualification, QualificationsPreferredSummary, QualificationsRequiredSummary, Sender,
    Transaction,
};
use crate::validation::{Rule, ValidationError, Validator};

/// Builds one vacancy document.
///
/// # Examples
/// ```
/// use platsbanken_vacancy::params::{HiringOrg, JobPositionPosting, JobPositionTitle, Sender, Transaction};
/// use platsbanken_vacancy::VacancyBuilder;
///
/// # fn main() -> platsbanken_vacancy::Result<()> {
/// let mut builder = VacancyBuilder::new();
/// builder
///     .sender(Sender::new("12345678", "hr@example.org"))?
///     .transaction(Transaction::new("c0ffee"))?
///     .job_position_posting(JobPositionPosting::new("SE-5566778899-1"))?
///     .hiring_org(HiringOrg::new("Acme", "46-5566778899"))?
///     .job_position_title(JobPositionTitle::new("Welder"))?;
///
/// assert!(builder.to_xml().contains("<JobPositionTitle>Welder</JobPositionTitle>"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VacancyBuilder {
    config: BuilderConfig,
    document: Document,
    cursors: CursorRegistry,
    packet_count: u32,
}

impl Default for VacancyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VacancyBuilder {
    /// Start an empty document with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    /// Start an empty document with the given configuration.
    #[must_use]
    pub fn with_config(config: BuilderConfig) -> Self {
        let document = Document::new(&config.xmlns, &config.version);
        Self {
            config,
            document,
            cursors: CursorRegistry::new(),
            packet_count: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    #[must_use]
    pub fn cursors(&self) -> &CursorRegistry {
        &self.cursors
    }

    /// The element a cursor is bound to.
    #[must_use]
    pub fn cursor(&self, cursor: Cursor) -> Option<&Element> {
        self.cursors
            .get(cursor)
            .and_then(|path| self.document.get(path))
    }

    /// Number of packets opened so far.
    #[must_use]
    pub fn packet_count(&self) -> u32 {
        self.packet_count
    }

    /// Render the document with the configured indentation.
    #[must_use]
    pub fn to_xml(&self) -> String {
        self.document.render(&self.config.indent)
    }

    /// The tree as plain nested JSON records.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        self.document.to_json()
    }

    // Envelope

    /// Add `<Sender>`.
    pub fn sender(&mut self, params: Sender) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Add `<TransactInfo>` and open the first packet.
    ///
    /// A document holds one transaction. Calling this twice fails because
    /// the packet cursor is already bound.
    pub fn transaction(&mut self, params: Transaction) -> Result<&mut Self> {
        validated(&params)?;
        if self.cursors.contains(Cursor::Packet) {
            return Err(PrecedenceError::DuplicateCursor(Cursor::Packet).into());
        }
        self.attach(&params)?;
        self.packet()?;
        Ok(self)
    }

    fn packet(&mut self) -> Result<()> {
        let packet = Packet {
            id: self.packet_count + 1,
        };
        let path = self.attach(&packet)?;
        self.packet_count = packet.id;
        self.cursors
            .register(Cursor::Payload, path.child(Packet::PAYLOAD_INDEX))?;
        Ok(())
    }

    // Posting

    /// Open the posting under the payload. Required before any posting content.
    pub fn job_position_posting(&mut self, params: JobPositionPosting) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Add the employer. Required before its contact and post details.
    pub fn hiring_org(&mut self, params: HiringOrg) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Add the employer's postal address under `<HiringOrg>`.
    pub fn hiring_org_contact(&mut self, params: HiringOrgContact) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Add publication dates and the recruiter under `<HiringOrg>`.
    pub fn post_detail(&mut self, params: PostDetail) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Set how many positions are open.
    pub fn number_to_fill(&mut self, params: NumberToFill) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    // Position information

    /// Open `<JobPositionInformation>` under the posting.
    pub fn job_position_information(&mut self) -> Result<&mut Self> {
        self.open(Cursor::JobPositionInformation)?;
        Ok(self)
    }

    /// Set the job title.
    pub fn job_position_title(&mut self, params: JobPositionTitle) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Open `<JobPositionDescription>`.
    pub fn job_position_description(&mut self) -> Result<&mut Self> {
        self.open(Cursor::JobPositionDescription)?;
        Ok(self)
    }

    /// Add the free-text description of the position.
    pub fn job_position_purpose(&mut self, params: JobPositionPurpose) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Add the workplace address.
    pub fn job_position_location(&mut self, params: JobPositionLocation) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Set schedule and duration, with the term length for temporary positions.
    pub fn classification(&mut self, params: Classification) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Describe the pay and how it is set.
    pub fn compensation_description(
        &mut self,
        params: CompensationDescription,
    ) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    // Requirements

    /// Open `<JobPositionRequirements>`.
    pub fn job_position_requirements(&mut self) -> Result<&mut Self> {
        self.open(Cursor::JobPositionRequirements)?;
        Ok(self)
    }

    /// Open `<QualificationsRequired>`.
    pub fn qualifications_required(&mut self) -> Result<&mut Self> {
        self.open(Cursor::QualificationsRequired)?;
        Ok(self)
    }

    /// Add the summary of required qualifications. An absent summary renders empty.
    pub fn qualifications_required_summary(
        &mut self,
        params: QualificationsRequiredSummary,
    ) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Add one required qualification.
    pub fn qualification(&mut self, params: Qualification) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Open `<QualificationsPreferred>`.
    pub fn qualifications_preferred(&mut self) -> Result<&mut Self> {
        self.open(Cursor::QualificationsPreferred)?;
        Ok(self)
    }

    /// Add the summary of preferred qualifications.
    pub fn qualifications_preferred_summary(
        &mut self,
        params: QualificationsPreferredSummary,
    ) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    // Applying

    /// Open `<HowToApply>` with an explicit distribution mode.
    pub fn how_to_apply(&mut self, params: HowToApply) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Open `<ApplicationMethods>`.
    pub fn application_methods(&mut self) -> Result<&mut Self> {
        self.open(Cursor::ApplicationMethods)?;
        Ok(self)
    }

    /// Accept applications through a web page.
    pub fn by_web(&mut self, params: ByWeb) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Accept applications by e-mail.
    pub fn by_email(&mut self, params: ByEmail) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    // Extension

    /// Open the `<JPPExtension>` block.
    pub fn jpp_extension(&mut self) -> Result<&mut Self> {
        self.open(Cursor::JppExtension)?;
        Ok(self)
    }

    /// Add the employer presentation.
    pub fn hiring_org_description(&mut self, params: HiringOrgDescription) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Set the occupation taxonomy code.
    pub fn occupation_group(&mut self, params: OccupationGroup) -> Result<&mut Self> {
        self.attach(&params)?;
        Ok(self)
    }

    /// Open `<InformationContact>`.
    pub fn information_contact(&mut self) -> Result<&mut Self> {
        self.open(Cursor::InformationContact)?;
        Ok(self)
    }

    /// Add a contact person. A posting lists at most
    /// [`MAX_COMPANY_CONTACTS`](crate::params::MAX_COMPANY_CONTACTS) employer
    /// contacts and [`MAX_UNION_CONTACTS`](crate::params::MAX_UNION_CONTACTS)
    /// union contacts.
    pub fn contact(&mut self, params: Contact) -> Result<&mut Self> {
        validated(&params)?;
        let existing = self.cursor(Cursor::InformationContact).map_or(0, |container| {
            container
                .children()
                .iter()
                .filter(|c| params.same_kind(c))
                .count()
        });
        let mut v = Validator::new(Contact::OPERATION);
        v.check(
            existing < params.limit(),
            "union",
            Rule::MaxOccurrences(params.limit()),
            Some(params.is_union().to_string()),
        );
        v.finish().map_err(rejected)?;

        self.attach(&params)?;
        Ok(self)
    }

    /// Validate, create missing ancestors, append and register.
    fn attach<F: Fragment>(&mut self, fragment: &F) -> Result<NodePath> {
        validated(fragment)?;
        if let Some(cursor) = F::REGISTERS {
            if self.cursors.contains(cursor) {
                return Err(PrecedenceError::DuplicateCursor(cursor).into());
            }
        }

        let missing = self.cursors.plan(F::ELEMENT, F::PARENT)?;
        self.materialize(&missing)?;

        let parent = self.resolve(F::PARENT)?;
        let path = self.document.append(&parent, fragment.to_element())?;
        tracing::debug!(
            operation = F::OPERATION,
            element = F::ELEMENT,
            path = %path,
            "Appended element"
        );

        if let Some(cursor) = F::REGISTERS {
            self.cursors.register(cursor, path.clone())?;
        }
        Ok(path)
    }

    /// Create a structural container on explicit request.
    fn open(&mut self, cursor: Cursor) -> Result<NodePath> {
        if cursor == Cursor::HowToApply {
            return self.attach(&HowToApply::default());
        }
        if self.cursors.contains(cursor) {
            return Err(PrecedenceError::DuplicateCursor(cursor).into());
        }
        let parent = cursor.parent().ok_or_else(|| dangling(cursor))?;
        let missing = self.cursors.plan(cursor.tag(), parent)?;
        self.materialize(&missing)?;
        Ok(self.create(cursor)?)
    }

    fn materialize(&mut self, missing: &[Cursor]) -> Result<()> {
        for &cursor in missing {
            self.create(cursor)?;
            tracing::debug!(cursor = %cursor, "Auto-created container");
        }
        Ok(())
    }

    /// Append and register an empty container. Its parent must already be
    /// bound.
    fn create(&mut self, cursor: Cursor) -> std::result::Result<NodePath, PrecedenceError> {
        let parent_cursor = cursor.parent().ok_or_else(|| dangling(cursor))?;
        let parent = self.resolve(parent_cursor)?;
        let element = match cursor {
            Cursor::HowToApply => HowToApply::default().to_element(),
            _ => Element::container(cursor.tag()),
        };
        let path = self.document.append(&parent, element)?;
        self.cursors.register(cursor, path.clone())?;
        Ok(path)
    }

    fn resolve(&self, cursor: Cursor) -> std::result::Result<NodePath, PrecedenceError> {
        self.cursors
            .get(cursor)
            .cloned()
            .ok_or_else(|| dangling(cursor))
    }
}

impl fmt::Display for VacancyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml())
    }
}

fn dangling(cursor: Cursor) -> PrecedenceError {
    PrecedenceError::DanglingPath {
        path: cursor.tag().to_string(),
    }
}

fn validated<F: Fragment>(fragment: &F) -> Result<()> {
    fragment.validate().map_err(rejected)
}

fn rejected(err: ValidationError) -> crate::error::VacancyError {
    tracing::warn!(
        operation = err.operation,
        fields = ?err.fields(),
        "Rejected parameters"
    );
    err.into()
}
