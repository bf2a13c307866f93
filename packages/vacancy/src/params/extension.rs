//! `<JPPExtension>`: Arbetsförmedlingen's additions to HR-XML.

use serde::{Deserialize, Serialize};

use super::{checked, non_empty, Fragment};
use crate::cursor::Cursor;
use crate::document::Element;
use crate::validation::{Validator, ValidationError};

/// The only code list the service accepts for occupation groups.
pub const OCCUPATION_NAME_ID: &str = "OccupationNameID";

/// Most employer contacts a posting may list.
pub const MAX_COMPANY_CONTACTS: usize = 4;

/// Most union contacts a posting may list.
pub const MAX_UNION_CONTACTS: usize = 3;

/// `<HiringOrgDescription>`: short presentation of the employer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HiringOrgDescription {
    pub description: Option<String>,
}

impl HiringOrgDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
        }
    }
}

impl Fragment for HiringOrgDescription {
    const OPERATION: &'static str = "hiring_org_description";
    const ELEMENT: &'static str = "HiringOrgDescription";
    const PARENT: Cursor = Cursor::JppExtension;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("description", self.description.as_deref()).required();
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::leaf(Self::ELEMENT, checked(&self.description))
    }
}

/// `<OccupationGroup>`: occupation taxonomy code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OccupationGroup {
    /// Occupation name id from the taxonomy.
    pub code: Option<i64>,
    /// Defaults to [`OCCUPATION_NAME_ID`].
    pub codename: Option<String>,
}

impl OccupationGroup {
    pub fn new(code: i64) -> Self {
        Self {
            code: Some(code),
            codename: None,
        }
    }

    fn codename(&self) -> &str {
        self.codename.as_deref().unwrap_or(OCCUPATION_NAME_ID)
    }
}

impl Fragment for OccupationGroup {
    const OPERATION: &'static str = "occupation_group";
    const ELEMENT: &'static str = "OccupationGroup";
    const PARENT: Cursor = Cursor::JppExtension;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.number("code", self.code).required();
        v.text("codename", Some(self.codename()))
            .required()
            .one_of(&[OCCUPATION_NAME_ID]);
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::empty(Self::ELEMENT)
            .with_attribute("code", self.code.unwrap_or_default())
            .with_attribute("codename", self.codename())
    }
}

/// `<Contact>` under `<InformationContact>`: someone applicants can ask
/// about the position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Union representative rather than employer contact.
    pub union: Option<bool>,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn as_union(mut self) -> Self {
        self.union = Some(true);
        self
    }

    #[must_use]
    pub fn is_union(&self) -> bool {
        self.union.unwrap_or(false)
    }

    /// How many contacts of this kind a posting may hold.
    #[must_use]
    pub fn limit(&self) -> usize {
        if self.is_union() {
            MAX_UNION_CONTACTS
        } else {
            MAX_COMPANY_CONTACTS
        }
    }

    /// Whether `element` is a contact of the same kind as this one.
    pub(crate) fn same_kind(&self, element: &Element) -> bool {
        let union = element
            .attribute("type")
            .is_some_and(|t| t.to_string() == "union");
        element.name == Self::ELEMENT && union == self.is_union()
    }
}

impl Fragment for Contact {
    const OPERATION: &'static str = "contact";
    const ELEMENT: &'static str = "Contact";
    const PARENT: Cursor = Cursor::InformationContact;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("name", self.name.as_deref()).required();
        v.text("email", non_empty(&self.email)).email();
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::container(Self::ELEMENT)
            .with_optional_attribute("type", self.is_union().then_some("union"))
            .with_child(
                Element::container("PersonName")
                    .with_child(Element::leaf("FormattedName", checked(&self.name))),
            )
            .with_optional_child(non_empty(&self.phone).map(|phone| {
                Element::container("VoiceNumber").with_child(Element::leaf("TelNumber", phone))
            }))
            .with_optional_child(non_empty(&self.email).map(|email| Element::leaf("E-mail", email)))
    }
}
