//! Named insertion points into the document.
//!
//! Operations do not search the tree for the element they attach to. Each
//! container that later operations append to is registered once, when it is
//! created, under a [`Cursor`]; later operations resolve their parent through
//! the [`CursorRegistry`].

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::document::NodePath;
use crate::error::PrecedenceError;

/// Containers that operations attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Cursor {
    Envelope,
    Packet,
    Payload,
    JobPositionPosting,
    HiringOrg,
    JobPositionInformation,
    JobPositionDescription,
    JobPositionRequirements,
    QualificationsRequired,
    QualificationsPreferred,
    HowToApply,
    ApplicationMethods,
    JppExtension,
    InformationContact,
}

impl Cursor {
    /// Every cursor, outermost first.
    pub const ALL: [Cursor; 14] = [
        Self::Envelope,
        Self::Packet,
        Self::Payload,
        Self::JobPositionPosting,
        Self::HiringOrg,
        Self::JobPositionInformation,
        Self::JobPositionDescription,
        Self::JobPositionRequirements,
        Self::QualificationsRequired,
        Self::QualificationsPreferred,
        Self::HowToApply,
        Self::ApplicationMethods,
        Self::JppExtension,
        Self::InformationContact,
    ];

    /// XML tag of the container this cursor points at.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Envelope => "Envelope",
            Self::Packet => "Packet",
            Self::Payload => "Payload",
            Self::JobPositionPosting => "JobPositionPosting",
            Self::HiringOrg => "HiringOrg",
            Self::JobPositionInformation => "JobPositionInformation",
            Self::JobPositionDescription => "JobPositionDescription",
            Self::JobPositionRequirements => "JobPositionRequirements",
            Self::QualificationsRequired => "QualificationsRequired",
            Self::QualificationsPreferred => "QualificationsPreferred",
            Self::HowToApply => "HowToApply",
            Self::ApplicationMethods => "ApplicationMethods",
            Self::JppExtension => "JPPExtension",
            Self::InformationContact => "InformationContact",
        }
    }

    /// The cursor whose container holds this one. `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<Cursor> {
        match self {
            Self::Envelope => None,
            Self::Packet => Some(Self::Envelope),
            Self::Payload => Some(Self::Packet),
            Self::JobPositionPosting => Some(Self::Payload),
            Self::HiringOrg
            | Self::JobPositionInformation
            | Self::HowToApply
            | Self::JppExtension => Some(Self::JobPositionPosting),
            Self::JobPositionDescription | Self::JobPositionRequirements => {
                Some(Self::JobPositionInformation)
            }
            Self::QualificationsRequired | Self::QualificationsPreferred => {
                Some(Self::JobPositionRequirements)
            }
            Self::ApplicationMethods => Some(Self::HowToApply),
            Self::InformationContact => Some(Self::JppExtension),
        }
    }

    /// Structural containers carry no caller data and are created on demand
    /// when a child operation needs them. Identity containers must be created
    /// explicitly.
    #[must_use]
    pub fn is_auto_created(self) -> bool {
        matches!(
            self,
            Self::JobPositionInformation
                | Self::JobPositionDescription
                | Self::JobPositionRequirements
                | Self::QualificationsRequired
                | Self::QualificationsPreferred
                | Self::HowToApply
                | Self::ApplicationMethods
                | Self::JppExtension
                | Self::InformationContact
        )
    }

    /// Builder method that creates this container.
    #[must_use]
    pub fn operation(self) -> &'static str {
        match self {
            Self::Envelope => "new",
            Self::Packet | Self::Payload => "transaction",
            Self::JobPositionPosting => "job_position_posting",
            Self::HiringOrg => "hiring_org",
            Self::JobPositionInformation => "job_position_information",
            Self::JobPositionDescription => "job_position_description",
            Self::JobPositionRequirements => "job_position_requirements",
            Self::QualificationsRequired => "qualifications_required",
            Self::QualificationsPreferred => "qualifications_preferred",
            Self::HowToApply => "how_to_apply",
            Self::ApplicationMethods => "application_methods",
            Self::JppExtension => "jpp_extension",
            Self::InformationContact => "information_contact",
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Bindings from cursor to element path. Bindings are never replaced.
#[derive(Debug, Clone)]
pub struct CursorRegistry {
    bindings: HashMap<Cursor, NodePath>,
}

impl CursorRegistry {
    /// Create a registry with the root bound to [`Cursor::Envelope`].
    #[must_use]
    pub fn new() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(Cursor::Envelope, NodePath::root());
        Self { bindings }
    }

    /// Bind `cursor` to `path`.
    ///
    /// Fails if the cursor is already bound, which would silently redirect
    /// later operations to a different element.
    pub fn register(&mut self, cursor: Cursor, path: NodePath) -> Result<(), PrecedenceError> {
        if self.bindings.contains_key(&cursor) {
            return Err(PrecedenceError::DuplicateCursor(cursor));
        }
        tracing::debug!(cursor = %cursor, path = %path, "Registered cursor");
        self.bindings.insert(cursor, path);
        Ok(())
    }

    /// Path bound to `cursor`.
    #[must_use]
    pub fn get(&self, cursor: Cursor) -> Option<&NodePath> {
        self.bindings.get(&cursor)
    }

    /// Whether `cursor` is bound.
    #[must_use]
    pub fn contains(&self, cursor: Cursor) -> bool {
        self.bindings.contains_key(&cursor)
    }

    /// Bound cursors, outermost first.
    #[must_use]
    pub fn registered(&self) -> Vec<Cursor> {
        Cursor::ALL
            .into_iter()
            .filter(|c| self.bindings.contains_key(c))
            .collect()
    }

    /// Work out which containers must be created before `element` can be
    /// attached under `parent`.
    ///
    /// Walks up from `parent` until a bound cursor is found. Every unbound
    /// container on the way must be auto-creatable; the first one that is not
    /// produces [`PrecedenceError::MissingAncestor`]. The returned list is
    /// ordered outermost first, ready to be created in sequence.
    pub fn plan(
        &self,
        element: &'static str,
        parent: Cursor,
    ) -> Result<Vec<Cursor>, PrecedenceError> {
        let mut missing = Vec::new();
        let mut child = element;
        let mut current = parent;

        while !self.contains(current) {
            if !current.is_auto_created() {
                return Err(PrecedenceError::MissingAncestor {
                    element: child,
                    ancestor: current.tag(),
                    create_with: current.operation(),
                });
            }
            missing.push(current);
            child = current.tag();
            current = current
                .parent()
                .ok_or_else(|| PrecedenceError::DanglingPath {
                    path: current.tag().to_string(),
                })?;
        }

        missing.reverse();
        Ok(missing)
    }
}

impl Default for CursorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cursor_reaches_envelope() {
        for cursor in Cursor::ALL {
            let mut current = cursor;
            let mut steps = 0;
            while let Some(parent) = current.parent() {
                current = parent;
                steps += 1;
                assert!(steps < Cursor::ALL.len(), "cycle at {cursor}");
            }
            assert_eq!(current, Cursor::Envelope);
        }
    }

    #[test]
    fn test_identity_cursors_are_not_auto_created() {
        for cursor in [
            Cursor::Envelope,
            Cursor::Packet,
            Cursor::Payload,
            Cursor::JobPositionPosting,
            Cursor::HiringOrg,
        ] {
            assert!(!cursor.is_auto_created(), "{cursor}");
        }
        assert!(Cursor::QualificationsRequired.is_auto_created());
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = CursorRegistry::new();
        registry
            .register(Cursor::Packet, NodePath::root().child(0))
            .unwrap();
        let err = registry
            .register(Cursor::Packet, NodePath::root().child(1))
            .unwrap_err();
        assert_eq!(err, PrecedenceError::DuplicateCursor(Cursor::Packet));
        assert_eq!(registry.get(Cursor::Packet).unwrap().indices(), &[0]);
    }

    #[test]
    fn test_envelope_is_preregistered() {
        let registry = CursorRegistry::new();
        assert_eq!(registry.registered(), vec![Cursor::Envelope]);
        assert!(registry.plan("Sender", Cursor::Envelope).unwrap().is_empty());
    }

    #[test]
    fn test_plan_stops_at_identity_cursor() {
        let registry = CursorRegistry::new();
        let err = registry
            .plan("JobPositionTitle", Cursor::JobPositionInformation)
            .unwrap_err();
        assert_eq!(
            err,
            PrecedenceError::MissingAncestor {
                element: "JobPositionInformation",
                ancestor: "JobPositionPosting",
                create_with: "job_position_posting",
            }
        );
    }

    #[test]
    fn test_plan_lists_missing_containers_outermost_first() {
        let mut registry = CursorRegistry::new();
        registry
            .register(Cursor::JobPositionPosting, NodePath::root().child(2))
            .unwrap();
        let plan = registry
            .plan("Qualification", Cursor::QualificationsRequired)
            .unwrap();
        assert_eq!(
            plan,
            vec![
                Cursor::JobPositionInformation,
                Cursor::JobPositionRequirements,
                Cursor::QualificationsRequired,
            ]
        );
    }
}
