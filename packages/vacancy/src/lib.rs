//! Platsbanken Vacancy - Build job postings for Arbetsförmedlingen's Ledigt
//! Arbete API.
//!
//! This crate assembles the HR-XML document that the Swedish Public
//! Employment Service accepts for publishing vacancies on Platsbanken. Each
//! builder operation takes a typed parameter record, validates it and places
//! the resulting element at its fixed position in the document. Structural
//! containers are created on demand; identity elements (the transaction, the
//! posting, the employer) must be added explicitly and in order.
//!
//! # Example
//!
//! ```
//! use platsbanken_vacancy::params::*;
//! use platsbanken_vacancy::VacancyBuilder;
//!
//! # fn main() -> platsbanken_vacancy::Result<()> {
//! let mut builder = VacancyBuilder::new();
//! builder
//!     .sender(Sender::new("12345678", "hr@example.org"))?
//!     .transaction(Transaction::new("2b1f6d0e-7b1c-4d6e-9a53-0f3c2b8d4e11"))?
//!     .job_position_posting(JobPositionPosting::new("SE-5566778899-1"))?
//!     .hiring_org(HiringOrg::new("Acme AB", "46-5566778899"))?
//!     .post_detail(PostDetail::new("2018-12-01", "Alex Andersson"))?
//!     .job_position_title(JobPositionTitle::new("Welder"))?
//!     .qualification(Qualification::drivers_license("B"))?
//!     .by_email(ByEmail::new("jobs@example.org"))?;
//!
//! let xml = builder.to_xml();
//! assert!(xml.starts_with("<?xml"));
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`builder`]: the operation catalog
//! - [`params`]: one parameter record per operation, with its rules
//! - [`validation`]: rule combinators and [`ValidationError`]
//! - [`cursor`]: named insertion points and the registry that binds them
//! - [`document`]: the element tree and its XML rendering
//! - [`config`]: builder options, endpoints and reserved codes
//! - [`error`]: error types and Result alias

pub mod builder;
pub mod config;
pub mod cursor;
pub mod document;
pub mod error;
pub mod params;
pub mod validation;

// Re-export commonly used items
pub use builder::VacancyBuilder;
pub use config::{BuilderConfig, Environment};
pub use cursor::{Cursor, CursorRegistry};
pub use document::{Document, Element, NodePath};
pub use error::{PrecedenceError, Result, VacancyError};
pub use params::Fragment;
pub use validation::{Rule, ValidationError, Violation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_reexports() {
        let _builder = VacancyBuilder::default();
        let _cursor = Cursor::Payload;
        let _err = VacancyError::from(PrecedenceError::DuplicateCursor(Cursor::Packet));
    }
}
