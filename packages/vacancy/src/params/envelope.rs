//! Envelope-level records: sender, transaction and packet.

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{checked, Fragment};
use crate::cursor::Cursor;
use crate::document::Element;
use crate::validation::{Validator, ValidationError, MAX_EMAIL_LIST_LEN};

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SENDER_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{8}$").expect("valid regex"));

/// `<Sender>`: the customer account submitting the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sender {
    /// Eight-digit customer number issued by Arbetsförmedlingen.
    pub id: Option<String>,
    /// Address that receives submission receipts. Up to three addresses
    /// separated by `;`.
    pub email: Option<String>,
}

impl Sender {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            email: Some(email.into()),
        }
    }
}

impl Fragment for Sender {
    const OPERATION: &'static str = "sender";
    const ELEMENT: &'static str = "Sender";
    const PARENT: Cursor = Cursor::Envelope;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("id", self.id.as_deref())
            .required()
            .matches(&SENDER_ID_PATTERN, "an 8-digit customer number");
        v.text("email", self.email.as_deref())
            .required()
            .email_list(MAX_EMAIL_LIST_LEN);
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::empty(Self::ELEMENT)
            .with_attribute("id", checked(&self.id))
            .with_attribute("email", checked(&self.email))
    }
}

/// `<TransactInfo>`: one submission. Also opens the first packet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    /// Caller's identifier for this transaction, echoed in the receipt.
    /// A UUID is recommended.
    pub id: Option<String>,
    /// Transaction time. Defaults to the moment the element is built.
    pub timestamp: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            timestamp: None,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Timestamp as written to the `timeStamp` attribute.
    #[must_use]
    pub fn timestamp_string(&self) -> String {
        self.timestamp
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Fragment for Transaction {
    const OPERATION: &'static str = "transaction";
    const ELEMENT: &'static str = "TransactInfo";
    const PARENT: Cursor = Cursor::Envelope;

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.text("id", self.id.as_deref()).required();
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::container(Self::ELEMENT)
            .with_attribute("timeStamp", self.timestamp_string())
            .with_child(Element::leaf("TransactId", checked(&self.id)))
    }
}

/// `<Packet>`, numbered by the builder. Never supplied by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet {
    pub id: u32,
}

impl Packet {
    /// Position of `<Payload>` among the packet's children.
    pub(crate) const PAYLOAD_INDEX: usize = 1;
}

impl Fragment for Packet {
    const OPERATION: &'static str = "transaction";
    const ELEMENT: &'static str = "Packet";
    const PARENT: Cursor = Cursor::Envelope;
    const REGISTERS: Option<Cursor> = Some(Cursor::Packet);

    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(Self::OPERATION);
        v.number("packetId", Some(i64::from(self.id)))
            .between(1, i64::from(u32::MAX));
        v.finish()
    }

    fn to_element(&self) -> Element {
        Element::container(Self::ELEMENT)
            .with_child(
                Element::container("PacketInfo").with_child(Element::leaf("PacketId", self.id)),
            )
            .with_child(Element::container(Cursor::Payload.tag()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sender_valid() {
        assert!(Sender::new("12345678", "a@b.com").validate().is_ok());
        assert!(Sender::new("12345678", "a@b.com;c@d.se").validate().is_ok());
    }

    #[test]
    fn test_sender_rejects_bad_id_and_email() {
        let err = Sender::new("1234", "not an email").validate().unwrap_err();
        assert_eq!(err.operation, "sender");
        assert_eq!(err.fields(), vec!["id", "email"]);
    }

    #[test]
    fn test_sender_missing_fields() {
        let err = Sender::default().validate().unwrap_err();
        assert_eq!(err.fields(), vec!["id", "email"]);
    }

    #[test]
    fn test_sender_element() {
        let el = Sender::new("12345678", "a@b.com").to_element();
        assert_eq!(el.name, "Sender");
        assert_eq!(el.attribute("id").unwrap().to_string(), "12345678");
        assert_eq!(el.attribute("email").unwrap().to_string(), "a@b.com");
        assert!(el.children().is_empty());
    }

    #[test]
    fn test_transaction_requires_id() {
        assert!(Transaction::default().validate().is_err());
        assert!(Transaction::new("").validate().is_err());
        assert!(Transaction::new("tx-1").validate().is_ok());
    }

    #[test]
    fn test_transaction_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2017, 8, 20, 18, 40, 49).unwrap();
        let el = Transaction::new("tx-1").with_timestamp(at).to_element();
        assert_eq!(
            el.attribute("timeStamp").unwrap().to_string(),
            "2017-08-20T18:40:49.000Z"
        );
        assert_eq!(el.child("TransactId").unwrap().text().unwrap().to_string(), "tx-1");
    }

    #[test]
    fn test_transaction_default_timestamp_is_utc() {
        let stamp = Transaction::new("tx-1").timestamp_string();
        assert!(stamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[test]
    fn test_transaction_deserializes_timestamp() {
        let tx: Transaction =
            serde_json::from_str(r#"{"id":"tx-1","timestamp":"2018-01-02T03:04:05Z"}"#).unwrap();
        assert_eq!(tx.timestamp_string(), "2018-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_packet_element() {
        let el = Packet { id: 1 }.to_element();
        assert_eq!(el.children().len(), 2);
        assert_eq!(
            el.find_by_path("PacketInfo/PacketId").unwrap().text().unwrap().to_string(),
            "1"
        );
        assert_eq!(el.children()[Packet::PAYLOAD_INDEX].name, "Payload");
    }
}
