//! Resident records as served by the backend.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown for optional contact fields that are absent or empty.
pub const NOT_PROVIDED: &str = "Not provided";

/// Unique, immutable identifier of a resident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResidentId(i64);

impl ResidentId {
    /// Wraps a raw backend identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ResidentId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ResidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person with contact details, keyed by [`ResidentId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    /// Backend identifier.
    pub id: ResidentId,
    /// Email address (always present).
    pub email: String,
    /// Full name, may be empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Postal address, may be empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    /// Phone number, may be empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    /// Last modification timestamp as sent by the backend. Not displayed.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub updated_at: String,
}

impl Resident {
    /// Creates a resident with only the required fields set.
    pub fn new(id: impl Into<ResidentId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            updated_at: String::new(),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the last-updated timestamp.
    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = updated_at.into();
        self
    }

    /// Name cell text.
    pub fn display_name(&self) -> &str {
        or_not_provided(&self.name)
    }

    /// Email cell text.
    pub fn display_email(&self) -> &str {
        &self.email
    }

    /// Address cell text.
    pub fn display_address(&self) -> &str {
        or_not_provided(&self.address)
    }

    /// Phone cell text.
    pub fn display_phone(&self) -> &str {
        or_not_provided(&self.phone)
    }
}

/// Body of `GET /api/residents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentsEnvelope {
    pub residents: Vec<Resident>,
}

fn or_not_provided(value: &str) -> &str {
    if value.is_empty() {
        NOT_PROVIDED
    } else {
        value
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_optional_fields_fall_back() {
        let resident = Resident::new(1, "a@x.com");

        assert_eq!(resident.display_name(), NOT_PROVIDED);
        assert_eq!(resident.display_address(), NOT_PROVIDED);
        assert_eq!(resident.display_phone(), NOT_PROVIDED);
        assert_eq!(resident.display_email(), "a@x.com");
    }

    #[test]
    fn populated_fields_are_shown_verbatim() {
        let resident = Resident::new(2, "b@x.com")
            .with_name("Bea")
            .with_address("1 Main St")
            .with_phone("555-0100");

        assert_eq!(resident.display_name(), "Bea");
        assert_eq!(resident.display_address(), "1 Main St");
        assert_eq!(resident.display_phone(), "555-0100");
    }

    #[test]
    fn envelope_decodes_backend_payload() {
        let json = r#"{"residents":[{"id":1,"email":"a@x.com","name":"","address":"","phone":"","updated_at":"t"}]}"#;
        let envelope: ResidentsEnvelope = serde_json::from_str(json).unwrap();

        assert_eq!(
            envelope.residents,
            vec![Resident::new(1, "a@x.com").with_updated_at("t")]
        );
    }

    #[test]
    fn null_and_missing_optional_fields_decode_as_empty() {
        let json = r#"{"id":7,"email":"c@x.com","name":null}"#;
        let resident: Resident = serde_json::from_str(json).unwrap();

        assert_eq!(resident.id, ResidentId::new(7));
        assert_eq!(resident.name, "");
        assert_eq!(resident.display_phone(), NOT_PROVIDED);
    }

    #[test]
    fn missing_email_is_rejected() {
        let json = r#"{"id":7,"name":"No Mail"}"#;
        assert!(serde_json::from_str::<Resident>(json).is_err());
    }
}
