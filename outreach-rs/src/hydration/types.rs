//! Hydration types and data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Who a message is being hydrated for
///
/// Every field is optional; hydration degrades to empty values when
/// nothing resolves to a contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionContext {
    /// Primary contact lookup key
    pub contact_id: Option<String>,
    /// Secondary contact lookup key
    pub contact_email: Option<String>,
    /// Raw recipient header, `"Name <email>"` or a bare address
    pub to_header: Option<String>,
    /// Sending user; reserved for owner-scoped variables
    pub owner_id: Option<String>,
    /// Issuing organization, used for same-company snippet omission
    pub tenant_id: Option<String>,
    /// Caller overrides, matched by variable name
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ResolutionContext {
    pub fn for_contact(contact_id: impl Into<String>) -> Self {
        Self {
            contact_id: Some(contact_id.into()),
            ..Default::default()
        }
    }

    pub fn for_email(email: impl Into<String>) -> Self {
        Self {
            contact_email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn for_recipient(to_header: impl Into<String>) -> Self {
        Self {
            to_header: Some(to_header.into()),
            ..Default::default()
        }
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Metadata override for `name`, stringified
    ///
    /// Strings are used verbatim, `null` becomes empty, anything else is
    /// rendered as JSON.
    pub fn metadata_value(&self, name: &str) -> Option<String> {
        self.metadata.get(name).map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

/// Field of a contact record readable by a template variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    FirstName,
    LastName,
    FullName,
    GoesBy,
    Email,
    Title,
    CompanyName,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::FirstName => "firstName",
            ContactField::LastName => "lastName",
            ContactField::FullName => "fullName",
            ContactField::GoesBy => "goesBy",
            ContactField::Email => "email",
            ContactField::Title => "title",
            ContactField::CompanyName => "companyName",
        }
    }

    /// Parse a field path; unknown paths yield `None`
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "firstName" => Some(ContactField::FirstName),
            "lastName" => Some(ContactField::LastName),
            "fullName" => Some(ContactField::FullName),
            "goesBy" => Some(ContactField::GoesBy),
            "email" => Some(ContactField::Email),
            "title" => Some(ContactField::Title),
            "companyName" => Some(ContactField::CompanyName),
            _ => None,
        }
    }
}

/// Value derived from a contact rather than read off it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComputedValue {
    /// Time elapsed since the contact record was last touched
    TimeSinceConnected,
}

/// How a variable gets its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "field", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableSource {
    Contact(ContactField),
    Computed(ComputedValue),
}

/// Catalog entry for a `{{key}}` placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDefinition {
    pub key: String,
    pub source: VariableSource,
    pub description: String,
}

/// Result of [`validate`](super::TemplateHydrator::validate)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub missing_variables: Vec<String>,
}

/// Distinct placeholders referenced by a template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholders {
    pub variables: Vec<String>,
    pub snippets: Vec<String>,
}

/// Hydrated subject and body of an outbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HydratedMessage {
    pub subject: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_value_stringifies() {
        let ctx = ResolutionContext::default()
            .with_metadata("firstName", "Bob")
            .with_metadata("count", 3)
            .with_metadata("flag", true)
            .with_metadata("nothing", serde_json::Value::Null);

        assert_eq!(ctx.metadata_value("firstName").as_deref(), Some("Bob"));
        assert_eq!(ctx.metadata_value("count").as_deref(), Some("3"));
        assert_eq!(ctx.metadata_value("flag").as_deref(), Some("true"));
        assert_eq!(ctx.metadata_value("nothing").as_deref(), Some(""));
        assert_eq!(ctx.metadata_value("missing"), None);
    }

    #[test]
    fn test_context_deserializes_from_camel_case() {
        let ctx: ResolutionContext = serde_json::from_value(json!({
            "contactId": "c-1",
            "toHeader": "Jane Doe <jane@x.com>",
            "metadata": { "firstName": "Janey" }
        }))
        .unwrap();

        assert_eq!(ctx.contact_id.as_deref(), Some("c-1"));
        assert_eq!(ctx.to_header.as_deref(), Some("Jane Doe <jane@x.com>"));
        assert!(ctx.contact_email.is_none());
        assert_eq!(ctx.metadata_value("firstName").as_deref(), Some("Janey"));
    }

    #[test]
    fn test_contact_field_paths() {
        for field in [
            ContactField::FirstName,
            ContactField::LastName,
            ContactField::FullName,
            ContactField::GoesBy,
            ContactField::Email,
            ContactField::Title,
            ContactField::CompanyName,
        ] {
            assert_eq!(ContactField::from_path(field.as_str()), Some(field));
        }
        assert_eq!(ContactField::from_path("phoneNumber"), None);
    }
}
