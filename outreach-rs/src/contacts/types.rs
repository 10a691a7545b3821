//! Contact, company and tenant records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person outreach is addressed to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Stored display name; synthesized from first/last when absent
    pub full_name: Option<String>,
    /// Preferred informal name
    pub goes_by: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    /// Free-text employer as entered on the contact
    pub company_name: Option<String>,
    /// Linked company record, if any
    pub company: Option<Company>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Stored full name, or `"{first} {last}"` trimmed
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|s| !s.is_empty()) {
            return full.to_string();
        }

        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// Employer used for same-company checks: the linked company, then the
    /// free-text field
    pub fn employer_name(&self) -> Option<&str> {
        self.company
            .as_ref()
            .map(|c| c.company_name.as_str())
            .or(self.company_name.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub company_name: String,
}

/// Organization sending the outreach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub company_name: String,
}

/// Request to create a contact
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub goes_by: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub company_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(first: Option<&str>, last: Option<&str>, full: Option<&str>) -> Contact {
        Contact {
            id: "c1".to_string(),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            full_name: full.map(String::from),
            goes_by: None,
            email: None,
            title: None,
            company_name: None,
            company: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(contact(Some("Ann"), Some("Lee"), None).display_name(), "Ann Lee");
        assert_eq!(
            contact(Some("Ann"), Some("Lee"), Some("Dr. Ann Lee")).display_name(),
            "Dr. Ann Lee"
        );
        assert_eq!(contact(Some("Ann"), None, Some("")).display_name(), "Ann");
        assert_eq!(contact(None, Some("Lee"), None).display_name(), "Lee");
        assert_eq!(contact(None, None, None).display_name(), "");
    }

    #[test]
    fn test_employer_prefers_linked_company() {
        let mut c = contact(Some("Ann"), None, None);
        assert_eq!(c.employer_name(), None);

        c.company_name = Some("Acme".to_string());
        assert_eq!(c.employer_name(), Some("Acme"));

        c.company = Some(Company {
            id: "co1".to_string(),
            company_name: "Acme Corp".to_string(),
        });
        assert_eq!(c.employer_name(), Some("Acme Corp"));
    }
}
