//! Variable catalog
//!
//! The fixed set of `{{key}}` variables the hydrator can resolve from a
//! contact. Definitions are keyed by name; field paths are checked when a
//! definition is registered.

use super::types::{ComputedValue, ContactField, VariableDefinition, VariableSource};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct VariableCatalog {
    definitions: Vec<VariableDefinition>,
    index: HashMap<String, usize>,
}

impl VariableCatalog {
    /// Empty catalog
    pub fn empty() -> Self {
        Self {
            definitions: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The built-in contact variables
    pub fn standard() -> Self {
        let mut catalog = Self::empty();

        let contact_fields = [
            ("firstName", "firstName", "Contact's first name"),
            ("lastName", "lastName", "Contact's last name"),
            ("fullName", "fullName", "Stored full name, or first and last name"),
            ("goesBy", "goesBy", "Preferred informal name"),
            ("email", "email", "Contact's email address"),
            ("title", "title", "Job title"),
            ("companyName", "companyName", "Employer as entered on the contact"),
        ];

        for (key, path, description) in contact_fields {
            catalog.register_contact_field(key, path, description);
        }

        catalog.register(VariableDefinition {
            key: "timeSinceConnected".to_string(),
            source: VariableSource::Computed(ComputedValue::TimeSinceConnected),
            description: "Time since the contact was last updated".to_string(),
        });

        catalog
    }

    /// Register a definition, replacing any existing entry with the same key
    pub fn register(&mut self, definition: VariableDefinition) {
        match self.index.get(&definition.key) {
            Some(&pos) => self.definitions[pos] = definition,
            None => {
                self.index.insert(definition.key.clone(), self.definitions.len());
                self.definitions.push(definition);
            }
        }
    }

    /// Register a contact-sourced variable by field path
    ///
    /// Returns false and registers nothing when the path is not a known
    /// contact field.
    pub fn register_contact_field(&mut self, key: &str, field_path: &str, description: &str) -> bool {
        let Some(field) = ContactField::from_path(field_path) else {
            warn!("Ignoring variable '{}': unknown contact field '{}'", key, field_path);
            return false;
        };

        self.register(VariableDefinition {
            key: key.to_string(),
            source: VariableSource::Contact(field),
            description: description.to_string(),
        });
        true
    }

    pub fn get(&self, key: &str) -> Option<&VariableDefinition> {
        self.index.get(key).map(|&pos| &self.definitions[pos])
    }

    /// Definitions in registration order
    pub fn definitions(&self) -> &[VariableDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for VariableCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = VariableCatalog::standard();
        assert_eq!(catalog.len(), 8);

        assert_eq!(
            catalog.get("firstName").map(|d| d.source),
            Some(VariableSource::Contact(ContactField::FirstName))
        );
        assert_eq!(
            catalog.get("timeSinceConnected").map(|d| d.source),
            Some(VariableSource::Computed(ComputedValue::TimeSinceConnected))
        );
        assert!(catalog.get("totallyMadeUpVar").is_none());
    }

    #[test]
    fn test_keys_are_unique() {
        let mut catalog = VariableCatalog::standard();
        let before = catalog.len();

        assert!(catalog.register_contact_field("firstName", "goesBy", "Nickname instead"));
        assert_eq!(catalog.len(), before);
        assert_eq!(
            catalog.get("firstName").map(|d| d.source),
            Some(VariableSource::Contact(ContactField::GoesBy))
        );
    }

    #[test]
    fn test_unknown_field_path_is_rejected() {
        let mut catalog = VariableCatalog::empty();
        assert!(!catalog.register_contact_field("phone", "phoneNumber", "Phone"));
        assert!(catalog.is_empty());
        assert!(catalog.get("phone").is_none());
    }
}
