//! Snippet types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reusable block of text inserted with `{{snippet:slug}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Unique identifier
    pub id: String,
    /// Lookup key used in templates
    pub slug: String,
    /// Human-readable label
    pub name: String,
    /// Inserted text; may contain `{{variable}}` tags
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new snippet
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSnippetRequest {
    pub slug: String,
    pub name: Option<String>,
    pub text: String,
}

/// Request to update an existing snippet
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSnippetRequest {
    pub name: Option<String>,
    pub text: Option<String>,
}
