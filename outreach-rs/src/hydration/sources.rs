//! Collaborators the hydrator reads from
//!
//! The engine owns none of these; implementations are injected when the
//! [`TemplateHydrator`](super::TemplateHydrator) is built.

use crate::contacts::{Contact, Tenant};
use crate::error::Result;
use crate::snippets::Snippet;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Contact lookups
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactSource: Send + Sync {
    async fn find_contact_by_id(&self, id: &str) -> Result<Option<Contact>>;

    async fn find_contact_by_email(&self, email: &str) -> Result<Option<Contact>>;
}

/// Tenant (sending organization) lookups
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenantSource: Send + Sync {
    async fn find_tenant_by_id(&self, id: &str) -> Result<Option<Tenant>>;
}

/// Snippet lookups
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetSource: Send + Sync {
    async fn find_snippet_by_slug(&self, slug: &str) -> Result<Option<Snippet>>;
}

/// Renders an elapsed duration as prose ("over a year")
pub trait TimeSinceFormatter: Send + Sync {
    fn format_time_since(&self, timestamp: DateTime<Utc>) -> String;
}
