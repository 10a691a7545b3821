//! outreach-rs: outreach template hydration
//!
//! Resolves `{{variable}}` and `{{snippet:slug}}` placeholders in outreach
//! message templates from contact, tenant and snippet stores.
//!
//! # Features
//!
//! - **Hydration**: contact variables, computed variables and snippets,
//!   with an id → email → recipient-header fallback chain
//! - **Same-company omission**: relationship softeners are dropped when the
//!   recipient works for the sending organization
//! - **Fail-soft**: hydration always returns text; broken references render
//!   empty
//! - **Storage**: SQLite-backed contact and snippet stores
//!
//! # Example
//!
//! ```no_run
//! use outreach_rs::contacts::ContactManager;
//! use outreach_rs::hydration::{ResolutionContext, TemplateHydrator};
//! use outreach_rs::snippets::SnippetManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = outreach_rs::db::connect("sqlite://outreach.db").await?;
//!     let contacts = Arc::new(ContactManager::new(pool.clone()));
//!     let snippets = Arc::new(SnippetManager::new(pool));
//!
//!     let hydrator = TemplateHydrator::new(contacts.clone(), contacts, snippets);
//!     let ctx = ResolutionContext::for_recipient("Jane Doe <jane@example.com>");
//!
//!     let text = hydrator.hydrate("Hi {{firstName}},", &ctx).await;
//!     println!("{}", text);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`contacts`]: Contact, company and tenant store
//! - [`db`]: SQLite pool setup
//! - [`error`]: Error types and handling
//! - [`hydration`]: Template hydration engine
//! - [`snippets`]: Snippet store

pub mod config;
pub mod contacts;
pub mod db;
pub mod error;
pub mod hydration;
pub mod snippets;

// Re-export commonly used types
pub use crate::config::Config;
pub use error::{OutreachError, Result};
pub use hydration::{ResolutionContext, TemplateHydrator};
