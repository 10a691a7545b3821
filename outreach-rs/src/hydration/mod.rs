//! Outreach template hydration
//!
//! Fills `{{variable}}` and `{{snippet:slug}}` placeholders from contact,
//! tenant and snippet lookups. See [`TemplateHydrator`].

pub mod catalog;
pub mod header;
pub mod hydrator;
pub mod parser;
pub mod sources;
pub mod time_since;
pub mod types;

pub use catalog::VariableCatalog;
pub use header::{parse_email_header, ParsedAddress};
pub use hydrator::{TemplateHydrator, DEFAULT_COMPUTED_FALLBACK, SAME_COMPANY_OMITTED_SLUGS};
pub use sources::{ContactSource, SnippetSource, TenantSource, TimeSinceFormatter};
pub use time_since::{format_elapsed, RelativeTimeFormatter};
pub use types::{
    ComputedValue, ContactField, HydratedMessage, Placeholders, ResolutionContext, ValidationResult,
    VariableDefinition, VariableSource,
};
