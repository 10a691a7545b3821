//! Template hydration
//!
//! Resolves `{{snippet:slug}}` tags first, then `{{variable}}` tags in the
//! result, so snippet text can itself use variables. Lookups never fail the
//! call: a missing or broken reference renders as an empty string.

use super::catalog::VariableCatalog;
use super::header::{parse_email_header, ParsedAddress};
use super::parser::{tokenize, Segment};
use super::sources::{ContactSource, SnippetSource, TenantSource, TimeSinceFormatter};
use super::time_since::RelativeTimeFormatter;
use super::types::{
    ComputedValue, ContactField, HydratedMessage, Placeholders, ResolutionContext, ValidationResult,
    VariableSource,
};
use crate::contacts::Contact;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Snippets dropped when sender and recipient work for the same company
pub const SAME_COMPANY_OMITTED_SLUGS: [&str; 4] = [
    "as_you_may_remember_softener",
    "as_you_may_remember",
    "as_you_remember",
    "you_may_remember",
];

/// Default value for computed variables when no contact is found
pub const DEFAULT_COMPUTED_FALLBACK: &str = "a while";

/// Hydrates outreach templates against injected collaborators
pub struct TemplateHydrator {
    contacts: Arc<dyn ContactSource>,
    tenants: Arc<dyn TenantSource>,
    snippets: Arc<dyn SnippetSource>,
    time_since: Arc<dyn TimeSinceFormatter>,
    catalog: VariableCatalog,
    computed_fallback: String,
}

/// State for a single `hydrate` call
struct HydrationCall<'a> {
    ctx: &'a ResolutionContext,
    recipient: Option<ParsedAddress>,
    email: Option<String>,
    contact: Option<Option<Contact>>,
    same_company: Option<bool>,
    snippets: HashMap<String, String>,
}

impl<'a> HydrationCall<'a> {
    fn new(ctx: &'a ResolutionContext) -> Self {
        let recipient = ctx.to_header.as_deref().and_then(parse_email_header);

        let email = non_empty(ctx.contact_email.as_deref())
            .map(String::from)
            .or_else(|| recipient.as_ref().map(|r| r.email.clone()));

        Self {
            ctx,
            recipient,
            email,
            contact: None,
            same_company: None,
            snippets: HashMap::new(),
        }
    }

    fn contact_id(&self) -> Option<&str> {
        non_empty(self.ctx.contact_id.as_deref())
    }

    /// Whether any contact lookup can be attempted
    fn has_identity(&self) -> bool {
        self.contact_id().is_some() || self.email.is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn normalize_company(name: &str) -> String {
    name.trim().to_lowercase()
}

fn read_contact_field(contact: &Contact, field: ContactField) -> String {
    let value = match field {
        ContactField::FullName => return contact.display_name(),
        ContactField::FirstName => &contact.first_name,
        ContactField::LastName => &contact.last_name,
        ContactField::GoesBy => &contact.goes_by,
        ContactField::Email => &contact.email,
        ContactField::Title => &contact.title,
        ContactField::CompanyName => &contact.company_name,
    };
    value.clone().unwrap_or_default()
}

fn leftover_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{([^}]+)\}\}").expect("valid placeholder regex"))
}

impl TemplateHydrator {
    /// Create a hydrator with the standard catalog and the system clock
    pub fn new(
        contacts: Arc<dyn ContactSource>,
        tenants: Arc<dyn TenantSource>,
        snippets: Arc<dyn SnippetSource>,
    ) -> Self {
        Self {
            contacts,
            tenants,
            snippets,
            time_since: Arc::new(RelativeTimeFormatter),
            catalog: VariableCatalog::standard(),
            computed_fallback: DEFAULT_COMPUTED_FALLBACK.to_string(),
        }
    }

    pub fn with_time_since(mut self, formatter: Arc<dyn TimeSinceFormatter>) -> Self {
        self.time_since = formatter;
        self
    }

    pub fn with_catalog(mut self, catalog: VariableCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_computed_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.computed_fallback = fallback.into();
        self
    }

    pub fn catalog(&self) -> &VariableCatalog {
        &self.catalog
    }

    /// Hydrate a template for the given recipient context
    ///
    /// Always returns text. Unknown variables and snippets become empty;
    /// tags that do not parse are left as written.
    pub async fn hydrate(&self, template: &str, ctx: &ResolutionContext) -> String {
        let mut call = HydrationCall::new(ctx);
        let expanded = self.expand_snippets(template, &mut call).await;
        self.substitute_variables(&expanded, &mut call).await
    }

    /// Hydrate a subject and body with the same context
    pub async fn hydrate_message(
        &self,
        subject: &str,
        body: &str,
        ctx: &ResolutionContext,
    ) -> HydratedMessage {
        HydratedMessage {
            subject: self.hydrate(subject, ctx).await,
            body: self.hydrate(body, ctx).await,
        }
    }

    /// Report any `{{...}}` tags still present in `content`
    pub fn validate(content: &str) -> ValidationResult {
        let mut missing_variables: Vec<String> = Vec::new();

        for caps in leftover_tag_re().captures_iter(content) {
            let name = caps[1].trim().to_string();
            if !missing_variables.contains(&name) {
                missing_variables.push(name);
            }
        }

        ValidationResult {
            valid: missing_variables.is_empty(),
            missing_variables,
        }
    }

    /// Distinct variable names and snippet slugs referenced by a template
    pub fn extract_placeholders(template: &str) -> Placeholders {
        let mut placeholders = Placeholders::default();

        for segment in tokenize(template) {
            match segment {
                Segment::Variable { name, .. } => {
                    if !placeholders.variables.iter().any(|v| v == name) {
                        placeholders.variables.push(name.to_string());
                    }
                }
                Segment::Snippet { slug, .. } if !slug.is_empty() => {
                    if !placeholders.snippets.iter().any(|s| s == slug) {
                        placeholders.snippets.push(slug.to_string());
                    }
                }
                _ => {}
            }
        }

        placeholders
    }

    /// True when the contact's employer and the tenant's company match,
    /// ignoring case and surrounding whitespace
    ///
    /// Any missing id, missing record or lookup error yields false.
    pub async fn is_same_company(&self, contact_id: Option<&str>, tenant_id: Option<&str>) -> bool {
        let (Some(contact_id), Some(tenant_id)) = (non_empty(contact_id), non_empty(tenant_id)) else {
            return false;
        };

        let contact_company = match self.contacts.find_contact_by_id(contact_id).await {
            Ok(Some(contact)) => contact.employer_name().map(normalize_company),
            Ok(None) => None,
            Err(e) => {
                warn!("Same-company check: contact {} lookup failed: {}", contact_id, e);
                None
            }
        };
        let Some(contact_company) = contact_company else {
            return false;
        };

        let tenant_company = match self.tenants.find_tenant_by_id(tenant_id).await {
            Ok(Some(tenant)) => Some(normalize_company(&tenant.company_name)),
            Ok(None) => None,
            Err(e) => {
                warn!("Same-company check: tenant {} lookup failed: {}", tenant_id, e);
                None
            }
        };

        match tenant_company {
            Some(tenant_company) if !tenant_company.is_empty() => tenant_company == contact_company,
            _ => false,
        }
    }

    async fn expand_snippets(&self, template: &str, call: &mut HydrationCall<'_>) -> String {
        let segments = tokenize(template);
        if !segments.iter().any(|s| matches!(s, Segment::Snippet { .. })) {
            return template.to_string();
        }

        let mut output = String::with_capacity(template.len());
        for segment in segments {
            match segment {
                Segment::Snippet { slug, .. } if !slug.is_empty() => {
                    let text = self.snippet_text(slug, call).await;
                    output.push_str(&text);
                }
                other => output.push_str(other.raw()),
            }
        }
        output
    }

    async fn snippet_text(&self, slug: &str, call: &mut HydrationCall<'_>) -> String {
        if SAME_COMPANY_OMITTED_SLUGS.contains(&slug) {
            let same_company = match call.same_company {
                Some(known) => known,
                None => {
                    let known = self
                        .is_same_company(call.ctx.contact_id.as_deref(), call.ctx.tenant_id.as_deref())
                        .await;
                    call.same_company = Some(known);
                    known
                }
            };

            if same_company {
                debug!("Omitting snippet '{}' for same-company recipient", slug);
                return String::new();
            }
        }

        if let Some(text) = call.snippets.get(slug) {
            return text.clone();
        }

        let text = match self.snippets.find_snippet_by_slug(slug).await {
            Ok(Some(snippet)) => snippet.text,
            Ok(None) => {
                debug!("Snippet '{}' not found", slug);
                String::new()
            }
            Err(e) => {
                warn!("Snippet '{}' lookup failed: {}", slug, e);
                String::new()
            }
        };

        call.snippets.insert(slug.to_string(), text.clone());
        text
    }

    async fn substitute_variables(&self, text: &str, call: &mut HydrationCall<'_>) -> String {
        let segments = tokenize(text);
        let mut values: HashMap<&str, String> = HashMap::new();
        let mut output = String::with_capacity(text.len());

        for segment in segments {
            match segment {
                Segment::Variable { name, .. } => {
                    if !values.contains_key(name) {
                        let value = match call.ctx.metadata_value(name) {
                            Some(value) => value,
                            None => self.resolve_variable(name, call).await,
                        };
                        values.insert(name, value);
                    }
                    if let Some(value) = values.get(name) {
                        output.push_str(value);
                    }
                }
                other => output.push_str(other.raw()),
            }
        }

        output
    }

    async fn resolve_variable(&self, name: &str, call: &mut HydrationCall<'_>) -> String {
        let Some(definition) = self.catalog.get(name) else {
            debug!("Unknown template variable '{}'", name);
            return String::new();
        };

        if !call.has_identity() {
            debug!("No contact id or email for variable '{}'", name);
            return String::new();
        }

        match definition.source {
            VariableSource::Contact(field) => {
                if let Some(contact) = self.contact(call).await {
                    return read_contact_field(contact, field);
                }

                // A typed-in "Jane Doe <jane@x.com>" still gets a first name
                if field != ContactField::FirstName {
                    return String::new();
                }
                call.recipient
                    .as_ref()
                    .and_then(|r| r.first_name())
                    .map(String::from)
                    .unwrap_or_default()
            }
            VariableSource::Computed(ComputedValue::TimeSinceConnected) => {
                match self.contact(call).await {
                    Some(contact) => {
                        let updated_at = contact.updated_at;
                        self.time_since.format_time_since(updated_at)
                    }
                    None => self.computed_fallback.clone(),
                }
            }
        }
    }

    /// Contact for this call, looked up at most once
    async fn contact<'c>(&self, call: &'c mut HydrationCall<'_>) -> Option<&'c Contact> {
        if call.contact.is_none() {
            let found = self.lookup_contact(call).await;
            call.contact = Some(found);
        }
        call.contact.as_ref().and_then(|c| c.as_ref())
    }

    /// Id first, then email; each step is fail-soft
    async fn lookup_contact(&self, call: &HydrationCall<'_>) -> Option<Contact> {
        if let Some(id) = call.contact_id() {
            match self.contacts.find_contact_by_id(id).await {
                Ok(Some(contact)) => return Some(contact),
                Ok(None) => debug!("Contact {} not found by id", id),
                Err(e) => warn!("Contact {} lookup by id failed: {}", id, e),
            }
        }

        if let Some(email) = call.email.as_deref() {
            match self.contacts.find_contact_by_email(email).await {
                Ok(Some(contact)) => return Some(contact),
                Ok(None) => debug!("Contact not found by email {}", email),
                Err(e) => warn!("Contact lookup by email {} failed: {}", email, e),
            }
        }

        None
    }
}
