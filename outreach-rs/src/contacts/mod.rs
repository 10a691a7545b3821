//! Contact, company and tenant store
//!
//! Backs the contact and tenant lookups used during hydration.

pub mod manager;
pub mod types;

pub use manager::ContactManager;
pub use types::{Company, Contact, CreateContactRequest, Tenant};
