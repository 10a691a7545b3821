//! Snippet store
//!
//! Named blocks of boilerplate text referenced from templates as
//! `{{snippet:slug}}`.

pub mod manager;
pub mod types;

pub use manager::SnippetManager;
pub use types::{CreateSnippetRequest, Snippet, UpdateSnippetRequest};
