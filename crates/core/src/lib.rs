//! `postbox-core` — domain building blocks for the message board.
//!
//! This crate contains **pure domain** types (no infrastructure concerns):
//! entities, strongly-typed identifiers, optional-field update structs with
//! explicit merge semantics, and validation.

pub mod author;
pub mod error;
pub mod id;
pub mod message;

pub use author::{Author, AuthorUpdate, NewAuthor};
pub use error::{DomainError, DomainResult};
pub use id::{AuthorId, MessageId};
pub use message::{Message, MessageUpdate, NewMessage};
