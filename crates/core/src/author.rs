use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::{AuthorId, MessageId};

/// Name length bounds, in characters.
const NAME_MIN_LEN: usize = 3;
const NAME_MAX_LEN: usize = 10;

/// A persisted author record, owned by exactly one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub email: String,
    pub message_id: MessageId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated author draft, ready to persist.
///
/// Construction is the validation boundary: a `NewAuthor` only exists with a
/// name of 3-10 characters and a structurally valid email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
    pub email: String,
    pub message_id: MessageId,
}

impl NewAuthor {
    pub fn new(
        message_id: MessageId,
        name: Option<String>,
        email: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.ok_or_else(|| DomainError::validation("name is required"))?;
        let email = email.ok_or_else(|| DomainError::validation("email is required"))?;
        validate_name(&name)?;
        validate_email(&email)?;
        Ok(Self {
            name,
            email,
            message_id,
        })
    }
}

/// Partial update of an author. Only `name` and `email` are updatable; the
/// owning message never changes. `None` keeps the existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl AuthorUpdate {
    /// Merge this update into an existing record and re-validate the merged
    /// values before anything is persisted.
    pub fn apply(self, author: &mut Author) -> DomainResult<()> {
        let name = self.name.unwrap_or_else(|| author.name.clone());
        let email = self.email.unwrap_or_else(|| author.email.clone());
        validate_name(&name)?;
        validate_email(&email)?;
        author.name = name;
        author.email = email;
        Ok(())
    }
}

/// Names must be 3-10 characters.
pub fn validate_name(name: &str) -> DomainResult<()> {
    let len = name.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(DomainError::validation(format!(
            "name must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

/// Structural email check: exactly one `@` separating non-empty local and
/// domain parts, no whitespace.
pub fn validate_email(email: &str) -> DomainResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(DomainError::validation(format!("invalid email: {email:?}")));
    }
    Ok(())
}
