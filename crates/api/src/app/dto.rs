//! Request DTOs and their mapping into domain types.
//!
//! Unknown body fields are silently ignored; only fields matching the schema
//! are carried through.

use serde::Deserialize;

use postbox_core::{AuthorUpdate, MessageUpdate, NewMessage};

#[derive(Debug, Default, Deserialize)]
pub struct ListMessagesParams {
    /// Case-sensitive substring to match against titles.
    pub filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateMessageRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl CreateMessageRequest {
    pub fn into_new_message(self) -> NewMessage {
        NewMessage {
            title: self.title,
            content: self.content,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateMessageRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateMessageRequest {
    pub fn into_update(self) -> MessageUpdate {
        MessageUpdate {
            title: self.title,
            content: self.content,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateAuthorRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAuthorRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateAuthorRequest {
    pub fn into_update(self) -> AuthorUpdate {
        AuthorUpdate {
            name: self.name,
            email: self.email,
        }
    }
}
