use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::MessageId;

/// A persisted message record.
///
/// `title` and `content` are nullable: a create request stores exactly the
/// fields it carries and leaves the rest NULL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a message to be created. The identifier and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMessage {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Partial update of a message.
///
/// `None` means "keep the existing value"; only fields present in the
/// request body are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl MessageUpdate {
    /// Merge this update into an existing record, field by field.
    pub fn apply(self, message: &mut Message) {
        if let Some(title) = self.title {
            message.title = Some(title);
        }
        if let Some(content) = self.content {
            message.content = Some(content);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_message() -> Message {
        Message {
            id: MessageId::new(1),
            title: Some("Hello".to_string()),
            content: Some("World".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut message = sample_message();
        let update = MessageUpdate {
            title: Some("Updated".to_string()),
            content: None,
        };

        update.apply(&mut message);

        assert_eq!(message.title.as_deref(), Some("Updated"));
        assert_eq!(message.content.as_deref(), Some("World"));
    }

    #[test]
    fn empty_update_leaves_record_unchanged() {
        let mut message = sample_message();
        let before = message.clone();

        MessageUpdate::default().apply(&mut message);

        assert_eq!(message, before);
        assert!(MessageUpdate::default().is_empty());
    }

    #[test]
    fn wire_format_uses_camel_case_timestamps() {
        let json = serde_json::to_value(sample_message()).unwrap();
        assert_eq!(json["id"], serde_json::json!(1));
        assert_eq!(json["title"], serde_json::json!("Hello"));
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    proptest! {
        #[test]
        fn apply_twice_equals_apply_once(
            title in proptest::option::of("[ -~]{0,24}"),
            content in proptest::option::of("[ -~]{0,24}"),
        ) {
            let update = MessageUpdate { title, content };

            let mut once = sample_message();
            update.clone().apply(&mut once);

            let mut twice = once.clone();
            update.apply(&mut twice);

            prop_assert_eq!(once, twice);
        }
    }
}
