use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::categories;

pub type ThreadId = String;
pub type MessageId = String;
pub type UserId = String;

/// Anonymous device-local identity. Field names match the persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub color: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub message_count: u64,
    pub is_active: bool, // no transition away from true yet
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewThread {
    pub title: String,
    pub category: String,
    pub opening_message: String,
    pub description: Option<String>,
}

impl NewThread {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        opening_message: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            opening_message: opening_message.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub thread_id: ThreadId,
    pub author_id: UserId,
    pub author_display_name: String,
    pub author_color: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Listing filter. `category` takes a catalog slug or any category name;
/// `"all"` behaves like no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadFilter {
    pub category: Option<String>,
}

impl ThreadFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self { category: Some(category.into()) }
    }

    pub(crate) fn matches(&self, thread: &Thread) -> bool {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(c) if c.eq_ignore_ascii_case("all") => true,
            Some(c) => {
                thread.category.to_lowercase() == categories::canonical_name(c).to_lowercase()
            }
        }
    }
}
