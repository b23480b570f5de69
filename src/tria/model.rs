use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single address-book record.
///
/// Wire names follow the persisted JSON layout (`createdAt`, `isBookmarked`).
/// Records written by older clients may lack the optional fields, so both
/// decode with defaults rather than failing the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_bookmarked: bool,
}

impl Contact {
    /// Build a fresh contact: creation timestamp stamped now, unbookmarked.
    pub fn new(id: u64, name: String, phone: String, email: String) -> Self {
        Self {
            id,
            name,
            phone,
            email,
            created_at: Some(Utc::now()),
            is_bookmarked: false,
        }
    }

    /// True when name, phone, or email is empty after trimming.
    pub fn is_incomplete(&self) -> bool {
        self.name.trim().is_empty()
            || self.phone.trim().is_empty()
            || self.email.trim().is_empty()
    }
}

/// The editable fields of a contact, as collected from a form.
///
/// Drafts carry no identity or metadata; those are assigned by the book on
/// add and preserved on update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

/// A named predicate selecting a subset of contacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Bookmarked,
    /// Created on the current calendar day, local time.
    Today,
    /// Name, phone, or email is blank.
    Incomplete,
}

impl FilterMode {
    /// Lenient parse: an unrecognized name falls back to `All` rather than
    /// erroring, so a stale or mistyped mode never breaks the view.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "bookmarked" => FilterMode::Bookmarked,
            "today" => FilterMode::Today,
            "incomplete" => FilterMode::Incomplete,
            _ => FilterMode::All,
        }
    }
}
