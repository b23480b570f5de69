//! Field validation for contact drafts.
//!
//! Validation never throws and never mutates anything: it produces a
//! [`ValidationErrors`] map that is always fully constructed — an empty map
//! means the draft is acceptable. Callers (the book's add/update operations)
//! refuse the mutation when the map is non-empty.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::ContactDraft;

// Permissive international shape: optional leading +, 1-16 digits, first
// digit nonzero. Whitespace is stripped before matching.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("phone pattern"));

// Simple local@domain.tld shape, nothing RFC-grade.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

/// A validated contact field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Phone,
    Email,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Phone => write!(f, "phone"),
            Field::Email => write!(f, "email"),
        }
    }
}

/// Field-to-message mapping produced by [`validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn message(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msg) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {msg}")?;
            first = false;
        }
        Ok(())
    }
}

/// Check a draft against the field rules. An empty result means valid.
pub fn validate(draft: &ContactDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.name.trim().is_empty() {
        errors.insert(Field::Name, "Name is required");
    }

    if draft.phone.trim().is_empty() {
        errors.insert(Field::Phone, "Phone is required");
    } else {
        let digits: String = draft.phone.split_whitespace().collect();
        if !PHONE_RE.is_match(&digits) {
            errors.insert(Field::Phone, "Please enter a valid phone number");
        }
    }

    if draft.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !EMAIL_RE.is_match(&draft.email) {
        errors.insert(Field::Email, "Please enter a valid email address");
    }

    errors
}
