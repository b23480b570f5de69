//! # Persistence Layer
//!
//! Storage is abstracted behind the [`ContactStore`] trait so the book can
//! run against different backends:
//!
//! - [`fs::FileStore`]: production storage — the whole contact list as one
//!   JSON array in one file under a data directory.
//! - [`memory::InMemoryStore`]: in-memory storage for fast, isolated tests.
//!
//! ## Degradation contract
//!
//! The trait surface is deliberately infallible. Persistence problems are a
//! nuisance, not a failure mode: a missing or corrupt store degrades to the
//! [`seed_contacts`] dataset, and a failed write is logged and swallowed —
//! the in-memory list stays the session's source of truth. Fallible helpers
//! inside each backend still return [`crate::error::Result`] so the cause
//! reaches the log.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::model::Contact;

pub mod fs;
pub mod memory;

/// Abstract interface for contact-list persistence.
pub trait ContactStore {
    /// The previously saved list, or the seed dataset when nothing usable
    /// was ever saved.
    fn load(&self) -> Vec<Contact>;

    /// Replace the persisted list with `contacts`. Failures are logged and
    /// swallowed.
    fn save(&mut self, contacts: &[Contact]);
}

/// A practically-unique numeric identifier: Unix milliseconds scaled up and
/// perturbed with a random offset. Collisions are accepted as negligible,
/// not formally prevented.
pub fn generate_id() -> u64 {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    millis * 1000 + rand::thread_rng().gen_range(0..1000)
}

/// The five sample contacts a fresh (or unreadable) store starts with.
pub fn seed_contacts() -> Vec<Contact> {
    let samples: [(u64, &str, &str, &str, &str); 5] = [
        (1, "Alice Johnson", "+1 202 555 0148", "alice@example.com", "2024-01-15T10:30:00Z"),
        (2, "Bob Smith", "+1 202 555 0192", "bob@example.com", "2024-01-16T14:20:00Z"),
        (3, "Carla Chen", "+1 202 555 0184", "carla@example.com", "2024-01-17T09:15:00Z"),
        (4, "David Wilson", "+1 202 555 0123", "david@example.com", "2024-01-18T16:45:00Z"),
        (5, "Emma Davis", "+1 202 555 0456", "emma@example.com", "2024-01-19T11:30:00Z"),
    ];

    samples
        .into_iter()
        .map(|(id, name, phone, email, created)| Contact {
            id,
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            created_at: created.parse::<DateTime<Utc>>().ok(),
            is_bookmarked: false,
        })
        .collect()
}
