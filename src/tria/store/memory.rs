use super::{seed_contacts, ContactStore};
use crate::model::Contact;

/// In-memory storage for testing. Mirrors the degradation contract of the
/// file store: a store nothing was ever saved to loads the seed dataset.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    contacts: Option<Vec<Contact>>,
    fail_saves: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the given list (an empty list counts as
    /// "saved", so it will not fall back to seed data).
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: Some(contacts),
            fail_saves: false,
        }
    }

    /// A store holding the seed dataset.
    pub fn seeded() -> Self {
        Self::with_contacts(seed_contacts())
    }

    /// Simulate a backend that rejects every write (quota exhaustion and the
    /// like). Saves become silent no-ops, matching the swallow contract.
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// What the store currently holds, for asserting on write-through.
    pub fn saved(&self) -> Option<&[Contact]> {
        self.contacts.as_deref()
    }
}

impl ContactStore for InMemoryStore {
    fn load(&self) -> Vec<Contact> {
        self.contacts.clone().unwrap_or_else(seed_contacts)
    }

    fn save(&mut self, contacts: &[Contact]) {
        if self.fail_saves {
            return;
        }
        self.contacts = Some(contacts.to_vec());
    }
}
