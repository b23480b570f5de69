//! The filter engine: a pure function from (list, mode) to an
//! order-preserving subset. Runs before search, never after — see
//! [`crate::book::ContactBook::visible_contacts`].

use chrono::Local;

use crate::model::{Contact, FilterMode};

/// Select the subset of `contacts` matching `mode`, keeping original order.
pub fn filter(contacts: &[Contact], mode: FilterMode) -> Vec<Contact> {
    let today = Local::now().date_naive();
    contacts
        .iter()
        .filter(|contact| match mode {
            FilterMode::All => true,
            FilterMode::Bookmarked => contact.is_bookmarked,
            FilterMode::Today => contact
                .created_at
                .is_some_and(|ts| ts.with_timezone(&Local).date_naive() == today),
            FilterMode::Incomplete => contact.is_incomplete(),
        })
        .cloned()
        .collect()
}
