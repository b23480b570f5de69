//! # The Contact Book
//!
//! [`ContactBook`] is the single owner of all session state: the
//! authoritative contact list plus the view tuple (filter mode, query,
//! selection). Every mutation runs to completion on the calling thread, so
//! no operation can observe a half-updated list.
//!
//! ## Write-through persistence
//!
//! Every operation that changes the contact list saves the full list through
//! the backing [`ContactStore`] before returning. Save failures are the
//! store's problem (logged and swallowed there); the in-memory list stays
//! authoritative for the session either way.
//!
//! ## Derived view
//!
//! [`visible_contacts`](ContactBook::visible_contacts) composes the filter
//! and search engines, always in that order. The search engine returns
//! nothing for a blank query, so the blank-query bypass lives here — the
//! composition cannot be left to the engine.
//!
//! ## Change notification
//!
//! Consumers register listeners via [`subscribe`](ContactBook::subscribe)
//! and recompute their derived values when poked. Listeners take no
//! arguments; they read whatever they need back off the book.

use std::collections::BTreeSet;

use crate::filter;
use crate::model::{Contact, ContactDraft, FilterMode};
use crate::search::{self, SearchOptions};
use crate::store::{generate_id, ContactStore};
use crate::validate::{validate, ValidationErrors};

type Listener = Box<dyn FnMut()>;

/// The selection & mutation state machine over a contact list.
///
/// Generic over [`ContactStore`]: production uses
/// [`FileStore`](crate::store::fs::FileStore), tests use
/// [`InMemoryStore`](crate::store::memory::InMemoryStore).
pub struct ContactBook<S: ContactStore> {
    store: S,
    contacts: Vec<Contact>,
    filter_mode: FilterMode,
    query: String,
    selection: BTreeSet<u64>,
    search_options: SearchOptions,
    listeners: Vec<Listener>,
}

impl<S: ContactStore> ContactBook<S> {
    /// Load the persisted list (or seed data) and start a session.
    pub fn open(store: S) -> Self {
        let contacts = store.load();
        Self {
            store,
            contacts,
            filter_mode: FilterMode::All,
            query: String::new(),
            selection: BTreeSet::new(),
            search_options: SearchOptions::default(),
            listeners: Vec::new(),
        }
    }

    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    // --- reads ---

    /// The full, unfiltered list in insertion order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selection(&self) -> &BTreeSet<u64> {
        &self.selection
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.selection.contains(&id)
    }

    /// The backing store, for inspecting persisted state.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tear down the session, handing the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The list the presentation layer renders: filtered, then searched.
    ///
    /// A blank query bypasses the search engine entirely. The engine itself
    /// yields nothing for a blank query, so without this bypass the view
    /// would go empty the moment the user clears the search box.
    pub fn visible_contacts(&self) -> Vec<Contact> {
        let filtered = filter::filter(&self.contacts, self.filter_mode);
        if self.query.trim().is_empty() {
            filtered
        } else {
            search::search_with(&filtered, &self.query, &self.search_options)
        }
    }

    // --- mutations ---

    /// Register a change listener, invoked after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Validate and append a new contact. Returns the assigned id, or the
    /// field errors with no state changed.
    pub fn add_contact(&mut self, draft: ContactDraft) -> Result<u64, ValidationErrors> {
        let errors = validate(&draft);
        if !errors.is_empty() {
            return Err(errors);
        }

        let id = generate_id();
        self.contacts
            .push(Contact::new(id, draft.name, draft.phone, draft.email));
        self.persist_and_notify();
        Ok(id)
    }

    /// Validate and replace name/phone/email of the matching contact;
    /// creation timestamp and bookmark flag are untouched. A valid draft
    /// against an absent id is a no-op.
    pub fn update_contact(&mut self, id: u64, draft: ContactDraft) -> Result<(), ValidationErrors> {
        let errors = validate(&draft);
        if !errors.is_empty() {
            return Err(errors);
        }

        if let Some(contact) = self.contacts.iter_mut().find(|c| c.id == id) {
            contact.name = draft.name;
            contact.phone = draft.phone;
            contact.email = draft.email;
            self.persist_and_notify();
        }
        Ok(())
    }

    /// Remove one contact and its selection entry. Absent id is a no-op.
    pub fn delete_contact(&mut self, id: u64) {
        let before = self.contacts.len();
        self.contacts.retain(|c| c.id != id);
        if self.contacts.len() == before {
            return;
        }
        self.selection.remove(&id);
        self.persist_and_notify();
    }

    /// Remove every selected contact and clear the selection.
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let selected = std::mem::take(&mut self.selection);
        self.contacts.retain(|c| !selected.contains(&c.id));
        self.persist_and_notify();
    }

    /// Flip the bookmark flag of one contact. Absent id is a no-op.
    pub fn toggle_bookmark(&mut self, id: u64) {
        if let Some(contact) = self.contacts.iter_mut().find(|c| c.id == id) {
            contact.is_bookmarked = !contact.is_bookmarked;
            self.persist_and_notify();
        }
    }

    /// Bookmark every selected contact, then clear the selection.
    pub fn bookmark_selected(&mut self) {
        self.set_bookmarks(true);
    }

    /// Unbookmark every selected contact, then clear the selection.
    pub fn unbookmark_selected(&mut self) {
        self.set_bookmarks(false);
    }

    fn set_bookmarks(&mut self, bookmarked: bool) {
        if self.selection.is_empty() {
            return;
        }
        let selected = std::mem::take(&mut self.selection);
        for contact in self
            .contacts
            .iter_mut()
            .filter(|c| selected.contains(&c.id))
        {
            contact.is_bookmarked = bookmarked;
        }
        self.persist_and_notify();
    }

    /// Add the id to the selection if absent, remove it if present. Ids not
    /// in the list are ignored, keeping the selection invariant.
    pub fn toggle_selection(&mut self, id: u64) {
        if !self.contacts.iter().any(|c| c.id == id) {
            return;
        }
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
        self.notify();
    }

    /// Select exactly the ids currently visible under the active
    /// filter + search, not the full list.
    pub fn select_all(&mut self) {
        self.selection = self.visible_contacts().iter().map(|c| c.id).collect();
        self.notify();
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.notify();
    }

    /// Update the active query. The selection follows the view: ids no
    /// longer visible are pruned rather than left silently actionable.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.prune_selection();
        self.notify();
    }

    /// Update the active filter, pruning the selection likewise.
    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter_mode = mode;
        self.prune_selection();
        self.notify();
    }

    fn prune_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let visible: BTreeSet<u64> = self.visible_contacts().iter().map(|c| c.id).collect();
        self.selection.retain(|id| visible.contains(id));
    }

    fn persist_and_notify(&mut self) {
        self.store.save(&self.contacts);
        self.notify();
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use crate::validate::Field;
    use chrono::{Duration, Utc};
    use std::cell::Cell;
    use std::rc::Rc;

    fn seeded_book() -> ContactBook<InMemoryStore> {
        ContactBook::open(InMemoryStore::seeded())
    }

    fn valid_draft(name: &str) -> ContactDraft {
        ContactDraft::new(name, "12025550000", "new@example.com")
    }

    #[test]
    fn open_loads_seed_data_from_a_fresh_store() {
        let book = ContactBook::open(InMemoryStore::new());
        assert_eq!(book.len(), 5);
        assert_eq!(book.filter_mode(), FilterMode::All);
        assert!(book.selection().is_empty());
    }

    #[test]
    fn add_contact_appends_and_writes_through() {
        let mut book = seeded_book();
        let id = book.add_contact(valid_draft("Frank Field")).unwrap();

        assert_eq!(book.len(), 6);
        assert_eq!(book.contacts().last().unwrap().id, id);
        assert_eq!(book.store().saved().unwrap().len(), 6);
    }

    #[test]
    fn add_contact_with_blank_name_reports_name_only_and_changes_nothing() {
        // A fresh store has never been written to, so a surviving `None`
        // proves the rejected add skipped the write-through.
        let mut book = ContactBook::open(InMemoryStore::new());
        let errors = book
            .add_contact(ContactDraft::new("", "123", "a@b.com"))
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(errors.message(Field::Name).is_some());
        assert_eq!(book.len(), 5);
        assert!(book.store().saved().is_none());
    }

    #[test]
    fn update_contact_replaces_fields_but_keeps_metadata() {
        let mut book = seeded_book();
        book.toggle_bookmark(2);
        let created = book.contacts()[1].created_at;

        book.update_contact(2, ContactDraft::new("Robert Smith", "12025550192", "rob@example.com"))
            .unwrap();

        let contact = &book.contacts()[1];
        assert_eq!(contact.name, "Robert Smith");
        assert_eq!(contact.email, "rob@example.com");
        assert!(contact.is_bookmarked);
        assert_eq!(contact.created_at, created);
    }

    #[test]
    fn update_of_absent_id_is_a_validated_no_op() {
        let mut book = seeded_book();
        book.update_contact(999, valid_draft("Ghost")).unwrap();
        assert_eq!(book.len(), 5);
        assert!(book.contacts().iter().all(|c| c.name != "Ghost"));

        let errors = book
            .update_contact(999, ContactDraft::new("", "", ""))
            .unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn delete_contact_prunes_the_selection() {
        let mut book = seeded_book();
        book.toggle_selection(3);
        assert!(book.is_selected(3));

        book.delete_contact(3);
        assert_eq!(book.len(), 4);
        assert!(!book.is_selected(3));
        assert_eq!(book.store().saved().unwrap().len(), 4);
    }

    #[test]
    fn delete_of_absent_id_is_a_no_op() {
        let mut book = ContactBook::open(InMemoryStore::new());
        book.delete_contact(999);
        assert_eq!(book.len(), 5);
        assert!(book.store().saved().is_none());
    }

    #[test]
    fn delete_selected_removes_the_selection_and_clears_it() {
        let mut book = seeded_book();
        book.toggle_selection(1);
        book.toggle_selection(2);

        book.delete_selected();

        let ids: Vec<u64> = book.contacts().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
        assert!(book.selection().is_empty());
    }

    #[test]
    fn toggle_bookmark_twice_restores_the_original_flag() {
        let mut book = seeded_book();
        assert!(!book.contacts()[0].is_bookmarked);
        book.toggle_bookmark(1);
        assert!(book.contacts()[0].is_bookmarked);
        book.toggle_bookmark(1);
        assert!(!book.contacts()[0].is_bookmarked);
    }

    #[test]
    fn bookmarked_filter_sees_a_toggled_contact() {
        let mut book = seeded_book();
        book.toggle_bookmark(3);
        book.set_filter(FilterMode::Bookmarked);

        let visible = book.visible_contacts();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 3);
    }

    #[test]
    fn bookmark_selected_flags_everything_then_clears_selection() {
        let mut book = seeded_book();
        book.toggle_selection(1);
        book.toggle_selection(4);

        book.bookmark_selected();
        assert!(book.contacts()[0].is_bookmarked);
        assert!(book.contacts()[3].is_bookmarked);
        assert!(!book.contacts()[1].is_bookmarked);
        assert!(book.selection().is_empty());

        book.toggle_selection(1);
        book.unbookmark_selected();
        assert!(!book.contacts()[0].is_bookmarked);
        assert!(book.contacts()[3].is_bookmarked);
    }

    #[test]
    fn toggle_selection_ignores_ids_not_in_the_list() {
        let mut book = seeded_book();
        book.toggle_selection(999);
        assert!(book.selection().is_empty());
    }

    #[test]
    fn select_all_targets_only_the_visible_subset() {
        let mut book = seeded_book();
        book.toggle_bookmark(2);
        book.toggle_bookmark(5);
        book.set_filter(FilterMode::Bookmarked);

        book.select_all();
        let selected: Vec<u64> = book.selection().iter().copied().collect();
        assert_eq!(selected, vec![2, 5]);
    }

    #[test]
    fn changing_the_filter_prunes_stale_selections() {
        let mut book = seeded_book();
        book.toggle_bookmark(2);
        book.toggle_selection(1);
        book.toggle_selection(2);

        book.set_filter(FilterMode::Bookmarked);
        let selected: Vec<u64> = book.selection().iter().copied().collect();
        assert_eq!(selected, vec![2]);
    }

    #[test]
    fn changing_the_query_prunes_stale_selections() {
        let mut book = seeded_book();
        book.toggle_selection(1);
        book.toggle_selection(2);

        book.set_query("bob");
        assert!(!book.is_selected(1));
        assert!(book.is_selected(2));
    }

    #[test]
    fn blank_query_bypasses_the_search_engine() {
        let mut book = seeded_book();
        book.set_query("   ");
        assert_eq!(book.visible_contacts().len(), 5);
    }

    #[test]
    fn search_runs_within_the_filtered_subset_only() {
        let mut book = seeded_book();
        book.toggle_bookmark(2);
        book.set_filter(FilterMode::Bookmarked);
        book.set_query("alice");

        // Alice exists but is not bookmarked, so the filtered candidates
        // never contain her.
        assert!(book.visible_contacts().is_empty());
    }

    #[test]
    fn today_filter_includes_fresh_adds_and_excludes_older_contacts() {
        let store = InMemoryStore::with_contacts(vec![Contact {
            id: 1,
            name: "Old Timer".into(),
            phone: "123".into(),
            email: "old@example.com".into(),
            created_at: Some(Utc::now() - Duration::days(2)),
            is_bookmarked: false,
        }]);
        let mut book = ContactBook::open(store);
        let id = book.add_contact(valid_draft("Newcomer")).unwrap();

        book.set_filter(FilterMode::Today);
        let visible = book.visible_contacts();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, id);
    }

    #[test]
    fn failed_saves_leave_memory_authoritative() {
        let mut book = ContactBook::open(InMemoryStore::new().failing_saves());
        book.add_contact(valid_draft("Frank Field")).unwrap();

        assert_eq!(book.len(), 6);
        assert!(book.store().saved().is_none());
    }

    #[test]
    fn listeners_fire_on_every_state_change() {
        let count = Rc::new(Cell::new(0usize));
        let seen = Rc::clone(&count);

        let mut book = seeded_book();
        book.subscribe(move || seen.set(seen.get() + 1));

        book.toggle_bookmark(1); // 1
        book.toggle_selection(1); // 2
        book.set_filter(FilterMode::Bookmarked); // 3
        book.set_query("ali"); // 4
        book.clear_selection(); // 5
        assert_eq!(count.get(), 5);
    }

    #[test]
    fn add_then_reopen_sees_the_persisted_list() {
        let mut store = InMemoryStore::new();
        {
            let mut book = ContactBook::open(std::mem::take(&mut store));
            book.add_contact(valid_draft("Frank Field")).unwrap();
            store = book.into_store();
        }
        let book = ContactBook::open(store);
        assert_eq!(book.len(), 6);
    }
}
