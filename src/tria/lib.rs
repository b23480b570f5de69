//! # Tria Architecture
//!
//! Tria is a **UI-agnostic contact-book core**. There is no binary here: a
//! presentation layer (terminal UI, GUI, web front end) is an external
//! consumer that reads the derived view and calls the mutation operations.
//!
//! ## The layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation (external)                                    │
//! │  - Renders the visible list, collects form input            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Book (book.rs)                                             │
//! │  - Owns contacts + filter + query + selection               │
//! │  - Synchronous, atomic mutations; write-through persistence │
//! │  - Composes filter → search into the visible list           │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                            │
//!                 ▼                            ▼
//! ┌───────────────────────────┐  ┌─────────────────────────────┐
//! │  Engines (filter.rs,      │  │  Storage (store/)           │
//! │  search.rs, validate.rs)  │  │  - ContactStore trait       │
//! │  - Pure functions only    │  │  - FileStore / InMemoryStore│
//! └───────────────────────────┘  └─────────────────────────────┘
//! ```
//!
//! ## Key principles
//!
//! - **Single owner**: one [`book::ContactBook`] exclusively owns all
//!   session state; operations run to completion on the calling thread.
//! - **Filter, then search**: search only ever ranks within the active
//!   filter's subset. The blank-query bypass lives in the book, because the
//!   search engine deliberately returns nothing for a blank query.
//! - **Graceful degradation**: persistence failures are logged and
//!   swallowed; a fresh or unreadable store yields a seed dataset. No fatal
//!   paths.
//! - **Validation is data**: add/update report a field→message map, never an
//!   error type, and leave state untouched on failure.
//!
//! ## Module overview
//!
//! - [`book`]: the selection & mutation state machine — the entry point
//! - [`filter`]: filter-mode predicates over the list
//! - [`search`]: weighted fuzzy matching and relevance ranking
//! - [`validate`]: draft validation producing field-level messages
//! - [`debounce`]: cancellable scheduled task for query input
//! - [`store`]: persistence trait and backends
//! - [`model`]: core data types (`Contact`, `ContactDraft`, `FilterMode`)
//! - [`error`]: internal error types for the fallible storage helpers

pub mod book;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod model;
pub mod search;
pub mod store;
pub mod validate;
