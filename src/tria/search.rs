//! The search engine: approximate text matching over weighted contact
//! fields, returning a relevance-ranked subset of its candidates.
//!
//! Matching is tolerant of minor misspellings via Jaro-Winkler similarity;
//! a direct substring hit counts as a perfect field match. The engine is a
//! pure function over whatever candidate slice it is handed, so composing
//! filter-then-search is just two calls — it never reaches back to the full
//! list.
//!
//! A blank query returns an empty result by design. Callers that want
//! "no search" semantics must skip the call, which is exactly what
//! [`crate::book::ContactBook::visible_contacts`] does.

use std::cmp::Ordering;

use rapidfuzz::distance::jaro_winkler;

use crate::model::Contact;

const NAME_WEIGHT: f64 = 0.4;
const EMAIL_WEIGHT: f64 = 0.3;
const PHONE_WEIGHT: f64 = 0.3;

/// Tuning knobs for approximate matching.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// How far from an exact match a candidate's best field may be before it
    /// is dropped: 0.0 keeps only perfect matches, 1.0 keeps everything.
    pub tolerance: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { tolerance: 0.3 }
    }
}

/// Search `candidates` with the default tolerance.
pub fn search(candidates: &[Contact], query: &str) -> Vec<Contact> {
    search_with(candidates, query, &SearchOptions::default())
}

/// Search `candidates`, best match first; ties keep candidate order.
pub fn search_with(candidates: &[Contact], query: &str, options: &SearchOptions) -> Vec<Contact> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let cutoff = (1.0 - options.tolerance).clamp(0.0, 1.0);

    let mut matches: Vec<(&Contact, f64)> = candidates
        .iter()
        .filter_map(|contact| {
            let name = field_similarity(&query, &contact.name);
            let email = field_similarity(&query, &contact.email);
            let phone = field_similarity(&query, &contact.phone);
            if name.max(email).max(phone) < cutoff {
                return None;
            }
            let relevance = NAME_WEIGHT * name + EMAIL_WEIGHT * email + PHONE_WEIGHT * phone;
            Some((contact, relevance))
        })
        .collect();

    // Stable sort, so equal relevance preserves candidate order.
    matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    matches.into_iter().map(|(c, _)| c.clone()).collect()
}

/// Best similarity of `query` (already lowercased) against the field as a
/// whole and against each whitespace-separated token of it.
fn field_similarity(query: &str, field: &str) -> f64 {
    let field = field.to_lowercase();
    if field.trim().is_empty() {
        return 0.0;
    }
    if field.contains(query) {
        return 1.0;
    }
    let whole = jaro_winkler::similarity(field.chars(), query.chars());
    field
        .split_whitespace()
        .map(|token| jaro_winkler::similarity(token.chars(), query.chars()))
        .fold(whole, f64::max)
}
