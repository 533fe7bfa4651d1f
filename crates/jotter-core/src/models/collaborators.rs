//! Collaborator tags attached to a shared note

use serde::{Deserialize, Serialize};

/// Insertion-ordered set of collaborator email addresses.
///
/// Membership is case-insensitive on the trimmed address; the first spelling
/// added is the one kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollaboratorTags(Vec<String>);

impl CollaboratorTags {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Check whether `email` is already a collaborator
    pub fn contains(&self, email: &str) -> bool {
        self.position(email).is_some()
    }

    /// Add `email` at the end. Returns `false` if it was already present or blank.
    pub fn insert(&mut self, email: &str) -> bool {
        let email = email.trim();
        if email.is_empty() || self.contains(email) {
            return false;
        }
        self.0.push(email.to_string());
        true
    }

    /// Remove `email`. Returns `false` if it was not present.
    pub fn remove(&mut self, email: &str) -> bool {
        match self.position(email) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    fn position(&self, email: &str) -> Option<usize> {
        let email = email.trim();
        self.0
            .iter()
            .position(|existing| existing.eq_ignore_ascii_case(email))
    }
}

impl<S: AsRef<str>> FromIterator<S> for CollaboratorTags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        for email in iter {
            tags.insert(email.as_ref());
        }
        tags
    }
}

/// Loose email shape check used before accepting a collaborator.
///
/// Requires exactly one `@`, a non-empty local part, a dotted domain and no
/// whitespace. Deliverability is the backend's concern.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !domain.ends_with('.')
}
