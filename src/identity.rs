// 🪪 Identity Resolver - get-or-create Authors by normalized name
//
// Linear scan over the registry, same semantics as a case-insensitive
// lookup table. Datasets are a few hundred authors, so the scan stays cheap;
// callers only depend on resolve()/find(), so an index can replace it later.

use crate::entities::{Author, AuthorId};
use crate::names::normalize;
use tracing::debug;

/// All Authors of one knowledge base, in creation order
#[derive(Debug, Clone, Default)]
pub struct AuthorRegistry {
    authors: Vec<Author>,
}

impl AuthorRegistry {
    pub fn new() -> Self {
        AuthorRegistry::default()
    }

    /// Find an existing Author whose normalized name matches
    pub fn find(&self, name: &str) -> Option<AuthorId> {
        let key = normalize(name);
        self.find_key(&key)
    }

    pub(crate) fn find_key(&self, key: &str) -> Option<AuthorId> {
        self.authors.iter().find(|a| a.key == key).map(|a| a.id)
    }

    /// Return the Author for `name`, creating it on first sight.
    ///
    /// Names differing only in case or surrounding/internal whitespace resolve
    /// to the same Author. A new Author keeps the trimmed input as display name.
    pub fn resolve(&mut self, name: &str) -> AuthorId {
        if let Some(id) = self.find(name) {
            return id;
        }

        let id = AuthorId(self.authors.len());
        let author = Author::new(id, name);
        debug!(author = %author.name, id = id.index(), "new author");
        self.authors.push(author);
        id
    }

    pub fn get(&self, id: AuthorId) -> Option<&Author> {
        self.authors.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: AuthorId) -> Option<&mut Author> {
        self.authors.get_mut(id.0)
    }

    pub fn all(&self) -> &[Author] {
        &self.authors
    }

    pub fn count(&self) -> usize {
        self.authors.len()
    }

    pub(crate) fn into_vec(self) -> Vec<Author> {
        self.authors
    }
}
