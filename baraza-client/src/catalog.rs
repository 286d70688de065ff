use std::{collections::HashMap, sync::Arc};

use crate::api::{Forum, ForumId};

/// The list of forums a user can browse
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Catalog {
    pub forums: Arc<HashMap<ForumId, Forum>>,
}

impl Catalog {
    pub fn new() -> Catalog {
        Catalog {
            forums: Arc::new(HashMap::new()),
        }
    }

    pub fn add_forums(&mut self, forums: Vec<Forum>) {
        Arc::make_mut(&mut self.forums).extend(forums.into_iter().map(|f| (f.id, f)));
    }

    pub fn len(&self) -> usize {
        self.forums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forums.is_empty()
    }

    pub fn forum(&self, id: &ForumId) -> Option<&Forum> {
        self.forums.get(id)
    }

    pub fn forum_id(&self, title: &str) -> Option<ForumId> {
        self.forums
            .values()
            .find(|f| f.title == title)
            .map(|f| f.id)
    }

    /// Returns the forums whose title contains `query`, ignoring case, ordered
    /// by id. An empty query returns everything.
    pub fn search(&self, query: &str) -> Vec<&Forum> {
        let query = query.to_lowercase();
        let mut res = self
            .forums
            .values()
            .filter(|f| f.title.to_lowercase().contains(&query))
            .collect::<Vec<_>>();
        res.sort_unstable_by_key(|f| f.id);
        res
    }

    /// Returns false if the forum is not in the catalog
    pub fn mark_report_ready(&mut self, id: &ForumId) -> bool {
        match Arc::make_mut(&mut self.forums).get_mut(id) {
            Some(f) => {
                f.has_report = true;
                true
            }
            None => false,
        }
    }
}
