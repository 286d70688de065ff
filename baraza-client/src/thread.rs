use std::collections::{hash_map, HashMap, VecDeque};

use crate::api::{self, Error, OpinionId, Time};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Opinion {
    pub id: OpinionId,

    /// None for top-level opinions
    pub parent: Option<OpinionId>,

    pub author: String,
    pub content: String,
    pub upvotes: u64,
    pub downvotes: u64,
    pub timestamp: Time,

    /// Replies in the order they were posted
    pub replies: Vec<OpinionId>,
}

/// The discussion forest of one forum.
///
/// Opinions live in a single map keyed by id, and each one only knows the ids
/// of its replies. Top-level opinions are kept newest first, replies oldest
/// first.
#[derive(Clone, Debug)]
pub struct Thread {
    opinions: HashMap<OpinionId, Opinion>,
    roots: VecDeque<OpinionId>,

    // greater than every id ever stored here, until ids run out at u64::MAX
    next_id: u64,

    // timestamp of the last locally-created opinion
    last_local: Option<Time>,
}

impl Default for Thread {
    fn default() -> Thread {
        Thread::new()
    }
}

impl Thread {
    pub fn new() -> Thread {
        Thread {
            opinions: HashMap::new(),
            roots: VecDeque::new(),
            next_id: 1,
            last_local: None,
        }
    }

    /// Build a thread from its nested form, keeping the order of `forest` and
    /// of every reply list
    pub fn from_forest(forest: Vec<api::Opinion>) -> Result<Thread, Error> {
        let mut res = Thread::new();
        for o in forest {
            let id = res.seed(o)?;
            res.roots.push_back(id);
        }
        Ok(res)
    }

    fn seed(&mut self, root: api::Opinion) -> Result<OpinionId, Error> {
        let root_id = root.id;
        let mut stack = vec![(root, None)];
        while let Some((o, parent)) = stack.pop() {
            api::validate_string(&o.author)?;
            api::validate_content(&o.content)?;
            let id = o.id;
            match self.opinions.entry(id) {
                hash_map::Entry::Occupied(_) => return Err(Error::OpinionIdAlreadyUsed(id)),
                hash_map::Entry::Vacant(entry) => {
                    entry.insert(Opinion {
                        id,
                        parent,
                        author: o.author,
                        content: o.content,
                        upvotes: o.upvotes,
                        downvotes: o.downvotes,
                        timestamp: o.timestamp,
                        replies: Vec::with_capacity(o.replies.len()),
                    });
                }
            }
            if let Some(p) = parent {
                self.opinions
                    .get_mut(&p)
                    .expect("parents are seeded before their replies")
                    .replies
                    .push(id);
            }
            self.next_id = self.next_id.max(id.0.saturating_add(1));
            stack.extend(o.replies.into_iter().rev().map(|r| (r, Some(id))));
        }
        Ok(root_id)
    }

    /// Rebuild the nested form of this thread
    pub fn to_forest(&self) -> Vec<api::Opinion> {
        let mut forest = Vec::with_capacity(self.roots.len());
        // opinions being rebuilt, each with the replies already rebuilt
        let mut stack: Vec<(&Opinion, Vec<api::Opinion>)> = Vec::new();
        for root in &self.roots {
            stack.push((&self.opinions[root], Vec::new()));
            while let Some((o, rebuilt)) = stack.pop() {
                if let Some(r) = o.replies.get(rebuilt.len()) {
                    let next = &self.opinions[r];
                    stack.push((o, rebuilt));
                    stack.push((next, Vec::with_capacity(next.replies.len())));
                    continue;
                }
                let nested = api::Opinion {
                    id: o.id,
                    author: o.author.clone(),
                    content: o.content.clone(),
                    upvotes: o.upvotes,
                    downvotes: o.downvotes,
                    timestamp: o.timestamp,
                    replies: rebuilt,
                };
                match stack.last_mut() {
                    Some((_, siblings)) => siblings.push(nested),
                    None => forest.push(nested),
                }
            }
        }
        forest
    }

    pub fn len(&self) -> usize {
        self.opinions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opinions.is_empty()
    }

    pub fn get(&self, id: &OpinionId) -> Option<&Opinion> {
        self.opinions.get(id)
    }

    pub fn contains(&self, id: &OpinionId) -> bool {
        self.opinions.contains_key(id)
    }

    /// Top-level opinions, newest first
    pub fn roots(&self) -> impl Iterator<Item = &Opinion> {
        self.roots.iter().map(move |id| &self.opinions[id])
    }

    pub fn replies_of(&self, id: &OpinionId) -> Option<impl Iterator<Item = &Opinion>> {
        let o = self.opinions.get(id)?;
        Some(o.replies.iter().map(move |r| &self.opinions[r]))
    }

    /// Nesting depth of an opinion, 0 being top-level
    pub fn depth_of(&self, id: &OpinionId) -> Option<usize> {
        let mut depth = 0;
        let mut cur = self.opinions.get(id)?;
        while let Some(p) = cur.parent {
            depth += 1;
            cur = &self.opinions[&p];
        }
        Some(depth)
    }

    /// Pre-order walk over the whole forest, along with each opinion's depth
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse {
            thread: self,
            stack: self.roots.iter().rev().map(|id| (*id, 0)).collect(),
        }
    }

    /// Post a new top-level opinion, that will be shown first
    pub fn create_top_level(
        &mut self,
        author: &str,
        content: &str,
        now: Time,
    ) -> Result<&Opinion, Error> {
        api::validate_string(author)?;
        api::validate_content(content)?;
        let id = self.fresh(None, author, content, now)?;
        self.roots.push_front(id);
        Ok(&self.opinions[&id])
    }

    /// Reply to any opinion of the thread, whatever its depth
    pub fn create_reply(
        &mut self,
        parent: OpinionId,
        author: &str,
        content: &str,
        now: Time,
    ) -> Result<&Opinion, Error> {
        api::validate_string(author)?;
        api::validate_content(content)?;
        if !self.opinions.contains_key(&parent) {
            tracing::warn!(?parent, "reply target is not in the thread");
            return Err(Error::ParentNotFound(parent));
        }
        let id = self.fresh(Some(parent), author, content, now)?;
        self.opinions
            .get_mut(&parent)
            .expect("checked parent existence above")
            .replies
            .push(id);
        Ok(&self.opinions[&id])
    }

    /// Store a new opinion under the next free id. The caller links it into
    /// the forest.
    fn fresh(
        &mut self,
        parent: Option<OpinionId>,
        author: &str,
        content: &str,
        now: Time,
    ) -> Result<OpinionId, Error> {
        let id = OpinionId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(Error::OpinionIdsExhausted)?;
        let timestamp = match self.last_local {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_local = Some(timestamp);
        match self.opinions.entry(id) {
            hash_map::Entry::Occupied(_) => unreachable!("fresh id {id:?} already in use"),
            hash_map::Entry::Vacant(entry) => {
                entry.insert(Opinion {
                    id,
                    parent,
                    author: String::from(author),
                    content: String::from(content),
                    upvotes: 0,
                    downvotes: 0,
                    timestamp,
                    replies: Vec::new(),
                });
            }
        }
        Ok(id)
    }
}

pub struct Traverse<'a> {
    thread: &'a Thread,
    stack: Vec<(OpinionId, usize)>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = (&'a Opinion, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let o = &self.thread.opinions[&id];
        self.stack.extend(o.replies.iter().rev().map(|r| (*r, depth + 1)));
        Some((o, depth))
    }
}
