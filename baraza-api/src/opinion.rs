use std::fmt;

use crate::{Error, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct OpinionId(pub u64);

impl fmt::Display for OpinionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An opinion along with all of its replies, as stored in fixtures and
/// returned to renderers that want the nested form
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Opinion {
    pub id: OpinionId,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub upvotes: u64,
    #[serde(default)]
    pub downvotes: u64,
    pub timestamp: Time,

    /// Replies in the order they were posted
    #[serde(default)]
    pub replies: Vec<Opinion>,
}

impl Opinion {
    pub fn new(id: OpinionId, author: String, content: String, timestamp: Time) -> Opinion {
        Opinion {
            id,
            author,
            content,
            upvotes: 0,
            downvotes: 0,
            timestamp,
            replies: Vec::new(),
        }
    }

    /// Number of opinions in this subtree, this one included
    pub fn count(&self) -> usize {
        1 + self.replies.iter().map(Opinion::count).sum::<usize>()
    }

    // Does not check id uniqueness, which only makes sense forest-wide
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.author)?;
        crate::validate_content(&self.content)?;
        self.replies.iter().try_for_each(Opinion::validate)
    }
}
