use std::fmt;

use crate::{Error, Opinion, Report};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct ForumId(pub u64);

impl fmt::Display for ForumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Forum {
    pub id: ForumId,
    pub title: String,
    pub description: String,

    // Headline statistics, display-only
    pub participants: u64,
    pub opinions: u64,
    pub votes: u64,

    /// if true, an analysis report can be shown for this forum
    pub has_report: bool,
}

/// Everything needed to seed one forum
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ForumFixture {
    pub forum: Forum,

    /// Top-level opinions, newest first
    #[serde(default)]
    pub opinions: Vec<Opinion>,

    #[serde(default)]
    pub report: Option<Report>,
}

impl ForumFixture {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.forum.title)?;
        crate::validate_string(&self.forum.description)?;
        self.opinions.iter().try_for_each(Opinion::validate)
    }
}
