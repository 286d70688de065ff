use crate::{ForumId, OpinionId};

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Content must not be empty")]
    EmptyContent,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("Reply target {0} is not in the thread")]
    ParentNotFound(OpinionId),

    #[error("Opinion id already used {0}")]
    OpinionIdAlreadyUsed(OpinionId),

    #[error("No opinion id left to hand out")]
    OpinionIdsExhausted,

    #[error("Forum id already used {0}")]
    ForumIdAlreadyUsed(ForumId),

    #[error("Unknown forum {0}")]
    UnknownForum(ForumId),

    #[error("No report available for forum {0}")]
    ReportUnavailable(ForumId),
}

impl Error {
    /// Whether the caller should keep the user's input around so they can fix it
    pub fn keeps_input(&self) -> bool {
        match self {
            Error::EmptyContent | Error::NullByteInString(_) => true,
            Error::PermissionDenied
            | Error::ParentNotFound(_)
            | Error::OpinionIdAlreadyUsed(_)
            | Error::OpinionIdsExhausted
            | Error::ForumIdAlreadyUsed(_)
            | Error::UnknownForum(_)
            | Error::ReportUnavailable(_) => false,
        }
    }
}
