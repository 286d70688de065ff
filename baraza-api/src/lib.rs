use chrono::Utc;

mod error;
pub use error::Error;

mod forum;
pub use forum::{Forum, ForumFixture, ForumId};

mod opinion;
pub use opinion::{Opinion, OpinionId};

mod report;
pub use report::Report;

pub type Time = chrono::DateTime<Utc>;

/// Author name used for everything written from the local view
pub const LOCAL_AUTHOR: &str = "You";

/// Format used when showing a timestamp to a human
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn display_time(t: &Time) -> String {
    t.format(TIME_FORMAT).to_string()
}

// Null bytes are rejected everywhere, as they cannot round-trip through most
// text-handling layers
pub fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(String::from(s))),
        false => Ok(()),
    }
}

/// Opinion bodies must have at least one non-whitespace character
pub fn validate_content(s: &str) -> Result<(), Error> {
    if s.trim().is_empty() {
        return Err(Error::EmptyContent);
    }
    validate_string(s)
}
